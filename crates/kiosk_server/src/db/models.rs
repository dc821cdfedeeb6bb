//! Database models and wire shapes.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text, Timestamp};
use serde::Serialize;

use crate::db::schema;

/// Facts inserted, in order, when the facts table is first found empty.
pub const DEFAULT_FACTS: [&str; 10] = [
    "Sacred Heart University was founded in 1963.",
    "SHU has over 90 undergraduate and graduate programs.",
    "The university mascot is the Pioneer.",
    "SHU is located in Fairfield, Connecticut.",
    "Sacred Heart University has a student-to-faculty ratio of 14:1.",
    "The university offers Division I athletics programs.",
    "SHU is home to more than 9,000 students.",
    "The Frank and Marisa Martire Business & Communications Center opened in 2014.",
    "Sacred Heart University has campuses in Connecticut, Luxembourg, and Ireland.",
    "SHU was the first Catholic university in the United States founded by laity.",
];

/// One recorded win.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::leaderboard)]
pub struct LeaderboardRow {
    id: i32,
    player_name: String,
    wins: i32,
    timestamp: NaiveDateTime,
}

/// Insertable win event.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::leaderboard)]
pub struct NewLeaderboardRow {
    player_name: String,
    wins: i32,
    timestamp: NaiveDateTime,
}

/// Per-player aggregate returned by the leaderboard query.
///
/// `id` is the newest row id for the name, `timestamp` its most recent win.
#[derive(Debug, Clone, PartialEq, QueryableByName, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStanding {
    #[diesel(sql_type = Integer)]
    id: i32,
    #[diesel(sql_type = Text)]
    player_name: String,
    #[diesel(sql_type = BigInt)]
    wins: i64,
    #[diesel(sql_type = Timestamp)]
    timestamp: NaiveDateTime,
}

/// A stored college fact.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::facts)]
pub struct Fact {
    id: i32,
    fact: String,
}

/// Insertable fact.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::facts)]
pub struct NewFact {
    fact: String,
}
