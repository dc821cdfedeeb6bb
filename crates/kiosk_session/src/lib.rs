//! Kiosk session: the screen state machine, its timers and the API client.
//!
//! [`SessionState`] is a pure state machine. [`KioskRuntime`] hosts it on a
//! tokio task, runs the periodic refresh, fact rotation and idle checks while
//! a session is active, and submits wins through a [`KioskApi`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use kiosk_session::{Action, HttpKioskApi, KioskRuntime, KioskSettings};
//!
//! # async fn demo() {
//! let settings = KioskSettings::from_env();
//! let api = Arc::new(HttpKioskApi::new(settings.api_base_url()));
//! let kiosk = KioskRuntime::spawn(settings, api).expect("valid settings");
//! kiosk.action(Action::Start).ok();
//! println!("{}", kiosk.snapshot().screen());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod controller;
mod facts;
mod idle;
mod players;
mod runtime;
mod scheduler;
mod screen;
mod settings;

pub use client::{CollegeFact, HttpKioskApi, KioskApi, LeaderboardEntry, NetworkError};
pub use controller::SessionState;
pub use facts::FactRotation;
pub use idle::IdleTimer;
pub use players::{MAX_NAME_LEN, PlayerInfo, Roster};
pub use runtime::{KioskHandle, KioskRuntime, RuntimeStopped};
pub use scheduler::{Scheduler, StartAt, ZeroPeriod};
pub use screen::{Action, Effect, Screen, SessionEvent};
pub use settings::{API_URL_ENV, ConfigError, KioskSettings};
