//! Rotating "Did you know?" fact.

use tracing::{debug, instrument};

use crate::client::CollegeFact;

/// The loaded fact list and which entry is on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactRotation {
    facts: Vec<CollegeFact>,
    index: usize,
}

impl FactRotation {
    /// Empty rotation.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a reloaded list. A change in length restarts at the first fact.
    #[instrument(skip(self, facts), fields(count = facts.len()))]
    pub fn replace(&mut self, facts: Vec<CollegeFact>) {
        if facts.len() != self.facts.len() {
            debug!(old = self.facts.len(), "Fact count changed, restarting rotation");
            self.index = 0;
        }
        self.facts = facts;
    }

    /// Moves to the next fact, wrapping to the first.
    #[instrument(skip(self))]
    pub fn advance(&mut self) {
        if !self.facts.is_empty() {
            self.index = (self.index + 1) % self.facts.len();
        }
    }

    /// Index of the fact on screen.
    #[instrument(skip(self))]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The fact on screen, if any are loaded.
    #[instrument(skip(self))]
    pub fn current(&self) -> Option<&CollegeFact> {
        self.facts.get(self.index)
    }

    /// Every loaded fact.
    #[instrument(skip(self))]
    pub fn facts(&self) -> &[CollegeFact] {
        &self.facts
    }
}
