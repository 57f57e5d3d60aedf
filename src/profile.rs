//! Player profile persisted across runs
//!
//! The simulation only defines the snapshot: a best score and the
//! customization record, read at run start and offered for write at run end.
//! Where the JSON actually lives is the caller's business.

use serde::{Deserialize, Serialize};

use crate::sim::Ability;

/// Avatar glyph and equipped ability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub avatar: String,
    pub ability: Ability,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            avatar: "(\u{2022}_\u{2022})".to_string(),
            ability: Ability::DoubleJump,
        }
    }
}

/// Everything that outlives a single run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub high_score: u64,
    pub customization: Customization,
}

impl Profile {
    /// Offer a finished run's score. The stored best only ever goes up.
    /// Returns true when a new high score was recorded.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Serialize the snapshot
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a snapshot, falling back to defaults on a bad or missing one
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(profile) => profile,
            Err(err) => {
                log::warn!("profile snapshot unreadable ({err}), starting fresh");
                Self::default()
            }
        }
    }
}
