//! Outcome - Categorical result of a sales call

use serde::{Deserialize, Serialize};

/// Call outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Qualified,
    NotQualified,
    FollowUp,
    ClosedWon,
    ClosedLost,
}

impl Outcome {
    pub const ALL: [Outcome; 5] = [
        Outcome::Qualified,
        Outcome::NotQualified,
        Outcome::FollowUp,
        Outcome::ClosedWon,
        Outcome::ClosedLost,
    ];

    /// Wire representation, identical to the serde form
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Qualified => "qualified",
            Outcome::NotQualified => "not-qualified",
            Outcome::FollowUp => "follow-up",
            Outcome::ClosedWon => "closed-won",
            Outcome::ClosedLost => "closed-lost",
        }
    }

    /// Counts towards the dashboard qualified rate
    pub fn is_qualified(&self) -> bool {
        matches!(self, Outcome::Qualified | Outcome::ClosedWon)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("Unknown outcome: {}", s))
    }
}
