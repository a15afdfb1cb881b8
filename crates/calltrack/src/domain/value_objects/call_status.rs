//! CallStatus - Scheduling state of a call

use serde::{Deserialize, Serialize};

/// Whether the call happened, is planned, or was dropped
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Completed,
    Scheduled,
    Cancelled,
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Completed => write!(f, "completed"),
            CallStatus::Scheduled => write!(f, "scheduled"),
            CallStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for CallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(CallStatus::Completed),
            "scheduled" => Ok(CallStatus::Scheduled),
            "cancelled" => Ok(CallStatus::Cancelled),
            _ => Err(format!("Unknown call status: {}", s)),
        }
    }
}
