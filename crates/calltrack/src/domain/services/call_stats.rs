//! CallStats - Dashboard aggregates over a call list

use serde::{Deserialize, Serialize};

use crate::domain::entities::Call;
use crate::domain::value_objects::Outcome;

/// Number of calls with a given outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCount {
    pub outcome: Outcome,
    pub count: usize,
}

/// Summary figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallStats {
    pub total_calls: usize,
    pub avg_duration_minutes: f64,
    /// Percentage (0-100) of calls that ended qualified or closed-won
    pub qualified_rate: f64,
    /// Mean over the calls that carry a sentiment score
    pub avg_sentiment: f64,
    /// One entry per outcome, in `Outcome::ALL` order
    pub outcomes: Vec<OutcomeCount>,
}

impl CallStats {
    pub fn from_calls(calls: &[Call]) -> Self {
        let total = calls.len();

        let outcomes = Outcome::ALL
            .into_iter()
            .map(|outcome| OutcomeCount {
                outcome,
                count: calls.iter().filter(|c| c.outcome == outcome).count(),
            })
            .collect();

        if total == 0 {
            return Self {
                total_calls: 0,
                avg_duration_minutes: 0.0,
                qualified_rate: 0.0,
                avg_sentiment: 0.0,
                outcomes,
            };
        }

        // f64 so that very long durations cannot overflow the sum
        let total_seconds: f64 = calls.iter().map(|c| c.duration as f64).sum();
        let qualified = calls.iter().filter(|c| c.outcome.is_qualified()).count();
        let scores: Vec<f64> = calls.iter().filter_map(|c| c.sentiment_score).collect();
        let avg_sentiment = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            total_calls: total,
            avg_duration_minutes: total_seconds / total as f64 / 60.0,
            qualified_rate: qualified as f64 / total as f64 * 100.0,
            avg_sentiment,
            outcomes,
        }
    }

    pub fn count_for(&self, outcome: Outcome) -> usize {
        self.outcomes
            .iter()
            .find(|o| o.outcome == outcome)
            .map(|o| o.count)
            .unwrap_or(0)
    }
}
