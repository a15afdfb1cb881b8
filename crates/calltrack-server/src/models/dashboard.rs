//! Dashboard DTOs - Aggregate call figures

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use calltrack::CallStats;

/// Dashboard response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_calls: usize,
    pub avg_duration_minutes: f64,
    /// Percentage of qualified or closed-won calls
    pub qualified_rate: f64,
    pub avg_sentiment: f64,
    pub outcomes: Vec<OutcomeCountResponse>,
}

/// Calls per outcome
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OutcomeCountResponse {
    pub outcome: String,
    pub count: usize,
}

impl From<CallStats> for DashboardResponse {
    fn from(stats: CallStats) -> Self {
        Self {
            total_calls: stats.total_calls,
            avg_duration_minutes: stats.avg_duration_minutes,
            qualified_rate: stats.qualified_rate,
            avg_sentiment: stats.avg_sentiment,
            outcomes: stats
                .outcomes
                .into_iter()
                .map(|o| OutcomeCountResponse {
                    outcome: o.outcome.to_string(),
                    count: o.count,
                })
                .collect(),
        }
    }
}
