//! Call DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use calltrack::{Call, CallDraft, CallPatch, CallQuery};

/// Call response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallResponse {
    pub id: String,
    pub prospect_name: String,
    pub company: String,
    /// qualified | not-qualified | follow-up | closed-won | closed-lost
    pub outcome: String,
    pub notes: String,
    pub date: String,
    /// Seconds
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk_time_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_asked: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    pub tags: Vec<String>,
}

impl From<Call> for CallResponse {
    fn from(call: Call) -> Self {
        Self {
            id: call.id,
            prospect_name: call.prospect_name,
            company: call.company,
            outcome: call.outcome.to_string(),
            notes: call.notes,
            date: call.date,
            duration: call.duration,
            status: call.status.map(|s| s.to_string()),
            talk_time_ratio: call.talk_time_ratio,
            questions_asked: call.questions_asked,
            sentiment_score: call.sentiment_score,
            tags: call.tags,
        }
    }
}

/// Create Call request. `prospectName` and `outcome` are required; they
/// are optional here so their absence is reported as a validation error.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCallRequest {
    pub prospect_name: Option<String>,
    pub company: Option<String>,
    pub outcome: Option<String>,
    pub notes: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i64>,
    pub status: Option<String>,
    pub talk_time_ratio: Option<f64>,
    pub questions_asked: Option<i64>,
    pub sentiment_score: Option<f64>,
    pub tags: Option<Vec<String>>,
}

impl From<CreateCallRequest> for CallDraft {
    fn from(req: CreateCallRequest) -> Self {
        Self {
            prospect_name: req.prospect_name,
            company: req.company,
            outcome: req.outcome,
            notes: req.notes,
            date: req.date,
            duration: req.duration,
            status: req.status,
            talk_time_ratio: req.talk_time_ratio,
            questions_asked: req.questions_asked,
            sentiment_score: req.sentiment_score,
            tags: req.tags,
        }
    }
}

/// Update Call request. Omitted or null fields keep their stored value;
/// an `id` in the body is ignored.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCallRequest {
    pub prospect_name: Option<String>,
    pub company: Option<String>,
    pub outcome: Option<String>,
    pub notes: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i64>,
    pub status: Option<String>,
    pub talk_time_ratio: Option<f64>,
    pub questions_asked: Option<i64>,
    pub sentiment_score: Option<f64>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateCallRequest> for CallPatch {
    fn from(req: UpdateCallRequest) -> Self {
        Self {
            prospect_name: req.prospect_name,
            company: req.company,
            outcome: req.outcome,
            notes: req.notes,
            date: req.date,
            duration: req.duration,
            status: req.status,
            talk_time_ratio: req.talk_time_ratio,
            questions_asked: req.questions_asked,
            sentiment_score: req.sentiment_score,
            tags: req.tags,
        }
    }
}

/// List / dashboard filter parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCallsQuery {
    /// Case-insensitive match against prospect name, company and notes
    pub search: Option<String>,
    /// Outcome to keep, or `all`
    pub status: Option<String>,
}

impl From<ListCallsQuery> for CallQuery {
    fn from(q: ListCallsQuery) -> Self {
        CallQuery::new(q.search, q.status)
    }
}
