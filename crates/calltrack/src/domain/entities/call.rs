//! Call - Sales Call Record
//!
//! Pure domain entity without infrastructure dependencies.
//! Creation and update input arrives as loosely typed `CallDraft` /
//! `CallPatch` values and is validated here, so every adapter shares
//! the same rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CallStatus, Outcome};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Call - A single tracked sales call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub id: String,
    pub prospect_name: String,
    #[serde(default)]
    pub company: String,
    pub outcome: Outcome,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub date: String,
    /// Seconds
    #[serde(default)]
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk_time_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_asked: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for creating a call. Enum fields stay as raw strings so that an
/// unknown value surfaces as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default)]
pub struct CallDraft {
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

/// Partial update. `None` keeps the stored value. There is no id field:
/// the id of a call never changes.
#[derive(Debug, Clone, Default)]
pub struct CallPatch {
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

impl Call {
    /// Generate a fresh call id (`call_<uuid>`)
    pub fn generate_id() -> String {
        format!("call_{}", Uuid::new_v4().simple())
    }

    /// Build a call from a draft, applying defaults for omitted fields
    pub fn from_draft(draft: CallDraft, id: String, today: NaiveDate) -> Result<Self, DomainError> {
        let prospect_name = draft
            .prospect_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let outcome = draft.outcome.filter(|o| !o.trim().is_empty());

        let mut missing = Vec::new();
        if prospect_name.is_none() {
            missing.push("prospectName".to_string());
        }
        if outcome.is_none() {
            missing.push("outcome".to_string());
        }
        let (Some(prospect_name), Some(outcome)) = (prospect_name, outcome) else {
            return Err(DomainError::MissingFields { fields: missing });
        };

        Ok(Self {
            id,
            prospect_name,
            company: draft.company.map(|c| c.trim().to_string()).unwrap_or_default(),
            outcome: parse_outcome(&outcome)?,
            notes: draft.notes.map(|n| n.trim().to_string()).unwrap_or_default(),
            date: draft
                .date
                .as_deref()
                .and_then(non_blank)
                .unwrap_or_else(|| today.format(DATE_FORMAT).to_string()),
            duration: draft
                .duration
                .map(|d| non_negative("duration", d))
                .transpose()?
                .unwrap_or(0),
            status: draft.status.as_deref().map(parse_status).transpose()?,
            talk_time_ratio: draft
                .talk_time_ratio
                .map(|r| unit_interval("talkTimeRatio", r))
                .transpose()?,
            questions_asked: draft
                .questions_asked
                .map(|q| non_negative("questionsAsked", q))
                .transpose()?,
            sentiment_score: draft
                .sentiment_score
                .map(|s| unit_interval("sentimentScore", s))
                .transpose()?,
            tags: draft.tags.map(normalize_tags).unwrap_or_default(),
        })
    }

    /// Merge a patch onto this call. Every supplied field is validated
    /// before anything is written, so a failed patch leaves the call as it was.
    pub fn apply(&mut self, patch: &CallPatch) -> Result<(), DomainError> {
        let mut next = self.clone();

        if let Some(name) = &patch.prospect_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::Validation(
                    "prospectName must not be empty".to_string(),
                ));
            }
            next.prospect_name = name.to_string();
        }
        if let Some(company) = &patch.company {
            next.company = company.trim().to_string();
        }
        if let Some(outcome) = &patch.outcome {
            next.outcome = parse_outcome(outcome)?;
        }
        if let Some(notes) = &patch.notes {
            next.notes = notes.trim().to_string();
        }
        // A blank date keeps the stored one
        if let Some(date) = patch.date.as_deref().and_then(non_blank) {
            next.date = date;
        }
        if let Some(duration) = patch.duration {
            next.duration = non_negative("duration", duration)?;
        }
        if let Some(status) = &patch.status {
            next.status = Some(parse_status(status)?);
        }
        if let Some(ratio) = patch.talk_time_ratio {
            next.talk_time_ratio = Some(unit_interval("talkTimeRatio", ratio)?);
        }
        if let Some(questions) = patch.questions_asked {
            next.questions_asked = Some(non_negative("questionsAsked", questions)?);
        }
        if let Some(score) = patch.sentiment_score {
            next.sentiment_score = Some(unit_interval("sentimentScore", score)?);
        }
        if let Some(tags) = &patch.tags {
            next.tags = normalize_tags(tags.clone());
        }

        *self = next;
        Ok(())
    }

    /// Check a record that did not come through `from_draft`, e.g. one
    /// loaded from a seed or data file
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.prospect_name.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "Call {}: prospectName must not be empty",
                self.id
            )));
        }
        for (field, value) in [
            ("talkTimeRatio", self.talk_time_ratio),
            ("sentimentScore", self.sentiment_score),
        ] {
            if let Some(value) = value {
                unit_interval(field, value)?;
            }
        }
        Ok(())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Trim tags, drop empty ones and keep the first occurrence of duplicates
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

fn parse_outcome(raw: &str) -> Result<Outcome, DomainError> {
    raw.parse().map_err(DomainError::Validation)
}

fn parse_status(raw: &str) -> Result<CallStatus, DomainError> {
    raw.parse().map_err(DomainError::Validation)
}

fn non_negative<T: TryFrom<i64>>(field: &str, value: i64) -> Result<T, DomainError> {
    if value < 0 {
        return Err(DomainError::Validation(format!(
            "{} must be non-negative",
            field
        )));
    }
    T::try_from(value).map_err(|_| DomainError::Validation(format!("{} is out of range", field)))
}

fn unit_interval(field: &str, value: f64) -> Result<f64, DomainError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::Validation(format!(
            "{} must be between 0 and 1",
            field
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn draft(name: &str, outcome: &str) -> CallDraft {
        CallDraft {
            prospect_name: Some(name.to_string()),
            outcome: Some(outcome.to_string()),
            ..Default::default()
        }
    }

    fn stored_call() -> Call {
        Call::from_draft(draft("Bob", "qualified"), "x".to_string(), today()).unwrap()
    }

    #[test]
    fn test_minimal_draft_gets_defaults() {
        let call = Call::from_draft(draft("Acme", "qualified"), "call_1".to_string(), today())
            .unwrap();

        assert_eq!(call.id, "call_1");
        assert_eq!(call.prospect_name, "Acme");
        assert_eq!(call.outcome, Outcome::Qualified);
        assert_eq!(call.company, "");
        assert_eq!(call.notes, "");
        assert_eq!(call.duration, 0);
        assert_eq!(call.date, "2024-03-15");
        assert!(call.tags.is_empty());
        assert!(call.status.is_none());
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let err = Call::from_draft(CallDraft::default(), "call_1".to_string(), today())
            .unwrap_err();
        match err {
            DomainError::MissingFields { fields } => {
                assert_eq!(fields, vec!["prospectName", "outcome"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_prospect_name_counts_as_missing() {
        let err = Call::from_draft(draft("   ", "qualified"), "call_1".to_string(), today())
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingFields { fields } if fields == ["prospectName"]));
    }

    #[test]
    fn test_unknown_outcome_is_validation_error() {
        let err = Call::from_draft(draft("Acme", "maybe"), "call_1".to_string(), today())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_range_checks_on_create() {
        let mut negative = draft("Acme", "follow-up");
        negative.duration = Some(-5);
        assert!(Call::from_draft(negative, "a".to_string(), today()).is_err());

        let mut ratio = draft("Acme", "follow-up");
        ratio.talk_time_ratio = Some(1.5);
        assert!(Call::from_draft(ratio, "b".to_string(), today()).is_err());

        let mut sentiment = draft("Acme", "follow-up");
        sentiment.sentiment_score = Some(f64::NAN);
        assert!(Call::from_draft(sentiment, "c".to_string(), today()).is_err());

        let mut ok = draft("Acme", "follow-up");
        ok.talk_time_ratio = Some(0.0);
        ok.sentiment_score = Some(1.0);
        ok.questions_asked = Some(12);
        let call = Call::from_draft(ok, "d".to_string(), today()).unwrap();
        assert_eq!(call.questions_asked, Some(12));
    }

    #[test]
    fn test_tags_keep_first_occurrence_order() {
        let tags = normalize_tags(
            ["enterprise", " pricing ", "", "enterprise", "demo"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(tags, vec!["enterprise", "pricing", "demo"]);
    }

    #[test]
    fn test_patch_merges_and_keeps_omitted_fields() {
        let mut call = stored_call();
        call.apply(&CallPatch {
            notes: Some("hi".to_string()),
            duration: Some(120),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(call.id, "x");
        assert_eq!(call.notes, "hi");
        assert_eq!(call.duration, 120);
        assert_eq!(call.prospect_name, "Bob");
        assert_eq!(call.outcome, Outcome::Qualified);
    }

    #[test]
    fn test_failed_patch_leaves_call_untouched() {
        let mut call = stored_call();
        let before = call.clone();

        let err = call
            .apply(&CallPatch {
                notes: Some("changed".to_string()),
                sentiment_score: Some(-0.1),
                ..Default::default()
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(call, before);
    }

    #[test]
    fn test_create_and_update_normalize_company_and_date() {
        let mut input = draft("Acme", "qualified");
        input.company = Some("  Globex  ".to_string());
        input.date = Some("   ".to_string());
        let mut call = Call::from_draft(input, "x".to_string(), today()).unwrap();
        assert_eq!(call.company, "Globex");
        assert_eq!(call.date, "2024-03-15");

        call.apply(&CallPatch {
            company: Some(" Initech ".to_string()),
            date: Some("".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(call.company, "Initech");
        assert_eq!(call.date, "2024-03-15");

        call.apply(&CallPatch {
            date: Some(" 2024-04-01 ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(call.date, "2024-04-01");
    }

    #[test]
    fn test_validate_rejects_out_of_range_records() {
        let mut call = stored_call();
        assert!(call.validate().is_ok());

        call.sentiment_score = Some(7.5);
        assert!(call.validate().unwrap_err().is_validation());

        let mut call = stored_call();
        call.talk_time_ratio = Some(-3.0);
        assert!(call.validate().is_err());

        let mut call = stored_call();
        call.prospect_name = "  ".to_string();
        assert!(call.validate().is_err());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = Call::generate_id();
        let b = Call::generate_id();
        assert!(a.starts_with("call_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_deserializes_sparse_seed_record() {
        let call: Call = serde_json::from_str(
            r#"{"id":"call_1","prospectName":"Bob","outcome":"closed-won"}"#,
        )
        .unwrap();
        assert_eq!(call.outcome, Outcome::ClosedWon);
        assert_eq!(call.company, "");
        assert!(call.tags.is_empty());

        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["prospectName"], "Bob");
        assert!(json.get("talkTimeRatio").is_none());
    }
}
