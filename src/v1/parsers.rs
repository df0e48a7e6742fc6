/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::WorkflowState;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

// Parses workflow states, unrecognized values become Unknown
pub fn from_workflow_state<'de, D>(deserializer: D) -> Result<Option<WorkflowState>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.map(|s| WorkflowState::from_str(&s).unwrap_or(WorkflowState::Unknown)))
}

// Parses strings that may be "" or null and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

// Parses ISO 8601 timestamps. Canvas sends null, "" or the occasional
// malformed value for unset dates, all of which become None.
pub fn from_canvas_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Dated {
        #[serde(default, deserialize_with = "from_canvas_date")]
        start_at: Option<DateTime<Utc>>,

        #[serde(default, deserialize_with = "from_empty_str_to_none")]
        sis_id: Option<String>,

        #[serde(default, deserialize_with = "from_workflow_state")]
        workflow_state: Option<WorkflowState>,
    }

    #[test]
    fn dates() {
        let d: Dated = serde_json::from_value(json!({"start_at": "2012-05-05T00:00:00Z"})).unwrap();
        assert_eq!(
            d.start_at.unwrap().to_rfc3339(),
            "2012-05-05T00:00:00+00:00"
        );

        let d: Dated = serde_json::from_value(json!({"start_at": "2012-05-05T02:00:00-02:00"})).unwrap();
        assert_eq!(d.start_at.unwrap().to_rfc3339(), "2012-05-05T04:00:00+00:00");

        for v in [json!(null), json!(""), json!("not a date")] {
            let d: Dated = serde_json::from_value(json!({ "start_at": v })).unwrap();
            assert!(d.start_at.is_none());
        }

        let d: Dated = serde_json::from_value(json!({})).unwrap();
        assert!(d.start_at.is_none());
    }

    #[test]
    fn empty_strings_and_states() {
        let d: Dated = serde_json::from_value(json!({
            "sis_id": "",
            "workflow_state": "available"
        }))
        .unwrap();
        assert!(d.sis_id.is_none());
        assert_eq!(d.workflow_state, Some(WorkflowState::Available));

        let d: Dated = serde_json::from_value(json!({"sis_id": "A1", "workflow_state": "odd"})).unwrap();
        assert_eq!(d.sis_id.as_deref(), Some("A1"));
        assert_eq!(d.workflow_state, Some(WorkflowState::Unknown));
    }
}
