/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::macros::impl_canvas_object;
use crate::v1::parsers::{from_canvas_date, from_workflow_state};
use crate::v1::{Requester, WorkflowState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Holds information returned from the Enrollment Terms API.
///
/// See [Canvas API Docs](https://canvas.instructure.com/doc/api/enrollment_terms.html)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EnrollmentTerm {
    #[serde(skip)]
    pub(crate) requester: Option<Requester>,

    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub account_id: Option<u64>,

    #[serde(default)]
    pub sis_term_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "from_workflow_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub workflow_state: Option<WorkflowState>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub start_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub end_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl_canvas_object!(EnrollmentTerm, "EnrollmentTerm");
