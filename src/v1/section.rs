/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::macros::impl_canvas_object;
use crate::v1::parsers::{from_canvas_date, from_empty_str_to_none};
use crate::v1::Requester;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Holds information returned from the Sections API.
///
/// See [Canvas API Docs](https://canvas.instructure.com/doc/api/sections.html) for more
/// details on the individual fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Section {
    #[serde(skip)]
    pub(crate) requester: Option<Requester>,

    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub course_id: Option<u64>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub sis_section_id: Option<String>,

    #[serde(default)]
    pub nonxlist_course_id: Option<u64>,

    #[serde(default)]
    pub total_students: Option<u64>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub start_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub end_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl_canvas_object!(Section, "Section");
