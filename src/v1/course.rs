/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::canvas_object::from_attributes;
use crate::v1::errors::CanvasError;
use crate::v1::macros::{impl_canvas_object, obj_from_request};
use crate::v1::parsers::{from_canvas_date, from_empty_str_to_none, from_workflow_state};
use crate::v1::{
    IdParam, PaginatedList, Requester, Section, User, WorkflowState, combine_kwargs, obj_or_id,
};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Holds information returned from the Courses API.
///
/// See [Canvas API Docs](https://canvas.instructure.com/doc/api/courses.html) for more
/// details on the individual fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Course {
    #[serde(skip)]
    pub(crate) requester: Option<Requester>,

    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub course_code: Option<String>,

    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(
        default,
        deserialize_with = "from_workflow_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub workflow_state: Option<WorkflowState>,

    #[serde(default)]
    pub account_id: Option<u64>,

    #[serde(default)]
    pub root_account_id: Option<u64>,

    #[serde(default)]
    pub enrollment_term_id: Option<u64>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub sis_course_id: Option<String>,

    #[serde(default)]
    pub time_zone: Option<String>,

    #[serde(default)]
    pub is_public: Option<bool>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub start_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub end_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub created_at: Option<DateTime<Utc>>,

    /// Any attributes not mapped above
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl_canvas_object!(Course, "Course");

impl Course {
    /// Lists the users in this course.
    ///
    /// Filters such as `enrollment_type` or `search_term` are passed through `params`.
    pub fn get_users<P: Serialize>(&self, params: P) -> Result<PaginatedList<User>, CanvasError> {
        Ok(PaginatedList::new(
            self.requester()?.clone(),
            Method::GET,
            &format!("courses/{}/search_users", self.id),
            combine_kwargs(params)?,
        ))
    }

    /// Lists the sections of this course
    pub fn get_sections<P: Serialize>(
        &self,
        params: P,
    ) -> Result<PaginatedList<Section>, CanvasError> {
        let mut extra = Map::new();
        extra.insert("course_id".to_string(), json!(self.id));
        Ok(PaginatedList::new(
            self.requester()?.clone(),
            Method::GET,
            &format!("courses/{}/sections", self.id),
            combine_kwargs(params)?,
        )
        .with_extra_attribs(extra))
    }

    /// Retrieves a single section of this course
    pub async fn get_section<S: IdParam<Section>, P: Serialize>(
        &self,
        section: S,
        params: P,
    ) -> Result<Section, CanvasError> {
        let section_id = obj_or_id(section, "section")?;
        let params = combine_kwargs(params)?;
        obj_from_request!(
            self.requester()?,
            Method::GET,
            &format!("courses/{}/sections/{}", self.id, section_id),
            &params,
            Section
        )
    }

    /// Updates this course in place.
    ///
    /// Attributes go under the `course` key, e.g. `json!({"course": {"name": "New"}})`.
    /// Returns the course name reported back by Canvas; when there is none the local
    /// copy is left as it was.
    pub async fn update<P: Serialize>(&mut self, params: P) -> Result<Option<String>, CanvasError> {
        let params = combine_kwargs(params)?;
        let requester = self.requester()?.clone();
        let resp = requester
            .request(Method::PUT, &format!("courses/{}", self.id), &params)
            .await?;
        let attributes: Value = resp.json()?;
        let name = attributes
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        if name.is_some() {
            *self = from_attributes(&requester, attributes)?;
        }
        Ok(name)
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.course_code.as_deref().unwrap_or_default(),
            self.name.as_deref().unwrap_or_default(),
            self.id
        )
    }
}
