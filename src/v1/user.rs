/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::CanvasError;
use crate::v1::macros::{impl_canvas_object, obj_from_request};
use crate::v1::parsers::{from_canvas_date, from_empty_str_to_none};
use crate::v1::{Course, PaginatedList, Requester, combine_kwargs};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Holds information returned from the Users API.
///
/// See [Canvas API Docs](https://canvas.instructure.com/doc/api/users.html) for more
/// details on the individual fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    #[serde(skip)]
    pub(crate) requester: Option<Requester>,

    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub sortable_name: Option<String>,

    #[serde(default)]
    pub short_name: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub sis_user_id: Option<String>,

    #[serde(default)]
    pub login_id: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "from_canvas_date")]
    pub last_login: Option<DateTime<Utc>>,

    /// Any attributes not mapped above
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl_canvas_object!(User, "User", true);

impl User {
    /// Lists the courses this user is enrolled in
    pub fn get_courses<P: Serialize>(&self, params: P) -> Result<PaginatedList<Course>, CanvasError> {
        Ok(PaginatedList::new(
            self.requester()?.clone(),
            Method::GET,
            &format!("users/{}/courses", self.id),
            combine_kwargs(params)?,
        ))
    }

    /// Modifies this user and refreshes it from the response
    ///
    /// Attributes go under the `user` key, e.g. `json!({"user": {"name": "New"}})`.
    pub async fn edit<P: Serialize>(&mut self, params: P) -> Result<&User, CanvasError> {
        let params = combine_kwargs(params)?;
        let updated = obj_from_request!(
            self.requester()?,
            Method::PUT,
            &format!("users/{}", self.id),
            &params,
            User
        )?;
        *self = updated;
        Ok(self)
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name.as_deref().unwrap_or_default(), self.id)
    }
}
