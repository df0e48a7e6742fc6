/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::CanvasError;
use crate::v1::macros::impl_canvas_object;
use crate::v1::parsers::{from_empty_str_to_none, from_workflow_state};
use crate::v1::{
    Course, EnrollmentTerm, PaginatedList, Requester, User, WorkflowState, combine_kwargs,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Holds information returned from the Accounts API.
///
/// See [Canvas API Docs](https://canvas.instructure.com/doc/api/accounts.html) for more
/// details on the individual fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Account {
    #[serde(skip)]
    pub(crate) requester: Option<Requester>,

    pub id: u64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(default)]
    pub parent_account_id: Option<u64>,

    #[serde(default)]
    pub root_account_id: Option<u64>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub sis_account_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "from_workflow_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub workflow_state: Option<WorkflowState>,

    #[serde(default)]
    pub default_time_zone: Option<String>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl_canvas_object!(Account, "Account");

impl Account {
    /// Lists the courses of this account
    pub fn get_courses<P: Serialize>(&self, params: P) -> Result<PaginatedList<Course>, CanvasError> {
        self.list(&format!("accounts/{}/courses", self.id), params)
    }

    /// Lists the users associated with this account
    pub fn get_users<P: Serialize>(&self, params: P) -> Result<PaginatedList<User>, CanvasError> {
        self.list(&format!("accounts/{}/users", self.id), params)
    }

    /// Lists the accounts below this one. Pass `json!({"recursive": true})` for the whole tree.
    pub fn get_subaccounts<P: Serialize>(
        &self,
        params: P,
    ) -> Result<PaginatedList<Account>, CanvasError> {
        self.list(&format!("accounts/{}/sub_accounts", self.id), params)
    }

    /// Lists the enrollment terms of this account
    pub fn get_enrollment_terms<P: Serialize>(
        &self,
        params: P,
    ) -> Result<PaginatedList<EnrollmentTerm>, CanvasError> {
        let mut extra = Map::new();
        extra.insert("account_id".to_string(), json!(self.id));
        Ok(self
            .list(&format!("accounts/{}/terms", self.id), params)?
            .with_root("enrollment_terms")
            .with_extra_attribs(extra))
    }

    fn list<T, P>(&self, endpoint: &str, params: P) -> Result<PaginatedList<T>, CanvasError>
    where
        T: crate::v1::CanvasObject,
        P: Serialize,
    {
        Ok(PaginatedList::new(
            self.requester()?.clone(),
            Method::GET,
            endpoint,
            combine_kwargs(params)?,
        ))
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name.as_deref().unwrap_or_default(), self.id)
    }
}
