/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::CanvasError;
use crate::v1::macros::obj_from_request;
use crate::v1::requester::get_institution_url;
use crate::v1::{
    Account, Course, IdParam, PaginatedList, Requester, Section, User, UserIdType,
    combine_kwargs, obj_or_id,
};
use log::warn;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Value, json};

/// Entry point into the Canvas REST API.
///
/// ```rust,no_run
/// use canvas_lms::v1::Canvas;
/// use serde_json::json;
///
/// # async fn run() -> Result<(), canvas_lms::v1::CanvasError> {
/// let canvas = Canvas::new("https://canvas.example.edu", "access-token")?;
/// let course = canvas.get_course(1234, ()).await?;
/// let students = course
///     .get_users(json!({"enrollment_type": ["student"]}))?
///     .collect_all()
///     .await?;
/// println!("{} has {} students", course, students.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    requester: Requester,
}

impl Canvas {
    /// Creates a client for the institution at `base_url` (e.g. `https://canvas.example.edu`)
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, CanvasError> {
        Self::with_client(base_url, access_token, reqwest::Client::new())
    }

    /// Same as [`Canvas::new`] but sends through a preconfigured [`reqwest::Client`],
    /// e.g. one with timeouts or a proxy set.
    pub fn with_client(
        base_url: &str,
        access_token: &str,
        https_client: reqwest::Client,
    ) -> Result<Self, CanvasError> {
        let institution_url = clean_base_url(base_url);
        Ok(Self {
            requester: Requester::with_client(&institution_url, access_token, https_client)?,
        })
    }

    /// The requester shared by every object created through this client
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// Retrieves an account by id
    pub async fn get_account<A: IdParam<Account>, P: Serialize>(
        &self,
        account: A,
        params: P,
    ) -> Result<Account, CanvasError> {
        let account_id = obj_or_id(account, "account")?;
        self.get_object(&format!("accounts/{}", account_id), params)
            .await
    }

    /// Retrieves an account by its SIS id
    pub async fn get_account_by_sis_id<P: Serialize>(
        &self,
        sis_account_id: &str,
        params: P,
    ) -> Result<Account, CanvasError> {
        let endpoint = format!(
            "accounts/sis_account_id:{}",
            urlencoding::encode(sis_account_id)
        );
        self.get_object(&endpoint, params).await
    }

    /// Lists the accounts the current user can view or manage
    pub fn get_accounts<P: Serialize>(&self, params: P) -> Result<PaginatedList<Account>, CanvasError> {
        self.list("accounts", params)
    }

    /// Retrieves a course by id
    pub async fn get_course<C: IdParam<Course>, P: Serialize>(
        &self,
        course: C,
        params: P,
    ) -> Result<Course, CanvasError> {
        let course_id = obj_or_id(course, "course")?;
        self.get_object(&format!("courses/{}", course_id), params)
            .await
    }

    /// Retrieves a course by its SIS id
    pub async fn get_course_by_sis_id<P: Serialize>(
        &self,
        sis_course_id: &str,
        params: P,
    ) -> Result<Course, CanvasError> {
        let endpoint = format!(
            "courses/sis_course_id:{}",
            urlencoding::encode(sis_course_id)
        );
        self.get_object(&endpoint, params).await
    }

    /// Lists the active courses of the current user
    pub fn get_courses<P: Serialize>(&self, params: P) -> Result<PaginatedList<Course>, CanvasError> {
        self.list("courses", params)
    }

    /// Retrieves a user by id. `"self"` refers to the authenticated user.
    pub async fn get_user<U: IdParam<User>>(&self, user: U) -> Result<User, CanvasError> {
        let user_id = obj_or_id(user, "user")?;
        self.get_object(&format!("users/{}", user_id), ()).await
    }

    /// Retrieves a user by one of the alternate ids, e.g. [`UserIdType::SisLoginId`]
    pub async fn get_user_by_id_type(
        &self,
        user: &str,
        id_type: UserIdType,
    ) -> Result<User, CanvasError> {
        let id_type: &'static str = id_type.into();
        let endpoint = format!("users/{}:{}", id_type, urlencoding::encode(user));
        self.get_object(&endpoint, ()).await
    }

    /// Retrieves the authenticated user
    pub async fn get_current_user(&self) -> Result<User, CanvasError> {
        self.get_object("users/self", ()).await
    }

    /// Retrieves a section by id
    pub async fn get_section<S: IdParam<Section>, P: Serialize>(
        &self,
        section: S,
        params: P,
    ) -> Result<Section, CanvasError> {
        let section_id = obj_or_id(section, "section")?;
        self.get_object(&format!("sections/{}", section_id), params)
            .await
    }

    /// Retrieves a section by its SIS id
    pub async fn get_section_by_sis_id<P: Serialize>(
        &self,
        sis_section_id: &str,
        params: P,
    ) -> Result<Section, CanvasError> {
        let endpoint = format!(
            "sections/sis_section_id:{}",
            urlencoding::encode(sis_section_id)
        );
        self.get_object(&endpoint, params).await
    }

    /// Runs a GraphQL query and returns the raw response body
    pub async fn graphql(&self, query: &str, variables: Value) -> Result<Value, CanvasError> {
        let url = url::Url::parse(&format!(
            "{}/api/graphql",
            self.requester.original_url().as_str().trim_end_matches('/')
        ))?;
        let body = json!({"query": query, "variables": variables});
        self.requester
            .request_json(Method::POST, url, &body)
            .await?
            .json()
    }

    async fn get_object<T, P>(&self, endpoint: &str, params: P) -> Result<T, CanvasError>
    where
        T: crate::v1::CanvasObject,
        P: Serialize,
    {
        let params = combine_kwargs(params)?;
        obj_from_request!(&self.requester, Method::GET, endpoint, &params, T)
    }

    fn list<T, P>(&self, endpoint: &str, params: P) -> Result<PaginatedList<T>, CanvasError>
    where
        T: crate::v1::CanvasObject,
        P: Serialize,
    {
        Ok(PaginatedList::new(
            self.requester.clone(),
            Method::GET,
            endpoint,
            combine_kwargs(params)?,
        ))
    }
}

// Normalizes the institution url, warning about the usual mistakes
fn clean_base_url(base_url: &str) -> String {
    let mut new_url = get_institution_url(base_url);
    if let Some(stripped) = new_url.strip_suffix("/api/v1") {
        new_url = stripped.trim_end_matches('/').to_string();
    }

    if base_url.contains("api/v1") {
        warn!(
            "`base_url` no longer requires an API version be specified. Rewriting `base_url` to {}",
            new_url
        );
    }
    if base_url.contains("http://") {
        warn!(
            "Canvas may respond unexpectedly when making requests to HTTP URLs. If possible, please use HTTPS."
        );
    }
    if base_url.trim().is_empty() {
        warn!("Canvas needs a valid URL, please provide a non-blank `base_url`.");
    }
    if !base_url.contains("://") {
        warn!(
            "An invalid `base_url` for the Canvas API Instance was used. Please provide a valid HTTP or HTTPS URL if possible."
        );
    }
    new_url
}
