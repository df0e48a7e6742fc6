/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Lazy access to paginated collection endpoints.
//!
//! See [Canvas pagination](https://canvas.instructure.com/doc/api/file.pagination.html).
use crate::v1::canvas_object::{CanvasObject, from_attributes};
use crate::v1::errors::CanvasError;
use crate::v1::requester::Requester;
use async_stream::try_stream;
use futures::{Stream, TryStreamExt};
use log::debug;
use reqwest::Method;
use serde_json::{Map, Value};
use std::ops::{Bound, RangeBounds};
use url::Url;

/// Page size requested unless the caller sets `per_page`
pub const DEFAULT_PER_PAGE: usize = 100;

// Where the next page lives
#[derive(Debug, Clone)]
enum Cursor {
    Endpoint(String),
    Url(Url),
}

/// A collection endpoint whose pages are fetched only when elements are needed.
///
/// Elements are buffered as they arrive. The buffer only ever grows, so indexing,
/// slicing and streaming all share the pages fetched so far. Once the last page has
/// been read the list is exhausted for good.
///
/// ```rust,no_run
/// use canvas_lms::v1::Canvas;
/// use futures::{StreamExt, pin_mut};
///
/// # async fn run() -> Result<(), canvas_lms::v1::CanvasError> {
/// let canvas = Canvas::new("https://canvas.example.edu", "token")?;
/// let mut courses = canvas.get_courses(())?;
///
/// // Only the first page is requested
/// if let Some(course) = courses.get(0).await? {
///     println!("first: {}", course.name.as_deref().unwrap_or_default());
/// }
///
/// let all = courses.stream();
/// pin_mut!(all);
/// while let Some(course) = all.next().await {
///     println!("{}", course?.id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedList<T> {
    requester: Requester,
    method: Method,
    next: Option<Cursor>,
    next_params: Vec<(String, String)>,
    extra_attribs: Map<String, Value>,
    root: Option<String>,
    elements: Vec<T>,
}

impl<T: CanvasObject> PaginatedList<T> {
    /// Creates the list. Nothing is requested until elements are accessed.
    ///
    /// `params` are only sent with the first page; later pages follow the links
    /// returned by Canvas which already carry them.
    pub fn new(
        requester: Requester,
        method: Method,
        endpoint: &str,
        mut params: Vec<(String, String)>,
    ) -> Self {
        if !params.iter().any(|(k, _)| k == "per_page") {
            params.push(("per_page".to_string(), DEFAULT_PER_PAGE.to_string()));
        }
        Self {
            requester,
            method,
            next: Some(Cursor::Endpoint(endpoint.to_string())),
            next_params: params,
            extra_attribs: Map::new(),
            root: None,
            elements: Vec::new(),
        }
    }

    /// Reads the elements from this member of the response body instead of the body itself
    pub fn with_root(mut self, root: &str) -> Self {
        self.root = Some(root.to_string());
        self
    }

    /// Attributes merged into every element before it is built, e.g. the parent's id
    pub fn with_extra_attribs(mut self, extra_attribs: Map<String, Value>) -> Self {
        self.extra_attribs = extra_attribs;
        self
    }

    /// Requests the first page from a full url rather than an API endpoint
    pub fn with_url_override(mut self, url: Url) -> Self {
        if self.elements.is_empty() {
            self.next = Some(Cursor::Url(url));
        }
        self
    }

    /// Whether another page can be requested
    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    /// Elements fetched so far
    pub fn buffered(&self) -> &[T] {
        &self.elements
    }

    /// Returns the element at `index`, fetching pages until it is buffered.
    ///
    /// `Ok(None)` means the collection has fewer elements.
    pub async fn get(&mut self, index: usize) -> Result<Option<&T>, CanvasError> {
        while self.elements.len() <= index && self.has_next_page() {
            self.fetch_next_page().await?;
        }
        Ok(self.elements.get(index))
    }

    /// Streams every element, starting with those already buffered
    pub fn stream(&mut self) -> impl Stream<Item = Result<T, CanvasError>> + '_ {
        self.slice(..)
    }

    /// Streams the elements within `range`, fetching pages only as far as needed.
    ///
    /// A range running past the end of the collection stops at the last element.
    pub fn slice<R: RangeBounds<usize>>(
        &mut self,
        range: R,
    ) -> impl Stream<Item = Result<T, CanvasError>> + '_ {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => Some(e.saturating_add(1)),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => None,
        };

        try_stream! {
            let mut index = start;
            while end.is_none_or(|end| index < end) {
                if index < self.elements.len() {
                    yield self.elements[index].clone();
                    index += 1;
                } else if self.has_next_page() {
                    self.fetch_next_page().await?;
                } else {
                    break;
                }
            }
        }
    }

    /// Collects the elements within `range`
    pub async fn collect_slice<R: RangeBounds<usize>>(
        &mut self,
        range: R,
    ) -> Result<Vec<T>, CanvasError> {
        self.slice(range).try_collect().await
    }

    /// Fetches every remaining page and returns all elements
    pub async fn collect_all(&mut self) -> Result<Vec<T>, CanvasError> {
        while self.has_next_page() {
            self.fetch_next_page().await?;
        }
        Ok(self.elements.clone())
    }

    /// Requests the next page and appends its elements. Returns how many were added.
    ///
    /// State is only updated once the whole page has been read, so a failed request
    /// can be retried by calling this again.
    pub async fn fetch_next_page(&mut self) -> Result<usize, CanvasError> {
        let url = match &self.next {
            None => return Ok(0),
            Some(Cursor::Endpoint(endpoint)) => self.requester.endpoint_url(endpoint)?,
            Some(Cursor::Url(url)) => url.clone(),
        };

        let resp = self
            .requester
            .request_url(self.method.clone(), url, &self.next_params)
            .await?;
        let body: Value = resp.json()?;

        // The Link header is the normal convention, a few endpoints use `meta` instead
        let next_link = if resp.has_links() {
            resp.next_link()
        } else {
            body.pointer("/meta/pagination/next")
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let next = next_link
            .map(|link| self.requester.base_url().join(&link))
            .transpose()?;

        let page = self
            .page_items(body)?
            .into_iter()
            .map(|element| self.init_element(element))
            .collect::<Result<Vec<T>, CanvasError>>()?;

        let count = page.len();
        self.elements.extend(page);
        self.next = next.map(Cursor::Url);
        self.next_params.clear();

        debug!(
            "Fetched {} {} elements ({} buffered), next page: {:?}",
            count,
            T::TYPE_NAME,
            self.elements.len(),
            self.next
        );
        Ok(count)
    }

    fn page_items(&self, body: Value) -> Result<Vec<Value>, CanvasError> {
        let data = match &self.root {
            None => body,
            Some(root) => match body {
                Value::Object(mut obj) => obj
                    .remove(root)
                    .ok_or_else(|| CanvasError::RootKeyMissing(root.clone()))?,
                _ => return Err(CanvasError::RootKeyMissing(root.clone())),
            },
        };
        match data {
            Value::Array(items) => Ok(items),
            other => Err(CanvasError::ApiResponseMalformed(format!(
                "expected a list of {} objects, got: {}",
                T::TYPE_NAME,
                other
            ))),
        }
    }

    fn init_element(&self, element: Value) -> Result<T, CanvasError> {
        let mut attributes = match element {
            Value::Object(obj) => obj,
            other => {
                return Err(CanvasError::ApiResponseMalformed(format!(
                    "expected a {} object, got: {}",
                    T::TYPE_NAME,
                    other
                )));
            }
        };
        for (k, v) in &self.extra_attribs {
            attributes.insert(k.clone(), v.clone());
        }
        from_attributes(&self.requester, Value::Object(attributes))
    }
}

impl<T: CanvasObject> std::fmt::Display for PaginatedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<PaginatedList of type {}>", T::TYPE_NAME)
    }
}

impl<T: CanvasObject> std::fmt::Debug for PaginatedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedList")
            .field("type", &T::TYPE_NAME)
            .field("method", &self.method)
            .field("next", &self.next)
            .field("root", &self.root)
            .field("buffered", &self.elements.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::User;

    fn list() -> PaginatedList<User> {
        let requester = Requester::new("https://canvas.test", "token").unwrap();
        PaginatedList::new(requester, Method::GET, "users", Vec::new())
    }

    #[test]
    fn display_names_type() {
        assert_eq!(list().to_string(), "<PaginatedList of type User>");
    }

    #[test]
    fn per_page_defaults_to_100() {
        let l = list();
        assert_eq!(
            l.next_params,
            vec![("per_page".to_string(), "100".to_string())]
        );

        let requester = Requester::new("https://canvas.test", "token").unwrap();
        let l: PaginatedList<User> = PaginatedList::new(
            requester,
            Method::GET,
            "users",
            vec![("per_page".to_string(), "10".to_string())],
        );
        assert_eq!(l.next_params, vec![("per_page".to_string(), "10".to_string())]);
    }

    #[test]
    fn root_key_and_extra_attribs() {
        let mut extra = Map::new();
        extra.insert("account_id".to_string(), Value::from(3));
        let l = list().with_root("users").with_extra_attribs(extra);

        let items = l
            .page_items(serde_json::json!({"users": [{"id": 1, "name": "A"}]}))
            .unwrap();
        assert_eq!(items.len(), 1);
        let user = l.init_element(items[0].clone()).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.attributes.get("account_id"), Some(&Value::from(3)));

        // extra attributes replace values sent by Canvas
        let user = l
            .init_element(serde_json::json!({"id": 2, "account_id": 99}))
            .unwrap();
        assert_eq!(user.attributes.get("account_id"), Some(&Value::from(3)));

        assert!(matches!(
            l.page_items(serde_json::json!({"wrong": []})),
            Err(CanvasError::RootKeyMissing(k)) if k == "users"
        ));
        assert!(matches!(
            l.init_element(Value::from(5)),
            Err(CanvasError::ApiResponseMalformed(_))
        ));
    }
}
