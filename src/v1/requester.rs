/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::CanvasError;
use bytes::Bytes;
use log::{debug, info};
use num_enum::TryFromPrimitive;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, LINK, WWW_AUTHENTICATE,
};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::{Url, form_urlencoded};

// Path appended to the institution url for every REST call
pub const API_PATH: &str = "/api/v1/";

/// Flattened request parameters as produced by [`crate::v1::combine_kwargs`]
pub type ApiParams = [(String, String)];

/// Directly communicates with the API.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct Requester {
    original_url: Url,
    base_url: Url,
    access_token: String,
    https_client: reqwest::Client,
}

impl Requester {
    /// Creates a requester for the given institution url and access token
    pub fn new(institution_url: &str, access_token: &str) -> Result<Self, CanvasError> {
        Self::with_client(institution_url, access_token, reqwest::Client::new())
    }

    /// Creates a requester that sends through an already configured [`reqwest::Client`]
    pub fn with_client(
        institution_url: &str,
        access_token: &str,
        https_client: reqwest::Client,
    ) -> Result<Self, CanvasError> {
        let original_url = Url::parse(institution_url.trim_end_matches('/'))?;
        let base_url = Url::parse(&format!(
            "{}{}",
            original_url.as_str().trim_end_matches('/'),
            API_PATH
        ))?;
        Ok(Self {
            original_url,
            base_url,
            access_token: access_token.into(),
            https_client,
        })
    }

    /// Institution url without the API path
    pub fn original_url(&self) -> &Url {
        &self.original_url
    }

    /// Root of the REST API (ends with `/api/v1/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the full url for an endpoint relative to [`Self::base_url`]
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, CanvasError> {
        Ok(Url::parse(&format!(
            "{}{}",
            self.base_url.as_str(),
            endpoint.trim_start_matches('/')
        ))?)
    }

    /// Performs a request against an endpoint of the REST API
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &ApiParams,
    ) -> Result<ApiResponse, CanvasError> {
        let req_url = self.endpoint_url(endpoint)?;
        self.request_url(method, req_url, params).await
    }

    /// Performs a request against a full url.
    ///
    /// GET sends the parameters as the query string, every other method as a form body.
    pub async fn request_url(
        &self,
        method: Method,
        url: Url,
        params: &ApiParams,
    ) -> Result<ApiResponse, CanvasError> {
        let mut url = url;
        let builder = if method == Method::GET {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params);
            }
            self.https_client.request(method.clone(), url.clone())
        } else {
            let form = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            self.https_client
                .request(method.clone(), url.clone())
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(form)
        };
        if !params.is_empty() {
            debug!("Data: {:?}", params);
        }
        self.execute(&method, &url, builder).await
    }

    /// Performs a request with a JSON body
    pub async fn request_json(
        &self,
        method: Method,
        url: Url,
        body: &Value,
    ) -> Result<ApiResponse, CanvasError> {
        let builder = self.https_client.request(method.clone(), url.clone()).json(body);
        debug!("Data: {}", body);
        self.execute(&method, &url, builder).await
    }

    /// Performs the request and decodes the JSON response into `T`
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &ApiParams,
    ) -> Result<T, CanvasError> {
        self.request(Method::GET, endpoint, params).await?.json()
    }

    async fn execute(
        &self,
        method: &Method,
        url: &Url,
        builder: RequestBuilder,
    ) -> Result<ApiResponse, CanvasError> {
        let request = builder
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .build()?;

        info!("Request: {} {}", method, url);
        debug!("Headers: {:?}", clean_headers(request.headers()));

        let resp = self.https_client.execute(request).await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        info!("Response: {} {} {}", method, url, status);
        debug!("Headers: {:?}", clean_headers(&headers));
        if body.is_empty() {
            debug!("No data");
        } else {
            debug!("Data: {}", String::from_utf8_lossy(&body));
        }

        ApiResponse {
            status,
            headers,
            body,
        }
        .error_for_status()
    }
}

impl std::fmt::Debug for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requester")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"xxx")
            .finish()
    }
}

/// Error statuses that map onto a dedicated [`CanvasError`]
#[derive(Debug, TryFromPrimitive)]
#[repr(u16)]
pub enum ApiErrorCodes {
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    Conflict = 409,
    UnprocessableEntity = 422,
}

/// A completed response from the API
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiResponse {
    /// Decodes the body into `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CanvasError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| CanvasError::ApiResponseMalformed(e.to_string()))
    }

    /// Body as (lossy) text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// True when a `Link` header carries at least one `<url>; rel=...` entry
    pub fn has_links(&self) -> bool {
        self.headers
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| !link_entries(v).is_empty())
    }

    /// Url of the `Link` header entry with the given rel
    pub fn link(&self, rel: &str) -> Option<String> {
        self.headers
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|v| parse_link_header(v, rel))
    }

    /// Url of the next page as advertised in the `Link` header
    pub fn next_link(&self) -> Option<String> {
        self.link("next")
    }

    // Message used for errors. Prefers the `errors` member of a JSON body.
    fn error_message(&self) -> String {
        match serde_json::from_slice::<Value>(&self.body) {
            Ok(Value::Object(obj)) => match obj.get("errors") {
                Some(Value::String(s)) => s.clone(),
                Some(errors) if !errors.is_null() => errors.to_string(),
                _ => format!("Something went wrong. {}", Value::Object(obj)),
            },
            _ => self.text(),
        }
    }

    fn error_for_status(self) -> Result<Self, CanvasError> {
        use ApiErrorCodes as E;
        if self.status < 400 {
            return Ok(self);
        }
        let err = match ApiErrorCodes::try_from(self.status) {
            Ok(E::BadRequest) => CanvasError::BadRequest(self.text()),
            Ok(E::Unauthorized) if self.headers.contains_key(WWW_AUTHENTICATE) => {
                CanvasError::InvalidAccessToken(self.error_message())
            }
            Ok(E::Unauthorized) => CanvasError::Unauthorized(self.error_message()),
            Ok(E::Forbidden) if self.text().contains("Rate Limit Exceeded") => {
                let remaining = self
                    .headers
                    .get("X-Rate-Limit-Remaining")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("Unknown");
                CanvasError::RateLimitExceeded(remaining.to_string())
            }
            Ok(E::Forbidden) => CanvasError::Forbidden(self.text()),
            Ok(E::NotFound) => CanvasError::ResourceDoesNotExist(),
            Ok(E::Conflict) => CanvasError::Conflict(self.text()),
            Ok(E::UnprocessableEntity) => CanvasError::UnprocessableEntity(self.text()),
            Err(_) => CanvasError::Status(self.status, self.error_message()),
        };
        Err(err)
    }
}

/// Parse a Link header and extract the URL for the given rel
///
/// Format: `<https://x/api/v1/courses?page=2>; rel="next", <...>; rel="last"`
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    link_entries(header)
        .into_iter()
        .find(|(_, rel)| rel.split_whitespace().any(|r| r == target_rel))
        .map(|(url, _)| url.to_string())
}

// Splits a Link header into (url, rel) pairs. Commas inside `<...>` belong to the url,
// entries without a rel are skipped.
fn link_entries(header: &str) -> Vec<(&str, &str)> {
    let mut entries = Vec::new();
    let mut rest = header;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            break;
        };
        let url = &after[..close];
        let (params, next) = match after[close + 1..].split_once(',') {
            Some((params, next)) => (params, next),
            None => (&after[close + 1..], ""),
        };

        let rel = params
            .split(';')
            .map(str::trim)
            .find_map(|segment| segment.strip_prefix("rel="))
            .map(|r| r.trim_matches('"').trim_matches('\''));
        if let Some(rel) = rel {
            entries.push((url, rel));
        }
        rest = next;
    }
    entries
}

/// Copy of the headers with the bearer token masked, for logging
pub fn clean_headers(headers: &HeaderMap) -> HeaderMap {
    let mut cleaned = headers.clone();
    if let Some(auth) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let tail: String = {
            let chars: Vec<char> = auth.chars().collect();
            chars[chars.len().saturating_sub(4)..].iter().collect()
        };
        if let Ok(masked) = HeaderValue::from_str(&format!("****{}", tail)) {
            cleaned.insert(AUTHORIZATION, masked);
        }
    }
    cleaned
}

/// Trims whitespace and trailing slashes from an institution url
pub fn get_institution_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
