/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Canvas LMS
//!
//! This library was created for working with the Canvas LMS REST API (v1).
//!
//! For further details on the Rest API refer to the [Canvas API Docs](https://canvas.instructure.com/doc/api/)
//!
//! ## Features
//!
//! - Lazy pagination over collection endpoints ([`v1::PaginatedList`])
//!     - Random access, range slices and streaming
//!     - Follows `Link` headers as well as `meta.pagination` bodies
//! - Nested parameters flattened into Canvas' bracket notation ([`v1::combine_kwargs`])
//! - Accounts, Courses, Users, Sections and Enrollment Terms
//! - Lower level interface for handling the raw communication ([`v1::Requester`])
//!
//! *Authentication uses a bearer access token. Generating one (from the user's profile
//! settings or via OAuth2) is left up to the consumer of this library*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! canvas_lms = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use canvas_lms::v1::{Canvas, Course};
//! use futures::{pin_mut, StreamExt};
//! use serde_json::json;
//!
//!async fn for_each_course<Fut>(
//!    base_url: &str,
//!    access_token: &str,
//!    course_op: impl Fn(Course) -> Fut,
//!) -> anyhow::Result<()>
//!where
//!    Fut: Future<Output=anyhow::Result<bool>>,
//!{
//!    let canvas = Canvas::new(base_url, access_token)?;
//!
//!    // Nothing is requested until the stream is polled
//!    let mut courses = canvas.get_courses(json!({
//!        "enrollment_type": "teacher",
//!        "include": ["term", "total_students"],
//!    }))?;
//!
//!    let courses = courses.stream();
//!    pin_mut!(courses);
//!    while let Some(course) = courses.next().await {
//!        // Do operation on course and stop stream if returns false
//!        if !course_op(course?).await? {
//!            break;
//!        }
//!    }
//!    Ok(())
//!}
//! ```
//!
pub mod v1;
