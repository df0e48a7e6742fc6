/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate canvas_lms;

use anyhow::Result;
use canvas_lms::v1::{Canvas, Course, EnrollmentType};
use dotenvy::dotenv;
use futures::{StreamExt, pin_mut};
use serde_json::json;

async fn iterate_courses<Fut>(
    api_url: &str,
    access_token: &str,
    course_op: impl Fn(Course) -> Fut,
) -> Result<()>
where
    Fut: Future<Output = Result<bool>>,
{
    // The access token is generated from the Canvas user's profile settings
    let canvas = Canvas::new(api_url, access_token)?;

    let user = canvas.get_current_user().await?;
    println!("Courses taught by {}", user);

    // Pages are requested as the stream is polled
    let mut courses = canvas.get_courses(json!({
        "enrollment_type": EnrollmentType::Teacher,
        "include": ["term", "total_students"],
    }))?;

    let courses = courses.stream();
    pin_mut!(courses);
    while let Some(course) = courses.next().await {
        // Do operation on course and stop stream if returns false
        if !course_op(course?).await? {
            break;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let api_url = std::env::var("CANVAS_API_URL")?;
    let api_key = std::env::var("CANVAS_API_KEY")?;
    let limit: usize = std::env::var("COURSE_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(25);

    let seen = std::sync::atomic::AtomicUsize::new(0);
    let printer = async |course: Course| {
        let students = course
            .attributes
            .get("total_students")
            .and_then(|v| v.as_u64())
            .unwrap_or_default();
        println!("{} Students: {}", course, students);
        let count = seen.fetch_add(1, std::sync::atomic::Ordering::Relaxed) + 1;
        Ok(count < limit)
    };

    iterate_courses(&api_url, &api_key, printer).await?;
    Ok(())
}
