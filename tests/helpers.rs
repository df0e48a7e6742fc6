/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use canvas_lms::v1::Canvas;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub(crate) const TOKEN: &str = "test-token-1234";

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Live instance configured through CANVAS_API_URL / CANVAS_API_KEY (or a .env file)
#[allow(dead_code)]
pub(crate) fn get_live_canvas() -> anyhow::Result<Canvas> {
    dotenvy::dotenv().ok();
    let api_url = std::env::var("CANVAS_API_URL")?;
    let api_key = std::env::var("CANVAS_API_KEY")?;
    Ok(Canvas::new(&api_url, &api_key)?)
}

#[allow(dead_code)]
pub(crate) fn canvas_for(server: &MockServer) -> Canvas {
    init_logging();
    Canvas::new(&server.uri(), TOKEN).unwrap()
}

#[allow(dead_code)]
pub(crate) fn users(ids: std::ops::RangeInclusive<u64>) -> Value {
    Value::Array(
        ids.map(|id| json!({"id": id, "name": format!("User {}", id)}))
            .collect(),
    )
}

// Mounts `pages` as a Link header paginated collection at /api/v1/{endpoint}.
// The first page has no `page` query parameter, later ones are `page=N`.
#[allow(dead_code)]
pub(crate) async fn mount_pages(server: &MockServer, endpoint: &str, pages: Vec<Value>) {
    let total = pages.len();
    for (i, body) in pages.into_iter().enumerate() {
        let page = i + 1;
        let page_url = |n: usize| format!("{}/api/v1/{}?page={}&per_page=2", server.uri(), endpoint, n);

        let mut links = vec![format!("<{}>; rel=\"current\"", page_url(page))];
        if page < total {
            links.push(format!("<{}>; rel=\"next\"", page_url(page + 1)));
        }
        links.push(format!("<{}>; rel=\"last\"", page_url(total)));

        let mock = Mock::given(method("GET")).and(path(format!("/api/v1/{}", endpoint)));
        let mock = if page == 1 {
            mock.and(query_param_is_missing("page"))
        } else {
            mock.and(query_param("page", page.to_string()))
        };
        mock.respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .insert_header("Link", links.join(", ")),
        )
        .mount(server)
        .await;
    }
}

#[allow(dead_code)]
pub(crate) async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}
