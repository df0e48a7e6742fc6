/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{self, canvas_for, mount_pages, request_count, users};
    use canvas_lms::v1::{CanvasError, EnrollmentTerm, PaginatedList, User};
    use futures::{StreamExt, TryStreamExt, pin_mut};
    use reqwest::Method;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn users_list(server: &MockServer, endpoint: &str) -> PaginatedList<User> {
        let canvas = canvas_for(server);
        PaginatedList::new(
            canvas.requester().clone(),
            Method::GET,
            endpoint,
            vec![("per_page".to_string(), "2".to_string())],
        )
    }

    fn ids(items: &[User]) -> Vec<u64> {
        items.iter().map(|u| u.id).collect()
    }

    #[tokio::test]
    async fn empty_list() {
        let server = MockServer::start().await;
        mount_pages(&server, "empty_list", vec![json!([])]).await;

        let mut list = users_list(&server, "empty_list").await;
        assert!(list.collect_all().await.unwrap().is_empty());
        assert!(!list.has_next_page());
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn single_item() {
        let server = MockServer::start().await;
        mount_pages(&server, "single_item", vec![users(1..=1)]).await;

        let mut list = users_list(&server, "single_item").await;
        let items = list.collect_all().await.unwrap();
        assert_eq!(ids(&items), vec![1]);
        assert_eq!(items[0].name.as_deref(), Some("User 1"));
    }

    #[tokio::test]
    async fn four_objects_two_pages() {
        let server = MockServer::start().await;
        mount_pages(&server, "four", vec![users(1..=2), users(3..=4)]).await;

        let mut list = users_list(&server, "four").await;
        let items = list.collect_all().await.unwrap();
        assert_eq!(ids(&items), vec![1, 2, 3, 4]);
        assert_eq!(request_count(&server).await, 2);
    }

    #[tokio::test]
    async fn first_page_sends_fixed_params_only_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/1/search_users"))
            .and(query_param("per_page", "100"))
            .and(query_param("enrollment_type[]", "student"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(1..=1)).insert_header(
                "Link",
                format!(
                    "<{}/api/v1/courses/1/search_users?page=2&per_page=100>; rel=\"next\"",
                    server.uri()
                ),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/1/search_users"))
            .and(query_param("page", "2"))
            .and(query_param_is_missing("enrollment_type[]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(2..=2)))
            .expect(1)
            .mount(&server)
            .await;

        let canvas = canvas_for(&server);
        let course: canvas_lms::v1::Course = canvas_lms::v1::from_attributes(
            canvas.requester(),
            json!({"id": 1, "name": "Biology"}),
        )
        .unwrap();
        let mut list = course
            .get_users(json!({"enrollment_type": ["student"]}))
            .unwrap();
        assert_eq!(ids(&list.collect_all().await.unwrap()), vec![1, 2]);
    }

    #[tokio::test]
    async fn stream_reuse_does_not_refetch() {
        let server = MockServer::start().await;
        mount_pages(&server, "six", vec![users(1..=2), users(3..=4), users(5..=6)]).await;

        let mut list = users_list(&server, "six").await;
        let first: Vec<User> = list.stream().try_collect().await.unwrap();
        let second: Vec<User> = list.stream().try_collect().await.unwrap();
        assert_eq!(ids(&first), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(first, second);
        assert_eq!(request_count(&server).await, 3);
    }

    #[tokio::test]
    async fn stream_is_lazy() {
        let server = MockServer::start().await;
        mount_pages(&server, "six", vec![users(1..=2), users(3..=4), users(5..=6)]).await;

        let mut list = users_list(&server, "six").await;
        {
            let stream = list.stream();
            pin_mut!(stream);
            for expected in 1..=3 {
                assert_eq!(stream.next().await.unwrap().unwrap().id, expected);
            }
        }
        assert_eq!(request_count(&server).await, 2);
        assert_eq!(list.buffered().len(), 4);
        assert!(list.has_next_page());
    }

    #[tokio::test]
    async fn get_first_fetches_one_page() {
        let server = MockServer::start().await;
        mount_pages(&server, "six", vec![users(1..=2), users(3..=4), users(5..=6)]).await;

        let mut list = users_list(&server, "six").await;
        assert_eq!(list.get(0).await.unwrap().map(|u| u.id), Some(1));
        assert_eq!(request_count(&server).await, 1);

        // already buffered
        assert_eq!(list.get(1).await.unwrap().map(|u| u.id), Some(2));
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn get_from_second_page() {
        let server = MockServer::start().await;
        mount_pages(&server, "six", vec![users(1..=2), users(3..=4), users(5..=6)]).await;

        let mut list = users_list(&server, "six").await;
        assert_eq!(list.get(2).await.unwrap().map(|u| u.id), Some(3));
        assert_eq!(request_count(&server).await, 2);
    }

    #[tokio::test]
    async fn get_past_the_end() {
        let server = MockServer::start().await;
        mount_pages(&server, "four", vec![users(1..=2), users(3..=4)]).await;

        let mut list = users_list(&server, "four").await;
        assert!(list.get(4).await.unwrap().is_none());
        assert!(!list.has_next_page());

        // exhausted lists never go back to the server
        assert!(list.get(10).await.unwrap().is_none());
        assert_eq!(request_count(&server).await, 2);
    }

    #[tokio::test]
    async fn slices() {
        let server = MockServer::start().await;
        mount_pages(&server, "six", vec![users(1..=2), users(3..=4), users(5..=6)]).await;

        let mut list = users_list(&server, "six").await;
        assert_eq!(ids(&list.collect_slice(..2).await.unwrap()), vec![1, 2]);
        assert_eq!(request_count(&server).await, 1);

        assert_eq!(ids(&list.collect_slice(2..4).await.unwrap()), vec![3, 4]);
        assert_eq!(ids(&list.collect_slice(4..6).await.unwrap()), vec![5, 6]);
        assert_eq!(ids(&list.collect_slice(1..=2).await.unwrap()), vec![2, 3]);
    }

    #[tokio::test]
    async fn slice_oversize_and_out_of_bounds() {
        let server = MockServer::start().await;
        mount_pages(&server, "four", vec![users(1..=2), users(3..=4)]).await;

        let mut list = users_list(&server, "four").await;
        assert_eq!(ids(&list.collect_slice(0..10).await.unwrap()), vec![1, 2, 3, 4]);
        assert!(list.collect_slice(4..5).await.unwrap().is_empty());
        assert!(list.collect_slice(3..3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn root_element() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/accounts/1/terms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "enrollment_terms": [
                    {"id": 1, "name": "Fall", "start_at": "2024-08-20T00:00:00Z"},
                    {"id": 2, "name": "Spring", "start_at": null}
                ]
            })))
            .mount(&server)
            .await;

        let canvas = canvas_for(&server);
        let mut terms: PaginatedList<EnrollmentTerm> = PaginatedList::new(
            canvas.requester().clone(),
            Method::GET,
            "accounts/1/terms",
            Vec::new(),
        )
        .with_root("enrollment_terms");
        let first = terms.get(0).await.unwrap().unwrap();
        assert_eq!(first.name.as_deref(), Some("Fall"));
        assert!(first.start_at.is_some());
        assert_eq!(terms.collect_all().await.unwrap().len(), 2);

        let mut wrong: PaginatedList<EnrollmentTerm> = PaginatedList::new(
            canvas.requester().clone(),
            Method::GET,
            "accounts/1/terms",
            Vec::new(),
        )
        .with_root("wrong");
        assert!(matches!(
            wrong.get(0).await,
            Err(CanvasError::RootKeyMissing(k)) if k == "wrong"
        ));
        // a failed page leaves the list where it was
        assert!(wrong.has_next_page());
        assert!(wrong.buffered().is_empty());
    }

    #[tokio::test]
    async fn meta_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/quizzes/1/submissions"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quiz_submissions": [{"id": 1}, {"id": 2}],
                "meta": {"pagination": {
                    "next": format!("{}/api/v1/quizzes/1/submissions?page=2", server.uri())
                }}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/quizzes/1/submissions"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quiz_submissions": [{"id": 3}],
                "meta": {"pagination": {"next": null}}
            })))
            .mount(&server)
            .await;

        let canvas = canvas_for(&server);
        let mut list: PaginatedList<User> = PaginatedList::new(
            canvas.requester().clone(),
            Method::GET,
            "quizzes/1/submissions",
            Vec::new(),
        )
        .with_root("quiz_submissions");
        assert_eq!(ids(&list.collect_all().await.unwrap()), vec![1, 2, 3]);
        assert_eq!(request_count(&server).await, 2);
    }

    #[tokio::test]
    async fn next_link_with_comma_in_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/commas"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(1..=1)).insert_header(
                "Link",
                format!(
                    "<{0}/api/v1/commas?page=2&include=a,b>; rel=\"next\", <{0}/api/v1/commas?page=2&include=a,b>; rel=\"last\"",
                    server.uri()
                ),
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/commas"))
            .and(query_param("page", "2"))
            .and(query_param("include", "a,b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(2..=2)))
            .expect(1)
            .mount(&server)
            .await;

        let mut list = users_list(&server, "commas").await;
        assert_eq!(ids(&list.collect_all().await.unwrap()), vec![1, 2]);
    }

    #[tokio::test]
    async fn unparseable_link_header_falls_back_to_meta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/quizzes/2/submissions"))
            .and(query_param_is_missing("page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", "garbage")
                    .set_body_json(json!({
                        "quiz_submissions": [{"id": 1}],
                        "meta": {"pagination": {
                            "next": format!("{}/api/v1/quizzes/2/submissions?page=2", server.uri())
                        }}
                    })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/quizzes/2/submissions"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "quiz_submissions": [{"id": 2}],
                "meta": {"pagination": {"next": null}}
            })))
            .mount(&server)
            .await;

        let canvas = canvas_for(&server);
        let mut list: PaginatedList<User> = PaginatedList::new(
            canvas.requester().clone(),
            Method::GET,
            "quizzes/2/submissions",
            Vec::new(),
        )
        .with_root("quiz_submissions");
        assert_eq!(ids(&list.collect_all().await.unwrap()), vec![1, 2]);
    }

    #[tokio::test]
    async fn extra_attribs_override_element_values() {
        let server = MockServer::start().await;
        mount_pages(
            &server,
            "accounts/1/terms",
            vec![json!({"enrollment_terms": [
                {"id": 1, "name": "Fall", "account_id": 99}
            ]})],
        )
        .await;

        let canvas = canvas_for(&server);
        let mut extra = serde_json::Map::new();
        extra.insert("account_id".to_string(), json!(1));
        let mut terms: PaginatedList<EnrollmentTerm> = PaginatedList::new(
            canvas.requester().clone(),
            Method::GET,
            "accounts/1/terms",
            Vec::new(),
        )
        .with_root("enrollment_terms")
        .with_extra_attribs(extra);
        let terms = terms.collect_all().await.unwrap();
        assert_eq!(terms[0].account_id, Some(1));
    }

    #[tokio::test]
    async fn failed_page_can_be_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/flaky"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(1..=2)).insert_header(
                "Link",
                format!("<{}/api/v1/flaky?page=2>; rel=\"next\"", server.uri()),
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/flaky"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let mut list = users_list(&server, "flaky").await;
        let collected: Vec<Result<User, CanvasError>> = list.stream().collect().await;
        assert_eq!(collected.len(), 3);
        assert!(collected[0].is_ok() && collected[1].is_ok());
        assert!(matches!(collected[2], Err(CanvasError::Status(500, _))));
        assert_eq!(list.buffered().len(), 2);
        assert!(list.has_next_page());

        Mock::given(method("GET"))
            .and(path("/api/v1/flaky"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(3..=3)))
            .mount(&server)
            .await;
        assert_eq!(ids(&list.collect_all().await.unwrap()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn url_override() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/quiz/v1/courses/1/quizzes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users(7..=8)))
            .mount(&server)
            .await;

        let mut list = users_list(&server, "ignored")
            .await
            .with_url_override(
                url::Url::parse(&format!("{}/api/quiz/v1/courses/1/quizzes", server.uri()))
                    .unwrap(),
            );
        assert_eq!(ids(&list.collect_all().await.unwrap()), vec![7, 8]);
    }

    #[tokio::test]
    async fn non_list_page_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/not_a_list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;

        let mut list = users_list(&server, "not_a_list").await;
        assert!(matches!(
            list.get(0).await,
            Err(CanvasError::ApiResponseMalformed(_))
        ));
    }

    #[tokio::test]
    async fn display() {
        let server = MockServer::start().await;
        let list = users_list(&server, "users").await;
        assert_eq!(format!("{}", list), "<PaginatedList of type User>");
        helpers::init_logging();
    }
}
