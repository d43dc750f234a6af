// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity listing pagination tests.
//!
//! These tests verify that:
//! 1. A short page ends the listing
//! 2. An exact multiple of the page size costs one extra empty request
//! 3. The `after` bound is sent unchanged on every page
//! 4. Any failed page fails the whole fetch

use activity_sync::error::AppError;
use mockito::{Matcher, Server};

mod common;
use common::{activities_page, test_client, ACTIVITIES_PATH};

fn page_query(page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), "100".into()),
    ])
}

#[tokio::test]
async fn test_short_page_terminates() {
    let mut server = Server::new_async().await;

    let mut mocks = Vec::new();
    for (page, count) in [(1u32, 100usize), (2, 100), (3, 37)] {
        mocks.push(
            server
                .mock("GET", ACTIVITIES_PATH)
                .match_query(page_query(page))
                .match_header("authorization", "Bearer token")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(activities_page((page as u64 - 1) * 100 + 1, count))
                .expect(1)
                .create_async()
                .await,
        );
    }
    let page_four = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(page_query(4))
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create_async()
        .await;

    let activities = test_client(&server.url())
        .fetch_all_activities("token", None)
        .await
        .unwrap();

    assert_eq!(activities.len(), 237);
    assert_eq!(activities[0].id, 1);
    assert_eq!(activities[236].id, 237);
    for mock in mocks {
        mock.assert_async().await;
    }
    page_four.assert_async().await;
}

#[tokio::test]
async fn test_exact_multiple_issues_one_empty_request() {
    let mut server = Server::new_async().await;

    let full_pages = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(Matcher::Regex("^page=[12]&".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(activities_page(1, 100))
        .expect(2)
        .create_async()
        .await;
    let empty_page = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(page_query(3))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let activities = test_client(&server.url())
        .fetch_all_activities("token", None)
        .await
        .unwrap();

    assert_eq!(activities.len(), 200);
    full_pages.assert_async().await;
    empty_page.assert_async().await;
}

#[tokio::test]
async fn test_after_bound_sent_on_every_page() {
    let mut server = Server::new_async().await;

    let first = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("after".into(), "1735689600".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(activities_page(1, 100))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("after".into(), "1735689600".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(activities_page(101, 3))
        .expect(1)
        .create_async()
        .await;

    let activities = test_client(&server.url())
        .fetch_all_activities("token", Some(1_735_689_600))
        .await
        .unwrap();

    assert_eq!(activities.len(), 103);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_failed_page_fails_whole_fetch() {
    let mut server = Server::new_async().await;

    let _first = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(page_query(1))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(activities_page(1, 100))
        .create_async()
        .await;
    let _second = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(page_query(2))
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let err = test_client(&server.url())
        .fetch_all_activities("token", None)
        .await
        .unwrap_err();

    match err {
        AppError::RemoteFetch(msg) => assert!(msg.contains("upstream exploded")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let mut server = Server::new_async().await;

    let _limited = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;

    let err = test_client(&server.url())
        .fetch_all_activities("token", None)
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_rejected_token_is_remote_fetch_error() {
    let mut server = Server::new_async().await;

    let _unauthorized = server
        .mock("GET", ACTIVITIES_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Authorization Error"}"#)
        .create_async()
        .await;

    let err = test_client(&server.url())
        .fetch_all_activities("token", None)
        .await
        .unwrap_err();

    match err {
        AppError::RemoteFetch(msg) => assert_eq!(msg, AppError::STRAVA_TOKEN_ERROR),
        other => panic!("unexpected error: {:?}", other),
    }
}
