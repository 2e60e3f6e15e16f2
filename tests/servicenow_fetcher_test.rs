//! ServiceNow ticket search against a mock Table API.

mod common;

use std::sync::Arc;

use mockito::{Matcher, Server};
use unified_ai::adapters::plugins::servicenow::{ServiceNowClient, TicketSearchFetcher};
use unified_ai::domain::models::{Query, SourceBody, NO_INCIDENTS_FOUND};
use unified_ai::SourceFetcher;

fn fetcher(server: &Server) -> TicketSearchFetcher {
    let client = ServiceNowClient::new(common::http(), &common::servicenow_config(&server.url())).unwrap();
    TicketSearchFetcher::new(Arc::new(client), 5)
}

#[tokio::test]
async fn test_ticket_search_lists_matches() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/api/now/table/incident")
        .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sysparm_query".into(), "short_descriptionLIKEdisk full".into()),
            Matcher::UrlEncoded("sysparm_limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"result": [
                {"number": "INC0010001", "short_description": "Disk full on vm-db-01", "state": "In Progress"},
                {"number": "INC0010002", "short_description": "disk full alert"}
            ]}"#,
        )
        .create_async()
        .await;

    let body = fetcher(&server)
        .fetch(&Query::parse("disk full").unwrap())
        .await;

    search.assert_async().await;
    assert_eq!(
        body,
        SourceBody::Data("Disk full on vm-db-01 — In Progress\ndisk full alert — N/A".to_string())
    );
}

#[tokio::test]
async fn test_zero_tickets_is_sentinel() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/now/table/incident")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"result": []}"#)
        .create_async()
        .await;

    let body = fetcher(&server)
        .fetch(&Query::parse("printer on fire").unwrap())
        .await;

    assert_eq!(body, SourceBody::not_found(NO_INCIDENTS_FOUND));
    assert!(!body_text(&body).chars().any(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_unauthorized_reports_status_code() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/now/table/incident")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error": {"message": "User Not Authenticated"}}"#)
        .create_async()
        .await;

    let body = fetcher(&server)
        .fetch(&Query::parse("disk full").unwrap())
        .await;

    assert!(body.is_failed());
    assert!(body_text(&body).contains("401"));
}

fn body_text(body: &SourceBody) -> String {
    match body {
        SourceBody::Data(text) | SourceBody::NotFound(text) => text.clone(),
        SourceBody::Failed(err) => err.to_string(),
    }
}
