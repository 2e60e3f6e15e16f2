//! Azure instance-status and metrics fetchers against a mock ARM server.

mod common;

use std::sync::Arc;

use mockito::{Matcher, Server};
use unified_ai::adapters::plugins::azure::{AzureClient, InstanceMetricsFetcher, InstanceStatusFetcher};
use unified_ai::domain::models::{Query, SourceBody, NO_INSTANCES_FOUND, NO_METRIC_SAMPLES};
use unified_ai::SourceFetcher;

const VMS_PATH: &str =
    "/subscriptions/sub-1/resourceGroups/rg-prod/providers/Microsoft.Compute/virtualMachines";

fn client(server: &Server) -> Arc<AzureClient> {
    Arc::new(AzureClient::new(common::http(), &common::azure_config(&server.url())).unwrap())
}

fn query() -> Query {
    Query::parse("why is the site slow").unwrap()
}

#[tokio::test]
async fn test_instance_status_lists_power_states() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", VMS_PATH)
        .match_query(Matcher::UrlEncoded("api-version".into(), "2021-07-01".into()))
        .match_header("authorization", "Bearer azure-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"value": [{"name": "vm-web-01"}, {"name": "vm-db-01"}]}"#)
        .create_async()
        .await;
    let web = server
        .mock("GET", format!("{VMS_PATH}/vm-web-01/instanceView").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"statuses": [
                {"code": "ProvisioningState/succeeded", "displayStatus": "Provisioning succeeded"},
                {"code": "PowerState/running", "displayStatus": "VM running"}
            ]}"#,
        )
        .create_async()
        .await;
    let db = server
        .mock("GET", format!("{VMS_PATH}/vm-db-01/instanceView").as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let body = InstanceStatusFetcher::new(client(&server)).fetch(&query()).await;

    list.assert_async().await;
    web.assert_async().await;
    db.assert_async().await;
    let SourceBody::Data(text) = body else {
        panic!("expected data, got {body:?}");
    };
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "vm-web-01: VM running");
    assert!(lines[1].starts_with("vm-db-01: status unavailable"));
    assert!(lines[1].contains("500"));
}

#[tokio::test]
async fn test_instance_status_empty_group_is_sentinel() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", VMS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"value": []}"#)
        .create_async()
        .await;

    let body = InstanceStatusFetcher::new(client(&server)).fetch(&query()).await;
    assert_eq!(body, SourceBody::not_found(NO_INSTANCES_FOUND));
}

#[tokio::test]
async fn test_instance_status_forbidden_reports_status_code() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", VMS_PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error": {"code": "AuthorizationFailed"}}"#)
        .create_async()
        .await;

    let body = InstanceStatusFetcher::new(client(&server)).fetch(&query()).await;
    let SourceBody::Failed(err) = body else {
        panic!("expected failure, got {body:?}");
    };
    assert_eq!(err.status_code(), Some(403));
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn test_metrics_formats_samples() {
    let mut server = Server::new_async().await;
    let metrics = server
        .mock(
            "GET",
            format!("{VMS_PATH}/vm-web-01/providers/microsoft.insights/metrics").as_str(),
        )
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api-version".into(), "2018-01-01".into()),
            Matcher::UrlEncoded("metricnames".into(), "Percentage CPU".into()),
            Matcher::UrlEncoded("interval".into(), "PT5M".into()),
            Matcher::UrlEncoded("aggregation".into(), "Average".into()),
            Matcher::Regex("timespan=".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"value": [{
                "name": {"value": "Percentage CPU"},
                "unit": "Percent",
                "timeseries": [{"data": [
                    {"timeStamp": "2024-05-01T11:00:00Z", "average": 42.0},
                    {"timeStamp": "2024-05-01T11:05:00Z"}
                ]}]
            }]}"#,
        )
        .create_async()
        .await;

    let fetcher =
        InstanceMetricsFetcher::new(client(&server), "vm-web-01", vec!["Percentage CPU".to_string()], 60);
    let body = fetcher.fetch(&query()).await;

    metrics.assert_async().await;
    assert_eq!(
        body,
        SourceBody::Data("2024-05-01T11:00:00Z — Percentage CPU: 42.00%".to_string())
    );
}

#[tokio::test]
async fn test_metrics_without_samples_is_sentinel() {
    let mut server = Server::new_async().await;
    server
        .mock(
            "GET",
            format!("{VMS_PATH}/vm-web-01/providers/microsoft.insights/metrics").as_str(),
        )
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"value": [{"name": {"value": "Percentage CPU"}, "timeseries": []}]}"#)
        .create_async()
        .await;

    let fetcher =
        InstanceMetricsFetcher::new(client(&server), "vm-web-01", vec!["Percentage CPU".to_string()], 60);
    assert_eq!(
        fetcher.fetch(&query()).await,
        SourceBody::not_found(NO_METRIC_SAMPLES)
    );
}
