//! End-to-end request cycle with fake sources and a recording completion
//! client, plus one cycle against mock servers for every upstream.

mod common;

use std::time::Duration;

use common::{FixedFetcher, RecordingCompletion};
use mockito::{Matcher, Server};
use unified_ai::cli::commands::interactive::run_session;
use unified_ai::domain::models::{
    CompletionReply, Config, PipelineLookup, Query, SourceKind, NO_INCIDENTS_FOUND,
};
use unified_ai::{AssistantService, ContextAggregator, PromptAssembler, UpstreamError};

fn service(completion: std::sync::Arc<RecordingCompletion>) -> AssistantService {
    let fetchers = vec![
        FixedFetcher::data(SourceKind::InstanceStatus, "VM1: running"),
        FixedFetcher::data(
            SourceKind::InstanceMetrics,
            "2024-05-01T11:00:00Z — Percentage CPU: 97.30%",
        ),
        FixedFetcher::not_found(SourceKind::Tickets, NO_INCIDENTS_FOUND),
        FixedFetcher::data(
            SourceKind::Pipelines,
            "Pipeline #123456 on branch main has status: failed",
        ),
    ];
    AssistantService::new(
        ContextAggregator::new(fetchers),
        PromptAssembler::default(),
        completion,
    )
}

#[tokio::test]
async fn test_pipeline_question_end_to_end() {
    let completion = RecordingCompletion::answering("Pipeline 123456 failed; CPU is saturated.");
    let reply = service(completion.clone())
        .answer(&Query::parse("pipeline #123456 failing").unwrap())
        .await;

    let calls = completion.calls();
    assert_eq!(calls.len(), 1, "completion must be invoked exactly once");
    let prompt = &calls[0];
    assert_eq!(prompt, &reply.prompt);

    for header in [
        "--- Azure Resources ---",
        "--- Azure Metrics ---",
        "--- ServiceNow Tickets ---",
        "--- GitLab Pipelines ---",
    ] {
        assert!(prompt.contains(header), "missing {header}");
    }
    assert!(prompt.contains("pipeline #123456 failing"));
    assert!(prompt.contains("VM1: running"));
    assert!(prompt.contains("no incidents found"));
    assert!(prompt.contains("Pipeline #123456 on branch main has status: failed"));

    assert_eq!(
        reply.reply,
        CompletionReply::Answer("Pipeline 123456 failed; CPU is saturated.".to_string())
    );
}

#[tokio::test]
async fn test_all_sources_failing_still_completes() {
    let fetchers = SourceKind::ALL
        .iter()
        .map(|kind| FixedFetcher::failed(*kind, UpstreamError::transport("connection refused")))
        .collect();
    let completion = RecordingCompletion::answering("Nothing to go on.");
    let service = AssistantService::new(
        ContextAggregator::new(fetchers),
        PromptAssembler::default(),
        completion.clone(),
    );

    let reply = service.answer(&Query::parse("status").unwrap()).await;

    assert_eq!(reply.context.failure_count(), 4);
    assert_eq!(completion.calls().len(), 1);
    assert!(reply
        .prompt
        .contains("Error fetching ServiceNow Tickets: request failed: connection refused"));
}

#[tokio::test]
async fn test_interactive_session_skips_blanks_and_stops_on_exit() {
    let completion = RecordingCompletion::answering("ok");
    let service = service(completion.clone());
    let input: &[u8] = b"disk full\n\n   \nwhy is vm1 down\nexit\nnever asked\n";
    let mut out = Vec::new();

    let answered = run_session(&service, input, &mut out, false, false)
        .await
        .unwrap();

    assert_eq!(answered, 2);
    assert_eq!(completion.calls().len(), 2);
    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed.matches("Unified AI Response:").count(), 2);
}

#[tokio::test]
async fn test_full_cycle_against_mock_upstreams() {
    let mut server = Server::new_async().await;
    let base = server.url();
    let vms = "/subscriptions/sub-1/resourceGroups/rg-prod/providers/Microsoft.Compute/virtualMachines";

    server
        .mock("GET", vms)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"value": [{"name": "vm-web-01"}]}"#)
        .create_async()
        .await;
    server
        .mock("GET", format!("{vms}/vm-web-01/instanceView").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"statuses": [{"code": "PowerState/running", "displayStatus": "VM running"}]}"#)
        .create_async()
        .await;
    server
        .mock(
            "GET",
            format!("{vms}/vm-web-01/providers/microsoft.insights/metrics").as_str(),
        )
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;
    server
        .mock("GET", "/api/now/table/incident")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"result": []}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v4/projects/42/pipelines/123456")
        .with_status(200)
        .with_body(r#"{"id": 123456, "ref": "main", "status": "failed"}"#)
        .create_async()
        .await;
    let completion = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("GitLab Pipelines".into()))
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"content": "Fix the pipeline."}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let mut config = Config::default();
    config.azure = common::azure_config(&base);
    config.servicenow = common::servicenow_config(&base);
    config.gitlab = common::gitlab_config(&base);
    config.gitlab.lookup = PipelineLookup::FromQuery;
    config.completion = common::completion_config(&base);
    config.http.timeout_secs = 5;

    let service = AssistantService::from_config(&config).unwrap();
    let reply = tokio::time::timeout(
        Duration::from_secs(30),
        service.answer(&Query::parse("pipeline #123456 failing").unwrap()),
    )
    .await
    .unwrap();

    completion.assert_async().await;
    assert_eq!(reply.reply.render(), "Fix the pipeline.");
    assert!(reply.prompt.contains("vm-web-01: VM running"));
    assert!(reply
        .prompt
        .contains("Error fetching Azure Metrics: HTTP status 503: unavailable"));
    assert!(reply.prompt.contains("no incidents found"));
    assert!(reply
        .prompt
        .contains("Pipeline #123456 on branch main has status: failed"));
}
