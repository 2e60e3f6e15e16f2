//! Common test utilities for integration tests
//!
//! Provides fake fetchers, a recording completion client and config
//! builders that point every upstream at a mock server.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use unified_ai::domain::models::{
    AzureConfig, CompletionConfig, GitLabConfig, HttpConfig, Query, Secret, ServiceNowConfig,
    SourceBody, SourceKind,
};
use unified_ai::infrastructure::http::HttpClient;
use unified_ai::{CompletionClient, SourceFetcher, UpstreamError};

/// HTTP client with a short per-call timeout.
pub fn http() -> HttpClient {
    HttpClient::new(&HttpConfig {
        timeout_secs: 5,
        ..HttpConfig::default()
    })
    .expect("Failed to build HTTP client")
}

pub fn azure_config(base_url: &str) -> AzureConfig {
    AzureConfig {
        management_url: base_url.to_string(),
        access_token: Some(Secret::new("azure-token")),
        subscription_id: "sub-1".to_string(),
        resource_group: "rg-prod".to_string(),
        vm_name: "vm-web-01".to_string(),
        ..AzureConfig::default()
    }
}

pub fn servicenow_config(base_url: &str) -> ServiceNowConfig {
    ServiceNowConfig {
        instance_url: base_url.to_string(),
        username: "admin".to_string(),
        password: Some(Secret::new("secret")),
        ..ServiceNowConfig::default()
    }
}

pub fn gitlab_config(base_url: &str) -> GitLabConfig {
    GitLabConfig {
        base_url: base_url.to_string(),
        token: Some(Secret::new("glpat-test")),
        project_id: "42".to_string(),
        ..GitLabConfig::default()
    }
}

pub fn completion_config(base_url: &str) -> CompletionConfig {
    CompletionConfig {
        base_url: base_url.to_string(),
        api_key: Some(Secret::new("sk-or-test")),
        ..CompletionConfig::default()
    }
}

/// Fetcher returning a fixed body.
pub struct FixedFetcher {
    pub kind: SourceKind,
    pub body: SourceBody,
}

impl FixedFetcher {
    pub fn data(kind: SourceKind, text: &str) -> Arc<dyn SourceFetcher> {
        Arc::new(Self {
            kind,
            body: SourceBody::Data(text.to_string()),
        })
    }

    pub fn not_found(kind: SourceKind, sentinel: &str) -> Arc<dyn SourceFetcher> {
        Arc::new(Self {
            kind,
            body: SourceBody::not_found(sentinel),
        })
    }

    pub fn failed(kind: SourceKind, error: UpstreamError) -> Arc<dyn SourceFetcher> {
        Arc::new(Self {
            kind,
            body: SourceBody::Failed(error),
        })
    }
}

#[async_trait]
impl SourceFetcher for FixedFetcher {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _query: &Query) -> SourceBody {
        self.body.clone()
    }
}

/// Completion client that records every prompt it receives.
pub struct RecordingCompletion {
    pub prompts: Mutex<Vec<String>>,
    pub reply: Result<String, UpstreamError>,
}

impl RecordingCompletion {
    pub fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: Ok(text.to_string()),
        })
    }

    pub fn failing(error: UpstreamError) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            reply: Err(error),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for RecordingCompletion {
    fn model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}
