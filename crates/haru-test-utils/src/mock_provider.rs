// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generative provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-scripted outcomes,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use haru_core::{AdapterType, HaruError, HealthStatus, PluginAdapter, ProviderAdapter};

/// A scripted generation outcome: raw text or a provider failure message.
pub type ScriptedOutcome = Result<String, String>;

/// A mock provider that pops scripted outcomes from a FIFO queue.
///
/// When the queue runs dry, behavior depends on the constructor:
/// [`MockProvider::with_responses`] returns a default text, while
/// [`MockProvider::failing`] keeps failing forever.
pub struct MockProvider {
    outcomes: Mutex<VecDeque<ScriptedOutcome>>,
    fail_when_empty: bool,
    calls: AtomicU32,
}

impl MockProvider {
    /// A provider pre-loaded with successful responses.
    pub fn with_responses(responses: Vec<impl Into<String>>) -> Self {
        Self {
            outcomes: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            fail_when_empty: false,
            calls: AtomicU32::new(0),
        }
    }

    /// A provider pre-loaded with mixed success/failure outcomes.
    pub fn with_outcomes(outcomes: Vec<ScriptedOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            fail_when_empty: false,
            calls: AtomicU32::new(0),
        }
    }

    /// A provider whose every call fails with a transport-style error.
    pub fn failing() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            fail_when_empty: true,
            calls: AtomicU32::new(0),
        }
    }

    /// Append another scripted outcome.
    pub async fn push(&self, outcome: ScriptedOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Number of `generate` calls made so far.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HaruError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HaruError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, HaruError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(HaruError::Provider {
                message,
                source: None,
            }),
            None if self.fail_when_empty => Err(HaruError::Provider {
                message: "mock provider scripted to fail".to_string(),
                source: None,
            }),
            None => Ok("mock response".to_string()),
        }
    }
}
