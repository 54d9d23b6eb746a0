// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for generative text APIs.

use async_trait::async_trait;

use crate::error::HaruError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for generative text providers.
///
/// The single entry point of the AI pipeline: one prompt in, raw model text
/// out. Transport, auth, and quota failures surface as
/// [`HaruError::Provider`](crate::HaruError::Provider). The model output is
/// untrusted free text; extracting and validating structure is the caller's
/// job, never the adapter's.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a single prompt and returns the raw text response.
    async fn generate(&self, prompt: &str) -> Result<String, HaruError>;
}
