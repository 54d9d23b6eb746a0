// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component wiring for `haru serve`.
//!
//! Construction order: storage (migrations run on open) -> provider ->
//! insight services -> gateway. Shutdown checkpoints the WAL.

use std::sync::Arc;
use std::time::Duration;

use haru_anthropic::AnthropicProvider;
use haru_config::HaruConfig;
use haru_core::{HaruError, PluginAdapter, ProviderAdapter, StorageAdapter};
use haru_gateway::{AppState, AuthConfig, ServerConfig};
use haru_insight::InsightServices;
use haru_storage::SqliteStorage;
use tracing::info;

/// Run the HTTP server until ctrl-c.
pub async fn run(config: HaruConfig) -> Result<(), HaruError> {
    let storage: Arc<dyn StorageAdapter> = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    info!(path = %config.storage.database_path, "storage ready");

    let provider: Arc<dyn ProviderAdapter> = Arc::new(AnthropicProvider::new(&config)?);

    let services = Arc::new(InsightServices::new(
        provider,
        storage.clone(),
        config.pipeline.max_attempts,
    ));

    let state = AppState::new(
        services,
        storage.clone(),
        AuthConfig {
            bearer_token: config.gateway.bearer_token.clone(),
        },
        Duration::from_secs(config.cache.ttl_minutes * 60),
    );

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    tokio::select! {
        result = haru_gateway::start_server(&server_config, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    storage.shutdown().await?;
    info!("storage shut down cleanly");
    Ok(())
}
