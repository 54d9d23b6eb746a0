// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Haru reflection journal and scheduling service.
//!
//! This crate provides the foundational trait definitions, error types,
//! domain model, and the pure progress/streak arithmetic used throughout
//! the Haru workspace. Adapter implementations live in sibling crates.

pub mod error;
pub mod progress;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HaruError;
pub use types::{
    AdapterType, BurnoutAssessment, BurnoutLevel, DailyTask, Difficulty, Emotion, Goal,
    GoalProgress, GoalTask, HealthStatus, MicroAction, Phase, Reflection, ScheduleEvent,
};

pub use traits::{PluginAdapter, ProviderAdapter, StorageAdapter};
