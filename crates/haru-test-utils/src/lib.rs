// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Haru workspace.
//!
//! Everything behind the core adapter traits can be swapped for a
//! deterministic double: [`MockProvider`] scripts generation outcomes,
//! [`MemoryStorage`] replaces SQLite. Both are used across crate tests and
//! the end-to-end suite.

pub mod memory_storage;
pub mod mock_provider;

pub use memory_storage::MemoryStorage;
pub use mock_provider::MockProvider;
