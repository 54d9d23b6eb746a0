// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-to-live response cache for read-heavy endpoints.
//!
//! Keyed by caller identity plus request path/query. There is no
//! invalidation protocol; entries simply age out. The cache lives in
//! gateway state and is injected where needed -- never a module-level
//! static -- so tests and multi-instance setups can hold their own.

use std::time::{Duration, Instant};

use dashmap::DashMap;

struct CacheEntry {
    inserted_at: Instant,
    body: String,
}

/// TTL cache of serialized JSON response bodies.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fetch a live entry; expired entries are evicted on read.
    pub fn get(&self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => {
                return Some(entry.body.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Store a serialized body, resetting the entry's age.
    pub fn put(&self, key: impl Into<String>, body: impl Into<String>) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                inserted_at: Instant::now(),
                body: body.into(),
            },
        );
    }
}
