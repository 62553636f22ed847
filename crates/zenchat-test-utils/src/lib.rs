// SPDX-FileCopyrightText: 2026 Zenchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for zenchat integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock completion provider with scripted replies
//! - [`MemoryStorage`] - In-memory key-value store with failure injection
//! - [`TestHarness`] - Controller over a temp SQLite store and a mock provider

pub mod harness;
pub mod memory_storage;
pub mod mock_provider;

pub use harness::TestHarness;
pub use memory_storage::MemoryStorage;
pub use mock_provider::{MockProvider, MockReply};
