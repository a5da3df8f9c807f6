// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Punisher integration tests.
//!
//! Provides an in-memory host and on-disk mod fixtures for fast,
//! deterministic tests without a running game server.
//!
//! # Components
//!
//! - [`MockHost`] - Fake host implementing every port, recording each call
//! - [`ModFixture`] - Temporary mod directory populated with sample data

pub mod fixture;
pub mod mock_host;

pub use fixture::{host_preset_items, ModFixture, HOST_PRESETS, HOST_PRESET_ID, TRADER_ID};
pub use mock_host::MockHost;
