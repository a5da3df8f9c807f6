// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Port traits for the host services the mod talks to.
//!
//! The host owns every object behind these traits and invokes the mod's
//! hooks serially, so the ports are plain synchronous traits taking
//! `&mut self` wherever host state is mutated.

pub mod config;
pub mod database;
pub mod image;
pub mod locale;
pub mod mod_loader;

pub use config::ConfigPort;
pub use database::{PresetSource, TraderRegistry};
pub use image::ImageRouter;
pub use locale::LocalePort;
pub use mod_loader::ModLoader;
