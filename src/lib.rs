//! Folio: the interactive layer of a reading site, as a host-driven state engine.
//!
//! Controllers for the theme preference, the hide-on-scroll header, the
//! reading progress bar and the off-canvas menu run against a [`dom::Document`]
//! and record their DOM mutations as patches for the host page to apply.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod bridge;
pub mod database;
pub mod dom;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
