// crates/admin-settings-cli/src/lib.rs
// ============================================================================
// Module: Admin Settings CLI Library
// Description: Shared helpers behind the `admin-settings` binary.
// Purpose: Expose the message catalog, file store, and logging setup.
// Dependencies: crate::{file_store, i18n, logging}
// ============================================================================

//! ## Overview
//! The binary is a thin dispatcher; reusable pieces live here so they can be
//! exercised by integration tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod file_store;
pub mod i18n;
pub mod logging;
