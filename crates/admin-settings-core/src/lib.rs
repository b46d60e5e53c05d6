// crates/admin-settings-core/src/lib.rs
// ============================================================================
// Module: Admin Settings Core Library
// Description: Public API surface for the schema-driven settings engine.
// Purpose: Expose core types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Admin settings core turns declarative page schemas into editable forms over
//! a nested configuration document. It resolves per-field gates, tracks the
//! working draft, and merges edits back into a document handed to a save
//! collaborator. Transports and UI shells integrate through explicit
//! interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ConfigSink;
pub use interfaces::ConfigSource;
pub use interfaces::NavigationGuard;
pub use interfaces::SaveError;
pub use interfaces::SourceError;
pub use runtime::FieldStatus;
pub use runtime::FormController;
pub use runtime::FormError;
pub use runtime::InMemoryConfigStore;
pub use runtime::LoadError;
pub use runtime::PendingSave;
pub use runtime::RenderedControl;
pub use runtime::RenderedPage;
pub use runtime::SubmitError;
pub use runtime::SubmitRejected;
pub use runtime::Widget;
pub use runtime::project_in;
pub use runtime::project_out;
pub use runtime::render_field;
pub use runtime::render_page;
