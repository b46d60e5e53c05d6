// crates/admin-settings-core/src/runtime/mod.rs
// ============================================================================
// Module: Admin Settings Runtime
// Description: Resolver, projection, form controller, and renderer.
// Purpose: Drive settings pages from load through render, edit, and save.
// Dependencies: crate::{core, interfaces}, requirement-logic
// ============================================================================

//! ## Overview
//! Runtime modules turn a schema and a configuration document into a live
//! form. Gates resolve through the requirement algebra, projection moves
//! values between the document and the draft, and the renderer describes the
//! resulting controls.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod form;
pub mod projection;
pub mod render;
pub mod resolver;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use form::FormController;
pub use form::FormError;
pub use form::GENERATED_SECRET_BYTES;
pub use form::LoadError;
pub use form::PendingSave;
pub use form::SubmitError;
pub use form::SubmitRejected;
pub use form::normalize_secret;
pub use projection::project_in;
pub use projection::project_out;
pub use render::RenderContext;
pub use render::RenderedControl;
pub use render::RenderedPage;
pub use render::Widget;
pub use render::render_field;
pub use render::render_page;
pub use resolver::FieldGate;
pub use resolver::FieldStatus;
pub use resolver::GateReader;
pub use resolver::effective_value;
pub use resolver::enablement_requirement;
pub use resolver::is_disabled;
pub use resolver::is_hidden;
pub use resolver::is_set_by_env;
pub use resolver::is_truthy;
pub use resolver::visibility_requirement;
pub use store::InMemoryConfigStore;
