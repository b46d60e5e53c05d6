// crates/admin-settings-core/src/core/mod.rs
// ============================================================================
// Module: Admin Settings Core Types
// Description: Schema, document, and form value types.
// Purpose: Provide the serializable data model shared by runtime and tooling.
// Dependencies: regex, serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe settings pages declaratively and model the persisted
//! configuration document the pages read and write. They carry no runtime
//! state; the form controller in [`crate::runtime`] owns that.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod document;
pub mod license;
pub mod numeric;
pub mod page;
pub mod path;
pub mod schema;
pub mod values;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::ConfigDocument;
pub use license::LicenseFlags;
pub use numeric::DEFAULT_NON_ZERO_MINIMUM;
pub use numeric::NumericPolicy;
pub use numeric::coerce_integer;
pub use numeric::parse_int_with_policy;
pub use numeric::parse_leading_int;
pub use page::SchemaHooks;
pub use page::SettingsPage;
pub use path::ConfigPath;
pub use path::PathError;
pub use schema::BannerType;
pub use schema::ChoiceOption;
pub use schema::Condition;
pub use schema::ControlType;
pub use schema::FieldDescriptor;
pub use schema::Schema;
pub use schema::SchemaError;
pub use schema::ValueMatcher;
pub use schema::ValuePattern;
pub use values::FormValues;
