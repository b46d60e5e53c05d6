// crates/admin-settings-core/src/runtime/render.rs
// ============================================================================
// Module: Control Renderer
// Description: Dispatch from field descriptors to bound control models.
// Purpose: Produce a typed, UI-agnostic description of a settings page.
// Dependencies: crate::{core, interfaces, runtime}, serde, serde_json
// ============================================================================

//! ## Overview
//! Rendering is an exhaustive match over [`ControlType`]; adding a control
//! variant does not compile until it renders. Hidden fields and disabled
//! banners produce no control. Every other field yields a [`RenderedControl`]
//! carrying its resolved flags and the help text to show.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::core::BannerType;
use crate::core::ChoiceOption;
use crate::core::ConfigDocument;
use crate::core::ControlType;
use crate::core::FieldDescriptor;
use crate::core::FormValues;
use crate::core::LicenseFlags;
use crate::interfaces::SaveError;
use crate::runtime::form::FormController;
use crate::runtime::resolver::FieldStatus;
use crate::runtime::resolver::effective_value;

// ============================================================================
// SECTION: Render Model
// ============================================================================

/// Concrete widget bound to a field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    /// Text input.
    Text {
        /// Current text.
        value: String,
        /// Placeholder message reference.
        placeholder: Option<String>,
        /// Maximum input length.
        max_length: Option<usize>,
        /// Multi-line text area.
        multiline: bool,
    },
    /// Integer input.
    Number {
        /// Current input text.
        value: String,
    },
    /// Boolean toggle.
    Toggle {
        /// Effective state.
        value: bool,
    },
    /// Dropdown select.
    Dropdown {
        /// Selected option value.
        selected: Option<String>,
        /// Options in display order.
        options: Vec<ChoiceOption>,
    },
    /// Radio group.
    Radio {
        /// Selected option value.
        selected: Option<String>,
        /// Options in display order.
        options: Vec<ChoiceOption>,
    },
    /// Generated secret with a regenerate action.
    GeneratedSecret {
        /// Current secret.
        value: String,
    },
    /// Username search input.
    UsernameLookup {
        /// Current username.
        value: String,
        /// Placeholder message reference.
        placeholder: Option<String>,
    },
    /// Static banner.
    Banner {
        /// Banner severity.
        banner_type: BannerType,
    },
    /// Action button.
    Button {
        /// Action identifier.
        action: String,
        /// Success message reference.
        success_message: Option<String>,
        /// Failure message reference.
        error_message: Option<String>,
    },
    /// Background jobs table.
    JobsTable {
        /// Listed job type.
        job_type: String,
    },
    /// Custom component.
    Custom {
        /// Component identifier.
        component: String,
        /// Bound value.
        value: Value,
    },
}

/// One rendered field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedControl {
    /// Field key.
    pub key: String,
    /// Label message reference.
    pub label: Option<String>,
    /// Help text message reference for the current state.
    pub help_text: Option<String>,
    /// Control is disabled by gates.
    pub disabled: bool,
    /// Value is forced by deployment environment.
    pub set_by_env: bool,
    /// Bound widget.
    pub widget: Widget,
}

/// A rendered settings page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    /// Schema id.
    pub schema_id: String,
    /// Display name reference.
    pub name: Option<String>,
    /// Header markup reference.
    pub header: Option<String>,
    /// Footer markup reference.
    pub footer: Option<String>,
    /// Controls in schema order.
    pub controls: Vec<RenderedControl>,
    /// Draft has unsaved edits.
    pub dirty: bool,
    /// A save is outstanding.
    pub saving: bool,
    /// Save control is enabled.
    pub can_save: bool,
    /// Error of the last failed save.
    pub error: Option<SaveError>,
}

// ============================================================================
// SECTION: Render Context
// ============================================================================

/// State consulted while rendering fields.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Schema id used to resolve field paths.
    pub schema_id: &'a str,
    /// Current form values.
    pub values: &'a FormValues,
    /// License flags.
    pub license: &'a LicenseFlags,
    /// Environment override document.
    pub environment: &'a ConfigDocument,
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Renders one field, or `None` when nothing should be drawn.
#[must_use]
pub fn render_field(field: &FieldDescriptor, ctx: &RenderContext<'_>) -> Option<RenderedControl> {
    let status =
        FieldStatus::resolve(field, ctx.schema_id, ctx.values, ctx.license, ctx.environment);
    if status.hidden {
        return None;
    }
    let value = effective_value(field, ctx.values, ctx.license);
    let widget = match &field.control {
        ControlType::Text {
            placeholder,
            max_length,
            multiline,
        } => Widget::Text {
            value: display_text(&value),
            placeholder: placeholder.clone(),
            max_length: *max_length,
            multiline: *multiline,
        },
        ControlType::Number {
            ..
        } => Widget::Number {
            value: display_text(&value),
        },
        ControlType::Bool => Widget::Toggle {
            value: value.as_bool().unwrap_or(false),
        },
        ControlType::Dropdown {
            options,
        } => Widget::Dropdown {
            selected: selected_option(&value, options),
            options: options.clone(),
        },
        ControlType::Radio {
            options,
        } => Widget::Radio {
            selected: selected_option(&value, options),
            options: options.clone(),
        },
        ControlType::GeneratedSecret => Widget::GeneratedSecret {
            value: display_text(&value),
        },
        ControlType::UsernameLookup {
            placeholder,
        } => Widget::UsernameLookup {
            value: display_text(&value),
            placeholder: placeholder.clone(),
        },
        ControlType::Banner {
            banner_type,
        } => {
            if status.disabled {
                return None;
            }
            Widget::Banner {
                banner_type: *banner_type,
            }
        }
        ControlType::Button {
            action,
            success_message,
            error_message,
        } => Widget::Button {
            action: action.clone(),
            success_message: success_message.clone(),
            error_message: error_message.clone(),
        },
        ControlType::JobsTable {
            job_type,
        } => Widget::JobsTable {
            job_type: job_type.clone(),
        },
        ControlType::Custom {
            component,
        } => Widget::Custom {
            component: component.clone(),
            value,
        },
    };

    let help_text = if status.disabled && field.disabled_help_text.is_some() {
        field.disabled_help_text.clone()
    } else {
        field.help_text.clone()
    };
    Some(RenderedControl {
        key: field.key.clone(),
        label: field.label.clone(),
        help_text,
        disabled: status.disabled,
        set_by_env: status.set_by_env,
        widget,
    })
}

/// Renders every field of the controller's page.
#[must_use]
pub fn render_page(controller: &FormController) -> RenderedPage {
    let schema = controller.page().schema();
    let ctx = RenderContext {
        schema_id: &schema.id,
        values: controller.values(),
        license: controller.license(),
        environment: controller.environment(),
    };
    RenderedPage {
        schema_id: schema.id.clone(),
        name: schema.name.clone(),
        header: schema.header.clone(),
        footer: schema.footer.clone(),
        controls: schema.fields.iter().filter_map(|field| render_field(field, &ctx)).collect(),
        dirty: controller.is_dirty(),
        saving: controller.is_saving(),
        can_save: controller.is_dirty() && !controller.is_saving() && controller.can_save(),
        error: controller.error().cloned(),
    }
}

/// Text shown in an input for a stored value.
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Selected option; an empty or non-string value selects the first option.
fn selected_option(value: &Value, options: &[ChoiceOption]) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => options.first().map(|option| option.value.clone()),
    }
}
