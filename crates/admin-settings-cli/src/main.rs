// crates/admin-settings-cli/src/main.rs
// ============================================================================
// Module: Admin Settings CLI Entry Point
// Description: Command dispatcher for schema validation, rendering, and edits.
// Purpose: Drive settings pages against file-backed configuration documents.
// Dependencies: admin-settings-config, admin-settings-core, clap, tokio.
// ============================================================================

//! ## Overview
//! The `admin-settings` binary loads `admin-settings.toml`, the schema files
//! it lists, and the persisted JSON document. It can validate inputs, list
//! pages, render a page's controls, and apply field edits through the same
//! form controller a UI shell would use. All user-facing strings are routed
//! through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use admin_settings_cli::file_store::FileConfigStore;
use admin_settings_cli::logging::init_logging;
use admin_settings_cli::t;
use admin_settings_config::ConsoleConfig;
use admin_settings_config::LoggingConfig;
use admin_settings_config::SchemaCatalog;
use admin_settings_core::BannerType;
use admin_settings_core::FormController;
use admin_settings_core::RenderedControl;
use admin_settings_core::RenderedPage;
use admin_settings_core::SettingsPage;
use admin_settings_core::SubmitError;
use admin_settings_core::SubmitRejected;
use admin_settings_core::Widget;
use admin_settings_core::render_page;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "admin-settings", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Config file path (defaults to `ADMIN_SETTINGS_CONFIG` or `admin-settings.toml`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration file utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Schema catalog utilities.
    Schema {
        /// Selected schema subcommand.
        #[command(subcommand)]
        command: SchemaCommand,
    },
    /// Render a settings page from the persisted document.
    Render(RenderCommand),
    /// Edit fields of a settings page and save the document.
    Apply(ApplyCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate the config file and the schemas it lists.
    Validate,
}

/// Schema subcommands.
#[derive(Subcommand, Debug)]
enum SchemaCommand {
    /// Validate schema files.
    Validate(SchemaValidateCommand),
    /// List configured schemas.
    List,
}

/// Arguments for `schema validate`.
#[derive(Args, Debug)]
struct SchemaValidateCommand {
    /// Schema files to check (defaults to the configured catalog).
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
struct RenderCommand {
    /// Schema id of the page to render.
    #[arg(long, value_name = "ID")]
    schema: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `apply`.
#[derive(Args, Debug)]
struct ApplyCommand {
    /// Schema id of the page to edit.
    #[arg(long, value_name = "ID")]
    schema: String,
    /// Field edit; the value is parsed as JSON and falls back to a string.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    assignments: Vec<String>,
    /// Generated-secret field to regenerate.
    #[arg(long = "regenerate", value_name = "KEY")]
    regenerate: Vec<String>,
    /// Print the document that would be saved without writing it.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,
}

/// Output formats for rendered pages.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// Pretty JSON.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config_path = cli.config.as_deref();
    match command {
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(config_path),
        Commands::Schema {
            command,
        } => command_schema(config_path, command),
        Commands::Render(command) => command_render(config_path, command).await,
        Commands::Apply(command) => command_apply(config_path, command).await,
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end())
}

// ============================================================================
// SECTION: Config And Schema Commands
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let config = start(config_path)?;
    let catalog = load_catalog(&config)?;
    write_stdout_line(&t!(
        "config.validate.ok",
        document = config.document_path().display(),
        schemas = catalog.len()
    ))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `schema` subcommands.
fn command_schema(config_path: Option<&Path>, command: SchemaCommand) -> CliResult<ExitCode> {
    match command {
        SchemaCommand::Validate(command) => {
            let catalog = if command.paths.is_empty() {
                let config = start(config_path)?;
                load_catalog(&config)?
            } else {
                install_logging(&LoggingConfig::default())?;
                SchemaCatalog::load(&command.paths)
                    .map_err(|err| CliError::new(t!("schema.load_failed", error = err)))?
            };
            for schema in catalog.iter() {
                write_stdout_line(&t!(
                    "schema.validate.ok",
                    id = schema.id,
                    fields = schema.fields.len()
                ))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        SchemaCommand::List => {
            let config = start(config_path)?;
            let catalog = load_catalog(&config)?;
            if catalog.is_empty() {
                write_stdout_line(&t!("schema.list.empty"))?;
            }
            for schema in catalog.iter() {
                let name = schema.name.clone().unwrap_or_else(|| t!("schema.list.unnamed"));
                write_stdout_line(&t!(
                    "schema.list.entry",
                    id = schema.id,
                    name = name,
                    fields = schema.fields.len()
                ))?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Page Commands
// ============================================================================

/// Executes `render`.
async fn command_render(config_path: Option<&Path>, command: RenderCommand) -> CliResult<ExitCode> {
    let config = start(config_path)?;
    let (controller, _store) = open_form(&config, &command.schema).await?;
    let page = render_page(&controller);
    match command.format {
        OutputFormat::Json => write_json(&page)?,
        OutputFormat::Text => {
            for line in render_text(&page) {
                write_stdout_line(&line)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes `apply`.
async fn command_apply(config_path: Option<&Path>, command: ApplyCommand) -> CliResult<ExitCode> {
    let config = start(config_path)?;
    let (mut controller, store) = open_form(&config, &command.schema).await?;
    for assignment in &command.assignments {
        let (key, value) = parse_assignment(assignment)?;
        controller
            .set_field(key, value)
            .map_err(|err| CliError::new(t!("apply.edit_failed", key = key, error = err)))?;
    }
    for key in &command.regenerate {
        controller
            .regenerate_secret(key)
            .map_err(|err| CliError::new(t!("apply.edit_failed", key = key, error = err)))?;
    }

    if command.dry_run {
        write_json(controller.preview().as_value())?;
        return Ok(ExitCode::SUCCESS);
    }

    match controller.submit(&store).await {
        Ok(()) => {
            write_stdout_line(&t!(
                "apply.saved",
                schema = command.schema,
                path = store.document_path().display()
            ))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(SubmitError::Rejected(SubmitRejected::NotDirty)) => {
            write_stdout_line(&t!("apply.no_changes", schema = command.schema))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Err(CliError::new(t!("apply.save_failed", error = err))),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads the config file and installs logging from it.
fn start(config_path: Option<&Path>) -> CliResult<ConsoleConfig> {
    let config = ConsoleConfig::load(config_path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    install_logging(&config.logging)?;
    Ok(config)
}

/// Installs the tracing subscriber.
fn install_logging(logging: &LoggingConfig) -> CliResult<()> {
    init_logging(logging).map_err(|err| CliError::new(t!("logging.init_failed", error = err)))
}

/// Loads the configured schema catalog.
fn load_catalog(config: &ConsoleConfig) -> CliResult<SchemaCatalog> {
    config.load_catalog().map_err(|err| CliError::new(t!("schema.load_failed", error = err)))
}

/// Builds a form controller for `schema_id` over the configured documents.
async fn open_form(
    config: &ConsoleConfig,
    schema_id: &str,
) -> CliResult<(FormController, FileConfigStore)> {
    let catalog = load_catalog(config)?;
    let schema = catalog
        .get(schema_id)
        .cloned()
        .ok_or_else(|| CliError::new(t!("schema.not_found", id = schema_id)))?;
    let store = FileConfigStore::new(config.document_path(), config.environment_overrides_path());
    let controller = FormController::load(SettingsPage::new(schema), &store, config.license_flags())
        .await
        .map_err(|err| CliError::new(t!("document.load_failed", error = err)))?;
    Ok((controller, store))
}

/// Splits `KEY=VALUE`; the value is JSON when it parses, otherwise a string.
fn parse_assignment(assignment: &str) -> CliResult<(&str, Value)> {
    let Some((key, raw)) = assignment.split_once('=') else {
        return Err(CliError::new(t!("apply.assignment_invalid", value = assignment)));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::new(t!("apply.assignment_invalid", value = assignment)));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key, value))
}

/// Formats a rendered page as text lines.
fn render_text(page: &RenderedPage) -> Vec<String> {
    let mut lines = Vec::with_capacity(page.controls.len() + 2);
    let name = page.name.clone().unwrap_or_else(|| t!("schema.list.unnamed"));
    lines.push(t!("render.header", id = page.schema_id, name = name));
    for control in &page.controls {
        lines.push(render_control_line(control));
    }
    let status = if page.dirty { t!("render.status.dirty") } else { t!("render.status.clean") };
    lines.push(status);
    if let Some(error) = &page.error {
        lines.push(t!("render.error", error = error));
    }
    lines
}

/// Formats one rendered control.
fn render_control_line(control: &RenderedControl) -> String {
    let mut line =
        t!("render.control", key = control.key, widget = describe_widget(&control.widget));
    if control.disabled {
        line.push(' ');
        line.push_str(&t!("render.flag.disabled"));
    }
    if control.set_by_env {
        line.push(' ');
        line.push_str(&t!("render.flag.set_by_env"));
    }
    line
}

/// Short description of a widget and its bound value.
fn describe_widget(widget: &Widget) -> String {
    match widget {
        Widget::Text {
            value,
            ..
        } => t!("render.widget.text", value = value),
        Widget::Number {
            value,
        } => t!("render.widget.number", value = value),
        Widget::Toggle {
            value,
        } => {
            let state = if *value { t!("render.on") } else { t!("render.off") };
            t!("render.widget.toggle", value = state)
        }
        Widget::Dropdown {
            selected,
            options,
        }
        | Widget::Radio {
            selected,
            options,
        } => {
            let choices: Vec<&str> = options.iter().map(|option| option.value.as_str()).collect();
            t!(
                "render.widget.choice",
                selected = selected.as_deref().unwrap_or_default(),
                options = choices.join("|")
            )
        }
        Widget::GeneratedSecret {
            value,
        } => t!("render.widget.secret", value = value),
        Widget::UsernameLookup {
            value,
            ..
        } => t!("render.widget.username", value = value),
        Widget::Banner {
            banner_type,
        } => t!("render.widget.banner", banner_type = banner_label(*banner_type)),
        Widget::Button {
            action,
            ..
        } => t!("render.widget.button", action = action),
        Widget::JobsTable {
            job_type,
        } => t!("render.widget.jobs", job_type = job_type),
        Widget::Custom {
            component,
            value,
        } => t!("render.widget.custom", component = component, value = value),
    }
}

/// Label for a banner severity.
fn banner_label(banner_type: BannerType) -> String {
    match banner_type {
        BannerType::Info => t!("render.banner.info"),
        BannerType::Warning => t!("render.banner.warning"),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes pretty JSON to stdout.
fn write_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.encode_failed", error = err)))?;
    write_stdout_line(&text)
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
