pub mod browse;
pub mod config;
pub mod doctor;

use catalog_core::config::AppConfig;
use catalog_core::fixtures::demo_dataset;
use catalog_core::{ApplicationError, CatalogView, Dataset};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            correlation_id: None,
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps a load failure onto the command payload, keeping the exit codes stable per class.
    /// Each failure gets a fresh correlation id that also lands in the logs.
    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let correlation_id = new_correlation_id(command);
        let interface = error.into_interface(correlation_id.clone());
        let exit_code = match interface.error_class() {
            "config_validation" => 2,
            "dataset_load" => 3,
            _ => 4,
        };
        warn!(
            event_name = "catalog.command.failed",
            command,
            correlation_id = %correlation_id,
            error_class = interface.error_class(),
            error = %interface,
            "command failed"
        );

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(interface.error_class().to_string()),
            correlation_id: Some(correlation_id),
            message: format!("{}: {interface}", interface.user_message()),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn new_correlation_id(command: &str) -> String {
    format!("{command}-{}", Uuid::new_v4().simple())
}

/// Reads the configured dataset, or the built-in demo records when none is configured.
pub fn load_dataset(config: &AppConfig) -> Result<Dataset, ApplicationError> {
    match &config.dataset.path {
        Some(path) => Ok(Dataset::load(path)?),
        None => {
            info!(event_name = "catalog.dataset.demo_selected", "no dataset path configured");
            Ok(demo_dataset())
        }
    }
}

pub fn load_view(config: &AppConfig) -> Result<CatalogView, ApplicationError> {
    let dataset = load_dataset(config)?;
    Ok(CatalogView::load(dataset)?)
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
