pub mod config;
pub mod doctor;
pub mod fonts;
pub mod history;
pub mod locations;
pub mod metadata;
pub mod migrate;
pub mod propose;
pub mod seed;

use deckhand_slack::MessageTemplate;
use serde::Serialize;

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
    message: String,
    /// Ready-to-post Slack payload, attached when a failure has a
    /// user-facing reply. An upstream deliverer posts it verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    slack: Option<MessageTemplate>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            slack: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

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
            message: message.into(),
            slack: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn failure_with_slack(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
        slack: MessageTemplate,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            slack: Some(slack),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
