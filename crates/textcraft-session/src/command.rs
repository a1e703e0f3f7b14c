/// Wire types for the command boundary.
///
/// Requests arrive as `{action, data?}`; mutating commands answer with
/// `{success, error?}` and stat queries with `{words, chars, lines}`.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use textcraft_core::{TextStats, TransformKind};

/// Error reported when the action name is not recognized (or its payload
/// is malformed).
pub const ERR_UNKNOWN_ACTION: &str = "Unknown action";

/// Error reported when a command needs a surface and none is attached.
pub const ERR_NO_TEXT_ELEMENT: &str = "No text element found";

/// A raw incoming request, before the action name is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    pub action: String,
    #[serde(default)]
    pub data: Value,
}

impl CommandRequest {
    /// Builds a payload-free request (undo, redo, getStats).
    pub fn bare(action: &str) -> Self {
        Self {
            action: action.to_string(),
            data: Value::Null,
        }
    }
}

/// A validated command the session knows how to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    Transform(TransformKind),
    Restore(String),
    GetStats,
}

impl Command {
    /// Parses a raw request.
    ///
    /// `None` means the request must be answered with "Unknown action":
    /// either the action name is unrecognized or its payload does not
    /// carry what the action needs.
    pub fn parse(request: &CommandRequest) -> Option<Self> {
        match request.action.as_str() {
            "undo" => Some(Self::Undo),
            "redo" => Some(Self::Redo),
            "getStats" => Some(Self::GetStats),
            "transform" => {
                let kind = request.data.get("type")?.as_str()?;
                kind.parse().ok().map(Self::Transform)
            }
            "restore" => {
                let text = request.data.get("text")?.as_str()?;
                Some(Self::Restore(text.to_string()))
            }
            _ => None,
        }
    }
}

/// What goes back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandResponse {
    /// Result of a mutating command. `success: true` covers accepted
    /// no-ops (undo at oldest, redo at newest).
    Ack {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// Result of a stats query.
    Stats(TextStats),
}

impl CommandResponse {
    /// The command was accepted (it may still have had no effect).
    pub fn ok() -> Self {
        Self::Ack {
            success: true,
            error: None,
        }
    }

    /// The command was rejected with the given reason.
    pub fn err(message: impl Into<String>) -> Self {
        Self::Ack {
            success: false,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_actions() {
        assert_eq!(Command::parse(&CommandRequest::bare("undo")), Some(Command::Undo));
        assert_eq!(Command::parse(&CommandRequest::bare("redo")), Some(Command::Redo));
        assert_eq!(
            Command::parse(&CommandRequest::bare("getStats")),
            Some(Command::GetStats)
        );
    }

    #[test]
    fn test_parse_transform() {
        let request: CommandRequest =
            serde_json::from_value(json!({"action": "transform", "data": {"type": "uppercase"}}))
                .expect("deserialize");
        assert_eq!(
            Command::parse(&request),
            Some(Command::Transform(TransformKind::Uppercase))
        );
    }

    #[test]
    fn test_parse_restore() {
        let request: CommandRequest =
            serde_json::from_value(json!({"action": "restore", "data": {"text": "old draft"}}))
                .expect("deserialize");
        assert_eq!(
            Command::parse(&request),
            Some(Command::Restore("old draft".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_action_is_none() {
        assert!(Command::parse(&CommandRequest::bare("explode")).is_none());
    }

    #[test]
    fn test_parse_transform_without_payload_is_none() {
        assert!(Command::parse(&CommandRequest::bare("transform")).is_none());

        let bad_kind: CommandRequest =
            serde_json::from_value(json!({"action": "transform", "data": {"type": "spongebob"}}))
                .expect("deserialize");
        assert!(Command::parse(&bad_kind).is_none());
    }

    #[test]
    fn test_parse_restore_without_text_is_none() {
        let request: CommandRequest =
            serde_json::from_value(json!({"action": "restore", "data": {}})).expect("deserialize");
        assert!(Command::parse(&request).is_none());
    }

    #[test]
    fn test_ok_response_omits_error_field() {
        let json = serde_json::to_string(&CommandResponse::ok()).expect("serialize");
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn test_err_response_carries_message() {
        let json =
            serde_json::to_string(&CommandResponse::err(ERR_UNKNOWN_ACTION)).expect("serialize");
        assert_eq!(json, r#"{"success":false,"error":"Unknown action"}"#);
    }

    #[test]
    fn test_stats_response_shape() {
        let response = CommandResponse::Stats(TextStats::of("Hello world\nfoo"));
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json, json!({"words": 3, "chars": 15, "lines": 2}));
    }
}
