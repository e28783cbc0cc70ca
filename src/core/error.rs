//! Harness error type.
//!
//! Deferral is not an error and never appears here: a policy that declines
//! returns `PolicyResult::Deferred`. Everything in `HarnessError` is fatal
//! for the scenario that hit it.

use thiserror::Error;

use crate::protocol::MessageKind;

/// Fatal harness conditions.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// `advance` or `checkpoint` called after the duel terminated.
    #[error("duel has already ended")]
    DuelEnded,

    /// The engine asked for a response to a message that cannot take one.
    #[error("expected a response-capable message, but got {kind}")]
    NotResponseCapable { kind: MessageKind },

    /// A checkpoint asserted a message kind that is not the pending one.
    #[error("expected message of type [{expected}], but got [{found}]")]
    UnexpectedMessage {
        expected: MessageKind,
        found: String,
    },

    /// A checkpoint was reached before any response-capable message.
    #[error("no response-capable message is pending")]
    NoPendingMessage,

    /// Faults reported by the engine since the last boundary.
    #[error("{}", format_script_errors(.0))]
    ScriptErrors(Vec<String>),

    /// A card-handle operation does not apply to the current message.
    #[error("unsupported current message {kind} for {operation}")]
    UnsupportedMessage {
        operation: &'static str,
        kind: String,
    },

    /// The card is not offered by the current message.
    #[error("this card is not selectable in the current message")]
    NotSelectable,

    /// A payload that cannot be encoded as a response to the message.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Replay log encoding or decoding failed.
    #[error("replay log codec: {0}")]
    Replay(#[from] bincode::Error),

    /// The backend failed to create or drive a duel.
    #[error("engine: {0}")]
    Engine(String),
}

fn format_script_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("Script Error: {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result alias used throughout the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_errors_one_per_line() {
        let err = HarnessError::ScriptErrors(vec!["a.lua:1".into(), "b.lua:2".into()]);
        assert_eq!(err.to_string(), "Script Error: a.lua:1\nScript Error: b.lua:2");
    }

    #[test]
    fn test_unexpected_message_display() {
        let err = HarnessError::UnexpectedMessage {
            expected: MessageKind::SelectCard,
            found: "SelectChain".into(),
        };
        assert_eq!(
            err.to_string(),
            "expected message of type [SelectCard], but got [SelectChain]"
        );
    }
}
