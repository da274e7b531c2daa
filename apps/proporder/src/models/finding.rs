//! Findings reported by the `css-property-order` rule.

use serde::Serialize;

/// Rule identifier used in reports.
pub const RULE_ID: &str = "css-property-order";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Kind of finding, mirrored in output as `messageId`.
pub enum MessageId {
    ShouldSortProperties,
    InvalidFormat,
}

impl MessageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageId::ShouldSortProperties => "shouldSortProperties",
            MessageId::InvalidFormat => "invalidFormat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A text replacement over the byte range `[range.0, range.1)`.
pub struct Fix {
    pub range: (usize, usize),
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One finding with its anchor byte range and optional fix.
pub struct Finding {
    #[serde(rename = "messageId")]
    pub message_id: MessageId,
    pub range: (usize, usize),
    pub message: String,
    pub fix: Option<Fix>,
}
