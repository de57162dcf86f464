//! The uniform result returned for every tool invocation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

/// `{content: [{type: "text", text}], isError}`. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    content: Vec<Content>,
    is_error: bool,
}

impl ResponseEnvelope {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: true,
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// The single text block.
    pub fn text(&self) -> &str {
        match self.content.first() {
            | Some(Content::Text { text }) => text,
            | None => "",
        }
    }
}
