use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::footer;

/// Footer update payload. Link columns arrive as JSON values and are stored
/// serialized as text.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct FooterRequest {
    #[serde(default)]
    pub col1_title: String,
    #[serde(default)]
    pub col1_links: Value,
    #[serde(default)]
    pub col2_title: String,
    #[serde(default)]
    pub col2_links: Value,
    #[serde(default)]
    pub col3_title: String,
    #[serde(default)]
    pub col3_links: Value,
    #[serde(default)]
    pub socials: Value,
    #[serde(default)]
    pub copyright_text: String,
}

/// Footer with the JSON columns parsed for the public API.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FooterResponse {
    pub col1_title: String,
    pub col1_links: Value,
    pub col2_title: String,
    pub col2_links: Value,
    pub col3_title: String,
    pub col3_links: Value,
    pub socials: Value,
    pub copyright_text: String,
}

/// Parse a stored JSON column, falling back when the text is malformed.
fn parse_or(text: &str, fallback: Value) -> Value {
    serde_json::from_str(text).unwrap_or(fallback)
}

impl From<footer::Model> for FooterResponse {
    fn from(model: footer::Model) -> Self {
        Self {
            col1_title: model.col1_title,
            col1_links: parse_or(&model.col1_links, Value::Array(vec![])),
            col2_title: model.col2_title,
            col2_links: parse_or(&model.col2_links, Value::Array(vec![])),
            col3_title: model.col3_title,
            col3_links: parse_or(&model.col3_links, Value::Array(vec![])),
            socials: parse_or(&model.socials, Value::Object(Default::default())),
            copyright_text: model.copyright_text,
        }
    }
}
