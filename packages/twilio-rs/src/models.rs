use serde::Deserialize;

/// Subset of the Message resource returned by the Messaging API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: String,
    pub to: String,
    #[serde(rename = "from")]
    pub from_number: String,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}
