//! Alert data models
//!
//! Alerts are produced by feeds and only ever arrive through the fixture load.
//! The only field that changes afterwards is `read`.

use super::feed::FeedId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an alert
pub type AlertId = String;

/// Importance level of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    /// Needs attention now
    High,
    /// Worth a look
    Medium,
    /// Background noise
    Low,
}

impl Importance {
    /// Convert the importance to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::High => "high",
            Importance::Medium => "medium",
            Importance::Low => "low",
        }
    }

    /// Parse an importance level, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Some(Importance::High),
            "medium" => Some(Importance::Medium),
            "low" => Some(Importance::Low),
            _ => None,
        }
    }
}

/// Kind of source an alert came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Public web page
    Web,
    /// Uploaded or connected document
    Document,
}

/// Where an alert came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSource {
    /// Kind of source
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Human-readable source name
    pub name: String,
    /// Link to the source, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A timestamped notification raised by a feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Unique identifier for the alert
    pub id: AlertId,
    /// Feed that raised the alert
    pub feed_id: FeedId,
    /// Copy of the feed's name at the time the alert was raised
    pub feed_name: String,
    /// Headline
    pub title: String,
    /// Short description
    pub summary: String,
    /// Importance level
    pub importance: Importance,
    /// Whether the user has seen it
    pub read: bool,
    /// When the alert was raised
    pub timestamp: DateTime<Utc>,
    /// Origin of the alert
    pub source: AlertSource,
}
