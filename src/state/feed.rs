//! Feed model
//!
//! Defines tracked feeds and the partial shapes used to create and patch them.
//!
//! A feed is a named query the dashboard watches. Feeds are created from a
//! `FeedDraft` (every field optional) and changed through a `FeedPatch`
//! (merge-patch keyed by id).

use super::bag::{keys, SetupState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a feed
pub type FeedId = String;

/// Feed type enumeration
/// Describes what kind of topic a feed tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    /// Tracks a named competitor
    Competitor,
    /// Tracks a market segment
    Market,
    /// Tracks an emerging trend
    Trend,
    /// Free-form query
    #[default]
    Custom,
}

impl FeedType {
    /// Get a display name for the feed type
    pub fn display_name(&self) -> &'static str {
        match self {
            FeedType::Competitor => "Competitor",
            FeedType::Market => "Market",
            FeedType::Trend => "Trend",
            FeedType::Custom => "Custom",
        }
    }

    /// Map a setup-wizard persona onto a feed type
    /// Unknown personas fall back to `Custom`
    pub fn from_persona(persona: &str) -> Self {
        match persona.to_ascii_lowercase().as_str() {
            "competitor" => FeedType::Competitor,
            "market" => FeedType::Market,
            "trend" => FeedType::Trend,
            _ => FeedType::Custom,
        }
    }
}

/// Feed status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    /// Feed is collecting
    #[default]
    Active,
    /// Feed was paused by the user
    Paused,
    /// Feed failed to collect
    Error,
}

/// Share of documents per source kind, in percent
///
/// The three values are not required to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SourceMix {
    /// Percentage of web sources
    pub web: f64,
    /// Percentage of uploaded documents
    pub docs: f64,
    /// Percentage of everything else
    pub other: f64,
}

/// Where and how often a feed delivers its output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format (e.g. "summary", "battlecard")
    pub format: String,
    /// Delivery frequency (e.g. "daily", "weekly")
    pub frequency: String,
    /// Delivery channel (e.g. "email", "slack")
    pub channel: String,
}

/// A tracked feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    /// Unique identifier for the feed
    pub id: FeedId,
    /// Display name of the feed
    pub name: String,
    /// Query the feed tracks
    pub query: String,
    /// Kind of topic tracked
    #[serde(rename = "type")]
    pub feed_type: FeedType,
    /// Current status
    pub status: FeedStatus,
    /// When the feed was created
    pub created_at: DateTime<Utc>,
    /// When the feed last produced anything
    pub last_activity: DateTime<Utc>,
    /// Latest snippet shown on the feed card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Source breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mix: Option<SourceMix>,
    /// Number of alerts raised by this feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts_count: Option<u32>,
    /// Number of documents collected by this feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_count: Option<u32>,
    /// Output delivery settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_config: Option<OutputConfig>,
}

impl Feed {
    /// Generate a new unique ID for a feed
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> FeedId {
        Uuid::new_v4().to_string()
    }

    /// Build a complete feed from a draft
    ///
    /// Assigns a fresh id, stamps both timestamps with `now` and fills the
    /// defaults: `custom` type, `active` status and zero counts.
    pub fn from_draft(draft: FeedDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::generate_id(),
            name: draft.name.unwrap_or_default(),
            query: draft.query.unwrap_or_default(),
            feed_type: draft.feed_type.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            created_at: now,
            last_activity: now,
            snippet: draft.snippet,
            source_mix: draft.source_mix,
            alerts_count: Some(draft.alerts_count.unwrap_or(0)),
            documents_count: Some(draft.documents_count.unwrap_or(0)),
            output_config: draft.output_config,
        }
    }

    /// Merge a patch into this feed
    /// Fields absent from the patch are left unchanged; the id never changes
    pub fn apply_patch(&mut self, patch: &FeedPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(query) = &patch.query {
            self.query = query.clone();
        }
        if let Some(feed_type) = patch.feed_type {
            self.feed_type = feed_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
        if let Some(last_activity) = patch.last_activity {
            self.last_activity = last_activity;
        }
        if let Some(snippet) = &patch.snippet {
            self.snippet = Some(snippet.clone());
        }
        if let Some(source_mix) = patch.source_mix {
            self.source_mix = Some(source_mix);
        }
        if let Some(alerts_count) = patch.alerts_count {
            self.alerts_count = Some(alerts_count);
        }
        if let Some(documents_count) = patch.documents_count {
            self.documents_count = Some(documents_count);
        }
        if let Some(output_config) = &patch.output_config {
            self.output_config = Some(output_config.clone());
        }
    }
}

/// Partial feed used by `add_feed` / `create_feed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedDraft {
    /// Display name
    pub name: Option<String>,
    /// Query to track
    pub query: Option<String>,
    /// Kind of topic (defaults to custom)
    #[serde(rename = "type")]
    pub feed_type: Option<FeedType>,
    /// Initial status (defaults to active)
    pub status: Option<FeedStatus>,
    /// Initial snippet
    pub snippet: Option<String>,
    /// Source breakdown
    pub source_mix: Option<SourceMix>,
    /// Initial alert count (defaults to 0)
    pub alerts_count: Option<u32>,
    /// Initial document count (defaults to 0)
    pub documents_count: Option<u32>,
    /// Output delivery settings
    pub output_config: Option<OutputConfig>,
}

impl FeedDraft {
    /// Draft with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Turn accumulated setup-wizard state into a draft
    ///
    /// The name comes from `name`, falling back to `query`; the type is mapped
    /// from `persona`; `output` is read as an output config when it has that shape.
    pub fn from_setup(setup: &SetupState) -> Self {
        let query = setup.query().map(str::to_string);
        let name = setup
            .get_str(keys::NAME)
            .map(str::to_string)
            .or_else(|| query.clone());
        let output_config = setup
            .get(keys::OUTPUT)
            .filter(|value| value.is_object())
            .and_then(|value| serde_json::from_value(value.clone()).ok());

        Self {
            name,
            query,
            feed_type: setup.persona().map(FeedType::from_persona),
            output_config,
            ..Default::default()
        }
    }

    /// Set the query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the feed type
    pub fn with_type(mut self, feed_type: FeedType) -> Self {
        self.feed_type = Some(feed_type);
        self
    }
}

/// Merge-patch for an existing feed, matched by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedPatch {
    /// Id of the feed to patch
    pub id: FeedId,
    /// New name
    pub name: Option<String>,
    /// New query
    pub query: Option<String>,
    /// New type
    #[serde(rename = "type")]
    pub feed_type: Option<FeedType>,
    /// New status
    pub status: Option<FeedStatus>,
    /// New creation timestamp
    pub created_at: Option<DateTime<Utc>>,
    /// New last-activity timestamp
    pub last_activity: Option<DateTime<Utc>>,
    /// New snippet
    pub snippet: Option<String>,
    /// New source breakdown
    pub source_mix: Option<SourceMix>,
    /// New alert count
    pub alerts_count: Option<u32>,
    /// New document count
    pub documents_count: Option<u32>,
    /// New output settings
    pub output_config: Option<OutputConfig>,
}

impl FeedPatch {
    /// Empty patch for the given feed
    pub fn for_feed(id: impl Into<FeedId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl From<Feed> for FeedPatch {
    fn from(feed: Feed) -> Self {
        Self {
            id: feed.id,
            name: Some(feed.name),
            query: Some(feed.query),
            feed_type: Some(feed.feed_type),
            status: Some(feed.status),
            created_at: Some(feed.created_at),
            last_activity: Some(feed.last_activity),
            snippet: feed.snippet,
            source_mix: feed.source_mix,
            alerts_count: feed.alerts_count,
            documents_count: feed.documents_count,
            output_config: feed.output_config,
        }
    }
}
