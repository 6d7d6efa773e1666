//! Fixture data provider
//!
//! Feeds and alerts are static mock data. After every login the store seeds
//! its state from a `FixtureProvider`, overwriting whatever was there.

use crate::error::AppError;
use crate::state::{Alert, Feed};
use serde::Deserialize;

/// Mock data bundled with the crate
const MOCK_DATA: &str = include_str!("../fixtures/mock_data.json");

/// Feeds and alerts used to seed the state
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureData {
    /// Fixture feeds
    pub feeds: Vec<Feed>,
    /// Fixture alerts
    pub alerts: Vec<Alert>,
}

/// Source of fixture data
pub trait FixtureProvider: Send + Sync {
    /// Return a fresh copy of the fixture feeds and alerts
    fn load(&self) -> Result<FixtureData, AppError>;
}

/// Provider backed by the bundled `mock_data.json`
#[derive(Debug, Clone)]
pub struct StaticFixtures {
    data: FixtureData,
}

impl StaticFixtures {
    /// Parse the bundled mock data
    pub fn bundled() -> Result<Self, AppError> {
        Self::from_json(MOCK_DATA)
    }

    /// Parse fixture data from a JSON document
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let data: FixtureData =
            serde_json::from_str(json).map_err(|e| AppError::Fixtures(e.to_string()))?;
        Ok(Self { data })
    }

    /// Use already-built fixture data
    pub fn from_data(data: FixtureData) -> Self {
        Self { data }
    }

    /// Number of fixture feeds
    pub fn feed_count(&self) -> usize {
        self.data.feeds.len()
    }

    /// Number of fixture alerts
    pub fn alert_count(&self) -> usize {
        self.data.alerts.len()
    }
}

impl FixtureProvider for StaticFixtures {
    fn load(&self) -> Result<FixtureData, AppError> {
        Ok(self.data.clone())
    }
}
