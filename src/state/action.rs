//! Typed state actions
//!
//! Every synchronous transition of `AppState` has a matching `Action`.
//! Login is the exception: it suspends, so it lives on `AppStore` and
//! finishes by applying `Action::LoginSucceeded`.

use super::alert::{Alert, AlertId};
use super::bag::{FilterSet, SetupState};
use super::feed::{Feed, FeedId, FeedPatch};
use super::session::User;

/// A state transition request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Login started; raises the loading flag
    LoginStarted,
    /// Credential exchange succeeded; installs the session and fixture data
    LoginSucceeded {
        /// Signed-in user
        user: User,
        /// Fixture feeds to load
        feeds: Vec<Feed>,
        /// Fixture alerts to load
        alerts: Vec<Alert>,
    },
    /// Credential exchange failed; clears the loading flag only
    LoginFailed,
    /// Sign out
    Logout,
    /// Replace the current filters wholesale
    SetFilters(FilterSet),
    /// Save the current filters under a name
    AddSavedView {
        /// Pre-generated id for the new view
        id: String,
        /// View name (not required to be unique)
        name: String,
    },
    /// Remove a saved view
    RemoveSavedView(String),
    /// Replace current filters with a saved view's filters
    ApplySavedView(String),
    /// Select a feed, or clear the selection with `None`
    SelectFeed(Option<FeedId>),
    /// Mark one alert read
    MarkAlertRead(AlertId),
    /// Mark every alert read
    MarkAllAlertsRead,
    /// Flip the alerts modal flag
    ToggleAlertsModal,
    /// Shallow-merge into the setup-wizard state
    UpdateSetupState(SetupState),
    /// Empty the setup-wizard state
    ResetSetupState,
    /// Add or remove a connected app
    ToggleConnectedApp(String),
    /// Insert a feed built from a draft
    AddFeed(Box<Feed>),
    /// Merge-patch an existing feed
    UpdateFeed(FeedPatch),
    /// Delete a feed
    RemoveFeed(FeedId),
}

impl Action {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoginStarted => "login_started",
            Action::LoginSucceeded { .. } => "login_succeeded",
            Action::LoginFailed => "login_failed",
            Action::Logout => "logout",
            Action::SetFilters(_) => "set_filters",
            Action::AddSavedView { .. } => "add_saved_view",
            Action::RemoveSavedView(_) => "remove_saved_view",
            Action::ApplySavedView(_) => "apply_saved_view",
            Action::SelectFeed(_) => "select_feed",
            Action::MarkAlertRead(_) => "mark_alert_read",
            Action::MarkAllAlertsRead => "mark_all_alerts_read",
            Action::ToggleAlertsModal => "toggle_alerts_modal",
            Action::UpdateSetupState(_) => "update_setup_state",
            Action::ResetSetupState => "reset_setup_state",
            Action::ToggleConnectedApp(_) => "toggle_connected_app",
            Action::AddFeed(_) => "add_feed",
            Action::UpdateFeed(_) => "update_feed",
            Action::RemoveFeed(_) => "remove_feed",
        }
    }
}
