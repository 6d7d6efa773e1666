// Application state management
// Contains session, feeds, alerts, filters, saved views, selection and wizard state

use super::action::Action;
use super::alert::{Alert, Importance};
use super::bag::{FilterSet, SetupState};
use super::feed::{Feed, FeedId, FeedPatch};
use super::session::{Session, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A named snapshot of a filter set ("board")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    /// Unique identifier for the view
    pub id: String,
    /// Display name (may repeat across views)
    pub name: String,
    /// Filters captured when the view was saved
    pub filters: FilterSet,
}

impl SavedView {
    /// Generate a new unique ID for a saved view
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Main application state
///
/// Fields are private: every change goes through [`AppState::apply`], which is
/// the only place transitions happen. Reads go through the accessors below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    session: Session,
    is_loading: bool,
    user_feeds: Vec<Feed>,
    alerts: Vec<Alert>,
    current_filters: FilterSet,
    saved_views: Vec<SavedView>,
    selected_feed_id: Option<FeedId>,
    /// Projection of `selected_feed_id`, refreshed by selection-relevant transitions
    selected_feed: Option<Feed>,
    is_alerts_modal_open: bool,
    setup_state: SetupState,
    connected_apps: BTreeSet<String>,
}

impl AppState {
    /// Create a new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action in place
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::LoginStarted => {
                self.is_loading = true;
            }
            Action::LoginSucceeded {
                user,
                feeds,
                alerts,
            } => self.sign_in(user, feeds, alerts),
            Action::LoginFailed => {
                self.is_loading = false;
            }
            Action::Logout => self.sign_out(),
            Action::SetFilters(filters) => {
                self.current_filters = filters;
            }
            Action::AddSavedView { id, name } => {
                if self.saved_view(&id).is_some() {
                    return;
                }
                self.saved_views.push(SavedView {
                    id,
                    name,
                    filters: self.current_filters.clone(),
                });
            }
            Action::RemoveSavedView(id) => {
                self.saved_views.retain(|view| view.id != id);
            }
            Action::ApplySavedView(id) => {
                if let Some(filters) = self.saved_view(&id).map(|view| view.filters.clone()) {
                    self.current_filters = filters;
                }
            }
            Action::SelectFeed(id) => {
                self.is_alerts_modal_open = id.is_some();
                self.selected_feed_id = id;
                self.refresh_selected_feed();
            }
            Action::MarkAlertRead(id) => {
                if let Some(alert) = self.alerts.iter_mut().find(|alert| alert.id == id) {
                    alert.read = true;
                }
            }
            Action::MarkAllAlertsRead => {
                for alert in &mut self.alerts {
                    alert.read = true;
                }
            }
            Action::ToggleAlertsModal => {
                self.is_alerts_modal_open = !self.is_alerts_modal_open;
            }
            Action::UpdateSetupState(partial) => {
                self.setup_state.merge(partial);
            }
            Action::ResetSetupState => {
                self.setup_state.clear();
            }
            Action::ToggleConnectedApp(app_id) => {
                if !self.connected_apps.remove(&app_id) {
                    self.connected_apps.insert(app_id);
                }
            }
            Action::AddFeed(feed) => {
                // Feed ids are unique within the collection
                if self.feed(&feed.id).is_none() {
                    self.user_feeds.push(*feed);
                }
            }
            Action::UpdateFeed(patch) => self.patch_feed(&patch),
            Action::RemoveFeed(id) => self.delete_feed(&id),
        }
    }

    /// Pure form of [`AppState::apply`]: consume the state, return the next one
    pub fn reduced(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }

    fn sign_in(&mut self, user: User, feeds: Vec<Feed>, alerts: Vec<Alert>) {
        self.session = Session::signed_in(user);
        // Fixture data overwrites any in-session edits
        self.user_feeds = feeds;
        self.alerts = alerts;
        self.is_loading = false;
        self.refresh_selected_feed();
    }

    // Alerts intentionally survive logout
    fn sign_out(&mut self) {
        self.session = Session::default();
        self.is_loading = false;
        self.user_feeds.clear();
        self.saved_views.clear();
        self.selected_feed_id = None;
        self.selected_feed = None;
        self.is_alerts_modal_open = false;
    }

    fn patch_feed(&mut self, patch: &FeedPatch) {
        let Some(feed) = self.user_feeds.iter_mut().find(|feed| feed.id == patch.id) else {
            return;
        };
        feed.apply_patch(patch);

        if let Some(name) = &patch.name {
            for alert in self.alerts.iter_mut().filter(|alert| alert.feed_id == patch.id) {
                alert.feed_name = name.clone();
            }
        }

        if let Some(selected) = self.selected_feed.as_mut() {
            if selected.id == patch.id {
                *selected = feed.clone();
            }
        }
    }

    /// Clears the `selected_feed` projection when it points at the deleted feed,
    /// but leaves `selected_feed_id` as is.
    fn delete_feed(&mut self, id: &str) {
        self.user_feeds.retain(|feed| feed.id != id);
        if self.selected_feed.as_ref().is_some_and(|feed| feed.id == id) {
            self.selected_feed = None;
        }
    }

    fn refresh_selected_feed(&mut self) {
        self.selected_feed = self
            .selected_feed_id
            .as_deref()
            .and_then(|id| self.feed(id))
            .cloned();
    }

    /// Current session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a user is signed in
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in
    }

    /// Signed-in user, if any
    pub fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    /// Whether a login is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The user's feeds, in insertion order
    pub fn user_feeds(&self) -> &[Feed] {
        &self.user_feeds
    }

    /// Look up a feed by id
    pub fn feed(&self, id: &str) -> Option<&Feed> {
        self.user_feeds.iter().find(|feed| feed.id == id)
    }

    /// All alerts
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Alerts raised by a given feed
    pub fn alerts_for_feed(&self, feed_id: &str) -> Vec<&Alert> {
        self.alerts
            .iter()
            .filter(|alert| alert.feed_id == feed_id)
            .collect()
    }

    /// Alerts matching the current `importance` filter
    ///
    /// A missing or unrecognised importance value (e.g. `"all"`) matches everything.
    pub fn filtered_alerts(&self) -> Vec<&Alert> {
        let importance = self.current_filters.importance().and_then(Importance::parse);
        self.alerts
            .iter()
            .filter(|alert| importance.map_or(true, |level| alert.importance == level))
            .collect()
    }

    /// Number of unread alerts
    pub fn unread_alert_count(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.read).count()
    }

    /// Current filters
    pub fn current_filters(&self) -> &FilterSet {
        &self.current_filters
    }

    /// Saved views, in insertion order
    pub fn saved_views(&self) -> &[SavedView] {
        &self.saved_views
    }

    /// Look up a saved view by id
    pub fn saved_view(&self, id: &str) -> Option<&SavedView> {
        self.saved_views.iter().find(|view| view.id == id)
    }

    /// Id passed to the last `SelectFeed`; may point at a feed that no longer exists
    pub fn selected_feed_id(&self) -> Option<&str> {
        self.selected_feed_id.as_deref()
    }

    /// The selected feed
    pub fn selected_feed(&self) -> Option<&Feed> {
        self.selected_feed.as_ref()
    }

    /// Whether the alerts modal is open
    pub fn is_alerts_modal_open(&self) -> bool {
        self.is_alerts_modal_open
    }

    /// Accumulated setup-wizard state
    pub fn setup_state(&self) -> &SetupState {
        &self.setup_state
    }

    /// Connected app ids, sorted
    pub fn connected_apps(&self) -> &BTreeSet<String> {
        &self.connected_apps
    }

    /// Whether an app is connected
    pub fn is_app_connected(&self, app_id: &str) -> bool {
        self.connected_apps.contains(app_id)
    }
}
