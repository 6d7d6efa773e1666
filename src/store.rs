//! Application state store
//!
//! `AppStore` owns the `AppState` and is the only mutation surface. Every
//! operation takes the write lock, applies one or more actions and releases it,
//! so transitions never interleave. `login` is the one operation that suspends:
//! it drops the lock across the credential exchange, which leaves concurrent
//! logins unguarded (the last one to finish wins).

use crate::auth::{Authenticator, SimulatedAuthenticator};
use crate::config::Config;
use crate::error::AppError;
use crate::fixtures::{FixtureProvider, StaticFixtures};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::state::{
    Action, AppState, FeedDraft, FeedPatch, FileIdentityStore, FilterSet, IdentityStore,
    SavedView, SetupState, User,
};
use crate::state::{Feed, FeedId};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Collaborators the store talks to
#[derive(Clone)]
pub struct StoreServices {
    /// Storage for the current-user record
    pub identity: Arc<dyn IdentityStore>,
    /// Source of fixture feeds and alerts
    pub fixtures: Arc<dyn FixtureProvider>,
    /// Credential exchange
    pub authenticator: Arc<dyn Authenticator>,
    /// Toast surface
    pub notifier: Arc<dyn Notifier>,
}

impl StoreServices {
    /// Default services for the given configuration
    ///
    /// File-backed identity, bundled fixtures, simulated login latency and
    /// log-based notifications.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            identity: Arc::new(FileIdentityStore::new(config.identity_path())),
            fixtures: Arc::new(StaticFixtures::bundled()?),
            authenticator: Arc::new(SimulatedAuthenticator::new(config.auth.login_delay)),
            notifier: Arc::new(TracingNotifier),
        })
    }
}

/// The application state store
#[derive(Clone)]
pub struct AppStore {
    state: Arc<RwLock<AppState>>,
    services: StoreServices,
}

impl AppStore {
    /// Build the store and run the startup bootstrap
    ///
    /// When an identity is stored, the session is restored and fixture data is
    /// loaded. A store is bootstrapped exactly once, here.
    pub fn bootstrap(services: StoreServices) -> Self {
        let mut state = AppState::new();

        match services.identity.load() {
            Ok(Some(user)) => match services.fixtures.load() {
                Ok(data) => {
                    info!(
                        user = %user.email,
                        feeds = data.feeds.len(),
                        alerts = data.alerts.len(),
                        "Restored session from stored identity"
                    );
                    state.apply(Action::LoginSucceeded {
                        user,
                        feeds: data.feeds,
                        alerts: data.alerts,
                    });
                }
                Err(e) => warn!(error = %e, "Failed to load fixtures, starting signed out"),
            },
            Ok(None) => debug!("No stored identity, starting signed out"),
            Err(e) => warn!(error = %e, "Failed to read stored identity"),
        }

        Self {
            state: Arc::new(RwLock::new(state)),
            services,
        }
    }

    /// Bootstrap with the default services for `config`
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::bootstrap(StoreServices::from_config(config)?))
    }

    /// Apply an action
    ///
    /// Crate-private: callers go through the named operations, which also handle
    /// identity persistence and notifications.
    pub(crate) async fn dispatch(&self, action: Action) {
        debug!(action = action.name(), "Dispatching action");
        self.state.write().await.apply(action);
    }

    /// Apply an action, reading the state right before it under the same lock
    async fn dispatch_inspect<R>(
        &self,
        action: Action,
        inspect: impl FnOnce(&AppState) -> R,
    ) -> R {
        debug!(action = action.name(), "Dispatching action");
        let mut state = self.state.write().await;
        let seen = inspect(&*state);
        state.apply(action);
        seen
    }

    /// Run a read-only closure against the current state
    pub async fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&*self.state.read().await)
    }

    /// Clone of the whole current state
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Sign in
    ///
    /// Raises the loading flag, waits for the credential exchange, then installs
    /// the session, persists the identity and reloads fixture feeds and alerts
    /// (discarding in-session edits). On failure the loading flag is cleared, the
    /// session is left untouched, a notification is sent and the error returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        self.dispatch(Action::LoginStarted).await;

        let outcome = async {
            let user = self.services.authenticator.authenticate(email, password).await?;
            let data = self.services.fixtures.load()?;
            Ok::<_, AppError>((user, data))
        }
        .await;

        match outcome {
            Ok((user, data)) => {
                if let Err(e) = self.services.identity.save(&user) {
                    warn!(error = %e, "Failed to persist identity");
                }
                info!(
                    user = %user.email,
                    feeds = data.feeds.len(),
                    alerts = data.alerts.len(),
                    "User logged in"
                );
                self.dispatch(Action::LoginSucceeded {
                    user: user.clone(),
                    feeds: data.feeds,
                    alerts: data.alerts,
                })
                .await;
                self.services.notifier.notify(Notification::LoggedIn {
                    name: user.name.clone(),
                });
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.dispatch(Action::LoginFailed).await;
                self.services.notifier.notify(Notification::LoginFailed {
                    message: e.user_message(),
                });
                Err(e)
            }
        }
    }

    /// Sign out
    ///
    /// Clears the session, feeds, saved views and selection, and removes the
    /// stored identity. Alerts stay in memory.
    pub async fn logout(&self) {
        if let Err(e) = self.services.identity.clear() {
            warn!(error = %e, "Failed to clear stored identity");
        }
        self.dispatch(Action::Logout).await;
        info!("User logged out");
        self.services.notifier.notify(Notification::LoggedOut);
    }

    /// Replace the current filters wholesale
    pub async fn set_filters(&self, filters: FilterSet) {
        self.dispatch(Action::SetFilters(filters)).await;
    }

    /// Save the current filters as a named view, returning its id
    pub async fn add_saved_view(&self, name: &str) -> String {
        let id = SavedView::generate_id();
        self.dispatch(Action::AddSavedView {
            id: id.clone(),
            name: name.to_string(),
        })
        .await;
        self.services.notifier.notify(Notification::ViewSaved {
            name: name.to_string(),
        });
        id
    }

    /// Remove a saved view; unknown ids are ignored
    pub async fn remove_saved_view(&self, id: &str) {
        self.dispatch(Action::RemoveSavedView(id.to_string())).await;
    }

    /// Replace the current filters with a saved view's filters; unknown ids are ignored
    pub async fn apply_saved_view(&self, id: &str) {
        self.dispatch(Action::ApplySavedView(id.to_string())).await;
    }

    /// Select a feed, or clear the selection with `None`
    pub async fn select_feed(&self, id: Option<&str>) {
        self.dispatch(Action::SelectFeed(id.map(str::to_string))).await;
    }

    /// Mark one alert read; unknown ids are ignored
    pub async fn mark_alert_read(&self, id: &str) {
        self.dispatch(Action::MarkAlertRead(id.to_string())).await;
    }

    /// Mark every alert read
    pub async fn mark_all_alerts_read(&self) {
        self.dispatch(Action::MarkAllAlertsRead).await;
    }

    /// Flip the alerts modal without touching the selection
    pub async fn toggle_alerts_modal(&self) {
        self.dispatch(Action::ToggleAlertsModal).await;
    }

    /// Shallow-merge into the setup-wizard state
    pub async fn update_setup_state(&self, partial: SetupState) {
        self.dispatch(Action::UpdateSetupState(partial)).await;
    }

    /// Empty the setup-wizard state
    pub async fn reset_setup_state(&self) {
        self.dispatch(Action::ResetSetupState).await;
    }

    /// Connect the app if it is disconnected, disconnect it otherwise
    pub async fn toggle_connected_app(&self, app_id: &str) {
        self.dispatch(Action::ToggleConnectedApp(app_id.to_string()))
            .await;
    }

    /// Create a feed from a draft and return it
    pub async fn add_feed(&self, draft: FeedDraft) -> Feed {
        let feed = Feed::from_draft(draft, Utc::now());
        self.dispatch(Action::AddFeed(Box::new(feed.clone()))).await;
        self.services.notifier.notify(Notification::FeedCreated {
            name: feed.name.clone(),
        });
        feed
    }

    /// Same as [`AppStore::add_feed`]
    pub async fn create_feed(&self, draft: FeedDraft) -> Feed {
        self.add_feed(draft).await
    }

    /// Merge-patch an existing feed; unknown ids are ignored
    pub async fn update_feed(&self, patch: FeedPatch) {
        self.dispatch(Action::UpdateFeed(patch)).await;
    }

    /// Delete a feed; unknown ids are ignored
    ///
    /// `selected_feed` is cleared if it was this feed, `selected_feed_id` is not.
    pub async fn remove_feed(&self, id: &str) {
        let existed = self
            .dispatch_inspect(Action::RemoveFeed(id.to_string()), |state| {
                state.feed(id).is_some()
            })
            .await;
        if existed {
            self.services
                .notifier
                .notify(Notification::FeedDeleted { id: id.to_string() });
        }
    }

    /// Same as [`AppStore::remove_feed`]
    pub async fn delete_feed(&self, id: &str) {
        self.remove_feed(id).await;
    }

    /// Finish the setup wizard
    ///
    /// Builds a feed from the accumulated setup state, adds it, and empties the
    /// setup state in the same transition.
    pub async fn complete_setup(&self) -> Feed {
        let feed = {
            let mut state = self.state.write().await;
            let feed = Feed::from_draft(FeedDraft::from_setup(state.setup_state()), Utc::now());
            debug!(feed_id = %feed.id, "Completing setup");
            state.apply(Action::AddFeed(Box::new(feed.clone())));
            state.apply(Action::ResetSetupState);
            feed
        };

        info!(feed_id = %feed.id, feed = %feed.name, "Setup completed");
        self.services.notifier.notify(Notification::FeedCreated {
            name: feed.name.clone(),
        });
        feed
    }

    /// Look up a feed by id
    pub async fn feed(&self, id: &str) -> Option<Feed> {
        self.read(|state| state.feed(id).cloned()).await
    }

    /// Number of unread alerts
    pub async fn unread_alert_count(&self) -> usize {
        self.read(AppState::unread_alert_count).await
    }

    /// Ids of all feeds, in insertion order
    pub async fn feed_ids(&self) -> Vec<FeedId> {
        self.read(|state| state.user_feeds().iter().map(|f| f.id.clone()).collect())
            .await
    }
}
