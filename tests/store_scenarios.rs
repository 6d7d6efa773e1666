//! Integration tests for the dashboard state store
//!
//! These tests drive `AppStore` through its public operations and check the
//! observable state after each scenario.

use async_trait::async_trait;
use intel_dashboard_core::auth::{Authenticator, SimulatedAuthenticator};
use intel_dashboard_core::config::Config;
use intel_dashboard_core::fixtures::{FixtureProvider, StaticFixtures};
use intel_dashboard_core::notify::RecordingNotifier;
use intel_dashboard_core::state::{
    AppState, FeedDraft, FeedPatch, FeedStatus, IdentityStore, MemoryIdentityStore, PropertyBag,
    User,
};
use intel_dashboard_core::{AppError, AppStore, StoreServices};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

/// Helper to create a signed-out store with in-memory services
fn create_test_store() -> AppStore {
    AppStore::bootstrap(StoreServices {
        identity: Arc::new(MemoryIdentityStore::new()),
        fixtures: Arc::new(StaticFixtures::bundled().unwrap()),
        authenticator: Arc::new(SimulatedAuthenticator::new(Duration::ZERO)),
        notifier: Arc::new(RecordingNotifier::new()),
    })
}

fn fixture_counts() -> (usize, usize) {
    let fixtures = StaticFixtures::bundled().unwrap();
    (fixtures.feed_count(), fixtures.alert_count())
}

#[tokio::test]
async fn test_login_scenario() {
    let store = create_test_store();
    store.login("a@b.com", "x").await.unwrap();

    let state = store.snapshot().await;
    let (feed_count, alert_count) = fixture_counts();
    assert!(state.is_logged_in());
    assert_eq!(state.user().unwrap().name, "a");
    assert_eq!(state.user().unwrap().role, "user");
    assert_eq!(state.user_feeds().len(), feed_count);
    assert_eq!(state.alerts().len(), alert_count);
}

#[tokio::test]
async fn test_feed_ids_are_pairwise_distinct() {
    let store = create_test_store();
    for i in 0..25 {
        if i % 2 == 0 {
            store.add_feed(FeedDraft::named(format!("feed {i}"))).await;
        } else {
            store.create_feed(FeedDraft::named(format!("feed {i}"))).await;
        }
    }

    let ids = store.feed_ids().await;
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), 25);
    assert_eq!(unique.len(), 25);
}

#[tokio::test]
async fn test_select_then_deselect() {
    let store = create_test_store();
    let feed = store.add_feed(FeedDraft::named("F1")).await;

    store.select_feed(Some(&feed.id)).await;
    store.select_feed(None).await;

    let state = store.snapshot().await;
    assert!(state.selected_feed_id().is_none());
    assert!(state.selected_feed().is_none());
    assert!(!state.is_alerts_modal_open());
}

#[tokio::test]
async fn test_select_nonexistent_feed() {
    let store = create_test_store();
    store.select_feed(Some("nonexistent-id")).await;

    let state = store.snapshot().await;
    assert_eq!(state.selected_feed_id(), Some("nonexistent-id"));
    assert!(state.selected_feed().is_none());
    assert!(state.is_alerts_modal_open());
}

#[tokio::test]
async fn test_mark_all_alerts_read_is_idempotent() {
    let store = create_test_store();
    store.login("a@b.com", "x").await.unwrap();

    store.mark_all_alerts_read().await;
    let once = store.snapshot().await;
    store.mark_all_alerts_read().await;
    let twice = store.snapshot().await;

    assert_eq!(once, twice);
    assert!(once.alerts().iter().all(|alert| alert.read));
}

#[tokio::test]
async fn test_update_feed_reflects_only_patched_fields() {
    let store = create_test_store();
    let feed = store
        .add_feed(FeedDraft::named("Before").with_query("original query"))
        .await;

    let mut patch = FeedPatch::for_feed(feed.id.clone());
    patch.name = Some("After".to_string());
    patch.status = Some(FeedStatus::Error);
    store.update_feed(patch).await;

    let updated = store.feed(&feed.id).await.unwrap();
    assert_eq!(updated.name, "After");
    assert_eq!(updated.status, FeedStatus::Error);
    assert_eq!(updated.query, feed.query);
    assert_eq!(updated.feed_type, feed.feed_type);
    assert_eq!(updated.created_at, feed.created_at);
    assert_eq!(updated.last_activity, feed.last_activity);
    assert_eq!(updated.alerts_count, feed.alerts_count);
}

#[tokio::test]
async fn test_full_feed_update_renames_alert_feed_names() {
    let store = create_test_store();
    store.login("a@b.com", "x").await.unwrap();

    let mut full = store.feed("feed-1").await.unwrap();
    full.name = "Renamed".to_string();
    full.status = FeedStatus::Paused;
    store.update_feed(FeedPatch::from(full.clone())).await;

    assert_eq!(store.feed("feed-1").await, Some(full));
    let names: Vec<String> = store
        .read(|s| {
            s.alerts_for_feed("feed-1")
                .iter()
                .map(|alert| alert.feed_name.clone())
                .collect()
        })
        .await;
    assert_eq!(names.len(), 3);
    assert!(names.iter().all(|name| name == "Renamed"));
}

#[tokio::test]
async fn test_saved_view_round_trip() {
    let store = create_test_store();
    store
        .set_filters(PropertyBag::new().with("importance", "high"))
        .await;
    let before = store.read(|s| s.saved_views().len()).await;

    let id = store.add_saved_view("Hot").await;
    // Duplicate names are allowed
    let other = store.add_saved_view("Hot").await;
    assert_ne!(id, other);

    store.remove_saved_view(&id).await;
    store.remove_saved_view(&other).await;

    let state = store.snapshot().await;
    assert_eq!(state.saved_views().len(), before);
    assert!(state.saved_view(&id).is_none());
}

#[tokio::test]
async fn test_add_then_remove_feed() {
    let store = create_test_store();
    let feed = store.add_feed(FeedDraft::named("F1")).await;
    store.remove_feed(&feed.id).await;

    let names: Vec<_> = store
        .read(|s| s.user_feeds().iter().map(|f| f.name.clone()).collect())
        .await;
    assert!(!names.contains(&"F1".to_string()));
}

#[tokio::test]
async fn test_toggle_connected_app_twice() {
    let store = create_test_store();
    store.toggle_connected_app("x").await;
    assert!(store.read(|s| s.is_app_connected("x")).await);

    store.toggle_connected_app("x").await;
    assert!(!store.read(|s| s.is_app_connected("x")).await);
}

#[tokio::test]
async fn test_toggle_modal_desyncs_from_selection() {
    let store = create_test_store();
    store.toggle_alerts_modal().await;

    let state = store.snapshot().await;
    assert!(state.is_alerts_modal_open());
    assert!(state.selected_feed_id().is_none());
}

#[tokio::test]
async fn test_delete_selected_feed_leaves_stale_id() {
    let store = create_test_store();
    let feed = store.add_feed(FeedDraft::named("F1")).await;
    store.select_feed(Some(&feed.id)).await;

    store.delete_feed(&feed.id).await;

    let state = store.snapshot().await;
    assert!(state.selected_feed().is_none());
    assert_eq!(state.selected_feed_id(), Some(feed.id.as_str()));
}

#[tokio::test]
async fn test_relogin_discards_in_session_edits() {
    let store = create_test_store();
    store.login("a@b.com", "x").await.unwrap();
    let first_id = store.feed_ids().await[0].clone();

    let mut patch = FeedPatch::for_feed(first_id.clone());
    patch.name = Some("Renamed".to_string());
    store.update_feed(patch).await;
    store.add_feed(FeedDraft::named("Extra")).await;

    store.logout().await;
    store.login("a@b.com", "x").await.unwrap();

    let (feed_count, _) = fixture_counts();
    let state = store.snapshot().await;
    assert_eq!(state.user_feeds().len(), feed_count);
    assert_ne!(state.feed(&first_id).unwrap().name, "Renamed");
}

#[tokio::test]
async fn test_logout_keeps_alerts_in_memory() {
    let store = create_test_store();
    store.login("a@b.com", "x").await.unwrap();
    store.mark_alert_read("alert-1").await;
    store.add_saved_view("Board").await;

    store.logout().await;

    let state = store.snapshot().await;
    let (_, alert_count) = fixture_counts();
    assert!(!state.is_logged_in());
    assert!(state.user_feeds().is_empty());
    assert!(state.saved_views().is_empty());
    assert_eq!(state.alerts().len(), alert_count);
    assert!(state.alerts().iter().find(|a| a.id == "alert-1").unwrap().read);
}

#[tokio::test]
async fn test_identity_file_survives_restart() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.persistence.data_dir = dir.path().to_path_buf();
    config.auth.login_delay = Duration::ZERO;

    let store = AppStore::from_config(&config).unwrap();
    let user = store.login("restart@corp.io", "pw").await.unwrap();
    drop(store);

    let restarted = AppStore::from_config(&config).unwrap();
    let state = restarted.snapshot().await;
    assert!(state.is_logged_in());
    assert_eq!(state.user(), Some(&user));
    assert_eq!(state.user_feeds().len(), fixture_counts().0);

    restarted.logout().await;
    assert!(!config.identity_path().exists());

    let after_logout = AppStore::from_config(&config).unwrap();
    assert!(!after_logout.read(AppState::is_logged_in).await);
}

/// Authenticator whose latency depends on the email, to force an ordering
struct StaggeredAuthenticator;

#[async_trait]
impl Authenticator for StaggeredAuthenticator {
    async fn authenticate(&self, email: &str, _password: &str) -> Result<User, AppError> {
        let delay = if email.starts_with("slow") { 60 } else { 5 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(User::from_email(email))
    }
}

#[tokio::test]
async fn test_concurrent_logins_last_write_wins() {
    let identity = Arc::new(MemoryIdentityStore::new());
    let store = AppStore::bootstrap(StoreServices {
        identity: identity.clone(),
        fixtures: Arc::new(StaticFixtures::bundled().unwrap()),
        authenticator: Arc::new(StaggeredAuthenticator),
        notifier: Arc::new(RecordingNotifier::new()),
    });

    let slow = {
        let store = store.clone();
        tokio::spawn(async move { store.login("slow@b.com", "x").await })
    };
    let fast = {
        let store = store.clone();
        tokio::spawn(async move { store.login("fast@b.com", "x").await })
    };

    fast.await.unwrap().unwrap();
    slow.await.unwrap().unwrap();

    let state = store.snapshot().await;
    assert_eq!(state.user().unwrap().email, "slow@b.com");
    assert!(!state.is_loading());
    assert_eq!(identity.load().unwrap().unwrap().email, "slow@b.com");
}

/// Fixture provider that always fails
struct BrokenFixtures;

impl FixtureProvider for BrokenFixtures {
    fn load(&self) -> Result<intel_dashboard_core::fixtures::FixtureData, AppError> {
        Err(AppError::Fixtures("unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_fixture_failure_fails_login() {
    let store = AppStore::bootstrap(StoreServices {
        identity: Arc::new(MemoryIdentityStore::new()),
        fixtures: Arc::new(BrokenFixtures),
        authenticator: Arc::new(SimulatedAuthenticator::new(Duration::ZERO)),
        notifier: Arc::new(RecordingNotifier::new()),
    });

    let err = store.login("a@b.com", "x").await.unwrap_err();
    assert!(matches!(err, AppError::Fixtures(_)));

    let state = store.snapshot().await;
    assert!(!state.is_logged_in());
    assert!(!state.is_loading());
}
