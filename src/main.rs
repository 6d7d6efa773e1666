//! Intelligence Dashboard demo
//!
//! Bootstraps the state store, signs in (unless a stored identity restored the
//! session), exercises a few dashboard actions and logs the resulting state.

use intel_dashboard_core::config::Config;
use intel_dashboard_core::state::{FeedDraft, FeedType, PropertyBag};
use intel_dashboard_core::AppStore;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let store = AppStore::from_config(&config)?;

    if !store.read(|state| state.is_logged_in()).await {
        store
            .login(&config.demo.email, &config.demo.password)
            .await?;
    }

    let feed = store
        .create_feed(
            FeedDraft::named("Initech Watch")
                .with_query("Initech product launches")
                .with_type(FeedType::Competitor),
        )
        .await;
    store.select_feed(Some(&feed.id)).await;

    store
        .set_filters(PropertyBag::new().with("importance", "high"))
        .await;
    store.add_saved_view("High importance").await;

    let state = store.snapshot().await;
    info!(
        user = state.user().map(|u| u.name.as_str()).unwrap_or("-"),
        feeds = state.user_feeds().len(),
        alerts = state.alerts().len(),
        unread = state.unread_alert_count(),
        high_importance = state.filtered_alerts().len(),
        boards = state.saved_views().len(),
        "Dashboard ready"
    );
    for feed in state.user_feeds() {
        info!(
            feed_id = %feed.id,
            name = %feed.name,
            kind = feed.feed_type.display_name(),
            status = ?feed.status,
            alerts = state.alerts_for_feed(&feed.id).len(),
            "Feed"
        );
    }

    Ok(())
}
