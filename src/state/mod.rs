// State management module
// Handles application state, typed actions, domain models and identity persistence

pub mod action;
pub mod alert;
pub mod app_state;
pub mod bag;
pub mod feed;
pub mod persistence;
pub mod session;

pub use action::Action;
pub use alert::{Alert, AlertId, AlertSource, Importance, SourceType};
pub use app_state::{AppState, SavedView};
pub use bag::{FilterSet, PropertyBag, SetupState};
pub use feed::{Feed, FeedDraft, FeedId, FeedPatch, FeedStatus, FeedType, OutputConfig, SourceMix};
pub use persistence::{FileIdentityStore, IdentityStore, MemoryIdentityStore, PersistenceError};
pub use session::{Session, User};
