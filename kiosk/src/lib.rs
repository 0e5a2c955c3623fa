//! Restaurant ordering kiosk.
//!
//! A customer browses a fixed menu, picks values for each item's options,
//! adds customized snapshots of items to a cart, removes entries, and checks
//! out. It covers:
//!
//! - Catalog lookup with first-choice defaults for unset options
//! - Command validation and event application in [`SessionReducer`]
//! - Checkout as the only effect, handed to an [`OrderSubmitter`]
//! - A line-oriented terminal front-end
//!
//! # Quick Start
//!
//! ```no_run
//! use kiosk::{
//!     Catalog, CartDisposition, LoggingSubmitter, MenuItemId, SessionAction,
//!     SessionEnvironment, SessionReducer, SessionState,
//! };
//! use kiosk_core::environment::SystemClock;
//! use kiosk_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = SessionEnvironment::new(
//!     Arc::new(Catalog::standard()),
//!     Arc::new(SystemClock),
//!     Arc::new(LoggingSubmitter::new(CartDisposition::Retain)),
//! );
//! let store = Store::new(SessionState::new(), SessionReducer::new(), env);
//!
//! store.send(SessionAction::SetCustomization {
//!     item_id: MenuItemId::new(1),
//!     option: "Spice Level".to_string(),
//!     choice: "Hot".to_string(),
//! }).await?;
//! store.send(SessionAction::AddToCart { item_id: MenuItemId::new(1) }).await?;
//!
//! let total = store.state(|s| s.total()).await;
//! println!("Total: {total}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod reducer;
pub mod render;
pub mod submission;
pub mod terminal;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, KioskConfig};
pub use reducer::{SessionEnvironment, SessionReducer};
pub use submission::{
    CartDisposition, LoggingSubmitter, OrderReceipt, OrderSubmission, OrderSubmitter,
    RecordingSubmitter, SubmissionError,
};
pub use terminal::{KioskTerminal, LineOutcome};
pub use types::{
    CartEntry, CustomizationSelection, Customizations, MenuItem, MenuItemId, Money, OptionGroup,
    SessionAction, SessionError, SessionState,
};

/// Store driving one ordering session
pub type SessionStore =
    kiosk_runtime::Store<SessionState, SessionAction, SessionEnvironment, SessionReducer>;

/// Register descriptions for the store and kiosk metrics
pub fn describe_metrics() {
    kiosk_runtime::metrics::describe_store_metrics();
    metrics::describe_counter!(
        "kiosk.cart.items_added",
        "Cart entries added across all sessions"
    );
    metrics::describe_counter!(
        "kiosk.checkout.submitted",
        "Checkouts accepted by the order submitter"
    );
    metrics::describe_counter!(
        "kiosk.checkout.failed",
        "Checkouts that failed or timed out"
    );
}
