//! Line-oriented front-end over a session store.
//!
//! Each line of input becomes at most one action. The reply is the text to
//! show next: a screen, a confirmation, or why the input was refused.

use crate::catalog::Catalog;
use crate::command::{KioskCommand, parse_command};
use crate::config::KioskConfig;
use crate::render::{render_cart, render_header, render_help, render_menu};
use crate::types::SessionAction;
use crate::SessionStore;
use std::sync::Arc;
use std::time::Duration;

/// Extra wait on top of the checkout timeout, so the store reports the outcome
const CHECKOUT_GRACE: Duration = Duration::from_secs(1);

/// What the caller should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Print the text and read the next line
    Continue(String),
    /// Leave the kiosk
    Quit,
}

/// Interactive kiosk bound to one session
pub struct KioskTerminal {
    store: SessionStore,
    catalog: Arc<Catalog>,
    config: KioskConfig,
}

impl KioskTerminal {
    /// Creates a terminal over `store`
    #[must_use]
    pub const fn new(store: SessionStore, catalog: Arc<Catalog>, config: KioskConfig) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// The store behind this terminal
    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Header, menu and command list
    pub async fn welcome(&self) -> String {
        let menu = self.menu().await;
        format!("{}\n{menu}{}", render_header(&self.config.title), render_help())
    }

    /// Handles one line of input
    pub async fn handle_line(&self, line: &str) -> LineOutcome {
        let command = match parse_command(line, &self.catalog) {
            Ok(command) => command,
            Err(error) => return LineOutcome::Continue(format!("{error}\n")),
        };

        let reply = match command {
            KioskCommand::Quit => return LineOutcome::Quit,
            KioskCommand::Help => render_help(),
            KioskCommand::Menu => self.menu().await,
            KioskCommand::Cart => self.cart().await,
            KioskCommand::Dispatch(SessionAction::Checkout) => self.checkout().await,
            KioskCommand::Dispatch(action) => self.dispatch(action).await,
        };

        LineOutcome::Continue(reply)
    }

    async fn menu(&self) -> String {
        let catalog = Arc::clone(&self.catalog);
        self.store
            .state(move |state| render_menu(&catalog, &state.selection))
            .await
    }

    async fn cart(&self) -> String {
        self.store.state(|state| render_cart(&state.cart)).await
    }

    async fn dispatch(&self, action: SessionAction) -> String {
        let confirmation = match &action {
            SessionAction::SetCustomization {
                item_id,
                option,
                choice,
            } => self
                .catalog
                .get(*item_id)
                .map(|item| format!("{}: {option} set to {choice}\n", item.name))
                .unwrap_or_default(),
            _ => String::new(),
        };
        let shows_cart = matches!(
            action,
            SessionAction::AddToCart { .. } | SessionAction::RemoveFromCart { .. }
        );

        if let Err(error) = self.store.send(action).await {
            return format!("{error}\n");
        }

        self.store
            .state(|state| match &state.last_error {
                Some(error) => format!("Sorry, {error}\n"),
                None if shows_cart => render_cart(&state.cart),
                None => confirmation,
            })
            .await
    }

    async fn checkout(&self) -> String {
        let wait = self.config.checkout_timeout + CHECKOUT_GRACE;
        let outcome = self
            .store
            .send_and_wait_for(
                SessionAction::Checkout,
                SessionAction::is_checkout_outcome,
                wait,
            )
            .await;

        match outcome {
            Ok(SessionAction::CheckoutSubmitted { receipt, .. }) => {
                let cart = self.cart().await;
                format!(
                    "Order placed: {} item(s), {}. Confirmation {}\n{cart}",
                    receipt.entry_count, receipt.total, receipt.confirmation,
                )
            },
            Ok(SessionAction::CheckoutFailed { reason }) => {
                format!("Checkout failed: {reason}\nYour cart has been kept.\n")
            },
            Ok(other) => {
                tracing::warn!(action = ?other, "Unexpected checkout outcome");
                "Checkout finished.\n".to_string()
            },
            Err(error) => format!("Checkout failed: {error}\n"),
        }
    }
}
