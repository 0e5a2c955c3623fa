//! Reducer logic for an ordering session.
//!
//! Commands are validated against the catalog and the current state, turned
//! into events, and the events are applied. Only `Checkout` produces an
//! effect: the handoff to the order-submission collaborator.

use crate::catalog::Catalog;
use crate::submission::{CartDisposition, OrderSubmission, OrderSubmitter, SubmissionError};
use crate::types::{CartEntry, MenuItemId, SessionAction, SessionError, SessionState};
use kiosk_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use std::sync::Arc;
use std::time::Duration;

/// Default bound on a checkout handoff
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment dependencies for the session reducer
#[derive(Clone)]
pub struct SessionEnvironment {
    /// Menu the session orders from
    pub catalog: Arc<Catalog>,
    /// Clock for timestamping submissions
    pub clock: Arc<dyn Clock>,
    /// Receiver of checked-out carts
    pub submitter: Arc<dyn OrderSubmitter>,
    /// How long a submission may take before it counts as failed
    pub checkout_timeout: Duration,
}

impl SessionEnvironment {
    /// Creates a new `SessionEnvironment` with the default checkout timeout
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        clock: Arc<dyn Clock>,
        submitter: Arc<dyn OrderSubmitter>,
    ) -> Self {
        Self {
            catalog,
            clock,
            submitter,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Overrides the checkout timeout
    #[must_use]
    pub const fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }
}

/// Reducer for an ordering session
#[derive(Clone, Debug, Default)]
pub struct SessionReducer;

impl SessionReducer {
    /// Creates a new `SessionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a `SetCustomization` command
    fn validate_set_customization(
        catalog: &Catalog,
        item_id: MenuItemId,
        option: &str,
        choice: &str,
    ) -> Result<(), SessionError> {
        let item = catalog
            .get(item_id)
            .ok_or(SessionError::UnknownItem(item_id))?;

        let group = item.option(option).ok_or_else(|| SessionError::UnknownOption {
            item_id,
            option: option.to_string(),
        })?;

        if !group.offers(choice) {
            return Err(SessionError::InvalidChoice {
                item_id,
                option: option.to_string(),
                choice: choice.to_string(),
            });
        }

        Ok(())
    }

    /// Builds the snapshot an `AddToCart` command appends
    fn snapshot_for(
        catalog: &Catalog,
        state: &SessionState,
        item_id: MenuItemId,
    ) -> Result<CartEntry, SessionError> {
        let item = catalog
            .get(item_id)
            .ok_or(SessionError::UnknownItem(item_id))?;

        Ok(
            CartEntry::snapshot(item, item.resolve_customizations(&state.selection))
                .with_line_id(state.next_line_id),
        )
    }

    /// Validates a `RemoveFromCart` command
    fn validate_remove(state: &SessionState, index: usize) -> Result<(), SessionError> {
        let len = state.cart.len();
        if index >= len {
            return Err(SessionError::CartIndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Records a refused command without touching selection or cart
    fn refuse(state: &mut SessionState, error: SessionError) {
        tracing::warn!(%error, "Session command refused");
        Self::apply_event(state, &SessionAction::ValidationFailed { error });
    }

    /// Applies an event to state
    fn apply_event(state: &mut SessionState, action: &SessionAction) {
        match action {
            SessionAction::CustomizationSet {
                item_id,
                option,
                choice,
            } => {
                state.selection.set(*item_id, option.clone(), choice.clone());
                state.last_error = None;
            },
            SessionAction::ItemAdded { entry } => {
                state.next_line_id = state.next_line_id.max(entry.line_id + 1);
                state.cart.push(entry.clone());
                state.last_error = None;
            },
            SessionAction::ItemRemoved { index } => {
                if *index < state.cart.len() {
                    state.cart.remove(*index);
                }
                state.last_error = None;
            },
            SessionAction::CheckoutSubmitted { receipt, lines } => {
                if receipt.disposition == CartDisposition::Clear {
                    // Only the submitted lines go; anything added since stays
                    state.cart.retain(|entry| !lines.contains(&entry.line_id));
                }
                state.last_error = None;
            },
            SessionAction::CheckoutFailed { reason } => {
                state.last_error = Some(SessionError::SubmissionFailed {
                    reason: reason.clone(),
                });
            },
            SessionAction::ValidationFailed { error } => {
                state.last_error = Some(error.clone());
            },
            // Commands are not applied to state
            SessionAction::SetCustomization { .. }
            | SessionAction::AddToCart { .. }
            | SessionAction::RemoveFromCart { .. }
            | SessionAction::Checkout => {},
        }
    }

    /// Builds the effect that hands `order` to the submitter
    fn submit_effect(env: &SessionEnvironment, order: OrderSubmission) -> Effect<SessionAction> {
        let submitter = Arc::clone(&env.submitter);
        let timeout = env.checkout_timeout;
        let lines: Vec<u64> = order.entries.iter().map(|entry| entry.line_id).collect();

        Effect::future(async move {
            let outcome = tokio::time::timeout(timeout, submitter.submit(order))
                .await
                .unwrap_or(Err(SubmissionError::Timeout(timeout)));

            Some(match outcome {
                Ok(receipt) => SessionAction::CheckoutSubmitted { receipt, lines },
                Err(error) => SessionAction::CheckoutFailed {
                    reason: error.to_string(),
                },
            })
        })
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            SessionAction::SetCustomization {
                item_id,
                option,
                choice,
            } => {
                if let Err(error) =
                    Self::validate_set_customization(&env.catalog, item_id, &option, &choice)
                {
                    Self::refuse(state, error);
                    return SmallVec::new();
                }

                tracing::debug!(%item_id, option = %option, choice = %choice, "Customization set");
                let event = SessionAction::CustomizationSet {
                    item_id,
                    option,
                    choice,
                };
                Self::apply_event(state, &event);

                SmallVec::new()
            },

            SessionAction::AddToCart { item_id } => {
                let entry = match Self::snapshot_for(&env.catalog, state, item_id) {
                    Ok(entry) => entry,
                    Err(error) => {
                        Self::refuse(state, error);
                        return SmallVec::new();
                    },
                };

                tracing::debug!(
                    %item_id,
                    customizations = %entry.customizations.summary(),
                    "Item added to cart"
                );
                metrics::counter!("kiosk.cart.items_added").increment(1);
                Self::apply_event(state, &SessionAction::ItemAdded { entry });

                SmallVec::new()
            },

            SessionAction::RemoveFromCart { index } => {
                if let Err(error) = Self::validate_remove(state, index) {
                    Self::refuse(state, error);
                    return SmallVec::new();
                }

                tracing::debug!(index, "Item removed from cart");
                Self::apply_event(state, &SessionAction::ItemRemoved { index });

                SmallVec::new()
            },

            SessionAction::Checkout => {
                let order = OrderSubmission {
                    entries: state.cart.clone(),
                    total: state.total(),
                    placed_at: env.clock.now(),
                };

                tracing::info!(
                    entries = order.entries.len(),
                    total = %order.total,
                    "Checkout requested"
                );

                smallvec![Self::submit_effect(env, order)]
            },

            // ========== Events ==========
            SessionAction::CheckoutSubmitted { ref receipt, .. } => {
                tracing::info!(
                    confirmation = %receipt.confirmation,
                    disposition = ?receipt.disposition,
                    "Checkout submitted"
                );
                metrics::counter!("kiosk.checkout.submitted").increment(1);
                Self::apply_event(state, &action);
                SmallVec::new()
            },

            SessionAction::CheckoutFailed { ref reason } => {
                tracing::error!(reason = %reason, "Checkout failed");
                metrics::counter!("kiosk.checkout.failed").increment(1);
                Self::apply_event(state, &action);
                SmallVec::new()
            },

            SessionAction::CustomizationSet { .. }
            | SessionAction::ItemAdded { .. }
            | SessionAction::ItemRemoved { .. }
            | SessionAction::ValidationFailed { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
