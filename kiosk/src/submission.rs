//! Checkout handoff to the order-submission collaborator.
//!
//! The kiosk never talks to a kitchen or a payment service itself. Checkout
//! packs the cart into an [`OrderSubmission`] and hands it to whatever
//! [`OrderSubmitter`] the environment carries. The submitter's
//! [`OrderReceipt`] decides whether the submitted entries leave the cart.

use crate::types::{CartEntry, Money};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

/// Submission result
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Why a submission did not go through
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The collaborator refused the order
    #[error("order rejected: {reason}")]
    Rejected {
        /// Refusal reason
        reason: String,
    },

    /// The collaborator could not be reached or failed internally
    #[error("order service unavailable: {0}")]
    Unavailable(String),

    /// No answer within the configured timeout
    #[error("order submission timed out after {0:?}")]
    Timeout(Duration),
}

/// The cart as handed to the collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// Cart entries in display order
    pub entries: Vec<CartEntry>,
    /// Sum of entry prices
    pub total: Money,
    /// When checkout was pressed
    pub placed_at: DateTime<Utc>,
}

/// What happens to the submitted entries once the collaborator accepts them
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartDisposition {
    /// Leave the cart as it is
    #[default]
    Retain,
    /// Remove the submitted entries from the cart
    Clear,
}

/// The collaborator's acknowledgement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Collaborator-assigned confirmation code
    pub confirmation: String,
    /// Number of cart entries that were submitted
    pub entry_count: usize,
    /// Total that was submitted
    pub total: Money,
    /// Cart policy for the submitted entries
    pub disposition: CartDisposition,
}

/// Order-submission collaborator
///
/// Abstraction over whatever receives finished orders (kitchen display,
/// receipt printer, order backend).
pub trait OrderSubmitter: Send + Sync {
    /// Submit an order
    ///
    /// # Errors
    ///
    /// Returns error if the order was not accepted
    fn submit(&self, order: OrderSubmission) -> BoxFuture<'static, SubmissionResult<OrderReceipt>>;
}

/// Submitter that writes each order to the log as JSON
///
/// Stands in for a real order service when the kiosk runs on its own.
#[derive(Clone, Debug, Default)]
pub struct LoggingSubmitter {
    disposition: CartDisposition,
}

impl LoggingSubmitter {
    /// Creates a logging submitter with the given cart policy
    #[must_use]
    pub const fn new(disposition: CartDisposition) -> Self {
        Self { disposition }
    }
}

impl OrderSubmitter for LoggingSubmitter {
    fn submit(&self, order: OrderSubmission) -> BoxFuture<'static, SubmissionResult<OrderReceipt>> {
        let disposition = self.disposition;
        Box::pin(async move {
            let payload = serde_json::to_string(&order)
                .map_err(|e| SubmissionError::Unavailable(e.to_string()))?;
            let confirmation = uuid::Uuid::new_v4().to_string();

            tracing::info!(
                confirmation = %confirmation,
                entries = order.entries.len(),
                total = %order.total,
                order = %payload,
                "Checkout"
            );

            Ok(OrderReceipt {
                confirmation,
                entry_count: order.entries.len(),
                total: order.total,
                disposition,
            })
        })
    }
}

/// In-memory submitter that records every order it receives
///
/// Confirmation codes are sequential (`order-1`, `order-2`, ...). Configure
/// it with [`RecordingSubmitter::failing`] to refuse every order instead.
#[derive(Clone, Debug, Default)]
pub struct RecordingSubmitter {
    disposition: CartDisposition,
    failure: Option<SubmissionError>,
    delay: Option<Duration>,
    orders: Arc<Mutex<Vec<OrderSubmission>>>,
}

impl RecordingSubmitter {
    /// Creates a recording submitter that accepts every order
    #[must_use]
    pub fn new(disposition: CartDisposition) -> Self {
        Self {
            disposition,
            ..Self::default()
        }
    }

    /// Creates a recording submitter that refuses every order with `error`
    #[must_use]
    pub fn failing(error: SubmissionError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Waits `delay` before answering each submission
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Orders received so far, including refused ones
    #[must_use]
    pub fn submissions(&self) -> Vec<OrderSubmission> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OrderSubmitter for RecordingSubmitter {
    fn submit(&self, order: OrderSubmission) -> BoxFuture<'static, SubmissionResult<OrderReceipt>> {
        let this = self.clone();
        Box::pin(async move {
            if let Some(delay) = this.delay {
                tokio::time::sleep(delay).await;
            }

            let entry_count = order.entries.len();
            let total = order.total;
            let sequence = {
                let mut orders = this.orders.lock().unwrap_or_else(PoisonError::into_inner);
                orders.push(order);
                orders.len()
            };

            if let Some(error) = this.failure {
                return Err(error);
            }

            Ok(OrderReceipt {
                confirmation: format!("order-{sequence}"),
                entry_count,
                total,
                disposition: this.disposition,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{CartEntry, CustomizationSelection, MenuItemId};

    fn submission() -> OrderSubmission {
        let catalog = Catalog::standard();
        let item = catalog.get(MenuItemId::new(4)).unwrap();
        let entry = CartEntry::snapshot(
            item,
            item.resolve_customizations(&CustomizationSelection::new()),
        );
        OrderSubmission {
            total: entry.price,
            entries: vec![entry],
            placed_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn logging_submitter_acknowledges_order() {
        let receipt = LoggingSubmitter::new(CartDisposition::Clear)
            .submit(submission())
            .await
            .unwrap();

        assert_eq!(receipt.entry_count, 1);
        assert_eq!(receipt.total, Money::from_cents(999));
        assert_eq!(receipt.disposition, CartDisposition::Clear);
        assert!(!receipt.confirmation.is_empty());
    }

    #[tokio::test]
    async fn recording_submitter_numbers_orders() {
        let submitter = RecordingSubmitter::new(CartDisposition::Retain);

        let first = submitter.submit(submission()).await.unwrap();
        let second = submitter.submit(submission()).await.unwrap();

        assert_eq!(first.confirmation, "order-1");
        assert_eq!(second.confirmation, "order-2");
        assert_eq!(submitter.submissions().len(), 2);
    }

    #[tokio::test]
    async fn failing_submitter_still_records() {
        let submitter = RecordingSubmitter::failing(SubmissionError::Unavailable(
            "printer offline".to_string(),
        ));

        let result = submitter.submit(submission()).await;

        assert_eq!(
            result,
            Err(SubmissionError::Unavailable("printer offline".to_string()))
        );
        assert_eq!(submitter.submissions().len(), 1);
    }

    #[test]
    fn submission_serializes_customizations_in_order() {
        let json = serde_json::to_value(submission()).unwrap();
        assert_eq!(
            json["entries"][0]["customizations"],
            serde_json::json!([{ "option": "Protein", "choice": "Chicken" }])
        );
        assert_eq!(json["total"], serde_json::json!(999));
    }
}
