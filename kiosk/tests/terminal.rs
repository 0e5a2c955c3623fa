//! End-to-end tests for the terminal front-end

#![allow(clippy::panic)] // Test code can panic

use kiosk::{
    CartDisposition, Catalog, KioskConfig, KioskTerminal, LineOutcome, OrderSubmitter,
    RecordingSubmitter, SessionEnvironment, SessionReducer, SessionState, SessionStore,
};
use kiosk_testing::test_clock;
use std::sync::Arc;

fn terminal(disposition: CartDisposition) -> (KioskTerminal, Arc<RecordingSubmitter>) {
    let config = KioskConfig::default();
    let catalog = Arc::new(Catalog::standard());
    let submitter = Arc::new(RecordingSubmitter::new(disposition));
    let env = SessionEnvironment::new(
        Arc::clone(&catalog),
        Arc::new(test_clock()),
        Arc::clone(&submitter) as Arc<dyn OrderSubmitter>,
    )
    .with_checkout_timeout(config.checkout_timeout);
    let store = SessionStore::new(SessionState::new(), SessionReducer::new(), env);
    (KioskTerminal::new(store, catalog, config), submitter)
}

async fn reply(terminal: &KioskTerminal, line: &str) -> String {
    match terminal.handle_line(line).await {
        LineOutcome::Continue(text) => text,
        LineOutcome::Quit => panic!("'{line}' should not quit"),
    }
}

#[tokio::test]
async fn test_welcome_shows_title_menu_and_help() {
    let (terminal, _) = terminal(CartDisposition::Retain);
    let screen = terminal.welcome().await;

    assert!(screen.contains("Chinese Restaurant Kiosk"));
    assert!(screen.contains("4. Fried Rice  $9.99"));
    assert!(screen.contains("Commands:"));
}

#[tokio::test]
async fn test_order_flow() {
    let (terminal, submitter) = terminal(CartDisposition::Clear);

    let text = reply(&terminal, "set 1 \"spice level\" hot").await;
    assert_eq!(text, "Kung Pao Chicken: Spice Level set to Hot\n");

    let menu = reply(&terminal, "menu").await;
    assert!(menu.contains("Spice Level: Mild Medium [Hot]"));

    let cart = reply(&terminal, "add 1").await;
    assert!(cart.contains("#1 Kung Pao Chicken (Hot, White)  $12.99"));

    let cart = reply(&terminal, "add \"beef and broccoli\"").await;
    assert!(cart.contains("Total: $26.98"));

    let cart = reply(&terminal, "remove 2").await;
    assert!(cart.contains("Total: $12.99"));

    let receipt = reply(&terminal, "checkout").await;
    assert!(receipt.contains("Confirmation order-1"));
    assert!(receipt.contains("Your cart is empty."));
    assert_eq!(submitter.submissions().len(), 1);
}

#[tokio::test]
async fn test_refusals_are_explained() {
    let (terminal, _) = terminal(CartDisposition::Retain);

    assert!(reply(&terminal, "remove 1").await.starts_with("Sorry, cart position 0"));
    assert_eq!(reply(&terminal, "set 2 Rice White").await, "Beef and Broccoli has no option 'Rice'\n");
    assert_eq!(reply(&terminal, "order 1").await, "unknown command 'order'\n");
    assert!(reply(&terminal, "add").await.starts_with("usage: add"));
}

#[tokio::test]
async fn test_quit() {
    let (terminal, _) = terminal(CartDisposition::Retain);
    assert_eq!(terminal.handle_line("quit").await, LineOutcome::Quit);
}
