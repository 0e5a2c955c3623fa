//! Plain-text screens for the terminal front-end.

use crate::catalog::Catalog;
use crate::types::{CartEntry, CustomizationSelection, Money};
use std::fmt::Write;

/// Title banner
#[must_use]
pub fn render_header(title: &str) -> String {
    let rule = "=".repeat(title.chars().count().max(20));
    format!("{rule}\n{title}\n{rule}\n")
}

/// Menu cards, with the effective choice of every option in brackets
#[must_use]
pub fn render_menu(catalog: &Catalog, selection: &CustomizationSelection) -> String {
    let mut out = String::new();

    for (position, item) in catalog.items().iter().enumerate() {
        let _ = writeln!(out, "{}. {}  {}", position + 1, item.name, item.price);
        let _ = writeln!(out, "   {}", item.description);
        let _ = writeln!(out, "   image: {}", item.image_ref);

        for group in &item.options {
            let current = selection.effective_choice(item.id, group);
            let choices: Vec<String> = group
                .choices
                .iter()
                .map(|choice| {
                    if Some(choice.as_str()) == current {
                        format!("[{choice}]")
                    } else {
                        choice.clone()
                    }
                })
                .collect();
            let _ = writeln!(out, "   {}: {}", group.name, choices.join(" "));
        }
        out.push('\n');
    }

    out
}

/// Cart lines and total
#[must_use]
pub fn render_cart(cart: &[CartEntry]) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::from("Your cart:\n");
    for (position, entry) in cart.iter().enumerate() {
        if entry.customizations.is_empty() {
            let _ = writeln!(out, "  #{} {}  {}", position + 1, entry.name, entry.price);
        } else {
            let _ = writeln!(
                out,
                "  #{} {} ({})  {}",
                position + 1,
                entry.name,
                entry.customizations.summary(),
                entry.price
            );
        }
    }
    let total: Money = cart.iter().map(|entry| entry.price).sum();
    let _ = writeln!(out, "Total: {total}");

    out
}

/// Command reference
#[must_use]
pub fn render_help() -> String {
    [
        "Commands:",
        "  menu                           show the menu",
        "  cart                           show the cart",
        "  set <item> <option> <choice>   customize an item (numbers or names)",
        "  add <item>                     add an item with its current customizations",
        "  remove <position>              remove a cart entry (1 = first)",
        "  checkout                       send the cart to the kitchen",
        "  help                           show this list",
        "  quit                           leave",
        "Names with spaces go in double quotes: set \"Fried Rice\" Protein Shrimp",
    ]
    .join("\n")
        + "\n"
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use crate::types::MenuItemId;

    #[test]
    fn header_frames_title() {
        assert_eq!(
            render_header("Kiosk"),
            "====================\nKiosk\n====================\n"
        );
    }

    #[test]
    fn menu_marks_defaults_and_selection() {
        let catalog = Catalog::standard();
        let mut selection = CustomizationSelection::new();
        selection.set(MenuItemId::new(1), "Spice Level", "Hot");

        let menu = render_menu(&catalog, &selection);

        assert!(menu.contains("1. Kung Pao Chicken  $12.99"));
        assert!(menu.contains("Spice Level: Mild Medium [Hot]"));
        assert!(menu.contains("Rice: [White] Brown"));
        assert!(menu.contains("Protein: [Chicken] Beef Shrimp Vegetarian"));
        assert!(menu.contains("image: /fried-rice.jpg"));
    }

    #[test]
    fn cart_lists_entries_and_total() {
        let catalog = Catalog::standard();
        let selection = CustomizationSelection::new();
        let cart: Vec<CartEntry> = [1, 2]
            .into_iter()
            .map(|id| {
                let item = catalog.get(MenuItemId::new(id)).unwrap();
                CartEntry::snapshot(item, item.resolve_customizations(&selection))
            })
            .collect();

        let text = render_cart(&cart);

        assert!(text.contains("#1 Kung Pao Chicken (Mild, White)  $12.99"));
        assert!(text.contains("#2 Beef and Broccoli (Udon)  $13.99"));
        assert!(text.ends_with("Total: $26.98\n"));
    }

    #[test]
    fn empty_cart() {
        assert_eq!(render_cart(&[]), "Your cart is empty.\n");
    }

    #[test]
    fn help_lists_every_command() {
        let help = render_help();
        for command in ["menu", "cart", "set", "add", "remove", "checkout", "quit"] {
            assert!(help.contains(command), "missing {command}");
        }
    }
}
