//! Core domain types for the ordering kiosk.
//!
//! The menu side (`MenuItem`, `OptionGroup`) is immutable catalog data. The
//! session side (`CustomizationSelection`, `CartEntry`, `SessionState`) is the
//! mutable state driven by [`SessionAction`]s.

use crate::submission::OrderReceipt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use thiserror::Error;

/// Unique identifier for a menu item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MenuItemId(u32);

impl MenuItemId {
    /// Creates a new `MenuItemId`
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the inner value
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money amount in cents (to avoid floating point issues)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is below zero
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}

/// A named set of mutually exclusive choices attached to a menu item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Label, unique within the item
    pub name: String,
    /// Selectable values in display order; the first is the default
    pub choices: Vec<String>,
}

impl OptionGroup {
    /// Creates a new option group
    #[must_use]
    pub fn new(name: impl Into<String>, choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// The implied choice when nothing has been selected
    #[must_use]
    pub fn default_choice(&self) -> Option<&str> {
        self.choices.first().map(String::as_str)
    }

    /// Checks whether `choice` is one of this group's choices
    #[must_use]
    pub fn offers(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }
}

/// A purchasable item in the catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier
    pub id: MenuItemId,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Unit price
    pub price: Money,
    /// Path of the display image
    pub image_ref: String,
    /// Customization groups in display order
    pub options: Vec<OptionGroup>,
}

impl MenuItem {
    /// Looks up an option group by name
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&OptionGroup> {
        self.options.iter().find(|group| group.name == name)
    }

    /// Resolves the effective value of every option from the live selection
    ///
    /// Options without a selection fall back to their first choice. The
    /// result is an independent copy, ordered like `self.options`.
    #[must_use]
    pub fn resolve_customizations(&self, selection: &CustomizationSelection) -> Customizations {
        self.options
            .iter()
            .filter_map(|group| {
                selection
                    .effective_choice(self.id, group)
                    .map(|choice| ChosenOption {
                        option: group.name.clone(),
                        choice: choice.to_string(),
                    })
            })
            .collect()
    }
}

/// One resolved option value in a cart entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenOption {
    /// Option group name
    pub option: String,
    /// Chosen value
    pub choice: String,
}

/// Resolved option name → value mapping, in the item's option order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customizations(Vec<ChosenOption>);

impl Customizations {
    /// Returns the value chosen for `option`
    #[must_use]
    pub fn get(&self, option: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|chosen| chosen.option == option)
            .map(|chosen| chosen.choice.as_str())
    }

    /// Iterates over the chosen options in order
    pub fn iter(&self) -> impl Iterator<Item = &ChosenOption> {
        self.0.iter()
    }

    /// Returns the chosen values joined with `", "`
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|chosen| chosen.choice.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Number of resolved options
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the item has no options
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ChosenOption> for Customizations {
    fn from_iter<I: IntoIterator<Item = ChosenOption>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// In-progress choices per item, not yet committed to the cart
///
/// Sparse: an option with no entry is at its default (first) choice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationSelection {
    items: HashMap<MenuItemId, HashMap<String, String>>,
}

impl CustomizationSelection {
    /// Creates an empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a single (item, option) entry, leaving all others untouched
    pub fn set(&mut self, item_id: MenuItemId, option: impl Into<String>, choice: impl Into<String>) {
        self.items
            .entry(item_id)
            .or_default()
            .insert(option.into(), choice.into());
    }

    /// Returns the explicitly selected value, if any
    #[must_use]
    pub fn get(&self, item_id: MenuItemId, option: &str) -> Option<&str> {
        self.items
            .get(&item_id)
            .and_then(|options| options.get(option))
            .map(String::as_str)
    }

    /// Returns the selected value, or the group's default when unset
    #[must_use]
    pub fn effective_choice<'a>(&'a self, item_id: MenuItemId, group: &'a OptionGroup) -> Option<&'a str> {
        self.get(item_id, &group.name).or_else(|| group.default_choice())
    }

    /// Number of explicitly selected (item, option) pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing has been selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable snapshot of an item plus its committed customizations
///
/// Equality ignores `line_id`: two adds of the same item with the same
/// choices compare equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartEntry {
    /// Session-unique number assigned when the entry joins the cart
    #[serde(default)]
    pub line_id: u64,
    /// Item identifier
    pub id: MenuItemId,
    /// Item name at the time of adding
    pub name: String,
    /// Item description at the time of adding
    pub description: String,
    /// Item price at the time of adding
    pub price: Money,
    /// Image path
    pub image_ref: String,
    /// The item's option groups
    pub options: Vec<OptionGroup>,
    /// Values in effect when the item was added
    pub customizations: Customizations,
}

impl CartEntry {
    /// Copies `item` together with its resolved customizations
    #[must_use]
    pub fn snapshot(item: &MenuItem, customizations: Customizations) -> Self {
        Self {
            line_id: 0,
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image_ref: item.image_ref.clone(),
            options: item.options.clone(),
            customizations,
        }
    }

    /// Sets the cart line number
    #[must_use]
    pub const fn with_line_id(mut self, line_id: u64) -> Self {
        self.line_id = line_id;
        self
    }
}

impl PartialEq for CartEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.description == other.description
            && self.price == other.price
            && self.image_ref == other.image_ref
            && self.options == other.options
            && self.customizations == other.customizations
    }
}

impl Eq for CartEntry {}

/// Reasons a session action was refused
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    /// No catalog item has this id
    #[error("menu item {0} does not exist")]
    UnknownItem(MenuItemId),

    /// The item has no option group with this name
    #[error("menu item {item_id} has no option '{option}'")]
    UnknownOption {
        /// Item identifier
        item_id: MenuItemId,
        /// Requested option name
        option: String,
    },

    /// The option group does not offer this value
    #[error("'{choice}' is not a choice for '{option}' on menu item {item_id}")]
    InvalidChoice {
        /// Item identifier
        item_id: MenuItemId,
        /// Option name
        option: String,
        /// Requested value
        choice: String,
    },

    /// Cart position outside `0..len`
    #[error("cart position {index} is out of range (cart has {len} entries)")]
    CartIndexOutOfRange {
        /// Requested position
        index: usize,
        /// Cart length at the time
        len: usize,
    },

    /// The order-submission collaborator did not accept the cart
    #[error("checkout failed: {reason}")]
    SubmissionFailed {
        /// Failure description
        reason: String,
    },
}

/// State of one ordering session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// In-progress customization choices
    pub selection: CustomizationSelection,
    /// Cart entries in insertion order
    pub cart: Vec<CartEntry>,
    /// Last refused action (if any)
    pub last_error: Option<SessionError>,
    /// Line number the next cart entry receives
    pub next_line_id: u64,
}

impl SessionState {
    /// Creates an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all entry prices
    #[must_use]
    pub fn total(&self) -> Money {
        self.cart.iter().map(|entry| entry.price).sum()
    }
}

/// Actions representing commands and events for an ordering session
///
/// Commands express what the customer asked for; the reducer validates them
/// and turns them into events, which are what actually change state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionAction {
    // ========== Commands ==========
    /// Command: choose a value for one option of one item
    SetCustomization {
        /// Item identifier
        item_id: MenuItemId,
        /// Option group name
        option: String,
        /// Chosen value
        choice: String,
    },

    /// Command: append a snapshot of an item to the cart
    AddToCart {
        /// Item identifier
        item_id: MenuItemId,
    },

    /// Command: remove the cart entry at a position
    RemoveFromCart {
        /// Zero-based cart position
        index: usize,
    },

    /// Command: hand the cart to the order-submission collaborator
    Checkout,

    // ========== Events ==========
    /// Event: a customization value was recorded
    CustomizationSet {
        /// Item identifier
        item_id: MenuItemId,
        /// Option group name
        option: String,
        /// Chosen value
        choice: String,
    },

    /// Event: an entry was appended to the cart
    ItemAdded {
        /// The snapshot that was appended
        entry: CartEntry,
    },

    /// Event: the entry at a position was removed
    ItemRemoved {
        /// Zero-based cart position
        index: usize,
    },

    /// Event: the collaborator accepted the order
    CheckoutSubmitted {
        /// Collaborator's receipt
        receipt: OrderReceipt,
        /// Line ids of the cart entries that were submitted
        lines: Vec<u64>,
    },

    /// Event: the collaborator failed or timed out
    CheckoutFailed {
        /// Failure description
        reason: String,
    },

    /// Event: a command was refused
    ValidationFailed {
        /// Why the command was refused
        error: SessionError,
    },
}

impl SessionAction {
    /// Returns `true` for customer intents
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::SetCustomization { .. }
                | Self::AddToCart { .. }
                | Self::RemoveFromCart { .. }
                | Self::Checkout
        )
    }

    /// Returns `true` for facts produced by the reducer or by effects
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }

    /// Returns `true` for the actions that conclude a checkout
    #[must_use]
    pub const fn is_checkout_outcome(&self) -> bool {
        matches!(
            self,
            Self::CheckoutSubmitted { .. } | Self::CheckoutFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kung_pao() -> MenuItem {
        MenuItem {
            id: MenuItemId::new(1),
            name: "Kung Pao Chicken".to_string(),
            description: "Stir-fried chicken".to_string(),
            price: Money::from_cents(1299),
            image_ref: "/kung-pao-chicken.jpg".to_string(),
            options: vec![
                OptionGroup::new("Spice Level", ["Mild", "Medium", "Hot"]),
                OptionGroup::new("Rice", ["White", "Brown"]),
            ],
        }
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(1299).to_string(), "$12.99");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
    }

    #[test]
    fn money_sum() {
        let total: Money = [1299, 1399, 999].into_iter().map(Money::from_cents).sum();
        assert_eq!(total, Money::from_cents(3697));
    }

    #[test]
    fn option_group_default_is_first_choice() {
        let group = OptionGroup::new("Rice", ["White", "Brown"]);
        assert_eq!(group.default_choice(), Some("White"));
        assert!(group.offers("Brown"));
        assert!(!group.offers("brown"));
    }

    #[test]
    fn selection_upsert_keeps_other_entries() {
        let one = MenuItemId::new(1);
        let two = MenuItemId::new(2);
        let mut selection = CustomizationSelection::new();
        selection.set(one, "Spice Level", "Hot");
        selection.set(one, "Rice", "Brown");
        selection.set(two, "Noodles", "Egg");
        selection.set(one, "Spice Level", "Mild");

        assert_eq!(selection.get(one, "Spice Level"), Some("Mild"));
        assert_eq!(selection.get(one, "Rice"), Some("Brown"));
        assert_eq!(selection.get(two, "Noodles"), Some("Egg"));
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn resolve_fills_defaults_in_option_order() {
        let item = kung_pao();
        let mut selection = CustomizationSelection::new();
        selection.set(item.id, "Spice Level", "Hot");

        let resolved = item.resolve_customizations(&selection);

        assert_eq!(resolved.get("Spice Level"), Some("Hot"));
        assert_eq!(resolved.get("Rice"), Some("White"));
        assert_eq!(resolved.summary(), "Hot, White");
    }

    #[test]
    fn snapshot_is_independent_of_selection() {
        let item = kung_pao();
        let mut selection = CustomizationSelection::new();
        let entry = CartEntry::snapshot(&item, item.resolve_customizations(&selection));

        selection.set(item.id, "Rice", "Brown");

        assert_eq!(entry.customizations.get("Rice"), Some("White"));
    }

    #[test]
    fn entry_equality_ignores_line_id() {
        let item = kung_pao();
        let entry = CartEntry::snapshot(&item, item.resolve_customizations(&CustomizationSelection::new()));
        let later = entry.clone().with_line_id(7);

        assert_eq!(later.line_id, 7);
        assert_eq!(entry, later);
    }

    #[test]
    fn action_classification() {
        assert!(SessionAction::Checkout.is_command());
        assert!(SessionAction::RemoveFromCart { index: 0 }.is_command());
        assert!(SessionAction::ItemRemoved { index: 0 }.is_event());
        assert!(
            SessionAction::CheckoutFailed {
                reason: "offline".to_string()
            }
            .is_checkout_outcome()
        );
        assert!(!SessionAction::Checkout.is_checkout_outcome());
    }
}
