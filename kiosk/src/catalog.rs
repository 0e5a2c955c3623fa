//! The fixed menu catalog.
//!
//! Built once at startup and only ever read afterwards. The session reducer
//! uses it as a lookup table by item id.

use crate::types::{MenuItem, MenuItemId, Money, OptionGroup};
use std::collections::HashSet;
use thiserror::Error;

/// Problems that make a list of items unusable as a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two items share an id
    #[error("duplicate menu item id {0}")]
    DuplicateItemId(MenuItemId),

    /// Two option groups on one item share a name
    #[error("menu item {item_id} has duplicate option '{option}'")]
    DuplicateOption {
        /// Item identifier
        item_id: MenuItemId,
        /// Repeated option name
        option: String,
    },

    /// An option group offers nothing to choose
    #[error("option '{option}' on menu item {item_id} has no choices")]
    EmptyChoices {
        /// Item identifier
        item_id: MenuItemId,
        /// Option name
        option: String,
    },

    /// A price below zero
    #[error("menu item {0} has a negative price")]
    NegativePrice(MenuItemId),
}

/// Ordered, read-only list of menu items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Builds a catalog, checking ids, option names, choices, and prices
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in item order.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for item in &items {
            if !ids.insert(item.id) {
                return Err(CatalogError::DuplicateItemId(item.id));
            }
            if item.price.is_negative() {
                return Err(CatalogError::NegativePrice(item.id));
            }

            let mut names = HashSet::new();
            for group in &item.options {
                if !names.insert(group.name.as_str()) {
                    return Err(CatalogError::DuplicateOption {
                        item_id: item.id,
                        option: group.name.clone(),
                    });
                }
                if group.choices.is_empty() {
                    return Err(CatalogError::EmptyChoices {
                        item_id: item.id,
                        option: group.name.clone(),
                    });
                }
            }
        }

        Ok(Self { items })
    }

    /// The restaurant's standard menu
    #[must_use]
    pub fn standard() -> Self {
        Self {
            items: vec![
                item(
                    1,
                    "Kung Pao Chicken",
                    "Stir-fried chicken with peanuts, chili peppers, and vegetables",
                    1299,
                    "/kung-pao-chicken.jpg",
                    vec![
                        OptionGroup::new("Spice Level", ["Mild", "Medium", "Hot"]),
                        OptionGroup::new("Rice", ["White", "Brown"]),
                    ],
                ),
                item(
                    2,
                    "Beef and Broccoli",
                    "Tender beef and fresh broccoli in a savory sauce",
                    1399,
                    "/beef-broccoli.jpg",
                    vec![OptionGroup::new("Noodles", ["Udon", "Egg", "Rice"])],
                ),
                item(
                    3,
                    "Vegetable Lo Mein",
                    "Stir-fried noodles with mixed vegetables",
                    1099,
                    "/vegetable-lo-mein.jpg",
                    vec![OptionGroup::new("Noodle Thickness", ["Thin", "Medium", "Thick"])],
                ),
                item(
                    4,
                    "Fried Rice",
                    "Classic Chinese fried rice with eggs, peas, and carrots",
                    999,
                    "/fried-rice.jpg",
                    vec![OptionGroup::new(
                        "Protein",
                        ["Chicken", "Beef", "Shrimp", "Vegetarian"],
                    )],
                ),
            ],
        }
    }

    /// All items in display order
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Looks up an item by id
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the catalog has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn item(
    id: u32,
    name: &str,
    description: &str,
    cents: i64,
    image_ref: &str,
    options: Vec<OptionGroup>,
) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_cents(cents),
        image_ref: image_ref.to_string(),
        options,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn standard_catalog_is_valid() {
        let standard = Catalog::standard();
        let rebuilt = Catalog::new(standard.items().to_vec()).unwrap();
        assert_eq!(rebuilt, standard);
        assert_eq!(standard.len(), 4);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::standard();
        let item = catalog.get(MenuItemId::new(1)).unwrap();
        assert_eq!(item.name, "Kung Pao Chicken");
        assert_eq!(item.price, Money::from_cents(1299));
        assert_eq!(item.option("Rice").unwrap().default_choice(), Some("White"));
        assert!(catalog.get(MenuItemId::new(99)).is_none());
    }

    #[test]
    fn items_keep_display_order() {
        let names: Vec<_> = Catalog::standard()
            .items()
            .iter()
            .map(|item| item.name.clone())
            .collect();
        assert_eq!(
            names,
            [
                "Kung Pao Chicken",
                "Beef and Broccoli",
                "Vegetable Lo Mein",
                "Fried Rice"
            ]
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut items = Catalog::standard().items().to_vec();
        items[1].id = MenuItemId::new(1);
        assert_eq!(
            Catalog::new(items),
            Err(CatalogError::DuplicateItemId(MenuItemId::new(1)))
        );
    }

    #[test]
    fn rejects_empty_choices() {
        let mut items = Catalog::standard().items().to_vec();
        items[3].options[0].choices.clear();
        assert_eq!(
            Catalog::new(items),
            Err(CatalogError::EmptyChoices {
                item_id: MenuItemId::new(4),
                option: "Protein".to_string(),
            })
        );
    }

    #[test]
    fn rejects_duplicate_options_and_negative_prices() {
        let mut items = Catalog::standard().items().to_vec();
        let rice = items[0].options[1].clone();
        items[0].options.push(rice);
        assert!(matches!(
            Catalog::new(items),
            Err(CatalogError::DuplicateOption { .. })
        ));

        let mut items = Catalog::standard().items().to_vec();
        items[2].price = Money::from_cents(-1);
        assert_eq!(
            Catalog::new(items),
            Err(CatalogError::NegativePrice(MenuItemId::new(3)))
        );
    }
}
