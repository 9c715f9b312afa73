//! BookBridge — built-in dish catalog.
//!
//! The menu the booking surface renders. Dishes carry their display price
//! as the raw string the UI shows; normalization into a structured amount
//! happens when a booking request enters the queue, not here.

use serde::{Deserialize, Serialize};

use bookbridge_booking::domain::queue::BookingRequest;
use bookbridge_core::product::ProductId;

const MENU_YAML: &str = include_str!("../menu.yaml");

/// A single dish on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    /// Display name; also the source of the dish's product id.
    pub name: String,
    /// Cuisine/category line shown under the name.
    pub location: String,
    /// Display price string, e.g. `"$15"`.
    pub price: String,
    /// Image URL.
    pub image: String,
}

impl Dish {
    /// The stable identifier derived from this dish's display name.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        ProductId::derive(&self.name)
    }

    /// Turns this dish into a booking request for `quantity` servings.
    #[must_use]
    pub fn booking_request(&self, quantity: u32) -> BookingRequest {
        BookingRequest {
            name: self.name.clone(),
            price: self.price.clone(),
            image: self.image.clone(),
            location: self.location.clone(),
            quantity,
        }
    }
}

/// A titled group of dishes, rendered as one carousel row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCategory {
    pub title: String,
    pub dishes: Vec<Dish>,
}

/// The full menu: categorized dishes plus the featured strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<DishCategory>,
    pub featured: Vec<Dish>,
}

impl Catalog {
    /// Loads the catalog embedded at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the embedded menu is malformed, which is a build defect
    /// rather than a runtime condition.
    #[must_use]
    pub fn builtin() -> Self {
        serde_yaml::from_str(MENU_YAML).expect("embedded menu.yaml must parse")
    }

    /// Looks a dish up by its derived product id, searching categories
    /// first and the featured strip last.
    #[must_use]
    pub fn find(&self, product_id: &ProductId) -> Option<&Dish> {
        self.categories
            .iter()
            .flat_map(|category| category.dishes.iter())
            .chain(self.featured.iter())
            .find(|dish| dish.product_id() == *product_id)
    }
}
