//! Menu entity definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MealType;

/// A dish served in a meal slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier.
    pub id: String,
    /// Dish name.
    pub name: String,
    /// Short description.
    pub description: String,
}

impl MenuItem {
    /// Creates a menu item with an explicit ID.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Input for adding a dish to a menu. The ID is generated on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
}

impl NewMenuItem {
    /// Assigns a fresh `item-<uuid>` ID.
    pub fn into_item(self) -> MenuItem {
        MenuItem::new(format!("item-{}", Uuid::new_v4()), self.name, self.description)
    }
}

/// Ordered dishes for each meal slot.
///
/// This is also the stored shape of a weekday template; missing slots
/// deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealItems {
    #[serde(default, rename = "Breakfast")]
    pub breakfast: Vec<MenuItem>,
    #[serde(default, rename = "Lunch")]
    pub lunch: Vec<MenuItem>,
    #[serde(default, rename = "Snacks")]
    pub snacks: Vec<MenuItem>,
}

impl MealItems {
    /// Returns the dishes for a meal.
    pub fn get(&self, meal: MealType) -> &[MenuItem] {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Snacks => &self.snacks,
        }
    }

    /// Returns the dishes for a meal, mutably.
    pub fn get_mut(&mut self, meal: MealType) -> &mut Vec<MenuItem> {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Snacks => &mut self.snacks,
        }
    }

    /// Builder helper adding one dish to a meal.
    pub fn with_item(mut self, meal: MealType, item: MenuItem) -> Self {
        self.get_mut(meal).push(item);
        self
    }
}

/// Menu template for one day of the week.
pub type WeeklyMenuTemplate = MealItems;

/// A weekday template materialized for a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMenu {
    /// Date this menu is served on.
    pub date: NaiveDate,
    /// Dishes per meal slot.
    #[serde(flatten)]
    pub items: MealItems,
}

impl DailyMenu {
    /// Materializes a template for a date.
    pub fn from_template(date: NaiveDate, template: WeeklyMenuTemplate) -> Self {
        Self {
            date,
            items: template,
        }
    }

    /// Returns the dishes for a meal.
    pub fn meal(&self, meal: MealType) -> &[MenuItem] {
        self.items.get(meal)
    }
}
