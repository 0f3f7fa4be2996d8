//! Weekly menu templates.
//!
//! Templates live in the `weeklyMenu` collection under the weekday index
//! (`0` = Sunday .. `6` = Saturday) and are materialised into a dated
//! [`DailyMenu`] on read.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use doc_store::{Collection, DocumentStore, to_fields};
use entities::{DailyMenu, MealItems, MealType, MenuItem, NewMenuItem, WeeklyMenuTemplate};
use meal_policy::Clock;
use tracing::{debug, info};

use crate::{CanteenError, CanteenResult, KeyedLocks};

/// Returns the weekday index of a date, Sunday being `0`.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Reads and edits the weekly menu.
pub struct MenuService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    locks: KeyedLocks,
}

impl MenuService {
    /// Creates a new menu service.
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: KeyedLocks::default(),
        }
    }

    /// Menu for a weekday of the current week.
    pub async fn menu_for_day(&self, weekday: u8) -> CanteenResult<DailyMenu> {
        let template = self.template(weekday).await?;

        let today = self.clock.today();
        let offset = i64::from(weekday) - i64::from(weekday_index(today));
        Ok(DailyMenu::from_template(today + Duration::days(offset), template))
    }

    /// Menu for a calendar date.
    pub async fn menu_for_date(&self, date: NaiveDate) -> CanteenResult<DailyMenu> {
        let template = self.template(weekday_index(date)).await?;
        Ok(DailyMenu::from_template(date, template))
    }

    /// Menu for today.
    pub async fn menu_for_today(&self) -> CanteenResult<DailyMenu> {
        self.menu_for_date(self.clock.today()).await
    }

    /// Replaces a weekday template.
    pub async fn set_template(&self, weekday: u8, template: &WeeklyMenuTemplate) -> CanteenResult<()> {
        let id = template_id(weekday)?;
        let _guard = self.locks.lock(&id).await;
        self.store
            .upsert(Collection::WeeklyMenu, &id, to_fields(&id, template)?)
            .await?;
        debug!(weekday, "Menu template stored");
        Ok(())
    }

    /// Appends a dish to a meal. The dish gets a fresh `item-<uuid>` ID.
    pub async fn add_menu_item(
        &self,
        weekday: u8,
        meal: MealType,
        item: NewMenuItem,
    ) -> CanteenResult<DailyMenu> {
        let item = item.into_item();
        let item_id = item.id.clone();
        self.edit(weekday, |items| {
            items.get_mut(meal).push(item);
            true
        })
        .await?;
        info!(weekday, %meal, %item_id, "Menu item added");
        self.menu_for_day(weekday).await
    }

    /// Replaces a dish with the same ID. Unknown IDs leave the menu as is.
    pub async fn update_menu_item(
        &self,
        weekday: u8,
        meal: MealType,
        item: MenuItem,
    ) -> CanteenResult<DailyMenu> {
        let item_id = item.id.clone();
        let changed = self
            .edit(weekday, |items| {
                match items.get_mut(meal).iter_mut().find(|i| i.id == item.id) {
                    Some(existing) => {
                        *existing = item;
                        true
                    }
                    None => false,
                }
            })
            .await?;
        if changed {
            info!(weekday, %meal, %item_id, "Menu item updated");
        } else {
            debug!(weekday, %meal, %item_id, "Menu item not found, nothing updated");
        }
        self.menu_for_day(weekday).await
    }

    /// Removes a dish.
    pub async fn delete_menu_item(
        &self,
        weekday: u8,
        meal: MealType,
        item_id: &str,
    ) -> CanteenResult<DailyMenu> {
        let changed = self
            .edit(weekday, |items| {
                let dishes = items.get_mut(meal);
                let before = dishes.len();
                dishes.retain(|i| i.id != item_id);
                dishes.len() != before
            })
            .await?;
        if changed {
            info!(weekday, %meal, item_id, "Menu item deleted");
        }
        self.menu_for_day(weekday).await
    }

    async fn template(&self, weekday: u8) -> CanteenResult<WeeklyMenuTemplate> {
        let id = template_id(weekday)?;
        let doc = self
            .store
            .get(Collection::WeeklyMenu, &id)
            .await?
            .ok_or_else(|| CanteenError::not_found("Menu", id))?;
        Ok(doc.parse()?)
    }

    /// Read-modify-write of one template. Writes only if `change` reports a
    /// change.
    async fn edit<F>(&self, weekday: u8, change: F) -> CanteenResult<bool>
    where
        F: FnOnce(&mut MealItems) -> bool,
    {
        let id = template_id(weekday)?;
        let _guard = self.locks.lock(&id).await;

        let mut template = self.template(weekday).await?;
        if !change(&mut template) {
            return Ok(false);
        }
        self.store
            .upsert(Collection::WeeklyMenu, &id, to_fields(&id, &template)?)
            .await?;
        Ok(true)
    }
}

fn template_id(weekday: u8) -> CanteenResult<String> {
    if weekday > 6 {
        return Err(CanteenError::invalid_input(format!(
            "weekday {weekday} is outside 0-6"
        )));
    }
    Ok(weekday.to_string())
}

#[cfg(test)]
mod tests {
    use doc_store::MemoryDocumentStore;
    use meal_policy::SimulatedClock;
    use tokio_test::assert_err;

    use super::*;

    // A Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()
    }

    async fn setup() -> MenuService {
        let store = Arc::new(MemoryDocumentStore::new());
        let clock = Arc::new(SimulatedClock::at(today(), 9).unwrap());
        let service = MenuService::new(store, clock);

        let monday = MealItems::default()
            .with_item(MealType::Breakfast, MenuItem::new("m1", "Idli Sambar", "Steamed rice cakes"))
            .with_item(MealType::Lunch, MenuItem::new("m2", "Veg Biryani", "Spiced rice"));
        service.set_template(1, &monday).await.unwrap();
        let wednesday = MealItems::default()
            .with_item(MealType::Snacks, MenuItem::new("w1", "Samosa", "Fried pastry"));
        service.set_template(3, &wednesday).await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_menu_is_dated_within_current_week() {
        let service = setup().await;

        let monday = service.menu_for_day(1).await.unwrap();
        assert_eq!(monday.date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(monday.meal(MealType::Breakfast)[0].name, "Idli Sambar");
        assert!(monday.meal(MealType::Snacks).is_empty());

        let current = service.menu_for_today().await.unwrap();
        assert_eq!(current.date, today());
        assert_eq!(current.meal(MealType::Snacks)[0].id, "w1");
    }

    #[tokio::test]
    async fn test_missing_template_is_not_found() {
        let service = setup().await;

        let err = assert_err!(service.menu_for_day(0).await);
        assert!(matches!(err, CanteenError::NotFound { .. }));

        let err = assert_err!(service.menu_for_day(7).await);
        assert!(matches!(err, CanteenError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_menu_item_editing() {
        let service = setup().await;

        // Add
        let menu = service
            .add_menu_item(
                1,
                MealType::Lunch,
                NewMenuItem {
                    name: "Dal Tadka".to_string(),
                    description: "Tempered lentils".to_string(),
                },
            )
            .await
            .unwrap();
        let lunch = menu.meal(MealType::Lunch);
        assert_eq!(lunch.len(), 2);
        assert!(lunch[1].id.starts_with("item-"));

        // Update
        let menu = service
            .update_menu_item(1, MealType::Lunch, MenuItem::new("m2", "Paneer Biryani", "Spiced rice"))
            .await
            .unwrap();
        assert_eq!(menu.meal(MealType::Lunch)[0].name, "Paneer Biryani");

        // Update of an unknown item is a no-op
        let unchanged = service
            .update_menu_item(1, MealType::Lunch, MenuItem::new("nope", "Ghost", ""))
            .await
            .unwrap();
        assert_eq!(unchanged, menu);

        // Delete
        let menu = service
            .delete_menu_item(1, MealType::Lunch, "m2")
            .await
            .unwrap();
        assert_eq!(menu.meal(MealType::Lunch).len(), 1);
        assert_eq!(menu.meal(MealType::Lunch)[0].name, "Dal Tadka");
    }

    #[tokio::test]
    async fn test_editing_missing_template_fails() {
        let service = setup().await;
        let err = assert_err!(service.delete_menu_item(5, MealType::Lunch, "x").await);
        assert!(matches!(err, CanteenError::NotFound { .. }));
    }
}
