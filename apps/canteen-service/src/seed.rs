//! Demo data for single-process mode

use canteen::{Canteen, CanteenResult};
use chrono::NaiveDate;
use doc_store::{Collection, DocumentStore, to_fields};
use entities::{MealConfirmation, MealItems, MealType, MenuItem, User, UserRole};
use meal_policy::Clock;
use tracing::info;

/// What the seed wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub menu_days: usize,
    pub confirmations: usize,
}

/// Demo roster: eight employees, a canteen admin and the main admin.
pub fn demo_users() -> CanteenResult<Vec<User>> {
    let employees = [
        ("emp123", "Alex Ray"),
        ("emp124", "Bethany Short"),
        ("emp125", "Charles Dane"),
        ("emp126", "Diana Prince"),
        ("emp127", "Sharath Kumar"),
        ("emp128", "Deekshith Naik"),
        ("emp129", "Sujith D"),
        ("emp130", "Nandan Naik"),
    ];

    let staff = [
        ("adm456", "Casey Jordan", UserRole::Admin),
        ("hr001", "Harish Kumar", UserRole::MainAdmin),
    ];

    employees
        .into_iter()
        .map(|(id, name)| (id, name, UserRole::Employee))
        .chain(staff)
        .map(|(id, name, role)| {
            canteen::derive_email(name, role).map(|email| User::new(id, name, email, role))
        })
        .collect()
}

/// Demo weekly menu, Sunday first.
pub fn demo_menu() -> [MealItems; 7] {
    let day = |code: &str, dishes: [(&str, &str); 3]| {
        let [(b, bd), (l, ld), (s, sd)] = dishes;
        MealItems::default()
            .with_item(MealType::Breakfast, MenuItem::new(format!("b-{code}-1"), b, bd))
            .with_item(MealType::Lunch, MenuItem::new(format!("l-{code}-1"), l, ld))
            .with_item(MealType::Snacks, MenuItem::new(format!("s-{code}-1"), s, sd))
    };

    [
        day("sun", [
            ("Pancakes", "With maple syrup"),
            ("Roast Chicken", "With vegetables"),
            ("Brownie", "Fudgy chocolate brownie"),
        ]),
        day("mon", [
            ("Oatmeal Porridge", "With fruits and nuts"),
            ("Chicken Curry", "With basmati rice"),
            ("Vegetable Samosa", "Crispy and spicy"),
        ]),
        day("tue", [
            ("Scrambled Eggs", "Served with toast"),
            ("Paneer Butter Masala", "Vegetarian option with naan"),
            ("Fruit Salad", "Fresh seasonal fruits"),
        ]),
        day("wed", [
            ("Idli Sambar", "South Indian delight"),
            ("Vegetable Biryani", "With raita"),
            ("Yogurt", "Plain or flavored"),
        ]),
        day("thu", [
            ("Corn Flakes", "With milk"),
            ("Pasta Arrabiata", "Spicy tomato sauce pasta"),
            ("Cookies", "Chocolate chip cookies"),
        ]),
        day("fri", [
            ("Aloo Paratha", "With curd and pickle"),
            ("Fish and Chips", "Classic comfort food"),
            ("Popcorn", "Salted popcorn"),
        ]),
        day("sat", [
            ("Dosa", "With chutney and sambar"),
            ("Pizza Margherita", "Simple and delicious"),
            ("Nachos", "With cheese and salsa"),
        ]),
    ]
}

/// Opt-ins for employee number `index` on the seeded day.
///
/// Roughly 60% breakfast, 80% lunch and 40% snacks; nothing is reconfirmed.
pub fn demo_confirmation(index: usize, user_id: &str, date: NaiveDate) -> MealConfirmation {
    let slot = index % 5;
    let mut confirmation = MealConfirmation::new(user_id, date);
    confirmation.set_opt_in(MealType::Breakfast, slot < 3);
    confirmation.set_opt_in(MealType::Lunch, slot != 4);
    confirmation.set_opt_in(MealType::Snacks, slot < 2);
    confirmation
}

/// Writes the demo roster, weekly menu and today's opt-ins.
///
/// Records are written directly, bypassing the time rules, so seeding works
/// at any hour.
pub async fn seed_demo_data(canteen: &Canteen, store: &dyn DocumentStore) -> CanteenResult<SeedSummary> {
    let users = demo_users()?;
    for user in &users {
        canteen.users().insert_user(user).await?;
    }

    let menu = demo_menu();
    for (weekday, template) in menu.iter().enumerate() {
        canteen.menus().set_template(weekday as u8, template).await?;
    }

    let today = canteen.clock().today();
    let mut confirmations = 0;
    for (index, user) in users.iter().filter(|u| u.is_employee()).enumerate() {
        let confirmation = demo_confirmation(index, &user.id, today);
        let id = confirmation.id();
        store
            .upsert(Collection::Confirmations, &id, to_fields(&id, &confirmation)?)
            .await?;
        confirmations += 1;
    }

    let summary = SeedSummary {
        users: users.len(),
        menu_days: menu.len(),
        confirmations,
    };
    info!(
        users = summary.users,
        menu_days = summary.menu_days,
        confirmations = summary.confirmations,
        %today,
        "Seeded demo data"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use canteen::CanteenOptions;
    use doc_store::MemoryDocumentStore;
    use meal_policy::SimulatedClock;

    use super::*;

    #[test]
    fn test_demo_users() {
        let users = demo_users().unwrap();
        assert_eq!(users.len(), 10);
        assert_eq!(users.iter().filter(|u| u.is_employee()).count(), 8);
        assert_eq!(users[0].email, "alex.ray@karmic.com");
        assert_eq!(users[8].email, "casey.jordan@canteen.karmic.com");
        assert_eq!(users[9].email, "harish.kumar@hr.karmic.com");
    }

    #[test]
    fn test_demo_confirmations_are_consistent() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        for index in 0..8 {
            let confirmation = demo_confirmation(index, "emp", date);
            assert!(confirmation.is_consistent());
            assert!(!confirmation.wfh);
        }
    }

    #[tokio::test]
    async fn test_seed_populates_every_collection() {
        // 2024-05-08 is a Wednesday
        let date = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
        let store = Arc::new(MemoryDocumentStore::new());
        let clock = Arc::new(SimulatedClock::at(date, 22).unwrap());
        let canteen = Canteen::new(store.clone(), clock, CanteenOptions::default());

        let summary = seed_demo_data(&canteen, store.as_ref()).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                users: 10,
                menu_days: 7,
                confirmations: 8
            }
        );

        let menu = canteen.menus().menu_for_today().await.unwrap();
        assert_eq!(menu.meal(MealType::Lunch)[0].name, "Vegetable Biryani");

        let report = canteen.reports().get_consolidated_report(date).await.unwrap();
        let lunch = report.iter().find(|r| r.meal_type == MealType::Lunch).unwrap();
        assert_eq!(lunch.confirmed, 7);
        assert_eq!(lunch.reconfirmed, 0);
    }
}
