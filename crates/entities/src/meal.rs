//! Meal slot definitions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A meal slot served by the canteen each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealType {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Afternoon snacks.
    Snacks,
}

impl MealType {
    /// All meal slots in serving order.
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Snacks];

    /// Returns the display name of the meal.
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown meal name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMealTypeError(pub String);

impl fmt::Display for ParseMealTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown meal type: {}", self.0)
    }
}

impl std::error::Error for ParseMealTypeError {}

impl FromStr for MealType {
    type Err = ParseMealTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "snacks" | "snack" => Ok(MealType::Snacks),
            _ => Err(ParseMealTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parse() {
        assert_eq!("lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert_eq!("Snacks".parse::<MealType>().unwrap(), MealType::Snacks);
        assert!("dinner".parse::<MealType>().is_err());
    }

    #[test]
    fn test_meal_type_serialization() {
        let json = serde_json::to_string(&MealType::Breakfast).unwrap();
        assert_eq!(json, "\"Breakfast\"");
    }
}
