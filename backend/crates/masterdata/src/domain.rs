use serde::Serialize;

/// One reference-data category and where its rows live.
///
/// Table and column names come exclusively from this registry, never
/// from request input, so interpolating them into SQL is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub table: &'static str,
    pub label_column: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { name: "genders", table: "genders", label_column: "gender" },
    Category { name: "blood_types", table: "blood_types", label_column: "blood_type" },
    Category { name: "unit_types", table: "unit_types", label_column: "name" },
    Category { name: "smoking_levels", table: "smoking_levels", label_column: "level" },
    Category { name: "alcohol_levels", table: "alcohol_levels", label_column: "level" },
    Category { name: "exercise_levels", table: "exercise_levels", label_column: "level" },
    Category { name: "allergies", table: "allergies", label_column: "name" },
    Category { name: "genetic_conditions", table: "genetic_conditions", label_column: "name" },
    Category { name: "subscription_plans", table: "subscription_plans", label_column: "plan_name" },
];

pub fn find_category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

/// A single reference row, normalized to id + display label.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MasterItem {
    pub id: i64,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_resolve() {
        assert_eq!(find_category("genders").unwrap().label_column, "gender");
        assert_eq!(
            find_category("subscription_plans").unwrap().table,
            "subscription_plans"
        );
    }

    #[test]
    fn unknown_category_does_not() {
        assert!(find_category("favorite_colors").is_none());
        assert!(find_category("").is_none());
        assert!(find_category("GENDERS").is_none());
    }

    #[test]
    fn registry_names_are_unique() {
        for (i, a) in CATEGORIES.iter().enumerate() {
            for b in &CATEGORIES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
