use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{menus, options};

/// Name given to a menu created without one.
pub const DEFAULT_MENU_NAME: &str = "Today's menu";

/// Longest menu name accepted.
pub const MAX_MENU_NAME_LEN: usize = 255;

/// A selectable food item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    pub id: i32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<options::Model> for MenuOption {
    fn from(model: options::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

/// A dated bundle of options, with its options loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub options: Vec<MenuOption>,
}

impl Menu {
    pub(crate) fn from_parts(model: menus::Model, options: Vec<MenuOption>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            date: model.date,
            created_at: model.created_at,
            options,
        }
    }

    #[must_use]
    pub fn option_ids(&self) -> Vec<i32> {
        self.options.iter().map(|o| o.id).collect()
    }
}

/// Fields for a new menu. `option_ids` may contain duplicates; they collapse
/// into a single link.
#[derive(Debug, Clone)]
pub struct MenuDraft {
    pub name: String,
    pub date: NaiveDate,
    pub option_ids: Vec<i32>,
}

/// Changes applied to an existing menu. `None` leaves the field untouched;
/// `option_ids: Some(..)` replaces the whole option set.
#[derive(Debug, Clone, Default)]
pub struct MenuChanges {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub option_ids: Option<Vec<i32>>,
}

/// Which menus a listing should return.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    /// Keep menus linked to any of these options. Empty means no filtering.
    pub option_ids: Vec<i32>,
}

/// Drops repeated ids, keeping first-seen order.
#[must_use]
pub fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ids_keeps_first_occurrence() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }

    #[test]
    fn test_option_ids() {
        let now = Utc::now();
        let menu = Menu {
            id: 1,
            name: DEFAULT_MENU_NAME.to_string(),
            date: NaiveDate::from_ymd_opt(2020, 11, 16).unwrap(),
            created_at: now,
            options: vec![
                MenuOption {
                    id: 7,
                    description: "Corn pie".to_string(),
                    created_at: now,
                },
                MenuOption {
                    id: 9,
                    description: "Chicken Rice".to_string(),
                    created_at: now,
                },
            ],
        };

        assert_eq!(menu.option_ids(), vec![7, 9]);
    }
}
