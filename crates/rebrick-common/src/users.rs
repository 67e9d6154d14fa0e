//! User-collection data models for the `users/` endpoint family.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Color, InventoryPart, Part, Set};

/// A user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Numeric user id.
    pub user_id: Option<u64>,
    /// Username.
    pub username: Option<String>,
    /// Email address, present only for the authenticated user.
    pub email: Option<String>,
    /// Timestamp of the last site activity.
    pub last_activity: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Avatar image URL.
    pub avatar_img_url: Option<String>,
}

/// A part the user has marked as lost from their collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostPart {
    /// Row id of the lost-part record.
    pub lost_part_id: u64,
    /// How many copies are lost.
    pub lost_quantity: Option<u32>,
    /// The inventory row the loss refers to.
    pub inv_part: Option<InventoryPart>,
}

/// A user part list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartList {
    /// Part list id.
    pub id: u64,
    /// Part list name.
    pub name: String,
    /// Whether the list counts towards build calculations.
    pub is_buildable: Option<bool>,
    /// Total number of parts in the list.
    pub num_parts: Option<u64>,
}

/// A user set list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetList {
    /// Set list id.
    pub id: u64,
    /// Set list name.
    pub name: String,
    /// Whether the list counts towards build calculations.
    pub is_buildable: Option<bool>,
    /// Number of sets in the list.
    pub num_sets: Option<u64>,
}

/// A set row inside a set list or the user's collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetListEntry {
    /// Owning list id.
    pub list_id: Option<u64>,
    /// How many copies the user owns.
    pub quantity: Option<u32>,
    /// Whether spare parts are included in build calculations.
    pub include_spares: Option<bool>,
    /// The set.
    pub set: Option<Set>,
}

/// A part row in the user's lists (`allparts`, `parts`, part-list parts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPart {
    /// Owning part list id, absent for aggregate views.
    pub list_id: Option<u64>,
    /// How many copies the user owns.
    pub quantity: u32,
    /// The part.
    pub part: Option<Part>,
    /// The color the copies come in.
    pub color: Color,
}

/// A site badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    /// Badge id.
    pub id: u64,
    /// Badge name.
    pub name: String,
    /// Badge level.
    pub level: Option<u32>,
    /// Badge description.
    pub descr: Option<String>,
}

/// Build-match result for a set against the user's collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    /// Fraction of needed parts the user owns, 0–100.
    pub pct_owned: Option<f64>,
    /// Total parts the set needs.
    pub total_parts: Option<u64>,
    /// Parts the user owns (ignored parts excluded).
    pub num_owned_less_ignored: Option<u64>,
    /// Parts the user is missing.
    pub num_missing: Option<u64>,
    /// Parts ignored by the user's build settings.
    pub num_ignored: Option<u64>,
}

/// A color aggregated across the user's part lists, with the total number
/// of owned parts in that color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorUsage {
    /// The color.
    #[serde(flatten)]
    pub color: Color,
    /// Total quantity across all part lists.
    pub count: u64,
}

/// Colors keyed by name, as produced by the part-list color aggregation.
pub type ColorUsageMap = BTreeMap<String, ColorUsage>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_user_part_shape() {
        let part: UserPart = serde_json::from_value(serde_json::json!({
            "list_id": 12,
            "quantity": 3,
            "part": {"part_num": "3001", "name": "Brick 2 x 4"},
            "color": {"id": 4, "name": "Red", "rgb": "C91A09", "is_trans": false}
        }))
        .unwrap();
        assert_eq!(part.quantity, 3);
        assert_eq!(part.color.name, "Red");
    }

    #[test]
    fn test_color_usage_flattens_color() {
        let usage = ColorUsage {
            color: Color {
                id: 4,
                name: "Red".to_string(),
                rgb: Some("C91A09".to_string()),
                is_trans: Some(false),
            },
            count: 4,
        };
        let value = serde_json::to_value(&usage).unwrap();
        assert_eq!(value["name"], "Red");
        assert_eq!(value["count"], 4);
    }
}
