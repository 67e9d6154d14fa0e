//! Catalog data models for the `lego/` endpoint family.
//!
//! Deserialization is tolerant: unknown fields are ignored and everything
//! that is not an identifier is optional, so minor server-side schema
//! changes do not break callers. Validating payloads beyond what the
//! caller actually reads is out of scope.

use serde::{Deserialize, Serialize};

/// One page of a paginated list response.
///
/// Every list endpoint returns this envelope. `next` and `previous` hold
/// fully-qualified URLs that can be fed back into the raw request
/// operation; following them automatically is left to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of results across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// The results on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A LEGO color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Rebrickable color id (`-1` means "unknown").
    pub id: i32,
    /// Human-readable color name.
    pub name: String,
    /// Hex RGB value without the leading `#`.
    pub rgb: Option<String>,
    /// Whether the color is transparent.
    pub is_trans: Option<bool>,
}

/// A specific part/color mold, keyed by LEGO element id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// LEGO element id.
    pub element_id: String,
    /// The part this element molds.
    pub part: Option<Part>,
    /// The color this element is molded in.
    pub color: Option<Color>,
    /// LEGO design id.
    pub design_id: Option<String>,
    /// Image URL for the element.
    pub element_img_url: Option<String>,
}

/// A minifig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Minifig {
    /// Rebrickable minifig number (`fig-` prefix).
    pub set_num: String,
    /// Minifig name.
    pub name: String,
    /// Number of parts in the minifig.
    pub num_parts: Option<u32>,
    /// Image URL.
    pub set_img_url: Option<String>,
    /// Rebrickable page URL.
    pub set_url: Option<String>,
    /// Timestamp of the last catalog modification.
    pub last_modified_dt: Option<String>,
}

/// A part category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartCategory {
    /// Category id.
    pub id: u32,
    /// Category name.
    pub name: String,
    /// Number of parts in the category.
    pub part_count: Option<u64>,
}

/// A part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Rebrickable part number.
    pub part_num: String,
    /// Part name.
    pub name: String,
    /// Category id.
    pub part_cat_id: Option<u32>,
    /// First year the part appeared.
    pub year_from: Option<u16>,
    /// Last year the part appeared.
    pub year_to: Option<u16>,
    /// Rebrickable page URL.
    pub part_url: Option<String>,
    /// Image URL.
    pub part_img_url: Option<String>,
    /// Part number this is a print of, if any.
    pub print_of: Option<String>,
    /// Part numbers in third-party catalogs.
    pub external_ids: Option<serde_json::Value>,
}

/// A color a part has appeared in, with availability counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartColor {
    /// Color id.
    pub color_id: i32,
    /// Color name.
    pub color_name: Option<String>,
    /// Number of sets the part/color combination appears in.
    pub num_sets: Option<u64>,
    /// Total quantity across those sets.
    pub num_set_parts: Option<u64>,
    /// Image URL for the part in this color.
    pub part_img_url: Option<String>,
    /// Element ids molding this combination.
    pub elements: Option<Vec<String>>,
}

/// A set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Set {
    /// Rebrickable set number (with variant suffix, e.g. `75192-1`).
    pub set_num: String,
    /// Set name.
    pub name: String,
    /// Release year.
    pub year: Option<u16>,
    /// Theme id.
    pub theme_id: Option<u32>,
    /// Number of parts in the set.
    pub num_parts: Option<u32>,
    /// Image URL.
    pub set_img_url: Option<String>,
    /// Rebrickable page URL.
    pub set_url: Option<String>,
    /// Timestamp of the last catalog modification.
    pub last_modified_dt: Option<String>,
}

/// A set contained in another set's inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetInventorySet {
    /// Inventory row id.
    pub id: Option<u64>,
    /// Set number of the contained set.
    pub set_num: String,
    /// Name of the contained set.
    pub set_name: Option<String>,
    /// How many copies the inventory contains.
    pub quantity: Option<u32>,
    /// Image URL.
    pub set_img_url: Option<String>,
}

/// A part row in a set or minifig inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryPart {
    /// Inventory row id.
    pub id: Option<u64>,
    /// The part.
    pub part: Part,
    /// The color the part comes in.
    pub color: Color,
    /// Set the inventory belongs to.
    pub set_num: Option<String>,
    /// How many copies the inventory contains.
    pub quantity: u32,
    /// Whether the part is a spare.
    pub is_spare: Option<bool>,
    /// LEGO element id of the part/color combination.
    pub element_id: Option<String>,
    /// Number of sets this row's combination appears in.
    pub num_sets: Option<u64>,
}

/// A minifig row in a set inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMinifig {
    /// Inventory row id.
    pub id: Option<u64>,
    /// Rebrickable minifig number.
    pub set_num: String,
    /// Minifig name.
    pub set_name: Option<String>,
    /// How many copies the inventory contains.
    pub quantity: Option<u32>,
    /// Image URL.
    pub set_img_url: Option<String>,
}

/// A theme, optionally nested under a parent theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme id.
    pub id: u32,
    /// Parent theme id, absent for top-level themes.
    pub parent_id: Option<u32>,
    /// Theme name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_color_tolerates_unknown_fields() {
        let color: Color = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Red",
            "rgb": "C91A09",
            "is_trans": false,
            "external_ids": {"BrickLink": {"ext_ids": [5]}}
        }))
        .unwrap();
        assert_eq!(color.id, 4);
        assert_eq!(color.name, "Red");
        assert_eq!(color.rgb.as_deref(), Some("C91A09"));
    }

    #[test]
    fn test_page_envelope() {
        let page: Page<Theme> = serde_json::from_value(serde_json::json!({
            "count": 3,
            "next": "https://rebrickable.com/api/v3/lego/themes/?page=2",
            "previous": null,
            "results": [{"id": 1, "parent_id": null, "name": "Technic"}]
        }))
        .unwrap();
        assert_eq!(page.count, 3);
        assert!(page.has_next());
        assert_eq!(page.results[0].name, "Technic");
    }
}
