//! # rebrick-common
//!
//! Common types and data structures for the Rebrickable v3 API.
//!
//! This crate provides the foundational types shared by the `rebrick` client:
//! - Client configuration, including the two authentication modes
//! - Typed query options for list endpoints
//! - Catalog data models (colors, parts, sets, minifigs, themes)
//! - User-collection data models (part lists, set lists, badges, profile)
//!
//! ## Example
//!
//! ```
//! use rebrick_common::{Config, SetFilter};
//!
//! // Configure a client for public catalog access
//! let config = Config::new("your-api-key");
//!
//! // Or for user-scoped access with password login
//! let config = Config::new("your-api-key")
//!     .with_login("brickfan", "hunter2");
//!
//! // Typed query options for list endpoints
//! let filter = SetFilter::builder()
//!     .theme_id(158)
//!     .min_year(2015)
//!     .page_size(50)
//!     .build();
//! ```

/// Catalog data models for the `lego/` endpoint family.
///
/// Colors, elements, parts, sets, minifigs, themes and their inventories.
pub mod catalog;
/// Client configuration and authentication modes.
pub mod config;
/// Typed query options for list endpoints.
///
/// Each struct enumerates the parameters its endpoint family recognizes.
pub mod query;
/// User-collection data models for the `users/` endpoint family.
pub mod users;

pub use catalog::{
    Color, Element, InventoryMinifig, InventoryPart, Minifig, Page, Part, PartCategory, PartColor,
    Set, SetInventorySet, Theme,
};
pub use config::{Config, DEFAULT_BASE_URL, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECONDS};
pub use query::{MinifigFilter, PageOptions, Params, PartFilter, SetFilter, ToQuery};
pub use users::{
    Badge, Build, ColorUsage, ColorUsageMap, LostPart, PartList, Profile, SetList, SetListEntry,
    UserPart,
};
