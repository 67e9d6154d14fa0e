//! Typed query options for list endpoints.
//!
//! Each filter struct enumerates the parameters its endpoint family
//! recognizes; unset fields are omitted from the request. All filters
//! convert to the generic [`Params`] mapping via [`ToQuery`]; that mapping
//! only exists at the request-engine boundary, and callers work with the
//! typed structs.
//!
//! # Examples
//!
//! ```
//! use rebrick_common::{PartFilter, ToQuery};
//!
//! let filter = PartFilter::builder()
//!     .part_cat_id(11)
//!     .search("brick 2x4")
//!     .build();
//!
//! let params = filter.to_query();
//! assert_eq!(params.get("part_cat_id").map(String::as_str), Some("11"));
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;

use typed_builder::TypedBuilder;

/// Generic query/body parameter mapping.
///
/// A `BTreeMap` keeps the keys sorted, which gives the request fingerprint
/// an order-independent serialization for free.
pub type Params = BTreeMap<String, String>;

/// Conversion from a typed option struct to the generic parameter mapping.
pub trait ToQuery {
    /// Render the set fields as query parameters.
    fn to_query(&self) -> Params;
}

fn push<T: Display>(params: &mut Params, key: &str, value: Option<&T>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.to_string());
    }
}

/// Pagination and ordering options accepted by most list endpoints.
///
/// All fields default to unset, which leaves the server defaults in effect
/// (page 1, server-chosen page size, natural ordering).
///
/// # Examples
///
/// ```
/// use rebrick_common::PageOptions;
///
/// let options = PageOptions::builder().page(2).page_size(100).build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct PageOptions {
    /// 1-based page number to fetch.
    #[builder(default, setter(strip_option))]
    pub page: Option<u32>,
    /// Number of results per page.
    #[builder(default, setter(strip_option))]
    pub page_size: Option<u32>,
    /// Field to order results by; prefix with `-` for descending.
    #[builder(default, setter(strip_option, into))]
    pub ordering: Option<String>,
}

impl PageOptions {
    /// Options requesting a specific page size, everything else unset.
    #[must_use]
    pub const fn sized(page_size: u32) -> Self {
        Self {
            page: None,
            page_size: Some(page_size),
            ordering: None,
        }
    }
}

impl ToQuery for PageOptions {
    fn to_query(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "page", self.page.as_ref());
        push(&mut params, "page_size", self.page_size.as_ref());
        push(&mut params, "ordering", self.ordering.as_ref());
        params
    }
}

/// Filter options for `lego/minifigs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct MinifigFilter {
    /// 1-based page number to fetch.
    #[builder(default, setter(strip_option))]
    pub page: Option<u32>,
    /// Number of results per page.
    #[builder(default, setter(strip_option))]
    pub page_size: Option<u32>,
    /// Only minifigs with at least this many parts.
    #[builder(default, setter(strip_option))]
    pub min_parts: Option<u32>,
    /// Only minifigs with at most this many parts.
    #[builder(default, setter(strip_option))]
    pub max_parts: Option<u32>,
    /// Only minifigs appearing in this set.
    #[builder(default, setter(strip_option, into))]
    pub in_set_num: Option<String>,
    /// Only minifigs appearing in sets of this theme.
    #[builder(default, setter(strip_option, into))]
    pub in_theme_id: Option<String>,
    /// Field to order results by; prefix with `-` for descending.
    #[builder(default, setter(strip_option, into))]
    pub ordering: Option<String>,
    /// Free-text search term.
    #[builder(default, setter(strip_option, into))]
    pub search: Option<String>,
}

impl ToQuery for MinifigFilter {
    fn to_query(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "page", self.page.as_ref());
        push(&mut params, "page_size", self.page_size.as_ref());
        push(&mut params, "min_parts", self.min_parts.as_ref());
        push(&mut params, "max_parts", self.max_parts.as_ref());
        push(&mut params, "in_set_num", self.in_set_num.as_ref());
        push(&mut params, "in_theme_id", self.in_theme_id.as_ref());
        push(&mut params, "ordering", self.ordering.as_ref());
        push(&mut params, "search", self.search.as_ref());
        params
    }
}

/// Filter options for `lego/parts`.
///
/// The external-id filters (`bricklink_id`, `brickowl_id`, `lego_id`,
/// `ldraw_id`) match the part numbering of the respective third-party
/// catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct PartFilter {
    /// 1-based page number to fetch.
    #[builder(default, setter(strip_option))]
    pub page: Option<u32>,
    /// Number of results per page.
    #[builder(default, setter(strip_option))]
    pub page_size: Option<u32>,
    /// Exact part number.
    #[builder(default, setter(strip_option, into))]
    pub part_num: Option<String>,
    /// Comma-separated list of part numbers.
    #[builder(default, setter(strip_option, into))]
    pub part_nums: Option<String>,
    /// Part category id.
    #[builder(default, setter(strip_option))]
    pub part_cat_id: Option<u32>,
    /// Only parts available in this color.
    #[builder(default, setter(strip_option))]
    pub color_id: Option<i32>,
    /// BrickLink part number.
    #[builder(default, setter(strip_option, into))]
    pub bricklink_id: Option<String>,
    /// BrickOwl part number.
    #[builder(default, setter(strip_option, into))]
    pub brickowl_id: Option<String>,
    /// LEGO element id.
    #[builder(default, setter(strip_option, into))]
    pub lego_id: Option<String>,
    /// LDraw part number.
    #[builder(default, setter(strip_option, into))]
    pub ldraw_id: Option<String>,
    /// Field to order results by; prefix with `-` for descending.
    #[builder(default, setter(strip_option, into))]
    pub ordering: Option<String>,
    /// Free-text search term.
    #[builder(default, setter(strip_option, into))]
    pub search: Option<String>,
}

impl ToQuery for PartFilter {
    fn to_query(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "page", self.page.as_ref());
        push(&mut params, "page_size", self.page_size.as_ref());
        push(&mut params, "part_num", self.part_num.as_ref());
        push(&mut params, "part_nums", self.part_nums.as_ref());
        push(&mut params, "part_cat_id", self.part_cat_id.as_ref());
        push(&mut params, "color_id", self.color_id.as_ref());
        push(&mut params, "bricklink_id", self.bricklink_id.as_ref());
        push(&mut params, "brickowl_id", self.brickowl_id.as_ref());
        push(&mut params, "lego_id", self.lego_id.as_ref());
        push(&mut params, "ldraw_id", self.ldraw_id.as_ref());
        push(&mut params, "ordering", self.ordering.as_ref());
        push(&mut params, "search", self.search.as_ref());
        params
    }
}

/// Filter options for `lego/sets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct SetFilter {
    /// 1-based page number to fetch.
    #[builder(default, setter(strip_option))]
    pub page: Option<u32>,
    /// Number of results per page.
    #[builder(default, setter(strip_option))]
    pub page_size: Option<u32>,
    /// Only sets belonging to this theme.
    #[builder(default, setter(strip_option))]
    pub theme_id: Option<u32>,
    /// Only sets released in or after this year.
    #[builder(default, setter(strip_option))]
    pub min_year: Option<u16>,
    /// Only sets released in or before this year.
    #[builder(default, setter(strip_option))]
    pub max_year: Option<u16>,
    /// Only sets with at least this many parts.
    #[builder(default, setter(strip_option))]
    pub min_parts: Option<u32>,
    /// Only sets with at most this many parts.
    #[builder(default, setter(strip_option))]
    pub max_parts: Option<u32>,
    /// Field to order results by; prefix with `-` for descending.
    #[builder(default, setter(strip_option, into))]
    pub ordering: Option<String>,
    /// Free-text search term.
    #[builder(default, setter(strip_option, into))]
    pub search: Option<String>,
}

impl ToQuery for SetFilter {
    fn to_query(&self) -> Params {
        let mut params = Params::new();
        push(&mut params, "page", self.page.as_ref());
        push(&mut params, "page_size", self.page_size.as_ref());
        push(&mut params, "theme_id", self.theme_id.as_ref());
        push(&mut params, "min_year", self.min_year.as_ref());
        push(&mut params, "max_year", self.max_year.as_ref());
        push(&mut params, "min_parts", self.min_parts.as_ref());
        push(&mut params, "max_parts", self.max_parts.as_ref());
        push(&mut params, "ordering", self.ordering.as_ref());
        push(&mut params, "search", self.search.as_ref());
        params
    }
}
