//! Catalog endpoints under `lego/`.
//!
//! Every method is a thin wrapper: substitute path parameters, render the
//! typed options as query parameters, delegate to the request engine. All
//! methods return `Ok(None)` when the API reports an application-level
//! error (e.g. an unknown id).

use std::sync::Arc;

use rebrick_common::{
    Color, Element, InventoryMinifig, InventoryPart, Minifig, MinifigFilter, Page, PageOptions,
    Params, Part, PartCategory, PartColor, PartFilter, Set, SetFilter, SetInventorySet, Theme,
    ToQuery,
};

use crate::engine::RequestEngine;
use crate::error::ClientError;

/// The `lego/` endpoint family: the public LEGO catalog.
///
/// Obtained from [`Rebrick::lego`](crate::Rebrick::lego).
pub struct LegoApi {
    engine: Arc<RequestEngine>,
}

impl LegoApi {
    pub(crate) const fn new(engine: Arc<RequestEngine>) -> Self {
        Self { engine }
    }

    /// Get a list of all colors.
    pub async fn get_colors(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<Color>>, ClientError> {
        self.engine.get("lego/colors", options.to_query()).await
    }

    /// Get details about a specific color.
    pub async fn get_color(&self, color_id: i32) -> Result<Option<Color>, ClientError> {
        self.engine
            .get(&format!("lego/colors/{color_id}"), Params::new())
            .await
    }

    /// Get details about a specific element id.
    pub async fn get_element(&self, element_id: &str) -> Result<Option<Element>, ClientError> {
        self.engine
            .get(&format!("lego/elements/{element_id}"), Params::new())
            .await
    }

    /// Get a list of minifigs.
    pub async fn get_minifigs(
        &self,
        filter: &MinifigFilter,
    ) -> Result<Option<Page<Minifig>>, ClientError> {
        self.engine.get("lego/minifigs", filter.to_query()).await
    }

    /// Get details for a specific minifig.
    pub async fn get_minifig(&self, set_num: &str) -> Result<Option<Minifig>, ClientError> {
        self.engine
            .get(&format!("lego/minifigs/{set_num}"), Params::new())
            .await
    }

    /// Get all inventory parts in a minifig.
    pub async fn get_minifig_parts(
        &self,
        set_num: &str,
    ) -> Result<Option<Page<InventoryPart>>, ClientError> {
        self.engine
            .get(&format!("lego/minifigs/{set_num}/parts"), Params::new())
            .await
    }

    /// Get the sets a minifig has appeared in.
    pub async fn get_minifig_sets(
        &self,
        set_num: &str,
    ) -> Result<Option<Page<Set>>, ClientError> {
        self.engine
            .get(&format!("lego/minifigs/{set_num}/sets"), Params::new())
            .await
    }

    /// Get a list of all part categories.
    pub async fn get_part_categories(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<PartCategory>>, ClientError> {
        self.engine
            .get("lego/part_categories", options.to_query())
            .await
    }

    /// Get details about a specific part category.
    pub async fn get_part_category(
        &self,
        category_id: u32,
    ) -> Result<Option<PartCategory>, ClientError> {
        self.engine
            .get(&format!("lego/part_categories/{category_id}"), Params::new())
            .await
    }

    /// Get a list of parts.
    pub async fn get_parts(&self, filter: &PartFilter) -> Result<Option<Page<Part>>, ClientError> {
        self.engine.get("lego/parts", filter.to_query()).await
    }

    /// Get details about a specific part.
    pub async fn get_part(&self, part_num: &str) -> Result<Option<Part>, ClientError> {
        self.engine
            .get(&format!("lego/parts/{part_num}"), Params::new())
            .await
    }

    /// Get all colors a part has appeared in.
    pub async fn get_part_colors(
        &self,
        part_num: &str,
    ) -> Result<Option<Page<PartColor>>, ClientError> {
        self.engine
            .get(&format!("lego/parts/{part_num}/colors"), Params::new())
            .await
    }

    /// Get details about a specific part/color combination.
    pub async fn get_part_color(
        &self,
        part_num: &str,
        color_id: i32,
    ) -> Result<Option<PartColor>, ClientError> {
        self.engine
            .get(
                &format!("lego/parts/{part_num}/colors/{color_id}"),
                Params::new(),
            )
            .await
    }

    /// Get all sets a part/color combination has appeared in.
    pub async fn get_part_color_sets(
        &self,
        part_num: &str,
        color_id: i32,
        options: &PageOptions,
    ) -> Result<Option<Page<Set>>, ClientError> {
        self.engine
            .get(
                &format!("lego/parts/{part_num}/colors/{color_id}/sets"),
                options.to_query(),
            )
            .await
    }

    /// Get a list of sets, optionally filtered.
    pub async fn get_sets(&self, filter: &SetFilter) -> Result<Option<Page<Set>>, ClientError> {
        self.engine.get("lego/sets", filter.to_query()).await
    }

    /// Get details for a specific set.
    pub async fn get_set(&self, set_num: &str) -> Result<Option<Set>, ClientError> {
        self.engine
            .get(&format!("lego/sets/{set_num}"), Params::new())
            .await
    }

    /// Get MOCs which are alternate builds of a specific set.
    pub async fn get_set_alternates(
        &self,
        set_num: &str,
        options: &PageOptions,
    ) -> Result<Option<Page<Set>>, ClientError> {
        self.engine
            .get(&format!("lego/sets/{set_num}/alternates"), options.to_query())
            .await
    }

    /// Get all inventory minifigs in a set.
    pub async fn get_set_minifigs(
        &self,
        set_num: &str,
        options: &PageOptions,
    ) -> Result<Option<Page<InventoryMinifig>>, ClientError> {
        self.engine
            .get(&format!("lego/sets/{set_num}/minifigs"), options.to_query())
            .await
    }

    /// Get all inventory parts in a set.
    pub async fn get_set_parts(
        &self,
        set_num: &str,
        options: &PageOptions,
    ) -> Result<Option<Page<InventoryPart>>, ClientError> {
        self.engine
            .get(&format!("lego/sets/{set_num}/parts"), options.to_query())
            .await
    }

    /// Get all inventory sets in a set.
    pub async fn get_set_sets(
        &self,
        set_num: &str,
        options: &PageOptions,
    ) -> Result<Option<Page<SetInventorySet>>, ClientError> {
        self.engine
            .get(&format!("lego/sets/{set_num}/sets"), options.to_query())
            .await
    }

    /// Get all themes.
    pub async fn get_themes(
        &self,
        options: &PageOptions,
    ) -> Result<Option<Page<Theme>>, ClientError> {
        self.engine.get("lego/themes", options.to_query()).await
    }

    /// Get details for a specific theme.
    pub async fn get_theme(&self, theme_id: u32) -> Result<Option<Theme>, ClientError> {
        self.engine
            .get(&format!("lego/themes/{theme_id}"), Params::new())
            .await
    }
}
