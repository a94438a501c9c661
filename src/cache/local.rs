//! Persisted representation of the feed
//!
//! Stores keep a flat record instead of the nested API shape so the on-disk
//! layout does not change when the domain model is reorganised.

use serde::{Deserialize, Serialize};

use crate::feed::{IrradianceFeed, MonthlyValues};

/// Flat, storage-oriented copy of an [`IrradianceFeed`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalIrradianceFeed {
    /// Longitude, latitude and elevation
    pub coordinates: Vec<f64>,
    /// Direct normal irradiance by month
    pub direct_normal: MonthlyValues,
    /// Global horizontal irradiance by month
    pub global_horizontal: MonthlyValues,
    /// Diffuse horizontal irradiance by month
    pub diffuse_horizontal: MonthlyValues,
}

impl From<&IrradianceFeed> for LocalIrradianceFeed {
    fn from(feed: &IrradianceFeed) -> Self {
        let parameter = &feed.properties.parameter;
        Self {
            coordinates: feed.geometry.coordinates.clone(),
            direct_normal: parameter.direct_normal.clone(),
            global_horizontal: parameter.global_horizontal.clone(),
            diffuse_horizontal: parameter.diffuse_horizontal.clone(),
        }
    }
}

impl From<LocalIrradianceFeed> for IrradianceFeed {
    fn from(local: LocalIrradianceFeed) -> Self {
        IrradianceFeed::new(
            local.coordinates,
            local.direct_normal,
            local.global_horizontal,
            local.diffuse_horizontal,
        )
    }
}
