//! Core data model for solar irradiance climatology
//!
//! An `IrradianceFeed` describes one point on the globe and the monthly
//! climatology of three all-sky surface shortwave irradiance series, as
//! published by the NASA POWER climatology API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Month code (`"JAN"`..`"DEC"`, plus `"ANN"` for the annual mean) to value
pub type MonthlyValues = BTreeMap<String, f64>;

/// Irradiance climatology for a single point
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IrradianceFeed {
    /// Location of the point
    pub geometry: Geometry,
    /// Irradiance series for the point
    pub properties: Properties,
}

/// Point location
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Longitude, latitude and elevation (meters), in that order
    pub coordinates: Vec<f64>,
}

/// Wrapper around the irradiance parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Properties {
    /// The three irradiance series
    pub parameter: Parameter,
}

/// Monthly all-sky surface shortwave irradiance, in kWh/m²/day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parameter {
    /// Direct normal irradiance (`ALLSKY_SFC_SW_DNI`)
    pub direct_normal: MonthlyValues,
    /// Global horizontal irradiance (`ALLSKY_SFC_SW_DWN`)
    pub global_horizontal: MonthlyValues,
    /// Diffuse horizontal irradiance (`ALLSKY_SFC_SW_DIFF`)
    pub diffuse_horizontal: MonthlyValues,
}

impl IrradianceFeed {
    /// Creates a feed from coordinates and the three monthly series
    pub fn new(
        coordinates: Vec<f64>,
        direct_normal: MonthlyValues,
        global_horizontal: MonthlyValues,
        diffuse_horizontal: MonthlyValues,
    ) -> Self {
        Self {
            geometry: Geometry { coordinates },
            properties: Properties {
                parameter: Parameter {
                    direct_normal,
                    global_horizontal,
                    diffuse_horizontal,
                },
            },
        }
    }

    /// The placeholder returned when no fresh data is cached
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this feed carries no coordinates and no irradiance values
    pub fn is_empty(&self) -> bool {
        let parameter = &self.properties.parameter;
        self.geometry.coordinates.is_empty()
            && parameter.direct_normal.is_empty()
            && parameter.global_horizontal.is_empty()
            && parameter.diffuse_horizontal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(pairs: &[(&str, f64)]) -> MonthlyValues {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_feed_is_empty() {
        let feed = IrradianceFeed::empty();

        assert!(feed.is_empty());
        assert!(feed.geometry.coordinates.is_empty());
        assert_eq!(feed, IrradianceFeed::default());
    }

    #[test]
    fn test_feed_with_coordinates_only_is_not_empty() {
        let feed = IrradianceFeed::new(
            vec![-3.88, 42.63, 917.61],
            MonthlyValues::new(),
            MonthlyValues::new(),
            MonthlyValues::new(),
        );

        assert!(!feed.is_empty());
    }

    #[test]
    fn test_equality_is_structural() {
        let a = IrradianceFeed::new(
            vec![1.0, 2.0, 3.0],
            monthly(&[("JAN", 2.38)]),
            monthly(&[("JAN", 1.61)]),
            monthly(&[("JAN", 0.84)]),
        );
        let b = a.clone();
        let c = IrradianceFeed::new(
            vec![1.0, 2.0, 3.0],
            monthly(&[("JAN", 2.38)]),
            monthly(&[("JAN", 1.61)]),
            monthly(&[("JAN", 0.85)]),
        );

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serialized_months_are_ordered() {
        let feed = IrradianceFeed::new(
            vec![],
            monthly(&[("MAR", 3.0), ("ANN", 4.0), ("FEB", 2.0)]),
            MonthlyValues::new(),
            MonthlyValues::new(),
        );

        let json = serde_json::to_string(&feed).expect("Failed to serialize feed");

        let ann = json.find("ANN").expect("ANN present");
        let feb = json.find("FEB").expect("FEB present");
        let mar = json.find("MAR").expect("MAR present");
        assert!(ann < feb && feb < mar);
    }
}
