//! NASA POWER climatology endpoint

/// Base URL for point climatology requests
const POWER_CLIMATOLOGY_BASE_URL: &str =
    "https://power.larc.nasa.gov/api/temporal/climatology/point";

/// Parameters requested from the API, matching what the mapper decodes
const POWER_PARAMETERS: &str = "ALLSKY_SFC_SW_DNI,ALLSKY_SFC_SW_DIFF,ALLSKY_SFC_SW_DWN";

/// Default latitude (Sierra de la Demanda, northern Spain)
pub const DEFAULT_LATITUDE: f64 = 42.63;

/// Default longitude
pub const DEFAULT_LONGITUDE: f64 = -3.88;

/// Builds the climatology URL for the given point
///
/// Uses the renewable energy community so values are reported in kWh/m²/day.
pub fn climatology_url(latitude: f64, longitude: f64) -> String {
    format!(
        "{}?latitude={}&longitude={}&community=re&parameters={}&format=json",
        POWER_CLIMATOLOGY_BASE_URL, latitude, longitude, POWER_PARAMETERS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_point_url() {
        assert_eq!(
            climatology_url(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
            "https://power.larc.nasa.gov/api/temporal/climatology/point?latitude=42.63&longitude=-3.88&community=re&parameters=ALLSKY_SFC_SW_DNI,ALLSKY_SFC_SW_DIFF,ALLSKY_SFC_SW_DWN&format=json"
        );
    }

    #[test]
    fn test_url_embeds_coordinates() {
        let url = climatology_url(-33.5, 151.25);
        assert!(url.contains("latitude=-33.5"));
        assert!(url.contains("longitude=151.25"));
    }
}
