//! Coordinate Reference System definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque CRS definition carried from inputs to outputs.
///
/// The text can be an authority code ("EPSG:26914"), a WKT string or a
/// PROJ string. No transformation is ever performed; the definition is only
/// stamped onto derived grids and written next to persisted rasters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs(String);

impl Crs {
    pub fn new(definition: impl Into<String>) -> Self {
        Self(definition.into().trim().to_string())
    }

    /// Build a CRS from an EPSG code.
    pub fn from_epsg(code: u32) -> Self {
        Self(format!("EPSG:{}", code))
    }

    /// WGS84 geographic, the GeoJSON default.
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// The raw definition text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the EPSG code when the definition is of the form `EPSG:nnnn`
    /// (case-insensitive) or an OGC URN ending in `EPSG::nnnn`.
    pub fn epsg(&self) -> Option<u32> {
        let upper = self.0.to_uppercase();
        let code = if let Some(rest) = upper.strip_prefix("EPSG:") {
            rest
        } else if upper.starts_with("URN:OGC:DEF:CRS:EPSG:") {
            upper.rsplit(':').next()?
        } else {
            return None;
        };
        code.trim().parse().ok()
    }

    /// The definition text when it is WKT (WKT1 or WKT2), the form ESRI
    /// and GDAL expect in a `.prj` file.
    pub fn wkt(&self) -> Option<&str> {
        const ROOTS: [&str; 8] = [
            "PROJCS[", "GEOGCS[", "GEOCCS[", "COMPD_CS[",
            "PROJCRS[", "GEOGCRS[", "GEODCRS[", "COMPOUNDCRS[",
        ];
        let upper = self.0.to_ascii_uppercase();
        ROOTS
            .iter()
            .any(|root| upper.starts_with(root))
            .then_some(self.0.as_str())
    }

    /// Whether the EPSG code falls in the geographic 2D range (4000-4999).
    pub fn is_geographic(&self) -> bool {
        matches!(self.epsg(), Some(code) if (4000..5000).contains(&code))
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
