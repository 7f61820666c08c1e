//! Boundary polygons and GeoJSON loading.
//!
//! Every polygonal part of the input (Polygon, MultiPolygon, and those nested
//! in Features, FeatureCollections or GeometryCollections) is kept as one
//! multipolygon. Non-polygonal geometries are ignored.

use std::path::Path;

use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon};
use geojson::{GeoJson, Geometry, JsonObject, Value};
use gw_common::{BoundingBox, Crs, GwError, GwResult};
use tracing::debug;

/// A read-only boundary geometry with its coordinate reference system.
#[derive(Debug, Clone)]
pub struct BoundaryPolygon {
    geometry: MultiPolygon<f64>,
    crs: Crs,
    bbox: BoundingBox,
}

impl BoundaryPolygon {
    /// Wrap a multipolygon; it must be non-empty with a positive-area extent.
    pub fn new(geometry: MultiPolygon<f64>, crs: Crs) -> GwResult<Self> {
        let rect = geometry
            .bounding_rect()
            .ok_or_else(|| GwError::format("boundary has no polygon vertices"))?;
        let bbox = BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y);
        bbox.validate()
            .map_err(|e| GwError::format(format!("degenerate boundary: {}", e)))?;

        Ok(Self {
            geometry,
            crs,
            bbox,
        })
    }

    /// Build a boundary from closed exterior rings.
    pub fn from_rings(rings: &[Vec<(f64, f64)>], crs: Crs) -> GwResult<Self> {
        let polygons = rings
            .iter()
            .map(|ring| {
                let coords: Vec<Coord<f64>> =
                    ring.iter().map(|&(x, y)| Coord { x, y }).collect();
                Polygon::new(LineString::from(coords), vec![])
            })
            .collect();
        Self::new(MultiPolygon(polygons), crs)
    }

    /// Load a boundary from a GeoJSON file.
    ///
    /// The CRS comes from the GeoJSON `crs` member when present, otherwise
    /// from `default_crs`, otherwise WGS84.
    pub fn from_geojson_file(path: impl AsRef<Path>, default_crs: Option<Crs>) -> GwResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GwError::Io(format!("{}: {}", path.display(), e)))?;
        let boundary = Self::from_geojson_str(&text, default_crs)
            .map_err(|e| match e {
                GwError::FormatError(msg) => {
                    GwError::FormatError(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })?;

        debug!(
            path = %path.display(),
            polygons = boundary.geometry.0.len(),
            crs = %boundary.crs,
            "Loaded boundary"
        );
        Ok(boundary)
    }

    /// Parse a boundary from GeoJSON text.
    pub fn from_geojson_str(text: &str, default_crs: Option<Crs>) -> GwResult<Self> {
        let gj: GeoJson = text
            .parse()
            .map_err(|e| GwError::format(format!("invalid GeoJSON: {}", e)))?;

        let mut polygons = Vec::new();
        let named_crs = match &gj {
            GeoJson::Geometry(g) => {
                collect_polygons(g, &mut polygons)?;
                crs_member(g.foreign_members.as_ref())
            }
            GeoJson::Feature(f) => {
                if let Some(g) = &f.geometry {
                    collect_polygons(g, &mut polygons)?;
                }
                crs_member(f.foreign_members.as_ref())
            }
            GeoJson::FeatureCollection(fc) => {
                for g in fc.features.iter().filter_map(|f| f.geometry.as_ref()) {
                    collect_polygons(g, &mut polygons)?;
                }
                crs_member(fc.foreign_members.as_ref())
            }
        };

        if polygons.is_empty() {
            return Err(GwError::format("GeoJSON contains no Polygon or MultiPolygon"));
        }

        let crs = named_crs.or(default_crs).unwrap_or_else(Crs::wgs84);
        Self::new(MultiPolygon(polygons), crs)
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Axis-aligned bounding box of all polygon parts.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Exterior and interior rings as coordinate lists, for drawing.
    pub fn rings(&self) -> Vec<Vec<(f64, f64)>> {
        self.geometry
            .0
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
            .map(|ls| ls.coords().map(|c| (c.x, c.y)).collect())
            .collect()
    }
}

fn crs_member(members: Option<&JsonObject>) -> Option<Crs> {
    members?
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()
        .map(Crs::new)
}

fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon<f64>>) -> GwResult<()> {
    match &geometry.value {
        Value::Polygon(rings) => out.push(to_polygon(rings)?),
        Value::MultiPolygon(parts) => {
            for rings in parts {
                out.push(to_polygon(rings)?);
            }
        }
        Value::GeometryCollection(members) => {
            for member in members {
                collect_polygons(member, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> GwResult<Polygon<f64>> {
    let mut lines = rings.iter().map(|ring| to_line_string(ring));
    let exterior = lines
        .next()
        .ok_or_else(|| GwError::format("polygon without an exterior ring"))??;
    let interiors = lines.collect::<GwResult<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_line_string(ring: &[Vec<f64>]) -> GwResult<LineString<f64>> {
    if ring.len() < 4 {
        return Err(GwError::format(format!(
            "polygon ring needs at least 4 positions, got {}",
            ring.len()
        )));
    }
    let coords = ring
        .iter()
        .map(|pos| match pos.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
            _ => Err(GwError::format(format!("invalid position {:?}", pos))),
        })
        .collect::<GwResult<Vec<_>>>()?;
    Ok(LineString::from(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_common::ErrorKind;
    use test_utils::boundary;

    #[test]
    fn test_feature_collection_with_crs() {
        let b = BoundaryPolygon::from_geojson_str(boundary::MODEL_DOMAIN_RECT, None).unwrap();
        assert_eq!(b.crs(), &Crs::from_epsg(5070));
        assert_eq!(
            b.bbox(),
            BoundingBox::new(-245000.0, -153000.0, 273000.0, 154000.0)
        );
    }

    #[test]
    fn test_default_crs_used_without_member() {
        let b = BoundaryPolygon::from_geojson_str(boundary::DIAMOND, Some(Crs::from_epsg(26914)))
            .unwrap();
        assert_eq!(b.crs(), &Crs::from_epsg(26914));

        let b = BoundaryPolygon::from_geojson_str(boundary::DIAMOND, None).unwrap();
        assert_eq!(b.crs(), &Crs::wgs84());
    }

    #[test]
    fn test_multipolygon_parts_kept() {
        let b = BoundaryPolygon::from_geojson_str(boundary::TWO_ISLANDS, None).unwrap();
        assert_eq!(b.geometry().0.len(), 2);
        assert_eq!(b.bbox(), BoundingBox::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(b.rings().len(), 2);
    }

    #[test]
    fn test_point_only_rejected() {
        let err = BoundaryPolygon::from_geojson_str(boundary::POINT_ONLY, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FormatError);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = BoundaryPolygon::from_geojson_str("{ not json", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FormatError);
    }

    #[test]
    fn test_missing_file_is_io() {
        let err = BoundaryPolygon::from_geojson_file("/nonexistent/domain.geojson", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
