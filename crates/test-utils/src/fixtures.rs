//! Common text fixtures for groundwater GIS tests.

/// GeoJSON boundaries.
pub mod boundary {
    /// Rectangular model domain matching the reference extent
    /// (-245000, -153000) to (273000, 154000), CONUS Albers.
    pub const MODEL_DOMAIN_RECT: &str = r#"{
  "type": "FeatureCollection",
  "crs": { "type": "name", "properties": { "name": "EPSG:5070" } },
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "model domain" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[
          [-245000.0, -153000.0], [273000.0, -153000.0],
          [273000.0, 154000.0], [-245000.0, 154000.0],
          [-245000.0, -153000.0]
        ]]
      }
    }
  ]
}"#;

    /// Diamond inscribed in the square [0, 10]², no CRS member.
    pub const DIAMOND: &str = r#"{
  "type": "Polygon",
  "coordinates": [[[5.0, 0.0], [10.0, 5.0], [5.0, 10.0], [0.0, 5.0], [5.0, 0.0]]]
}"#;

    /// Two disjoint unit squares as a MultiPolygon feature.
    pub const TWO_ISLANDS: &str = r#"{
  "type": "Feature",
  "properties": {},
  "geometry": {
    "type": "MultiPolygon",
    "coordinates": [
      [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]],
      [[[3.0, 3.0], [4.0, 3.0], [4.0, 4.0], [3.0, 4.0], [3.0, 3.0]]]
    ]
  }
}"#;

    /// A point feature, which cannot act as a boundary.
    pub const POINT_ONLY: &str = r#"{
  "type": "Feature",
  "properties": {},
  "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
}"#;
}

/// Head observation output files.
pub mod observations {
    /// Metadata for observation names A, B, C.
    ///
    /// One header comment plus one comment per record, so the comment count
    /// minus one equals the record count. Well ids and coordinates carry
    /// thousands separators.
    pub const METADATA_ABC: &str = "\
# LAY ROW COL WELLID X Y TIME OBSNAME
# record A
1 12 40 1,001 -123,456.5 45,678.25 2 A
# record B
1 12 41 210 -120,000.0 45,000.0 1 B
# record C
1 13 40 1,001 -123,456.5 45,678.25 1 C
";

    /// Simulated/observed values for observation names D, C, B (in that order).
    pub const VALUES_BCD: &str = "\
\"SIMULATED EQUIVALENT\"   \"OBSERVED VALUE\"    \"OBSERVATION NAME\"
  101.25      100.5      D
  99.0        98.75      C
  97.5        97.0       B
";

    /// Values file whose header lacks the observation-name column.
    pub const VALUES_NO_KEY: &str = "\
\"SIMULATED EQUIVALENT\"   \"OBSERVED VALUE\"
  101.25      100.5
";

    /// Metadata file without any comment line.
    pub const METADATA_NO_COMMENTS: &str = "\
1 12 40 1001 -123456.5 45678.25 2 A
";

    /// Metadata row with seven fields instead of eight.
    pub const METADATA_SHORT_ROW: &str = "\
# header
# record A
1 12 40 1001 -123456.5 45678.25 A
";
}
