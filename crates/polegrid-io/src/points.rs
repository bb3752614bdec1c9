//! Point lists from CSV.
//!
//! Expected format (header names are case-insensitive, `Name` is optional):
//! ```csv
//! Latitude,Longitude,Name
//! -1.2921,36.8219,Substation
//! -1.2925,36.8223,Clinic
//! ```
//!
//! `lat`/`lng`/`lon` are accepted as header aliases. Rows with an empty
//! coordinate are skipped with a warning; a coordinate that is present but
//! not a number rejects the file.

use crate::error::{IoError, IoResult};
use polegrid_core::{Diagnostics, RawPoint};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Points read from a CSV file plus any skipped-row warnings.
#[derive(Debug, Clone, Default)]
pub struct PointsImport {
    pub points: Vec<RawPoint>,
    pub diagnostics: Diagnostics,
}

pub fn read_points_csv(path: &Path) -> IoResult<PointsImport> {
    let file = std::fs::File::open(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_points_csv(file)
}

pub fn parse_points_csv<R: Read>(reader: R) -> IoResult<PointsImport> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };
    let lat_col = column(&["latitude", "lat"]).ok_or(IoError::MissingColumn("Latitude"))?;
    let lng_col =
        column(&["longitude", "lng", "lon"]).ok_or(IoError::MissingColumn("Longitude"))?;
    let name_col = column(&["name"]);

    let mut import = PointsImport::default();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row + 2);

        let lat = parse_coordinate(record.get(lat_col), "latitude", line)?;
        let lng = parse_coordinate(record.get(lng_col), "longitude", line)?;
        let (Some(lat), Some(lng)) = (lat, lng) else {
            warn!(line, "skipping CSV row with a missing coordinate");
            import.diagnostics.add_warning_at_line(
                "csv",
                "row skipped: missing latitude or longitude",
                line,
            );
            continue;
        };

        let name = name_col
            .and_then(|c| record.get(c))
            .filter(|n| !n.is_empty());
        import.points.push(RawPoint::new(lat, lng, name));
    }
    Ok(import)
}

fn parse_coordinate(field: Option<&str>, what: &str, line: usize) -> IoResult<Option<f64>> {
    match field {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<f64>().map(Some).map_err(|_| IoError::InvalidRow {
            line,
            message: format!("{what} '{text}' is not a number"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_named_points() {
        let csv = "Latitude,Longitude,Name\n0.0,0.0,Substation\n0.0,0.001,Clinic\n0.001,0.0,\n";
        let import = parse_points_csv(csv.as_bytes()).unwrap();

        assert_eq!(import.points.len(), 3);
        assert_eq!(import.points[0].name.as_deref(), Some("Substation"));
        assert_eq!(import.points[1].lng, Some(0.001));
        assert_eq!(import.points[2].name, None);
        assert!(!import.diagnostics.has_issues());
    }

    #[test]
    fn test_headers_are_case_insensitive_and_name_optional() {
        let csv = "id,LAT,lng\n1, 10.5 , 20.25\n";
        let import = parse_points_csv(csv.as_bytes()).unwrap();
        assert_eq!(import.points, vec![RawPoint::new(10.5, 20.25, None)]);
    }

    #[test]
    fn test_rows_missing_coordinates_are_skipped() {
        let csv = "Latitude,Longitude\n0.0,0.0\n,0.001\n0.002,\n0.003,0.003\n";
        let import = parse_points_csv(csv.as_bytes()).unwrap();

        assert_eq!(import.points.len(), 2);
        assert_eq!(import.diagnostics.warning_count(), 2);
        assert!(import.diagnostics.messages()[0].contains("line 3"));
    }

    #[test]
    fn test_non_numeric_coordinate_is_an_error() {
        let csv = "Latitude,Longitude\n0.0,0.0\nnorth,0.001\n";
        let err = parse_points_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::InvalidRow { line: 3, .. }));
        assert!(err.to_string().contains("'north'"));
    }

    #[test]
    fn test_missing_column() {
        let csv = "Latitude,Name\n0.0,A\n";
        assert!(matches!(
            parse_points_csv(csv.as_bytes()),
            Err(IoError::MissingColumn("Longitude"))
        ));
    }
}
