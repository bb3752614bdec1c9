//! Power source detection by point name.

use polegrid_core::{Diagnostics, TerminalPoint};
use tracing::warn;

/// Name fragments (lowercase) that mark a point as the power source.
pub const SOURCE_KEYWORDS: [&str; 9] = [
    "power source",
    "powersource",
    "source",
    "substation",
    "main source",
    "primary",
    "generator",
    "grid tie",
    "utility",
];

/// Case-insensitive substring match against [`SOURCE_KEYWORDS`].
pub fn is_source_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    SOURCE_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Position (into `points`) of the source: the first point whose name
/// matches a keyword, or the first point when none does. Later matches are
/// recorded as warnings in `diagnostics`.
pub fn detect_source(points: &[TerminalPoint], diagnostics: &mut Diagnostics) -> usize {
    let mut matches = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.name.as_deref().is_some_and(is_source_name));

    let Some((chosen, _)) = matches.next() else {
        return 0;
    };
    for (_, ignored) in matches {
        let name = ignored.name.as_deref().unwrap_or_default();
        warn!(
            point = ignored.input_index,
            name, "ignoring additional power source; it is planned as a destination"
        );
        diagnostics.add_warning_with_entity(
            "source",
            &format!(
                "point #{} also looks like a power source; treated as a destination",
                ignored.input_index
            ),
            name,
        );
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use polegrid_core::GeoPoint;

    fn points(names: &[Option<&str>]) -> Vec<TerminalPoint> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| TerminalPoint {
                input_index: i,
                position: GeoPoint::new(0.0, i as f64 * 0.001).unwrap(),
                name: name.map(str::to_string),
            })
            .collect()
    }

    #[test]
    fn test_keywords_match_case_insensitively() {
        assert!(is_source_name("Main SUBSTATION"));
        assert!(is_source_name("diesel generator"));
        assert!(is_source_name("Grid Tie 2"));
        assert!(is_source_name("PowerSource"));
        assert!(!is_source_name("House 4"));
        assert!(!is_source_name(""));
    }

    #[test]
    fn test_first_match_wins() {
        let pts = points(&[Some("House"), Some("Substation"), Some("Utility pole"), None]);
        let mut diagnostics = Diagnostics::new();
        assert_eq!(detect_source(&pts, &mut diagnostics), 1);
        assert_eq!(diagnostics.warning_count(), 1);
        assert!(diagnostics.messages()[0].contains("point #2"));
    }

    #[test]
    fn test_falls_back_to_first_point() {
        let pts = points(&[Some("House"), None, Some("Clinic")]);
        let mut diagnostics = Diagnostics::new();
        assert_eq!(detect_source(&pts, &mut diagnostics), 0);
        assert!(!diagnostics.has_issues());
    }
}
