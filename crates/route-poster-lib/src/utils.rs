//! Formatting helpers for captions, summaries and export filenames

/// Fallback export name when a track has no usable name
pub const DEFAULT_EXPORT_STEM: &str = "route-map";

/// Distance in kilometres with two decimals, e.g. `12.34 km`
pub fn format_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Format distance as a human-readable string, switching units by magnitude
pub fn format_distance(meters: f64) -> String {
    let km = meters / 1000.0;
    if km < 1.0 {
        format!("{:.0} m", meters)
    } else if km < 100.0 {
        format!("{:.2} km", km)
    } else {
        format!("{:.0} km", km)
    }
}

/// Whole hours and minutes (`1h 5m`), or just minutes under an hour (`45m`)
pub fn format_duration_short(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Filesystem-safe stem derived from a track name
///
/// Every character that is not an ASCII letter or digit becomes `_`.
pub fn export_file_stem(name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect(),
        None => DEFAULT_EXPORT_STEM.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_km() {
        assert_eq!(format_km(0.0), "0.00 km");
        assert_eq!(format_km(1234.0), "1.23 km");
    }

    #[test]
    fn test_format_distance_units() {
        assert_eq!(format_distance(850.0), "850 m");
        assert_eq!(format_distance(12_340.0), "12.34 km");
        assert_eq!(format_distance(250_000.0), "250 km");
    }

    #[test]
    fn test_format_duration_short() {
        assert_eq!(format_duration_short(59.0), "0m");
        assert_eq!(format_duration_short(45.0 * 60.0), "45m");
        assert_eq!(format_duration_short(3600.0 + 5.0 * 60.0 + 30.0), "1h 5m");
        assert_eq!(format_duration_short(-10.0), "0m");
    }

    #[test]
    fn test_export_file_stem() {
        assert_eq!(export_file_stem(Some("Canal Loop #2")), "Canal_Loop__2");
        assert_eq!(export_file_stem(Some("Île-de-France")), "_le_de_France");
        assert_eq!(export_file_stem(Some("  ")), DEFAULT_EXPORT_STEM);
        assert_eq!(export_file_stem(None), DEFAULT_EXPORT_STEM);
    }
}
