//! Byte-count formatting and size-delta reporting.

use crate::types::{StatusReport, TargetFormat};

/// Binary unit suffixes, smallest first.
const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

const K: u64 = 1024;

/// Format a byte count with 1024-based units and two decimals.
///
/// Zero renders as `"0 Bytes"`. Values beyond the gigabyte range stay in GB.
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with(bytes, 2)
}

/// Format a byte count with 1024-based units and `decimals` places.
pub fn format_bytes_with(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let (value, unit) = scale(bytes);
    format!("{value:.decimals$} {unit}")
}

/// Pick the largest unit not exceeding `bytes`, returning the scaled value.
fn scale(bytes: u64) -> (f64, &'static str) {
    let mut index = 0;
    let mut divisor = 1u64;
    while index + 1 < UNITS.len() && bytes >= divisor * K {
        divisor *= K;
        index += 1;
    }
    (bytes as f64 / divisor as f64, UNITS[index])
}

/// Percentage saved going from `original` to `new` bytes.
///
/// Negative when the output is larger. An empty original reports 0.
pub fn reduction_percent(original: u64, new: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    100.0 - (new as f64 / original as f64 * 100.0)
}

/// Render a percentage to one decimal place with a trailing `%`.
pub fn format_percent(percent: f64) -> String {
    let rendered = format!("{percent:.1}");
    // -0.04 would otherwise print as "-0.0"
    if rendered == "-0.0" {
        "0.0%".to_string()
    } else {
        format!("{rendered}%")
    }
}

impl StatusReport {
    /// Build the report for a run that turned `original` bytes into `new` bytes.
    pub fn new(file_name: &str, format: TargetFormat, original: u64, new: u64) -> Self {
        let verb = match format {
            TargetFormat::Image(_) => "Converted",
            TargetFormat::Compressed(_) => "Compressed",
        };
        let reduction = reduction_percent(original, new);
        let summary = format!(
            "{verb} to {} | {} -> {} | Saved {}",
            format.label(),
            format_bytes(original),
            format_bytes(new),
            format_percent(reduction)
        );
        Self {
            file_name: file_name.to_string(),
            format: format.id().to_string(),
            original_size: original,
            new_size: new,
            reduction_percent: reduction,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompressTarget, ImageTarget};

    #[test]
    fn test_zero_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(format_bytes(1), "1.00 Bytes");
        assert_eq!(format_bytes(1023), "1023.00 Bytes");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2.00 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_beyond_gigabytes_stays_in_gb() {
        assert_eq!(format_bytes(5 * 1024u64.pow(4)), "5120.00 GB");
    }

    #[test]
    fn test_formatted_value_scales_back() {
        for n in [1u64, 999, 1024, 4097, 65_535, 1_000_000, 123_456_789, 9_876_543_210] {
            let formatted = format_bytes(n);
            let (number, unit) = formatted.split_once(' ').unwrap();
            let index = UNITS.iter().position(|u| *u == unit).unwrap();
            let restored = number.parse::<f64>().unwrap() * 1024f64.powi(index as i32);
            let tolerance = 0.005 * 1024f64.powi(index as i32);
            assert!(
                (restored - n as f64).abs() <= tolerance,
                "{n} formatted as {formatted}"
            );
        }
    }

    #[test]
    fn test_custom_decimals() {
        assert_eq!(format_bytes_with(1536, 0), "2 KB");
        assert_eq!(format_bytes_with(1536, 3), "1.500 KB");
    }

    #[test]
    fn test_reduction_percent() {
        assert_eq!(format_percent(reduction_percent(1000, 400)), "60.0%");
        assert_eq!(format_percent(reduction_percent(1000, 1200)), "-20.0%");
        assert_eq!(format_percent(reduction_percent(1000, 1000)), "0.0%");
    }

    #[test]
    fn test_reduction_from_empty_original() {
        assert_eq!(reduction_percent(0, 20), 0.0);
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        assert_eq!(format_percent(-0.04), "0.0%");
    }

    #[test]
    fn test_status_report_summary() {
        let report = StatusReport::new(
            "photo.jpg",
            TargetFormat::Image(ImageTarget::Webp),
            2 * 1024 * 1024,
            1024 * 1024,
        );
        assert_eq!(report.summary, "Converted to WEBP | 2.00 MB -> 1.00 MB | Saved 50.0%");
        assert_eq!(report.format, "webp");

        let report = StatusReport::new(
            "log.txt",
            TargetFormat::Compressed(CompressTarget::Gz),
            1000,
            400,
        );
        assert!(report.summary.starts_with("Compressed to GZ | "));
        assert!(report.summary.ends_with("Saved 60.0%"));
    }
}
