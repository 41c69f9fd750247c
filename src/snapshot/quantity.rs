//! Parsing of kubernetes resource quantities into cores and GiB.

use crate::core::error::FeedError;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// `"250m"` is a quarter of a core, plain numbers are cores.
pub fn parse_cpu(quantity: &str) -> Result<f64, FeedError> {
    let quantity = quantity.trim();
    let (number, divisor) = match quantity.strip_suffix('m') {
        Some(millis) => (millis, 1000.0),
        None => (quantity, 1.0),
    };
    number
        .parse::<f64>()
        .map(|value| value / divisor)
        .map_err(|_| FeedError::Quantity(quantity.to_string()))
}

/// Binary suffixes `Ki`, `Mi`, `Gi`, `Ti`; a plain number is bytes. Result is in GiB.
pub fn parse_memory(quantity: &str) -> Result<f64, FeedError> {
    let quantity = quantity.trim();
    let suffixes: [(&str, f64); 4] = [
        ("Ki", 1024.0),
        ("Mi", 1024.0 * 1024.0),
        ("Gi", GIB),
        ("Ti", 1024.0 * GIB),
    ];
    let (number, multiplier) = suffixes
        .iter()
        .find_map(|(suffix, multiplier)| {
            quantity
                .strip_suffix(suffix)
                .map(|number| (number, *multiplier))
        })
        .unwrap_or((quantity, 1.0));
    number
        .parse::<f64>()
        .map(|value| value * multiplier / GIB)
        .map_err(|_| FeedError::Quantity(quantity.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_cpu, parse_memory};

    #[test]
    fn test_parse_cpu() {
        assert_eq!(parse_cpu("500m").unwrap(), 0.5);
        assert_eq!(parse_cpu("2").unwrap(), 2.0);
        assert_eq!(parse_cpu("1.5").unwrap(), 1.5);
        assert!(parse_cpu("two").is_err());
    }

    #[test]
    fn test_parse_memory() {
        assert_eq!(parse_memory("2Gi").unwrap(), 2.0);
        assert_eq!(parse_memory("512Mi").unwrap(), 0.5);
        assert_eq!(parse_memory("16777216Ki").unwrap(), 16.0);
        assert_eq!(parse_memory("1Ti").unwrap(), 1024.0);
        assert_eq!(parse_memory("1073741824").unwrap(), 1.0);
        assert!(parse_memory("1GB").is_err());
    }
}
