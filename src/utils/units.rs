//! Time unit conversions shared by analysis and rendering.

pub fn ns_to_ms(ns: i64) -> f64 {
    ns as f64 / 1.0e6
}

pub fn ns_to_us(ns: i64) -> f64 {
    ns as f64 / 1.0e3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ns_conversions() {
        assert_eq!(ns_to_ms(2_500_000), 2.5);
        assert_eq!(ns_to_us(1_500), 1.5);
        assert_eq!(ns_to_ms(0), 0.0);
    }
}
