/// Format a number for display with a fixed number of decimal places.
pub fn format_number(n: f64, precision: usize) -> String {
    format!("{:.*}", precision, n)
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0, 1), "12.0");
        assert_eq!(format_number(0.26, 1), "0.3");
        assert_eq!(format_number(-3.0, 1), "-3.0");
        assert_eq!(format_number(2.5, 3), "2.500");
        assert_eq!(format_number(7.0, 0), "7");
    }
}
