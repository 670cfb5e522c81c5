//! Number formatting for prices shown on the list pages

/// Groups the integer part the Indian way: the last three digits, then
/// pairs (`1234567` -> `12,34,567`).
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::group_indian;
/// assert_eq!(group_indian(100000.0), "1,00,000");
/// ```
pub fn group_indian(value: f64) -> String {
    let formatted = format!("{:.0}", value);
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };

    let mut result = String::new();
    let chars: Vec<char> = digits.chars().rev().collect();

    for (i, c) in chars.iter().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            result.push(',');
        }
        result.push(*c);
    }

    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Rupee amount, e.g. `₹1,49,990`
pub fn format_inr(value: f64) -> String {
    format!("₹{}", group_indian(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(0.0), "0");
        assert_eq!(group_indian(999.0), "999");
        assert_eq!(group_indian(1000.0), "1,000");
        assert_eq!(group_indian(20000.0), "20,000");
        assert_eq!(group_indian(100000.0), "1,00,000");
        assert_eq!(group_indian(1234567.0), "12,34,567");
        assert_eq!(group_indian(-45000.0), "-45,000");
    }

    #[test]
    fn test_format_inr_rounds() {
        assert_eq!(format_inr(29999.6), "₹30,000");
        assert_eq!(format_inr(500000.0), "₹5,00,000");
    }
}
