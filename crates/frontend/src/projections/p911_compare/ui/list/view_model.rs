use contracts::projections::p911_compare::dto::ProductDto;
use std::collections::HashSet;

const CM_PER_INCH: f64 = 2.54;

/// One card per model; the backend returns a row per platform listing.
pub fn dedupe_models(products: Vec<ProductDto>) -> Vec<ProductDto> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| seen.insert(p.model_id.clone()))
        .collect()
}

/// Keeps products whose name mentions `<size> inch`.
pub fn filter_by_screen_size(products: Vec<ProductDto>, size: u32) -> Vec<ProductDto> {
    let needle = format!("{} inch", size);
    products
        .into_iter()
        .filter(|p| p.full_name.to_lowercase().contains(&needle))
        .collect()
}

/// Finds a 2-3 digit number directly followed (after optional spaces) by
/// `unit`, case-insensitive.
fn number_before_unit(name: &str, unit: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let digits = &lower[start..i];
        let rest = lower[i..].trim_start();
        if rest.starts_with(unit) {
            // "1080 cm" still contains "080 cm"
            let tail = &digits[digits.len().saturating_sub(3)..];
            if (2..=3).contains(&tail.len()) {
                return tail.parse().ok();
            }
        }
    }
    None
}

/// Screen diagonal in inches as printed on the card (`55"`), read from
/// the product name. Centimetre sizes are converted.
pub fn screen_size_label(name: &str) -> Option<String> {
    if let Some(inches) = number_before_unit(name, "inch") {
        return Some(format!("{}\"", inches));
    }
    number_before_unit(name, "cm")
        .map(|cm| format!("{}\"", (cm as f64 / CM_PER_INCH).round() as u32))
}

/// Product name cut for the selection tray.
pub fn short_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let cut: String = name.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, platform: &str) -> ProductDto {
        serde_json::from_value(serde_json::json!({
            "model_id": id,
            "full_name": name,
            "platform": platform,
        }))
        .unwrap()
    }

    #[test]
    fn test_dedupe_keeps_first_listing() {
        let products = vec![
            product("A", "Samsung 55 inch", "amazon"),
            product("B", "LG 43 inch", "amazon"),
            product("A", "Samsung 55 inch", "flipkart"),
        ];
        let deduped = dedupe_models(products);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].platform, "amazon");
        assert_eq!(deduped[1].model_id, "B");
    }

    #[test]
    fn test_filter_by_screen_size() {
        let products = vec![
            product("A", "Samsung Crystal 55 Inch 4K", "amazon"),
            product("B", "LG 43 inch", "amazon"),
            product("C", "Sony 139 cm (55)", "amazon"),
        ];
        let found = filter_by_screen_size(products, 55);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].model_id, "A");
    }

    #[test]
    fn test_screen_size_label() {
        assert_eq!(screen_size_label("Samsung 55 inch QLED").as_deref(), Some("55\""));
        assert_eq!(screen_size_label("LG 43INCH").as_deref(), Some("43\""));
        assert_eq!(screen_size_label("Sony Bravia 139 cm (55)").as_deref(), Some("55\""));
        assert_eq!(screen_size_label("Mi 108cm Smart TV").as_deref(), Some("43\""));
        assert_eq!(screen_size_label("Vu 4K Smart TV"), None);
        assert_eq!(screen_size_label(""), None);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("LG 43", 40), "LG 43");
        assert_eq!(short_name("Samsung Crystal 4K", 7), "Samsung...");
    }
}
