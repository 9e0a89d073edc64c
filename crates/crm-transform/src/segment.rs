//! Segment inference from organization names.

use std::sync::LazyLock;

use regex::Regex;

use crm_model::DEFAULT_SEGMENT;

static RESTAURANT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(restaurants?|bistro|caf[eé]|grill|diner|kitchen|pizzeria|pizza|tavern|eatery|steakhouse|brasserie|bar|pub|brewery|bakery)\b",
    )
    .expect("Invalid restaurant segment regex")
});

static INSTITUTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(schools?|university|college|academy|hospital|health|healthcare|medical|clinic|senior|nursing|campus|correctional|prison)\b",
    )
    .expect("Invalid institutional segment regex")
});

static RETAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(market|supermarket|grocery|grocers?|stores?|shop|retail|mart|deli)\b")
        .expect("Invalid retail segment regex")
});

static HOSPITALITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(hotels?|resort|inn|lodge|casino|suites|hospitality|catering|banquets?|country club)\b",
    )
    .expect("Invalid hospitality segment regex")
});

/// Infer a segment from an organization name.
///
/// Categories are tried in fixed order (Restaurant, Institutional, Retail,
/// Hospitality) and the first hit wins; no match yields "General".
pub fn infer_segment(name: &str) -> &'static str {
    let rules: [(&LazyLock<Regex>, &'static str); 4] = [
        (&RESTAURANT_REGEX, "Restaurant"),
        (&INSTITUTIONAL_REGEX, "Institutional"),
        (&RETAIL_REGEX, "Retail"),
        (&HOSPITALITY_REGEX, "Hospitality"),
    ];
    rules
        .iter()
        .find(|(regex, _)| regex.is_match(name))
        .map_or(DEFAULT_SEGMENT, |(_, segment)| segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_each_category() {
        assert_eq!(infer_segment("Harbor Street Bistro"), "Restaurant");
        assert_eq!(infer_segment("Maple Ridge Senior Living"), "Institutional");
        assert_eq!(infer_segment("Corner Grocery"), "Retail");
        assert_eq!(infer_segment("Lakeside Resort"), "Hospitality");
        assert_eq!(infer_segment("Acme Foods"), "General");
    }

    #[test]
    fn first_category_wins() {
        // Matches both restaurant ("grill") and hospitality ("hotel").
        assert_eq!(infer_segment("Hotel Grill"), "Restaurant");
        // Matches institutional ("hospital") and retail ("shop").
        assert_eq!(infer_segment("Hospital Gift Shop"), "Institutional");
    }

    #[test]
    fn matches_whole_words_only() {
        assert_eq!(infer_segment("Barton Industries"), "General");
        assert_eq!(infer_segment("CAFÉ LUMIERE"), "Restaurant");
    }
}
