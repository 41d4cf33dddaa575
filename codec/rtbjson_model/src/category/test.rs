use proptest::{prop_assert, prop_assert_eq, proptest};

use super::{is_valid, Category, SUBCATEGORY_COUNTS};

#[test]
fn valid_codes() {
    assert!(is_valid("IAB1"));
    assert!(is_valid("IAB1-7"));
    assert!(is_valid("IAB7-45"));
    assert!(is_valid("IAB24"));
    assert!(is_valid("IAB26-4"));
}

#[test]
fn invalid_codes() {
    for code in [
        "", "IAB", "IAB0", "IAB27", "IAB1-0", "IAB1-8", "IAB24-1", "IAB01",
        "IAB1-01", "IAB1-", "IAB-1", "iab1", "IAB+1", "IAB1-2-3", " IAB1",
    ] {
        assert!(!is_valid(code), "{code}");
    }
}

#[test]
fn parsed_tiers() {
    assert_eq!(
        Category::parse("IAB19-36"),
        Some(Category { tier1: 19, tier2: Some(36) })
    );
    assert_eq!(
        Category::parse("IAB3"),
        Some(Category { tier1: 3, tier2: None })
    );
}

proptest! {
    #[test]
    #[allow(clippy::ignored_unit_patterns)]
    fn published_range(tier1 in 1u8..=26, tier2 in 1u8..=45) {
        let count = SUBCATEGORY_COUNTS[usize::from(tier1 - 1)];
        let category = Category { tier1, tier2: Some(tier2) };

        let tier1_code = Category { tier1, tier2: None }.to_string();

        prop_assert!(is_valid(&tier1_code));
        prop_assert_eq!(
            Category::parse(&category.to_string()),
            (tier2 <= count).then_some(category)
        );
    }
}
