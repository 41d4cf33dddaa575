//! Validation of the IAB content category codes (OpenRTB list 5.1).

#[cfg(test)]
mod test;

/// The number of subcategories of each tier-1 category, `IAB1` first.
///
/// `IAB24` (uncategorized) has none.
pub const SUBCATEGORY_COUNTS: [u8; 26] = [
    7, 23, 12, 11, 15, 9, 45, 18, 31, 9, 5, 3, 12, 8, 10, 7, 44, 6, 36, 27, 3,
    4, 10, 0, 7, 4,
];

/// A content category code split into its tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
    /// The tier-1 category, starting at 1.
    pub tier1: u8,

    /// The subcategory within the tier-1 category, starting at 1.
    pub tier2: Option<u8>,
}

impl Category {
    /// Parses a code of the form `IAB<n>` or `IAB<n>-<m>`, [`None`] if the
    /// code is malformed or outside of the published range.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let tiers = code.strip_prefix("IAB")?;
        let (tier1, tier2) = match tiers.split_once('-') {
            Some((tier1, tier2)) => (tier1, Some(tier2)),
            None => (tiers, None),
        };

        let tier1 = parse_tier(tier1)?;
        let count =
            *SUBCATEGORY_COUNTS.get(usize::from(tier1).checked_sub(1)?)?;

        let tier2 = match tier2 {
            Some(tier2) => {
                Some(parse_tier(tier2).filter(|tier2| *tier2 <= count)?)
            }
            None => None,
        };

        Some(Self { tier1, tier2 })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tier2 {
            Some(tier2) => write!(f, "IAB{}-{tier2}", self.tier1),
            None => write!(f, "IAB{}", self.tier1),
        }
    }
}

/// Checks whether the given string is a published content category code.
#[must_use]
pub fn is_valid(code: &str) -> bool { Category::parse(code).is_some() }

// digits only, no sign and no leading zero
fn parse_tier(digits: &str) -> Option<u8> {
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return None;
    }

    digits.parse().ok()
}
