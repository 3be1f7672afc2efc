//! Activity-type name handling.
//!
//! Type names are case-insensitive for membership ("Zikr" and "zikr" are
//! the same type) but the first-seen casing is preserved as canonical.
//! Membership checks go through a lowercased lookup key rather than linear
//! case-folding scans.

use crate::error::CoreError;

/// Default types seeded for every new user.
pub const DEFAULT_ZIKR_TYPES: [&str; 4] = [
    "SubhanAllah",
    "Alhamdulillah",
    "Allahu Akbar",
    "La ilaha illallah",
];

/// Trim a user-supplied type name; reject empty input.
pub fn canonical_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("zikrType must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Lowercased lookup key used for case-insensitive uniqueness.
pub fn normalized_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_trims_and_preserves_case() {
        assert_eq!(canonical_name("  SubhanAllah ").unwrap(), "SubhanAllah");
    }

    #[test]
    fn empty_name_rejected() {
        assert!(canonical_name("").is_err());
        assert!(canonical_name("   ").is_err());
    }

    #[test]
    fn normalized_key_folds_case() {
        assert_eq!(normalized_key("SubhanAllah"), normalized_key("subhanallah"));
        assert_eq!(normalized_key(" Zikr "), "zikr");
    }
}
