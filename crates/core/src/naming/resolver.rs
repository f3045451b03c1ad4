//! Canonical folder-name resolution and legacy-name parsing

use labtrack_domain::Opportunity;
use once_cell::sync::Lazy;
use regex::Regex;

use super::sanitizer::sanitize_folder_name;

// Current convention: "7000 - Description".
static PREFIX_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*-").expect("PREFIX_NUMBER should compile - this is a bug"));

// Oldest convention: "Description (7000)".
static TRAILING_PAREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d+)\)$").expect("TRAILING_PAREN should compile - this is a bug")
});

/// Resolve the canonical remote folder name for an opportunity.
///
/// The cached `sharepoint_folder_name` wins outright: once a name has been
/// chosen it must not silently drift, even if the description is edited
/// later. Otherwise the name derives from the (sanitized) description, and
/// as a last resort the bare opportunity number.
pub fn resolve_folder_name(opportunity: &Opportunity) -> String {
    if let Some(cached) = opportunity.sharepoint_folder_name.as_deref() {
        if !cached.is_empty() {
            return cached.to_string();
        }
    }
    resolve_from_parts(opportunity.description.as_deref(), &opportunity.opportunity_number)
}

/// Resolution without a full opportunity record, for contexts that only
/// have the raw description and number at hand. Applies the same
/// description-then-number fallback as [`resolve_folder_name`] (the cached
/// name is not consulted because there is none).
pub fn resolve_from_parts(description: Option<&str>, opportunity_number: &str) -> String {
    if let Some(description) = description {
        let sanitized = sanitize_folder_name(description);
        if !sanitized.is_empty() {
            return sanitized;
        }
    }
    opportunity_number.to_string()
}

/// Extract the opportunity number encoded in a remote folder name.
///
/// Three naming generations are recognised, checked in order:
/// 1. bare digits (`"7133"`)
/// 2. number-dash prefix (`"7133 - Acme - Plant A"`)
/// 3. trailing parenthetical (`"Acme Project (7133)"`)
///
/// The classes are mutually exclusive for sanitizer-produced names, so the
/// ordering is for clarity rather than ambiguity resolution. Returns `None`
/// for folder names that encode no number at all.
pub fn extract_opportunity_number(folder_name: &str) -> Option<String> {
    let name = folder_name.trim();
    if name.is_empty() {
        return None;
    }
    if name.chars().all(|c| c.is_ascii_digit()) {
        return Some(name.to_string());
    }
    if let Some(caps) = PREFIX_NUMBER.captures(name) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = TRAILING_PAREN.captures(name) {
        return Some(caps[1].to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opportunity(
        number: &str,
        description: Option<&str>,
        cached: Option<&str>,
    ) -> Opportunity {
        let mut opp = Opportunity::new(number);
        opp.description = description.map(str::to_string);
        opp.sharepoint_folder_name = cached.map(str::to_string);
        opp
    }

    #[test]
    fn cached_name_wins_over_description() {
        let opp = opportunity("7133", Some("7133 - Acme - Plant A"), Some("X"));
        assert_eq!(resolve_folder_name(&opp), "X");
    }

    #[test]
    fn empty_cached_name_falls_through_to_description() {
        let opp = opportunity("7133", Some("7133 - Acme - Plant A"), Some(""));
        assert_eq!(resolve_folder_name(&opp), "7133 - Acme - Plant A");
    }

    #[test]
    fn unsanitizable_description_falls_back_to_number() {
        let opp = opportunity("7133", Some("   "), None);
        assert_eq!(resolve_folder_name(&opp), "7133");
        let opp = opportunity("7133", None, None);
        assert_eq!(resolve_folder_name(&opp), "7133");
    }

    #[test]
    fn resolution_is_deterministic() {
        let opp = opportunity("8070", Some("8070 - Foo/Bar"), None);
        assert_eq!(resolve_folder_name(&opp), resolve_folder_name(&opp));
    }

    #[test]
    fn resolve_from_parts_matches_full_resolution() {
        let opp = opportunity("8070", Some("8070 - Foo Inc"), None);
        assert_eq!(
            resolve_folder_name(&opp),
            resolve_from_parts(Some("8070 - Foo Inc"), "8070")
        );
    }

    #[test]
    fn extracts_bare_number() {
        assert_eq!(extract_opportunity_number("7133").as_deref(), Some("7133"));
    }

    #[test]
    fn extracts_prefix_number() {
        assert_eq!(
            extract_opportunity_number("7133 - Acme - Plant A").as_deref(),
            Some("7133")
        );
        assert_eq!(extract_opportunity_number("7133- Acme").as_deref(), Some("7133"));
    }

    #[test]
    fn extracts_trailing_parenthetical() {
        assert_eq!(extract_opportunity_number("Acme Project (7133)").as_deref(), Some("7133"));
    }

    #[test]
    fn unknown_names_yield_none() {
        assert_eq!(extract_opportunity_number("Unrelated Folder"), None);
        assert_eq!(extract_opportunity_number(""), None);
        assert_eq!(extract_opportunity_number("(no digits)"), None);
    }

    #[test]
    fn round_trip_through_sanitizer() {
        let sanitized = sanitize_folder_name("7133 - Acme - Plant A");
        assert_eq!(sanitized, "7133 - Acme - Plant A");
        assert_eq!(extract_opportunity_number(&sanitized).as_deref(), Some("7133"));
    }
}
