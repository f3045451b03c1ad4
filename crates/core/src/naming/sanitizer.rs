//! Folder-name sanitization
//!
//! SharePoint rejects a handful of characters outright and silently
//! misbehaves on names with leading/trailing dots or spaces. The sanitizer
//! turns an arbitrary description into a name the remote store will accept.
//! It is a total function: any input yields a string, with `""` signalling
//! "nothing usable" (callers fall back to the bare opportunity number).

use labtrack_domain::constants::{FOLDER_NAME_TRUNCATE_SUFFIX, MAX_FOLDER_NAME_LENGTH};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters the remote store refuses inside item names.
const FORBIDDEN_CHARS: &[char] =
    &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '#', '%', '&', '{', '}', '~'];

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN should compile - this is a bug"));

static DASH_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-{2,}").expect("DASH_RUN should compile - this is a bug"));

/// Sanitize a raw description into a remote-store-safe folder name.
///
/// Pipeline: trim, replace forbidden characters with `-`, collapse
/// whitespace runs, strip boundary dots/spaces, collapse dash runs, then
/// truncate to at most [`MAX_FOLDER_NAME_LENGTH`] characters. Truncation
/// splices in `...` and re-strips the boundary, so the length cap and the
/// no-trailing-dot rule always hold.
///
/// Returns `""` for empty or whitespace-only input.
pub fn sanitize_folder_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let replaced: String = trimmed
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '-' } else { c })
        .collect();

    let collapsed = WHITESPACE_RUN.replace_all(&replaced, " ");
    let stripped = collapsed.trim_matches(['.', ' ']);
    let mut name = DASH_RUN.replace_all(stripped, "-").into_owned();

    if name.chars().count() > MAX_FOLDER_NAME_LENGTH {
        let keep = MAX_FOLDER_NAME_LENGTH - FOLDER_NAME_TRUNCATE_SUFFIX.chars().count();
        let prefix: String = name.chars().take(keep).collect();
        name = format!("{prefix}{FOLDER_NAME_TRUNCATE_SUFFIX}");
        name = name.trim_end_matches(['-', '.', ' ']).to_string();
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_forbidden_characters_with_dashes() {
        assert_eq!(sanitize_folder_name("a/b\\c:d*e"), "a-b-c-d-e");
        assert_eq!(sanitize_folder_name("50% #2 {x}"), "50- -2 -x-");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(sanitize_folder_name("7133  -   Acme\t- Plant A"), "7133 - Acme - Plant A");
    }

    #[test]
    fn strips_boundary_dots_and_spaces() {
        assert_eq!(sanitize_folder_name("  .Acme Project. "), "Acme Project");
    }

    #[test]
    fn collapses_dash_runs() {
        assert_eq!(sanitize_folder_name("a--b---c"), "a-b-c");
        // Replacement can create runs too
        assert_eq!(sanitize_folder_name("a#%b"), "a-b");
    }

    #[test]
    fn empty_and_whitespace_only_yield_empty() {
        assert_eq!(sanitize_folder_name(""), "");
        assert_eq!(sanitize_folder_name("   \t  "), "");
    }

    #[test]
    fn truncates_long_names_within_limit() {
        let long = "x".repeat(500);
        let out = sanitize_folder_name(&long);
        assert!(out.chars().count() <= MAX_FOLDER_NAME_LENGTH);
        // The spliced ellipsis sits at the boundary and is stripped again,
        // so the result neither ends with a dot nor exceeds the cap.
        assert!(!out.ends_with('.'));
        assert_eq!(out, "x".repeat(397));
    }

    #[test]
    fn idempotent() {
        for input in
            ["7133 - Acme - Plant A", "  a//b  ", "50% #2", ".dots.", &"y".repeat(450), "- a"]
        {
            let once = sanitize_folder_name(input);
            assert_eq!(sanitize_folder_name(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn output_never_contains_forbidden_characters() {
        let nasty = r##"a/b\c:d*e?f"g<h>i|j#k%l&m{n}o~p"##;
        let out = sanitize_folder_name(nasty);
        assert!(out.chars().all(|c| !FORBIDDEN_CHARS.contains(&c)));
        assert!(!out.starts_with([' ', '.']));
        assert!(!out.ends_with([' ', '.']));
    }
}
