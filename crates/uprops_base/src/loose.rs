//! Loose matching of property and property value names.
//! 
//! Case, whitespace, underscores and hyphens are ignored, so `Line_Break`, `line-break` and `LINEBREAK` all match.

use core::cmp::Ordering;

/// Check if a character is skipped when comparing names loosely
#[inline]
pub fn is_name_separator(ch: char) -> bool {
    ch == '_' || ch == '-' || ch.is_whitespace()
}

/// Iterate over the characters of the folded form of a name: lowercase, without separators
pub fn fold_chars(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().filter(|ch| !is_name_separator(*ch)).map(|ch| ch.to_ascii_lowercase())
}

/// Compare two names, ignoring case and separators
pub fn loose_eq(a: &str, b: &str) -> bool {
    fold_chars(a).eq(fold_chars(b))
}

/// Compare an already folded name with the folded form of `name` followed by `suffix`.
/// 
/// Used to binary search sorted tables of folded names without allocating.
pub fn cmp_folded(folded: &str, name: &str, suffix: Option<char>) -> Ordering {
    folded.chars().cmp(fold_chars(name).chain(suffix))
}
