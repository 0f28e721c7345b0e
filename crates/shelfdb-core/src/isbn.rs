//! ISBN canonicalization.
//!
//! Locale IMEs routinely produce full-width digits and hyphens
//! (`９７８４…`, `－`); every lookup, comparison, and storage write goes
//! through [`normalize_isbn`] so the same physical book never produces two
//! divergent keys.

use unicode_normalization::UnicodeNormalization;

/// Canonicalizes an identifier string via Unicode NFKC (compatibility
/// decomposition + canonical composition), folding full-width digits and
/// punctuation to their ASCII forms.
///
/// No checksum or length validation is performed; input that is not a valid
/// ISBN passes through with only its width normalized. Pure, deterministic,
/// and idempotent.
#[must_use]
pub fn normalize_isbn(raw: &str) -> String {
    raw.nfkc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullwidth_digits_fold_to_ascii() {
        assert_eq!(normalize_isbn("９７８４０５３０４９０３２"), "9784053049032");
    }

    #[test]
    fn fullwidth_hyphens_fold_to_ascii() {
        assert_eq!(normalize_isbn("９７８－４－０９"), "978-4-09");
    }

    #[test]
    fn ascii_input_passes_through() {
        assert_eq!(normalize_isbn("9784053049032"), "9784053049032");
    }

    #[test]
    fn invalid_input_is_not_rejected() {
        assert_eq!(normalize_isbn("not-an-isbn"), "not-an-isbn");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_isbn("９７８４１０３３３０６３９");
        assert_eq!(normalize_isbn(&once), once);
    }
}
