//! Search keyword vocabulary.
//!
//! The proximity search runs once per keyword variant. The default set is a
//! fixed, domain-specific synonym list for "dealer"; a request may override
//! it, but the vocabulary is configuration, never free-form user text fed to
//! the provider verbatim by accident.

/// Default keyword variants for dealership discovery.
pub const DEFAULT_SEARCH_KEYWORDS: &[&str] = &["car dealership", "used car dealer", "auto sales"];

/// Resolve the keyword variants for a run.
///
/// A present, non-empty override wins; otherwise the default vocabulary is
/// used. An explicitly empty override is treated as absent so a run always
/// has at least one variant.
#[must_use]
pub fn resolve_keywords(requested: Option<&[String]>) -> Vec<String> {
    match requested {
        Some(keywords) if !keywords.is_empty() => keywords.to_vec(),
        _ => DEFAULT_SEARCH_KEYWORDS
            .iter()
            .map(|k| (*k).to_string())
            .collect(),
    }
}
