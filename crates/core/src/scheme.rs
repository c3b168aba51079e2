//! Scheme-qualified identifier handling
//!
//! Registry identifiers are of the form `<SCHEME>-<local-id>`, where the
//! scheme itself contains a dash (e.g. `GB-CHC-1234567` belongs to scheme
//! `GB-CHC`). Canonical identifier selection ranks schemes by a fixed
//! priority table; unknown schemes rank below every known one.

/// Known identifier schemes, most preferred first
pub const SCHEME_PRIORITIES: [&str; 5] = ["GB-CHC", "GB-SC", "GB-NIC", "GB-COH", "GB-EDU"];

/// Extract the scheme from a scheme-qualified identifier
///
/// The scheme is the first two dash-separated segments. Identifiers with
/// fewer than three segments are returned whole.
pub fn scheme_of(identifier: &str) -> &str {
    match identifier.match_indices('-').map(|(i, _)| i).nth(1) {
        Some(i) => &identifier[..i],
        None => identifier,
    }
}

/// Priority of a scheme: highest for the most preferred, 0 for unknown
///
/// Priorities are whole numbers at least 1 apart, so a fractional recency
/// bonus can never promote an identifier past a higher-priority scheme.
pub fn scheme_priority(scheme: &str) -> u32 {
    SCHEME_PRIORITIES
        .iter()
        .rev()
        .position(|s| *s == scheme)
        .map(|p| p as u32 + 1)
        .unwrap_or(0)
}
