use std::cmp::Ordering;

/// What: Compare dotted version strings numerically.
///
/// Inputs:
/// - `a`: Left-hand version string.
/// - `b`: Right-hand version string.
///
/// Output:
/// - `Ordering` of `a` relative to `b`.
///
/// Details:
/// - Components are compared left to right; a missing or non-numeric component counts as 0,
///   so `1.2` equals `1.2.0` and `1.2` is older than `1.2.1`.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<u64> = a.trim().split('.').map(component).collect();
    let b_parts: Vec<u64> = b.trim().split('.').map(component).collect();
    let len = a_parts.len().max(b_parts.len());
    for idx in 0..len {
        let a_num = a_parts.get(idx).copied().unwrap_or(0);
        let b_num = b_parts.get(idx).copied().unwrap_or(0);
        match a_num.cmp(&b_num) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// What: Decide whether `latest` is a newer release than `current`.
///
/// Inputs:
/// - `current`: Installed version.
/// - `latest`: Version advertised by the backend.
///
/// Output:
/// - `true` only when `latest` is strictly greater.
#[must_use]
pub fn is_update_available(current: &str, latest: &str) -> bool {
    compare_versions(latest, current) == Ordering::Greater
}

/// Parse one version component, treating junk as 0.
fn component(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}
