//! Staffing configurations under a headcount bound.

use vs_venue::Configuration;

/// Every `(cashiers, servers, ushers)` with each count in `1..=max_staff`
/// and a total of at most `max_staff`.
///
/// Ordered lexicographically by cashiers, then servers, then ushers.  Empty
/// when `max_staff < 3`.
pub fn staffing_configurations(max_staff: u32) -> Vec<Configuration> {
    let mut configs = Vec::new();
    for cashiers in 1..=max_staff {
        for servers in 1..=max_staff.saturating_sub(cashiers) {
            for ushers in 1..=max_staff.saturating_sub(cashiers + servers) {
                configs.push(Configuration::new(cashiers, servers, ushers));
            }
        }
    }
    configs
}
