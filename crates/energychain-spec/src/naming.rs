//! Collision-free entity naming.
//!
//! Callers must pass a snapshot of the scene's names taken immediately before
//! creating the entity: earlier steps of the same run may have added names.

use std::collections::BTreeSet;

/// Returns `base` if free, otherwise `base.NNN` with the smallest free `NNN >= 1`.
///
/// # Example
/// ```
/// use std::collections::BTreeSet;
/// use energychain_spec::naming::unique_name;
///
/// let existing: BTreeSet<String> = ["Controller".to_string()].into();
/// assert_eq!(unique_name("Controller", &existing), "Controller.001");
/// ```
pub fn unique_name(base: &str, existing: &BTreeSet<String>) -> String {
    if !existing.contains(base) {
        return base.to_string();
    }
    (1u64..)
        .map(|index| format!("{}.{:03}", base, index))
        .find(|candidate| !existing.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
