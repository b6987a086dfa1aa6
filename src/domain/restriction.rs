use std::fmt::Debug;
use tracing::warn;

/// Outside advisor mode only one account and one stake may be active.
///
/// Truncates `values` to its first element, logging what was discarded.
/// Returns true when something was dropped.
pub fn keep_first_unless_advisor<T: Debug>(is_advisor: bool, what: &str, values: &mut Vec<T>) -> bool {
    if is_advisor || values.len() <= 1 {
        return false;
    }
    warn!(
        "Only one {} allowed if not advisor. Using first {}. {:?} --> {:?}",
        what, what, values, values[0]
    );
    values.truncate(1);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_to_first_outside_advisor_mode() {
        let mut accounts = vec!["U1".to_string(), "U2".to_string(), "U3".to_string()];
        assert!(keep_first_unless_advisor(false, "account", &mut accounts));
        assert_eq!(accounts, vec!["U1"]);
    }

    #[test]
    fn test_advisor_keeps_everything() {
        let mut stakes = vec![100, 200];
        assert!(!keep_first_unless_advisor(true, "stake", &mut stakes));
        assert_eq!(stakes, vec![100, 200]);
    }

    #[test]
    fn test_single_or_empty_is_untouched() {
        let mut stakes: Vec<i64> = vec![];
        assert!(!keep_first_unless_advisor(false, "stake", &mut stakes));
        let mut one = vec![5];
        assert!(!keep_first_unless_advisor(false, "stake", &mut one));
        assert_eq!(one, vec![5]);
    }
}
