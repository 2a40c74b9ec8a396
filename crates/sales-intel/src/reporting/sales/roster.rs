use serde::{Deserialize, Serialize};

use super::normalize::normalize_role;

/// Allow-lists for the two sales roles. Lead rows are entered by several
/// non-technical staff, so the setter/closer columns carry typos and
/// placeholder values ("Sin Asignar", blanks); anything not on these lists
/// stays out of the per-person leaderboards while still counting toward
/// global totals.
///
/// This is deployment configuration, never derived from the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRoster {
    pub setters: Vec<String>,
    pub closers: Vec<String>,
}

impl SalesRoster {
    /// The currently deployed team.
    pub fn standard() -> Self {
        Self {
            setters: vec!["thais".into(), "diana".into(), "elena".into()],
            closers: vec![
                "sergi".into(),
                "yassine".into(),
                "elena".into(),
                "raquel".into(),
            ],
        }
    }

    pub fn is_valid_setter(&self, name: Option<&str>) -> bool {
        Self::matches(&self.setters, name)
    }

    pub fn is_valid_closer(&self, name: Option<&str>) -> bool {
        Self::matches(&self.closers, name)
    }

    fn matches(list: &[String], name: Option<&str>) -> bool {
        let Some(name) = name else {
            return false;
        };
        let normalized = normalize_role(name);
        if normalized.is_empty() {
            return false;
        }
        list.iter().any(|entry| normalize_role(entry) == normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accented_spellings_match_the_roster() {
        let roster = SalesRoster::standard();
        assert!(roster.is_valid_setter(Some("Thaïs")));
        assert!(roster.is_valid_setter(Some("  thais ")));
        assert!(roster.is_valid_closer(Some("SERGI")));
    }

    #[test]
    fn placeholders_and_unknown_names_are_rejected() {
        let roster = SalesRoster::standard();
        assert!(!roster.is_valid_setter(Some("Sin Asignar")));
        assert!(!roster.is_valid_setter(Some("Paco")));
        assert!(!roster.is_valid_setter(Some("")));
        assert!(!roster.is_valid_setter(None));
        assert!(!roster.is_valid_closer(Some("thais")));
    }

    #[test]
    fn a_name_can_hold_both_roles() {
        let roster = SalesRoster::standard();
        assert!(roster.is_valid_setter(Some("Elena")));
        assert!(roster.is_valid_closer(Some("Elena")));
    }
}
