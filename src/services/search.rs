//! Record lookup by identifier or name
//!
//! Resolution order, case-insensitive throughout:
//! 1. exact identifier
//! 2. exact full name
//! 3. name contains the query (every match, in store order)

use crate::error::{RosterError, RosterResult};
use crate::models::Record;

/// Result of resolving a query against a snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<R> {
    ExactMatch(R),
    /// Several partial matches, in store order; the caller picks one
    AmbiguousMatches(Vec<R>),
    NoMatch,
}

impl<R: Record> SearchOutcome<R> {
    /// Pick one of the ambiguous candidates by 1-based index
    ///
    /// An exact match is returned as is when `index` is 1.
    pub fn select(self, index: usize) -> RosterResult<R> {
        match self {
            Self::ExactMatch(record) if index == 1 => Ok(record),
            Self::ExactMatch(_) => Err(RosterError::InvalidSelection { index, count: 1 }),
            Self::AmbiguousMatches(mut candidates) => {
                let count = candidates.len();
                if index == 0 || index > count {
                    return Err(RosterError::InvalidSelection { index, count });
                }
                Ok(candidates.swap_remove(index - 1))
            }
            Self::NoMatch => Err(RosterError::InvalidSelection { index, count: 0 }),
        }
    }

    /// Reduce to a single record, using `pick` to disambiguate
    ///
    /// Without a pick, several candidates yield
    /// [`RosterError::AmbiguousMatches`]; no candidates yield `NotFound`.
    pub fn into_single(self, query: &str, pick: Option<usize>) -> RosterResult<R> {
        match (self, pick) {
            (Self::ExactMatch(record), _) => Ok(record),
            (Self::NoMatch, _) => Err(RosterError::NotFound {
                entity_type: R::ENTITY,
                identifier: query.trim().to_string(),
            }),
            (outcome @ Self::AmbiguousMatches(_), Some(index)) => outcome.select(index),
            (Self::AmbiguousMatches(candidates), None) => Err(RosterError::AmbiguousMatches {
                query: query.trim().to_string(),
                count: candidates.len(),
            }),
        }
    }
}

/// Resolve `query` against `snapshot`
pub fn resolve<R: Record>(query: &str, snapshot: &[R]) -> SearchOutcome<R> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return SearchOutcome::NoMatch;
    }

    if let Some(record) = snapshot.iter().find(|r| r.id().to_lowercase() == query) {
        return SearchOutcome::ExactMatch(record.clone());
    }

    if let Some(record) = snapshot.iter().find(|r| r.name().to_lowercase() == query) {
        return SearchOutcome::ExactMatch(record.clone());
    }

    let mut matches: Vec<R> = snapshot
        .iter()
        .filter(|r| r.name().to_lowercase().contains(&query))
        .cloned()
        .collect();

    match matches.len() {
        0 => SearchOutcome::NoMatch,
        1 => SearchOutcome::ExactMatch(matches.remove(0)),
        _ => SearchOutcome::AmbiguousMatches(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Marks, Student};

    fn class() -> Vec<Student> {
        vec![
            Student::new("STU001", "Ann", Marks::new()),
            Student::new("STU002", "Anna", Marks::new()),
        ]
    }

    fn ids(records: &[Student]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_partial_query_is_ambiguous_in_store_order() {
        match resolve("ann", &class()) {
            SearchOutcome::AmbiguousMatches(found) => assert_eq!(ids(&found), ["STU001", "STU002"]),
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_id_and_name() {
        let snapshot = class();
        for query in ["STU001", "stu001", "Ann", " ANN "] {
            match resolve(query, &snapshot) {
                SearchOutcome::ExactMatch(s) => assert_eq!(s.student_id, "STU001", "{query}"),
                other => panic!("{query}: expected exact match, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_id_wins_over_name() {
        let snapshot = vec![
            Student::new("STU001", "stu002", Marks::new()),
            Student::new("STU002", "Bob", Marks::new()),
        ];
        match resolve("stu002", &snapshot) {
            SearchOutcome::ExactMatch(s) => assert_eq!(s.student_id, "STU002"),
            other => panic!("expected exact match, got {:?}", other),
        }
    }

    #[test]
    fn test_single_partial_match_is_exact() {
        match resolve("nna", &class()) {
            SearchOutcome::ExactMatch(s) => assert_eq!(s.student_id, "STU002"),
            other => panic!("expected exact match, got {:?}", other),
        }
    }

    #[test]
    fn test_no_match() {
        assert_eq!(resolve("zzz", &class()), SearchOutcome::NoMatch);
        assert_eq!(resolve("   ", &class()), SearchOutcome::NoMatch);
        assert_eq!(resolve::<Student>("ann", &[]), SearchOutcome::NoMatch);
    }

    #[test]
    fn test_select() {
        let picked = resolve("ann", &class()).select(2).unwrap();
        assert_eq!(picked.student_id, "STU002");

        for bad in [0, 3] {
            let err = resolve("ann", &class()).select(bad).unwrap_err();
            assert!(matches!(err, RosterError::InvalidSelection { count: 2, .. }));
        }
    }

    #[test]
    fn test_into_single() {
        let err = resolve("ann", &class()).into_single("ann", None).unwrap_err();
        assert!(matches!(err, RosterError::AmbiguousMatches { count: 2, .. }));

        let picked = resolve("ann", &class()).into_single("ann", Some(1)).unwrap();
        assert_eq!(picked.student_id, "STU001");

        let err = resolve("ann", &class()).into_single("ann", Some(9)).unwrap_err();
        assert!(matches!(err, RosterError::InvalidSelection { index: 9, count: 2 }));

        let err = resolve("zzz", &class()).into_single("zzz", None).unwrap_err();
        assert!(err.is_not_found());

        // a pick is ignored once the query is unambiguous
        let found = resolve("STU002", &class()).into_single("STU002", Some(5)).unwrap();
        assert_eq!(found.student_id, "STU002");
    }
}
