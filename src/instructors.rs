use crate::table::CourseTable;
use std::collections::{BTreeMap, BTreeSet};

/// Titles an instructor taught alone and titles they shared with others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructorCourses {
    pub solo: Vec<String>,
    pub co_taught: Vec<String>,
}

/// Split every instructor's runs into solo and co-taught title lists,
/// each deduplicated and sorted ascending.
///
/// A run is solo for `name` only when its instructor field is exactly `name`.
/// Membership is decided on the pre-split name list, so `"Bo"` never matches
/// a run taught by `"Bob"`.
pub fn course_lists(table: &CourseTable) -> BTreeMap<String, InstructorCourses> {
    let lists: BTreeMap<String, InstructorCourses> = table
        .instructors()
        .into_iter()
        .map(|(name, runs)| {
            let mut solo = BTreeSet::new();
            let mut co_taught = BTreeSet::new();
            for course in runs {
                if course.is_solo_by(name) {
                    solo.insert(course.course_title.clone());
                } else {
                    co_taught.insert(course.course_title.clone());
                }
            }
            let courses = InstructorCourses {
                solo: solo.into_iter().collect(),
                co_taught: co_taught.into_iter().collect(),
            };
            (name.to_string(), courses)
        })
        .collect();

    log::debug!("Decomposed course lists for {} instructors", lists.len());
    lists
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::course;

    fn table() -> CourseTable {
        CourseTable::new(vec![
            course("MITx", "1", (2014, 1, 1), "Circuits", "Alice", "S"),
            course("MITx", "2", (2014, 1, 1), "Signals", "Alice, and Bob", "S"),
            course("MITx", "3", (2014, 1, 1), "Circuits", "Alice", "S"),
            course("MITx", "4", (2014, 1, 1), "Algebra", "Bob", "S"),
            course("MITx", "5", (2014, 1, 1), "Physics", "Bo, and Bob", "S"),
            course("MITx", "6", (2014, 1, 1), "Chemistry", "Carol, Alice, and Dave", "S"),
        ])
    }

    #[test]
    fn solo_and_co_taught_lists() {
        let lists = course_lists(&table());

        assert_eq!(
            lists["Alice"],
            InstructorCourses {
                solo: vec!["Circuits".to_string()],
                co_taught: vec!["Chemistry".to_string(), "Signals".to_string()],
            }
        );
        assert_eq!(lists["Bob"].solo, vec!["Algebra"]);
        assert_eq!(lists["Bob"].co_taught, vec!["Physics", "Signals"]);
        assert_eq!(lists["Dave"].co_taught, vec!["Chemistry"]);
        assert!(lists["Dave"].solo.is_empty());
    }

    #[test]
    fn short_name_does_not_match_longer_name() {
        let lists = course_lists(&table());
        let names: Vec<&String> = lists.keys().collect();
        assert_eq!(names, vec!["Alice", "Bo", "Bob", "Carol", "Dave"]);

        assert!(lists["Bo"].solo.is_empty());
        assert_eq!(lists["Bo"].co_taught, vec!["Physics"]);
    }

    #[test]
    fn solo_record_never_feeds_co_taught() {
        let t = CourseTable::new(vec![course("MITx", "1", (2014, 1, 1), "Only", "Alice", "S")]);
        let lists = course_lists(&t);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists["Alice"].solo, vec!["Only"]);
        assert!(lists["Alice"].co_taught.is_empty());
    }

    #[test]
    fn padded_single_instructor_is_solo() {
        let t = CourseTable::new(vec![course("MITx", "1", (2014, 1, 1), "Circuits", "Alice ", "S")]);
        let lists = course_lists(&t);
        assert_eq!(lists["Alice"].solo, vec!["Circuits"]);
        assert!(lists["Alice"].co_taught.is_empty());
    }

    #[test]
    fn same_title_can_be_solo_and_co_taught_from_different_runs() {
        let t = CourseTable::new(vec![
            course("MITx", "1", (2014, 1, 1), "Circuits", "Alice", "S"),
            course("MITx", "1", (2015, 1, 1), "Circuits", "Alice, and Bob", "S"),
        ]);
        let lists = course_lists(&t);
        assert_eq!(lists["Alice"].solo, vec!["Circuits"]);
        assert_eq!(lists["Alice"].co_taught, vec!["Circuits"]);
    }
}
