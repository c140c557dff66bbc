use crate::loader::{CourseLoader, LoadError};
use crate::models::{Course, Profile};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Immutable, file-ordered collection of course runs plus the indexes
/// every query reads from. Nothing here changes after `new`.
#[derive(Debug, Clone)]
pub struct CourseTable {
    courses: Vec<Course>,
    instructor_index: BTreeMap<String, Vec<usize>>,
    course_number_index: HashMap<String, Vec<usize>>,
    latest_launch: HashMap<String, NaiveDate>,
    profiles: HashMap<String, Profile>,
}

impl CourseTable {
    pub fn new(courses: Vec<Course>) -> Self {
        let mut instructor_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut course_number_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut latest_launch: HashMap<String, NaiveDate> = HashMap::new();

        for (idx, course) in courses.iter().enumerate() {
            for name in &course.instructors {
                let entries = instructor_index.entry(name.clone()).or_default();
                // a name listed twice on one run still indexes the run once
                if entries.last() != Some(&idx) {
                    entries.push(idx);
                }
            }

            course_number_index
                .entry(course.course_number.clone())
                .or_default()
                .push(idx);

            latest_launch
                .entry(course.course_number.clone())
                .and_modify(|date| {
                    if course.launch_date > *date {
                        *date = course.launch_date;
                    }
                })
                .or_insert(course.launch_date);
        }

        let profiles = course_number_index
            .iter()
            .map(|(number, indices)| {
                let n = indices.len() as f64;
                let mut profile = Profile::default();
                for &idx in indices {
                    profile.median_age += courses[idx].median_age;
                    profile.male_rate += courses[idx].male_rate;
                    profile.bachelors_rate += courses[idx].bachelors_rate;
                }
                profile.median_age /= n;
                profile.male_rate /= n;
                profile.bachelors_rate /= n;
                (number.clone(), profile)
            })
            .collect();

        log::debug!(
            "Indexed {} runs: {} instructors, {} course numbers",
            courses.len(),
            instructor_index.len(),
            course_number_index.len()
        );

        Self {
            courses,
            instructor_index,
            course_number_index,
            latest_launch,
            profiles,
        }
    }

    pub fn load(file_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let courses = CourseLoader::new().load_file(file_path)?;
        Ok(Self::new(courses))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Distinct instructor names with the runs that list them, ascending by name.
    pub fn instructors(&self) -> Vec<(&str, Vec<&Course>)> {
        self.instructor_index
            .iter()
            .map(|(name, indices)| {
                let runs = indices.iter().map(|&idx| &self.courses[idx]).collect();
                (name.as_str(), runs)
            })
            .collect()
    }

    pub fn runs_of(&self, course_number: &str) -> Vec<&Course> {
        self.course_number_index
            .get(course_number)
            .map(|indices| indices.iter().map(|&idx| &self.courses[idx]).collect())
            .unwrap_or_default()
    }

    pub fn latest_launch(&self, course_number: &str) -> Option<NaiveDate> {
        self.latest_launch.get(course_number).copied()
    }

    pub fn profile(&self, course_number: &str) -> Option<&Profile> {
        self.profiles.get(course_number)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::split_list;

    /// Build a run with the fields queries look at; the rest are zeroed.
    pub(crate) fn course(
        institution: &str,
        number: &str,
        date: (i32, u32, u32),
        title: &str,
        instructors: &str,
        subjects: &str,
    ) -> Course {
        Course {
            institution: institution.to_string(),
            course_number: number.to_string(),
            launch_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
            course_title: title.to_string(),
            instructors_raw: instructors.to_string(),
            instructors: split_list(instructors),
            subjects_raw: subjects.to_string(),
            subjects: split_list(subjects),
            year: date.0,
            honor_code: true,
            participants: 0,
            audited: 0,
            certified: 0,
            audited_rate: 0.0,
            certified_rate: 0.0,
            certified_rate_5: 0.0,
            played_video_rate: 0.0,
            posted_in_forum_rate: 0.0,
            grade_higher_than_0_rate: 0.0,
            total_course_hours: 0.0,
            median_hours: 0.0,
            median_age: 0.0,
            male_rate: 0.0,
            female_rate: 0.0,
            bachelors_rate: 0.0,
        }
    }

    fn with_profile(mut c: Course, age: f64, male: f64, bachelors: f64) -> Course {
        c.median_age = age;
        c.male_rate = male;
        c.bachelors_rate = bachelors;
        c
    }

    #[test]
    fn latest_launch_and_profile_per_course_number() {
        let table = CourseTable::new(vec![
            with_profile(course("MITx", "C1", (2020, 1, 1), "Old", "A", "S"), 25.0, 60.0, 70.0),
            with_profile(course("MITx", "C1", (2021, 1, 1), "New", "A", "S"), 30.0, 50.0, 60.0),
            course("HarvardX", "C2", (2019, 5, 5), "Other", "B", "S"),
        ]);

        assert_eq!(table.latest_launch("C1"), NaiveDate::from_ymd_opt(2021, 1, 1));
        let profile = table.profile("C1").expect("profile");
        assert!((profile.median_age - 27.5).abs() < 1e-9);
        assert!((profile.male_rate - 55.0).abs() < 1e-9);
        assert!((profile.bachelors_rate - 65.0).abs() < 1e-9);
        assert_eq!(table.runs_of("C1").len(), 2);
        assert!(table.runs_of("missing").is_empty());
        assert!(table.latest_launch("missing").is_none());
    }

    #[test]
    fn instructor_index_is_sorted_and_keeps_file_order() {
        let table = CourseTable::new(vec![
            course("MITx", "C1", (2020, 1, 1), "First", "Bob, and Bo", "S"),
            course("MITx", "C2", (2020, 1, 1), "Second", "Bo", "S"),
        ]);
        let instructors = table.instructors();
        let names: Vec<&str> = instructors.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["Bo", "Bob"]);

        let titles: Vec<&str> = instructors[0].1.iter().map(|c| c.course_title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn empty_table() {
        let table = CourseTable::new(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.instructors().is_empty());
    }
}
