use crate::instructors::{self, InstructorCourses};
use crate::models::Metric;
use crate::recommender;
use crate::table::CourseTable;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Read-only query surface over a loaded [`CourseTable`].
pub struct CourseAnalyzer<'a> {
    table: &'a CourseTable,
}

impl<'a> CourseAnalyzer<'a> {
    pub fn new(table: &'a CourseTable) -> Self {
        Self { table }
    }

    /// Total participants per institution, ascending by institution name.
    pub fn participation_by_institution(&self) -> BTreeMap<String, u64> {
        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for course in self.table.courses() {
            *totals.entry(course.institution.clone()).or_insert(0) += course.participants;
        }
        totals
    }

    /// Total participants per `institution-subjects` key, where the subject part is
    /// the raw list as written in the file. Largest totals first, ties by key.
    pub fn participation_by_institution_subject(&self) -> Vec<(String, u64)> {
        let mut totals: HashMap<String, u64> = HashMap::new();
        for course in self.table.courses() {
            let key = format!("{}-{}", course.institution, course.subjects_raw);
            *totals.entry(key).or_insert(0) += course.participants;
        }

        let mut ordered: Vec<(String, u64)> = totals.into_iter().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        log::debug!("{} institution-subject groups", ordered.len());
        ordered
    }

    /// Total participants per individual subject; a run listing several
    /// subjects counts toward each of them.
    pub fn participation_by_subject(&self) -> BTreeMap<String, u64> {
        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for course in self.table.courses() {
            let distinct: BTreeSet<&String> = course.subjects.iter().collect();
            for subject in distinct {
                *totals.entry(subject.clone()).or_insert(0) += course.participants;
            }
        }
        totals
    }

    pub fn instructor_course_lists(&self) -> BTreeMap<String, InstructorCourses> {
        instructors::course_lists(self.table)
    }

    /// Distinct titles of the `top_k` runs ranked by `metric`, highest first.
    pub fn top_courses(&self, top_k: usize, metric: Metric) -> Vec<String> {
        let mut ranked: Vec<_> = self.table.courses().iter().collect();
        ranked.sort_by(|a, b| {
            b.metric(metric)
                .total_cmp(&a.metric(metric))
                .then_with(|| a.course_title.cmp(&b.course_title))
        });

        let mut seen = HashSet::new();
        ranked
            .into_iter()
            .filter(|course| seen.insert(course.course_title.clone()))
            .take(top_k)
            .map(|course| course.course_title.clone())
            .collect()
    }

    /// Titles whose subject list contains `subject` (ignoring case), with an audited
    /// rate of at least `min_audited_rate` and at most `max_total_hours` thousand hours.
    pub fn search_courses(&self, subject: &str, min_audited_rate: f64, max_total_hours: f64) -> Vec<String> {
        let needle = subject.to_lowercase();
        let titles: BTreeSet<&str> = self
            .table
            .courses()
            .iter()
            .filter(|course| course.subjects_raw.to_lowercase().contains(&needle))
            .filter(|course| course.audited_rate >= min_audited_rate)
            .filter(|course| course.total_course_hours <= max_total_hours)
            .map(|course| course.course_title.as_str())
            .collect();

        log::debug!("Search for {:?} matched {} titles", subject, titles.len());
        titles.into_iter().map(str::to_string).collect()
    }

    pub fn recommend(&self, age: u32, male: bool, bachelor_or_higher: bool) -> Vec<String> {
        recommender::recommend(self.table, age, male, bachelor_or_higher)
    }
}
