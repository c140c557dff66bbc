use crate::models::Course;
use crate::table::CourseTable;
use std::collections::HashSet;

/// Most titles a recommendation returns.
pub const RECOMMENDATION_LIMIT: usize = 10;

/// Recommend up to ten currently offered titles whose historical audience best
/// matches a user.
///
/// Only runs launched on the latest launch date of their course number are
/// candidates; every run sharing that date is kept. Each candidate is scored
/// against the mean `(median age, % male, % bachelor's)` of all runs of its
/// course number, with the user mapped to `(age, male * 100, bachelor * 100)`.
/// Closest first, ties by title.
pub fn recommend(table: &CourseTable, age: u32, male: bool, bachelor_or_higher: bool) -> Vec<String> {
    let age = f64::from(age);
    let male_rate = if male { 100.0 } else { 0.0 };
    let bachelors_rate = if bachelor_or_higher { 100.0 } else { 0.0 };

    let mut scored: Vec<(f64, &Course)> = table
        .courses()
        .iter()
        .filter(|course| table.latest_launch(&course.course_number) == Some(course.launch_date))
        .filter_map(|course| {
            table
                .profile(&course.course_number)
                .map(|profile| (profile.distance_sq(age, male_rate, bachelors_rate), course))
        })
        .collect();

    scored.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.course_title.cmp(&b.1.course_title))
    });

    log::debug!("Scored {} latest-run candidates", scored.len());

    let mut seen = HashSet::new();
    scored
        .into_iter()
        .map(|(_, course)| course.course_title.clone())
        .filter(|title| seen.insert(title.clone()))
        .take(RECOMMENDATION_LIMIT)
        .collect()
}
