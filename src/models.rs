use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset_path: Option<String>,
    pub output_directory: Option<String>,
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: Some("online_courses.csv".to_string()),
            output_directory: Some("output".to_string()),
            top_k: 10,
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }
}

/// One course run of one institution, as read from a dataset row.
#[derive(Debug, Clone)]
pub struct Course {
    pub institution: String,
    pub course_number: String,
    pub launch_date: NaiveDate,
    pub course_title: String,
    pub instructors_raw: String, // "A, B, and C" as it appears in the file
    pub instructors: Vec<String>,
    pub subjects_raw: String,
    pub subjects: Vec<String>,
    pub year: i32,
    pub honor_code: bool,
    pub participants: u64,
    pub audited: u64,
    pub certified: u64,
    pub audited_rate: f64,
    pub certified_rate: f64,
    pub certified_rate_5: f64,
    pub played_video_rate: f64,
    pub posted_in_forum_rate: f64,
    pub grade_higher_than_0_rate: f64,
    pub total_course_hours: f64, // thousands
    pub median_hours: f64,
    pub median_age: f64,
    pub male_rate: f64,
    pub female_rate: f64,
    pub bachelors_rate: f64,
}

impl Course {
    /// True when `name` is the only instructor listed on this run.
    pub fn is_solo_by(&self, name: &str) -> bool {
        matches!(self.instructors.as_slice(), [only] if only == name)
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Hours => self.total_course_hours,
            Metric::Participants => self.participants as f64,
        }
    }
}

/// Split a `"A, B, and C"` style list into its trimmed items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(", ")
        .map(|item| item.strip_prefix("and ").unwrap_or(item).trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Hours,
    Participants,
}

impl From<&str> for Metric {
    /// Anything other than `hours` ranks by participants.
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("hours") {
            Metric::Hours
        } else {
            Metric::Participants
        }
    }
}

/// Mean demographic profile of every run sharing a course number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Profile {
    pub median_age: f64,
    pub male_rate: f64,
    pub bachelors_rate: f64,
}

impl Profile {
    /// Squared euclidean distance to a `(age, male%, bachelor%)` query point.
    pub fn distance_sq(&self, age: f64, male_rate: f64, bachelors_rate: f64) -> f64 {
        let d_age = age - self.median_age;
        let d_male = male_rate - self.male_rate;
        let d_bachelors = bachelors_rate - self.bachelors_rate;
        d_age * d_age + d_male * d_male + d_bachelors * d_bachelors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_conjunction() {
        assert_eq!(split_list("Bo, and Bob"), vec!["Bo", "Bob"]);
        assert_eq!(split_list("Alice"), vec!["Alice"]);
        assert_eq!(
            split_list("Ann Lee, Sandra Day, and Joe"),
            vec!["Ann Lee", "Sandra Day", "Joe"]
        );
    }

    #[test]
    fn split_list_keeps_inner_and() {
        assert_eq!(split_list("Fernand Brand, and Anderson"), vec!["Fernand Brand", "Anderson"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn metric_falls_back_to_participants() {
        assert_eq!(Metric::from("hours"), Metric::Hours);
        assert_eq!(Metric::from("HOURS"), Metric::Hours);
        assert_eq!(Metric::from("participants"), Metric::Participants);
        assert_eq!(Metric::from("certified"), Metric::Participants);
    }

    #[test]
    fn profile_distance() {
        let profile = Profile { median_age: 27.5, male_rate: 55.0, bachelors_rate: 65.0 };
        let d = profile.distance_sq(28.0, 100.0, 100.0);
        assert!((d - (0.25 + 2025.0 + 1225.0)).abs() < 1e-9);
    }

    #[test]
    fn config_roundtrip_through_toml() {
        let tmp = tempfile::NamedTempFile::new().expect("temp");
        let path = tmp.path().to_str().expect("utf8 path").to_string();
        let config = Config { top_k: 3, ..Config::default() };
        config.save_to_file(&path).expect("save");
        let loaded = Config::load_from_file(&path).expect("load");
        assert_eq!(loaded.top_k, 3);
        assert_eq!(loaded.output_directory.as_deref(), Some("output"));
    }
}
