use crate::models::{split_list, Course};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Number of columns in every data row.
pub const FIELD_COUNT: usize = 23;

/// Stands in for `", "` while a line is split on its structural commas.
const LIST_SEPARATOR_MARK: char = '\u{1f}';

const SLASH_DATE: &str = "%m/%d/%Y";
const DASH_DATE: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset has no header line")]
    MissingHeader,
    #[error("line {line}: expected {} fields, found {found}", FIELD_COUNT)]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: field `{field}` is not an integer: {value:?}")]
    Integer { line: usize, field: &'static str, value: String },
    #[error("line {line}: field `{field}` is not a number: {value:?}")]
    Float { line: usize, field: &'static str, value: String },
    #[error("line {line}: unrecognised launch date {value:?}")]
    Date { line: usize, value: String },
}

pub struct CourseLoader;

impl CourseLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_file(&self, file_path: impl AsRef<Path>) -> Result<Vec<Course>, LoadError> {
        let path = file_path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let courses = self.parse_content(&content)?;
        log::info!("Loaded {} course runs from {}", courses.len(), path.display());
        Ok(courses)
    }

    /// Parse a whole dataset: header line first, then one course run per line.
    pub fn parse_content(&self, content: &str) -> Result<Vec<Course>, LoadError> {
        let mut lines = content
            .split('\n')
            .enumerate()
            .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
            .filter(|(_, line)| !line.trim().is_empty());

        if lines.next().is_none() {
            return Err(LoadError::MissingHeader);
        }

        lines.map(|(line_no, line)| self.parse_line(line_no, line)).collect()
    }

    fn parse_line(&self, line_no: usize, line: &str) -> Result<Course, LoadError> {
        let masked = line.replace(", ", &LIST_SEPARATOR_MARK.to_string());
        let fields: Vec<&str> = masked.split(',').collect();

        if fields.len() != FIELD_COUNT {
            return Err(LoadError::FieldCount { line: line_no, found: fields.len() });
        }

        let course_title = restore_list_field(fields[3]);
        let instructors_raw = restore_list_field(fields[4]);
        let subjects_raw = restore_list_field(fields[5]);

        let int = |idx: usize, field: &'static str| parse_int(line_no, field, fields[idx]);
        let float = |idx: usize, field: &'static str| parse_float(line_no, field, fields[idx]);

        Ok(Course {
            institution: fields[0].trim().to_string(),
            course_number: fields[1].trim().to_string(),
            launch_date: parse_date(line_no, fields[2])?,
            course_title,
            instructors: split_list(&instructors_raw),
            instructors_raw,
            subjects: split_list(&subjects_raw),
            subjects_raw,
            year: int(6, "year")? as i32,
            honor_code: int(7, "honor_code")? != 0,
            participants: int(8, "participants")? as u64,
            audited: int(9, "audited")? as u64,
            certified: int(10, "certified")? as u64,
            audited_rate: float(11, "audited_rate")?,
            certified_rate: float(12, "certified_rate")?,
            certified_rate_5: float(13, "certified_rate_5")?,
            played_video_rate: float(14, "played_video_rate")?,
            posted_in_forum_rate: float(15, "posted_in_forum_rate")?,
            grade_higher_than_0_rate: float(16, "grade_higher_than_0_rate")?,
            total_course_hours: float(17, "total_course_hours")?,
            median_hours: float(18, "median_hours")?,
            median_age: float(19, "median_age")?,
            male_rate: float(20, "male_rate")?,
            female_rate: float(21, "female_rate")?,
            bachelors_rate: float(22, "bachelors_rate")?,
        })
    }
}

impl Default for CourseLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn restore_list_field(field: &str) -> String {
    field
        .replace(LIST_SEPARATOR_MARK, ", ")
        .trim()
        .trim_matches('"')
        .to_string()
}

fn parse_int(line: usize, field: &'static str, raw: &str) -> Result<u32, LoadError> {
    raw.trim().parse::<u32>().map_err(|_| LoadError::Integer {
        line,
        field,
        value: raw.to_string(),
    })
}

fn parse_float(line: usize, field: &'static str, raw: &str) -> Result<f64, LoadError> {
    raw.trim().parse::<f64>().map_err(|_| LoadError::Float {
        line,
        field,
        value: raw.to_string(),
    })
}

fn parse_date(line: usize, raw: &str) -> Result<NaiveDate, LoadError> {
    let v = raw.trim().trim_matches('"');
    NaiveDate::parse_from_str(v, SLASH_DATE)
        .or_else(|_| NaiveDate::parse_from_str(v, DASH_DATE))
        .map_err(|_| LoadError::Date { line, value: raw.to_string() })
}
