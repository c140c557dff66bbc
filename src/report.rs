use crate::analyzer::CourseAnalyzer;
use crate::models::Metric;
use anyhow::{Context, Result};
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// Write every query result as a CSV file into `output_dir`, returning the
/// paths written.
pub fn generate_reports(analyzer: &CourseAnalyzer, output_dir: &Path, top_k: usize) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let mut written = Vec::new();

    let path = output_dir.join("participation_by_institution.csv");
    write_totals(
        &path,
        &["Institution", "Participants"],
        analyzer.participation_by_institution(),
    )?;
    written.push(path);

    let path = output_dir.join("participation_by_institution_subject.csv");
    write_totals(
        &path,
        &["Institution-Subjects", "Participants"],
        analyzer.participation_by_institution_subject(),
    )?;
    written.push(path);

    let path = output_dir.join("participation_by_subject.csv");
    write_totals(
        &path,
        &["Subject", "Participants"],
        analyzer.participation_by_subject(),
    )?;
    written.push(path);

    let path = output_dir.join("instructors.csv");
    generate_instructor_csv(analyzer, &path)?;
    written.push(path);

    for (metric, file_name) in [
        (Metric::Hours, "top_by_hours.csv"),
        (Metric::Participants, "top_by_participants.csv"),
    ] {
        let path = output_dir.join(file_name);
        let mut writer = Writer::from_path(&path)?;
        writer.write_record(["Rank", "Course Title"])?;
        for (rank, title) in analyzer.top_courses(top_k, metric).iter().enumerate() {
            writer.write_record([(rank + 1).to_string().as_str(), title.as_str()])?;
        }
        writer.flush()?;
        written.push(path);
    }

    log::info!("Wrote {} reports to {}", written.len(), output_dir.display());
    Ok(written)
}

fn write_totals(
    path: &Path,
    headers: &[&str; 2],
    totals: impl IntoIterator<Item = (String, u64)>,
) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create report: {}", path.display()))?;
    writer.write_record(headers)?;
    for (key, total) in totals {
        writer.write_record([key.as_str(), total.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn generate_instructor_csv(analyzer: &CourseAnalyzer, path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create report: {}", path.display()))?;
    writer.write_record(["Instructor", "Solo Courses", "Co-taught Courses"])?;
    for (name, courses) in analyzer.instructor_course_lists() {
        writer.write_record([
            name.as_str(),
            courses.solo.join("; ").as_str(),
            courses.co_taught.join("; ").as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
