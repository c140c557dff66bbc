//! Analytical queries over an online course offerings dataset.
//!
//! ```text
//!  dataset.csv ──▶ loader ──▶ CourseTable ──▶ analyzer ─┬─ participation rollups, top-k, search
//!                                                       ├─ instructors (solo / co-taught)
//!                                                       └─ recommender (nearest audience profile)
//! ```

pub mod analyzer;
pub mod instructors;
pub mod loader;
pub mod models;
pub mod recommender;
pub mod report;
pub mod table;

pub use analyzer::CourseAnalyzer;
pub use instructors::InstructorCourses;
pub use loader::{CourseLoader, LoadError};
pub use models::{Config, Course, Metric, Profile};
pub use table::CourseTable;
