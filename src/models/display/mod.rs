//! Display model implementations for table and JSON output

mod student;

pub use student::StudentDisplay;
