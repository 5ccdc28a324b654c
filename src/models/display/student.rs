//! Student display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Student;

/// Student display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "FIRST NAME")]
    pub first_name: String,

    #[tabled(rename = "LAST NAME")]
    pub last_name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,
}

impl From<Student> for StudentDisplay {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
        }
    }
}

impl From<&Student> for StudentDisplay {
    fn from(student: &Student) -> Self {
        Self::from(student.clone())
    }
}
