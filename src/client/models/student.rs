//! Student models

use serde::{Deserialize, Serialize};

/// Student record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Server-assigned identifier (zero before creation)
    #[serde(default)]
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    pub email: String,
}

impl Student {
    /// Display name (first + last)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create payload: a student without its identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewStudent {
    /// Attach an identifier, producing the full record used for updates
    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

impl From<&Student> for NewStudent {
    fn from(student: &Student) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
        }
    }
}
