//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{NewStudent, Student};

/// Builder for creating test Student instances.
///
/// # Example
/// ```ignore
/// let student = StudentBuilder::new(7)
///     .first_name("Ada")
///     .email("ada@test.com")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct StudentBuilder {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
}

impl StudentBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            email: format!("student{}@test.com", id),
        }
    }

    /// Set the first name.
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    /// Set the last name.
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    /// Set the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Build the Student instance.
    pub fn build(self) -> Student {
        Student {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }

    /// Build the create payload (no id).
    pub fn build_new(self) -> NewStudent {
        NewStudent::from(&self.build())
    }
}

/// Students with ids `1..=count`
pub fn students(count: i64) -> Vec<Student> {
    (1..=count).map(|id| StudentBuilder::new(id).build()).collect()
}
