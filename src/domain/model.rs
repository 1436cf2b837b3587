use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email, validate_max_length, validate_non_empty_string, Validate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl PersonId {
    /// `None` once the id space is used up.
    pub fn next(self) -> Option<PersonId> {
        self.0.checked_add(1).map(PersonId)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    TechnicalOfficer,
    Instructor,
    Trainee,
    Visitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Visitor,
    Standard,
    Elevated,
}

/// A badge holder. Two persons are the same person when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub access_level: AccessLevel,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub badge_expires: Option<NaiveDate>,
}

impl Person {
    /// The record handed out for a freshly added, not yet edited person.
    pub fn placeholder(id: PersonId) -> Self {
        Person {
            id,
            first_name: "New".to_string(),
            last_name: "Person".to_string(),
            role: Role::Trainee,
            access_level: AccessLevel::Visitor,
            email: None,
            badge_expires: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Validate for Person {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("first_name", &self.first_name)?;
        validate_max_length("first_name", &self.first_name, MAX_NAME_LENGTH)?;
        validate_non_empty_string("last_name", &self.last_name)?;
        validate_max_length("last_name", &self.last_name, MAX_NAME_LENGTH)?;

        if let Some(email) = &self.email {
            validate_email("email", email)?;
        }

        Ok(())
    }
}
