//! People: the shared user profile plus the student and teacher roles.

use super::{Validate, ValidationResult, check_id, check_not_blank};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest birth year accepted.
pub const MIN_BIRTH_YEAR: u16 = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl Birthday {
    pub fn new(day: u8, month: u8, year: u16) -> Self {
        Self { day, month, year }
    }

    /// The calendar date, if this is a real one.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl Validate for Birthday {
    fn validate_basic(&self) -> ValidationResult {
        if self.year < MIN_BIRTH_YEAR {
            return Err(format!("birth year {} is before {}", self.year, MIN_BIRTH_YEAR));
        }
        match self.to_date() {
            Some(_) => Ok(()),
            None => Err(format!(
                "{:02}/{:02}/{} is not a valid date",
                self.day, self.month, self.year
            )),
        }
    }
}

/// Which role-specific table a user row belongs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(Self::Student),
            "TEACHER" => Ok(Self::Teacher),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(format!("unknown user status '{}'", other)),
        }
    }
}

/// Fields every user has, stored in the `Users` table.
///
/// `address`, `email` and `phone_number` are optional; empty means "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Birthday,
    pub address: String,
    pub citizen_id: String,
    pub email: String,
    pub phone_number: String,
    pub status: UserStatus,
}

impl UserProfile {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthday: Birthday,
        citizen_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthday,
            address: String::new(),
            citizen_id: citizen_id.into(),
            email: String::new(),
            phone_number: String::new(),
            status: UserStatus::Active,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Validate for UserProfile {
    fn validate_basic(&self) -> ValidationResult {
        check_id("user id", &self.id)?;
        check_not_blank("first name", &self.first_name)?;
        check_not_blank("last name", &self.last_name)?;
        self.birthday.validate_basic()?;

        let citizen_digits = self.citizen_id.chars().all(|c| c.is_ascii_digit());
        if !citizen_digits || !(9..=12).contains(&self.citizen_id.len()) {
            return Err(format!(
                "citizen id must be 9 to 12 digits, got '{}'",
                self.citizen_id
            ));
        }

        if !self.email.is_empty() && !is_plausible_email(&self.email) {
            return Err(format!("invalid email address '{}'", self.email));
        }

        if !self.phone_number.is_empty() && !is_plausible_phone(&self.phone_number) {
            return Err(format!("invalid phone number '{}'", self.phone_number));
        }

        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn is_plausible_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    digits.chars().all(|c| c.is_ascii_digit()) && (8..=15).contains(&digits.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub profile: UserProfile,
    pub faculty_id: String,
}

impl Student {
    pub fn new(profile: UserProfile, faculty_id: impl Into<String>) -> Self {
        Self {
            profile,
            faculty_id: faculty_id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }
}

impl Validate for Student {
    fn validate_basic(&self) -> ValidationResult {
        self.profile.validate_basic()?;
        check_id("faculty id", &self.faculty_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub profile: UserProfile,
    pub faculty_id: String,
    pub qualification: String,
    pub specialization_subjects: Vec<String>,
    pub designation: String,
    pub experience_years: u32,
}

impl Teacher {
    pub fn new(profile: UserProfile, faculty_id: impl Into<String>) -> Self {
        Self {
            profile,
            faculty_id: faculty_id.into(),
            qualification: String::new(),
            specialization_subjects: Vec::new(),
            designation: String::new(),
            experience_years: 0,
        }
    }

    pub fn with_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification = qualification.into();
        self
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialization_subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    pub fn with_experience_years(mut self, years: u32) -> Self {
        self.experience_years = years;
        self
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }
}

impl Validate for Teacher {
    fn validate_basic(&self) -> ValidationResult {
        self.profile.validate_basic()?;
        check_id("faculty id", &self.faculty_id)?;
        if let Some(blank) = self
            .specialization_subjects
            .iter()
            .position(|s| s.trim().is_empty())
        {
            return Err(format!("specialization subject #{} is blank", blank + 1));
        }
        if self.experience_years > 80 {
            return Err(format!(
                "experience of {} years is not plausible",
                self.experience_years
            ));
        }
        Ok(())
    }
}
