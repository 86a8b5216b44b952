//! Faculties, courses and what students do in them.

use super::{Validate, ValidationResult, check_id, check_not_blank};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Marks value meaning "not graded yet".
pub const UNGRADED: i32 = -1;

pub const MAX_CREDITS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: String,
    pub name: String,
}

impl Faculty {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Validate for Faculty {
    fn validate_basic(&self) -> ValidationResult {
        check_id("faculty id", &self.id)?;
        check_not_blank("faculty name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub credits: u32,
    pub faculty_id: String,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        credits: u32,
        faculty_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credits,
            faculty_id: faculty_id.into(),
        }
    }
}

impl Validate for Course {
    fn validate_basic(&self) -> ValidationResult {
        check_id("course id", &self.id)?;
        check_not_blank("course name", &self.name)?;
        if !(1..=MAX_CREDITS).contains(&self.credits) {
            return Err(format!(
                "credits must be between 1 and {}, got {}",
                MAX_CREDITS, self.credits
            ));
        }
        check_id("faculty id", &self.faculty_id)
    }
}

/// A student registered on a course.
///
/// `enrolled_at` of `None` lets the database stamp the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: String,
    pub course_id: String,
    pub enrolled_at: Option<NaiveDateTime>,
}

impl Enrollment {
    pub fn new(student_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
            enrolled_at: None,
        }
    }

    pub fn enrolled_at(mut self, at: NaiveDateTime) -> Self {
        self.enrolled_at = Some(at);
        self
    }
}

impl Validate for Enrollment {
    fn validate_basic(&self) -> ValidationResult {
        check_id("student id", &self.student_id)?;
        check_id("course id", &self.course_id)?;
        if self.enrolled_at.is_some_and(|at| at.nanosecond() != 0) {
            return Err("enrollment time must be in whole seconds".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseResult {
    pub student_id: String,
    pub course_id: String,
    /// 0..=100, or [`UNGRADED`].
    pub marks: i32,
}

impl CourseResult {
    pub fn new(student_id: impl Into<String>, course_id: impl Into<String>, marks: i32) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
            marks,
        }
    }

    pub fn ungraded(student_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self::new(student_id, course_id, UNGRADED)
    }

    pub fn is_graded(&self) -> bool {
        self.marks != UNGRADED
    }
}

impl Validate for CourseResult {
    fn validate_basic(&self) -> ValidationResult {
        check_id("student id", &self.student_id)?;
        check_id("course id", &self.course_id)?;
        if !(UNGRADED..=100).contains(&self.marks) {
            return Err(format!(
                "marks must be between {} and 100, got {}",
                UNGRADED, self.marks
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_credit_bounds() {
        assert!(Course::new("CS101", "Intro", 3, "IT").validate_basic().is_ok());
        assert!(Course::new("CS101", "Intro", 0, "IT").validate_basic().is_err());
        assert!(Course::new("CS101", "Intro", 11, "IT").validate_basic().is_err());
    }

    #[test]
    fn test_marks_bounds() {
        assert!(CourseResult::ungraded("S1", "C1").validate_basic().is_ok());
        assert!(!CourseResult::ungraded("S1", "C1").is_graded());
        assert!(CourseResult::new("S1", "C1", 100).validate_basic().is_ok());
        assert!(CourseResult::new("S1", "C1", 101).validate_basic().is_err());
        assert!(CourseResult::new("S1", "C1", -2).validate_basic().is_err());
    }

    #[test]
    fn test_faculty_needs_name() {
        assert!(Faculty::new("IT", "Information Technology").validate_basic().is_ok());
        assert!(Faculty::new("IT", "").validate_basic().is_err());
    }
}
