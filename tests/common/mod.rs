//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use records_store::models::{Birthday, Course, Faculty, Student, Teacher, UserProfile};
use records_store::{DataContext, DatabaseTarget};

/// Fresh in-memory database with the schema in place.
pub fn context() -> DataContext {
    DataContext::open(DatabaseTarget::memory()).unwrap()
}

/// In-memory database seeded with faculty `IT` and course `C01`.
pub fn seeded() -> DataContext {
    let context = context();
    context
        .faculties()
        .add(&Faculty::new("IT", "Information Technology"))
        .unwrap();
    context
        .courses()
        .add(&Course::new("C01", "Databases", 3, "IT"))
        .unwrap();
    context
}

pub fn profile(id: &str, citizen_id: &str) -> UserProfile {
    UserProfile::new(id, "An", "Nguyen", Birthday::new(14, 2, 2003), citizen_id)
        .with_address("12 Le Loi, Hue")
        .with_email(format!("{}@example.edu", id.to_lowercase()))
        .with_phone_number("+84905123456")
}

pub fn student(id: &str, citizen_id: &str) -> Student {
    Student::new(profile(id, citizen_id), "IT")
}

pub fn teacher(id: &str, citizen_id: &str) -> Teacher {
    Teacher::new(profile(id, citizen_id), "IT")
        .with_qualification("PhD")
        .with_subjects(["Databases", "Operating Systems"])
        .with_designation("Senior Lecturer")
        .with_experience_years(11)
}

pub fn count(context: &DataContext, table: &str) -> i64 {
    context
        .table_counts()
        .unwrap()
        .into_iter()
        .find(|(name, _)| *name == table)
        .map(|(_, n)| n)
        .unwrap()
}
