//! Parsers for entities spanning `Users` plus a role table.
//!
//! Insert parameter order (shared prefix, [`USER_INSERT_COLUMNS`] values):
//! `id, firstName, lastName, birthDay, birthMonth, birthYear, address,
//! citizenId, email, phoneNumber, role, status`, followed by the role
//! table's own columns (without `userId`).
//!
//! Update parameter order: the [`USER_UPDATE_COLUMNS`] mutable user columns
//! `firstName .. phoneNumber, status`, then the role columns, then `id` last.

use super::{EntityParser, enumerated, integer, optional_text, text};
use crate::db::types::{Params, Row, Value};
use crate::error::{DbError, DbResult};
use crate::models::{Birthday, Role, Student, Teacher, UserProfile};

/// Leading insert parameters that belong to the `Users` statement.
pub const USER_INSERT_COLUMNS: usize = 12;

/// Leading update parameters that belong to the `Users` statement.
pub const USER_UPDATE_COLUMNS: usize = 10;

fn parse_profile(row: &Row, expected: Role) -> DbResult<UserProfile> {
    let role: Role = enumerated(row, "role")?;
    if role != expected {
        return Err(DbError::parsing(format!(
            "column 'role' is {}, expected {}",
            role, expected
        )));
    }

    Ok(UserProfile {
        id: text(row, "id")?,
        first_name: text(row, "firstName")?,
        last_name: text(row, "lastName")?,
        birthday: Birthday {
            day: integer(row, "birthDay")?,
            month: integer(row, "birthMonth")?,
            year: integer(row, "birthYear")?,
        },
        address: optional_text(row, "address")?,
        citizen_id: text(row, "citizenId")?,
        email: optional_text(row, "email")?,
        phone_number: optional_text(row, "phoneNumber")?,
        status: enumerated(row, "status")?,
    })
}

fn serialize_profile(profile: &UserProfile, role: Role) -> Row {
    Row::new()
        .with("id", profile.id.as_str())
        .with("firstName", profile.first_name.as_str())
        .with("lastName", profile.last_name.as_str())
        .with("birthDay", profile.birthday.day)
        .with("birthMonth", profile.birthday.month)
        .with("birthYear", profile.birthday.year)
        .with("address", Value::optional_text(&profile.address))
        .with("citizenId", profile.citizen_id.as_str())
        .with("email", Value::optional_text(&profile.email))
        .with("phoneNumber", Value::optional_text(&profile.phone_number))
        .with("role", role.as_str())
        .with("status", profile.status.as_str())
}

fn profile_insert_params(profile: &UserProfile, role: Role) -> Params {
    vec![
        Value::from(profile.id.as_str()),
        Value::from(profile.first_name.as_str()),
        Value::from(profile.last_name.as_str()),
        Value::from(profile.birthday.day),
        Value::from(profile.birthday.month),
        Value::from(profile.birthday.year),
        Value::optional_text(&profile.address),
        Value::from(profile.citizen_id.as_str()),
        Value::optional_text(&profile.email),
        Value::optional_text(&profile.phone_number),
        Value::from(role.as_str()),
        Value::from(profile.status.as_str()),
    ]
}

fn profile_update_params(profile: &UserProfile) -> Params {
    vec![
        Value::from(profile.first_name.as_str()),
        Value::from(profile.last_name.as_str()),
        Value::from(profile.birthday.day),
        Value::from(profile.birthday.month),
        Value::from(profile.birthday.year),
        Value::optional_text(&profile.address),
        Value::from(profile.citizen_id.as_str()),
        Value::optional_text(&profile.email),
        Value::optional_text(&profile.phone_number),
        Value::from(profile.status.as_str()),
    ]
}

/// Role columns: `facultyId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentParser;

impl EntityParser for StudentParser {
    type Entity = Student;
    const ENTITY: &'static str = "student";

    fn parse(&self, row: &Row) -> DbResult<Student> {
        Ok(Student {
            profile: parse_profile(row, Role::Student)?,
            faculty_id: text(row, "facultyId")?,
        })
    }

    fn serialize(&self, student: &Student) -> DbResult<Row> {
        Ok(serialize_profile(&student.profile, Role::Student)
            .with("facultyId", student.faculty_id.as_str()))
    }

    fn to_insert_params(&self, student: &Student) -> DbResult<Params> {
        let mut params = profile_insert_params(&student.profile, Role::Student);
        params.push(Value::from(student.faculty_id.as_str()));
        Ok(params)
    }

    fn to_update_params(&self, student: &Student) -> DbResult<Params> {
        let mut params = profile_update_params(&student.profile);
        params.push(Value::from(student.faculty_id.as_str()));
        params.push(Value::from(student.id()));
        Ok(params)
    }
}

/// Role columns: `facultyId, qualification, specializationSubjects,
/// designation, experienceYears`. Subjects are stored as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeacherParser;

impl TeacherParser {
    fn role_params(teacher: &Teacher) -> DbResult<Params> {
        Ok(vec![
            Value::from(teacher.faculty_id.as_str()),
            Value::optional_text(&teacher.qualification),
            Value::Text(encode_subjects(&teacher.specialization_subjects)?),
            Value::optional_text(&teacher.designation),
            Value::from(teacher.experience_years),
        ])
    }
}

fn encode_subjects(subjects: &[String]) -> DbResult<String> {
    serde_json::to_string(subjects).map_err(|e| {
        DbError::parsing(format!("cannot encode 'specializationSubjects': {}", e))
    })
}

fn decode_subjects(row: &Row) -> DbResult<Vec<String>> {
    let raw = optional_text(row, "specializationSubjects")?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|e| {
        DbError::parsing(format!(
            "column 'specializationSubjects' is not a JSON string array: {}",
            e
        ))
    })
}

impl EntityParser for TeacherParser {
    type Entity = Teacher;
    const ENTITY: &'static str = "teacher";

    fn parse(&self, row: &Row) -> DbResult<Teacher> {
        Ok(Teacher {
            profile: parse_profile(row, Role::Teacher)?,
            faculty_id: text(row, "facultyId")?,
            qualification: optional_text(row, "qualification")?,
            specialization_subjects: decode_subjects(row)?,
            designation: optional_text(row, "designation")?,
            experience_years: integer(row, "experienceYears")?,
        })
    }

    fn serialize(&self, teacher: &Teacher) -> DbResult<Row> {
        Ok(serialize_profile(&teacher.profile, Role::Teacher)
            .with("facultyId", teacher.faculty_id.as_str())
            .with("qualification", Value::optional_text(&teacher.qualification))
            .with(
                "specializationSubjects",
                encode_subjects(&teacher.specialization_subjects)?,
            )
            .with("designation", Value::optional_text(&teacher.designation))
            .with("experienceYears", teacher.experience_years))
    }

    fn to_insert_params(&self, teacher: &Teacher) -> DbResult<Params> {
        let mut params = profile_insert_params(&teacher.profile, Role::Teacher);
        params.extend(Self::role_params(teacher)?);
        Ok(params)
    }

    fn to_update_params(&self, teacher: &Teacher) -> DbResult<Params> {
        let mut params = profile_update_params(&teacher.profile);
        params.extend(Self::role_params(teacher)?);
        params.push(Value::from(teacher.id()));
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::models::UserStatus;

    fn profile(id: &str) -> UserProfile {
        UserProfile::new(id, "Binh", "Tran", Birthday::new(2, 9, 1985), "079085001234")
            .with_email("binh@example.edu")
            .with_status(UserStatus::Inactive)
    }

    #[test]
    fn test_student_round_trip() {
        let student = Student::new(profile("S001"), "IT");
        let row = StudentParser.serialize(&student).unwrap();
        assert_eq!(row.get("address"), Some(&Value::Null));
        assert_eq!(StudentParser.parse(&row).unwrap(), student);
    }

    #[test]
    fn test_teacher_round_trip() {
        let teacher = Teacher::new(profile("T001"), "IT")
            .with_qualification("PhD")
            .with_subjects(["Databases", "Compilers"])
            .with_designation("Lecturer")
            .with_experience_years(12);
        let row = TeacherParser.serialize(&teacher).unwrap();
        assert_eq!(
            row.get("specializationSubjects"),
            Some(&Value::Text("[\"Databases\",\"Compilers\"]".to_string()))
        );
        assert_eq!(TeacherParser.parse(&row).unwrap(), teacher);
    }

    #[test]
    fn test_insert_params_split_at_user_prefix() {
        let teacher = Teacher::new(profile("T001"), "IT").with_experience_years(3);
        let params = TeacherParser.to_insert_params(&teacher).unwrap();
        assert_eq!(params.len(), USER_INSERT_COLUMNS + 5);
        assert_eq!(params[0], Value::from("T001"));
        assert_eq!(params[10], Value::from("TEACHER"));
        assert_eq!(params[USER_INSERT_COLUMNS], Value::from("IT"));

        let student = Student::new(profile("S001"), "IT");
        let params = StudentParser.to_insert_params(&student).unwrap();
        assert_eq!(params.len(), USER_INSERT_COLUMNS + 1);
    }

    #[test]
    fn test_update_params_end_with_identity() {
        let student = Student::new(profile("S001"), "BIO");
        let params = StudentParser.to_update_params(&student).unwrap();
        assert_eq!(params.len(), USER_UPDATE_COLUMNS + 2);
        assert_eq!(params[USER_UPDATE_COLUMNS], Value::from("BIO"));
        assert_eq!(params.last(), Some(&Value::from("S001")));
    }

    #[test]
    fn test_wrong_role_is_rejected() {
        let student = Student::new(profile("S001"), "IT");
        let row = StudentParser.serialize(&student).unwrap();
        let err = TeacherParser.parse(&row).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParsingError);
        assert!(err.message().contains("role"));
    }

    #[test]
    fn test_missing_column_is_named() {
        let student = Student::new(profile("S001"), "IT");
        let mut row = StudentParser.serialize(&student).unwrap();
        row.insert("citizenId", Value::Null);
        let err = StudentParser.parse(&row).unwrap_err();
        assert!(err.message().contains("citizenId"));
    }

    #[test]
    fn test_bad_subjects_json() {
        let teacher = Teacher::new(profile("T001"), "IT");
        let mut row = TeacherParser.serialize(&teacher).unwrap();
        row.insert("specializationSubjects", "Databases, Compilers");
        let err = TeacherParser.parse(&row).unwrap_err();
        assert!(err.message().contains("specializationSubjects"));

        row.insert("specializationSubjects", Value::Null);
        assert!(TeacherParser.parse(&row).unwrap().specialization_subjects.is_empty());
    }
}
