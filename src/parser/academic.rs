//! Parsers for faculties, courses, enrollments and course results.

use super::{EntityParser, integer, nullable_text, text};
use crate::db::types::{Params, Row, Value};
use crate::error::{DbError, DbResult};
use crate::models::{Course, CourseResult, Enrollment, Faculty};
use chrono::NaiveDateTime;

/// Format of SQLite's `CURRENT_TIMESTAMP`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Insert: `id, name`. Update: `name, id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacultyParser;

impl EntityParser for FacultyParser {
    type Entity = Faculty;
    const ENTITY: &'static str = "faculty";

    fn parse(&self, row: &Row) -> DbResult<Faculty> {
        Ok(Faculty {
            id: text(row, "id")?,
            name: text(row, "name")?,
        })
    }

    fn serialize(&self, faculty: &Faculty) -> DbResult<Row> {
        Ok(Row::new()
            .with("id", faculty.id.as_str())
            .with("name", faculty.name.as_str()))
    }

    fn to_insert_params(&self, faculty: &Faculty) -> DbResult<Params> {
        Ok(vec![
            Value::from(faculty.id.as_str()),
            Value::from(faculty.name.as_str()),
        ])
    }

    fn to_update_params(&self, faculty: &Faculty) -> DbResult<Params> {
        Ok(vec![
            Value::from(faculty.name.as_str()),
            Value::from(faculty.id.as_str()),
        ])
    }
}

/// Insert: `id, name, credits, facultyId`. Update: `name, credits, facultyId, id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseParser;

impl EntityParser for CourseParser {
    type Entity = Course;
    const ENTITY: &'static str = "course";

    fn parse(&self, row: &Row) -> DbResult<Course> {
        Ok(Course {
            id: text(row, "id")?,
            name: text(row, "name")?,
            credits: integer(row, "credits")?,
            faculty_id: text(row, "facultyId")?,
        })
    }

    fn serialize(&self, course: &Course) -> DbResult<Row> {
        Ok(Row::new()
            .with("id", course.id.as_str())
            .with("name", course.name.as_str())
            .with("credits", course.credits)
            .with("facultyId", course.faculty_id.as_str()))
    }

    fn to_insert_params(&self, course: &Course) -> DbResult<Params> {
        Ok(vec![
            Value::from(course.id.as_str()),
            Value::from(course.name.as_str()),
            Value::from(course.credits),
            Value::from(course.faculty_id.as_str()),
        ])
    }

    fn to_update_params(&self, course: &Course) -> DbResult<Params> {
        Ok(vec![
            Value::from(course.name.as_str()),
            Value::from(course.credits),
            Value::from(course.faculty_id.as_str()),
            Value::from(course.id.as_str()),
        ])
    }
}

/// Insert: `studentId, courseId, enrollmentDate`.
/// Update: `enrollmentDate, studentId, courseId`.
///
/// A missing enrollment date binds as NULL; the statements fall back to the
/// current time (insert) or the stored value (update).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentParser;

fn format_timestamp(at: Option<NaiveDateTime>) -> Value {
    at.map(|at| at.format(TIMESTAMP_FORMAT).to_string()).into()
}

impl EntityParser for EnrollmentParser {
    type Entity = Enrollment;
    const ENTITY: &'static str = "enrollment";

    fn parse(&self, row: &Row) -> DbResult<Enrollment> {
        let enrolled_at = match nullable_text(row, "enrollmentDate")? {
            Some(raw) => Some(NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(
                |e| DbError::parsing(format!("column 'enrollmentDate' value '{}': {}", raw, e)),
            )?),
            None => None,
        };

        Ok(Enrollment {
            student_id: text(row, "studentId")?,
            course_id: text(row, "courseId")?,
            enrolled_at,
        })
    }

    fn serialize(&self, enrollment: &Enrollment) -> DbResult<Row> {
        Ok(Row::new()
            .with("studentId", enrollment.student_id.as_str())
            .with("courseId", enrollment.course_id.as_str())
            .with("enrollmentDate", format_timestamp(enrollment.enrolled_at)))
    }

    fn to_insert_params(&self, enrollment: &Enrollment) -> DbResult<Params> {
        Ok(vec![
            Value::from(enrollment.student_id.as_str()),
            Value::from(enrollment.course_id.as_str()),
            format_timestamp(enrollment.enrolled_at),
        ])
    }

    fn to_update_params(&self, enrollment: &Enrollment) -> DbResult<Params> {
        Ok(vec![
            format_timestamp(enrollment.enrolled_at),
            Value::from(enrollment.student_id.as_str()),
            Value::from(enrollment.course_id.as_str()),
        ])
    }
}

/// Insert: `studentId, courseId, marks`. Update: `marks, studentId, courseId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseResultParser;

impl EntityParser for CourseResultParser {
    type Entity = CourseResult;
    const ENTITY: &'static str = "course result";

    fn parse(&self, row: &Row) -> DbResult<CourseResult> {
        Ok(CourseResult {
            student_id: text(row, "studentId")?,
            course_id: text(row, "courseId")?,
            marks: integer(row, "marks")?,
        })
    }

    fn serialize(&self, result: &CourseResult) -> DbResult<Row> {
        Ok(Row::new()
            .with("studentId", result.student_id.as_str())
            .with("courseId", result.course_id.as_str())
            .with("marks", result.marks))
    }

    fn to_insert_params(&self, result: &CourseResult) -> DbResult<Params> {
        Ok(vec![
            Value::from(result.student_id.as_str()),
            Value::from(result.course_id.as_str()),
            Value::from(result.marks),
        ])
    }

    fn to_update_params(&self, result: &CourseResult) -> DbResult<Params> {
        Ok(vec![
            Value::from(result.marks),
            Value::from(result.student_id.as_str()),
            Value::from(result.course_id.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_faculty_round_trip() {
        let faculty = Faculty::new("IT", "Information Technology");
        let row = FacultyParser.serialize(&faculty).unwrap();
        assert_eq!(FacultyParser.parse(&row).unwrap(), faculty);
        assert_eq!(
            FacultyParser.to_update_params(&faculty).unwrap().last(),
            Some(&Value::from("IT"))
        );
    }

    #[test]
    fn test_course_round_trip_and_order() {
        let course = Course::new("CS101", "Programming", 4, "IT");
        let row = CourseParser.serialize(&course).unwrap();
        assert_eq!(CourseParser.parse(&row).unwrap(), course);
        let params = CourseParser.to_insert_params(&course).unwrap();
        assert_eq!(params[2], Value::Integer(4));
    }

    #[test]
    fn test_course_rejects_negative_credits_from_storage() {
        let row = Row::new()
            .with("id", "CS101")
            .with("name", "Programming")
            .with("credits", -3_i64)
            .with("facultyId", "IT");
        assert!(CourseParser.parse(&row).is_err());
    }

    #[test]
    fn test_enrollment_timestamps() {
        let at = NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let dated = Enrollment::new("S001", "CS101").enrolled_at(at);
        let row = EnrollmentParser.serialize(&dated).unwrap();
        assert_eq!(
            row.get("enrollmentDate"),
            Some(&Value::from("2024-09-01 08:30:00"))
        );
        assert_eq!(EnrollmentParser.parse(&row).unwrap(), dated);

        let undated = Enrollment::new("S001", "CS101");
        let params = EnrollmentParser.to_insert_params(&undated).unwrap();
        assert_eq!(params[2], Value::Null);
        let row = EnrollmentParser.serialize(&undated).unwrap();
        assert_eq!(EnrollmentParser.parse(&row).unwrap(), undated);
    }

    #[test]
    fn test_enrollment_bad_timestamp() {
        let row = Row::new()
            .with("studentId", "S001")
            .with("courseId", "CS101")
            .with("enrollmentDate", "yesterday");
        let err = EnrollmentParser.parse(&row).unwrap_err();
        assert!(err.message().contains("enrollmentDate"));
    }

    #[test]
    fn test_course_result_round_trip() {
        let result = CourseResult::ungraded("S001", "CS101");
        let row = CourseResultParser.serialize(&result).unwrap();
        assert_eq!(CourseResultParser.parse(&row).unwrap(), result);
        assert_eq!(
            CourseResultParser.to_update_params(&result).unwrap()[0],
            Value::Integer(-1)
        );
    }
}
