//! DAOs for faculties, courses, enrollments and course results.

use super::{CourseDao, CourseResultDao, EnrollmentDao, FacultyDao, Key};
use crate::db::types::Value;
use crate::error::{DbError, DbResult, ErrorCode};
use crate::models::{Course, CourseResult, Enrollment, Faculty};

const FACULTY_INSERT: &str = "INSERT INTO Faculties (id, name) VALUES (?, ?)";
const FACULTY_UPDATE: &str = "UPDATE Faculties SET name = ? WHERE id = ?";
const FACULTY_DELETE: &str = "DELETE FROM Faculties WHERE id = ?";
const FACULTY_SELECT: &str = "SELECT id, name FROM Faculties";

impl FacultyDao {
    /// Duplicate ids or names come back as `ALREADY_EXISTS`.
    pub fn add(&self, faculty: &Faculty) -> DbResult<()> {
        self.insert(FACULTY_INSERT, faculty)
    }

    pub fn update(&self, faculty: &Faculty) -> DbResult<()> {
        self.update_existing(FACULTY_UPDATE, faculty, Key(&[faculty.id.as_str()]))
    }

    /// Refused with `OPERATION_FAILED` while students, teachers or courses
    /// still reference the faculty.
    pub fn remove(&self, id: &str) -> DbResult<()> {
        let affected = self
            .lock()?
            .execute_update(FACULTY_DELETE, &[Value::from(id)])
            .map_err(|e| match e.code() {
                ErrorCode::NotFound => DbError::operation_failed(format!(
                    "faculty {} is still referenced: {}",
                    Key(&[id]),
                    e.message()
                )),
                _ => e,
            })?;
        if affected == 0 {
            return Err(DbError::not_found(format!("faculty {}", Key(&[id]))));
        }
        Ok(())
    }

    pub fn get_by_id(&self, id: &str) -> DbResult<Faculty> {
        self.fetch_one(
            &format!("{FACULTY_SELECT} WHERE id = ?"),
            &[Value::from(id)],
            Key(&[id]),
        )
    }

    pub fn get_by_name(&self, name: &str) -> DbResult<Faculty> {
        self.fetch_one(
            &format!("{FACULTY_SELECT} WHERE name = ?"),
            &[Value::from(name)],
            format!("named '{}'", name),
        )
    }

    pub fn get_all(&self) -> DbResult<Vec<Faculty>> {
        self.fetch_all(&format!("{FACULTY_SELECT} ORDER BY id"), &[])
    }

    pub fn exists(&self, id: &str) -> DbResult<bool> {
        self.probe("SELECT 1 FROM Faculties WHERE id = ? LIMIT 1", &[Value::from(id)])
    }
}

const COURSE_INSERT: &str =
    "INSERT INTO Courses (id, name, credits, facultyId) VALUES (?, ?, ?, ?)";
const COURSE_UPDATE: &str = "UPDATE Courses SET name = ?, credits = ?, facultyId = ? WHERE id = ?";
const COURSE_DELETE: &str = "DELETE FROM Courses WHERE id = ?";
const COURSE_SELECT: &str = "SELECT id, name, credits, facultyId FROM Courses";

impl CourseDao {
    /// An unknown faculty comes back as `NOT_FOUND`.
    pub fn add(&self, course: &Course) -> DbResult<()> {
        self.insert(COURSE_INSERT, course)
    }

    pub fn update(&self, course: &Course) -> DbResult<()> {
        self.update_existing(COURSE_UPDATE, course, Key(&[course.id.as_str()]))
    }

    /// Enrollments and results for the course are removed with it.
    pub fn remove(&self, id: &str) -> DbResult<()> {
        self.write_one(COURSE_DELETE, &[Value::from(id)], Key(&[id]))
    }

    pub fn get_by_id(&self, id: &str) -> DbResult<Course> {
        self.fetch_one(
            &format!("{COURSE_SELECT} WHERE id = ?"),
            &[Value::from(id)],
            Key(&[id]),
        )
    }

    pub fn get_all(&self) -> DbResult<Vec<Course>> {
        self.fetch_all(&format!("{COURSE_SELECT} ORDER BY id"), &[])
    }

    pub fn get_by_faculty(&self, faculty_id: &str) -> DbResult<Vec<Course>> {
        self.fetch_all(
            &format!("{COURSE_SELECT} WHERE facultyId = ? ORDER BY id"),
            &[Value::from(faculty_id)],
        )
    }

    pub fn exists(&self, id: &str) -> DbResult<bool> {
        self.probe("SELECT 1 FROM Courses WHERE id = ? LIMIT 1", &[Value::from(id)])
    }
}

const ENROLLMENT_INSERT: &str = "INSERT INTO Enrollments (studentId, courseId, enrollmentDate) \
     VALUES (?, ?, COALESCE(?, CURRENT_TIMESTAMP))";
const ENROLLMENT_UPDATE: &str = "UPDATE Enrollments SET enrollmentDate = COALESCE(?, enrollmentDate) \
     WHERE studentId = ? AND courseId = ?";
const ENROLLMENT_DELETE: &str = "DELETE FROM Enrollments WHERE studentId = ? AND courseId = ?";
const ENROLLMENT_SELECT: &str = "SELECT studentId, courseId, enrollmentDate FROM Enrollments";

impl EnrollmentDao {
    /// Enrolling twice on the same course is `ALREADY_EXISTS`.
    pub fn add(&self, enrollment: &Enrollment) -> DbResult<()> {
        self.insert(ENROLLMENT_INSERT, enrollment)
    }

    /// Change the enrollment date; `None` keeps the stored one.
    pub fn update(&self, enrollment: &Enrollment) -> DbResult<()> {
        self.update_existing(
            ENROLLMENT_UPDATE,
            enrollment,
            Key(&[enrollment.student_id.as_str(), enrollment.course_id.as_str()]),
        )
    }

    pub fn remove(&self, student_id: &str, course_id: &str) -> DbResult<()> {
        self.write_one(
            ENROLLMENT_DELETE,
            &[Value::from(student_id), Value::from(course_id)],
            Key(&[student_id, course_id]),
        )
    }

    pub fn get(&self, student_id: &str, course_id: &str) -> DbResult<Enrollment> {
        self.fetch_one(
            &format!("{ENROLLMENT_SELECT} WHERE studentId = ? AND courseId = ?"),
            &[Value::from(student_id), Value::from(course_id)],
            Key(&[student_id, course_id]),
        )
    }

    pub fn get_by_student(&self, student_id: &str) -> DbResult<Vec<Enrollment>> {
        self.fetch_all(
            &format!("{ENROLLMENT_SELECT} WHERE studentId = ? ORDER BY courseId"),
            &[Value::from(student_id)],
        )
    }

    pub fn get_by_course(&self, course_id: &str) -> DbResult<Vec<Enrollment>> {
        self.fetch_all(
            &format!("{ENROLLMENT_SELECT} WHERE courseId = ? ORDER BY studentId"),
            &[Value::from(course_id)],
        )
    }

    pub fn exists(&self, student_id: &str, course_id: &str) -> DbResult<bool> {
        self.probe(
            "SELECT 1 FROM Enrollments WHERE studentId = ? AND courseId = ? LIMIT 1",
            &[Value::from(student_id), Value::from(course_id)],
        )
    }
}

const RESULT_INSERT: &str =
    "INSERT INTO CourseResults (studentId, courseId, marks) VALUES (?, ?, ?)";
const RESULT_UPDATE: &str =
    "UPDATE CourseResults SET marks = ? WHERE studentId = ? AND courseId = ?";
const RESULT_DELETE: &str = "DELETE FROM CourseResults WHERE studentId = ? AND courseId = ?";
const RESULT_SELECT: &str = "SELECT studentId, courseId, marks FROM CourseResults";

impl CourseResultDao {
    pub fn add(&self, result: &CourseResult) -> DbResult<()> {
        self.insert(RESULT_INSERT, result)
    }

    pub fn update(&self, result: &CourseResult) -> DbResult<()> {
        self.update_existing(
            RESULT_UPDATE,
            result,
            Key(&[result.student_id.as_str(), result.course_id.as_str()]),
        )
    }

    pub fn remove(&self, student_id: &str, course_id: &str) -> DbResult<()> {
        self.write_one(
            RESULT_DELETE,
            &[Value::from(student_id), Value::from(course_id)],
            Key(&[student_id, course_id]),
        )
    }

    pub fn get(&self, student_id: &str, course_id: &str) -> DbResult<CourseResult> {
        self.fetch_one(
            &format!("{RESULT_SELECT} WHERE studentId = ? AND courseId = ?"),
            &[Value::from(student_id), Value::from(course_id)],
            Key(&[student_id, course_id]),
        )
    }

    pub fn get_by_student(&self, student_id: &str) -> DbResult<Vec<CourseResult>> {
        self.fetch_all(
            &format!("{RESULT_SELECT} WHERE studentId = ? ORDER BY courseId"),
            &[Value::from(student_id)],
        )
    }

    pub fn get_by_course(&self, course_id: &str) -> DbResult<Vec<CourseResult>> {
        self.fetch_all(
            &format!("{RESULT_SELECT} WHERE courseId = ? ORDER BY studentId"),
            &[Value::from(course_id)],
        )
    }

    pub fn exists(&self, student_id: &str, course_id: &str) -> DbResult<bool> {
        self.probe(
            "SELECT 1 FROM CourseResults WHERE studentId = ? AND courseId = ? LIMIT 1",
            &[Value::from(student_id), Value::from(course_id)],
        )
    }
}
