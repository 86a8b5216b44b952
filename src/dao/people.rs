//! DAOs for students and teachers.
//!
//! A person is one `Users` row plus one row in the role table. Writes touch
//! both tables inside a single adapter transaction, so a failure on either
//! statement leaves neither behind. Deleting the `Users` row cascades to the
//! role table and everything hanging off it.

use super::{Dao, Key, StudentDao, TeacherDao};
use crate::db::types::{Params, Value};
use crate::error::{DbError, DbResult};
use crate::models::{Role, Student, Teacher, Validate};
use crate::parser::EntityParser;
use crate::parser::user::{USER_INSERT_COLUMNS, USER_UPDATE_COLUMNS};
use tracing::debug;

const USER_INSERT: &str = "INSERT INTO Users \
     (id, firstName, lastName, birthDay, birthMonth, birthYear, address, citizenId, email, phoneNumber, role, status) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const USER_UPDATE: &str = "UPDATE Users SET firstName = ?, lastName = ?, birthDay = ?, birthMonth = ?, \
     birthYear = ?, address = ?, citizenId = ?, email = ?, phoneNumber = ?, status = ? \
     WHERE id = ? AND role = ?";
const USER_DELETE: &str = "DELETE FROM Users WHERE id = ? AND role = ?";

const USER_COLUMNS: &str = "u.id AS id, u.firstName AS firstName, u.lastName AS lastName, \
     u.birthDay AS birthDay, u.birthMonth AS birthMonth, u.birthYear AS birthYear, \
     u.address AS address, u.citizenId AS citizenId, u.email AS email, \
     u.phoneNumber AS phoneNumber, u.role AS role, u.status AS status";

const STUDENT_INSERT: &str = "INSERT INTO Students (userId, facultyId) VALUES (?, ?)";
const STUDENT_UPDATE: &str = "UPDATE Students SET facultyId = ? WHERE userId = ?";

const TEACHER_INSERT: &str = "INSERT INTO Teachers \
     (userId, facultyId, qualification, specializationSubjects, designation, experienceYears) \
     VALUES (?, ?, ?, ?, ?, ?)";
const TEACHER_UPDATE: &str = "UPDATE Teachers SET facultyId = ?, qualification = ?, \
     specializationSubjects = ?, designation = ?, experienceYears = ? WHERE userId = ?";

fn student_select() -> String {
    format!(
        "SELECT {USER_COLUMNS}, s.facultyId AS facultyId \
         FROM Users u JOIN Students s ON s.userId = u.id"
    )
}

fn teacher_select() -> String {
    format!(
        "SELECT {USER_COLUMNS}, t.facultyId AS facultyId, t.qualification AS qualification, \
         t.specializationSubjects AS specializationSubjects, t.designation AS designation, \
         t.experienceYears AS experienceYears \
         FROM Users u JOIN Teachers t ON t.userId = u.id"
    )
}

/// Split combined insert parameters into the `Users` row and the role row.
/// The role row starts with the user id.
fn split_insert(params: Params) -> DbResult<(Params, Params)> {
    if params.len() < USER_INSERT_COLUMNS {
        return Err(DbError::operation_failed(format!(
            "expected at least {} insert parameters, got {}",
            USER_INSERT_COLUMNS,
            params.len()
        )));
    }
    let mut user = params;
    let extra = user.split_off(USER_INSERT_COLUMNS);
    let mut role = Vec::with_capacity(extra.len() + 1);
    role.push(user[0].clone());
    role.extend(extra);
    Ok((user, role))
}

/// Split combined update parameters; both halves end with the user id.
fn split_update(params: Params, role: Role) -> DbResult<(Params, Params)> {
    let Some(id) = params.last().cloned() else {
        return Err(DbError::operation_failed("update parameters are empty"));
    };
    if params.len() <= USER_UPDATE_COLUMNS {
        return Err(DbError::operation_failed(format!(
            "expected more than {} update parameters, got {}",
            USER_UPDATE_COLUMNS,
            params.len()
        )));
    }
    let mut user = params;
    let role_params = user.split_off(USER_UPDATE_COLUMNS);
    user.push(id);
    user.push(Value::from(role.as_str()));
    Ok((user, role_params))
}

impl<P> Dao<P>
where
    P: EntityParser,
    P::Entity: Validate,
{
    fn add_person(&self, person: &P::Entity, role_sql: &str) -> DbResult<()> {
        Self::validate(person)?;
        let (user, role) = split_insert(self.parser.to_insert_params(person)?)?;

        let mut db = self.lock()?;
        db.transaction(|db| {
            db.execute_update(USER_INSERT, &user)?;
            db.execute_update(role_sql, &role)?;
            Ok(())
        })?;
        debug!(entity = P::ENTITY, "Inserted user and role rows");
        Ok(())
    }

    fn update_person(&self, person: &P::Entity, role: Role, role_sql: &str, id: &str) -> DbResult<()> {
        Self::validate(person)?;
        let (user, role_params) = split_update(self.parser.to_update_params(person)?, role)?;
        let missing = || DbError::not_found(format!("{} {}", P::ENTITY, Key(&[id])));

        let mut db = self.lock()?;
        db.transaction(|db| {
            if db.execute_update(USER_UPDATE, &user)? == 0 {
                return Err(missing());
            }
            if db.execute_update(role_sql, &role_params)? == 0 {
                return Err(missing());
            }
            Ok(())
        })
    }

    fn remove_person(&self, id: &str, role: Role) -> DbResult<()> {
        self.write_one(
            USER_DELETE,
            &[Value::from(id), Value::from(role.as_str())],
            Key(&[id]),
        )
    }
}

impl StudentDao {
    /// Insert the `Users` and `Students` rows atomically.
    ///
    /// A duplicate id or citizen id is `ALREADY_EXISTS`; an unknown faculty
    /// is `NOT_FOUND`. Either way nothing is left behind.
    pub fn add(&self, student: &Student) -> DbResult<()> {
        self.add_person(student, STUDENT_INSERT)
    }

    pub fn update(&self, student: &Student) -> DbResult<()> {
        self.update_person(student, Role::Student, STUDENT_UPDATE, student.id())
    }

    /// Removes enrollments, results and the fee record too.
    pub fn remove(&self, id: &str) -> DbResult<()> {
        self.remove_person(id, Role::Student)
    }

    pub fn get_by_id(&self, id: &str) -> DbResult<Student> {
        self.fetch_one(
            &format!("{} WHERE u.id = ?", student_select()),
            &[Value::from(id)],
            Key(&[id]),
        )
    }

    pub fn get_all(&self) -> DbResult<Vec<Student>> {
        self.fetch_all(&format!("{} ORDER BY u.id", student_select()), &[])
    }

    pub fn get_by_faculty(&self, faculty_id: &str) -> DbResult<Vec<Student>> {
        self.fetch_all(
            &format!("{} WHERE s.facultyId = ? ORDER BY u.id", student_select()),
            &[Value::from(faculty_id)],
        )
    }

    pub fn exists(&self, id: &str) -> DbResult<bool> {
        self.probe("SELECT 1 FROM Students WHERE userId = ? LIMIT 1", &[Value::from(id)])
    }
}

impl TeacherDao {
    /// Insert the `Users` and `Teachers` rows atomically.
    pub fn add(&self, teacher: &Teacher) -> DbResult<()> {
        self.add_person(teacher, TEACHER_INSERT)
    }

    pub fn update(&self, teacher: &Teacher) -> DbResult<()> {
        self.update_person(teacher, Role::Teacher, TEACHER_UPDATE, teacher.id())
    }

    pub fn remove(&self, id: &str) -> DbResult<()> {
        self.remove_person(id, Role::Teacher)
    }

    pub fn get_by_id(&self, id: &str) -> DbResult<Teacher> {
        self.fetch_one(
            &format!("{} WHERE u.id = ?", teacher_select()),
            &[Value::from(id)],
            Key(&[id]),
        )
    }

    pub fn get_all(&self) -> DbResult<Vec<Teacher>> {
        self.fetch_all(&format!("{} ORDER BY u.id", teacher_select()), &[])
    }

    pub fn get_by_faculty(&self, faculty_id: &str) -> DbResult<Vec<Teacher>> {
        self.fetch_all(
            &format!("{} WHERE t.facultyId = ? ORDER BY u.id", teacher_select()),
            &[Value::from(faculty_id)],
        )
    }

    pub fn exists(&self, id: &str) -> DbResult<bool> {
        self.probe("SELECT 1 FROM Teachers WHERE userId = ? LIMIT 1", &[Value::from(id)])
    }
}
