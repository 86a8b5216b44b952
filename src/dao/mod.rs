//! Typed data access objects.
//!
//! A [`Dao<P>`] composes the shared [`Adapter`] with one [`EntityParser`].
//! Each entity has its own `impl Dao<XParser>` block carrying its SQL, and a
//! type alias (`FacultyDao`, `StudentDao`, ...) for callers.
//!
//! Every call holds the adapter lock for its whole duration, so the statements
//! of one multi-table write are never interleaved with another caller's.

pub mod academic;
pub mod finance;
pub mod login;
pub mod people;

use crate::context::SharedAdapter;
use crate::db::Adapter;
use crate::db::types::Value;
use crate::error::{DbError, DbResult};
use crate::models::Validate;
use crate::parser::{
    CourseParser, CourseResultParser, EnrollmentParser, EntityParser, FacultyParser,
    FeeRecordParser, LoginParser, SalaryRecordParser, StudentParser, TeacherParser,
};
use std::fmt;
use std::sync::MutexGuard;
use tracing::debug;

pub type FacultyDao = Dao<FacultyParser>;
pub type CourseDao = Dao<CourseParser>;
pub type EnrollmentDao = Dao<EnrollmentParser>;
pub type CourseResultDao = Dao<CourseResultParser>;
pub type StudentDao = Dao<StudentParser>;
pub type TeacherDao = Dao<TeacherParser>;
pub type FeeRecordDao = Dao<FeeRecordParser>;
pub type SalaryRecordDao = Dao<SalaryRecordParser>;
pub type LoginDao = Dao<LoginParser>;

pub struct Dao<P> {
    adapter: SharedAdapter,
    parser: P,
}

impl<P> Clone for Dao<P>
where
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            adapter: SharedAdapter::clone(&self.adapter),
            parser: self.parser.clone(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Dao<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dao").field("parser", &self.parser).finish()
    }
}

impl<P: EntityParser> Dao<P> {
    pub fn new(adapter: SharedAdapter, parser: P) -> Self {
        Self { adapter, parser }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Adapter>> {
        self.adapter
            .lock()
            .map_err(|_| DbError::data_access("adapter lock poisoned by a panicked caller", None))
    }

    /// Exactly one entity, or `NOT_FOUND` naming `what`.
    fn fetch_one(&self, sql: &str, params: &[Value], what: impl fmt::Display) -> DbResult<P::Entity> {
        let table = self.lock()?.execute_query(sql, params)?;
        match table.first() {
            Some(row) => self.parser.parse(row),
            None => Err(DbError::not_found(format!("{} {}", P::ENTITY, what))),
        }
    }

    fn fetch_all(&self, sql: &str, params: &[Value]) -> DbResult<Vec<P::Entity>> {
        let table = self.lock()?.execute_query(sql, params)?;
        self.parser.parse_all(&table)
    }

    /// `SELECT 1 ... LIMIT 1` style existence probe.
    fn probe(&self, sql: &str, params: &[Value]) -> DbResult<bool> {
        Ok(!self.lock()?.execute_query(sql, params)?.is_empty())
    }

    /// Run a statement that must touch at least one row.
    fn write_one(&self, sql: &str, params: &[Value], what: impl fmt::Display) -> DbResult<()> {
        let affected = self.lock()?.execute_update(sql, params)?;
        if affected == 0 {
            debug!(entity = P::ENTITY, target_row = %what, "Write matched no rows");
            return Err(DbError::not_found(format!("{} {}", P::ENTITY, what)));
        }
        Ok(())
    }
}

impl<P> Dao<P>
where
    P: EntityParser,
    P::Entity: Validate,
{
    fn validate(entity: &P::Entity) -> DbResult<()> {
        entity
            .validate_basic()
            .map_err(|reason| DbError::validation(format!("{}: {}", P::ENTITY, reason)))
    }

    /// Validate, then insert a single-table entity.
    fn insert(&self, sql: &str, entity: &P::Entity) -> DbResult<()> {
        Self::validate(entity)?;
        let params = self.parser.to_insert_params(entity)?;
        let affected = self.lock()?.execute_update(sql, &params)?;
        if affected == 0 {
            return Err(DbError::operation_failed(format!(
                "insert of {} affected no rows",
                P::ENTITY
            )));
        }
        Ok(())
    }

    /// Validate, then update a single-table entity; zero rows is `NOT_FOUND`.
    fn update_existing(&self, sql: &str, entity: &P::Entity, what: impl fmt::Display) -> DbResult<()> {
        Self::validate(entity)?;
        let params = self.parser.to_update_params(entity)?;
        self.write_one(sql, &params, what)
    }
}

/// Quote an identity for messages: `'IT'`, `('S1', 'C1')`.
pub(crate) struct Key<'a>(pub &'a [&'a str]);

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [single] => write!(f, "'{}'", single),
            parts => {
                let quoted: Vec<String> = parts.iter().map(|p| format!("'{}'", p)).collect();
                write!(f, "({})", quoted.join(", "))
            }
        }
    }
}
