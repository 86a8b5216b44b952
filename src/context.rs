//! Composition root wiring one shared adapter into every DAO.
//!
//! ```no_run
//! use records_store::{DataContext, DatabaseTarget};
//! use records_store::models::Faculty;
//!
//! let context = DataContext::open(DatabaseTarget::file("records.db"))?;
//! context.faculties().add(&Faculty::new("IT", "Information Technology"))?;
//! context.close()?;
//! # Ok::<(), records_store::DbError>(())
//! ```

use crate::config::DatabaseTarget;
use crate::dao::{
    CourseDao, CourseResultDao, Dao, EnrollmentDao, FacultyDao, FeeRecordDao, LoginDao,
    SalaryRecordDao, StudentDao, TeacherDao,
};
use crate::db::{Adapter, scalar_integer, schema};
use crate::error::{DbError, DbResult};
use crate::parser::{
    CourseParser, CourseResultParser, EnrollmentParser, FacultyParser, FeeRecordParser,
    LoginParser, SalaryRecordParser, StudentParser, TeacherParser,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// The adapter as shared by every DAO. Lock it for a whole unit of work.
pub type SharedAdapter = Arc<Mutex<Adapter>>;

#[derive(Debug, Clone)]
pub struct DataContext {
    adapter: SharedAdapter,
    faculties: FacultyDao,
    courses: CourseDao,
    enrollments: EnrollmentDao,
    course_results: CourseResultDao,
    students: StudentDao,
    teachers: TeacherDao,
    fee_records: FeeRecordDao,
    salary_records: SalaryRecordDao,
    logins: LoginDao,
}

impl DataContext {
    /// Connect to `target`, create any missing tables and wire the DAOs.
    pub fn open(target: DatabaseTarget) -> DbResult<Self> {
        info!(target_db = %target, "Opening records database");
        let mut adapter = Adapter::new();
        adapter.connect(target)?;
        adapter.ensure_schema()?;

        Self::builder()
            .adapter(Arc::new(Mutex::new(adapter)))
            .build()
    }

    pub fn builder() -> DataContextBuilder {
        DataContextBuilder::default()
    }

    pub fn adapter(&self) -> &SharedAdapter {
        &self.adapter
    }

    pub fn faculties(&self) -> &FacultyDao {
        &self.faculties
    }

    pub fn courses(&self) -> &CourseDao {
        &self.courses
    }

    pub fn enrollments(&self) -> &EnrollmentDao {
        &self.enrollments
    }

    pub fn course_results(&self) -> &CourseResultDao {
        &self.course_results
    }

    pub fn students(&self) -> &StudentDao {
        &self.students
    }

    pub fn teachers(&self) -> &TeacherDao {
        &self.teachers
    }

    pub fn fee_records(&self) -> &FeeRecordDao {
        &self.fee_records
    }

    pub fn salary_records(&self) -> &SalaryRecordDao {
        &self.salary_records
    }

    pub fn logins(&self) -> &LoginDao {
        &self.logins
    }

    /// Row count of every table, in schema order.
    pub fn table_counts(&self) -> DbResult<Vec<(&'static str, i64)>> {
        let mut adapter = lock(&self.adapter)?;
        schema::TABLES
            .iter()
            .map(|table| -> DbResult<(&'static str, i64)> {
                let sql = format!("SELECT COUNT(*) AS n FROM {}", table);
                let rows = adapter.execute_query(&sql, &[])?;
                Ok((*table, scalar_integer(&rows, "n")?))
            })
            .collect()
    }

    /// Drop the DAOs and disconnect.
    ///
    /// Fails with `OPERATION_FAILED` while a transaction is still open, in
    /// which case the connection is left open.
    pub fn close(self) -> DbResult<()> {
        let adapter = SharedAdapter::clone(&self.adapter);
        drop(self);
        let mut guard = lock(&adapter)?;
        guard.disconnect()?;
        info!("Records database closed");
        Ok(())
    }
}

fn lock(adapter: &SharedAdapter) -> DbResult<MutexGuard<'_, Adapter>> {
    adapter
        .lock()
        .map_err(|_| DbError::data_access("adapter lock poisoned by a panicked caller", None))
}

/// Fallible construction from an adapter the caller already connected.
#[derive(Debug, Default)]
pub struct DataContextBuilder {
    adapter: Option<SharedAdapter>,
}

impl DataContextBuilder {
    pub fn adapter(mut self, adapter: SharedAdapter) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Fails with `OPERATION_FAILED` if no adapter was given or it is not connected.
    pub fn build(self) -> DbResult<DataContext> {
        let adapter = self
            .adapter
            .ok_or_else(|| DbError::operation_failed("no adapter supplied to the data context"))?;
        if !lock(&adapter)?.is_connected() {
            return Err(DbError::operation_failed(
                "adapter must be connected before building the data context",
            ));
        }

        Ok(DataContext {
            faculties: Dao::new(Arc::clone(&adapter), FacultyParser),
            courses: Dao::new(Arc::clone(&adapter), CourseParser),
            enrollments: Dao::new(Arc::clone(&adapter), EnrollmentParser),
            course_results: Dao::new(Arc::clone(&adapter), CourseResultParser),
            students: Dao::new(Arc::clone(&adapter), StudentParser),
            teachers: Dao::new(Arc::clone(&adapter), TeacherParser),
            fee_records: Dao::new(Arc::clone(&adapter), FeeRecordParser),
            salary_records: Dao::new(Arc::clone(&adapter), SalaryRecordParser),
            logins: Dao::new(Arc::clone(&adapter), LoginParser),
            adapter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_builder_requires_adapter() {
        let err = DataContext::builder().build().unwrap_err();
        assert_eq!(err.code(), ErrorCode::OperationFailed);
    }

    #[test]
    fn test_builder_rejects_disconnected_adapter() {
        let adapter = Arc::new(Mutex::new(Adapter::new()));
        let err = DataContext::builder().adapter(adapter).build().unwrap_err();
        assert_eq!(err.code(), ErrorCode::OperationFailed);
    }

    #[test]
    fn test_open_creates_empty_tables() {
        let context = DataContext::open(DatabaseTarget::memory()).unwrap();
        let counts = context.table_counts().unwrap();
        assert_eq!(counts.len(), schema::TABLES.len());
        assert!(counts.iter().all(|(_, n)| *n == 0));
        context.close().unwrap();
    }
}
