//! DAOs for student fee records and teacher salary records.

use super::{FeeRecordDao, Key, SalaryRecordDao};
use crate::db::types::Value;
use crate::error::DbResult;
use crate::models::{FeeRecord, SalaryRecord};

const FEE_INSERT: &str = "INSERT INTO FeeRecords (studentId, totalFee, paidFee) VALUES (?, ?, ?)";
const FEE_UPDATE: &str = "UPDATE FeeRecords SET totalFee = ?, paidFee = ? WHERE studentId = ?";
const FEE_DELETE: &str = "DELETE FROM FeeRecords WHERE studentId = ?";
const FEE_SELECT: &str = "SELECT studentId, totalFee, paidFee FROM FeeRecords";

impl FeeRecordDao {
    /// One record per student; the student must exist.
    pub fn add(&self, record: &FeeRecord) -> DbResult<()> {
        self.insert(FEE_INSERT, record)
    }

    pub fn update(&self, record: &FeeRecord) -> DbResult<()> {
        self.update_existing(FEE_UPDATE, record, Key(&[record.student_id.as_str()]))
    }

    pub fn remove(&self, student_id: &str) -> DbResult<()> {
        self.write_one(FEE_DELETE, &[Value::from(student_id)], Key(&[student_id]))
    }

    pub fn get_by_id(&self, student_id: &str) -> DbResult<FeeRecord> {
        self.fetch_one(
            &format!("{FEE_SELECT} WHERE studentId = ?"),
            &[Value::from(student_id)],
            Key(&[student_id]),
        )
    }

    pub fn get_all(&self) -> DbResult<Vec<FeeRecord>> {
        self.fetch_all(&format!("{FEE_SELECT} ORDER BY studentId"), &[])
    }

    /// Records with an unpaid balance.
    pub fn get_outstanding(&self) -> DbResult<Vec<FeeRecord>> {
        self.fetch_all(
            &format!("{FEE_SELECT} WHERE paidFee < totalFee ORDER BY studentId"),
            &[],
        )
    }

    pub fn exists(&self, student_id: &str) -> DbResult<bool> {
        self.probe(
            "SELECT 1 FROM FeeRecords WHERE studentId = ? LIMIT 1",
            &[Value::from(student_id)],
        )
    }
}

const SALARY_INSERT: &str = "INSERT INTO SalaryRecords (teacherId, basicMonthlyPay) VALUES (?, ?)";
const SALARY_UPDATE: &str = "UPDATE SalaryRecords SET basicMonthlyPay = ? WHERE teacherId = ?";
const SALARY_DELETE: &str = "DELETE FROM SalaryRecords WHERE teacherId = ?";
const SALARY_SELECT: &str = "SELECT teacherId, basicMonthlyPay FROM SalaryRecords";

impl SalaryRecordDao {
    pub fn add(&self, record: &SalaryRecord) -> DbResult<()> {
        self.insert(SALARY_INSERT, record)
    }

    pub fn update(&self, record: &SalaryRecord) -> DbResult<()> {
        self.update_existing(SALARY_UPDATE, record, Key(&[record.teacher_id.as_str()]))
    }

    pub fn remove(&self, teacher_id: &str) -> DbResult<()> {
        self.write_one(SALARY_DELETE, &[Value::from(teacher_id)], Key(&[teacher_id]))
    }

    pub fn get_by_id(&self, teacher_id: &str) -> DbResult<SalaryRecord> {
        self.fetch_one(
            &format!("{SALARY_SELECT} WHERE teacherId = ?"),
            &[Value::from(teacher_id)],
            Key(&[teacher_id]),
        )
    }

    pub fn get_all(&self) -> DbResult<Vec<SalaryRecord>> {
        self.fetch_all(&format!("{SALARY_SELECT} ORDER BY teacherId"), &[])
    }

    pub fn exists(&self, teacher_id: &str) -> DbResult<bool> {
        self.probe(
            "SELECT 1 FROM SalaryRecords WHERE teacherId = ? LIMIT 1",
            &[Value::from(teacher_id)],
        )
    }
}
