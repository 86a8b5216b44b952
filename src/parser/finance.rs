//! Parsers for fee and salary records.

use super::{EntityParser, real, text};
use crate::db::types::{Params, Row, Value};
use crate::error::DbResult;
use crate::models::{FeeRecord, SalaryRecord};

/// Insert: `studentId, totalFee, paidFee`. Update: `totalFee, paidFee, studentId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeRecordParser;

impl EntityParser for FeeRecordParser {
    type Entity = FeeRecord;
    const ENTITY: &'static str = "fee record";

    fn parse(&self, row: &Row) -> DbResult<FeeRecord> {
        Ok(FeeRecord {
            student_id: text(row, "studentId")?,
            total_fee: real(row, "totalFee")?,
            paid_fee: real(row, "paidFee")?,
        })
    }

    fn serialize(&self, fee: &FeeRecord) -> DbResult<Row> {
        Ok(Row::new()
            .with("studentId", fee.student_id.as_str())
            .with("totalFee", fee.total_fee)
            .with("paidFee", fee.paid_fee))
    }

    fn to_insert_params(&self, fee: &FeeRecord) -> DbResult<Params> {
        Ok(vec![
            Value::from(fee.student_id.as_str()),
            Value::from(fee.total_fee),
            Value::from(fee.paid_fee),
        ])
    }

    fn to_update_params(&self, fee: &FeeRecord) -> DbResult<Params> {
        Ok(vec![
            Value::from(fee.total_fee),
            Value::from(fee.paid_fee),
            Value::from(fee.student_id.as_str()),
        ])
    }
}

/// Insert: `teacherId, basicMonthlyPay`. Update: `basicMonthlyPay, teacherId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryRecordParser;

impl EntityParser for SalaryRecordParser {
    type Entity = SalaryRecord;
    const ENTITY: &'static str = "salary record";

    fn parse(&self, row: &Row) -> DbResult<SalaryRecord> {
        Ok(SalaryRecord {
            teacher_id: text(row, "teacherId")?,
            basic_monthly_pay: real(row, "basicMonthlyPay")?,
        })
    }

    fn serialize(&self, salary: &SalaryRecord) -> DbResult<Row> {
        Ok(Row::new()
            .with("teacherId", salary.teacher_id.as_str())
            .with("basicMonthlyPay", salary.basic_monthly_pay))
    }

    fn to_insert_params(&self, salary: &SalaryRecord) -> DbResult<Params> {
        Ok(vec![
            Value::from(salary.teacher_id.as_str()),
            Value::from(salary.basic_monthly_pay),
        ])
    }

    fn to_update_params(&self, salary: &SalaryRecord) -> DbResult<Params> {
        Ok(vec![
            Value::from(salary.basic_monthly_pay),
            Value::from(salary.teacher_id.as_str()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_round_trip() {
        let fee = FeeRecord::new("S001", 1200.5, 200.0);
        let row = FeeRecordParser.serialize(&fee).unwrap();
        assert_eq!(FeeRecordParser.parse(&row).unwrap(), fee);
    }

    #[test]
    fn test_salary_parses_integer_storage() {
        let row = Row::new().with("teacherId", "T001").with("basicMonthlyPay", 3000_i64);
        let salary = SalaryRecordParser.parse(&row).unwrap();
        assert_eq!(salary, SalaryRecord::new("T001", 3000.0));
        assert_eq!(
            SalaryRecordParser.to_update_params(&salary).unwrap(),
            vec![Value::Real(3000.0), Value::from("T001")]
        );
    }
}
