//! Money owed by students and paid to teachers.

use super::{Validate, ValidationResult, check_id, check_non_negative};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub student_id: String,
    pub total_fee: f64,
    pub paid_fee: f64,
}

impl FeeRecord {
    pub fn new(student_id: impl Into<String>, total_fee: f64, paid_fee: f64) -> Self {
        Self {
            student_id: student_id.into(),
            total_fee,
            paid_fee,
        }
    }

    pub fn outstanding(&self) -> f64 {
        self.total_fee - self.paid_fee
    }

    pub fn is_settled(&self) -> bool {
        self.paid_fee >= self.total_fee
    }
}

impl Validate for FeeRecord {
    fn validate_basic(&self) -> ValidationResult {
        check_id("student id", &self.student_id)?;
        check_non_negative("total fee", self.total_fee)?;
        check_non_negative("paid fee", self.paid_fee)?;
        if self.paid_fee > self.total_fee {
            return Err(format!(
                "paid fee {} exceeds total fee {}",
                self.paid_fee, self.total_fee
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub teacher_id: String,
    pub basic_monthly_pay: f64,
}

impl SalaryRecord {
    pub fn new(teacher_id: impl Into<String>, basic_monthly_pay: f64) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            basic_monthly_pay,
        }
    }
}

impl Validate for SalaryRecord {
    fn validate_basic(&self) -> ValidationResult {
        check_id("teacher id", &self.teacher_id)?;
        check_non_negative("basic monthly pay", self.basic_monthly_pay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rules() {
        let fee = FeeRecord::new("S1", 1000.0, 250.0);
        assert!(fee.validate_basic().is_ok());
        assert_eq!(fee.outstanding(), 750.0);
        assert!(!fee.is_settled());
        assert!(FeeRecord::new("S1", 100.0, 150.0).validate_basic().is_err());
        assert!(FeeRecord::new("S1", -1.0, 0.0).validate_basic().is_err());
    }

    #[test]
    fn test_salary_rules() {
        assert!(SalaryRecord::new("T1", 1500.0).validate_basic().is_ok());
        assert!(SalaryRecord::new("T1", -1.0).validate_basic().is_err());
    }
}
