//! Integration tests for the two-table student and teacher writes.

mod common;

use common::{count, seeded, student, teacher};
use records_store::ErrorCode;
use records_store::models::{
    CourseResult, Enrollment, FeeRecord, Login, SalaryRecord, Student, UserStatus,
};

#[test]
fn test_student_round_trip() {
    let context = seeded();
    let original = student("S001", "079203000001");
    context.students().add(&original).unwrap();

    assert_eq!(context.students().get_by_id("S001").unwrap(), original);
    assert!(context.students().exists("S001").unwrap());
    assert_eq!(count(&context, "Users"), 1);
    assert_eq!(count(&context, "Students"), 1);
}

#[test]
fn test_teacher_round_trip() {
    let context = seeded();
    let original = teacher("T001", "079180000001");
    context.teachers().add(&original).unwrap();

    let stored = context.teachers().get_by_id("T001").unwrap();
    assert_eq!(stored, original);
    assert_eq!(stored.specialization_subjects, ["Databases", "Operating Systems"]);
    assert!(!context.students().exists("T001").unwrap());
}

#[test]
fn test_failed_role_insert_leaves_no_user_row() {
    let context = seeded();
    let orphan = Student::new(common::profile("S001", "079203000001"), "NOPE");

    let err = context.students().add(&orphan).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(count(&context, "Users"), 0);
    assert_eq!(count(&context, "Students"), 0);
    assert_eq!(
        context.students().get_by_id("S001").unwrap_err().code(),
        ErrorCode::NotFound
    );

    let adapter = context.adapter().lock().unwrap();
    assert!(!adapter.is_in_transaction());
}

#[test]
fn test_duplicate_citizen_id_rejected_atomically() {
    let context = seeded();
    context.students().add(&student("S001", "079203000001")).unwrap();

    let err = context
        .teachers()
        .add(&teacher("T001", "079203000001"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyExists);
    assert_eq!(count(&context, "Users"), 1);
    assert_eq!(count(&context, "Teachers"), 0);
}

#[test]
fn test_invalid_profile_is_rejected_before_insert() {
    let context = seeded();
    let mut bad = student("S001", "079203000001");
    bad.profile.email = "not-an-email".to_string();

    let err = context.students().add(&bad).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert!(err.message().starts_with("student:"));
    assert_eq!(count(&context, "Users"), 0);
}

#[test]
fn test_student_update_touches_both_tables() {
    let context = seeded();
    context
        .faculties()
        .add(&records_store::models::Faculty::new("BIO", "Biology"))
        .unwrap();
    context.students().add(&student("S001", "079203000001")).unwrap();

    let mut changed = student("S001", "079203000001");
    changed.profile.last_name = "Tran".to_string();
    changed.profile.status = UserStatus::Inactive;
    changed.faculty_id = "BIO".to_string();
    context.students().update(&changed).unwrap();

    let stored = context.students().get_by_id("S001").unwrap();
    assert_eq!(stored, changed);
    assert_eq!(context.students().get_by_faculty("BIO").unwrap().len(), 1);
    assert!(context.students().get_by_faculty("IT").unwrap().is_empty());
}

#[test]
fn test_failed_role_update_rolls_back_user_changes() {
    let context = seeded();
    context.students().add(&student("S001", "079203000001")).unwrap();

    let mut changed = student("S001", "079203000001");
    changed.profile.first_name = "Binh".to_string();
    changed.faculty_id = "NOPE".to_string();
    let err = context.students().update(&changed).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    let stored = context.students().get_by_id("S001").unwrap();
    assert_eq!(stored.profile.first_name, "An");
    assert_eq!(stored.faculty_id, "IT");
}

#[test]
fn test_update_of_unknown_or_wrong_role_is_not_found() {
    let context = seeded();
    context.teachers().add(&teacher("T001", "079180000001")).unwrap();

    let err = context
        .students()
        .update(&student("S404", "079203000404"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    // A teacher id is not a student.
    let err = context
        .students()
        .update(&student("T001", "079180000001"))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    let err = context.students().remove("T001").unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(context.teachers().exists("T001").unwrap());
}

#[test]
fn test_get_all_orders_by_id() {
    let context = seeded();
    context.students().add(&student("S002", "079203000002")).unwrap();
    context.students().add(&student("S001", "079203000001")).unwrap();
    context.teachers().add(&teacher("T001", "079180000001")).unwrap();

    let ids: Vec<String> = context
        .students()
        .get_all()
        .unwrap()
        .into_iter()
        .map(|s| s.profile.id)
        .collect();
    assert_eq!(ids, ["S001", "S002"]);
    assert_eq!(context.teachers().get_all().unwrap().len(), 1);
    assert_eq!(context.teachers().get_by_faculty("IT").unwrap().len(), 1);
}

#[test]
fn test_removing_student_cascades() {
    let context = seeded();
    context.students().add(&student("S001", "079203000001")).unwrap();
    context.enrollments().add(&Enrollment::new("S001", "C01")).unwrap();
    context
        .course_results()
        .add(&CourseResult::new("S001", "C01", 75))
        .unwrap();
    context
        .fee_records()
        .add(&FeeRecord::new("S001", 1200.0, 300.0))
        .unwrap();
    context
        .logins()
        .add(&Login::new("S001", "argon2id$hash", "pepper"))
        .unwrap();

    context.students().remove("S001").unwrap();

    for table in ["Users", "Students", "Enrollments", "CourseResults", "FeeRecords", "Logins"] {
        assert_eq!(count(&context, table), 0, "{table}");
    }
    assert_eq!(count(&context, "Courses"), 1);
}

#[test]
fn test_removing_teacher_cascades_salary() {
    let context = seeded();
    context.teachers().add(&teacher("T001", "079180000001")).unwrap();
    context
        .salary_records()
        .add(&SalaryRecord::new("T001", 2500.0))
        .unwrap();

    context.teachers().remove("T001").unwrap();
    assert_eq!(count(&context, "SalaryRecords"), 0);
    assert_eq!(count(&context, "Teachers"), 0);
}
