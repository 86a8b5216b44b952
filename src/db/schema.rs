//! Table definitions for the records database.
//!
//! Every statement is idempotent (`IF NOT EXISTS`) and applied in order by
//! [`Adapter::ensure_schema`](crate::db::Adapter::ensure_schema). Dependent
//! rows are removed by `ON DELETE CASCADE`. Faculty references keep the
//! default `NO ACTION`, so a faculty cannot be deleted while anything still
//! references it and the refusal surfaces as a foreign-key violation.

/// Table names in creation order.
pub const TABLES: &[&str] = &[
    "Users",
    "Faculties",
    "Students",
    "Teachers",
    "Courses",
    "Enrollments",
    "CourseResults",
    "FeeRecords",
    "SalaryRecords",
    "Logins",
];

pub const STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS Users (
        id TEXT PRIMARY KEY NOT NULL,
        firstName TEXT NOT NULL,
        lastName TEXT NOT NULL,
        birthDay INTEGER NOT NULL CHECK (birthDay BETWEEN 1 AND 31),
        birthMonth INTEGER NOT NULL CHECK (birthMonth BETWEEN 1 AND 12),
        birthYear INTEGER NOT NULL,
        address TEXT,
        citizenId TEXT NOT NULL UNIQUE,
        email TEXT,
        phoneNumber TEXT,
        role TEXT NOT NULL CHECK (role IN ('STUDENT', 'TEACHER', 'ADMIN')),
        status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'INACTIVE'))
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Faculties (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL UNIQUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Students (
        userId TEXT PRIMARY KEY NOT NULL REFERENCES Users(id) ON DELETE CASCADE,
        facultyId TEXT NOT NULL REFERENCES Faculties(id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Teachers (
        userId TEXT PRIMARY KEY NOT NULL REFERENCES Users(id) ON DELETE CASCADE,
        facultyId TEXT NOT NULL REFERENCES Faculties(id),
        qualification TEXT,
        specializationSubjects TEXT,
        designation TEXT,
        experienceYears INTEGER NOT NULL DEFAULT 0 CHECK (experienceYears >= 0)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Courses (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        credits INTEGER NOT NULL CHECK (credits > 0),
        facultyId TEXT NOT NULL REFERENCES Faculties(id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Enrollments (
        studentId TEXT NOT NULL REFERENCES Students(userId) ON DELETE CASCADE,
        courseId TEXT NOT NULL REFERENCES Courses(id) ON DELETE CASCADE,
        enrollmentDate TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (studentId, courseId)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS CourseResults (
        studentId TEXT NOT NULL REFERENCES Students(userId) ON DELETE CASCADE,
        courseId TEXT NOT NULL REFERENCES Courses(id) ON DELETE CASCADE,
        marks INTEGER NOT NULL DEFAULT -1 CHECK (marks BETWEEN -1 AND 100),
        PRIMARY KEY (studentId, courseId)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS FeeRecords (
        studentId TEXT PRIMARY KEY NOT NULL REFERENCES Students(userId) ON DELETE CASCADE,
        totalFee REAL NOT NULL CHECK (totalFee >= 0),
        paidFee REAL NOT NULL DEFAULT 0 CHECK (paidFee >= 0)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS SalaryRecords (
        teacherId TEXT PRIMARY KEY NOT NULL REFERENCES Teachers(userId) ON DELETE CASCADE,
        basicMonthlyPay REAL NOT NULL CHECK (basicMonthlyPay >= 0)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Logins (
        userId TEXT PRIMARY KEY NOT NULL REFERENCES Users(id) ON DELETE CASCADE,
        passwordHash TEXT NOT NULL,
        salt TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_students_faculty ON Students(facultyId)",
    "CREATE INDEX IF NOT EXISTS idx_teachers_faculty ON Teachers(facultyId)",
    "CREATE INDEX IF NOT EXISTS idx_courses_faculty ON Courses(facultyId)",
    "CREATE INDEX IF NOT EXISTS idx_enrollments_course ON Enrollments(courseId)",
    "CREATE INDEX IF NOT EXISTS idx_results_course ON CourseResults(courseId)",
];
