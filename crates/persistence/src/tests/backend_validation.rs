// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly
//! across different database backends (`SQLite`, MariaDB/MySQL).
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `CREWCALL_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! ## What These Tests Validate
//!
//! These tests focus on **infrastructure and schema compatibility**, not
//! business logic: schema creation, constraint enforcement (FK, UNIQUE),
//! and the guarded-update semantics the dispatch and invite paths rely
//! on. Business rules are validated by the standard suite on `SQLite`.

use diesel::MysqlConnection;
use diesel::prelude::*;
use std::env;

use crate::backend::mysql;

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if `CREWCALL_TEST_BACKEND` is not set to `mariadb`.
fn verify_mariadb_test_environment() {
    let backend = env::var("CREWCALL_TEST_BACKEND").expect(
        "CREWCALL_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "CREWCALL_TEST_BACKEND must be 'mariadb'");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_connection() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = MysqlConnection::establish(&url);
    assert!(
        result.is_ok(),
        "Failed to connect to MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = mysql::initialize_database(&url);
    assert!(
        result.is_ok(),
        "Failed to initialize MariaDB and run migrations: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_foreign_key_enforcement() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut conn = mysql::initialize_database(&url).expect("Failed to initialize MariaDB database");

    let result = mysql::verify_foreign_key_enforcement(&mut conn);
    assert!(
        result.is_ok(),
        "Foreign key enforcement verification failed: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_invite_token_unique_constraint() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut conn = mysql::initialize_database(&url).expect("Failed to initialize MariaDB database");

    diesel::sql_query(
        "INSERT INTO profiles (id, email, name, role, created_at)
         VALUES ('bv-admin', 'bv@example.com', 'BV Admin', 'admin', '2026-03-01T08:00:00Z')",
    )
    .execute(&mut conn)
    .expect("Failed to insert test profile");

    diesel::sql_query(
        "INSERT INTO staff_invites (email, invited_by, staff_roles, city, token, accepted, created_at, expires_at)
         VALUES ('a@example.com', 'bv-admin', '[\"server\"]', 'Oakland', 'bv-token', 0,
                 '2026-03-01T08:00:00Z', '2026-03-08T08:00:00Z')",
    )
    .execute(&mut conn)
    .expect("Failed to insert test invite");

    let duplicate_result = diesel::sql_query(
        "INSERT INTO staff_invites (email, invited_by, staff_roles, city, token, accepted, created_at, expires_at)
         VALUES ('b@example.com', 'bv-admin', '[\"kitchen\"]', 'Oakland', 'bv-token', 0,
                 '2026-03-01T08:00:00Z', '2026-03-08T08:00:00Z')",
    )
    .execute(&mut conn);

    assert!(
        duplicate_result.is_err(),
        "Duplicate token should fail due to UNIQUE constraint"
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_dispatch_foreign_keys() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut conn = mysql::initialize_database(&url).expect("Failed to initialize MariaDB database");

    // A dispatch row pointing at a missing event must be rejected.
    let result = diesel::sql_query(
        "INSERT INTO dispatch_requests (event_id, staff_id, staff_role, status, sent_at)
         VALUES (99999, 'nobody', 'server', 'pending', '2026-03-02T09:00:00Z')",
    )
    .execute(&mut conn);

    assert!(
        result.is_err(),
        "Inserting dispatch with non-existent event_id should fail due to foreign key constraint"
    );
}
