//! # Domain Module
//!
//! Contains all business logic for the school administration application.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how school records are modeled and managed. It operates
//! independently of any specific UI framework, reading and replacing whole
//! collections through the record store.
//!
//! ## Module Organization
//!
//! - **student_service**: Student CRUD, sequential ID assignment, parent linking
//! - **parent_service**: Parent listing and phone-keyed de-duplication
//! - **teacher_service**: Teacher CRUD with sequential ID assignment
//! - **attendance_service**: Per-day attendance upserts and attendance stats
//! - **payment_service**: Payment recording, uniqueness, revenue stats
//! - **grade_service**: Class management with a guarded delete
//! - **security_service**: Device trust, developer PIN, admin credentials
//! - **ids** / **dates**: Shared ID-generation and date helpers
//!
//! ## Business Rules
//!
//! - Student and teacher IDs are sequential, derived from the highest
//!   numeric suffix currently in the collection
//! - A parent is uniquely identified by phone number
//! - At most one attendance record exists per (subject, date); re-marking
//!   replaces the record in place
//! - At most one payment exists per (student, month, year)
//! - A grade cannot be deleted while any student references its name

pub mod attendance_service;
pub mod dates;
pub mod grade_service;
pub mod ids;
pub mod models;
pub mod parent_service;
pub mod payment_service;
pub mod security_service;
pub mod student_service;
pub mod teacher_service;

pub use attendance_service::*;
pub use grade_service::*;
pub use parent_service::*;
pub use payment_service::*;
pub use security_service::*;
pub use student_service::*;
pub use teacher_service::*;
