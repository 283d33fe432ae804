//! # School Admin Backend
//!
//! Contains all non-UI logic for the school administration application.
//!
//! This crate serves as the data core that brings together:
//! - **Domain**: Business logic and rules for student, teacher, attendance,
//!   payment, and class management
//! - **Storage**: Data persistence mechanisms (record store, file tiers)
//!
//! The backend is designed to be UI-agnostic, meaning it can back a desktop
//! shell, a web frontend, or a CLI without modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (desktop shell / web frontend)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (Record store, persistence tiers)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Enforce the record invariants (sequential IDs, parent de-duplication,
//!   attendance upserts, payment uniqueness, the grade deletion guard)
//! - Coordinate between domain logic and data persistence

pub mod domain;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::domain::{
    AttendanceService, GradeService, ParentService, PaymentService, SecurityService,
    StudentService, TeacherService,
};
use crate::storage::json::JsonConnection;
use crate::storage::RecordStore;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
    pub parent_service: ParentService,
    pub teacher_service: TeacherService,
    pub attendance_service: AttendanceService,
    pub payment_service: PaymentService,
    pub grade_service: GradeService,
    pub security_service: SecurityService,
}

/// Initialize the backend with all required services, storing data in the
/// default data directory.
pub async fn initialize_backend() -> Result<AppState> {
    let connection = JsonConnection::new_default()?;
    initialize_backend_with_connection(connection).await
}

/// Initialize the backend against a specific data directory connection.
pub async fn initialize_backend_with_connection(connection: JsonConnection) -> Result<AppState> {
    info!(
        "Setting up record store in {}",
        connection.base_directory().display()
    );
    let store = Arc::new(RecordStore::new(connection.clone()));

    info!("Setting up domain services");
    let app_state = AppState {
        student_service: StudentService::new(store.clone()),
        parent_service: ParentService::new(store.clone()),
        teacher_service: TeacherService::new(store.clone()),
        attendance_service: AttendanceService::new(store.clone()),
        payment_service: PaymentService::new(store.clone()),
        grade_service: GradeService::new(store),
        security_service: SecurityService::new(connection),
    };

    Ok(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::{sample_student_form, TestEnvironment};

    #[tokio::test]
    async fn test_initialize_backend_wires_services() {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let state = initialize_backend_with_connection(env.connection.clone())
            .await
            .expect("Failed to initialize backend");

        // Services share one record store: a student created through the
        // student service is visible to the parent link and stats queries.
        let student = state
            .student_service
            .create_student(sample_student_form("Sara Tesfaye", "0911111111"))
            .await
            .unwrap();
        assert_eq!(student.id, "ST001");
        assert_eq!(state.parent_service.list_parents().await.unwrap().len(), 1);

        let stats = state.attendance_service.weekly_stats().await.unwrap();
        assert_eq!(stats.len(), 5);

        assert!(!state.security_service.is_device_trusted().await.unwrap());
    }
}
