/// Test utilities module for automatic cleanup and consistent test
/// infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is
/// removed even if tests panic or fail.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;
use crate::storage::RecordStore;
use shared::{StudentFormData, TeacherFormData};

/// RAII test environment that automatically cleans up on drop
///
/// The temporary data directory lives as long as the environment; cleanup
/// happens automatically when the `TestEnvironment` goes out of scope.
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// The data directory connection for the test
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// Get the base directory path for this test environment
    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Build a record store over this environment's data directory
    pub fn record_store(&self) -> Arc<RecordStore> {
        Arc::new(RecordStore::new(self.connection.clone()))
    }
}

/// Student form with sensible defaults for tests
pub fn sample_student_form(full_name: &str, parent_phone: &str) -> StudentFormData {
    StudentFormData {
        full_name: full_name.to_string(),
        gender: "Female".to_string(),
        dob: "2015-06-15".to_string(),
        grade: "Grade 1".to_string(),
        parent_name: format!("Parent of {}", full_name),
        parent_phone: parent_phone.to_string(),
    }
}

/// Teacher form with sensible defaults for tests
pub fn sample_teacher_form(full_name: &str) -> TeacherFormData {
    TeacherFormData {
        full_name: full_name.to_string(),
        phone: "0911000000".to_string(),
        gender: "Male".to_string(),
        assigned_grades: vec!["Grade 1".to_string()],
    }
}
