use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};

use crate::domain::models::ValidationError;
use crate::domain::{dates, ids};
use crate::storage::{Collection, RecordStore};
use shared::{DeleteGradeResult, Grade, GradeFormData, Student};

/// Service for managing grades (classes)
#[derive(Clone)]
pub struct GradeService {
    store: Arc<RecordStore>,
}

impl GradeService {
    /// Create a new GradeService
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// List all grades in creation order
    pub async fn list_grades(&self) -> Result<Vec<Grade>> {
        self.store.read(Collection::Grades).await
    }

    /// Create a new grade
    pub async fn create_grade(&self, data: GradeFormData) -> Result<Grade> {
        if data.name.trim().is_empty() {
            return Err(ValidationError::EmptyGradeName.into());
        }

        let _guard = self.store.mutation_guard(Collection::Grades).await;
        let mut grades: Vec<Grade> = self.store.read(Collection::Grades).await?;

        let grade = Grade {
            id: ids::grade_id(Utc::now().timestamp_millis()),
            name: data.name,
            created_at: dates::now_iso(),
        };
        grades.push(grade.clone());

        self.store.write(Collection::Grades, &grades).await?;

        info!("Created grade {} ({})", grade.id, grade.name);
        Ok(grade)
    }

    /// Delete a grade.
    ///
    /// Refuses while any student's grade field equals the grade's name.
    pub async fn delete_grade(&self, grade_id: &str) -> Result<DeleteGradeResult> {
        let _guard = self.store.mutation_guard(Collection::Grades).await;
        let grades: Vec<Grade> = self.store.read(Collection::Grades).await?;

        let Some(grade) = grades.iter().find(|g| g.id == grade_id) else {
            warn!("Grade not found for delete: {}", grade_id);
            return Ok(DeleteGradeResult {
                success: false,
                message: Some("Grade not found.".to_string()),
            });
        };

        let students: Vec<Student> = self.store.read(Collection::Students).await?;
        let in_use = students.iter().any(|s| s.grade == grade.name);
        if in_use {
            warn!("Refusing to delete grade {} while students reference it", grade_id);
            return Ok(DeleteGradeResult {
                success: false,
                message: Some("Cannot delete grade as it is assigned to students.".to_string()),
            });
        }

        let remaining: Vec<Grade> = grades.into_iter().filter(|g| g.id != grade_id).collect();
        self.store.write(Collection::Grades, &remaining).await?;

        info!("Deleted grade {}", grade_id);
        Ok(DeleteGradeResult {
            success: true,
            message: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::{sample_student_form, TestEnvironment};
    use crate::domain::student_service::StudentService;

    fn setup_test() -> (GradeService, TestEnvironment) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let service = GradeService::new(env.record_store());
        (service, env)
    }

    #[tokio::test]
    async fn test_create_grade_appends() {
        let (service, _env) = setup_test();

        let first = service
            .create_grade(GradeFormData {
                name: "Grade 1".to_string(),
            })
            .await
            .unwrap();
        service
            .create_grade(GradeFormData {
                name: "Grade 2".to_string(),
            })
            .await
            .unwrap();

        assert!(first.id.starts_with("G-"));
        let grades = service.list_grades().await.unwrap();
        assert_eq!(grades.len(), 2);
        assert_eq!(grades[0].name, "Grade 1");
        assert_eq!(grades[1].name, "Grade 2");
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let (service, _env) = setup_test();

        let result = service
            .create_grade(GradeFormData {
                name: "  ".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown_grade() {
        let (service, _env) = setup_test();

        let result = service.delete_grade("G-999").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message.unwrap(), "Grade not found.");
    }

    #[tokio::test]
    async fn test_delete_is_guarded_by_student_references() {
        let (service, env) = setup_test();

        let grade = service
            .create_grade(GradeFormData {
                name: "Grade 1".to_string(),
            })
            .await
            .unwrap();

        // Enroll a student in the grade (the sample form uses "Grade 1").
        let student_service = StudentService::new(env.record_store());
        let student = student_service
            .create_student(sample_student_form("Sara", "0911111111"))
            .await
            .unwrap();

        let blocked = service.delete_grade(&grade.id).await.unwrap();
        assert!(!blocked.success);
        assert!(blocked.message.unwrap().contains("assigned to students"));
        assert_eq!(service.list_grades().await.unwrap().len(), 1);

        // Reassign the student, then deletion goes through.
        let mut form = sample_student_form("Sara", "0911111111");
        form.grade = "Grade 2".to_string();
        student_service
            .update_student(&student.id, form)
            .await
            .unwrap();

        let allowed = service.delete_grade(&grade.id).await.unwrap();
        assert!(allowed.success);
        assert!(service.list_grades().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_after_student_removed() {
        let (service, env) = setup_test();

        let grade = service
            .create_grade(GradeFormData {
                name: "Grade 1".to_string(),
            })
            .await
            .unwrap();

        let student_service = StudentService::new(env.record_store());
        let student = student_service
            .create_student(sample_student_form("Sara", "0911111111"))
            .await
            .unwrap();

        assert!(!service.delete_grade(&grade.id).await.unwrap().success);

        student_service.delete_student(&student.id).await.unwrap();
        assert!(service.delete_grade(&grade.id).await.unwrap().success);
    }
}
