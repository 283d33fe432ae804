use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use crate::domain::models::ValidationError;
use crate::domain::parent_service::ParentService;
use crate::domain::{dates, ids};
use crate::storage::{Collection, RecordStore};
use shared::{Student, StudentFormData};

/// Service for managing students in the school administration system
#[derive(Clone)]
pub struct StudentService {
    store: Arc<RecordStore>,
    parent_service: ParentService,
}

impl StudentService {
    /// Create a new StudentService
    pub fn new(store: Arc<RecordStore>) -> Self {
        let parent_service = ParentService::new(store.clone());
        Self {
            store,
            parent_service,
        }
    }

    /// List all students, most recently created first
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.store.read(Collection::Students).await
    }

    /// Get a student by ID
    pub async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        let students = self.list_students().await?;
        Ok(students.into_iter().find(|s| s.id == student_id))
    }

    /// Create a new student.
    ///
    /// Assigns the next sequential ID, links the parent record as a side
    /// effect, and prepends the student to the collection.
    pub async fn create_student(&self, data: StudentFormData) -> Result<Student> {
        info!("Creating student: name={}", data.full_name);
        self.validate_form(&data)?;

        let _guard = self.store.mutation_guard(Collection::Students).await;
        let students: Vec<Student> = self.store.read(Collection::Students).await?;

        let next_number =
            ids::next_sequential_number(students.iter().map(|s| s.id.as_str()), "ST");
        let student_id = ids::format_student_id(next_number);

        // Auto-link the parent before the student itself is persisted.
        self.parent_service
            .link_parent(&student_id, &data.parent_name, &data.parent_phone)
            .await?;

        let student = Student {
            id: student_id,
            full_name: data.full_name,
            gender: data.gender,
            dob: data.dob,
            grade: data.grade,
            parent_name: data.parent_name,
            parent_phone: data.parent_phone,
            created_at: dates::now_iso(),
        };

        let mut updated = Vec::with_capacity(students.len() + 1);
        updated.push(student.clone());
        updated.extend(students);
        self.store.write(Collection::Students, &updated).await?;

        info!("Created student {} ({})", student.id, student.full_name);
        Ok(student)
    }

    /// Update an existing student.
    ///
    /// Returns `None` when no student matches the ID. The ID and creation
    /// timestamp are preserved; when the parent name or phone changed, the
    /// parent link is refreshed.
    pub async fn update_student(
        &self,
        student_id: &str,
        data: StudentFormData,
    ) -> Result<Option<Student>> {
        self.validate_form(&data)?;

        let _guard = self.store.mutation_guard(Collection::Students).await;
        let mut students: Vec<Student> = self.store.read(Collection::Students).await?;

        let Some(position) = students.iter().position(|s| s.id == student_id) else {
            warn!("Student not found for update: {}", student_id);
            return Ok(None);
        };

        let existing = &students[position];
        if existing.parent_phone != data.parent_phone || existing.parent_name != data.parent_name {
            self.parent_service
                .link_parent(student_id, &data.parent_name, &data.parent_phone)
                .await?;
        }

        let updated = Student {
            id: existing.id.clone(),
            full_name: data.full_name,
            gender: data.gender,
            dob: data.dob,
            grade: data.grade,
            parent_name: data.parent_name,
            parent_phone: data.parent_phone,
            created_at: existing.created_at.clone(),
        };
        students[position] = updated.clone();

        self.store.write(Collection::Students, &students).await?;

        info!("Updated student {}", student_id);
        Ok(Some(updated))
    }

    /// Delete a student by ID. Deleting an unknown ID is a no-op.
    pub async fn delete_student(&self, student_id: &str) -> Result<()> {
        let _guard = self.store.mutation_guard(Collection::Students).await;
        let students: Vec<Student> = self.store.read(Collection::Students).await?;

        let remaining: Vec<Student> = students
            .into_iter()
            .filter(|s| s.id != student_id)
            .collect();
        self.store.write(Collection::Students, &remaining).await?;

        info!("Deleted student {}", student_id);
        Ok(())
    }

    /// Numeric part of the next student ID, derived from the live collection
    pub async fn next_student_id_number(&self) -> Result<u32> {
        let students = self.list_students().await?;
        Ok(ids::next_sequential_number(
            students.iter().map(|s| s.id.as_str()),
            "ST",
        ))
    }

    /// Validate a student form
    fn validate_form(&self, data: &StudentFormData) -> Result<()> {
        if data.full_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if data.full_name.len() > 100 {
            return Err(ValidationError::NameTooLong.into());
        }
        if data.parent_phone.trim().is_empty() {
            return Err(ValidationError::EmptyPhone.into());
        }
        dates::validate_ymd(&data.dob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::{sample_student_form, TestEnvironment};

    fn setup_test() -> (StudentService, TestEnvironment) {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let service = StudentService::new(env.record_store());
        (service, env)
    }

    #[tokio::test]
    async fn test_create_student_assigns_first_id() {
        let (service, _env) = setup_test();

        let student = service
            .create_student(sample_student_form("Sara Tesfaye", "0911111111"))
            .await
            .unwrap();

        assert_eq!(student.id, "ST001");
        assert_eq!(student.full_name, "Sara Tesfaye");
        assert!(!student.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let (service, _env) = setup_test();

        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            let student = service
                .create_student(sample_student_form(name, &format!("091000000{}", i)))
                .await
                .unwrap();
            assert_eq!(student.id, ids::format_student_id(i as u32 + 1));
        }
        assert_eq!(service.next_student_id_number().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_next_id_skips_gaps() {
        let (service, env) = setup_test();

        // Seed a collection with a gap, as left behind by past deletions.
        let mut a = service
            .create_student(sample_student_form("A", "0910000001"))
            .await
            .unwrap();
        a.id = "ST005".to_string();
        env.record_store()
            .write(Collection::Students, &[a])
            .await
            .unwrap();

        assert_eq!(service.next_student_id_number().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_deleting_highest_id_makes_number_available_again() {
        let (service, _env) = setup_test();

        service
            .create_student(sample_student_form("A", "0910000001"))
            .await
            .unwrap();
        let second = service
            .create_student(sample_student_form("B", "0910000002"))
            .await
            .unwrap();
        assert_eq!(second.id, "ST002");

        service.delete_student(&second.id).await.unwrap();

        // The next ID derives from the remaining records.
        assert_eq!(service.next_student_id_number().await.unwrap(), 2);
        let replacement = service
            .create_student(sample_student_form("C", "0910000003"))
            .await
            .unwrap();
        assert_eq!(replacement.id, "ST002");
    }

    #[tokio::test]
    async fn test_new_students_are_prepended() {
        let (service, _env) = setup_test();

        service
            .create_student(sample_student_form("First", "0910000001"))
            .await
            .unwrap();
        service
            .create_student(sample_student_form("Second", "0910000002"))
            .await
            .unwrap();

        let students = service.list_students().await.unwrap();
        assert_eq!(students[0].full_name, "Second");
        assert_eq!(students[1].full_name, "First");
    }

    #[tokio::test]
    async fn test_create_links_parent() {
        let (service, env) = setup_test();

        let student = service
            .create_student(sample_student_form("Sara Tesfaye", "0911111111"))
            .await
            .unwrap();

        let parent_service = ParentService::new(env.record_store());
        let parents = parent_service.list_parents().await.unwrap();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].phone, "0911111111");
        assert_eq!(parents[0].student_ids, vec![student.id]);
    }

    #[tokio::test]
    async fn test_siblings_share_one_parent_record() {
        let (service, env) = setup_test();

        let mut first_form = sample_student_form("Sara Tesfaye", "0911111111");
        first_form.parent_name = "W/ro Almaz".to_string();
        let first = service.create_student(first_form).await.unwrap();

        let mut second_form = sample_student_form("Dawit Tesfaye", "0911111111");
        second_form.parent_name = "Almaz Bekele".to_string();
        let second = service.create_student(second_form).await.unwrap();

        let parent_service = ParentService::new(env.record_store());
        let parents = parent_service.list_parents().await.unwrap();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].student_ids, vec![first.id, second.id]);
        // The display name follows the most recently saved student.
        assert_eq!(parents[0].full_name, "Almaz Bekele");
    }

    #[tokio::test]
    async fn test_update_unknown_student_returns_none() {
        let (service, _env) = setup_test();

        let result = service
            .update_student("ST999", sample_student_form("Ghost", "0910000001"))
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(service.list_students().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_created_at() {
        let (service, _env) = setup_test();

        let created = service
            .create_student(sample_student_form("Sara Tesfaye", "0911111111"))
            .await
            .unwrap();

        let mut form = sample_student_form("Sara T.", "0911111111");
        form.grade = "Grade 2".to_string();
        let updated = service
            .update_student(&created.id, form)
            .await
            .unwrap()
            .expect("student should exist");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.full_name, "Sara T.");
        assert_eq!(updated.grade, "Grade 2");
    }

    #[tokio::test]
    async fn test_update_with_new_phone_relinks_parent() {
        let (service, env) = setup_test();

        let created = service
            .create_student(sample_student_form("Sara Tesfaye", "0911111111"))
            .await
            .unwrap();

        let mut form = sample_student_form("Sara Tesfaye", "0922222222");
        form.parent_name = "New Guardian".to_string();
        service.update_student(&created.id, form).await.unwrap();

        let parent_service = ParentService::new(env.record_store());
        let parents = parent_service.list_parents().await.unwrap();
        let new_parent = parents
            .iter()
            .find(|p| p.phone == "0922222222")
            .expect("new parent should be created");
        assert_eq!(new_parent.full_name, "New Guardian");
        assert_eq!(new_parent.student_ids, vec![created.id]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (service, _env) = setup_test();

        let student = service
            .create_student(sample_student_form("Sara Tesfaye", "0911111111"))
            .await
            .unwrap();

        service.delete_student(&student.id).await.unwrap();
        service.delete_student(&student.id).await.unwrap();
        service.delete_student("ST999").await.unwrap();

        assert!(service.list_students().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_form_validation() {
        let (service, _env) = setup_test();

        let mut empty_name = sample_student_form("", "0911111111");
        empty_name.full_name = "   ".to_string();
        assert!(service.create_student(empty_name).await.is_err());

        let mut bad_dob = sample_student_form("Sara", "0911111111");
        bad_dob.dob = "15-06-2015".to_string();
        assert!(service.create_student(bad_dob).await.is_err());

        let no_phone = sample_student_form("Sara", "");
        assert!(service.create_student(no_phone).await.is_err());

        assert!(service.list_students().await.unwrap().is_empty());
    }
}
