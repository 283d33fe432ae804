use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use crate::domain::models::ValidationError;
use crate::domain::{dates, ids};
use crate::storage::{Collection, RecordStore};
use shared::{Teacher, TeacherFormData};

/// Service for managing teachers
#[derive(Clone)]
pub struct TeacherService {
    store: Arc<RecordStore>,
}

impl TeacherService {
    /// Create a new TeacherService
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// List all teachers, most recently created first
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.store.read(Collection::Teachers).await
    }

    /// Get a teacher by ID
    pub async fn get_teacher(&self, teacher_id: &str) -> Result<Option<Teacher>> {
        let teachers = self.list_teachers().await?;
        Ok(teachers.into_iter().find(|t| t.id == teacher_id))
    }

    /// Create a new teacher with the next sequential ID
    pub async fn create_teacher(&self, data: TeacherFormData) -> Result<Teacher> {
        info!("Creating teacher: name={}", data.full_name);
        self.validate_form(&data)?;

        let _guard = self.store.mutation_guard(Collection::Teachers).await;
        let teachers: Vec<Teacher> = self.store.read(Collection::Teachers).await?;

        let next_number =
            ids::next_sequential_number(teachers.iter().map(|t| t.id.as_str()), "T");
        let teacher = Teacher {
            id: ids::format_teacher_id(next_number),
            full_name: data.full_name,
            phone: data.phone,
            gender: data.gender,
            assigned_grades: data.assigned_grades,
            created_at: dates::now_iso(),
        };

        let mut updated = Vec::with_capacity(teachers.len() + 1);
        updated.push(teacher.clone());
        updated.extend(teachers);
        self.store.write(Collection::Teachers, &updated).await?;

        info!("Created teacher {} ({})", teacher.id, teacher.full_name);
        Ok(teacher)
    }

    /// Update an existing teacher. Returns `None` when the ID is unknown.
    pub async fn update_teacher(
        &self,
        teacher_id: &str,
        data: TeacherFormData,
    ) -> Result<Option<Teacher>> {
        self.validate_form(&data)?;

        let _guard = self.store.mutation_guard(Collection::Teachers).await;
        let mut teachers: Vec<Teacher> = self.store.read(Collection::Teachers).await?;

        let Some(position) = teachers.iter().position(|t| t.id == teacher_id) else {
            warn!("Teacher not found for update: {}", teacher_id);
            return Ok(None);
        };

        let existing = &teachers[position];
        let updated = Teacher {
            id: existing.id.clone(),
            full_name: data.full_name,
            phone: data.phone,
            gender: data.gender,
            assigned_grades: data.assigned_grades,
            created_at: existing.created_at.clone(),
        };
        teachers[position] = updated.clone();

        self.store.write(Collection::Teachers, &teachers).await?;

        info!("Updated teacher {}", teacher_id);
        Ok(Some(updated))
    }

    /// Delete a teacher by ID. Deleting an unknown ID is a no-op.
    pub async fn delete_teacher(&self, teacher_id: &str) -> Result<()> {
        let _guard = self.store.mutation_guard(Collection::Teachers).await;
        let teachers: Vec<Teacher> = self.store.read(Collection::Teachers).await?;

        let remaining: Vec<Teacher> = teachers
            .into_iter()
            .filter(|t| t.id != teacher_id)
            .collect();
        self.store.write(Collection::Teachers, &remaining).await?;

        info!("Deleted teacher {}", teacher_id);
        Ok(())
    }

    /// Numeric part of the next teacher ID, derived from the live collection
    pub async fn next_teacher_id_number(&self) -> Result<u32> {
        let teachers = self.list_teachers().await?;
        Ok(ids::next_sequential_number(
            teachers.iter().map(|t| t.id.as_str()),
            "T",
        ))
    }

    fn validate_form(&self, data: &TeacherFormData) -> Result<()> {
        if data.full_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if data.full_name.len() > 100 {
            return Err(ValidationError::NameTooLong.into());
        }
        if data.phone.trim().is_empty() {
            return Err(ValidationError::EmptyPhone.into());
        }
        Ok(())
    }
}
