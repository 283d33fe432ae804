use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};

use crate::domain::{dates, ids};
use crate::storage::{Collection, RecordStore};
use shared::Parent;

/// Service for managing parent records.
///
/// Parents are never created directly: they come into existence when a
/// student is saved with an unknown parent phone number. The phone number is
/// the de-duplication key.
#[derive(Clone)]
pub struct ParentService {
    store: Arc<RecordStore>,
}

impl ParentService {
    /// Create a new ParentService
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// List all parents
    pub async fn list_parents(&self) -> Result<Vec<Parent>> {
        self.store.read(Collection::Parents).await
    }

    /// Link a student to the parent identified by `parent_phone`.
    ///
    /// When a parent with that phone exists, the student id is appended to
    /// its list (once) and the display name takes the latest value. When the
    /// student is already linked nothing is written. Otherwise a new parent
    /// record is created.
    pub async fn link_parent(
        &self,
        student_id: &str,
        parent_name: &str,
        parent_phone: &str,
    ) -> Result<()> {
        let _guard = self.store.mutation_guard(Collection::Parents).await;
        let mut parents: Vec<Parent> = self.store.read(Collection::Parents).await?;

        if let Some(parent) = parents.iter_mut().find(|p| p.phone == parent_phone) {
            if parent.student_ids.iter().any(|id| id == student_id) {
                debug!(
                    "Student {} already linked to parent {}, nothing to do",
                    student_id, parent.id
                );
                return Ok(());
            }

            parent.student_ids.push(student_id.to_string());
            // Last writer wins for the display name only.
            parent.full_name = parent_name.to_string();
            info!("Linked student {} to existing parent {}", student_id, parent.id);
        } else {
            let parent = Parent {
                id: ids::parent_id(Utc::now().timestamp_millis()),
                full_name: parent_name.to_string(),
                phone: parent_phone.to_string(),
                student_ids: vec![student_id.to_string()],
                created_at: dates::now_iso(),
            };
            info!("Created parent {} for student {}", parent.id, student_id);
            parents.push(parent);
        }

        self.store.write(Collection::Parents, &parents).await
    }
}
