use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::domain::dates;
use crate::storage::{Collection, RecordStore};
use shared::{
    AttendanceRecord, AttendanceStatus, DailyAttendanceStats, Student, Teacher,
    WeeklyAttendanceEntry,
};

/// Grade label used on teacher attendance records
const TEACHER_GRADE_LABEL: &str = "N/A";

/// Days covered by the weekly attendance chart (today and the 4 prior days)
const WEEKLY_WINDOW_DAYS: usize = 5;

/// One subject to mark in an attendance batch
struct SubjectMark {
    subject_id: String,
    subject_name: String,
    grade: String,
    /// ID to assign when no record exists yet for (subject, date)
    fresh_id: String,
    status: AttendanceStatus,
}

/// Service for student and teacher attendance.
///
/// Attendance is upsert-only: at most one record exists per (subject, date),
/// and re-marking a day replaces the record in place with the original ID.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<RecordStore>,
}

impl AttendanceService {
    /// Create a new AttendanceService
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// List all student attendance records
    pub async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>> {
        self.store.read(Collection::Attendance).await
    }

    /// List all teacher attendance records
    pub async fn list_teacher_attendance(&self) -> Result<Vec<AttendanceRecord>> {
        self.store.read(Collection::TeacherAttendance).await
    }

    /// Mark one student for one day
    pub async fn record_attendance(
        &self,
        student: &Student,
        date: &str,
        status: AttendanceStatus,
    ) -> Result<()> {
        self.record_attendance_batch(&[(student.clone(), status)], date)
            .await
    }

    /// Mark a batch of students for one day.
    ///
    /// All upserts are applied to one in-memory copy of the collection and
    /// persisted in a single write, so the batch lands atomically from the
    /// caller's point of view.
    pub async fn record_attendance_batch(
        &self,
        updates: &[(Student, AttendanceStatus)],
        date: &str,
    ) -> Result<()> {
        let marks = updates
            .iter()
            .map(|(student, status)| SubjectMark {
                subject_id: student.id.clone(),
                subject_name: student.full_name.clone(),
                grade: student.grade.clone(),
                fresh_id: format!("{}-{}", student.id, date),
                status: *status,
            })
            .collect();
        self.apply_batch(Collection::Attendance, marks, date).await
    }

    /// Mark one teacher for one day
    pub async fn record_teacher_attendance(
        &self,
        teacher: &Teacher,
        date: &str,
        status: AttendanceStatus,
    ) -> Result<()> {
        self.record_teacher_attendance_batch(&[(teacher.clone(), status)], date)
            .await
    }

    /// Mark a batch of teachers for one day
    pub async fn record_teacher_attendance_batch(
        &self,
        updates: &[(Teacher, AttendanceStatus)],
        date: &str,
    ) -> Result<()> {
        let marks = updates
            .iter()
            .map(|(teacher, status)| SubjectMark {
                subject_id: teacher.id.clone(),
                subject_name: teacher.full_name.clone(),
                grade: TEACHER_GRADE_LABEL.to_string(),
                fresh_id: format!("T-{}-{}", teacher.id, date),
                status: *status,
            })
            .collect();
        self.apply_batch(Collection::TeacherAttendance, marks, date)
            .await
    }

    /// Present/Absent counts for one day.
    ///
    /// `total` is the current enrollment, not the enrollment on that date.
    pub async fn daily_stats(&self, date: &str) -> Result<DailyAttendanceStats> {
        let records = self.list_attendance().await?;
        let students: Vec<Student> = self.store.read(Collection::Students).await?;

        let day_records: Vec<&AttendanceRecord> =
            records.iter().filter(|r| r.date == date).collect();
        let present = day_records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let absent = day_records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Absent)
            .count();

        Ok(DailyAttendanceStats {
            date: date.to_string(),
            present,
            absent,
            total: students.len(),
        })
    }

    /// Daily stats for today and the 4 prior days, oldest first, labeled by
    /// weekday abbreviation
    pub async fn weekly_stats(&self) -> Result<Vec<WeeklyAttendanceEntry>> {
        let mut stats = Vec::with_capacity(WEEKLY_WINDOW_DAYS);

        for day in dates::recent_days(WEEKLY_WINDOW_DAYS) {
            let date = day.format("%Y-%m-%d").to_string();
            let daily = self.daily_stats(&date).await?;
            stats.push(WeeklyAttendanceEntry {
                name: dates::weekday_abbrev(day),
                present: daily.present,
                absent: daily.absent,
            });
        }

        Ok(stats)
    }

    /// Upsert a batch of marks for one day into a collection, with a single
    /// persist at the end.
    async fn apply_batch(
        &self,
        collection: Collection,
        marks: Vec<SubjectMark>,
        date: &str,
    ) -> Result<()> {
        dates::validate_ymd(date)?;

        let _guard = self.store.mutation_guard(collection).await;
        let mut records: Vec<AttendanceRecord> = self.store.read(collection).await?;
        let timestamp = dates::now_iso();
        let mark_count = marks.len();

        for mark in marks {
            let existing = records
                .iter()
                .position(|r| r.student_id == mark.subject_id && r.date == date);

            let record = AttendanceRecord {
                // The ID of an existing record is reused so re-marking a day
                // replaces it in place.
                id: match existing {
                    Some(position) => records[position].id.clone(),
                    None => mark.fresh_id,
                },
                student_id: mark.subject_id,
                student_name: mark.subject_name,
                grade: mark.grade,
                date: date.to_string(),
                status: mark.status,
                timestamp: timestamp.clone(),
            };

            match existing {
                Some(position) => records[position] = record,
                None => records.push(record),
            }
        }

        self.store.write(collection, &records).await?;
        info!("Recorded {} attendance marks for {}", mark_count, date);
        Ok(())
    }
}
