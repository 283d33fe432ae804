use serde::{Deserialize, Serialize};

// Persisted entities keep the camelCase field names of the legacy storage
// format so blobs written by earlier releases deserialize unchanged.

/// Student ID in format: "ST" + zero-padded sequential number (e.g. "ST007")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub full_name: String,
    pub gender: String,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    /// Name of the grade (class) the student is enrolled in
    pub grade: String,
    pub parent_name: String,
    /// De-duplication key for the linked parent record
    pub parent_phone: String,
    pub created_at: String,
}

/// Parent ID in format: "P" + epoch_millis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    /// IDs of the students linked to this parent
    pub student_ids: Vec<String>,
    pub created_at: String,
}

/// Teacher ID in format: "T" + zero-padded sequential number (e.g. "T003")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    /// Names of the grades this teacher covers
    pub assigned_grades: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One attendance mark per (subject, date).
///
/// Record ID is "<subjectId>-<date>" for students and "T-<teacherId>-<date>"
/// for teachers; re-marking the same day replaces the record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    /// Subject of the record: a student ID, or a teacher ID for teacher
    /// attendance (field name kept from the legacy storage format)
    pub student_id: String,
    /// Denormalized for easier display
    pub student_name: String,
    /// Denormalized for easier display ("N/A" for teacher attendance)
    pub grade: String,
    /// Day the attendance applies to (YYYY-MM-DD)
    pub date: String,
    pub status: AttendanceStatus,
    pub timestamp: String,
}

/// Payment ID in format: "PAY-" + epoch_millis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub grade: String,
    pub amount: f64,
    pub currency: String,
    /// Month the payment covers (full month name, see [`MONTHS`])
    pub month: String,
    pub year: String,
    /// Day the payment was recorded (YYYY-MM-DD)
    pub payment_date: String,
    pub timestamp: String,
}

/// Grade (class) ID in format: "G-" + epoch_millis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

// --- Form data (everything the caller supplies; ids and timestamps are
// --- assigned by the domain layer) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFormData {
    pub full_name: String,
    pub gender: String,
    pub dob: String,
    pub grade: String,
    pub parent_name: String,
    pub parent_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherFormData {
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    pub assigned_grades: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFormData {
    pub student_id: String,
    pub student_name: String,
    pub grade: String,
    pub amount: f64,
    pub month: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeFormData {
    pub name: String,
}

// --- Derived statistics consumed by dashboards ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttendanceStats {
    pub date: String,
    pub present: usize,
    pub absent: usize,
    /// Current enrollment, not historical enrollment on that date
    pub total: usize,
}

/// One weekday in the weekly attendance chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAttendanceEntry {
    /// Weekday abbreviation ("Mon", "Tue", ...)
    pub name: String,
    pub present: usize,
    pub absent: usize,
}

/// One calendar month in the revenue chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenueEntry {
    /// Month abbreviation ("Jan", "Feb", ...)
    pub name: String,
    pub revenue: f64,
}

// --- Structured results for business-rule rejections ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePaymentResult {
    pub success: bool,
    pub message: Option<String>,
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteGradeResult {
    pub success: bool,
    pub message: Option<String>,
}

/// Hashed admin credentials as stored on this device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredentials {
    pub username_hash: String,
    pub password_hash: String,
}

// --- Constants ---

/// Currency every payment is recorded in
pub const CURRENCY_ETB: &str = "ETB";

/// Month names accepted in [`PaymentFormData::month`]
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Years selectable for payments
pub const YEARS: [&str; 5] = ["2023", "2024", "2025", "2026", "2027"];
