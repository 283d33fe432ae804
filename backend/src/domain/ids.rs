//! ID generation helpers.
//!
//! Students and teachers carry sequential IDs derived from the highest
//! numeric suffix currently in their collection; there is no persisted
//! counter. Parents, payments, and grades carry millisecond-timestamp IDs.

/// Next sequential number for a prefixed ID scheme.
///
/// IDs whose suffix does not parse as a number are ignored. An empty
/// collection yields 1.
pub fn next_sequential_number<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> u32 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

/// Student ID: "ST" + zero-padded 3-digit number
pub fn format_student_id(number: u32) -> String {
    format!("ST{:03}", number)
}

/// Teacher ID: "T" + zero-padded 3-digit number
pub fn format_teacher_id(number: u32) -> String {
    format!("T{:03}", number)
}

/// Parent ID: "P" + epoch millis
pub fn parent_id(now_millis: i64) -> String {
    format!("P{}", now_millis)
}

/// Payment ID: "PAY-" + epoch millis
pub fn payment_id(now_millis: i64) -> String {
    format!("PAY-{}", now_millis)
}

/// Grade ID: "G-" + epoch millis
pub fn grade_id(now_millis: i64) -> String {
    format!("G-{}", now_millis)
}
