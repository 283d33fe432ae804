use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Utc};
use log::{info, warn};

use crate::domain::models::ValidationError;
use crate::domain::{dates, ids};
use crate::storage::{Collection, RecordStore};
use shared::{MonthlyRevenueEntry, Payment, PaymentFormData, SavePaymentResult, CURRENCY_ETB, MONTHS};

/// Month abbreviations for the revenue chart, January first
const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Service for recording payments and computing revenue statistics
#[derive(Clone)]
pub struct PaymentService {
    store: Arc<RecordStore>,
}

impl PaymentService {
    /// Create a new PaymentService
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// List all payments, most recently recorded first
    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.store.read(Collection::Payments).await
    }

    /// Record a payment.
    ///
    /// At most one payment may exist per (student, month, year); a duplicate
    /// is rejected with a structured failure and the collection is left
    /// unchanged.
    pub async fn record_payment(&self, data: PaymentFormData) -> Result<SavePaymentResult> {
        self.validate_form(&data)?;

        let _guard = self.store.mutation_guard(Collection::Payments).await;
        let payments: Vec<Payment> = self.store.read(Collection::Payments).await?;

        let exists = payments.iter().any(|p| {
            p.student_id == data.student_id && p.month == data.month && p.year == data.year
        });
        if exists {
            warn!(
                "Rejected duplicate payment for {} ({} {})",
                data.student_id, data.month, data.year
            );
            return Ok(SavePaymentResult {
                success: false,
                message: Some(
                    "Payment already exists for this student in the selected month and year."
                        .to_string(),
                ),
                payment: None,
            });
        }

        let payment = Payment {
            id: ids::payment_id(Utc::now().timestamp_millis()),
            student_id: data.student_id,
            student_name: data.student_name,
            grade: data.grade,
            amount: data.amount,
            currency: CURRENCY_ETB.to_string(),
            month: data.month,
            year: data.year,
            payment_date: dates::today_ymd(),
            timestamp: dates::now_iso(),
        };

        let mut updated = Vec::with_capacity(payments.len() + 1);
        updated.push(payment.clone());
        updated.extend(payments);
        self.store.write(Collection::Payments, &updated).await?;

        info!(
            "Recorded payment {} for {} ({} {})",
            payment.id, payment.student_id, payment.month, payment.year
        );
        Ok(SavePaymentResult {
            success: true,
            message: None,
            payment: Some(payment),
        })
    }

    /// Sum of all payment amounts
    pub async fn total_revenue(&self) -> Result<f64> {
        let payments = self.list_payments().await?;
        Ok(payments.iter().map(|p| p.amount).sum())
    }

    /// Revenue bucketed by the calendar month of the payment date.
    ///
    /// Always returns 12 entries, January through December. Buckets use the
    /// day the payment was recorded, not the month the payment covers.
    /// Payments whose date fails to parse are skipped.
    pub async fn monthly_revenue_stats(&self) -> Result<Vec<MonthlyRevenueEntry>> {
        let payments = self.list_payments().await?;
        let mut buckets = [0.0_f64; 12];

        for payment in &payments {
            match dates::parse_ymd(&payment.payment_date) {
                Some(date) => buckets[date.month0() as usize] += payment.amount,
                None => warn!(
                    "Skipping payment {} with unparseable date '{}'",
                    payment.id, payment.payment_date
                ),
            }
        }

        Ok(MONTH_ABBREVS
            .iter()
            .zip(buckets)
            .map(|(name, revenue)| MonthlyRevenueEntry {
                name: name.to_string(),
                revenue,
            })
            .collect())
    }

    fn validate_form(&self, data: &PaymentFormData) -> Result<()> {
        if data.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        if !MONTHS.contains(&data.month.as_str()) {
            return Err(ValidationError::UnknownMonth(data.month.clone()).into());
        }
        Ok(())
    }
}
