//! SQLite record store.
//!
//! RULE: Only store.rs talks to the database.
//! Evaluators never see SQL — they are handed snapshot collections fetched
//! here, and results are appended back through these methods. The customer
//! risk-score update is a single UPDATE statement, so concurrent
//! evaluations of the same customer cannot interleave partial writes.

use crate::{
    error::{EngineError, EngineResult},
    factors::RiskFactorSet,
    regulatory_alerts::{ComplianceAlert, ReportType, Severity},
    snapshot::{CustomerSnapshot, TransactionSnapshot, VerificationDocumentSnapshot},
    types::{AssessmentType, ComplianceStatus, ScreeningStatus},
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::str::FromStr;

/// A persisted risk assessment.
#[derive(Debug, Clone)]
pub struct RiskAssessmentRecord {
    pub assessment_id: String,
    pub customer_id: String,
    pub assessed_at: DateTime<Utc>,
    pub risk_factors: RiskFactorSet,
    pub overall_score: f64,
    pub assessment_type: AssessmentType,
}

/// A persisted compliance alert.
#[derive(Debug, Clone)]
pub struct StoredAlert {
    pub alert_id: String,
    pub customer_id: String,
    pub transaction_id: Option<String>,
    pub report_type: ReportType,
    pub severity: Severity,
    pub description: String,
    pub generated_at: DateTime<Utc>,
    pub action_required: bool,
}

/// Customer counts per risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskDistribution {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
}

pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the record store at `path`.
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_schema.sql"))?;
        Ok(())
    }

    // ── Customers ──────────────────────────────────────────────

    pub fn insert_customer(&self, c: &CustomerSnapshot) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO customer
             (customer_id, customer_type, country_code, is_verified,
              last_verification, risk_score, compliance_status, business_type,
              annual_revenue)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                c.customer_id,
                c.customer_type.as_str(),
                c.country_code,
                c.is_verified,
                c.last_verification.map(|t| ts_to_sql(&t)),
                c.risk_score,
                c.compliance_status.as_str(),
                c.business_type,
                c.annual_revenue,
            ],
        )?;
        Ok(())
    }

    pub fn get_customer(&self, customer_id: &str) -> EngineResult<Option<CustomerSnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT customer_id, customer_type, country_code, is_verified,
                    last_verification, risk_score, compliance_status,
                    business_type, annual_revenue
             FROM customer WHERE customer_id = ?1",
        )?;
        let mut rows = stmt.query_map(params![customer_id], map_customer)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    pub fn customer_ids(&self) -> EngineResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT customer_id FROM customer ORDER BY customer_id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Write the freshly aggregated risk score onto the customer record.
    /// One atomic UPDATE per customer — the only serialization point in
    /// the whole evaluation cycle.
    pub fn update_customer_risk(&self, customer_id: &str, risk_score: f64) -> EngineResult<()> {
        let changed = self.conn.execute(
            "UPDATE customer SET risk_score = ?2 WHERE customer_id = ?1",
            params![customer_id, risk_score],
        )?;
        if changed == 0 {
            return Err(EngineError::NotFound {
                kind: "customer",
                id: customer_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn set_compliance_status(
        &self,
        customer_id: &str,
        status: ComplianceStatus,
    ) -> EngineResult<()> {
        let changed = self.conn.execute(
            "UPDATE customer SET compliance_status = ?2 WHERE customer_id = ?1",
            params![customer_id, status.as_str()],
        )?;
        if changed == 0 {
            return Err(EngineError::NotFound {
                kind: "customer",
                id: customer_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn customer_count(&self) -> EngineResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Customer counts per risk band, using the contract band edges.
    pub fn risk_distribution(&self) -> EngineResult<RiskDistribution> {
        let (low, medium, high) = self.conn.query_row(
            "SELECT
                 SUM(CASE WHEN risk_score < ?1 THEN 1 ELSE 0 END),
                 SUM(CASE WHEN risk_score >= ?1 AND risk_score < ?2 THEN 1 ELSE 0 END),
                 SUM(CASE WHEN risk_score >= ?2 THEN 1 ELSE 0 END)
             FROM customer",
            params![crate::rules::LOW_RISK_BAND, crate::rules::HIGH_RISK_BAND],
            |row| {
                Ok((
                    row.get::<_, Option<i64>>(0)?,
                    row.get::<_, Option<i64>>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                ))
            },
        )?;
        Ok(RiskDistribution {
            low: low.unwrap_or(0),
            medium: medium.unwrap_or(0),
            high: high.unwrap_or(0),
        })
    }

    // ── Transactions ───────────────────────────────────────────

    pub fn insert_transaction(&self, t: &TransactionSnapshot) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO txn
             (transaction_id, customer_id, amount, timestamp, transaction_type,
              source_country, destination_country, reference, risk_score,
              is_suspicious, screening_status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                t.transaction_id,
                t.customer_id,
                t.amount,
                ts_to_sql(&t.timestamp),
                t.transaction_type.as_str(),
                t.source_country,
                t.destination_country,
                t.reference,
                t.risk_score,
                t.is_suspicious,
                t.screening_status.as_str(),
            ],
        )?;
        Ok(())
    }

    pub fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> EngineResult<Option<TransactionSnapshot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TXN_COLUMNS} WHERE transaction_id = ?1"
        ))?;
        let mut rows = stmt.query_map(params![transaction_id], map_transaction)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Full history for one customer, oldest first.
    pub fn transactions_for_customer(
        &self,
        customer_id: &str,
    ) -> EngineResult<Vec<TransactionSnapshot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TXN_COLUMNS} WHERE customer_id = ?1 ORDER BY timestamp ASC"
        ))?;
        let rows = stmt.query_map(params![customer_id], map_transaction)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// One customer's transactions with `since <= timestamp <= until`,
    /// oldest first.
    pub fn transactions_in_window(
        &self,
        customer_id: &str,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> EngineResult<Vec<TransactionSnapshot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TXN_COLUMNS}
             WHERE customer_id = ?1 AND timestamp >= ?2 AND timestamp <= ?3
             ORDER BY timestamp ASC"
        ))?;
        let rows = stmt.query_map(
            params![customer_id, ts_to_sql(&since), ts_to_sql(&until)],
            map_transaction,
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// All suspicious transactions across customers in a period, oldest
    /// first. Feeds the periodic regulatory report sweep.
    pub fn suspicious_transactions_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<TransactionSnapshot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TXN_COLUMNS}
             WHERE is_suspicious = 1 AND timestamp >= ?1 AND timestamp <= ?2
             ORDER BY timestamp ASC"
        ))?;
        let rows = stmt.query_map(params![ts_to_sql(&start), ts_to_sql(&end)], map_transaction)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Record a screening verdict on a transaction.
    pub fn mark_transaction(
        &self,
        transaction_id: &str,
        is_suspicious: bool,
        status: ScreeningStatus,
    ) -> EngineResult<()> {
        let changed = self.conn.execute(
            "UPDATE txn SET is_suspicious = ?2, screening_status = ?3
             WHERE transaction_id = ?1",
            params![transaction_id, is_suspicious, status.as_str()],
        )?;
        if changed == 0 {
            return Err(EngineError::NotFound {
                kind: "transaction",
                id: transaction_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn suspicious_transaction_count_since(&self, since: DateTime<Utc>) -> EngineResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM txn WHERE is_suspicious = 1 AND timestamp >= ?1",
            params![ts_to_sql(&since)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Verification documents ─────────────────────────────────

    pub fn insert_document(&self, d: &VerificationDocumentSnapshot) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO verification_document
             (document_id, customer_id, document_type, upload_date, expiry_date,
              verification_status, issuing_country, document_number)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                d.document_id,
                d.customer_id,
                d.document_type,
                ts_to_sql(&d.upload_date),
                d.expiry_date.map(|t| ts_to_sql(&t)),
                d.verification_status.as_str(),
                d.issuing_country,
                d.document_number,
            ],
        )?;
        Ok(())
    }

    pub fn documents_for_customer(
        &self,
        customer_id: &str,
    ) -> EngineResult<Vec<VerificationDocumentSnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT document_id, customer_id, document_type, upload_date,
                    expiry_date, verification_status, issuing_country,
                    document_number
             FROM verification_document
             WHERE customer_id = ?1 ORDER BY upload_date ASC",
        )?;
        let rows = stmt.query_map(params![customer_id], map_document)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn pending_document_count(&self) -> EngineResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM verification_document
             WHERE verification_status = 'pending'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Risk assessments ───────────────────────────────────────

    pub fn insert_risk_assessment(&self, a: &RiskAssessmentRecord) -> EngineResult<()> {
        let factors_json = serde_json::to_string(&a.risk_factors)?;
        self.conn.execute(
            "INSERT INTO risk_assessment
             (assessment_id, customer_id, assessed_at, risk_factors,
              overall_score, assessment_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                a.assessment_id,
                a.customer_id,
                ts_to_sql(&a.assessed_at),
                factors_json,
                a.overall_score,
                a.assessment_type.as_str(),
            ],
        )?;
        Ok(())
    }

    pub fn assessments_for_customer(
        &self,
        customer_id: &str,
    ) -> EngineResult<Vec<RiskAssessmentRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT assessment_id, customer_id, assessed_at, risk_factors,
                    overall_score, assessment_type
             FROM risk_assessment
             WHERE customer_id = ?1 ORDER BY assessed_at ASC",
        )?;
        let rows = stmt.query_map(params![customer_id], |row| {
            let factors_json: String = row.get(3)?;
            let risk_factors = serde_json::from_str(&factors_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(RiskAssessmentRecord {
                assessment_id: row.get(0)?,
                customer_id: row.get(1)?,
                assessed_at: parse_ts(2, row.get(2)?)?,
                risk_factors,
                overall_score: row.get(4)?,
                assessment_type: parse_field(5, row.get(5)?)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Compliance alerts ──────────────────────────────────────

    pub fn insert_alert(
        &self,
        alert_id: &str,
        customer_id: &str,
        transaction_id: Option<&str>,
        alert: &ComplianceAlert,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO compliance_alert
             (alert_id, customer_id, transaction_id, report_type, severity,
              description, generated_at, action_required)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                alert_id,
                customer_id,
                transaction_id,
                alert.report_type.as_str(),
                alert.severity.as_str(),
                alert.description,
                ts_to_sql(&alert.generated_at),
                alert.action_required,
            ],
        )?;
        Ok(())
    }

    pub fn alerts_for_customer(&self, customer_id: &str) -> EngineResult<Vec<StoredAlert>> {
        let mut stmt = self.conn.prepare(
            "SELECT alert_id, customer_id, transaction_id, report_type,
                    severity, description, generated_at, action_required
             FROM compliance_alert
             WHERE customer_id = ?1 ORDER BY generated_at ASC",
        )?;
        let rows = stmt.query_map(params![customer_id], map_alert)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Alert counts per report type, for operational summaries.
    pub fn alert_counts_by_type(&self) -> EngineResult<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT report_type, COUNT(*) FROM compliance_alert
             GROUP BY report_type ORDER BY report_type",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

const TXN_COLUMNS: &str = "SELECT transaction_id, customer_id, amount, timestamp,
        transaction_type, source_country, destination_country, reference,
        risk_score, is_suspicious, screening_status FROM txn";

/// Fixed-width UTC timestamps so lexicographic TEXT comparison matches
/// chronological order in window queries.
fn ts_to_sql(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_opt_ts(idx: usize, s: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    s.map(|v| parse_ts(idx, v)).transpose()
}

fn parse_field<T: FromStr<Err = EngineError>>(idx: usize, s: String) -> rusqlite::Result<T> {
    s.parse().map_err(|e: EngineError| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn map_customer(row: &Row<'_>) -> rusqlite::Result<CustomerSnapshot> {
    Ok(CustomerSnapshot {
        customer_id: row.get(0)?,
        customer_type: parse_field(1, row.get(1)?)?,
        country_code: row.get(2)?,
        is_verified: row.get(3)?,
        last_verification: parse_opt_ts(4, row.get(4)?)?,
        risk_score: row.get(5)?,
        compliance_status: parse_field(6, row.get(6)?)?,
        business_type: row.get(7)?,
        annual_revenue: row.get(8)?,
    })
}

fn map_transaction(row: &Row<'_>) -> rusqlite::Result<TransactionSnapshot> {
    Ok(TransactionSnapshot {
        transaction_id: row.get(0)?,
        customer_id: row.get(1)?,
        amount: row.get(2)?,
        timestamp: parse_ts(3, row.get(3)?)?,
        transaction_type: parse_field(4, row.get(4)?)?,
        source_country: row.get(5)?,
        destination_country: row.get(6)?,
        reference: row.get(7)?,
        risk_score: row.get(8)?,
        is_suspicious: row.get(9)?,
        screening_status: parse_field(10, row.get(10)?)?,
    })
}

fn map_document(row: &Row<'_>) -> rusqlite::Result<VerificationDocumentSnapshot> {
    Ok(VerificationDocumentSnapshot {
        document_id: row.get(0)?,
        customer_id: row.get(1)?,
        document_type: row.get(2)?,
        upload_date: parse_ts(3, row.get(3)?)?,
        expiry_date: parse_opt_ts(4, row.get(4)?)?,
        verification_status: parse_field(5, row.get(5)?)?,
        issuing_country: row.get(6)?,
        document_number: row.get(7)?,
    })
}

fn map_alert(row: &Row<'_>) -> rusqlite::Result<StoredAlert> {
    Ok(StoredAlert {
        alert_id: row.get(0)?,
        customer_id: row.get(1)?,
        transaction_id: row.get(2)?,
        report_type: parse_field(3, row.get(3)?)?,
        severity: parse_field(4, row.get(4)?)?,
        description: row.get(5)?,
        generated_at: parse_ts(6, row.get(6)?)?,
        action_required: row.get(7)?,
    })
}
