//! Customer-level compliance risk factors and jurisdiction warnings.

use amlservice_core::customer_risk::CustomerRiskEvaluator;
use amlservice_core::factors;
use amlservice_core::snapshot::{CustomerSnapshot, TransactionSnapshot};
use amlservice_core::types::{
    ComplianceStatus, CustomerType, ScreeningStatus, TransactionType,
};
use chrono::{DateTime, Duration, Utc};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn customer(verified: bool, last_verification: Option<DateTime<Utc>>) -> CustomerSnapshot {
    CustomerSnapshot {
        customer_id: "cust-0001".into(),
        customer_type: CustomerType::Personal,
        country_code: "GB".into(),
        is_verified: verified,
        last_verification,
        risk_score: 0.0,
        compliance_status: ComplianceStatus::Pending,
        business_type: None,
        annual_revenue: None,
    }
}

fn txn(amount: f64, timestamp: DateTime<Utc>, suspicious: bool) -> TransactionSnapshot {
    TransactionSnapshot {
        transaction_id: "txn-x".into(),
        customer_id: "cust-0001".into(),
        amount,
        timestamp,
        transaction_type: TransactionType::Deposit,
        source_country: "GB".into(),
        destination_country: "GB".into(),
        reference: None,
        risk_score: 0.0,
        is_suspicious: suspicious,
        screening_status: ScreeningStatus::Pending,
    }
}

/// An unverified customer carries full identity risk.
#[test]
fn unverified_customer_scores_full_identity_risk() {
    let now = at("2026-03-01T12:00:00Z");
    let set = CustomerRiskEvaluator::new().evaluate(&customer(false, None), &[], now);
    assert_eq!(set.get(factors::IDENTITY_VERIFICATION), Some(1.0));
}

/// Verification older than a year is stale and scores half risk.
#[test]
fn stale_verification_scores_half_identity_risk() {
    let now = at("2026-03-01T12:00:00Z");
    let c = customer(true, Some(now - Duration::days(400)));
    let set = CustomerRiskEvaluator::new().evaluate(&c, &[], now);
    assert_eq!(set.get(factors::IDENTITY_VERIFICATION), Some(0.5));
}

/// Fresh verification carries no identity risk.
#[test]
fn fresh_verification_scores_zero_identity_risk() {
    let now = at("2026-03-01T12:00:00Z");
    let c = customer(true, Some(now - Duration::days(100)));
    let set = CustomerRiskEvaluator::new().evaluate(&c, &[], now);
    assert_eq!(set.get(factors::IDENTITY_VERIFICATION), Some(0.0));
}

/// A verified flag with no recorded date counts as never verified.
#[test]
fn verified_without_date_counts_as_unverified() {
    let now = at("2026-03-01T12:00:00Z");
    let set = CustomerRiskEvaluator::new().evaluate(&customer(true, None), &[], now);
    assert_eq!(set.get(factors::IDENTITY_VERIFICATION), Some(1.0));
}

/// Transaction-pattern risk is the suspicious ratio of the history.
#[test]
fn pattern_risk_is_suspicious_ratio() {
    let now = at("2026-03-01T12:00:00Z");
    let history = vec![
        txn(100.0, now - Duration::days(4), true),
        txn(100.0, now - Duration::days(3), false),
        txn(100.0, now - Duration::days(2), true),
        txn(100.0, now - Duration::days(1), false),
    ];
    let c = customer(true, Some(now - Duration::days(10)));
    let set = CustomerRiskEvaluator::new().evaluate(&c, &history, now);
    assert_eq!(set.get(factors::TRANSACTION_PATTERN), Some(0.5));
}

/// No history means no pattern signal, not an error.
#[test]
fn no_transactions_scores_zero_pattern_risk() {
    let now = at("2026-03-01T12:00:00Z");
    let set = CustomerRiskEvaluator::new().evaluate(&customer(false, None), &[], now);
    assert_eq!(set.get(factors::TRANSACTION_PATTERN), Some(0.0));
}

/// The factor set carries exactly the four documented keys; no overall
/// aggregate is computed at this level.
#[test]
fn reserved_factors_present_and_zero() {
    let now = at("2026-03-01T12:00:00Z");
    let set = CustomerRiskEvaluator::new().evaluate(&customer(false, None), &[], now);

    assert_eq!(set.len(), 4);
    assert_eq!(set.get(factors::GEOGRAPHIC_RISK), Some(0.0));
    assert_eq!(set.get(factors::BUSINESS_TYPE_RISK), Some(0.0));
    assert!(!set.contains(factors::OVERALL_RISK));
}

/// Listed jurisdictions produce descriptive warnings; others none.
#[test]
fn country_warnings_for_listed_jurisdictions() {
    let evaluator = CustomerRiskEvaluator::new();

    assert_eq!(
        evaluator.country_warnings("YY"),
        vec!["Customer associated with Sanctioned country".to_string()]
    );
    assert_eq!(
        evaluator.country_warnings("XX"),
        vec!["Customer associated with High-risk jurisdiction".to_string()]
    );
    assert!(evaluator.country_warnings("GB").is_empty());
}

/// The report's overall score is the unweighted mean of the factors.
#[test]
fn report_overall_is_mean_of_factors() {
    let now = at("2026-03-01T12:00:00Z");
    let report = CustomerRiskEvaluator::new().report(&customer(false, None), &[], now);

    // identity 1.0, the other three 0.0.
    assert!((report.overall_risk_score - 0.25).abs() < 1e-9);
    assert_eq!(report.generated_at, now);
}
