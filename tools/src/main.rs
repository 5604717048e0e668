//! aml-runner: headless compliance runner.
//!
//! Seeds a reproducible demo book of customers, transactions and KYC
//! documents into a record store, drives the engine over the whole book
//! (periodic assessments, transaction screening, license checks), and
//! prints a compliance summary.
//!
//! Usage:
//!   aml-runner --seed 42 --customers 25 --db book.db

use amlservice_core::{
    service::ComplianceService,
    snapshot::{CustomerSnapshot, TransactionSnapshot, VerificationDocumentSnapshot},
    store::RecordStore,
    types::{
        AssessmentType, ComplianceStatus, CustomerType, ScreeningStatus, TransactionType,
        VerificationStatus,
    },
};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::env;

const TXN_TYPES: &[TransactionType] = &[
    TransactionType::Deposit,
    TransactionType::Withdrawal,
    TransactionType::Transfer,
    TransactionType::Payment,
];

const COUNTRIES: &[&str] = &["GB", "GB", "GB", "GB", "FR", "DE", "XX", "YY", "ZZ"];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let customers = parse_arg(&args, "--customers", 25usize);
    let json = args.iter().any(|a| a == "--json");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");

    if !json {
        println!("aml-runner");
        println!("  seed:      {seed}");
        println!("  customers: {customers}");
        println!("  db:        {db}");
        println!();
    }

    let store = if db == ":memory:" {
        RecordStore::in_memory()?
    } else {
        RecordStore::open(db)?
    };
    store.migrate()?;

    let now = Utc::now();
    let mut rng = Pcg64::seed_from_u64(seed);
    let transaction_ids = seed_book(&store, &mut rng, customers, now)?;
    log::info!(
        "seeded {} customers, {} transactions",
        customers,
        transaction_ids.len()
    );

    let service = ComplianceService::new(&store);

    // 1. Screen every seeded transaction (anomaly verdict + alerts).
    for transaction_id in &transaction_ids {
        service.screen_transaction(transaction_id, now)?;
    }

    // 2. Periodic risk assessment across the book.
    for customer_id in store.customer_ids()? {
        service.assess_customer(&customer_id, AssessmentType::Periodic, now)?;
    }

    // 3. License verification from each customer's uploaded documents.
    let mut licenses_complete = 0usize;
    let customer_ids = store.customer_ids()?;
    for customer_id in &customer_ids {
        let documents: Vec<String> = store
            .documents_for_customer(customer_id)?
            .iter()
            .map(|d| d.document_type.clone())
            .collect();
        let outcome = service.verify_license(customer_id, &documents, now)?;
        if outcome.verification.complete {
            licenses_complete += 1;
        }
    }

    if json {
        let overview = service.overview(now)?;
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        print_summary(&service, &store, now, licenses_complete, customer_ids.len())?;
    }
    Ok(())
}

/// Populate the store with a deterministic demo book. Returns the seeded
/// transaction ids in insertion order.
fn seed_book(
    store: &RecordStore,
    rng: &mut Pcg64,
    customers: usize,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let mut transaction_ids = Vec::new();

    for i in 0..customers {
        let customer_id = format!("cust-{i:04}");
        let customer_type = if rng.gen_bool(0.2) {
            CustomerType::Business
        } else {
            CustomerType::Personal
        };
        let is_verified = rng.gen_bool(0.7);

        store.insert_customer(&CustomerSnapshot {
            customer_id: customer_id.clone(),
            customer_type,
            country_code: COUNTRIES[rng.gen_range(0..COUNTRIES.len())].to_string(),
            is_verified,
            last_verification: is_verified
                .then(|| now - Duration::days(rng.gen_range(0..700))),
            risk_score: 0.0,
            compliance_status: ComplianceStatus::Pending,
            business_type: (customer_type == CustomerType::Business)
                .then(|| "payments".to_string()),
            annual_revenue: (customer_type == CustomerType::Business)
                .then(|| rng.gen_range(100_000.0..5_000_000.0)),
        })?;

        // A handful of customers get a dense recent burst (structuring
        // shaped); the rest get sparse history over ~90 days.
        let burst = rng.gen_bool(0.15);
        let txn_count = if burst {
            rng.gen_range(6..12)
        } else {
            rng.gen_range(0..8)
        };

        for t in 0..txn_count {
            let transaction_id = format!("txn-{i:04}-{t:03}");
            let amount = if burst {
                rng.gen_range(800.0..2_500.0)
            } else if rng.gen_bool(0.05) {
                rng.gen_range(9_000.0..15_000.0)
            } else {
                rng.gen_range(50.0..3_000.0)
            };
            let age_days = if burst {
                rng.gen_range(0..6)
            } else {
                rng.gen_range(0..90)
            };
            let timestamp =
                now - Duration::days(age_days) - Duration::seconds(rng.gen_range(0..86_400));

            store.insert_transaction(&TransactionSnapshot {
                transaction_id: transaction_id.clone(),
                customer_id: customer_id.clone(),
                amount,
                timestamp,
                transaction_type: TXN_TYPES[rng.gen_range(0..TXN_TYPES.len())],
                source_country: "GB".to_string(),
                destination_country: COUNTRIES[rng.gen_range(0..COUNTRIES.len())].to_string(),
                reference: None,
                risk_score: 0.0,
                is_suspicious: false,
                screening_status: ScreeningStatus::Pending,
            })?;
            transaction_ids.push(transaction_id);
        }

        seed_documents(store, rng, &customer_id, customer_type, now)?;
    }

    Ok(transaction_ids)
}

/// Upload the license document set (sometimes with one missing) plus an
/// occasional KYC identity document.
fn seed_documents(
    store: &RecordStore,
    rng: &mut Pcg64,
    customer_id: &str,
    customer_type: CustomerType,
    now: DateTime<Utc>,
) -> Result<()> {
    let required: &[&str] = match customer_type {
        CustomerType::Business => &[
            "certificate_of_incorporation",
            "business_plan",
            "financial_projections",
            "aml_policy",
        ],
        CustomerType::Personal => &["proof_of_identity", "proof_of_address", "source_of_funds"],
    };

    let drop_one = rng.gen_bool(0.2).then(|| rng.gen_range(0..required.len()));
    for (idx, doc_type) in required.iter().enumerate() {
        if drop_one == Some(idx) {
            continue;
        }
        store.insert_document(&VerificationDocumentSnapshot {
            document_id: format!("doc-{customer_id}-{idx}"),
            customer_id: customer_id.to_string(),
            document_type: doc_type.to_string(),
            upload_date: now - Duration::days(rng.gen_range(0..60)),
            expiry_date: None,
            verification_status: if rng.gen_bool(0.6) {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Pending
            },
            issuing_country: "GB".to_string(),
            document_number: None,
        })?;
    }

    if rng.gen_bool(0.4) {
        store.insert_document(&VerificationDocumentSnapshot {
            document_id: format!("doc-{customer_id}-passport"),
            customer_id: customer_id.to_string(),
            document_type: "passport".to_string(),
            upload_date: now - Duration::days(rng.gen_range(0..400)),
            expiry_date: Some(now + Duration::days(rng.gen_range(30..3_000))),
            verification_status: VerificationStatus::Verified,
            issuing_country: "GB".to_string(),
            document_number: None,
        })?;
    }

    Ok(())
}

fn print_summary(
    service: &ComplianceService<'_>,
    store: &RecordStore,
    now: DateTime<Utc>,
    licenses_complete: usize,
    total_customers: usize,
) -> Result<()> {
    let overview = service.overview(now)?;

    println!("=== COMPLIANCE SUMMARY ===");
    println!("  customers:          {}", overview.total_customers);
    println!(
        "  risk bands:         low {} / medium {} / high {}",
        overview.low_risk_customers, overview.medium_risk_customers, overview.high_risk_customers
    );
    println!(
        "  suspicious (30d):   {}",
        overview.suspicious_transactions_30d
    );
    println!("  pending documents:  {}", overview.pending_verifications);
    println!(
        "  licenses complete:  {licenses_complete}/{total_customers}"
    );

    let alert_counts = store.alert_counts_by_type()?;
    if alert_counts.is_empty() {
        println!("  alerts:             (none)");
    } else {
        println!("  alerts:");
        for (report_type, count) in alert_counts {
            println!("    {report_type:<4} {count}");
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
