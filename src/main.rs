//! FraudGuard CLI - demo surface for the fraud-risk-scoring engine
//!
//! Seeds an in-memory history store and runs both decision procedures
//! (rule-based detection and threshold-on-score classification) over a set
//! of illustrative transactions.

use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::{Arg, Command};

use fraudguard::{
    DetectorConfig, InMemoryHistoryStore, RiskScoringStrategy, RuleBasedDetector, Transaction,
    User,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fraudguard=info".parse().expect("valid directive")),
        )
        .init();

    let matches = Command::new("FraudGuard")
        .version("0.1.0")
        .author("FraudGuard Team")
        .about("Pluggable fraud-risk-scoring engine for financial transactions")
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Use the strict detection preset (lower thresholds)")
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(Command::new("demo").about("Run a demonstration of the detection rules"))
        .get_matches();

    let config = if matches.get_flag("strict") {
        DetectorConfig::strict()
    } else {
        DetectorConfig::default()
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        return;
    }

    match matches.subcommand() {
        Some(("demo", _)) => run_demo(config),
        _ => {
            println!("FraudGuard - fraud-risk scoring for financial transactions");
            println!("Use --help to see available commands");
            println!();
            println!("Quick start:");
            println!("  cargo run -- demo            # Run the detection demo");
            println!("  cargo run -- --strict demo   # Same, with stricter thresholds");
        }
    }
}

fn run_demo(config: DetectorConfig) {
    println!("FraudGuard demo");
    println!("{}", "=".repeat(50));
    println!(
        "amount threshold: {:.2}, velocity limit: {} per {}h, risk threshold: {:.2}",
        config.amount_threshold,
        config.suspicious_transaction_limit,
        config.velocity_window_hours,
        config.risk_threshold
    );

    let store = Arc::new(InMemoryHistoryStore::new());
    let detector = RuleBasedDetector::new(config, store.clone());

    // Seed users: one clean, one with prior confirmed fraud, one high-velocity
    let clean = User::new(1, "Mary Wanjiku", "mary@example.com", "+254712345678");
    let mut repeat_offender = User::new(2, "John Otieno", "john@example.com", "+254787654321");
    repeat_offender.increment_fraud_count();
    let busy = User::new(3, "Grace Njeri", "grace@example.com", "+254756789012");

    for user in [&clean, &repeat_offender, &busy] {
        store.insert_user(user.clone());
    }

    // Give the busy user enough recent history to trip the velocity rule
    for i in 0..8 {
        store.record_transaction(Transaction::new(
            100 + i,
            busy.user_id,
            40.0,
            "Mobile Credit",
            Utc::now() - Duration::minutes(i * 10),
            Some("Nairobi".into()),
        ));
    }

    println!("\nEvaluating transactions...\n");

    let cases = vec![
        ("normal purchase", Transaction::new(1, clean.user_id, 120.0, "Local Shop", Utc::now(), Some("Nairobi".into())), &clean),
        ("large transfer", Transaction::new(2, clean.user_id, 15_000.0, "Unknown Person", Utc::now(), Some("Nairobi".into())), &clean),
        ("missing location", Transaction::new(3, clean.user_id, 60.0, "Street Vendor", Utc::now(), None), &clean),
        ("repeat offender", Transaction::new(4, repeat_offender.user_id, 25.0, "School Fees", Utc::now(), Some("Kisumu".into())), &repeat_offender),
        ("high velocity", Transaction::new(5, busy.user_id, 35.0, "Mobile Credit", Utc::now(), Some("Nairobi".into())), &busy),
    ];

    for (label, transaction, user) in cases {
        let fraudulent = detector.detect_fraud(&transaction, user);
        let score = detector.calculate_risk_score(user.user_id);
        let by_score = detector.is_fraudulent(&transaction, user);

        let verdict = if fraudulent { "FRAUD" } else { "ok" };
        println!(
            "  [{verdict:>5}] {label:<16} amount {:>9.2}  risk score {score:.2} ({})",
            transaction.amount,
            if by_score { "above threshold" } else { "below threshold" },
        );

        if fraudulent {
            detector.flag_user_suspicious(user.user_id);
        }
    }

    println!("\nFlagged users after the run:");
    for user_id in [clean.user_id, repeat_offender.user_id, busy.user_id] {
        if let Some(user) = store.user(user_id) {
            println!("  {} -> suspicious: {}", user.name, user.is_suspicious);
        }
    }
}
