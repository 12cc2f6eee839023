/// json state - dashboard serialization with a pre-seeded loan
use bnpl_ledger_rs::{
    CatalogItem, LedgerConfig, Loan, LoanLedger, LoanStatus, Money, PlanConfig, Rarity, Rate,
    SafeTimeProvider, TimeSource, Uuid,
};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json state serialization ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    // sample loan shown as soon as a wallet connects
    let opened = time.now() - Duration::days(60);
    let seed = Loan {
        id: Uuid::new_v4(),
        item_name: "Ancient Shield".to_string(),
        total: Money::from_str_exact("3.2")?,
        paid: Money::from_str_exact("1.6")?,
        remaining: Money::from_str_exact("1.6")?,
        total_usd: Money::from_major(400),
        paid_usd: Money::from_major(200),
        remaining_usd: Money::from_major(200),
        installments: 4,
        paid_installments: 2,
        next_payment: Some(time.now() + Duration::days(30)),
        originated_at: opened,
        last_payment_at: Some(time.now()),
        status: LoanStatus::Active,
        locked: true,
        interest_rate: Rate::ZERO,
    };

    let mut ledger = LoanLedger::with_config(LedgerConfig::default().with_seed_loans(vec![seed.clone()]))?;

    println!("stage 1: seeded");
    println!("---------------");
    println!("{}\n", ledger.json());

    let car = CatalogItem::new(4, "Racing Car NFT", "Speed Legends", Money::from_major(2), Money::from_major(250), Rarity::Rare);
    let plan = PlanConfig::new(2, 50, 8);
    let quote = ledger.quote(&car, &plan)?;
    ledger.originate(&car, &plan, &quote, &time)?;

    println!("stage 2: new loan originated");
    println!("----------------------------");
    println!("{}\n", ledger.json());

    controller.advance(Duration::days(30));
    ledger.pay_installment(seed.id, &time)?;
    ledger.pay_installment(seed.id, &time)?;

    println!("stage 3: seeded loan paid off");
    println!("-----------------------------");
    println!("{}", ledger.json());

    Ok(())
}
