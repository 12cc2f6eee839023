/// loan lifecycle - originate, pay every installment, watch the escrow unlock
use bnpl_ledger_rs::{CatalogItem, Event, LoanLedger, Money, PlanConfig, Rarity, SafeTimeProvider, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let armor = CatalogItem::new(
        2,
        "Cyber Punk Armor",
        "Neon Warriors",
        Money::from_str_exact("1.8")?,
        Money::from_major(225),
        Rarity::Epic,
    )
    .with_stat("defense", 80)
    .with_stat("speed", 120);

    let plan = PlanConfig::new(3, 20, 0);
    let mut ledger = LoanLedger::new();
    let quote = ledger.quote(&armor, &plan)?;
    let loan = ledger.originate(&armor, &plan, &quote, &time)?;

    println!("originated {} for {}", loan.id, loan.item_name);
    println!("  down payment: {} SOL / ${}", loan.paid, loan.paid_usd);
    println!("  remaining:    {} SOL / ${}", loan.remaining, loan.remaining_usd);
    println!("  escrow locked: {}\n", loan.locked);

    for _ in 0..loan.installments {
        controller.advance(Duration::days(30));
        let updated = ledger.pay_installment(loan.id, &time)?;
        println!(
            "{}: paid {}/{} - remaining ${} - locked {}",
            time.now().date_naive(),
            updated.paid_installments,
            updated.installments,
            updated.remaining_usd,
            updated.locked,
        );
    }

    // one more payment is refused and changes nothing
    if let Err(e) = ledger.pay_installment(loan.id, &time) {
        println!("\nextra payment refused: {}", e);
    }

    println!("\nevents:");
    for event in ledger.take_events() {
        match event {
            Event::InstallmentPaid { installment_number, amount_usd, .. } => {
                println!("  installment {} paid (${})", installment_number, amount_usd)
            }
            Event::CollateralReleased { item_name, .. } => println!("  {} released from escrow", item_name),
            other => println!("  {:?}", other),
        }
    }

    Ok(())
}
