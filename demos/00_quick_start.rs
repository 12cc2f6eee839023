/// quick start - minimal example to get started
use bnpl_ledger_rs::{CatalogItem, LoanLedger, Money, PlanConfig, Rarity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sword = CatalogItem::new(
        1,
        "Legendary Dragon Sword",
        "Fantasy Quest",
        Money::from_str_exact("2.5")?,
        Money::from_str_exact("312.50")?,
        Rarity::Legendary,
    );

    // 4 installments, 25% down, no interest
    let plan = PlanConfig::default();

    let mut ledger = LoanLedger::new();
    let quote = ledger.quote(&sword, &plan)?;
    let time = bnpl_ledger_rs::SafeTimeProvider::new(bnpl_ledger_rs::TimeSource::System);
    let loan = ledger.originate(&sword, &plan, &quote, &time)?;

    // pay the first installment
    ledger.pay_installment_now(loan.id)?;

    println!("{}", ledger.json());

    Ok(())
}
