/// shared ledger - several clients paying through one serialized ledger
use std::thread;

use bnpl_ledger_rs::{CatalogItem, LoanLedger, Money, PlanConfig, Rarity, SafeTimeProvider, SharedLedger, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let shared = SharedLedger::new(LoanLedger::new());
    let dragon = CatalogItem::new(3, "Mystic Pet Dragon", "Pet Adventures", Money::from_major(5), Money::from_major(625), Rarity::Mythic);
    let plan = PlanConfig::new(6, 10, 0);

    let time = SafeTimeProvider::new(TimeSource::System);
    let quote = shared.read(|ledger| ledger.quote(&dragon, &plan))??;
    let loan = shared.originate(&dragon, &plan, &quote, &time)?;
    let loan_id = loan.id;

    // eight clients click "pay" at once; only six installments exist
    let handles: Vec<_> = (0..8)
        .map(|client| {
            let shared = shared.clone();
            thread::spawn(move || {
                let time = SafeTimeProvider::new(TimeSource::System);
                match shared.pay_installment(loan_id, &time) {
                    Ok(loan) => println!("client {}: installment {} accepted", client, loan.paid_installments),
                    Err(e) => println!("client {}: {}", client, e),
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().map_err(|_| "payment thread panicked")?;
    }

    let done = shared.get(loan_id)?;
    println!(
        "\n{}: {}/{} paid, ${} remaining, locked {}",
        done.item_name, done.paid_installments, done.installments, done.remaining_usd, done.locked
    );

    Ok(())
}
