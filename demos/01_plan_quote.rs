/// plan quotes - compare plans for each catalog item as the sliders would
use bnpl_ledger_rs::{Catalog, PlanCalculator, PlanConfig};

const CATALOG: &str = r#"[
    { "id": 1, "name": "Legendary Dragon Sword", "game": "Fantasy Quest",
      "price": "2.5", "price_usd": "312.5", "rarity": "Legendary",
      "stats": { "attack": 150, "durability": 100 } },
    { "id": 2, "name": "Cyber Punk Armor", "game": "Neon Warriors",
      "price": "1.8", "price_usd": "225", "rarity": "Epic",
      "stats": { "defense": 80, "speed": 120 } },
    { "id": 3, "name": "Mystic Pet Dragon", "game": "Pet Adventures",
      "price": "5", "price_usd": "625", "rarity": "Mythic",
      "stats": { "power": 180, "loyalty": 100 } },
    { "id": 4, "name": "Racing Car NFT", "game": "Speed Legends",
      "price": "2", "price_usd": "250", "rarity": "Rare",
      "stats": { "speed": 250, "handling": 90 } }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let catalog = Catalog::from_json(CATALOG)?;
    let calculator = PlanCalculator::default();
    let plan = PlanConfig::default().with_interest_rate_pct(5);

    println!("=== plan quotes ({}% down, {}% demo interest) ===\n", plan.down_payment_pct, plan.interest_rate_pct);

    for item in catalog.items() {
        println!("{} ({:?}, {}) - {} SOL / ${}", item.name, item.rarity, item.game, item.price, item.price_usd);

        for (installments, quote) in calculator.quote_all(item.price_usd, &plan)? {
            println!(
                "  {}x ${} down ${} financed ${} total w/ interest ${}",
                installments,
                quote.installment_amount.round_dp(2),
                quote.down_payment_amount.round_dp(2),
                quote.remaining_amount.round_dp(2),
                quote.total_with_interest.round_dp(2),
            );
        }
        println!();
    }

    // out-of-range plans are rejected, not clamped
    match calculator.quote(catalog.get(1)?.price_usd, &plan.with_installments(5)) {
        Ok(_) => println!("unexpected: 5 installments accepted"),
        Err(e) => println!("5 installments: {}", e),
    }

    Ok(())
}
