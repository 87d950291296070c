//! Demo: CoinEx REST walkthrough
//!
//! Showcases: signed requests, sub-accounts, balances, order queries
//!
//! Run: COINEX_API_KEY=... COINEX_API_SECRET=... cargo run --bin coinex_demo
//!
//! Set COINEX_DEMO_TRADE=1 to also place a small limit order and a market
//! order on COINEX_DEMO_MARKET (default BTCUSDT). Orders are real.

use colored::*;
use coinex_rest::{CoinexRestClient, OrderQuery, OrderSide, RestError};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINEX REST WALKTHROUGH".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CoinexRestClient::from_env()?;
    let market = env::var("COINEX_DEMO_MARKET").unwrap_or_else(|_| "BTCUSDT".to_string());

    println!("{} Using {}\n", "✓".green(), client.base_url());

    // ------------------------------------------------------------------------
    println!("{}", "--- Sub-accounts ---".yellow());
    match client.get_sub_accounts("", false).await {
        Ok(accounts) if accounts.is_empty() => println!("  (none)"),
        Ok(accounts) => {
            for account in accounts {
                println!(
                    "  {:<20} frozen={:<5} usd={}",
                    account.sub_user_name.cyan(),
                    account.is_frozen,
                    account.balance_usd
                );
            }
        }
        Err(e) => report(&e),
    }
    println!();

    // ------------------------------------------------------------------------
    println!("{}", "--- Spot balance ---".yellow());
    match client.get_spot_balance().await {
        Ok(balances) => {
            for balance in balances {
                println!(
                    "  {:<8} available={:<20} frozen={}",
                    balance.ccy.cyan(),
                    balance.available,
                    balance.frozen
                );
            }
        }
        Err(e) => report(&e),
    }
    println!();

    // ------------------------------------------------------------------------
    if env::var("COINEX_DEMO_TRADE").as_deref() == Ok("1") {
        println!("{}", "--- Placing orders ---".yellow());

        let amount = Decimal::from_str("0.0001")?;
        let price = Decimal::from(30000);

        match client
            .place_limit_order(&market, OrderSide::Buy, amount, price)
            .await
        {
            Ok(order) => println!("  {} limit order {}", "✓".green(), order.order_id),
            Err(e) => report(&e),
        }

        match client
            .place_market_order(&market, OrderSide::Buy, amount)
            .await
        {
            Ok(order) => println!("  {} market order {}", "✓".green(), order.order_id),
            Err(e) => report(&e),
        }
        println!();
    }

    // ------------------------------------------------------------------------
    let query = OrderQuery::new(market.as_str()).with_side(OrderSide::Buy);

    println!("{}", format!("--- Pending orders ({}) ---", market).yellow());
    match client.list_pending_orders(&query).await {
        Ok(orders) => print_orders(&orders),
        Err(e) => report(&e),
    }
    println!();

    println!("{}", format!("--- Finished orders ({}) ---", market).yellow());
    match client.list_finished_orders(&query).await {
        Ok(orders) => print_orders(&orders),
        Err(e) => report(&e),
    }

    Ok(())
}

fn print_orders(orders: &[coinex_rest::SpotOrder]) {
    if orders.is_empty() {
        println!("  (none)");
        return;
    }
    for order in orders {
        let created = order
            .created_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!(
            "  #{:<14} {:<4} {:<6} {} @ {}  filled={}  {}",
            order.order_id,
            order.side,
            order.order_type,
            order.amount,
            order.price,
            order.filled_amount,
            created.dimmed()
        );
    }
}

fn report(err: &RestError) {
    let hint = if err.is_retryable() {
        "retryable".yellow()
    } else {
        "not retryable".red()
    };
    println!("  {} {} ({})", "✗".red(), err, hint);
}
