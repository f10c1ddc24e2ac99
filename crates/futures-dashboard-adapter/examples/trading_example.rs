/*
[INPUT]:  API credentials from the environment and order parameters
[OUTPUT]: Account summary and order placement/cancellation results
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use futures_dashboard_adapter::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Example: Trading operations on the test network
///
/// Reads `FUTURES_API_KEY` and `FUTURES_SECRET_KEY`; places a far-from-market
/// limit order and cancels it again.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Futures Trading Example ===\n");

    let (api_key, secret_key) = match (
        std::env::var("FUTURES_API_KEY"),
        std::env::var("FUTURES_SECRET_KEY"),
    ) {
        (Ok(key), Ok(secret)) => (key, secret),
        _ => {
            eprintln!("Set FUTURES_API_KEY and FUTURES_SECRET_KEY to run this example");
            return;
        }
    };

    let session = match SessionManager::with_config(ClientConfig::default()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    if !session.login(Credentials::new(api_key, secret_key, true)).await {
        eprintln!("✗ Credentials rejected by the test network");
        return;
    }
    println!("✓ Logged in to {}", session.client().current_base_url());

    let client = session.client();

    match client.get_account().await {
        Ok(account) => println!(
            "✓ Wallet {} / available {}",
            account.total_wallet_balance, account.available_balance
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    let symbol = "BTCUSDT";
    let qty = Decimal::new(1, 2);
    let price = Decimal::from(10_000);

    println!("\nPlacing limit buy {} {} @ {}...", qty, symbol, price);
    let order = match client
        .place_order(NewOrderRequest::limit(symbol, Side::Buy, qty, price))
        .await
    {
        Ok(order) => {
            println!("✓ Order {} is {:?}", order.order_id, order.status);
            order
        }
        Err(e) => {
            println!("✗ Error: {}", e);
            session.logout();
            return;
        }
    };

    println!("\nCancelling order {}...", order.order_id);
    match client.cancel_order(symbol, order.order_id).await {
        Ok(canceled) => println!("✓ Order {} is {:?}", canceled.order_id, canceled.status),
        Err(e) => println!("✗ Error: {}", e),
    }

    session.logout();
    println!("\n✓ Trading example complete");
}
