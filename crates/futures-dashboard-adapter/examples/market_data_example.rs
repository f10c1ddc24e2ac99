/*
[INPUT]:  Symbol identifier (e.g., "BTCUSDT")
[OUTPUT]: Market data (price, depth, 24h statistics, klines)
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use futures_dashboard_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: Query market data (no credentials required)
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Futures Market Data Example ===\n");

    let client = match FuturesClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created, routing to {}\n", client.current_base_url());

    let symbol = "BTCUSDT";

    println!("Querying price for {}...", symbol);
    match client.get_ticker_price(symbol).await {
        Ok(ticker) => println!("✓ Price: {}", ticker.price),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying 24h statistics for {}...", symbol);
    match client.get_24hr_ticker(symbol).await {
        Ok(stats) => println!(
            "✓ Last {} ({}%), high {}, low {}",
            stats.last_price, stats.price_change_percent, stats.high_price, stats.low_price
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying depth book for {}...", symbol);
    match client.get_order_book(symbol, 5).await {
        Ok(book) => {
            for (bid, ask) in book.bids.iter().zip(book.asks.iter()) {
                println!(
                    "  {} @ {}  |  {} @ {}",
                    bid.quantity(),
                    bid.price(),
                    ask.quantity(),
                    ask.price()
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying hourly klines for {}...", symbol);
    match client.get_klines(symbol, KlineInterval::OneHour, 3).await {
        Ok(klines) => {
            for k in klines {
                println!("  {} O {} H {} L {} C {}", k.open_time, k.open, k.high, k.low, k.close);
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
