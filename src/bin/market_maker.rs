//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Synthetic order flow generator: one OS thread per symbol, each submitting
// randomized limit orders biased toward the current best bid/ask and
// occasionally cancelling one of its own resting orders. Demonstrates the
// concurrency envelope described by the core crate (multiple producers,
// one lock per book, no cross-book contention).
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use rand::Rng;
use tracing::{info, warn};

use pricetime_engine::{Config, MultiBook, OrderId, Side};

#[derive(Parser, Debug)]
struct Args {
    /// Number of orders each bot submits before exiting. 0 runs forever.
    #[arg(long, default_value_t = 0)]
    max_orders: u64,

    /// Half-width, in ticks, of the random walk around the best quote.
    #[arg(long, default_value_t = 15)]
    range_width: i64,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
}

fn run_bot(multi_book: Arc<MultiBook>, symbol: String, range_width: i64, max_orders: u64) {
    let mut rng = rand::thread_rng();
    let mut active_orders: Vec<OrderId> = Vec::new();
    let mut placed = 0u64;

    loop {
        if max_orders != 0 && placed >= max_orders {
            break;
        }

        let anchor = multi_book
            .ltp(&symbol)
            .ok()
            .flatten()
            .unwrap_or(100);
        let side = if rng.r#gen::<bool>() { Side::Bid } else { Side::Ask };
        let offset = rng.gen_range(-range_width..=range_width);
        let price = (anchor + offset).max(1);
        let quantity = rng.gen_range(1..=20) as u64;

        match multi_book.submit(&symbol, side, price, quantity) {
            Ok(id) => {
                info!(%symbol, %id, ?side, price, quantity, "placed");
                active_orders.push(id);
                placed += 1;
            }
            Err(err) => warn!(%symbol, %err, "submit failed"),
        }

        if active_orders.len() > 3 && rng.r#gen::<f64>() < 0.3 {
            let index = rng.gen_range(0..active_orders.len());
            let id = active_orders.swap_remove(index);
            if multi_book.cancel(&symbol, id).is_ok() {
                info!(%symbol, %id, "cancelled");
            }
        }

        thread::sleep(Duration::from_millis(rng.gen_range(1000..=3000)));
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::from_env();
    let multi_book = Arc::new(MultiBook::seeded(config.symbols.clone()));

    let handles: Vec<_> = config
        .symbols
        .iter()
        .map(|(symbol, _)| {
            let multi_book = multi_book.clone();
            let symbol = symbol.clone();
            let range_width = args.range_width;
            let max_orders = args.max_orders;
            thread::spawn(move || run_bot(multi_book, symbol, range_width, max_orders))
        })
        .collect();

    for handle in handles {
        handle.join().expect("market maker thread panicked");
    }
    Ok(())
}
