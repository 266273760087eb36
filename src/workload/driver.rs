use std::collections::HashSet;
use std::thread;

use crossbeam_channel::bounded;

use crate::core::book::StockBook;
use crate::core::store::{SharedBookStore, SharedStockManager};
use crate::error::Result;

use super::config::WorkloadConfig;
use super::generator::BookSetGenerator;
use super::worker::{Worker, WorkerRunResult};

/// Metrics aggregated across every worker of one driver run.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadMetrics {
    pub num_workers: usize,
    pub total_interactions: usize,
    pub successful_interactions: usize,
    pub total_customer_interactions: usize,
    pub successful_customer_interactions: usize,
    /// Share of interactions that succeeded, in percent.
    pub success_rate: f64,
    /// Share of interactions that were customer interactions, in percent.
    pub customer_interaction_ratio: f64,
    /// Successful customer interactions per second.
    pub throughput: f64,
    /// Average time per successful customer interaction, in milliseconds.
    pub average_latency_ms: f64,
}

impl WorkloadMetrics {
    /// Format the metrics as a human-readable report
    pub fn format(&self) -> String {
        format!(
            "=== Workload Metrics ===\n\
            Workers: {}\n\
            Interactions: {} ({} successful)\n\
            Success Rate: {:.2}%\n\
            Customer Interactions: {:.2}%\n\
            Throughput: {:.2} successful customer interactions/sec\n\
            Average Latency: {:.3} ms",
            self.num_workers,
            self.total_interactions,
            self.successful_interactions,
            self.success_rate,
            self.customer_interaction_ratio,
            self.throughput,
            self.average_latency_ms
        )
    }
}

/// Seed the catalog with generated titles before the workers start.
///
/// Candidates colliding with ISBNs already in stock are filtered out, so
/// seeding an already-populated store is safe.
pub fn seed_catalog(stock_manager: &SharedStockManager, num_books: usize) -> Result<()> {
    let generator = BookSetGenerator::new();
    let current_isbns: HashSet<i32> = stock_manager
        .get_books()?
        .iter()
        .map(|book| book.isbn)
        .collect();

    let books_to_add: Vec<StockBook> = generator
        .next_stock_books(num_books)
        .into_iter()
        .filter(|book| !current_isbns.contains(&book.isbn))
        .collect();

    if !books_to_add.is_empty() {
        stock_manager.add_books(&books_to_add)?;
    }
    Ok(())
}

/// Run the configured workload: seed the catalog, run `num_workers` workers
/// in parallel, and aggregate their counters.
pub fn run(
    config: &WorkloadConfig,
    book_store: SharedBookStore,
    stock_manager: SharedStockManager,
) -> Result<WorkloadMetrics> {
    config.validate()?;
    seed_catalog(&stock_manager, config.seed_books)?;

    let (sender, receiver) = bounded(config.num_workers);
    let mut handles = Vec::with_capacity(config.num_workers);

    for _ in 0..config.num_workers {
        let worker = Worker::new(config.clone(), book_store.clone(), stock_manager.clone());
        let sender = sender.clone();
        handles.push(thread::spawn(move || {
            let _ = sender.send(worker.run());
        }));
    }
    drop(sender);

    let results: Vec<WorkerRunResult> = receiver.iter().collect();
    for handle in handles {
        let _ = handle.join();
    }

    Ok(aggregate(&results))
}

/// Aggregate per-worker counters into the driver's reported metrics.
pub fn aggregate(results: &[WorkerRunResult]) -> WorkloadMetrics {
    let mut successful_interactions = 0usize;
    let mut total_interactions = 0usize;
    let mut successful_customer = 0usize;
    let mut total_customer = 0usize;
    let mut total_time_ns = 0u64;

    for result in results {
        successful_interactions += result.successful_interactions;
        total_interactions += result.total_runs;
        successful_customer += result.successful_customer_interactions;
        total_customer += result.total_customer_interactions;
        total_time_ns += result.elapsed_ns;
    }

    // Workers run in parallel, so the wall-clock denominator is the average
    // worker time, not the sum.
    let average_time_s = if results.is_empty() {
        0.0
    } else {
        total_time_ns as f64 / (1e9 * results.len() as f64)
    };

    let throughput = if average_time_s > 0.0 {
        successful_customer as f64 / average_time_s
    } else {
        0.0
    };

    let average_latency_ms = if successful_customer > 0 {
        (total_time_ns as f64 / 1e6) / successful_customer as f64
    } else {
        0.0
    };

    let success_rate = if total_interactions > 0 {
        successful_interactions as f64 * 100.0 / total_interactions as f64
    } else {
        0.0
    };

    let customer_interaction_ratio = if total_interactions > 0 {
        total_customer as f64 * 100.0 / total_interactions as f64
    } else {
        0.0
    };

    WorkloadMetrics {
        num_workers: results.len(),
        total_interactions,
        successful_interactions,
        total_customer_interactions: total_customer,
        successful_customer_interactions: successful_customer,
        success_rate,
        customer_interaction_ratio,
        throughput,
        average_latency_ms,
    }
}
