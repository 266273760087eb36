//! Workload driver: parallel workers issuing a randomized mix of stock
//! and customer interactions, with aggregated throughput and latency
//! reporting.

pub mod config;
pub mod driver;
pub mod generator;
pub mod worker;

pub use config::WorkloadConfig;
pub use driver::{aggregate, run, seed_catalog, WorkloadMetrics};
pub use generator::BookSetGenerator;
pub use worker::{Worker, WorkerRunResult};
