use bookstall::workload::{run, WorkloadConfig};
use bookstall::StoreBuilder;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_CYAN: &str = "\x1b[36m";

fn main() -> bookstall::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let num_workers = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(num_cpus::get);

    let num_actual_runs = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(500);

    let warm_up_runs = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(100);

    let lock_mode = args.get(4).map(|s| s.as_str()).unwrap_or("two-level");
    let single_lock = matches!(lock_mode, "single" | "single-lock");

    let config = WorkloadConfig {
        num_workers,
        num_actual_runs,
        warm_up_runs,
        ..WorkloadConfig::default()
    };

    println!(
        "{}=== Bookstall Workload Driver ==={}",
        ANSI_BOLD, ANSI_RESET
    );
    println!(
        "{}Lock Discipline:{} {}",
        ANSI_CYAN,
        ANSI_RESET,
        if single_lock { "single global lock" } else { "two-level" }
    );
    println!("{}Workers:{} {}", ANSI_GREEN, ANSI_RESET, num_workers);
    println!(
        "{}Runs per Worker:{} {} ({} warm-up)",
        ANSI_GREEN, ANSI_RESET, num_actual_runs, warm_up_runs
    );
    println!(
        "{}Interaction Mix:{} {:.0}% rare stock / {:.0}% frequent stock / {:.0}% customer",
        ANSI_GREEN,
        ANSI_RESET,
        config.percent_rare_stock_manager,
        config.percent_frequent_stock_manager,
        config.percent_frequent_bookstore
    );
    println!();

    let (client, stock) = StoreBuilder::new().single_lock(single_lock).build();

    println!("{}Running workload...{}", ANSI_YELLOW, ANSI_RESET);
    let metrics = run(&config, client, stock)?;

    println!();
    println!("{}{}{}", ANSI_BOLD, metrics.format(), ANSI_RESET);

    if metrics.success_rate < 99.0 {
        println!(
            "\n{}WARNING:{} success rate below 99% - too many failed interactions",
            ANSI_YELLOW, ANSI_RESET
        );
    }

    Ok(())
}
