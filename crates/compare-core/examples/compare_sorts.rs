//! Compare synthetic timings for three sort implementations
//!
//! Usage: cargo run -p compare-core --example compare_sorts

use anyhow::Result;
use compare_core::{Baselines, ComparisonRun, EvalFn, Evaluate, Group, GroupOptions};
use serde_json::json;

/// Deterministic jitter so the demo produces realistic-looking noise.
fn series(base: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| base * (1.0 + 0.03 * (((i * 7919) % 13) as f64 - 6.0) / 6.0))
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let sorted = json!([1, 2, 3, 5, 8]);
    let defs: Vec<(String, Box<dyn Evaluate>)> = vec![
        (
            "std_sort".to_string(),
            Box::new(EvalFn({
                let v = sorted.clone();
                move |_: &GroupOptions| v.clone()
            })),
        ),
        (
            "insertion".to_string(),
            Box::new(EvalFn({
                let v = sorted.clone();
                move |_: &GroupOptions| v.clone()
            })),
        ),
        (
            "bubble".to_string(),
            Box::new(EvalFn(move |_: &GroupOptions| sorted.clone())),
        ),
    ];

    let group = Group::new(defs, GroupOptions::default())?;
    let timings = vec![series(1.0, 40), series(4.5, 40), series(9.0, 40)];
    let overhead = Baselines::Shared(series(0.2, 40));

    let run = ComparisonRun::new(group, timings, overhead)?;

    println!("{}", run.ranked_report()?);
    println!();
    println!("Summaries: {}", serde_json::to_string_pretty(&run.summaries())?);

    let path = run.export(std::env::temp_dir().join("compare_sorts.csv"))?;
    println!("Raw samples written to {}", path.display());

    Ok(())
}
