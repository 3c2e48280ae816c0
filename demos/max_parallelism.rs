//! Max parallelism — size one cluster in a dozen lines.
//!
//! A 1000-host cluster with 200 capable hosts, a probe budget of 1000,
//! and an SLA allowing 10% degraded requests: how many scheduling agents
//! can run in parallel, and how many probes does each get?
//!
//! Run with:
//!   cargo run --example max_parallelism

use fanout::{sweep_max_parallelism, PlacementModel, StopReason, SweepConfig};

fn main() {
    // -----------------------------------------------------------------
    // 1. Fix the cluster and the SLA.
    // -----------------------------------------------------------------
    let n = 1000; // total hosts
    let k = 200; // hosts with enough free resources right now
    let budget = 1000; // total probes across all agents
    let target_epsilon = 0.1; // acceptable degradation rate

    println!(
        "Combinatorial analysis: n = {n}, k = {k}, budget = {budget}, max allowed epsilon = {target_epsilon}"
    );
    println!("{}", "*".repeat(86));

    // -----------------------------------------------------------------
    // 2. Build the model once, then sweep s upward.
    // -----------------------------------------------------------------
    // The table covers agent counts up to k: more agents than capable
    // hosts can never all be happy.
    let model = PlacementModel::new(k as usize).expect("k >= 2");
    let cfg = SweepConfig::new(n, k, budget, target_epsilon, k);
    let decision = sweep_max_parallelism(&model, &cfg).expect("k <= n");

    for row in decision.rows.iter().filter(|r| r.feasible) {
        println!("s = {} d = {} epsilon = {:.4}", row.s, row.d, row.epsilon);
    }

    // -----------------------------------------------------------------
    // 3. Report the winner (or the lack of one).
    // -----------------------------------------------------------------
    match decision.best {
        Some(plan) => println!(
            "Maximum possible parallelism for this system: s = {}, d = {}",
            plan.s, plan.d
        ),
        None => println!("Cannot provide SLA guarantees even with s=1"),
    }

    if let Some(stop) = decision.stop {
        match stop.reason {
            StopReason::SlaExceeded { epsilon } => println!(
                "(stopped at s = {}: epsilon {:.4} exceeds the target)",
                stop.s, epsilon
            ),
            StopReason::Invalid(err) => println!("(stopped at s = {}: {})", stop.s, err),
        }
    }
}
