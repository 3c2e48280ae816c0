//! Capacity table — recommendations for every capable-host count.
//!
//! Cluster health fluctuates: the number of capable hosts k moves while
//! n, the budget, and the SLA stay put.  This prints, for every k from 1
//! to n, the most parallel feasible configuration and the minimal probe
//! count that sustains it — a lookup table an operator (or an autoscaler)
//! can index by the live k.
//!
//! Run with:
//!   cargo run --example capacity_table

use fanout::{sweep_all_k, PlacementModel};

fn main() {
    let n = 100; // total hosts
    let s_max = 20; // largest agent count worth tabulating
    let budget = 100; // total probes across all agents
    let target_epsilon = 0.1;

    println!(
        "Combinatorial analysis: n = {n}, budget = {budget}, max allowed epsilon = {target_epsilon}"
    );
    println!("{}", "*".repeat(66));
    println!("Format of the table below is:\nk s d estimated_decline_ratio [Note]\n");

    let model = PlacementModel::new(s_max as usize).expect("s_max >= 2");
    let rows = sweep_all_k(&model, n, s_max, budget, target_epsilon).expect("valid sweep inputs");

    for row in rows {
        if row.feasible {
            println!("{} {} {} {:.4}", row.k, row.s, row.d, row.epsilon);
        } else {
            println!(
                "{} {} {} {:.4}  Cannot provide SLA guarantees even with s=1",
                row.k, row.s, row.d, row.epsilon
            );
        }
    }
}
