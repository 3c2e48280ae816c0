//! `fanout`: closed-form sizing for sampling-based distributed schedulers.
//!
//! Designed for the capacity question behind probe-based scheduling: you run
//! `s` independent scheduling agents, each of which probes `d` candidate
//! worker hosts before placing a task.  More agents means more parallelism,
//! but also more placement collisions; more probes per agent means better
//! placement, but probes are a shared budget.  Given the cluster size `n`,
//! the number of currently capable hosts `k`, a total probe budget, and an
//! SLA bound on the request degradation rate, `fanout` finds the
//! configuration `(s, d)` with the largest `s` that still meets the SLA.
//!
//! Everything is evaluated in closed form — no simulation, no sampling:
//!
//! - An agent is **potentially happy** if at least one of its `d` probes
//!   lands on a capable host; this happens with probability
//!   `sigma = 1 − ((n−k)/n)^d`, and the number of potentially happy agents
//!   is `Binomial(s, sigma)`.
//! - A potentially happy agent is **happy** if it also wins its placement
//!   (no other agent claimed the same host first).  The conditional
//!   expectation `E[H_s | F_s = f]` of happy agents is evaluated exactly
//!   from a precomputed combinatorial [`WeightTable`] — the balls-and-bins
//!   occupancy analysis in table form.
//! - The expected degradation rate is `epsilon = 1 − E[H_s] / s`, the
//!   fraction of agents whose request misses the SLA.
//!
//! **Goals:**
//! - **Deterministic**: same parameters → same answer, bit for bit.
//! - **Total over the interesting domain**: degenerate inputs (no capable
//!   hosts, zero probes, more agents than the table covers) evaluate to
//!   `epsilon = 1` instead of failing mid-sweep.
//! - **Typed errors**: domain violations surface as [`Error`] values, so a
//!   batch driver sweeping many `(n, k, budget)` combinations can skip one
//!   bad combination without dying.
//! - **Audit-friendly**: the sweep returns every configuration it examined
//!   and a typed stop record, not just the winner.
//!
//! **Non-goals:**
//! - Not a scheduler: nothing is placed, probed, or measured here.
//! - No persistence, no I/O — this is an offline what-if calculator.
//!
//! # Example
//!
//! ```rust
//! use fanout::{sweep_max_parallelism, PlacementModel, SweepConfig};
//!
//! // Tabulate up to 200 agents, then size a 1000-host cluster with 200
//! // capable hosts, a 1000-probe budget, and a 10% degradation SLA.
//! let model = PlacementModel::new(200).unwrap();
//! let cfg = SweepConfig::new(1000, 200, 1000, 0.1, 200);
//! let decision = sweep_max_parallelism(&model, &cfg).unwrap();
//!
//! let (s, d) = decision.best_pair();
//! assert!(s >= 1, "this cluster supports at least one agent");
//! assert_eq!(d, 1000 / s);
//! // Every recorded feasible step met the SLA.
//! assert!(decision
//!     .rows
//!     .iter()
//!     .filter(|r| r.feasible)
//!     .all(|r| r.epsilon <= 0.1));
//! ```
//!
//! # Model background
//!
//! The two-round structure (probe a small random sample, then place on the
//! best probed host) is the "power of d choices" paradigm: Azar, Broder,
//! Karlin & Upfal, *Balanced Allocations* (SICOMP 1999) and Mitzenmacher,
//! *The Power of Two Choices in Randomized Load Balancing* (IEEE TPDS
//! 2001).  Running many such samplers in parallel without coordination is
//! the sampling-based distributed scheduler design of Ousterhout, Wendell,
//! Zaharia & Stoica, *Sparrow* (SOSP 2013) — the collision losses between
//! uncoordinated agents are exactly what the conditional expectation here
//! prices in.
//!
//! The conditional expectation reduces to classic occupancy: for `f ≤ k`
//! potentially happy agents, `E[H_s | F_s = f] = k·(1 − (1 − 1/k)^f)`, the
//! expected number of occupied bins after throwing `f` balls into `k`
//! bins.  The [`WeightTable`] evaluates this exactly through an integer
//! recurrence rather than a floating power, keeping the per-`h`
//! decomposition available (see [`expected_happy`]).
//!
//! # Precision
//!
//! All arithmetic is `f64`.  Table cells grow like `b^a`, so the far
//! corner of a large table overflows to `+∞` once `a·ln(b)` passes ~709
//! (roughly `M ≳ 140`); overflowed cells are never NaN and are not
//! consumed at the agent counts where they could matter.  The falling
//! factorial inside [`expected_happy`] outgrows `f64` when `f` comes
//! within ~150 of a large `k`; there the estimator switches to the
//! algebraically identical occupancy form, so expectations stay finite
//! for every valid `(k, f)`.  Keep `M` moderate (≤ ~100) if you need
//! every table cell finite.

#![forbid(unsafe_code)]

mod analytic;
pub use analytic::*;

mod binom;
pub use binom::*;

mod happy;
pub use happy::*;

mod model;
pub use model::*;

mod sweep;
pub use sweep::*;

mod table;
pub use table::*;

/// Domain errors for table construction, estimation, and evaluation.
///
/// All variants are precondition violations on numeric inputs, detected
/// before any computation proceeds.  They are recoverable by design: a
/// caller sweeping many parameter combinations can skip a bad one and
/// continue.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// A weight table must tabulate at least two agents.
    #[error("weight table must cover at least 2 agents (got {m})")]
    TableTooSmall { m: usize },

    /// Conditioning on more potentially happy agents than the table covers.
    #[error("{f} potentially happy agents exceed the tabulated range {m}")]
    TableExceeded { f: u64, m: usize },

    /// There cannot be more potentially happy agents than capable hosts.
    #[error("cannot have more than {k} potentially happy agents (got {f})")]
    AgentsExceedCapable { f: u64, k: u64 },

    /// Capable hosts cannot outnumber the cluster.
    #[error("capable hosts exceed cluster size ({k} > {n})")]
    CapableExceedTotal { k: u64, n: u64 },

    /// Agent count outside the model's domain (`1..=n`).
    #[error("agent count {s} outside the valid range 1..={n}")]
    AgentCountOutOfRange { s: u64, n: u64 },

    /// The analytic probe bound is undefined for an empty or saturated
    /// cluster.
    #[error("analytic bound requires 0 < k < n (got k = {k}, n = {n})")]
    DegenerateCapacity { k: u64, n: u64 },
}
