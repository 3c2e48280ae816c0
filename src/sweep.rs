//! Parameter sweep: find the most parallel configuration that meets the
//! SLA and the probe budget.
//!
//! The sweep walks `s = 1, 2, …` with `d = budget / s`, so the probe
//! budget is always respected by construction and parallelism grows until
//! the degradation bound gives out.  The decision it returns is
//! audit-friendly: every examined configuration is recorded as a
//! [`SweepRow`] (serde-ready under the `serde` feature, for harnesses
//! that log sweeps), and the cause of the stop is a typed [`SweepStop`]
//! rather than a missing row.

use crate::{Error, PlacementModel};

/// How the sweep treats the first configuration that misses the SLA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepMode {
    /// Stop at the first `s` whose epsilon exceeds the target.
    ///
    /// Exact when `epsilon(s, budget/s)` is non-decreasing in `s` —
    /// which holds in practice but is not proven; use
    /// [`SweepMode::Exhaustive`] to verify on a given parameter region.
    #[default]
    FirstViolation,
    /// Evaluate every `s` up to `s_max` and keep the largest feasible
    /// one, skipping infeasible steps instead of stopping.
    Exhaustive,
}

/// Inputs for one sweep: the cluster, the budget, and the SLA.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    /// Total hosts in the cluster.
    pub n: u64,
    /// Hosts currently capable of accepting a task (`k ≤ n`).
    pub k: u64,
    /// Total probe budget; each candidate uses `d = budget / s` probes
    /// per agent.
    pub budget: u64,
    /// Maximum tolerable degradation rate, in `[0, 1]`.
    pub target_epsilon: f64,
    /// Largest agent count to try.  Values beyond the model's tabulated
    /// range evaluate as infeasible (epsilon 1.0).
    pub s_max: u64,
    /// Stopping behavior.
    pub mode: SweepMode,
    /// After the best `s` is found, also minimize `d` at that `s` while
    /// the SLA still holds.  Off by default: the sweep then reports the
    /// plain budget split `d = budget / s`.
    pub trim_probes: bool,
}

impl SweepConfig {
    /// Config with the default mode ([`SweepMode::FirstViolation`]) and
    /// no probe trimming.
    pub fn new(n: u64, k: u64, budget: u64, target_epsilon: f64, s_max: u64) -> Self {
        Self {
            n,
            k,
            budget,
            target_epsilon,
            s_max,
            mode: SweepMode::default(),
            trim_probes: false,
        }
    }
}

/// A scheduler configuration: `s` agents, `d` probes per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    /// Number of independent scheduling agents.
    pub s: u64,
    /// Probes per agent.
    pub d: u64,
}

/// One examined configuration — a compact, log-ready record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepRow {
    pub s: u64,
    pub d: u64,
    /// Expected degradation rate at `(s, d)`.
    pub epsilon: f64,
    /// Whether `epsilon ≤ target_epsilon`.
    pub feasible: bool,
}

/// Why the sweep ended before exhausting `s_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason {
    /// The step's epsilon exceeded the target.
    SlaExceeded { epsilon: f64 },
    /// The step could not be evaluated (e.g. `s` grew past the number of
    /// capable hosts).  Earlier feasible steps are unaffected.
    Invalid(Error),
}

/// The step at which the sweep stopped, and why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepStop {
    pub s: u64,
    pub d: u64,
    pub reason: StopReason,
}

/// Output of [`sweep_max_parallelism`]: the winner plus the full audit
/// trail.
#[derive(Debug, Clone)]
pub struct SweepDecision {
    /// Every configuration examined, in sweep order.  In
    /// [`SweepMode::FirstViolation`] at most the last row is infeasible;
    /// in [`SweepMode::Exhaustive`] infeasible rows may appear anywhere.
    pub rows: Vec<SweepRow>,
    /// Best feasible configuration, if any.  With `trim_probes` set this
    /// carries the trimmed `d`, which can be smaller than the
    /// corresponding row's.
    pub best: Option<Plan>,
    /// Present when the sweep ended before `s_max`.
    pub stop: Option<SweepStop>,
    /// The config used to compute this decision.
    pub config: SweepConfig,
}

impl SweepDecision {
    /// The best `(s, d)` pair, or the `(0, 0)` sentinel when no
    /// configuration was feasible.
    pub fn best_pair(&self) -> (u64, u64) {
        self.best.map(|p| (p.s, p.d)).unwrap_or((0, 0))
    }
}

/// Sweep `s` upward and return the most parallel feasible configuration.
///
/// For each `s` the candidate probe count is `d = budget / s`, so every
/// candidate respects the budget.  Feasible steps are recorded as the
/// running best (larger `s` always wins — the sweep is ascending); the
/// handling of the first miss depends on [`SweepConfig::mode`].
///
/// Fails upfront with [`Error::CapableExceedTotal`] if `k > n`.  A step
/// that cannot be evaluated ends the sweep with a typed
/// [`StopReason::Invalid`] instead of an error, so the feasible prefix is
/// never lost.
///
/// # Example
///
/// ```rust
/// use fanout::{sweep_max_parallelism, PlacementModel, SweepConfig};
///
/// let model = PlacementModel::new(16).unwrap();
/// // Tight SLA with half the cluster down: only modest parallelism fits.
/// let cfg = SweepConfig::new(100, 50, 120, 0.05, 16);
/// let decision = sweep_max_parallelism(&model, &cfg).unwrap();
/// assert!(decision.rows.iter().take_while(|r| r.feasible).count() >= 1);
/// ```
pub fn sweep_max_parallelism(
    model: &PlacementModel,
    cfg: &SweepConfig,
) -> Result<SweepDecision, Error> {
    if cfg.k > cfg.n {
        return Err(Error::CapableExceedTotal { k: cfg.k, n: cfg.n });
    }

    let mut rows: Vec<SweepRow> = Vec::new();
    let mut best: Option<Plan> = None;
    let mut stop: Option<SweepStop> = None;

    for s in 1..=cfg.s_max {
        let d = cfg.budget / s;
        match model.epsilon(cfg.n, cfg.k, s, d) {
            Ok(epsilon) => {
                let feasible = epsilon <= cfg.target_epsilon;
                rows.push(SweepRow {
                    s,
                    d,
                    epsilon,
                    feasible,
                });
                if feasible {
                    best = Some(Plan { s, d });
                } else if cfg.mode == SweepMode::FirstViolation {
                    stop = Some(SweepStop {
                        s,
                        d,
                        reason: StopReason::SlaExceeded { epsilon },
                    });
                    break;
                }
            }
            Err(err) => {
                // The model's domain ends here (and stays ended for every
                // larger s, since k and n are fixed): stop either way.
                stop = Some(SweepStop {
                    s,
                    d,
                    reason: StopReason::Invalid(err),
                });
                break;
            }
        }
    }

    if cfg.trim_probes {
        if let Some(plan) = best.as_mut() {
            *plan = trim_probes(model, cfg, *plan);
        }
    }

    Ok(SweepDecision {
        rows,
        best,
        stop,
        config: *cfg,
    })
}

/// Minimize `d` at a fixed `s` while the SLA still holds.
fn trim_probes(model: &PlacementModel, cfg: &SweepConfig, mut plan: Plan) -> Plan {
    while plan.d > 0 {
        match model.epsilon(cfg.n, cfg.k, plan.s, plan.d - 1) {
            Ok(eps) if eps <= cfg.target_epsilon => plan.d -= 1,
            _ => break,
        }
    }
    plan
}

/// Recommendation for one value of `k` in [`sweep_all_k`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityRow {
    /// Capable-host count this row describes.
    pub k: u64,
    /// Maximal feasible agent count (0 when even `s = 1` misses the SLA).
    pub s: u64,
    /// Trimmed probes per agent at that `s` (the full `budget` for
    /// infeasible rows).
    pub d: u64,
    /// Expected degradation at the reported `(s, d)` (for infeasible
    /// rows: the epsilon that blocked `s = 1`).
    pub epsilon: f64,
    pub feasible: bool,
}

/// Capacity table: for every `k` in `1..=n`, the maximal feasible `s` and
/// the minimal `d` sustaining it.
///
/// Exploits monotonicity in `k`: a configuration feasible with `k` capable
/// hosts stays feasible with more, so the running `s` carries over from
/// one `k` to the next and the whole table costs little more than a
/// single sweep.  Unlike [`sweep_max_parallelism`], the reported `d` is
/// always trimmed to the smallest value that still meets the SLA — this
/// table is a per-`k` recommendation, not a budget split.
///
/// A step that cannot be evaluated (the model's domain ends at `s = k`)
/// just stops that `k`'s growth; the batch continues with the next `k`.
pub fn sweep_all_k(
    model: &PlacementModel,
    n: u64,
    s_max: u64,
    budget: u64,
    target_epsilon: f64,
) -> Result<Vec<CapacityRow>, Error> {
    let mut rows: Vec<CapacityRow> = Vec::with_capacity(n as usize);
    let mut s = 0u64;

    for k in 1..=n {
        // Epsilon of the first rejected step, reported on s = 0 rows.
        let mut blocking_eps = 1.0_f64;
        while s < s_max {
            let cand = s + 1;
            match model.epsilon(n, k, cand, budget / cand) {
                Ok(eps) if eps <= target_epsilon => s = cand,
                Ok(eps) => {
                    blocking_eps = eps;
                    break;
                }
                Err(_) => break,
            }
        }

        if s == 0 {
            rows.push(CapacityRow {
                k,
                s: 0,
                d: budget,
                epsilon: blocking_eps,
                feasible: false,
            });
            continue;
        }

        let mut d = budget / s;
        while d > 0 {
            match model.epsilon(n, k, s, d - 1) {
                Ok(eps) if eps <= target_epsilon => d -= 1,
                _ => break,
            }
        }
        let epsilon = model.epsilon(n, k, s, d)?;
        rows.push(CapacityRow {
            k,
            s,
            d,
            epsilon,
            feasible: true,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> PlacementModel {
        PlacementModel::new(12).unwrap()
    }

    #[test]
    fn impossible_target_yields_no_plan() {
        let m = model();
        // budget 10 → d = 10 at s = 1, and (1/2)^10 is comfortably above
        // the f64 granularity of sigma, so epsilon stays strictly positive.
        let cfg = SweepConfig::new(100, 50, 10, 0.0, 12);
        let d = sweep_max_parallelism(&m, &cfg).unwrap();
        assert_eq!(d.best_pair(), (0, 0));
        assert!(d.best.is_none());
        assert_eq!(d.rows.len(), 1);
        assert!(!d.rows[0].feasible);
        assert!(matches!(
            d.stop,
            Some(SweepStop {
                s: 1,
                reason: StopReason::SlaExceeded { .. },
                ..
            })
        ));
    }

    #[test]
    fn feasible_rows_are_a_contiguous_ascending_prefix() {
        let m = model();
        let cfg = SweepConfig::new(50, 25, 200, 0.5, 10);
        let d = sweep_max_parallelism(&m, &cfg).unwrap();
        assert!(d.best.is_some());
        for (i, row) in d.rows.iter().enumerate() {
            assert_eq!(row.s, i as u64 + 1);
            assert_eq!(row.d, 200 / row.s);
        }
        let (s, _) = d.best_pair();
        let last_feasible = d.rows.iter().filter(|r| r.feasible).last().unwrap();
        assert_eq!(last_feasible.s, s);
    }

    #[test]
    fn domain_end_is_a_stop_record_not_an_error() {
        let m = model();
        // target 1.0 makes every evaluable step feasible, so the sweep
        // runs until s outgrows the k = 3 capable hosts.
        let cfg = SweepConfig::new(10, 3, 100, 1.0, 5);
        let d = sweep_max_parallelism(&m, &cfg).unwrap();
        assert_eq!(d.best_pair(), (3, 33));
        assert!(matches!(
            d.stop,
            Some(SweepStop {
                s: 4,
                reason: StopReason::Invalid(Error::AgentsExceedCapable { .. }),
                ..
            })
        ));
    }

    #[test]
    fn mismatched_cluster_is_rejected_upfront() {
        let m = model();
        let cfg = SweepConfig::new(10, 20, 100, 0.5, 5);
        assert!(matches!(
            sweep_max_parallelism(&m, &cfg),
            Err(Error::CapableExceedTotal { k: 20, n: 10 })
        ));
    }

    #[test]
    fn trimming_minimizes_probes_at_the_chosen_s() {
        let m = model();
        let mut cfg = SweepConfig::new(100, 50, 100, 0.26, 1);
        cfg.trim_probes = true;
        let d = sweep_max_parallelism(&m, &cfg).unwrap();
        // (1/2)^2 = 0.25 ≤ 0.26 but (1/2)^1 = 0.5 > 0.26: two probes.
        assert_eq!(d.best_pair(), (1, 2));
        // The audit row keeps the untrimmed budget split.
        assert_eq!(d.rows[0].d, 100);
    }

    #[test]
    fn exhaustive_mode_agrees_on_monotone_instances() {
        let m = model();
        let fv = SweepConfig::new(60, 30, 120, 0.3, 12);
        let ex = SweepConfig {
            mode: SweepMode::Exhaustive,
            ..fv
        };
        let a = sweep_max_parallelism(&m, &fv).unwrap();
        let b = sweep_max_parallelism(&m, &ex).unwrap();
        assert_eq!(a.best_pair(), b.best_pair());
        // Exhaustive examined at least as much.
        assert!(b.rows.len() >= a.rows.len());
    }

    #[test]
    fn all_k_table_is_monotone_and_feasible() {
        let m = model();
        let rows = sweep_all_k(&m, 30, 12, 60, 0.2).unwrap();
        assert_eq!(rows.len(), 30);
        let mut prev_s = 0;
        for row in &rows {
            assert!(row.s >= prev_s, "s must not shrink as k grows");
            prev_s = row.s;
            if row.feasible {
                assert!(row.s >= 1);
                assert!(row.d >= 1, "trimming keeps at least one probe");
                assert!(row.epsilon <= 0.2);
            } else {
                assert_eq!(row.s, 0);
                assert!(row.epsilon > 0.2);
            }
        }
        // With two thirds of the cluster capable the SLA is satisfiable.
        assert!(rows.last().unwrap().feasible);
    }
}
