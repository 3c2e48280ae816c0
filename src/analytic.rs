//! Closed-form probe bounds — the cheap companion to the exact model.
//!
//! Instead of pricing placement collisions exactly, these helpers bound
//! the per-agent miss probability directly: `d` probes must push
//! `((n−k)/n)^d` below the SLA headroom left after accounting for the
//! other `s − 1` agents.  The result is a per-`s` minimal probe count in
//! one logarithm, useful for seeding or sanity-checking a full sweep.
//! The bound does not replace [`PlacementModel::epsilon`]: it prices
//! contention linearly, which is only an approximation of the occupancy
//! analysis.
//!
//! [`PlacementModel::epsilon`]: crate::PlacementModel::epsilon

use crate::{Error, Plan};

/// Largest agent count worth considering under the SLA alone:
/// `floor(k·eps/(1−eps)) + 1`.
///
/// Beyond this, the contention term `(s−1)(1−eps)/k` alone eats the whole
/// degradation allowance and no probe count can help.  Only meaningful
/// for `target_epsilon < 1`.
pub fn analytic_s_max(k: u64, target_epsilon: f64) -> u64 {
    ((k as f64 * target_epsilon) / (1.0 - target_epsilon)).floor() as u64 + 1
}

/// Minimal probes per agent for `s` agents to stay within the SLA, by the
/// linear-contention bound:
/// `ceil( ln(eps − (s−1)(1−eps)/k) / ln((n−k)/n) )`.
///
/// Returns `Ok(None)` when no probe count can satisfy the bound at this
/// `s` (the log argument is non-positive).  Fails with
/// [`Error::DegenerateCapacity`] unless `0 < k < n`: with no capable host
/// there is nothing to find, and with every host capable the bound's
/// logarithm degenerates.
///
/// # Example
///
/// ```rust
/// use fanout::min_probes_bound;
///
/// // Half the cluster capable, 1% SLA: a single agent needs 7 probes.
/// assert_eq!(min_probes_bound(1000, 500, 1, 0.01).unwrap(), Some(7));
/// ```
pub fn min_probes_bound(
    n: u64,
    k: u64,
    s: u64,
    target_epsilon: f64,
) -> Result<Option<u64>, Error> {
    if k == 0 || k >= n {
        return Err(Error::DegenerateCapacity { k, n });
    }
    let headroom =
        target_epsilon - (s as f64 - 1.0) * (1.0 - target_epsilon) / k as f64;
    if headroom <= 0.0 {
        return Ok(None);
    }
    let ratio = (n - k) as f64 / n as f64;
    let d = (headroom.ln() / ratio.ln()).ceil();
    Ok(Some(d.max(0.0) as u64))
}

/// Most parallel `(s, d)` on the analytic curve whose total probe count
/// `s·d` fits the budget.
///
/// Walks `s` up to [`analytic_s_max`] (capped at `k` — parallelism beyond
/// the capable hosts cannot pay off), takes the bound's minimal `d` for
/// each, and keeps the largest `s` whose `s·d ≤ budget`.  `Ok(None)`
/// means not even one agent fits.  Same domain requirement as
/// [`min_probes_bound`].
///
/// # Example
///
/// ```rust
/// use fanout::{analytic_plan, Plan};
///
/// let plan = analytic_plan(1000, 500, 80, 0.01).unwrap();
/// assert_eq!(plan, Some(Plan { s: 5, d: 9 }));
/// ```
pub fn analytic_plan(
    n: u64,
    k: u64,
    budget: u64,
    target_epsilon: f64,
) -> Result<Option<Plan>, Error> {
    if k == 0 || k >= n {
        return Err(Error::DegenerateCapacity { k, n });
    }
    let s_cap = analytic_s_max(k, target_epsilon).min(k);
    let mut best: Option<Plan> = None;
    for s in 1..=s_cap {
        match min_probes_bound(n, k, s, target_epsilon)? {
            Some(d) if s.saturating_mul(d) <= budget => best = Some(Plan { s, d }),
            Some(_) => {}
            None => break,
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s_cap_from_the_sla_alone() {
        // 500·0.01/0.99 = 5.05… → 6.
        assert_eq!(analytic_s_max(500, 0.01), 6);
        assert_eq!(analytic_s_max(10, 0.5), 11);
    }

    #[test]
    fn probe_bound_reference_values() {
        // n=1000, k=500, eps=0.01 — hand-checked curve.
        let d = |s| min_probes_bound(1000, 500, s, 0.01).unwrap();
        assert_eq!(d(1), Some(7));
        assert_eq!(d(2), Some(7));
        assert_eq!(d(3), Some(8));
        assert_eq!(d(4), Some(8));
        assert_eq!(d(5), Some(9));
        assert_eq!(d(6), Some(14));
    }

    #[test]
    fn probe_bound_is_monotone_in_s() {
        let mut prev = 0;
        for s in 1..=6u64 {
            let d = min_probes_bound(1000, 500, s, 0.01).unwrap().unwrap();
            assert!(d >= prev, "s={s}");
            prev = d;
        }
    }

    #[test]
    fn no_headroom_means_no_bound() {
        // At s beyond the cap the headroom is negative.
        assert_eq!(min_probes_bound(1000, 500, 7, 0.01).unwrap(), None);
        // A zero SLA leaves no headroom even for one agent.
        assert_eq!(min_probes_bound(1000, 500, 1, 0.0).unwrap(), None);
    }

    #[test]
    fn plan_picks_the_largest_s_within_budget() {
        let plan = analytic_plan(1000, 500, 80, 0.01).unwrap();
        assert_eq!(plan, Some(Plan { s: 5, d: 9 }));
        // A tighter budget steps the recommendation down.
        let plan = analytic_plan(1000, 500, 30, 0.01).unwrap();
        assert_eq!(plan, Some(Plan { s: 3, d: 8 }));
        // No budget even for one agent's probes.
        let plan = analytic_plan(1000, 500, 3, 0.01).unwrap();
        assert_eq!(plan, None);
    }

    #[test]
    fn degenerate_clusters_are_rejected() {
        assert!(matches!(
            min_probes_bound(100, 0, 1, 0.1),
            Err(Error::DegenerateCapacity { k: 0, n: 100 })
        ));
        assert!(matches!(
            min_probes_bound(100, 100, 1, 0.1),
            Err(Error::DegenerateCapacity { k: 100, n: 100 })
        ));
        assert!(analytic_plan(100, 0, 10, 0.1).is_err());
    }
}
