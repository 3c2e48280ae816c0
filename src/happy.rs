//! Conditional expectation of happy agents.

use crate::{Error, WeightTable};

/// Expected number of happy agents given that exactly `f` of them are
/// potentially happy, with `k` capable hosts in play: `E[H_s | F_s = f]`.
///
/// A potentially happy agent found at least one capable host among its
/// probes; it ends up happy only if it also wins its placement.  The
/// expectation is the exact finite sum
///
/// ```text
/// k^{1−f} · Σ_{h=1..f}  h · (k−1)(k−2)···(k−h+1) · table(f−h, h)
/// ```
///
/// where the falling factorial for `h = 1` is the empty product 1.  For
/// `f ≤ k` this equals the occupancy expectation `k·(1 − (1 − 1/k)^f)`;
/// the table form keeps the per-`h` decomposition exact instead of going
/// through a floating power.
///
/// Fails with [`Error::AgentsExceedCapable`] if `f > k` (an agent is only
/// potentially happy because of a capable host, so there can be at most
/// `k` of them) and with [`Error::TableExceeded`] if `f` is beyond the
/// table's range.  `f < 2` is trivially determined: 0 or 1 happy agents.
///
/// # Example
///
/// ```rust
/// use fanout::{expected_happy, WeightTable};
///
/// let t = WeightTable::build(8).unwrap();
/// assert_eq!(expected_happy(&t, 5, 0).unwrap(), 0.0);
/// assert_eq!(expected_happy(&t, 5, 1).unwrap(), 1.0);
/// // Two agents over five capable hosts collide 1 time in 5.
/// assert!((expected_happy(&t, 5, 2).unwrap() - 1.8).abs() < 1e-12);
/// ```
pub fn expected_happy(table: &WeightTable, k: u64, f: u64) -> Result<f64, Error> {
    if f > k {
        return Err(Error::AgentsExceedCapable { f, k });
    }
    let m = table.max_agents();
    if f > m as u64 {
        return Err(Error::TableExceeded { f, m });
    }
    if f < 2 {
        return Ok(f as f64);
    }

    let mut acc = 0.0_f64;
    for h in 1..=f {
        // (k−1)(k−2)···(k−h+1); empty for h = 1.
        let mut falling = 1.0_f64;
        for j in 1..h {
            falling *= (k - j) as f64;
        }
        acc += h as f64 * falling * table.get((f - h) as usize, h as usize);
    }
    let kf = k as f64;
    let direct = acc * kf.powf(1.0 - f as f64);
    if direct.is_finite() {
        Ok(direct)
    } else {
        // The unscaled sum outgrows f64 once f approaches a large k.  The
        // occupancy form is the same expectation with the k^{1−f} scale
        // already folded in, so it stays in range.
        Ok(kf * (1.0 - (1.0 - 1.0 / kf).powf(f as f64)))
    }
}
