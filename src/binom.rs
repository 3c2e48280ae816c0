//! Stateless binomial helpers, usable independent of the scheduling model.
//!
//! Factorial ratios are evaluated in log space so that counts in the
//! hundreds stay comfortably inside `f64`.

/// Natural log of `n!`, computed as `Σ_{i=1..n} ln(i)`.
///
/// `log_factorial(0) == 0.0` (empty product).
///
/// # Example
///
/// ```rust
/// use fanout::log_factorial;
///
/// assert_eq!(log_factorial(0), 0.0);
/// assert!((log_factorial(5) - 120.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn log_factorial(n: u64) -> f64 {
    let mut acc = 0.0_f64;
    for i in 1..=n {
        acc += (i as f64).ln();
    }
    acc
}

/// Probability of exactly `k` successes in `n` independent Bernoulli(`p`)
/// trials.
///
/// The degenerate coins are handled explicitly — `p = 1` puts all mass on
/// `k = n` and `p = 0` on `k = 0` — because the log-space formula would
/// otherwise evaluate `ln(0)`.  `k > n` yields 0.  Everything else is
/// `exp(ln C(n,k) + k·ln p + (n−k)·ln(1−p))`.
///
/// # Example
///
/// ```rust
/// use fanout::binomial_pmf;
///
/// assert!((binomial_pmf(5, 0.5, 2) - 0.3125).abs() < 1e-12);
/// assert_eq!(binomial_pmf(7, 1.0, 7), 1.0);
/// assert_eq!(binomial_pmf(7, 1.0, 3), 0.0);
/// ```
pub fn binomial_pmf(n: u64, p: f64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    if p >= 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    if p <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    (log_factorial(n) - log_factorial(k) - log_factorial(n - k)
        + k as f64 * p.ln()
        + (n - k) as f64 * (1.0 - p).ln())
    .exp()
}
