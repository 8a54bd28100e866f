//! Cumulative trapezoid integration and piecewise-linear lookup.

/// Running trapezoid integral of `y` over the abscissae `x`.
///
/// Returns a vector of the same length whose first element is zero and whose
/// `i`-th element approximates $\int_{x_0}^{x_i} y\,\mathrm{d}x$.
///
/// # Panics
/// Panics if `x` and `y` have different lengths.
pub fn cumulative_trapezoid(x: &[f64], y: &[f64]) -> Vec<f64> {
    assert_eq!(x.len(), y.len(), "x and y must have equal length");

    let mut out = Vec::with_capacity(x.len());
    if x.is_empty() {
        return out;
    }

    let mut acc = 0.0;
    out.push(acc);
    for i in 1..x.len() {
        acc += 0.5 * (x[i] - x[i - 1]) * (y[i] + y[i - 1]);
        out.push(acc);
    }
    out
}

/// Piecewise-linear interpolation of tabulated `(xs, ys)` at `x`.
///
/// Values outside the table are clamped to the first or last entry. `xs` must
/// be sorted and non-empty.
pub fn interpolate_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    // First knot strictly greater than x; lies in 1..n here.
    let hi = xs.partition_point(|&xi| xi <= x);
    let lo = hi - 1;
    let frac = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + frac * (ys[hi] - ys[lo])
}
