//! Natural cubic spline with analytic derivative and integral.
//!
//! Measured channel-base currents arrive as discrete `(t, i)` samples. The
//! spline gives a smooth current between samples together with the exact
//! derivative and antiderivative of the interpolant, so the three field
//! regimes are all driven by the same curve.

/// A natural cubic spline interpolator for real-valued data.
///
/// Given $n$ data points $(x_i, y_i)$, constructs piecewise cubic polynomials
/// with continuous first and second derivatives.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// Sorted x values (knots).
    xs: Vec<f64>,
    /// Corresponding y values.
    ys: Vec<f64>,
    /// Second derivatives at each knot (computed during construction).
    y2s: Vec<f64>,
    /// Integral of the spline from `xs[0]` to each knot.
    cumulative: Vec<f64>,
}

impl CubicSpline {
    /// Construct a natural cubic spline from data points.
    ///
    /// # Arguments
    /// * `xs` - Strictly increasing x values.
    /// * `ys` - Corresponding y values (same length as `xs`).
    ///
    /// # Panics
    /// Panics if `xs` and `ys` have different lengths, or if `xs` is not
    /// strictly increasing, or if fewer than 2 points are provided.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        assert_eq!(xs.len(), ys.len(), "xs and ys must have equal length");
        assert!(xs.len() >= 2, "Need at least 2 data points");
        for i in 1..xs.len() {
            assert!(
                xs[i] > xs[i - 1],
                "xs must be strictly increasing at index {}",
                i
            );
        }

        let n = xs.len();
        let mut y2s = vec![0.0; n];
        let mut u = vec![0.0; n - 1];

        // Forward sweep (tridiagonal system for natural spline)
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2s[i - 1] + 2.0;
            y2s[i] = (sig - 1.0) / p;
            u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        // Back substitution
        for k in (0..n - 2).rev() {
            y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
        }

        // Exact integral of each cubic piece:
        // h (y_k + y_{k+1}) / 2 - h^3 (y2_k + y2_{k+1}) / 24
        let mut cumulative = vec![0.0; n];
        for k in 0..n - 1 {
            let h = xs[k + 1] - xs[k];
            cumulative[k + 1] = cumulative[k] + 0.5 * h * (ys[k] + ys[k + 1])
                - h * h * h * (y2s[k] + y2s[k + 1]) / 24.0;
        }

        Self { xs, ys, y2s, cumulative }
    }

    /// First knot.
    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    /// Last knot.
    pub fn x_max(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// Index `lo` of the interval `[xs[lo], xs[lo + 1]]` used for `x`.
    ///
    /// Points outside the data range map to the boundary intervals.
    fn interval(&self, x: f64) -> usize {
        let n = self.xs.len();

        // Binary search for the enclosing interval
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        lo
    }

    /// Evaluate the spline at a given x value.
    ///
    /// Extrapolation beyond the data range uses the boundary polynomial.
    pub fn evaluate(&self, x: f64) -> f64 {
        let lo = self.interval(x);
        let hi = lo + 1;

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }

    /// First derivative of the spline at `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        let lo = self.interval(x);
        let hi = lo + 1;

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        (self.ys[hi] - self.ys[lo]) / h
            - (3.0 * a * a - 1.0) / 6.0 * h * self.y2s[lo]
            + (3.0 * b * b - 1.0) / 6.0 * h * self.y2s[hi]
    }

    /// Integral of the spline from the first knot to `x`.
    fn antiderivative(&self, x: f64) -> f64 {
        let lo = self.interval(x);
        let hi = lo + 1;

        let h = self.xs[hi] - self.xs[lo];
        let b = (x - self.xs[lo]) / h;
        let b2 = b * b;
        let a_end = 1.0 - b;

        // Integrals over [0, b] of the basis polynomials, in units of h.
        let linear_lo = b - 0.5 * b2;
        let linear_hi = 0.5 * b2;
        let cubic_lo = 0.25 * (1.0 - a_end * a_end * a_end * a_end) - linear_lo;
        let cubic_hi = 0.25 * b2 * b2 - 0.5 * b2;

        self.cumulative[lo]
            + h * (self.ys[lo] * linear_lo
                + self.ys[hi] * linear_hi
                + h * h / 6.0 * (self.y2s[lo] * cubic_lo + self.y2s[hi] * cubic_hi))
    }

    /// Definite integral of the spline over `[a, b]`.
    pub fn integrate(&self, a: f64, b: f64) -> f64 {
        self.antiderivative(b) - self.antiderivative(a)
    }
}
