use std::f64::consts::E;

/// Logistic sigmoid, `1 / (1 + e^-x)`. Maps every finite input into (0, 1).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid expressed through its own output `a`:
/// `σ'(x) = a · (1 - a)` where `a = σ(x)`.
///
/// Backpropagation only ever holds the post-activation value, so the slope
/// is taken from that rather than from the weighted sum.
pub fn sigmoid_slope(a: f64) -> f64 {
    a * (1.0 - a)
}
