//! Default value functions for serde deserialization.

pub fn eta_min() -> f64 {
    -0.9
}

pub fn eta_max() -> f64 {
    0.9
}

pub fn enabled() -> bool {
    true
}
