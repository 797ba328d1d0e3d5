//! Monetary formatting helpers shared by activity texts and quick facts.

/// Round to 2 decimal places (cents), half away from zero.
pub fn round_cents(val: f64) -> f64 {
    let rounded = (val * 100.0).round() / 100.0;
    // avoid rendering "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a value as a currency amount with exactly 2 decimals: `$12.50`, `-$5.00`.
pub fn money(val: f64, symbol: &str) -> String {
    let cents = round_cents(val);
    if cents < 0.0 {
        format!("-{symbol}{:.2}", cents.abs())
    } else {
        format!("{symbol}{cents:.2}")
    }
}
