//! Order totals.
//!
//! Pure and deterministic: the same lines yield the same summary whether the
//! computation runs per keystroke behind a form or once at submission time.

use serde::{Deserialize, Serialize};

use arriendo_core::{vat_on, Amount, ValueObject};

/// Net/VAT/total for an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub neto: Amount,
    pub iva: Amount,
    pub total: Amount,
}

impl ValueObject for OrderSummary {}

/// What a line contributes to the order net: its rate plus its freight.
pub trait LineAmounts {
    fn rate_amount(&self) -> Amount;
    fn freight_amount(&self) -> Amount;
}

/// Lenient numeric coercion for raw form values.
///
/// A missing or malformed amount counts as zero so a half-typed line never
/// breaks the running total; it is a coercion policy, not an error path.
pub fn coerce_amount(raw: &str) -> Amount {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value.round() as i64,
        _ => 0,
    }
}

/// Sum the line contributions and derive VAT and total.
///
/// `net = Σ(rate + freight)`, `iva = round(net × 19%)`, `total = net + iva`.
/// An empty sequence yields all zeros.
pub fn compute_summary<L: LineAmounts>(lines: &[L]) -> OrderSummary {
    let neto: Amount = lines
        .iter()
        .map(|line| line.rate_amount() + line.freight_amount())
        .sum();
    let iva = vat_on(neto);

    OrderSummary {
        neto,
        iva,
        total: neto + iva,
    }
}
