//! Monetary amounts.
//!
//! All amounts are whole Chilean pesos; the currency has no subunits, so an
//! `i64` carries every value the billing documents can express.

/// Amount in whole pesos.
pub type Amount = i64;

/// VAT rate applied to every order. A single 19% rate applies; there is no
/// exemption path at this layer.
pub const VAT_PERCENT: i64 = 19;

/// VAT on a net amount, rounded half-up to the nearest peso.
///
/// Integer arithmetic keeps the rounding deterministic: `net * 19 / 100`
/// with a `+50` bias before the division.
pub fn vat_on(net: Amount) -> Amount {
    (net * VAT_PERCENT + 50) / 100
}
