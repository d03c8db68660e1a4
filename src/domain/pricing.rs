//! Delivery price quotes.
//!
//! The quote is a pure function of the package weight and urgency flag. The
//! urgency surcharge is reported separately but the total is computed from the
//! base price and weight fee scaled by the urgency multiplier; the surcharge is
//! not added in.
//!
//! ```text
//! total = (BASE_PRICE + weight * WEIGHT_RATE) * (urgent ? URGENT_MULTIPLIER : 1)
//! ```

use serde::{Deserialize, Serialize};

use super::order::{PackageDetails, PostalAddress};

/// Flat fee charged on every delivery.
pub const BASE_PRICE: f64 = 8.50;

/// Fee per kilogram of package weight.
pub const WEIGHT_RATE: f64 = 0.5;

/// Fraction of the base price reported as the urgency fee.
pub const URGENCY_FEE_RATE: f64 = 0.4;

/// Multiplier applied to the subtotal for urgent deliveries.
pub const URGENT_MULTIPLIER: f64 = 3.5;

/// Delivery window quoted for urgent packages.
pub const URGENT_WINDOW: &str = "1-2 hours";

/// Delivery window quoted for standard packages.
pub const STANDARD_WINDOW: &str = "3-6 hours";

/// Price breakdown returned to the booking form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_price: f64,
    pub weight_fee: f64,
    pub urgency_fee: f64,
    pub total: f64,
    pub estimated_time: String,
}

/// Computes the quote for a package.
///
/// Pickup and delivery addresses are accepted for interface parity with the
/// booking flow but do not influence the price.
///
/// # Examples
///
/// ```
/// use courier_ops::domain::{pricing, PackageDetails, PostalAddress};
///
/// let package = PackageDetails { weight: 2.0, ..Default::default() };
/// let quote = pricing::quote(&PostalAddress::default(), &PostalAddress::default(), &package);
/// assert_eq!(quote.total, 9.5);
/// assert_eq!(quote.estimated_time, "3-6 hours");
/// ```
#[must_use]
pub fn quote(_pickup: &PostalAddress, _delivery: &PostalAddress, package: &PackageDetails) -> PriceQuote {
    let base_price = BASE_PRICE;
    let weight_fee = package.weight * WEIGHT_RATE;
    let urgency_multiplier = if package.urgent { URGENT_MULTIPLIER } else { 1.0 };

    PriceQuote {
        base_price,
        weight_fee,
        urgency_fee: if package.urgent { base_price * URGENCY_FEE_RATE } else { 0.0 },
        total: (base_price + weight_fee) * urgency_multiplier,
        estimated_time: if package.urgent { URGENT_WINDOW } else { STANDARD_WINDOW }.to_string(),
    }
}
