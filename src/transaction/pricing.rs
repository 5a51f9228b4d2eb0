//! Pricing rules for fuel sales.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::Error;

/// The flat discount per liter given to logged in customers.
pub const DISCOUNT_PER_LITER: Decimal = Decimal::TWO;

/// The smallest volume that can be sold in one transaction.
pub const MINIMUM_VOLUME: Decimal = Decimal::ONE;

/// Derived volumes are stored with this many decimal places.
pub const VOLUME_SCALE: u32 = 2;

/// The price per liter actually charged.
///
/// Members get [DISCOUNT_PER_LITER] off the catalog price. The discounted
/// price never drops below zero.
pub fn effective_price(catalog_price: Decimal, is_member: bool) -> Decimal {
    if !is_member {
        return catalog_price;
    }

    (catalog_price - DISCOUNT_PER_LITER).max(Decimal::ZERO)
}

/// Work out the volume and total amount of a sale from whichever of the two
/// the customer asked for.
///
/// When only a total amount is given, the volume is derived from it and
/// rounded half-up to [VOLUME_SCALE] places, and the total amount is kept as
/// given. Otherwise the volume is used and the total is the exact product of
/// volume and price, with no rounding.
///
/// The result is `(volume, total_amount)`.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingQuantity] if neither value is given,
/// - [Error::ZeroPrice] if a volume has to be derived from a free fuel,
/// - [Error::QuantityOutOfRange] if the derived volume or total does not fit
///   in a [Decimal].
pub fn resolve_quantities(
    volume: Option<Decimal>,
    total_amount: Option<Decimal>,
    price_per_liter: Decimal,
) -> Result<(Decimal, Decimal), Error> {
    match (volume, total_amount) {
        (None, Some(total_amount)) => {
            if price_per_liter.is_zero() {
                return Err(Error::ZeroPrice);
            }

            let mut volume = total_amount
                .checked_div(price_per_liter)
                .ok_or(Error::QuantityOutOfRange)?
                .round_dp_with_strategy(VOLUME_SCALE, RoundingStrategy::MidpointAwayFromZero);
            volume.rescale(VOLUME_SCALE);

            Ok((volume, total_amount))
        }
        (Some(volume), _) => {
            let total_amount = volume
                .checked_mul(price_per_liter)
                .ok_or(Error::QuantityOutOfRange)?;

            Ok((volume, total_amount))
        }
        (None, None) => Err(Error::MissingQuantity),
    }
}

/// Check that `volume` meets the minimum purchase.
///
/// # Errors
/// Returns [Error::VolumeTooSmall] if `volume` is below [MINIMUM_VOLUME].
pub fn check_minimum_volume(volume: Decimal) -> Result<(), Error> {
    if volume < MINIMUM_VOLUME {
        return Err(Error::VolumeTooSmall);
    }

    Ok(())
}
