//! Reserve-ratio (Bancor) bonding formulas
//!
//! A continuous token backed by a reserve where
//! `price = reserve / (supply * ratio)`. A ratio of 1.0 gives a constant
//! price, 0.5 a linear curve, lower ratios steeper power laws.

use bondsim_ports::{CurveError, CurveResult};

fn check_ratio(ratio: f64) -> CurveResult<()> {
    if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
        return Err(CurveError::invalid("reserve_ratio", ratio, "must be in (0, 1]"));
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> CurveResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CurveError::invalid(name, value, "must be finite and positive"));
    }
    Ok(())
}

/// Tokens minted for depositing `deposit` into the reserve
///
/// `supply * ((1 + deposit / reserve)^ratio - 1)`
pub fn purchase_return(supply: f64, reserve: f64, ratio: f64, deposit: f64) -> CurveResult<f64> {
    check_ratio(ratio)?;
    check_positive("supply", supply)?;
    check_positive("reserve", reserve)?;
    if deposit <= 0.0 {
        return Ok(0.0);
    }
    if ratio == 1.0 {
        return Ok(supply * deposit / reserve);
    }
    Ok(supply * ((1.0 + deposit / reserve).powf(ratio) - 1.0))
}

/// Reserve paid out for burning `amount` tokens
///
/// `reserve * (1 - (1 - amount / supply)^(1 / ratio))`
pub fn sale_return(supply: f64, reserve: f64, ratio: f64, amount: f64) -> CurveResult<f64> {
    check_ratio(ratio)?;
    check_positive("supply", supply)?;
    check_positive("reserve", reserve)?;
    if amount <= 0.0 {
        return Ok(0.0);
    }
    if amount > supply {
        return Err(CurveError::invalid("amount", amount, "exceeds supply"));
    }
    if amount == supply {
        return Ok(reserve);
    }
    if ratio == 1.0 {
        return Ok(reserve * amount / supply);
    }
    Ok(reserve * (1.0 - (1.0 - amount / supply).powf(1.0 / ratio)))
}

/// Spot price `reserve / (supply * ratio)`; zero supply quotes zero
pub fn spot_price(supply: f64, reserve: f64, ratio: f64) -> CurveResult<f64> {
    check_ratio(ratio)?;
    if supply <= 0.0 {
        return Ok(0.0);
    }
    Ok(reserve / (supply * ratio))
}

/// `(supply, price)` points of the power law `slope * supply^(1/ratio - 1)`
/// implied by a reserve ratio, evenly spaced over `[initial_supply, max_supply]`
pub fn power_law_points(
    ratio: f64,
    max_supply: f64,
    initial_supply: f64,
    slope: f64,
    points: usize,
) -> CurveResult<Vec<(f64, f64)>> {
    check_ratio(ratio)?;
    check_positive("initial_supply", initial_supply)?;
    if max_supply < initial_supply {
        return Err(CurveError::invalid(
            "max_supply",
            max_supply,
            "must not be below initial_supply",
        ));
    }

    let exponent = 1.0 / ratio - 1.0;
    let step = if points > 1 {
        (max_supply - initial_supply) / (points - 1) as f64
    } else {
        0.0
    };

    Ok((0..points)
        .map(|i| {
            let supply = initial_supply + step * i as f64;
            (supply, slope * supply.powf(exponent))
        })
        .collect())
}
