/// Minimum quoted price for shapes that would otherwise price the first token at zero
pub const PRICE_FLOOR: f64 = 0.0001;

/// Bracket width (in tokens) at which bisection inversion stops
pub const BISECTION_TOLERANCE: f64 = 0.001;

/// Upper bound on halving steps; enough to shrink any finite bracket to tolerance
pub const MAX_BISECTION_STEPS: usize = 2_048;

/// Port for bonding curve shapes
///
/// Implementations are pure: they hold immutable shape parameters and
/// never track trading progress. Supply bookkeeping lives in the trading
/// session that borrows the curve.
///
/// Different implementations support various price functions:
/// - Linear (`k * s / multiplier`)
/// - Exponential (`a * e^(b * s)`)
/// - Polynomial (`sum(c_i * s^i)`)
/// - Logarithmic (`a * ln(s + b)`)
pub trait BondingCurve {
    /// Instantaneous marginal price at the given supply
    fn price(&self, supply: f64) -> f64;

    /// Definite integral of `price` over `[from, to]`, clamped to be non-negative
    fn cost(&self, from: f64, to: f64) -> f64;

    /// Tokens issued for `currency_in` starting at `supply`
    ///
    /// Solves `cost(supply, supply + delta) = currency_in` for `delta`.
    /// `max_tokens` bounds the search for shapes without a closed-form
    /// inverse; closed-form shapes may return more and leave clamping to
    /// the caller.
    fn tokens_out(&self, supply: f64, currency_in: f64, max_tokens: f64) -> f64;

    /// Get the name of the shape
    fn name(&self) -> &str;
}

/// Bisection search for `delta` in `[0, max_tokens]` with `cost(supply, supply + delta) = target`
///
/// Returns the lower end of the final bracket, so the implied cost never
/// exceeds `target`. Stops early once the bracket cannot be split any
/// further in `f64`, which happens above roughly 9e12 tokens.
pub fn bisect_tokens_out<C: BondingCurve + ?Sized>(
    curve: &C,
    supply: f64,
    target: f64,
    max_tokens: f64,
) -> f64 {
    let mut low = 0.0;
    let mut high = max_tokens.max(0.0);

    for _ in 0..MAX_BISECTION_STEPS {
        if high - low <= BISECTION_TOLERANCE {
            break;
        }
        let mid = low + (high - low) / 2.0;
        if mid <= low || mid >= high {
            break;
        }
        if curve.cost(supply, supply + mid) < target {
            low = mid;
        } else {
            high = mid;
        }
    }

    low
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat price of 2.0 per token
    struct Flat;

    impl BondingCurve for Flat {
        fn price(&self, _supply: f64) -> f64 {
            2.0
        }

        fn cost(&self, from: f64, to: f64) -> f64 {
            (2.0 * (to - from)).max(0.0)
        }

        fn tokens_out(&self, supply: f64, currency_in: f64, max_tokens: f64) -> f64 {
            bisect_tokens_out(self, supply, currency_in, max_tokens)
        }

        fn name(&self) -> &str {
            "flat"
        }
    }

    #[test]
    fn test_bisection_converges_within_tolerance() {
        let tokens = Flat.tokens_out(0.0, 10.0, 1_000.0);
        assert!((tokens - 5.0).abs() <= BISECTION_TOLERANCE);
        assert!(Flat.cost(0.0, tokens) <= 10.0);
    }

    #[test]
    fn test_bisection_respects_upper_bound() {
        // Budget buys 500 tokens but only 100 remain
        let tokens = Flat.tokens_out(0.0, 1_000.0, 100.0);
        assert!(tokens <= 100.0);
        assert!(tokens > 100.0 - BISECTION_TOLERANCE);
    }

    #[test]
    fn test_bisection_terminates_beyond_f64_resolution() {
        // Adjacent f64 values near 1e16 are 2.0 apart, wider than the tolerance
        let tokens = Flat.tokens_out(0.0, 1.4e16, 1e16);
        assert!(tokens <= 0.7e16);
        assert!((tokens - 0.7e16).abs() / 0.7e16 < 1e-12);
    }

    #[test]
    fn test_bisection_with_unbounded_bracket() {
        assert_eq!(Flat.tokens_out(0.0, 10.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_bisection_empty_bracket() {
        assert_eq!(Flat.tokens_out(0.0, 10.0, 0.0), 0.0);
        assert_eq!(Flat.tokens_out(0.0, 10.0, -5.0), 0.0);
    }
}
