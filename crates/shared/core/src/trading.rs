//! Stateful buy/sell against a curve

use bondsim_ports::{BondingCurve, TradeError, TradeResult};
use log::debug;
use serde::Serialize;

use crate::Curve;

/// Executed buy or sell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fill {
    /// Tokens issued (buy) or burned (sell)
    pub tokens: f64,
    /// Currency consumed by the curve (buy) or paid out (sell)
    pub currency: f64,
    /// `currency / tokens`
    pub price: f64,
}

/// Trading progress on one curve
///
/// Borrows the curve immutably; each simulation run opens its own session
/// so no run can observe another run's supply.
#[derive(Debug, Clone)]
pub struct TradingSession<'a> {
    curve: &'a Curve,
    tokens_sold: f64,
    currency_raised: f64,
    graduated: bool,
}

impl<'a> TradingSession<'a> {
    pub fn new(curve: &'a Curve) -> Self {
        Self {
            curve,
            tokens_sold: 0.0,
            currency_raised: 0.0,
            graduated: false,
        }
    }

    pub fn curve(&self) -> &'a Curve {
        self.curve
    }

    pub fn tokens_sold(&self) -> f64 {
        self.tokens_sold
    }

    pub fn currency_raised(&self) -> f64 {
        self.currency_raised
    }

    pub fn is_graduated(&self) -> bool {
        self.graduated
    }

    pub fn remaining_supply(&self) -> f64 {
        (self.curve.total_supply() - self.tokens_sold).max(0.0)
    }

    /// Quoted price at the current supply
    pub fn current_price(&self) -> f64 {
        self.curve.price(self.tokens_sold)
    }

    /// Tokens a buy of `currency_amount` would receive, without trading
    pub fn quote_buy(&self, currency_amount: f64) -> f64 {
        if currency_amount <= 0.0 {
            return 0.0;
        }
        self.curve
            .tokens_for(self.tokens_sold, currency_amount)
            .min(self.remaining_supply())
    }

    /// Spend `currency_amount` on newly issued tokens
    ///
    /// A purchase that would overrun the supply cap is partially filled:
    /// it takes the remaining supply and is charged only the cost of those
    /// tokens (`Fill::currency` is then below `currency_amount`).
    pub fn buy(&mut self, currency_amount: f64) -> TradeResult<Fill> {
        if self.graduated {
            return Err(TradeError::Graduated);
        }
        if !currency_amount.is_finite() || currency_amount <= 0.0 {
            return Err(TradeError::InvalidAmount {
                amount: currency_amount,
                reason: "must be finite and positive",
            });
        }

        let remaining = self.remaining_supply();
        if remaining <= 0.0 {
            return Err(TradeError::SupplyExhausted);
        }

        let mut tokens = self.curve.tokens_for(self.tokens_sold, currency_amount);
        if !tokens.is_finite() || tokens <= 0.0 {
            return Err(TradeError::NoOutput {
                amount: currency_amount,
            });
        }

        let mut spent = currency_amount;
        if tokens >= remaining {
            let total = self.curve.total_supply();
            tokens = remaining;
            spent = self.curve.cost(self.tokens_sold, total);
            debug!(
                "Partial fill: {:.4} of {:.4} spent for last {:.4} tokens",
                spent, currency_amount, tokens
            );
            self.tokens_sold = total;
        } else {
            self.tokens_sold += tokens;
        }
        self.currency_raised += spent;

        if !self.graduated && self.currency_raised >= self.curve.graduation_threshold() {
            self.graduated = true;
            debug!(
                "Curve graduated: raised {:.4} >= threshold {:.4}",
                self.currency_raised,
                self.curve.graduation_threshold()
            );
        }

        Ok(Fill {
            tokens,
            currency: spent,
            price: spent / tokens,
        })
    }

    /// Return `token_amount` tokens to the curve for currency
    ///
    /// Never clears graduation; a graduated session rejects sells outright.
    pub fn sell(&mut self, token_amount: f64) -> TradeResult<Fill> {
        if self.graduated {
            return Err(TradeError::Graduated);
        }
        if !token_amount.is_finite() || token_amount <= 0.0 {
            return Err(TradeError::InvalidAmount {
                amount: token_amount,
                reason: "must be finite and positive",
            });
        }
        if token_amount > self.tokens_sold {
            return Err(TradeError::InvalidAmount {
                amount: token_amount,
                reason: "exceeds tokens sold",
            });
        }

        let new_tokens_sold = (self.tokens_sold - token_amount).max(0.0);
        let currency_out = self.curve.cost(new_tokens_sold, self.tokens_sold);

        self.tokens_sold = new_tokens_sold;
        self.currency_raised -= currency_out;

        Ok(Fill {
            tokens: token_amount,
            currency: currency_out,
            price: currency_out / token_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear() -> Curve {
        Curve::linear(1e9, 10_000.0, 2.0, 1e7).unwrap()
    }

    #[test]
    fn test_buy_updates_state() {
        let curve = linear();
        let mut session = TradingSession::new(&curve);

        let fill = session.buy(100.0).unwrap();
        assert!(fill.tokens > 0.0);
        assert_relative_eq!(fill.currency, 100.0);
        assert_relative_eq!(fill.price, 100.0 / fill.tokens);
        assert_relative_eq!(session.tokens_sold(), fill.tokens);
        assert_relative_eq!(session.currency_raised(), 100.0);
        assert!(!session.is_graduated());
    }

    #[test]
    fn test_buy_then_sell_returns_spend() {
        let curve = linear();
        let mut session = TradingSession::new(&curve);
        session.buy(500.0).unwrap();

        let bought = session.buy(250.0).unwrap();
        let sold = session.sell(bought.tokens).unwrap();

        assert!(sold.currency <= 250.0 * (1.0 + 1e-9));
        assert_relative_eq!(sold.currency, 250.0, max_relative = 1e-6);
        assert_relative_eq!(session.currency_raised(), 500.0, max_relative = 1e-6);
    }

    #[test]
    fn test_graduation_is_sticky() {
        let curve = Curve::linear(1e9, 1_000.0, 2.0, 1e7).unwrap();
        let mut session = TradingSession::new(&curve);

        session.buy(600.0).unwrap();
        assert!(!session.is_graduated());
        session.buy(600.0).unwrap();
        assert!(session.is_graduated());

        assert_eq!(session.buy(1.0), Err(TradeError::Graduated));
        assert_eq!(session.sell(1.0), Err(TradeError::Graduated));
        assert!(session.is_graduated());
    }

    #[test]
    fn test_sell_rejects_invalid_amounts() {
        let curve = linear();
        let mut session = TradingSession::new(&curve);
        let fill = session.buy(100.0).unwrap();

        assert!(matches!(
            session.sell(0.0),
            Err(TradeError::InvalidAmount { .. })
        ));
        assert!(matches!(
            session.sell(-1.0),
            Err(TradeError::InvalidAmount { .. })
        ));
        assert!(matches!(
            session.sell(fill.tokens * 2.0),
            Err(TradeError::InvalidAmount {
                reason: "exceeds tokens sold",
                ..
            })
        ));
        // Rejected sells leave state untouched
        assert_relative_eq!(session.tokens_sold(), fill.tokens);
    }

    #[test]
    fn test_partial_fill_at_supply_cap() {
        // Flat price 1.0, only 50 tokens exist
        let curve = Curve::exponential(50.0, 1e9, 1.0, 0.0).unwrap();
        let mut session = TradingSession::new(&curve);

        let fill = session.buy(80.0).unwrap();
        assert_relative_eq!(fill.tokens, 50.0);
        assert_relative_eq!(fill.currency, 50.0);
        assert_eq!(session.tokens_sold(), 50.0);
        assert_relative_eq!(session.currency_raised(), 50.0);

        assert_eq!(session.buy(10.0), Err(TradeError::SupplyExhausted));
    }

    #[test]
    fn test_supply_never_exceeds_cap() {
        let curve = Curve::polynomial(1_000.0, 1e12, vec![1.0, 0.01]).unwrap();
        let mut session = TradingSession::new(&curve);

        for amount in [100.0, 2_500.0, 7.5, 40_000.0, 1.0] {
            let _ = session.buy(amount);
            assert!(session.tokens_sold() <= curve.total_supply());
        }
    }

    #[test]
    fn test_buy_rejects_non_positive_amount() {
        let curve = linear();
        let mut session = TradingSession::new(&curve);
        assert!(matches!(
            session.buy(0.0),
            Err(TradeError::InvalidAmount { .. })
        ));
        assert!(matches!(
            session.buy(f64::NAN),
            Err(TradeError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_tiny_bisection_buy_has_no_output() {
        let curve = Curve::logarithmic(1e6, 1e9, 1.0, 10.0).unwrap();
        let mut session = TradingSession::new(&curve);
        // Far less than one bisection bracket worth of tokens
        assert!(matches!(
            session.buy(1e-6),
            Err(TradeError::NoOutput { .. })
        ));
        assert_eq!(session.tokens_sold(), 0.0);
    }

    #[test]
    fn test_quote_does_not_mutate() {
        let curve = linear();
        let session = TradingSession::new(&curve);
        let quoted = session.quote_buy(100.0);
        assert!(quoted > 0.0);
        assert_eq!(session.tokens_sold(), 0.0);
    }
}
