use abt_types::{Money, ShareCount};

/// Outcome of a [`RiskPolicy`] check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RiskDecision {
    Pass,
    Reject(String),
}

/// A stateless, side-effect-free pre-trade predicate.
pub trait RiskPolicy {
    fn check(&self, price: Money, volume: ShareCount) -> RiskDecision;
}

/// Rejects non-positive prices (MARKET orders may legitimately carry a
/// zero `limit_price` pending a downstream price source, so this only
/// rejects strictly negative prices).
pub struct NonNegativePricePolicy;

impl RiskPolicy for NonNegativePricePolicy {
    fn check(&self, price: Money, _volume: ShareCount) -> RiskDecision {
        if price.is_negative() {
            RiskDecision::Reject("price must not be negative".to_string())
        } else {
            RiskDecision::Pass
        }
    }
}

/// Rejects non-positive volumes.
pub struct PositiveVolumePolicy;

impl RiskPolicy for PositiveVolumePolicy {
    fn check(&self, _price: Money, volume: ShareCount) -> RiskDecision {
        if volume <= 0 {
            RiskDecision::Reject("volume must be positive".to_string())
        } else {
            RiskDecision::Pass
        }
    }
}

/// A pipeline of policies, short-circuiting on the first rejection.
pub struct RiskGate {
    policies: Vec<Box<dyn RiskPolicy>>,
}

impl Default for RiskGate {
    fn default() -> Self {
        Self {
            policies: vec![Box::new(NonNegativePricePolicy), Box::new(PositiveVolumePolicy)],
        }
    }
}

impl RiskGate {
    pub fn new(policies: Vec<Box<dyn RiskPolicy>>) -> Self {
        Self { policies }
    }

    pub fn check(&self, price: Money, volume: ShareCount) -> RiskDecision {
        for policy in &self.policies {
            match policy.check(price, volume) {
                RiskDecision::Pass => continue,
                reject @ RiskDecision::Reject(_) => return reject,
            }
        }
        RiskDecision::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gate_rejects_zero_volume() {
        let gate = RiskGate::default();
        let decision = gate.check(Money::from_f64(10.0), 0);
        assert_eq!(decision, RiskDecision::Reject("volume must be positive".to_string()));
    }

    #[test]
    fn default_gate_passes_well_formed_order() {
        let gate = RiskGate::default();
        assert_eq!(gate.check(Money::from_f64(10.0), 100), RiskDecision::Pass);
    }

    #[test]
    fn default_gate_allows_zero_price_for_market_orders() {
        let gate = RiskGate::default();
        assert_eq!(gate.check(Money::ZERO, 100), RiskDecision::Pass);
    }

    #[test]
    fn default_gate_rejects_negative_price() {
        let gate = RiskGate::default();
        let decision = gate.check(Money::from_f64(-1.0), 100);
        assert!(matches!(decision, RiskDecision::Reject(_)));
    }
}
