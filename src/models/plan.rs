use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Daily assistant query allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quota {
    Limited(u32),
    Unlimited,
}

impl Quota {
    /// Whether one more query is permitted after `used` queries today
    pub fn allows(self, used: u32) -> bool {
        match self {
            Quota::Unlimited => true,
            Quota::Limited(limit) => used < limit,
        }
    }

    /// Queries left today, `None` when unlimited
    pub fn remaining(self, used: u32) -> Option<u32> {
        match self {
            Quota::Unlimited => None,
            Quota::Limited(limit) => Some(limit.saturating_sub(used)),
        }
    }
}

/// Query permission predicate evaluated before every assistant send
pub fn can_query(quota: Quota, used: u32) -> bool {
    quota.allows(used)
}

/// Subscription tier
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
    Premium,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Free, PlanTier::Pro, PlanTier::Premium];

    /// Static plan definition for this tier
    pub fn plan(self) -> &'static Plan {
        match self {
            PlanTier::Free => &PLANS[0],
            PlanTier::Pro => &PLANS[1],
            PlanTier::Premium => &PLANS[2],
        }
    }

    pub fn quota(self) -> Quota {
        self.plan().quota
    }

    pub fn name(self) -> &'static str {
        self.plan().name
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "pro" => Ok(PlanTier::Pro),
            "premium" => Ok(PlanTier::Premium),
            other => Err(format!("Unknown plan '{}' (expected free, pro or premium)", other)),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Plan {
    pub tier: PlanTier,
    pub name: &'static str,
    pub monthly_price_usd: u32,
    pub quota: Quota,
    pub features: &'static [&'static str],
}

pub static PLANS: [Plan; 3] = [
    Plan {
        tier: PlanTier::Free,
        name: "Free",
        monthly_price_usd: 0,
        quota: Quota::Limited(5),
        features: &["5 AI queries/day", "Basic analysis", "Limited alerts"],
    },
    Plan {
        tier: PlanTier::Pro,
        name: "Pro",
        monthly_price_usd: 29,
        quota: Quota::Limited(100),
        features: &[
            "100 AI queries/day",
            "Advanced analysis",
            "Unlimited alerts",
            "Trading signals",
        ],
    },
    Plan {
        tier: PlanTier::Premium,
        name: "Premium",
        monthly_price_usd: 99,
        quota: Quota::Unlimited,
        features: &[
            "Unlimited AI queries",
            "Personalized AI",
            "Real-time analysis",
            "Priority support",
            "Exclusive strategies",
        ],
    },
];

/// Feature availability per tier, ordered free / pro / premium
pub static FEATURE_MATRIX: [(&str, [bool; 3]); 4] = [
    ("Technical analysis", [true, true, true]),
    ("Trading signals", [false, true, true]),
    ("Personalized AI", [false, false, true]),
    ("Priority support", [false, false, true]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_predicate_for_every_plan() {
        for tier in PlanTier::ALL {
            for used in 0..=150 {
                let expected = match tier.quota() {
                    Quota::Unlimited => true,
                    Quota::Limited(limit) => used < limit,
                };
                assert_eq!(can_query(tier.quota(), used), expected, "{:?} used={}", tier, used);
            }
        }
    }

    #[test]
    fn test_quotas_match_tiers() {
        assert_eq!(PlanTier::Free.quota(), Quota::Limited(5));
        assert_eq!(PlanTier::Pro.quota(), Quota::Limited(100));
        assert_eq!(PlanTier::Premium.quota(), Quota::Unlimited);
        assert!(can_query(Quota::Unlimited, u32::MAX));
    }

    #[test]
    fn test_remaining_saturates() {
        assert_eq!(Quota::Limited(5).remaining(3), Some(2));
        assert_eq!(Quota::Limited(5).remaining(9), Some(0));
        assert_eq!(Quota::Unlimited.remaining(9), None);
    }

    #[test]
    fn test_parse_tier() {
        assert_eq!("Premium".parse::<PlanTier>(), Ok(PlanTier::Premium));
        assert_eq!(" pro ".parse::<PlanTier>(), Ok(PlanTier::Pro));
        assert!("gold".parse::<PlanTier>().is_err());
    }

    #[test]
    fn test_plan_table_is_consistent() {
        for tier in PlanTier::ALL {
            assert_eq!(tier.plan().tier, tier);
            assert!(!tier.plan().features.is_empty());
        }
        assert_eq!(PlanTier::Pro.plan().monthly_price_usd, 29);
    }
}
