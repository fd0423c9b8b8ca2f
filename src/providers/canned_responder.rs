use rand::seq::SliceRandom;

use crate::traits::responder::AssistantResponder;

/// Fixed replies the simulated assistant draws from
pub const CANNED_RESPONSES: [&str; 8] = [
    "📈 Technical analysis shows bullish signals on BTC. RSI at 45 suggests a possible entry.",
    "⚠️ ETH is facing strong resistance at $2,400. Wait for a breakout before going long.",
    "🎯 I recommend diversifying: 40% BTC, 30% ETH, 20% altcoins, 10% stablecoins for this market.",
    "📊 BTC volume rose 23% over the last 4h. A strong move may be approaching.",
    "💡 DCA strategy recommended: buy $100 of BTC weekly for the next 3 months.",
    "🔥 ADA shows a reversal pattern. Stop loss at $0.45, target at $0.65.",
    "⚡ Bull market confirmed! Strong momentum in layer 1s. AVAX and SOL have potential.",
    "🎪 Careful: the market is overbought. Consider taking partial profits on long positions.",
];

/// Picks one canned reply uniformly at random, ignoring the prompt
pub struct CannedResponder {
    responses: Vec<String>,
}

impl CannedResponder {
    pub fn new() -> Self {
        Self::with_responses(CANNED_RESPONSES.iter().map(|s| s.to_string()).collect())
    }

    /// Use a custom reply set; an empty set falls back to the built-in one
    pub fn with_responses(responses: Vec<String>) -> Self {
        if responses.is_empty() {
            return Self::new();
        }
        Self { responses }
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantResponder for CannedResponder {
    fn respond(&self, _prompt: &str) -> String {
        self.responses
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_is_always_from_fixed_set() {
        let responder = CannedResponder::new();
        for _ in 0..200 {
            let reply = responder.respond("should I buy?");
            assert!(CANNED_RESPONSES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_every_reply_is_reachable() {
        let responder = CannedResponder::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(responder.respond(""));
        }
        assert_eq!(seen.len(), CANNED_RESPONSES.len());
    }

    #[test]
    fn test_empty_custom_set_falls_back() {
        let responder = CannedResponder::with_responses(vec![]);
        assert_eq!(responder.responses().len(), 8);
    }
}
