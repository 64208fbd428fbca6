use serde::{Deserialize, Serialize};

/// What `submit_move` does when a pawn reaches the last rank without a
/// promotion piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    /// Reject with `PromotionRequired`.
    #[default]
    Strict,
    /// Promote to a queen.
    AutoQueen,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub promotion: PromotionPolicy,
}

impl GameConfig {
    pub fn with_promotion(mut self, promotion: PromotionPolicy) -> Self {
        self.promotion = promotion;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browser_json() {
        let cfg: GameConfig = serde_json::from_str(r#"{"promotion":"auto_queen"}"#).unwrap();
        assert_eq!(cfg.promotion, PromotionPolicy::AutoQueen);
        let empty: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GameConfig::default());
        assert_eq!(empty.promotion, PromotionPolicy::Strict);
    }
}
