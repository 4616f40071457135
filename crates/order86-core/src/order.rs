//! The order taxonomy: themed affinity groups assigned to each wizard.

use serde::{Deserialize, Serialize};

/// The seven affinity orders a wizard can belong to.
///
/// Each order carries a display color used for accents, badges, and the
/// OG card border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    Flame,
    Radiant,
    Deep,
    Wild,
    Arcane,
    Heart,
    Wanderer,
}

impl Order {
    /// Display color as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            Self::Flame => "#ff4500",
            Self::Radiant => "#ffd700",
            Self::Deep => "#1e90ff",
            Self::Wild => "#228b22",
            Self::Arcane => "#7b54c9",
            Self::Heart => "#c55bb7",
            Self::Wanderer => "#7b54c9",
        }
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Flame => "Flame",
            Self::Radiant => "Radiant",
            Self::Deep => "Deep",
            Self::Wild => "Wild",
            Self::Arcane => "Arcane",
            Self::Heart => "Heart",
            Self::Wanderer => "Wanderer",
        }
    }

    /// Badge text shown on pages and cards, e.g. "Flame Order".
    pub fn badge(self) -> String {
        format!("{} Order", self.name())
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_colors() {
        assert_eq!(Order::Flame.color(), "#ff4500");
        assert_eq!(Order::Radiant.color(), "#ffd700");
        assert_eq!(Order::Deep.color(), "#1e90ff");
        // Wanderer shares the Arcane purple
        assert_eq!(Order::Wanderer.color(), Order::Arcane.color());
    }

    #[test]
    fn order_badge_text() {
        assert_eq!(Order::Flame.badge(), "Flame Order");
        assert_eq!(Order::Wanderer.badge(), "Wanderer Order");
    }

    #[test]
    fn order_display() {
        assert_eq!(Order::Heart.to_string(), "Heart");
    }

    #[test]
    fn order_deserializes_from_variant_name() {
        let order: Order = serde_json::from_str("\"Wild\"").unwrap();
        assert_eq!(order, Order::Wild);
    }

    #[test]
    fn order_rejects_unknown_variant() {
        assert!(serde_json::from_str::<Order>("\"Shadow\"").is_err());
    }
}
