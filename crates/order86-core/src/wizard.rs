//! The wizard attribute record.

use serde::Deserialize;

use crate::order::Order;

/// A single wizard's attributes, loaded from the bundled data source.
///
/// The record set is fixed for the lifetime of the process; nothing
/// mutates these after startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardRecord {
    /// Unique identifier and sole lookup key.
    pub id: u32,

    /// Ranking value, display-only.
    pub rank: u32,

    /// Affinity order, drives display color and grouping.
    pub order: Order,

    /// Optional display name; `display_name` falls back to "Wizard #<id>".
    #[serde(default)]
    pub suggested_name: Option<String>,

    /// Optional lore text, possibly carrying `*emphasis*` markup.
    #[serde(default)]
    pub suggested_story: Option<String>,

    pub fur: String,
    pub pattern: String,
    pub eyes: String,
    pub clothes: String,

    #[serde(default)]
    pub mouth: Option<String>,

    pub realm: String,

    /// Portrait asset path, relative to the document root.
    pub image: String,

    /// Optional external marketplace URL.
    #[serde(default)]
    pub marketplace: Option<String>,

    /// Optional 𝕏 handle, with or without a leading `@`.
    #[serde(default)]
    pub twitter: Option<String>,
}

impl WizardRecord {
    /// The display name, falling back to a generated label.
    pub fn display_name(&self) -> String {
        self.suggested_name
            .clone()
            .unwrap_or_else(|| format!("Wizard #{}", self.id))
    }

    /// One-sentence description used when no lore is present.
    pub fn fallback_description(&self) -> String {
        format!(
            "{} — a {} {} of the {} Order from {}.",
            self.display_name(),
            self.fur,
            self.pattern,
            self.order,
            self.realm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json(name_field: &str) -> String {
        format!(
            r#"{{
                "id": 7, "rank": 1234, "order": "Flame", {name_field}
                "fur": "Copper", "pattern": "Striped", "eyes": "Amber",
                "clothes": "Cloak", "realm": "Crucible", "image": "wizards/7.png"
            }}"#
        )
    }

    #[test]
    fn parses_with_optional_fields_missing() {
        let record: WizardRecord = serde_json::from_str(&minimal_json("")).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.order, Order::Flame);
        assert!(record.suggested_name.is_none());
        assert!(record.mouth.is_none());
        assert!(record.marketplace.is_none());
        assert!(record.twitter.is_none());
    }

    #[test]
    fn parses_camel_case_names() {
        let record: WizardRecord =
            serde_json::from_str(&minimal_json(r#""suggestedName": "Ashbound","#)).unwrap();
        assert_eq!(record.suggested_name.as_deref(), Some("Ashbound"));
    }

    #[test]
    fn display_name_prefers_suggested() {
        let record: WizardRecord =
            serde_json::from_str(&minimal_json(r#""suggestedName": "Ashbound","#)).unwrap();
        assert_eq!(record.display_name(), "Ashbound");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let record: WizardRecord = serde_json::from_str(&minimal_json("")).unwrap();
        assert_eq!(record.display_name(), "Wizard #7");
    }

    #[test]
    fn fallback_description_mentions_traits_and_order() {
        let record: WizardRecord = serde_json::from_str(&minimal_json("")).unwrap();
        let desc = record.fallback_description();
        assert!(desc.contains("Copper"));
        assert!(desc.contains("Striped"));
        assert!(desc.contains("Flame Order"));
        assert!(desc.contains("Crucible"));
    }

    #[test]
    fn rejects_unknown_order() {
        let json = minimal_json("").replace("Flame", "Shadow");
        assert!(serde_json::from_str::<WizardRecord>(&json).is_err());
    }
}
