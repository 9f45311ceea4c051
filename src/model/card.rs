use serde::{Deserialize, Serialize};

use crate::gacha::types::{lenient_f64, opt_string_or_number};

/// Display fields consulted, in order, when naming a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleField {
    Title,
    PlayerName,
    CardName,
}

pub const TITLE_PRIORITY: &[TitleField] =
    &[TitleField::Title, TitleField::PlayerName, TitleField::CardName];

pub const UNKNOWN_TITLE: &str = "Unknown card";

/// Display metadata. The analytics engine never reads these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub year: Option<String>,
    #[serde(default, rename = "set")]
    pub set_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub grading: Option<String>,
    #[serde(default, rename = "image", alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl CardMetadata {
    pub fn field(&self, field: TitleField) -> Option<&str> {
        let value = match field {
            TitleField::Title => self.title.as_deref(),
            TitleField::PlayerName => self.player_name.as_deref(),
            TitleField::CardName => self.card_name.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// First non-blank field in `priority`, or [`UNKNOWN_TITLE`].
    pub fn resolve_title(&self, priority: &[TitleField]) -> &str {
        priority
            .iter()
            .find_map(|f| self.field(*f))
            .unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_title(&self) -> &str {
        self.resolve_title(TITLE_PRIORITY)
    }

    /// Year, set and grading joined for a secondary label; empty when none are set.
    pub fn subtitle(&self) -> String {
        [&self.year, &self.set_name, &self.grading]
            .into_iter()
            .filter_map(|v| v.as_deref().map(str::trim).filter(|s| !s.is_empty()))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// One possible pull from a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default = "not_a_number", deserialize_with = "lenient_f64")]
    pub fmv: f64,
    #[serde(default = "not_a_number", deserialize_with = "lenient_f64")]
    pub probability: f64,
    #[serde(flatten)]
    pub metadata: CardMetadata,
}

fn not_a_number() -> f64 {
    f64::NAN
}

impl Card {
    pub fn new(fmv: f64, probability: f64) -> Self {
        Self {
            fmv,
            probability,
            metadata: CardMetadata::default(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.metadata.title = Some(title.to_string());
        self
    }

    pub fn title(&self) -> &str {
        self.metadata.display_title()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_title_skips_blank_fields() {
        let meta = CardMetadata {
            title: Some("   ".to_string()),
            player_name: None,
            card_name: Some("Charizard".to_string()),
            ..CardMetadata::default()
        };
        assert_eq!(meta.display_title(), "Charizard");
        assert_eq!(
            meta.resolve_title(&[TitleField::PlayerName]),
            UNKNOWN_TITLE
        );
    }

    #[test]
    fn subtitle_joins_present_fields() {
        let meta = CardMetadata {
            year: Some("1999".to_string()),
            grading: Some("PSA 10".to_string()),
            ..CardMetadata::default()
        };
        assert_eq!(meta.subtitle(), "1999 · PSA 10");
        assert_eq!(CardMetadata::default().subtitle(), "");
    }
}
