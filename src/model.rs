//! Response shapes of the Scryfall `/cards/search` endpoint.
//!
//! Only the fields the client uses are mapped. Unknown fields are ignored, missing ones default, and `null` decodes as the empty value.

use {
    itertools::Itertools as _,
    serde::{
        Deserialize,
        Deserializer
    }
};

fn nullable<'de, D: Deserializer<'de>, T: Default + Deserialize<'de>>(deserializer: D) -> Result<T, D::Error> {
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of search results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "nullable")]
    pub object: String,
    #[serde(deserialize_with = "nullable")]
    pub total_cards: u64,
    #[serde(deserialize_with = "nullable")]
    pub has_more: bool,
    pub next_page: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub data: Vec<Card>
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Card {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub mana_cost: String,
    #[serde(deserialize_with = "nullable")]
    pub type_line: String,
    #[serde(deserialize_with = "nullable")]
    pub oracle_text: String,
    #[serde(deserialize_with = "nullable")]
    pub power: String,
    #[serde(deserialize_with = "nullable")]
    pub toughness: String,
    /// Color codes such as `"R"`. Empty for colorless cards.
    #[serde(deserialize_with = "nullable")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub set_name: String,
    #[serde(deserialize_with = "nullable")]
    pub rarity: String,
    /// Absent on cards whose images live on their faces.
    pub image_uris: Option<ImageUris>
}

impl Card {
    /// `"power/toughness"`, if the card has both.
    pub fn power_toughness(&self) -> Option<String> {
        if self.power.is_empty() || self.toughness.is_empty() {
            None
        } else {
            Some(format!("{}/{}", self.power, self.toughness))
        }
    }

    pub fn colors_line(&self) -> Option<String> {
        if self.colors.is_empty() {
            None
        } else {
            Some(self.colors.iter().join(", "))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
    pub png: Option<String>,
    pub art_crop: Option<String>,
    pub border_crop: Option<String>
}
