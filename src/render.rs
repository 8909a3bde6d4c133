//! Plain-text listing of search results.

use {
    std::io::{
        self,
        prelude::*
    },
    crate::model::Card
};

const RULE_WIDTH: usize = 80;

pub fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Writes the numbered card listing. Callers handle the empty case themselves.
pub fn render(cards: &[Card], out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Found {} card(s):", cards.len())?;
    writeln!(out, "{}", rule('='))?;
    for (idx, card) in cards.iter().enumerate() {
        writeln!(out)?;
        if card.mana_cost.is_empty() {
            writeln!(out, "{}. {}", idx + 1, card.name)?;
        } else {
            writeln!(out, "{}. {} {}", idx + 1, card.name, card.mana_cost)?;
        }
        writeln!(out, "   Type: {}", card.type_line)?;
        if !card.oracle_text.is_empty() {
            writeln!(out, "   Text: {}", card.oracle_text)?;
        }
        if let Some(pt) = card.power_toughness() {
            writeln!(out, "   P/T: {}", pt)?;
        }
        writeln!(out, "   Set: {} ({})", card.set_name, card.rarity)?;
        if let Some(colors) = card.colors_line() {
            writeln!(out, "   Colors: {}", colors)?;
        }
        if idx + 1 < cards.len() {
            writeln!(out, "{}", rule('-'))?;
        }
    }
    writeln!(out, "{}", rule('='))
}
