//! Terrain alphabet for player maps.
//!
//! Every map cell holds exactly one [`Terrain`]. The printable symbol of each
//! variant is what players see and what the grid encoding stores, so symbols
//! must stay stable once maps have been persisted.

use serde::{Deserialize, Serialize};

/// One map-cell category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Forest,
    Desert,
    Mountain,
    Volcano,
    Ocean,
    Sprout,
}

impl Terrain {
    /// The full six-symbol alphabet used by the map generator.
    pub const ALL: [Terrain; 6] = [
        Terrain::Forest,
        Terrain::Desert,
        Terrain::Mountain,
        Terrain::Volcano,
        Terrain::Ocean,
        Terrain::Sprout,
    ];

    /// Printable symbol. Desert and mountain carry a trailing U+FE0F
    /// (emoji presentation selector).
    pub fn symbol(self) -> &'static str {
        match self {
            Terrain::Forest => "🌳",
            Terrain::Desert => "🏜\u{fe0f}",
            Terrain::Mountain => "🏔\u{fe0f}",
            Terrain::Volcano => "🌋",
            Terrain::Ocean => "🌊",
            Terrain::Sprout => "🌱",
        }
    }

    /// Reverse of [`Terrain::symbol`]. Only exact symbols are accepted.
    pub fn from_symbol(symbol: &str) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|t| t.symbol() == symbol)
    }

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Forest => "forest",
            Terrain::Desert => "desert",
            Terrain::Mountain => "mountain",
            Terrain::Volcano => "volcano",
            Terrain::Ocean => "ocean",
            Terrain::Sprout => "sprout",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_unique_and_reversible() {
        for t in Terrain::ALL {
            assert_eq!(Terrain::from_symbol(t.symbol()), Some(t));
            let same = Terrain::ALL.iter().filter(|o| o.symbol() == t.symbol()).count();
            assert_eq!(same, 1, "duplicate symbol for {}", t.name());
        }
    }

    #[test]
    fn bare_desert_without_selector_is_rejected() {
        assert_eq!(Terrain::from_symbol("🏜"), None);
        assert_eq!(Terrain::from_symbol(""), None);
        assert_eq!(Terrain::from_symbol("forest"), None);
    }
}
