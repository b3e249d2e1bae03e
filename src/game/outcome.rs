//! Static outcome table: what happens when a player steps onto a cell.
//!
//! Stateless by construction. Selecting the same terrain always yields the
//! same text, and nothing about the selection is persisted.

use super::terrain::Terrain;

/// Returned for any symbol that has no table entry.
pub const UNEXPECTED_TERRAIN: &str = "Something went wrong 😕 (unexpected terrain)";

/// One entry per alphabet symbol, keyed by the printable symbol.
const OUTCOMES: [(&str, &str); 6] = [
    ("🌳", "Congratulations 🥳! You built a castle 🏰."),
    ("🏜\u{fe0f}", "You died from a strange cactus wound 🌵."),
    ("🏔\u{fe0f}", "You fell from the mountain top 🏔️."),
    ("🌋", "You burned in the lava 🌋."),
    ("🌊", "You drowned in the ocean 🌊."),
    ("🌱", "You were eaten by a tiny sprout 🌱."),
];

/// Outcome text for a raw terrain symbol, falling back to [`UNEXPECTED_TERRAIN`].
pub fn lookup(symbol: &str) -> &'static str {
    OUTCOMES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, text)| *text)
        .unwrap_or(UNEXPECTED_TERRAIN)
}

/// Outcome text for a terrain cell.
pub fn for_terrain(terrain: Terrain) -> &'static str {
    lookup(terrain.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_terrain_has_its_own_outcome() {
        let mut seen = Vec::new();
        for t in Terrain::ALL {
            let text = for_terrain(t);
            assert_ne!(text, UNEXPECTED_TERRAIN, "missing outcome for {}", t.name());
            assert!(!seen.contains(&text));
            seen.push(text);
        }
        assert_eq!(OUTCOMES.len(), Terrain::ALL.len());
    }

    #[test]
    fn unknown_symbol_falls_back() {
        assert_eq!(lookup("🏰"), UNEXPECTED_TERRAIN);
        assert_eq!(lookup(""), UNEXPECTED_TERRAIN);
        assert_eq!(lookup("🏜"), UNEXPECTED_TERRAIN);
    }

    #[test]
    fn forest_builds_a_castle() {
        assert!(for_terrain(Terrain::Forest).contains("castle"));
        assert!(for_terrain(Terrain::Ocean).contains("drowned"));
    }
}
