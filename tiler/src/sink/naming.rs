//! Output file naming.

use std::fmt;

use crate::tile::TileCoord;

/// Default pattern: `{zoom}_{x}_{y}.png`.
pub const DEFAULT_PATTERN: &str = "{zoom}_{x}_{y}.png";

/// File name template for tiles.
///
/// Every occurrence of `{zoom}`, `{x}` and `{y}` is replaced literally.
/// Any other text, including unknown placeholders, is kept verbatim. A
/// pattern without placeholders maps every tile to the same name, so the
/// last tile written wins.
///
/// # Example
///
/// ```
/// use tiler::sink::NamePattern;
/// use tiler::tile::TileCoord;
///
/// let pattern = NamePattern::default();
/// assert_eq!(pattern.render(TileCoord::new(2, 3, 1)), "2_3_1.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamePattern(String);

impl NamePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute the coordinate into the pattern.
    pub fn render(&self, coord: TileCoord) -> String {
        self.0
            .replace("{zoom}", &coord.level.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }

    /// Whether the pattern yields the same name for every tile.
    pub fn is_constant(&self) -> bool {
        !["{zoom}", "{x}", "{y}"]
            .iter()
            .any(|placeholder| self.0.contains(placeholder))
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NamePattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for NamePattern {
    fn from(pattern: String) -> Self {
        Self(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let pattern = NamePattern::default();
        assert_eq!(pattern.as_str(), "{zoom}_{x}_{y}.png");
        assert_eq!(pattern.render(TileCoord::new(2, 3, 1)), "2_3_1.png");
    }

    #[test]
    fn test_repeated_placeholders() {
        let pattern = NamePattern::new("{zoom}/{x}-{x}/{y}.{zoom}");
        assert_eq!(pattern.render(TileCoord::new(4, 7, 9)), "4/7-7/9.4");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let pattern = NamePattern::new("{z}_{x}_{row}.jpg");
        assert_eq!(pattern.render(TileCoord::new(1, 0, 1)), "{z}_0_{row}.jpg");
    }

    #[test]
    fn test_constant_pattern() {
        let pattern = NamePattern::new("tile.png");
        assert!(pattern.is_constant());
        assert_eq!(pattern.render(TileCoord::new(0, 0, 0)), "tile.png");
        assert_eq!(pattern.render(TileCoord::new(3, 5, 2)), "tile.png");
    }

    #[test]
    fn test_is_constant_false_with_any_placeholder() {
        assert!(!NamePattern::new("{y}.png").is_constant());
        assert!(!NamePattern::default().is_constant());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_default_pattern_distinct_per_coord(
                level in 0u32..20,
                a in 0u32..1_000_000,
                b in 0u32..1_000_000,
                c in 0u32..1_000_000,
                d in 0u32..1_000_000
            ) {
                let pattern = NamePattern::default();
                let first = pattern.render(TileCoord::new(level, a, b));
                let second = pattern.render(TileCoord::new(level, c, d));
                prop_assert_eq!(first == second, (a, b) == (c, d));
            }

            #[test]
            fn test_literal_text_untouched(text in "[a-z_./]{0,16}") {
                let pattern = NamePattern::new(text.clone());
                prop_assert_eq!(pattern.render(TileCoord::new(1, 2, 3)), text);
            }
        }
    }
}
