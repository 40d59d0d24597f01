//! Element types for creatures, weaknesses and energy.

use serde::{Deserialize, Serialize};

/// Element type.
///
/// `Normal` doubles as the generic move-cost bucket: a `Normal` cost can be
/// paid with energy of any type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Grass,
    Fire,
    Water,
    Lightning,
    Psychic,
    Fighting,
    Darkness,
    Metal,
    Dragon,
    #[serde(alias = "Colorless")]
    Normal,
}

impl Element {
    /// Types an energy zone may generate.
    pub const ENERGY: [Element; 8] = [
        Element::Grass,
        Element::Fire,
        Element::Water,
        Element::Lightning,
        Element::Psychic,
        Element::Fighting,
        Element::Darkness,
        Element::Metal,
    ];

    /// Is this the generic cost bucket?
    #[must_use]
    pub const fn is_generic(self) -> bool {
        matches!(self, Element::Normal)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorless_alias() {
        let normal: Element = serde_json::from_str("\"Colorless\"").unwrap();
        assert_eq!(normal, Element::Normal);
        assert!(normal.is_generic());
        assert_eq!(serde_json::to_string(&normal).unwrap(), "\"Normal\"");
    }

    #[test]
    fn test_energy_types_are_concrete() {
        assert!(Element::ENERGY.iter().all(|e| !e.is_generic()));
        assert!(!Element::ENERGY.contains(&Element::Dragon));
    }
}
