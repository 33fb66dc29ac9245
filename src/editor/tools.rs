use crate::model::types::{BondOrder, Element};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Active tool of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    /// Drags from atoms create bonds; empty clicks do nothing.
    Select,
    /// Empty clicks place atoms; drags from atoms create bonds.
    #[default]
    Atom,
    /// Bonds are implied by drags; empty clicks do nothing.
    Bond,
    /// Clicks delete the atom (or bond) under the pointer.
    Eraser,
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            ToolMode::Select => "select",
            ToolMode::Atom => "atom",
            ToolMode::Bond => "bond",
            ToolMode::Eraser => "eraser",
        }
    }

    pub fn places_atoms(&self) -> bool {
        matches!(self, ToolMode::Atom)
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(ToolMode::Select),
            "atom" => Ok(ToolMode::Atom),
            "bond" => Ok(ToolMode::Bond),
            "eraser" | "erase" => Ok(ToolMode::Eraser),
            _ => Err(format!("Invalid tool mode: {}", s)),
        }
    }
}

/// Interaction parameters chosen in the tool palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSettings {
    pub mode: ToolMode,
    pub element: Element,
    pub bond_order: BondOrder,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            mode: ToolMode::Atom,
            element: Element::C,
            bond_order: BondOrder::Single,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_mode_parses_names_and_alias() {
        assert_eq!(ToolMode::from_str("atom").unwrap(), ToolMode::Atom);
        assert_eq!(ToolMode::from_str("erase").unwrap(), ToolMode::Eraser);
        assert!(ToolMode::from_str("lasso").is_err());
    }

    #[test]
    fn only_atom_mode_places_atoms() {
        assert!(ToolMode::Atom.places_atoms());
        assert!(!ToolMode::Bond.places_atoms());
        assert!(!ToolMode::Select.places_atoms());
        assert!(!ToolMode::Eraser.places_atoms());
    }

    #[test]
    fn default_settings_draw_single_bonded_carbon() {
        let settings = ToolSettings::default();

        assert_eq!(settings.mode, ToolMode::Atom);
        assert_eq!(settings.element, Element::C);
        assert_eq!(settings.bond_order, BondOrder::Single);
    }
}
