use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Point = Point2<f64>;
pub type Vector = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    C,
    H,
    O,
    N,
    Cl,
    S,
    P,
    Br,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BondOrder {
    Single,
    Double,
    Triple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondId(pub(crate) u64);

/// RGBA color with 8-bit channels and a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Element {
    pub const ALL: [Element; 8] = [
        Element::C,
        Element::H,
        Element::O,
        Element::N,
        Element::Cl,
        Element::S,
        Element::P,
        Element::Br,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::C => "C",
            Element::H => "H",
            Element::O => "O",
            Element::N => "N",
            Element::Cl => "Cl",
            Element::S => "S",
            Element::P => "P",
            Element::Br => "Br",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Element::C => Color::rgb(0x11, 0x11, 0x11),
            Element::H => Color::rgb(0xf0, 0xf0, 0xf0),
            Element::O => Color::rgb(0xff, 0x1e, 0x1e),
            Element::N => Color::rgb(0x1e, 0x90, 0xff),
            Element::Cl => Color::rgb(0x32, 0xcd, 0x32),
            Element::S => Color::rgb(0xff, 0xd7, 0x00),
            Element::P => Color::rgb(0xff, 0x8c, 0x00),
            Element::Br => Color::rgb(0xa5, 0x2a, 0x2a),
        }
    }

    /// Chemically accepted valences, in ascending order.
    pub fn valences(&self) -> &'static [u32] {
        match self {
            Element::C => &[4],
            Element::H => &[1],
            Element::O => &[2],
            Element::N => &[3],
            Element::Cl => &[1],
            Element::S => &[2, 4, 6],
            Element::P => &[3, 5],
            Element::Br => &[1],
        }
    }

    pub fn max_valence(&self) -> u32 {
        self.valences().iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .iter()
            .copied()
            .find(|e| e.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid element symbol: {}", s))
    }
}

impl BondOrder {
    pub fn value(&self) -> u32 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    /// Number of parallel strokes used to draw the bond.
    pub fn stroke_count(&self) -> usize {
        self.value() as usize
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for BondOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "Single" | "single" => Ok(BondOrder::Single),
            "2" | "Double" | "double" => Ok(BondOrder::Double),
            "3" | "Triple" | "triple" => Ok(BondOrder::Triple),
            _ => Err(format!("Invalid bond order: {}", s)),
        }
    }
}

impl TryFrom<u8> for BondOrder {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BondOrder::Single),
            2 => Ok(BondOrder::Double),
            3 => Ok(BondOrder::Triple),
            _ => Err(format!("Invalid bond order: {}", value)),
        }
    }
}

impl From<BondOrder> for u8 {
    fn from(order: BondOrder) -> Self {
        order.value() as u8
    }
}

impl AtomId {
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Four hex digits taken from the low bits of the id, used in compact labels.
    pub fn short_tag(&self) -> String {
        format!("{:04x}", self.0 & 0xffff)
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

impl BondId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BondId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_symbol_round_trips_through_from_str() {
        for element in Element::ALL {
            assert_eq!(Element::from_str(element.symbol()).unwrap(), element);
        }
    }

    #[test]
    fn element_from_str_is_case_insensitive_and_trims() {
        assert_eq!(Element::from_str("cl").unwrap(), Element::Cl);
        assert_eq!(Element::from_str(" BR ").unwrap(), Element::Br);
    }

    #[test]
    fn element_from_str_rejects_elements_outside_the_palette() {
        assert!(Element::from_str("Fe").is_err());
        assert!(Element::from_str("").is_err());
        assert!(Element::from_str("Carbon").is_err());
    }

    #[test]
    fn element_valences_match_reference_table() {
        assert_eq!(Element::C.valences(), &[4]);
        assert_eq!(Element::S.valences(), &[2, 4, 6]);
        assert_eq!(Element::P.valences(), &[3, 5]);
        assert_eq!(Element::S.max_valence(), 6);
        assert_eq!(Element::H.max_valence(), 1);
    }

    #[test]
    fn element_colors_use_palette_values() {
        assert_eq!(Element::O.color().to_hex(), "#ff1e1e");
        assert_eq!(Element::N.color().to_hex(), "#1e90ff");
        assert_eq!(Element::C.color().to_hex(), "#111111");
    }

    #[test]
    fn bond_order_value_and_display() {
        assert_eq!(BondOrder::Single.value(), 1);
        assert_eq!(BondOrder::Double.value(), 2);
        assert_eq!(BondOrder::Triple.value(), 3);
        assert_eq!(format!("{}", BondOrder::Triple), "3");
    }

    #[test]
    fn bond_order_parses_numeric_and_named_inputs() {
        assert_eq!(BondOrder::from_str("2").unwrap(), BondOrder::Double);
        assert_eq!(BondOrder::from_str("triple").unwrap(), BondOrder::Triple);
        assert!(BondOrder::from_str("1.5").is_err());
        assert!(BondOrder::try_from(4u8).is_err());
    }

    #[test]
    fn atom_id_short_tag_truncates_to_four_hex_digits() {
        assert_eq!(AtomId(7).short_tag(), "0007");
        assert_eq!(AtomId(0x1_2345).short_tag(), "2345");
        assert_eq!(format!("{}", AtomId(12)), "a12");
    }

    #[test]
    fn color_display_switches_to_rgba_for_translucent_colors() {
        assert_eq!(format!("{}", Color::rgb(0x1e, 0x29, 0x3b)), "#1e293b");
        assert_eq!(
            format!("{}", Color::rgba(255, 255, 255, 0.2)),
            "rgba(255, 255, 255, 0.2)"
        );
    }
}
