use serde::{Deserialize, Serialize};

use super::Player;

/// The four elements a piece can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Fire,
    Water,
    Earth,
    Air,
}

impl ElementType {
    /// Selection order used by the UI (matches the bowl order: Air, Fire, Earth, Water).
    pub const ALL: [ElementType; 4] = [
        ElementType::Air,
        ElementType::Fire,
        ElementType::Earth,
        ElementType::Water,
    ];

    /// The element that destroys this one.
    ///
    /// The relation is a 4-cycle: Fire is beaten by Water, Water by Earth,
    /// Earth by Air and Air by Fire.
    pub fn strong_against(self) -> ElementType {
        match self {
            ElementType::Fire => ElementType::Water,
            ElementType::Air => ElementType::Fire,
            ElementType::Water => ElementType::Earth,
            ElementType::Earth => ElementType::Air,
        }
    }

    /// Get element name for display
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Fire => "Fire",
            ElementType::Water => "Water",
            ElementType::Earth => "Earth",
            ElementType::Air => "Air",
        }
    }

    /// Single-letter symbol used by the text board rendering.
    pub fn symbol(self) -> char {
        match self {
            ElementType::Fire => 'F',
            ElementType::Water => 'W',
            ElementType::Earth => 'E',
            ElementType::Air => 'A',
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A placed piece. Two pieces are interchangeable when element and owner match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub element: ElementType,
    pub owner: Player,
}

impl Piece {
    pub fn new(element: ElementType, owner: Player) -> Self {
        Piece { element, owner }
    }

    /// True if `other` is this piece's strong counter and belongs to the opponent.
    pub fn is_threatened_by(&self, other: &Piece) -> bool {
        other.element == self.element.strong_against() && other.owner != self.owner
    }
}
