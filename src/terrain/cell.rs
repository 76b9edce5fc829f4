//! Cell classification and gameplay attributes

use serde::{Deserialize, Serialize};

/// Per-cell terrain classification.
///
/// Exactly one cell of a generated course is `Hole`; the tee is tracked as
/// a coordinate alongside the grid, not as a classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Hole,
    Fairway,
    Rough,
    Water,
    Sand,
    Tree,
    Rock,
}

/// How a cell obstructs a ball travelling through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Blockage {
    /// The ball passes freely.
    Open,
    /// The ball may clip an obstacle and stop short (trees).
    Stick,
    /// The ball cannot enter (rocks).
    Block,
}

impl CellKind {
    pub fn blockage(&self) -> Blockage {
        match self {
            CellKind::Tree => Blockage::Stick,
            CellKind::Rock => Blockage::Block,
            _ => Blockage::Open,
        }
    }

    /// Landing here costs a penalty drop.
    pub fn out_of_bounds(&self) -> bool {
        matches!(self, CellKind::Water)
    }

    /// Adjustment applied to the next stroke's distance roll.
    pub fn stroke_modifier(&self) -> i32 {
        match self {
            CellKind::Sand => -1,
            _ => 0,
        }
    }

    /// Extra roll distance granted when the ball lands here.
    pub fn roll_bonus(&self) -> i32 {
        match self {
            CellKind::Fairway => 1,
            _ => 0,
        }
    }

    /// Single-character code used for ASCII course rendering.
    pub fn glyph(&self) -> char {
        match self {
            CellKind::Hole => 'O',
            CellKind::Fairway => ':',
            CellKind::Rough => '.',
            CellKind::Water => '~',
            CellKind::Sand => 's',
            CellKind::Tree => 'T',
            CellKind::Rock => '#',
        }
    }
}
