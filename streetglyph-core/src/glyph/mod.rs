//! Seven-segment style glyph alphabet
//!
//! Every supported character is drawn with a subset of stroke roles. Each
//! role has a fixed anchor inside a character cell, expressed in meters
//! relative to the cell origin, together with the street direction that can
//! represent it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Direction;

/// One edge of a seven-segment style glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeRole {
    Top,
    TopLeft,
    TopRight,
    Middle,
    BottomLeft,
    BottomRight,
    Bottom,
    Diagonal,
}

/// Anchor of a stroke role inside one character cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPosition {
    /// Horizontal offset in meters
    pub x: f64,
    /// Vertical offset in meters
    pub y: f64,
    pub direction: Direction,
}

impl TargetPosition {
    const fn new(x: f64, y: f64, direction: Direction) -> Self {
        Self { x, y, direction }
    }
}

impl StrokeRole {
    pub fn target_position(self) -> TargetPosition {
        use Direction::{Diagonal, Horizontal, Vertical};

        match self {
            StrokeRole::Top => TargetPosition::new(0.0, 100.0, Horizontal),
            StrokeRole::TopRight => TargetPosition::new(50.0, 50.0, Vertical),
            StrokeRole::TopLeft => TargetPosition::new(-50.0, 50.0, Vertical),
            StrokeRole::Middle => TargetPosition::new(0.0, 0.0, Horizontal),
            StrokeRole::BottomRight => TargetPosition::new(50.0, -50.0, Vertical),
            StrokeRole::BottomLeft => TargetPosition::new(-50.0, -50.0, Vertical),
            StrokeRole::Bottom => TargetPosition::new(0.0, -100.0, Horizontal),
            StrokeRole::Diagonal => TargetPosition::new(0.0, -50.0, Diagonal),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrokeRole::Top => "top",
            StrokeRole::TopLeft => "top-left",
            StrokeRole::TopRight => "top-right",
            StrokeRole::Middle => "middle",
            StrokeRole::BottomLeft => "bottom-left",
            StrokeRole::BottomRight => "bottom-right",
            StrokeRole::Bottom => "bottom",
            StrokeRole::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for StrokeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use StrokeRole::{Bottom, BottomLeft, BottomRight, Diagonal, Middle, Top, TopLeft, TopRight};

// Role order matters: matching is greedy in this order.
const ZERO: &[StrokeRole] = &[Top, TopRight, BottomRight, Bottom, BottomLeft, TopLeft];
const ONE: &[StrokeRole] = &[TopRight, BottomRight];
const TWO: &[StrokeRole] = &[Top, TopRight, Middle, BottomLeft, Bottom];
const THREE: &[StrokeRole] = &[Top, TopRight, Middle, BottomRight, Bottom];
const FOUR: &[StrokeRole] = &[TopLeft, Middle, TopRight, BottomRight];
const FIVE: &[StrokeRole] = &[Top, TopLeft, Middle, BottomRight, Bottom];
const SIX: &[StrokeRole] = &[Top, TopLeft, Middle, BottomLeft, Bottom, BottomRight];
const SEVEN: &[StrokeRole] = &[Top, TopRight, BottomRight];
const EIGHT: &[StrokeRole] = &[
    Top,
    TopLeft,
    TopRight,
    Middle,
    BottomLeft,
    BottomRight,
    Bottom,
];
const NINE: &[StrokeRole] = &[Top, TopLeft, TopRight, Middle, BottomRight, Bottom];
const LETTER_A: &[StrokeRole] = &[Top, TopLeft, TopRight, Middle, BottomLeft, BottomRight];
const LETTER_P: &[StrokeRole] = &[Top, TopLeft, TopRight, Middle, BottomLeft];
const LETTER_R: &[StrokeRole] = &[Top, TopLeft, TopRight, Middle, BottomLeft, Diagonal];

/// Stroke roles that draw `character`, or `None` when the glyph is unknown
pub fn glyph_pattern(character: char) -> Option<&'static [StrokeRole]> {
    let pattern = match character {
        '0' => ZERO,
        '1' => ONE,
        '2' => TWO,
        '3' => THREE,
        '4' => FOUR,
        '5' => FIVE,
        '6' => SIX,
        '7' => SEVEN,
        '8' => EIGHT,
        '9' => NINE,
        'A' => LETTER_A,
        'P' => LETTER_P,
        'R' => LETTER_R,
        _ => return None,
    };
    Some(pattern)
}

/// Characters with a defined glyph
pub fn supported_characters() -> impl Iterator<Item = char> {
    ('0'..='9').chain(['A', 'P', 'R'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_uses_every_seven_segment_role() {
        let pattern = glyph_pattern('8').unwrap();
        assert_eq!(pattern.len(), 7);
        assert!(!pattern.contains(&Diagonal));
    }

    #[test]
    fn unknown_characters_have_no_pattern() {
        assert!(glyph_pattern('Z').is_none());
        assert!(glyph_pattern(' ').is_none());
        assert!(glyph_pattern('a').is_none());
    }

    #[test]
    fn every_supported_character_has_a_pattern() {
        for character in supported_characters() {
            let pattern = glyph_pattern(character).unwrap();
            assert!(!pattern.is_empty(), "{character} has an empty pattern");
        }
    }

    #[test]
    fn vertical_roles_sit_on_the_cell_sides() {
        for role in [TopLeft, TopRight, BottomLeft, BottomRight] {
            let target = role.target_position();
            assert_eq!(target.direction, Direction::Vertical);
            assert_eq!(target.x.abs(), 50.0);
        }
        assert_eq!(Top.target_position().y, 100.0);
        assert_eq!(Bottom.target_position().y, -100.0);
    }

    #[test]
    fn letter_r_carries_a_diagonal_stroke() {
        let pattern = glyph_pattern('R').unwrap();
        assert_eq!(pattern.last(), Some(&Diagonal));
        assert_eq!(Diagonal.target_position().direction, Direction::Diagonal);
    }
}
