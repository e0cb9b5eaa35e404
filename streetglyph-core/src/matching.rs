//! Assignment of street segments to glyph strokes
//!
//! Matching is greedy: characters are processed left to right, each role of a
//! character takes the best scoring unused segment of the right direction.
//! Segments are never shared between roles or characters of the same text.

use hashbrown::HashSet;
use log::{debug, info, warn};

use crate::METERS_PER_DEGREE;
use crate::glyph::{StrokeRole, TargetPosition, glyph_pattern, supported_characters};
use crate::model::{MatchedSegment, StreetSegment, WayId};

/// Why part of the text produced no matched segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The character has no glyph pattern
    UnknownGlyph,
    /// No unused segment with the role's direction was left
    NoCandidate(StrokeRole),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Position of the character in the text
    pub index: usize,
    pub character: char,
    pub reason: SkipReason,
}

/// Outcome of matching a whole text
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    pub matched: Vec<MatchedSegment>,
    pub skipped: Vec<Skipped>,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn unknown_characters(&self) -> impl Iterator<Item = char> + '_ {
        self.skipped
            .iter()
            .filter(|s| s.reason == SkipReason::UnknownGlyph)
            .map(|s| s.character)
    }
}

/// Distance-like score between a segment and a role anchor, lower is better
pub fn match_score(segment: &StreetSegment, target: &TargetPosition, offset_x: f64) -> f64 {
    let center = segment.center_point();

    (center.lng * METERS_PER_DEGREE - (target.x + offset_x)).abs()
        + (center.lat * METERS_PER_DEGREE - target.y).abs()
}

/// Picks the best unused segment for a role anchor
///
/// Ties keep the earliest segment in `segments`.
pub fn best_segment<'a>(
    segments: &'a [StreetSegment],
    target: &TargetPosition,
    offset_x: f64,
    used: &HashSet<WayId>,
) -> Option<&'a StreetSegment> {
    let mut best: Option<(&StreetSegment, f64)> = None;

    for segment in segments {
        if used.contains(&segment.id()) || segment.direction() != target.direction {
            continue;
        }

        let score = match_score(segment, target, offset_x);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((segment, score)),
        }
    }

    best.map(|(segment, _)| segment)
}

/// Matches every character of `text` against `segments`
///
/// `segments` should be sorted by proximity to the route center so that ties
/// favor nearby streets. `char_spacing_m` is the horizontal distance between
/// consecutive character cells.
pub fn match_text(text: &str, segments: &[StreetSegment], char_spacing_m: f64) -> MatchReport {
    let mut report = MatchReport::default();
    let mut used: HashSet<WayId> = HashSet::new();

    for (index, character) in text.chars().enumerate() {
        let Some(pattern) = glyph_pattern(character) else {
            warn!(
                "Character {character:?} has no glyph pattern (supported: {}), skipping",
                supported_characters().collect::<String>()
            );
            report.skipped.push(Skipped {
                index,
                character,
                reason: SkipReason::UnknownGlyph,
            });
            continue;
        };

        #[allow(clippy::cast_precision_loss)]
        let offset_x = index as f64 * char_spacing_m;

        for &role in pattern {
            let target = role.target_position();
            match best_segment(segments, &target, offset_x, &used) {
                Some(segment) => {
                    debug!("Way {} drawn as {role} of {character:?}", segment.id());
                    used.insert(segment.id());
                    report.matched.push(MatchedSegment {
                        segment: segment.clone(),
                        role,
                        character,
                    });
                }
                None => {
                    debug!("No {:?} segment left for {role} of {character:?}", target.direction);
                    report.skipped.push(Skipped {
                        index,
                        character,
                        reason: SkipReason::NoCandidate(role),
                    });
                }
            }
        }
    }

    info!(
        "Matched {} segments for {:?} ({} strokes skipped)",
        report.matched.len(),
        text,
        report.skipped.len()
    );
    report
}
