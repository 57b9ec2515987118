//! TIA-598 fiber color identification.
//!
//! Pure arithmetic over a fixed 12-color sequence: no store access, no
//! side effects, safe to call per keystroke from rendering code.
//! Out-of-range input returns `None` rather than an error.

use serde::Serialize;

/// The TIA-598 color sequence. Both tube and fiber indices wrap through
/// it every 12 positions.
pub const COLOR_SEQUENCE: [&str; 12] = [
    "Blue", "Orange", "Green", "Brown", "Slate", "White", "Red", "Black", "Yellow", "Violet",
    "Rose", "Aqua",
];

/// Standard cable sizes and their loose-tube/ribbon layout
/// `(fiber count, fibers per tube)`. High-count cables (576/864) ship as
/// 24-fiber ribbons; everything from 12 up uses 12-fiber tubes; smaller
/// drop cables are a single tube.
pub const STANDARD_LAYOUTS: [(u32, u32); 16] = [
    (2, 2),
    (4, 4),
    (6, 6),
    (8, 8),
    (12, 12),
    (24, 12),
    (36, 12),
    (48, 12),
    (72, 12),
    (96, 12),
    (144, 12),
    (216, 12),
    (288, 12),
    (432, 12),
    (576, 24),
    (864, 24),
];

const DEFAULT_FIBERS_PER_TUBE: u32 = 12;

///
/// ColorInfo
///
/// One fiber's identity within its cable: which tube it rides in and
/// which position it occupies, with both TIA-598 color names.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ColorInfo {
    pub tube: u32,
    pub tube_color: &'static str,
    pub position: u32,
    pub fiber_color: &'static str,
}

/// Tube/ribbon size for a cable, defaulting to 12 for counts not in the
/// standard table.
#[must_use]
pub fn fibers_per_tube(cable_fibers: u32) -> u32 {
    standard_layout(cable_fibers).unwrap_or(DEFAULT_FIBERS_PER_TUBE)
}

/// Number of tubes in a cable.
#[must_use]
pub fn tube_count(cable_fibers: u32) -> u32 {
    cable_fibers.div_ceil(fibers_per_tube(cable_fibers))
}

fn standard_layout(cable_fibers: u32) -> Option<u32> {
    STANDARD_LAYOUTS
        .iter()
        .find(|(count, _)| *count == cable_fibers)
        .map(|(_, per_tube)| *per_tube)
}

const fn sequence_color(index_from_one: u32) -> &'static str {
    COLOR_SEQUENCE[((index_from_one - 1) % 12) as usize]
}

/// Identify fiber `ordinal` (1-based) within a cable of `cable_fibers`.
#[must_use]
pub fn color_info(ordinal: u32, cable_fibers: u32) -> Option<ColorInfo> {
    if ordinal < 1 || ordinal > cable_fibers {
        return None;
    }

    let per_tube = fibers_per_tube(cable_fibers);
    let tube = ordinal.div_ceil(per_tube);
    let position = (ordinal - 1) % per_tube + 1;

    Some(ColorInfo {
        tube,
        tube_color: sequence_color(tube),
        position,
        fiber_color: sequence_color(position),
    })
}

/// Inverse of [`color_info`]: recover the fiber ordinal from a tube
/// number and in-tube position. Only defined for standard cable sizes,
/// since a non-standard count has no authoritative tube layout to invert.
#[must_use]
pub fn fiber_ordinal(tube: u32, position: u32, cable_fibers: u32) -> Option<u32> {
    let per_tube = standard_layout(cable_fibers)?;
    let tubes = cable_fibers.div_ceil(per_tube);

    if tube < 1 || tube > tubes || position < 1 || position > per_tube {
        return None;
    }

    let ordinal = (tube - 1) * per_tube + position;
    (ordinal <= cable_fibers).then_some(ordinal)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_fiber_is_blue_in_blue() {
        let info = color_info(1, 144).unwrap();
        assert_eq!(info.tube, 1);
        assert_eq!(info.tube_color, "Blue");
        assert_eq!(info.position, 1);
        assert_eq!(info.fiber_color, "Blue");
    }

    #[test]
    fn fiber_13_of_144_starts_the_orange_tube() {
        let info = color_info(13, 144).unwrap();
        assert_eq!(info.tube, 2);
        assert_eq!(info.tube_color, "Orange");
        assert_eq!(info.position, 1);
        assert_eq!(info.fiber_color, "Blue");
    }

    #[test]
    fn tube_colors_wrap_after_twelve() {
        // 288-fiber cable: tube 13 wraps back to Blue.
        let info = color_info(12 * 12 + 1, 288).unwrap();
        assert_eq!(info.tube, 13);
        assert_eq!(info.tube_color, "Blue");
    }

    #[test]
    fn ribbon_positions_wrap_within_24() {
        // 864-fiber cable rides 24-fiber ribbons; position 13 restarts
        // the fiber color sequence inside ribbon 1.
        let info = color_info(13, 864).unwrap();
        assert_eq!(info.tube, 1);
        assert_eq!(info.position, 13);
        assert_eq!(info.fiber_color, "Blue");
    }

    #[test]
    fn out_of_range_ordinals_are_not_found() {
        assert_eq!(color_info(0, 144), None);
        assert_eq!(color_info(145, 144), None);
    }

    #[test]
    fn non_standard_counts_default_to_twelve_per_tube() {
        let info = color_info(13, 20).unwrap();
        assert_eq!(info.tube, 2);
        assert_eq!(info.position, 1);
    }

    #[test]
    fn inverse_rejects_non_standard_counts() {
        assert_eq!(fiber_ordinal(1, 1, 20), None);
    }

    #[test]
    fn inverse_rejects_positions_outside_layout() {
        assert_eq!(fiber_ordinal(0, 1, 144), None);
        assert_eq!(fiber_ordinal(13, 1, 144), None);
        assert_eq!(fiber_ordinal(1, 13, 144), None);
    }

    #[test]
    fn round_trip_holds_for_every_standard_ordinal() {
        for (count, _) in STANDARD_LAYOUTS {
            for ordinal in 1..=count {
                let info = color_info(ordinal, count).unwrap();
                assert!(matches!(COLOR_SEQUENCE.iter().position(|c| *c == info.tube_color), Some(i) if i < 12));
                assert!(matches!(COLOR_SEQUENCE.iter().position(|c| *c == info.fiber_color), Some(i) if i < 12));
                assert_eq!(
                    fiber_ordinal(info.tube, info.position, count),
                    Some(ordinal),
                    "round trip broke at ordinal {ordinal} of {count}"
                );
            }
        }
    }

    proptest! {
        #[test]
        fn round_trip_law(size_index in 0..STANDARD_LAYOUTS.len(), seed in any::<u32>()) {
            let (count, _) = STANDARD_LAYOUTS[size_index];
            let ordinal = seed % count + 1;
            let info = color_info(ordinal, count).unwrap();
            prop_assert_eq!(fiber_ordinal(info.tube, info.position, count), Some(ordinal));
        }

        #[test]
        fn every_in_range_ordinal_is_defined(count in 1u32..2000, seed in any::<u32>()) {
            let ordinal = seed % count + 1;
            prop_assert!(color_info(ordinal, count).is_some());
        }
    }
}
