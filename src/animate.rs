use crate::{
    canvas::{Canvas, Coord, GrayAlpha},
    generate::StarRegistry,
    hash::hash_coord,
};

/// Frames per phase step; each visual state lasts this many frames.
pub const PHASE_DIVISOR: u64 = 5;

pub const PHASE_COUNT: u64 = 4;

/// Full glitter cycle length in frames.
pub const PHASE_PERIOD: u64 = PHASE_COUNT * PHASE_DIVISOR;

/// Visual state of a star on a given frame.
///
/// Phase indices 1 and 3 both map to `Lit`, so one period runs
/// hidden, lit, glitter, lit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Lit,
    Glitter,
}

/// Raw phase index in `[0, PHASE_COUNT)`.
///
/// The star's own coordinate hash provides the offset, so stars animate out
/// of step with each other while each one keeps a stable cycle. Registry
/// index would not work as an offset: it shifts whenever the accepted set
/// changes, while the coordinate hash survives any regeneration.
pub fn phase_index(coord: Coord, frame: u64) -> u64 {
    let offset = u64::from(hash_coord(coord.x, coord.y) >> 4);
    offset.wrapping_add(frame) / PHASE_DIVISOR % PHASE_COUNT
}

pub fn phase(coord: Coord, frame: u64) -> Phase {
    match phase_index(coord, frame) {
        0 => Phase::Hidden,
        2 => Phase::Glitter,
        _ => Phase::Lit,
    }
}

const ARM_OFFSETS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Render every star's glitter state for `frame`.
///
/// Pure in the registry and frame number; only the five star-owned pixels
/// per star (center plus cardinal neighbors) are written, each write clipped
/// at the canvas edge. All five pixels are fully recomputed on every call,
/// so any frame can be rendered after any other on the same canvas and
/// rendering the same frame twice is a no-op the second time. The isolation
/// radius guarantees the five pixels belong to their star exclusively.
pub fn render_frame(canvas: &mut Canvas, registry: &StarRegistry, frame: u64) {
    for star in registry.iter() {
        let (center, arms) = match phase(star, frame) {
            Phase::Hidden => (GrayAlpha::TRANSPARENT, GrayAlpha::TRANSPARENT),
            Phase::Lit => (GrayAlpha::STAR, GrayAlpha::TRANSPARENT),
            Phase::Glitter => (GrayAlpha::STAR, GrayAlpha::STAR),
        };

        let x = i64::from(star.x);
        let y = i64::from(star.y);
        canvas.put(x, y, center);
        for (dx, dy) in ARM_OFFSETS {
            canvas.put(x + dx, y + dy, arms);
        }
    }
}
