use crate::{
    canvas::{Canvas, Coord, GrayAlpha},
    error::{StarfieldError, StarfieldResult},
    hash::hash_coord,
    rng::shuffled_coords,
};

/// Coordinate-hash mask for eligibility: a coordinate is a candidate iff all
/// five masked bits are zero, i.e. roughly 1 in 32 coordinates. Eligibility
/// depends only on the coordinate, never on canvas content, so stars keep
/// their positions no matter what the input image contains.
pub const ELIGIBILITY_MASK: u32 = 0x0001_1111;

/// Minimum center-to-center distance between a star and any opaque pixel.
pub const DEFAULT_RADIUS: u32 = 12;

pub const DEFAULT_SEED: u64 = 1;

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct StarfieldParams {
    pub radius: u32,
    pub seed: u64,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            seed: DEFAULT_SEED,
        }
    }
}

impl StarfieldParams {
    pub fn validate(&self) -> StarfieldResult<()> {
        if self.radius == 0 {
            return Err(StarfieldError::validation("radius must be > 0"));
        }
        Ok(())
    }
}

/// Accepted star positions, in acceptance order.
///
/// Built once per generation run and read-only afterwards. The order is
/// stable and may be relied on for indexing; it carries no other meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StarRegistry {
    stars: Vec<Coord>,
}

impl StarRegistry {
    /// Wrap coordinates obtained elsewhere (deserialization, tests).
    pub fn from_coords(stars: Vec<Coord>) -> Self {
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Coord> {
        self.stars.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.stars.iter().copied()
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.stars
    }
}

/// Content-independent eligibility test.
pub fn is_star_location(coord: Coord) -> bool {
    hash_coord(coord.x, coord.y) & ELIGIBILITY_MASK == 0
}

/// Place stars on the canvas.
///
/// Visits every coordinate once, in the seed-determined shuffle order, keeps
/// the ones that pass the eligibility mask and the proximity filter, and
/// marks each accepted position opaque immediately so later candidates see
/// it as an obstacle. Acceptance is strictly sequential: the shuffle order
/// is the tie-break between two mutually-too-close candidates, which is why
/// the whole pass is reproducible for a fixed canvas and seed.
///
/// A canvas with no eligible, isolated coordinate yields an empty registry;
/// that is a valid outcome, not an error.
#[tracing::instrument(skip(canvas), fields(width = canvas.width(), height = canvas.height()))]
pub fn generate_stars(
    canvas: &mut Canvas,
    params: &StarfieldParams,
) -> StarfieldResult<StarRegistry> {
    params.validate()?;

    let mut stars = Vec::new();
    for coord in shuffled_coords(canvas.width(), canvas.height(), params.seed) {
        if !is_star_location(coord) {
            continue;
        }
        if !region_is_clear(canvas, coord, params.radius) {
            continue;
        }
        stars.push(coord);
        canvas.put(i64::from(coord.x), i64::from(coord.y), GrayAlpha::STAR);
    }

    tracing::debug!(stars = stars.len(), "star placement complete");
    Ok(StarRegistry { stars })
}

/// True if every pixel within `radius` of `coord` is fully transparent.
///
/// Scans the bounding square clipped to the canvas and skips corners outside
/// the Euclidean disc. Pixels beyond the canvas edge are excluded, not
/// treated as opaque or transparent.
fn region_is_clear(canvas: &Canvas, coord: Coord, radius: u32) -> bool {
    let cx = i64::from(coord.x);
    let cy = i64::from(coord.y);
    let r = i64::from(radius);
    let r2 = r * r;

    let y0 = (cy - r).max(0);
    let y1 = (cy + r).min(i64::from(canvas.height()) - 1);
    let x0 = (cx - r).max(0);
    let x1 = (cx + r).min(i64::from(canvas.width()) - 1);

    for iy in y0..=y1 {
        let dy2 = (cy - iy) * (cy - iy);
        for ix in x0..=x1 {
            let dx2 = (cx - ix) * (cx - ix);
            if dx2 + dy2 > r2 {
                continue;
            }
            if canvas
                .get(ix as u32, iy as u32)
                .is_some_and(GrayAlpha::is_opaque)
            {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_documented_constants() {
        let p = StarfieldParams::default();
        assert_eq!(p.radius, 12);
        assert_eq!(p.seed, 1);
    }

    #[test]
    fn zero_radius_fails_before_any_mutation() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        let before = canvas.clone();
        let err = generate_stars(&mut canvas, &StarfieldParams { radius: 0, seed: 1 });
        assert!(err.is_err());
        assert_eq!(canvas, before);
    }

    #[test]
    fn fully_opaque_canvas_yields_empty_registry() {
        let opaque = vec![0xff; 16 * 16 * 2];
        let mut canvas = Canvas::from_raw(16, 16, opaque).unwrap();
        let registry = generate_stars(&mut canvas, &StarfieldParams::default()).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn accepted_stars_are_marked_opaque_black() {
        let mut canvas = Canvas::new(64, 64).unwrap();
        let registry = generate_stars(&mut canvas, &StarfieldParams::default()).unwrap();
        for star in registry.iter() {
            assert_eq!(canvas.get(star.x, star.y), Some(GrayAlpha::STAR));
        }
    }

    #[test]
    fn eligibility_ignores_canvas_content() {
        // Same coordinate, same answer, no canvas in sight.
        for y in 0..8 {
            for x in 0..8 {
                let c = Coord::new(x, y);
                assert_eq!(is_star_location(c), is_star_location(c));
            }
        }
    }

    #[test]
    fn region_scan_clips_at_the_border() {
        // Radius larger than the canvas: the scan must stay in bounds.
        let canvas = Canvas::new(5, 5).unwrap();
        assert!(region_is_clear(&canvas, Coord::new(0, 0), 12));
        assert!(region_is_clear(&canvas, Coord::new(4, 4), 12));
    }

    #[test]
    fn region_scan_sees_opaque_neighbor() {
        let mut canvas = Canvas::new(9, 9).unwrap();
        canvas.put(4, 4, GrayAlpha::STAR);
        assert!(!region_is_clear(&canvas, Coord::new(4, 4), 2));
        assert!(!region_is_clear(&canvas, Coord::new(6, 4), 2));
        // (4,4) -> (7,4) is distance 3, outside radius 2.
        assert!(region_is_clear(&canvas, Coord::new(7, 4), 2));
    }

    #[test]
    fn registry_preserves_order_and_indexing() {
        let coords = vec![Coord::new(3, 1), Coord::new(0, 0), Coord::new(2, 2)];
        let registry = StarRegistry::from_coords(coords.clone());
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(1), Some(Coord::new(0, 0)));
        assert_eq!(registry.as_slice(), coords.as_slice());
    }
}
