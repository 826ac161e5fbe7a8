#![forbid(unsafe_code)]

pub mod animate;
pub mod canvas;
pub mod error;
pub mod generate;
pub mod hash;
pub mod rng;

pub use animate::{PHASE_COUNT, PHASE_DIVISOR, PHASE_PERIOD, Phase, phase, render_frame};
pub use canvas::{Canvas, Coord, GrayAlpha};
pub use error::{StarfieldError, StarfieldResult};
pub use generate::{
    DEFAULT_RADIUS, DEFAULT_SEED, ELIGIBILITY_MASK, StarRegistry, StarfieldParams, generate_stars,
};
