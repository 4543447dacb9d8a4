/// A tagged union of the supported Domains, which can be read from a JSON description
pub mod description;
/// A microstrip over an infinite ground plane
pub mod infinite_microstrip;
/// A microstrip over a finite ground plane
pub mod microstrip;

use crate::discretization::Discretization;

use smallvec::SmallVec;
use thiserror::Error;

/// Default number of subdivisions along a strip
pub const DEFAULT_SUBDIVISION_COUNT: usize = 10;

/// Relative accuracy with which a ground plane width must be a multiple of the element length
pub const DIVISIBILITY_TOLERANCE: f64 = 1e-9;

/// Largest subdivision count for which every integer is exactly representable as an `f64` (2^53)
pub const MAX_EXACT_SUBDIVISIONS: f64 = (1u64 << f64::MANTISSA_DIGITS) as f64;

/// A geometric shape which can be broken into a [Discretization]
pub trait Domain {
    /// The number of physical dimensions returned by `get_dimensions`
    fn dimension_count(&self) -> usize;

    /// The shape-specific physical parameters of the Domain
    fn get_dimensions(&self) -> SmallVec<[f64; 4]>;

    /// Break the Domain into a set of uniformly sized Elements
    fn discretize(&self) -> Discretization;
}

/// Errors raised while constructing a [Domain]
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Ground plane width ({ground_plane_width}) must be an integer multiple of the element length ({element_length}); Cannot construct MicroStrip!")]
    GroundPlaneNotDivisible {
        ground_plane_width: f64,
        element_length: f64,
    },

    #[error("Strip must have at least one subdivision; Cannot construct MicroStrip!")]
    ZeroSubdivisions,

    #[error("{strip} strip and {ground_plane} ground plane subdivisions overflow the total Element count; Cannot construct MicroStrip!")]
    SubdivisionOverflow { strip: usize, ground_plane: usize },

    #[error("Invalid Domain description: {0}")]
    InvalidDescription(String),

    #[error(transparent)]
    Json(#[from] json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Compute the number of Elements of length `element_length` that exactly span `width`
///
/// Returns an error if `width` is not an integer multiple of `element_length` (to within [DIVISIBILITY_TOLERANCE]),
/// or if the quotient exceeds [MAX_EXACT_SUBDIVISIONS], past which divisibility can no longer be resolved.
pub fn exact_subdivisions(width: f64, element_length: f64) -> Result<usize, DomainError> {
    let not_divisible = || DomainError::GroundPlaneNotDivisible {
        ground_plane_width: width,
        element_length,
    };

    let ratio = width / element_length;
    if !ratio.is_finite()
        || ratio < 0.0
        || ratio > MAX_EXACT_SUBDIVISIONS
        || ratio > usize::MAX as f64
    {
        return Err(not_divisible());
    }

    let rounded = ratio.round();
    if (ratio - rounded).abs() > DIVISIBILITY_TOLERANCE * rounded.max(1.0) {
        Err(not_divisible())
    } else {
        Ok(rounded as usize)
    }
}
