use super::{exact_subdivisions, Domain, DomainError, DEFAULT_SUBDIVISION_COUNT};
use crate::discretization::{element::Element, Discretization};

use smallvec::{smallvec, SmallVec};

/// A strip of width `w_s` at height `h` above a finite ground plane of width `w_g`
///
/// The ground plane spans `[0, w_g]` at `y = 0`. The strip spans `[x_off, x_off + w_s]` at `y = h`.
/// ```text
///            x_off           x_off + w_s
///  y = h       |------w_s------|             strip
///
///  y = 0  |-------------w_g-------------|    ground plane
///        x = 0                        x = w_g
/// ```
///
/// Both conductors are broken into Elements of the same length (`w_s / N1`), so `w_g` must be an integer multiple of it.
#[derive(Clone, Debug, PartialEq)]
pub struct MicroStrip {
    strip_width: f64,
    strip_height: f64,
    ground_plane_width: f64,
    strip_subdivision_count: usize,
    strip_x_offset: f64,
    element_length: f64,
    ground_plane_subdivision_count: usize,
    total_subdivision_count: usize,
}

impl MicroStrip {
    /// Describe a microstrip whose strip is broken into `strip_subdivision_count` Elements
    ///
    /// When `strip_x_offset` is `None`, the strip is centered over the ground plane.
    ///
    /// Returns an error if `strip_subdivision_count` is 0, if the ground plane width is not an integer multiple
    /// of the resulting element length, or if the total number of Elements does not fit in a `usize`.
    pub fn new(
        strip_width: f64,
        strip_height: f64,
        ground_plane_width: f64,
        strip_subdivision_count: usize,
        strip_x_offset: Option<f64>,
    ) -> Result<Self, DomainError> {
        if strip_subdivision_count == 0 {
            return Err(DomainError::ZeroSubdivisions);
        }

        let element_length = strip_width / strip_subdivision_count as f64;
        let ground_plane_subdivision_count = exact_subdivisions(ground_plane_width, element_length)?;
        let total_subdivision_count = strip_subdivision_count
            .checked_add(ground_plane_subdivision_count)
            .ok_or(DomainError::SubdivisionOverflow {
                strip: strip_subdivision_count,
                ground_plane: ground_plane_subdivision_count,
            })?;

        Ok(Self {
            strip_width,
            strip_height,
            ground_plane_width,
            strip_subdivision_count,
            strip_x_offset: strip_x_offset.unwrap_or((ground_plane_width - strip_width) / 2.0),
            element_length,
            ground_plane_subdivision_count,
            total_subdivision_count,
        })
    }

    /// A centered strip with the default number of subdivisions
    pub fn centered(
        strip_width: f64,
        strip_height: f64,
        ground_plane_width: f64,
    ) -> Result<Self, DomainError> {
        Self::new(
            strip_width,
            strip_height,
            ground_plane_width,
            DEFAULT_SUBDIVISION_COUNT,
            None,
        )
    }

    pub fn strip_width(&self) -> f64 {
        self.strip_width
    }

    pub fn strip_height(&self) -> f64 {
        self.strip_height
    }

    pub fn ground_plane_width(&self) -> f64 {
        self.ground_plane_width
    }

    pub fn strip_x_offset(&self) -> f64 {
        self.strip_x_offset
    }

    pub fn element_length(&self) -> f64 {
        self.element_length
    }

    pub fn strip_subdivision_count(&self) -> usize {
        self.strip_subdivision_count
    }

    pub fn ground_plane_subdivision_count(&self) -> usize {
        self.ground_plane_subdivision_count
    }

    pub fn total_subdivision_count(&self) -> usize {
        self.total_subdivision_count
    }

    // center of the element with id `i`: strip elements come first, followed by ground plane elements
    fn element_center(&self, i: usize) -> (f64, f64) {
        let half_length = self.element_length / 2.0;

        if i < self.strip_subdivision_count {
            (
                i as f64 * self.element_length + half_length + self.strip_x_offset,
                self.strip_height,
            )
        } else {
            (
                (i - self.strip_subdivision_count) as f64 * self.element_length + half_length,
                0.0,
            )
        }
    }
}

impl Domain for MicroStrip {
    fn dimension_count(&self) -> usize {
        4
    }

    fn get_dimensions(&self) -> SmallVec<[f64; 4]> {
        smallvec![
            self.strip_width,
            self.strip_height,
            self.ground_plane_width,
            self.strip_x_offset
        ]
    }

    fn discretize(&self) -> Discretization {
        let elements: Vec<Element> = (0..self.total_subdivision_count())
            .map(|i| {
                let (x_center, y_center) = self.element_center(i);
                Element::new(x_center, y_center, i)
            })
            .collect();

        log::debug!(
            "Discretized MicroStrip into {} strip and {} ground plane Elements of length {}",
            self.strip_subdivision_count,
            self.ground_plane_subdivision_count,
            self.element_length
        );

        Discretization::from_elements(self.element_length, elements)
    }
}
