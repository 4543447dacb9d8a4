use super::{Domain, DEFAULT_SUBDIVISION_COUNT};
use crate::discretization::{element::Element, Discretization};

use smallvec::{smallvec, SmallVec};

/// A strip of width `w` at a height `h` above an infinite ground plane
///
/// The strip is placed at `y = 0`. The ground plane is accounted for with the image theorem:
/// its effect is modeled by a reflection of the strip at `y = -2h`.
/// ```text
///  y = 0    |-----------w-----------|        strip
///                       ^
///                       h
///  y = -h  ===============================   ground plane
///                       h
///                       v
///  y = -2h  |-----------------------|        reflection
///          x = 0                  x = w
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InfiniteMicroStrip {
    strip_width: f64,
    height_above_ground: f64,
    subdivision_count: usize,
    element_length: f64,
}

impl InfiniteMicroStrip {
    /// Describe a strip broken into `subdivision_count` Elements.
    ///
    /// Parameters are not validated. A `subdivision_count` of 0 produces an empty Discretization.
    pub fn new(strip_width: f64, height_above_ground: f64, subdivision_count: usize) -> Self {
        Self {
            strip_width,
            height_above_ground,
            subdivision_count,
            element_length: strip_width / subdivision_count as f64,
        }
    }

    pub fn with_default_subdivisions(strip_width: f64, height_above_ground: f64) -> Self {
        Self::new(strip_width, height_above_ground, DEFAULT_SUBDIVISION_COUNT)
    }

    pub fn strip_width(&self) -> f64 {
        self.strip_width
    }

    pub fn height_above_ground(&self) -> f64 {
        self.height_above_ground
    }

    pub fn subdivision_count(&self) -> usize {
        self.subdivision_count
    }

    pub fn element_length(&self) -> f64 {
        self.element_length
    }

    fn x_center(&self, idx: usize) -> f64 {
        idx as f64 * self.element_length + self.element_length / 2.0
    }
}

impl Domain for InfiniteMicroStrip {
    fn dimension_count(&self) -> usize {
        2
    }

    fn get_dimensions(&self) -> SmallVec<[f64; 4]> {
        smallvec![self.strip_width, self.height_above_ground]
    }

    /// The strip's Elements take ids `[0, N)`; their reflections take ids `[N, 2N)`
    fn discretize(&self) -> Discretization {
        let n = self.subdivision_count;
        let reflection_height = -2.0 * self.height_above_ground;

        let strip = (0..n).map(|i| Element::new(self.x_center(i), 0.0, i));
        let reflection = (0..n).map(|i| Element::new(self.x_center(i), reflection_height, i + n));

        let elements: Vec<Element> = strip.chain(reflection).collect();
        log::debug!(
            "Discretized InfiniteMicroStrip (w: {}, h: {}) into {} Elements of length {}",
            self.strip_width,
            self.height_above_ground,
            elements.len(),
            self.element_length
        );

        Discretization::from_elements(self.element_length, elements)
    }
}
