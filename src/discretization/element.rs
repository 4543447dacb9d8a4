use super::point::Point;
#[cfg(feature = "json_export")]
use json::{object, JsonValue};
use std::fmt;

/// A single discretized line segment, described by the location of its center.
///
/// `Element`s are owned by the [`Discretization`](super::Discretization) that holds them,
/// which is responsible for assigning their `id`s.
///
/// Uniform Elements defer to the Discretization's common element length for their extent.
/// Non-uniform Elements carry their own `segment_length`.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    center: Point,
    id: usize,
    segment_length: Option<f64>,
}

impl Element {
    /// Create a uniformly sized Element centered at `(x_center, y_center)`
    pub fn new(x_center: f64, y_center: f64, id: usize) -> Self {
        Self {
            center: Point::new(x_center, y_center),
            id,
            segment_length: None,
        }
    }

    /// Create an Element with its own segment length
    pub fn non_uniform(x_center: f64, y_center: f64, id: usize, segment_length: f64) -> Self {
        Self {
            center: Point::new(x_center, y_center),
            id,
            segment_length: Some(segment_length),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x_center(&self) -> f64 {
        self.center.x
    }

    pub fn y_center(&self) -> f64 {
        self.center.y
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// `Some` only for non-uniform Elements
    pub fn segment_length(&self) -> Option<f64> {
        self.segment_length
    }

    /// The length of this Element given the common length of its Discretization
    pub fn length_within(&self, element_length: f64) -> f64 {
        self.segment_length.unwrap_or(element_length)
    }

    /// Produce a Json Object that describes this Element
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        let mut element_json = object! {
            "id": self.id,
            "x_center": self.center.x,
            "y_center": self.center.y,
        };

        if let Some(segment_length) = self.segment_length {
            element_json["segment_length"] = segment_length.into();
        }

        element_json
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.segment_length {
            Some(len) => write!(f, "Element {} at {} (length: {})", self.id, self.center, len),
            None => write!(f, "Element {} at {}", self.id, self.center),
        }
    }
}
