use std::fmt;

const POINT_EQUALITY_ACCURACY: f64 = 1e-12;

#[derive(Clone, Copy, Debug)]
/// Point in 2D Space
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift this Point along the x-axis
    pub fn shifted_x(&self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// equality is resolved to within POINT_EQUALITY_ACCURACY
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= POINT_EQUALITY_ACCURACY
            && (self.y - other.y).abs() <= POINT_EQUALITY_ACCURACY
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
