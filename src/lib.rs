/// Element collections produced by discretizing a Domain
pub mod discretization;
/// Geometric shapes which can be discretized
pub mod domain;

pub use discretization::{
    element::Element,
    point::Point,
    render::{parity_color, Color, Renderer, Segment, TextRenderer},
    Discretization, DiscretizationError,
};
pub use domain::{
    description::StripDomain, infinite_microstrip::InfiniteMicroStrip, microstrip::MicroStrip,
    Domain, DomainError,
};
