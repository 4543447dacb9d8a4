use super::{
    infinite_microstrip::InfiniteMicroStrip, microstrip::MicroStrip, Domain, DomainError,
    DEFAULT_SUBDIVISION_COUNT,
};
use crate::discretization::Discretization;

use json::JsonValue;
use smallvec::SmallVec;
use std::fs::read_to_string;

/// Any of the supported Domains
#[derive(Clone, Debug, PartialEq)]
pub enum StripDomain {
    Infinite(InfiniteMicroStrip),
    Finite(MicroStrip),
}

impl StripDomain {
    /// Construct a Domain from a JSON file with one of the following formats
    ///
    /// infinite_microstrip.json
    /// ```JSON
    /// {
    ///     "kind": "infinite_microstrip",
    ///     "strip_width": 10.0,
    ///     "height": 5.0,
    ///     "subdivisions": 10
    /// }
    /// ```
    ///
    /// microstrip.json
    /// ```JSON
    /// {
    ///     "kind": "microstrip",
    ///     "strip_width": 10.0,
    ///     "strip_height": 5.0,
    ///     "ground_plane_width": 20.0,
    ///     "subdivisions": 10,
    ///     "x_offset": 5.0
    /// }
    /// ```
    ///
    /// `subdivisions` defaults to 10. `x_offset` is optional; the strip is centered when it is omitted.
    pub fn from_file(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let description = json::parse(&read_to_string(path.as_ref())?)?;
        log::debug!("Loaded Domain description from {}", path.as_ref());
        Self::from_json(&description)
    }

    /// Construct a Domain from a parsed JSON description (see [StripDomain::from_file])
    pub fn from_json(description: &JsonValue) -> Result<Self, DomainError> {
        if !description.is_object() {
            return Err(DomainError::InvalidDescription(
                "Domain description must be an Object".to_string(),
            ));
        }

        let subdivisions = optional_usize(description, "subdivisions")?
            .unwrap_or(DEFAULT_SUBDIVISION_COUNT);

        match description["kind"].as_str() {
            Some("infinite_microstrip") => Ok(Self::Infinite(InfiniteMicroStrip::new(
                required_f64(description, "strip_width")?,
                required_f64(description, "height")?,
                subdivisions,
            ))),
            Some("microstrip") => Ok(Self::Finite(MicroStrip::new(
                required_f64(description, "strip_width")?,
                required_f64(description, "strip_height")?,
                required_f64(description, "ground_plane_width")?,
                subdivisions,
                optional_f64(description, "x_offset")?,
            )?)),
            Some(other) => Err(DomainError::InvalidDescription(format!(
                "unknown Domain kind '{}'",
                other
            ))),
            None => Err(DomainError::InvalidDescription(
                "Domain description must have a 'kind'".to_string(),
            )),
        }
    }

    fn inner(&self) -> &dyn Domain {
        match self {
            Self::Infinite(ims) => ims,
            Self::Finite(ms) => ms,
        }
    }
}

impl Domain for StripDomain {
    fn dimension_count(&self) -> usize {
        self.inner().dimension_count()
    }

    fn get_dimensions(&self) -> SmallVec<[f64; 4]> {
        self.inner().get_dimensions()
    }

    fn discretize(&self) -> Discretization {
        self.inner().discretize()
    }
}

impl From<InfiniteMicroStrip> for StripDomain {
    fn from(ims: InfiniteMicroStrip) -> Self {
        Self::Infinite(ims)
    }
}

impl From<MicroStrip> for StripDomain {
    fn from(ms: MicroStrip) -> Self {
        Self::Finite(ms)
    }
}

fn required_f64(description: &JsonValue, key: &str) -> Result<f64, DomainError> {
    optional_f64(description, key)?
        .ok_or_else(|| DomainError::InvalidDescription(format!("missing '{}'", key)))
}

fn optional_f64(description: &JsonValue, key: &str) -> Result<Option<f64>, DomainError> {
    let value = &description[key];
    if value.is_null() {
        return Ok(None);
    }

    value
        .as_f64()
        .map(Some)
        .ok_or_else(|| DomainError::InvalidDescription(format!("'{}' must be a number", key)))
}

fn optional_usize(description: &JsonValue, key: &str) -> Result<Option<usize>, DomainError> {
    let value = &description[key];
    if value.is_null() {
        return Ok(None);
    }

    value.as_usize().map(Some).ok_or_else(|| {
        DomainError::InvalidDescription(format!("'{}' must be a non-negative integer", key))
    })
}
