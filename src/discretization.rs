/// A single discretized line segment
pub mod element;
/// A Point in 2D space
pub mod point;
/// Structures used to hand a Discretization to an external drawing backend
pub mod render;

use element::Element;
use point::Point;
use render::{parity_color, Color, Renderer, Segment};

use json::JsonValue;
use nalgebra::DMatrix;
use std::ops::Index;
use std::slice::Iter;
use thiserror::Error;

#[cfg(feature = "json_export")]
use json::object;
#[cfg(feature = "json_export")]
use std::fs::File;
#[cfg(feature = "json_export")]
use std::io::BufWriter;

/// Errors raised while building or reading a [Discretization]
#[derive(Error, Debug)]
pub enum DiscretizationError {
    #[error("Element index {index} is out of range for a Discretization of {len} Elements!")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Entry {index} of the batch is not a finite (x, y) pair; no Elements were added!")]
    MalformedPair { index: usize },

    #[error("A batch of Elements must be an Array of (x, y) pairs; no Elements were added!")]
    NotAnArray,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An ordered collection of Elements sharing a common element length
///
/// Elements are always kept sorted by `id` (ascending). When built through the `append_*`
/// methods, ids are contiguous from 0 and double as positional indices.
#[derive(Clone, Debug)]
pub struct Discretization {
    element_length: f64,
    elements: Vec<Element>,
}

impl Discretization {
    /// Construct an empty Discretization
    pub fn new(element_length: f64) -> Self {
        Self {
            element_length,
            elements: Vec::new(),
        }
    }

    /// Construct a Discretization from a set of pre-built Elements
    ///
    /// Elements are sorted by id. Ids are not required to be contiguous.
    pub fn from_elements(element_length: f64, mut elements: Vec<Element>) -> Self {
        elements.sort_by_key(|elem| elem.id());

        if elements
            .iter()
            .enumerate()
            .any(|(idx, elem)| elem.id() != idx)
        {
            log::warn!(
                "Discretization constructed with non-contiguous Element ids; ids will not match positions, and `append_one` may repeat an existing id"
            );
        }

        Self {
            element_length,
            elements,
        }
    }

    /// Add a new Element centered at `(x, y)`. It is assigned the id `self.len()`, which is returned.
    ///
    /// Ids are only unique when they are contiguous from 0. After [Discretization::from_elements] with gaps in its
    /// ids (e.g. `[0, 2]`), the new id (`2`) can duplicate an existing one; the duplicate is placed after it.
    pub fn append_one(&mut self, x: f64, y: f64) -> usize {
        let id = self.elements.len();
        self.insert_sorted(Element::new(x, y, id));
        id
    }

    /// Add a batch of Elements, each assigned the next successive id
    ///
    /// The whole batch is validated before anything is added: if any coordinate is not
    /// finite, an error is returned and the Discretization is left unchanged.
    pub fn append_batch<I>(&mut self, pairs: I) -> Result<(), DiscretizationError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let pairs: Vec<(f64, f64)> = pairs.into_iter().collect();

        if let Some(index) = pairs
            .iter()
            .position(|&(x, y)| !Point::new(x, y).is_finite())
        {
            return Err(DiscretizationError::MalformedPair { index });
        }

        self.elements.reserve(pairs.len());
        for (x, y) in pairs {
            self.append_one(x, y);
        }

        Ok(())
    }

    /// Add a batch of Elements from a JSON array of `[x, y]` pairs
    ///
    /// ```JSON
    /// [[0.5, 0.0], [1.5, 0.0], [2.5, 0.0]]
    /// ```
    ///
    /// Fails without adding anything if the value is not an array, or if any member is not an array of two numbers.
    pub fn append_json_batch(&mut self, batch: &JsonValue) -> Result<(), DiscretizationError> {
        if !batch.is_array() {
            return Err(DiscretizationError::NotAnArray);
        }

        let pairs = batch
            .members()
            .enumerate()
            .map(|(index, pair_json)| {
                if !pair_json.is_array() || pair_json.members().count() != 2 {
                    return Err(DiscretizationError::MalformedPair { index });
                }

                match (pair_json[0].as_f64(), pair_json[1].as_f64()) {
                    (Some(x), Some(y)) => Ok((x, y)),
                    _ => Err(DiscretizationError::MalformedPair { index }),
                }
            })
            .collect::<Result<Vec<(f64, f64)>, DiscretizationError>>()?;

        self.append_batch(pairs)
    }

    // insert an element after all elements with an id less than or equal to its own
    fn insert_sorted(&mut self, elem: Element) {
        let position = self
            .elements
            .partition_point(|existing| existing.id() <= elem.id());
        self.elements.insert(position, elem);
    }

    /// Retrieve the Element at a particular position
    pub fn get(&self, index: usize) -> Result<&Element, DiscretizationError> {
        self.elements
            .get(index)
            .ok_or(DiscretizationError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            })
    }

    /// The length shared by every uniform Element
    pub fn element_length(&self) -> f64 {
        self.element_length
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all `Element`s in id order
    pub fn elements(&self) -> Iter<'_, Element> {
        self.elements.iter()
    }

    /// The end points of an Element's segment: `x_center ∓ length / 2` at `y_center`
    pub fn span(&self, elem: &Element) -> [Point; 2] {
        let half_length = elem.length_within(self.element_length) / 2.0;
        let center = elem.center();

        [center.shifted_x(-half_length), center.shifted_x(half_length)]
    }

    /// Iterate over the [Segment]s described by each Element
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.elements.iter().map(move |elem| {
            let [start, end] = self.span(elem);
            Segment {
                id: elem.id(),
                start,
                end,
            }
        })
    }

    /// Draw each Element with a [Renderer] using the default (id parity) coloring
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<(), DiscretizationError> {
        self.render_with(renderer, parity_color)
    }

    /// Draw each Element with a [Renderer], coloring by id with `color_fn`
    pub fn render_with<R, F>(&self, renderer: &mut R, color_fn: F) -> Result<(), DiscretizationError>
    where
        R: Renderer,
        F: Fn(usize) -> Color,
    {
        for segment in self.segments() {
            let color = color_fn(segment.id);
            log::trace!(
                "Element {}: end1:{}, end2:{} ({})",
                segment.id,
                segment.start,
                segment.end,
                color
            );
            renderer.draw_segment(&segment, color)?;
        }

        Ok(())
    }

    /// An `n x 2` matrix of Element centers; row `i` holds `[x_center, y_center]` of the `i`th Element
    pub fn centers(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.elements.len(), 2, |row, col| {
            let center = self.elements[row].center();
            if col == 0 {
                center.x
            } else {
                center.y
            }
        })
    }

    /// Produce a Json Object that describes this Discretization
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> JsonValue {
        object! {
            "element_length": self.element_length,
            "Elements": JsonValue::from(self.elements.iter().map(|elem| elem.to_json()).collect::<Vec<_>>()),
        }
    }

    /// Print the Discretization to a JSON file specified by path.
    #[cfg(feature = "json_export")]
    pub fn export_to_json(&self, path: impl AsRef<str>) -> Result<(), DiscretizationError> {
        let f = File::create(path.as_ref())?;
        let mut w = BufWriter::new(&f);

        self.to_json().write_pretty(&mut w, 4)?;

        Ok(())
    }
}

impl Index<usize> for Discretization {
    type Output = Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a Discretization {
    type Item = &'a Element;
    type IntoIter = Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::render::TextRenderer;
    use approx::assert_relative_eq;

    #[test]
    fn fresh_containers_are_independent() {
        let mut a = Discretization::new(1.0);
        let b = Discretization::new(1.0);

        a.append_one(0.5, 0.0);

        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn append_one_assigns_successive_ids() {
        let mut disc = Discretization::new(1.0);

        assert_eq!(disc.append_one(0.5, 0.0), 0);
        assert_eq!(disc.append_one(1.5, 0.0), 1);
        assert_eq!(disc.append_one(2.5, 0.0), 2);

        for (idx, elem) in disc.elements().enumerate() {
            assert_eq!(elem.id(), idx);
            assert_relative_eq!(elem.x_center(), idx as f64 + 0.5);
        }
    }

    #[test]
    fn from_elements_sorts_by_id() {
        let disc = Discretization::from_elements(
            1.0,
            vec![
                Element::new(2.5, 0.0, 2),
                Element::new(0.5, 0.0, 0),
                Element::new(1.5, 0.0, 1),
            ],
        );

        let ids: Vec<usize> = disc.elements().map(|elem| elem.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_relative_eq!(disc[0].x_center(), 0.5);
    }

    #[test]
    fn append_after_gapped_ids_stays_sorted() {
        let mut disc = Discretization::from_elements(
            1.0,
            vec![Element::new(0.5, 0.0, 0), Element::new(5.5, 0.0, 5)],
        );

        // the new element receives id 2 and must land between ids 0 and 5
        assert_eq!(disc.append_one(2.5, 0.0), 2);

        let ids: Vec<usize> = disc.elements().map(|elem| elem.id()).collect();
        assert_eq!(ids, vec![0, 2, 5]);
    }

    #[test]
    fn append_after_gapped_ids_can_repeat_an_id() {
        let mut disc = Discretization::from_elements(
            1.0,
            vec![Element::new(0.5, 0.0, 0), Element::new(2.5, 0.0, 2)],
        );

        assert_eq!(disc.append_one(4.5, 0.0), 2);

        let ids: Vec<usize> = disc.elements().map(|elem| elem.id()).collect();
        assert_eq!(ids, vec![0, 2, 2]);
        assert_relative_eq!(disc[1].x_center(), 2.5);
        assert_relative_eq!(disc[2].x_center(), 4.5);
    }

    #[test]
    fn append_batch() {
        let mut disc = Discretization::new(2.0);
        disc.append_one(1.0, 0.0);
        disc.append_batch(vec![(3.0, 0.0), (5.0, 0.0)]).unwrap();

        assert_eq!(disc.len(), 3);
        assert_eq!(disc[2].id(), 2);
        assert_relative_eq!(disc[2].x_center(), 5.0);
    }

    #[test]
    fn malformed_batch_is_all_or_nothing() {
        let mut disc = Discretization::new(1.0);
        disc.append_one(0.5, 0.0);

        let result = disc.append_batch(vec![(1.5, 0.0), (f64::NAN, 0.0), (3.5, 0.0)]);

        assert!(matches!(
            result,
            Err(DiscretizationError::MalformedPair { index: 1 })
        ));
        assert_eq!(disc.len(), 1);
    }

    #[test]
    fn json_batch() {
        let mut disc = Discretization::new(1.0);
        let batch = json::parse("[[0.5, 0.0], [1.5, 0.0]]").unwrap();
        disc.append_json_batch(&batch).unwrap();

        assert_eq!(disc.len(), 2);
        assert_relative_eq!(disc[1].x_center(), 1.5);
    }

    #[test]
    fn malformed_json_batches() {
        let mut disc = Discretization::new(1.0);

        assert!(matches!(
            disc.append_json_batch(&JsonValue::from(1.0)),
            Err(DiscretizationError::NotAnArray)
        ));

        for (batch, bad_index) in [
            ("[[0.5, 0.0], [1.5]]", 1),
            ("[[0.5, 0.0], [1.5, 0.0, 2.0]]", 1),
            ("[[\"a\", 0.0]]", 0),
            ("[0.5, 0.0]", 0),
        ] {
            match disc.append_json_batch(&json::parse(batch).unwrap()) {
                Err(DiscretizationError::MalformedPair { index }) => assert_eq!(index, bad_index),
                other => panic!("expected MalformedPair for {}, got {:?}", batch, other),
            }
        }

        assert!(disc.is_empty());
    }

    #[test]
    fn index_out_of_range() {
        let mut disc = Discretization::new(1.0);
        disc.append_batch((0..20).map(|i| (i as f64 + 0.5, 0.0)))
            .unwrap();

        assert!(disc.get(19).is_ok());
        assert!(matches!(
            disc.get(20),
            Err(DiscretizationError::IndexOutOfRange { index: 20, len: 20 })
        ));
    }

    #[test]
    #[should_panic]
    fn index_operator_out_of_range() {
        let disc = Discretization::new(1.0);
        let _ = &disc[0];
    }

    #[test]
    fn spans_from_centers() {
        let mut disc = Discretization::from_elements(
            1.0,
            vec![Element::new(0.5, 0.0, 0), Element::non_uniform(2.0, 1.0, 1, 2.0)],
        );
        disc.append_one(4.5, -2.0);

        let [start, end] = disc.span(&disc[0]);
        assert_eq!(start, Point::new(0.0, 0.0));
        assert_eq!(end, Point::new(1.0, 0.0));

        // non-uniform elements use their own length
        let [start, end] = disc.span(&disc[1]);
        assert_eq!(start, Point::new(1.0, 1.0));
        assert_eq!(end, Point::new(3.0, 1.0));

        let segments: Vec<Segment> = disc.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].start, Point::new(4.0, -2.0));
        assert_eq!(segments[2].end, Point::new(5.0, -2.0));
    }

    #[test]
    fn render_with_color_fn() {
        let mut disc = Discretization::new(1.0);
        disc.append_batch(vec![(0.5, 5.0), (0.5, 0.0)]).unwrap();

        let mut renderer = TextRenderer::new(Vec::new());
        disc.render_with(&mut renderer, |id| {
            if disc[id].y_center() == 0.0 {
                Color::Green
            } else {
                Color::Blue
            }
        })
        .unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(
            text,
            "Element 0: end1:(0, 5), end2:(1, 5) [blue]\nElement 1: end1:(0, 0), end2:(1, 0) [green]\n"
        );
    }

    #[test]
    fn render_default_colors() {
        let mut disc = Discretization::new(1.0);
        disc.append_batch(vec![(0.5, 0.0), (1.5, 0.0)]).unwrap();

        let mut renderer = TextRenderer::new(Vec::new());
        disc.render(&mut renderer).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with("[red]"));
        assert!(lines[1].ends_with("[blue]"));
    }

    #[test]
    fn centers_matrix() {
        let mut disc = Discretization::new(1.0);
        disc.append_batch(vec![(0.5, 0.0), (1.5, -10.0)]).unwrap();

        let centers = disc.centers();
        assert_eq!(centers.shape(), (2, 2));
        assert_relative_eq!(centers[(1, 0)], 1.5);
        assert_relative_eq!(centers[(1, 1)], -10.0);
    }

    #[cfg(feature = "json_export")]
    #[test]
    fn discretization_to_file() {
        let mut disc = Discretization::new(0.5);
        disc.append_batch(vec![(0.25, 0.0), (0.75, 0.0)]).unwrap();

        let disc_json = disc.to_json();
        assert_eq!(disc_json["element_length"].as_f64(), Some(0.5));
        assert_eq!(disc_json["Elements"].members().count(), 2);
        assert_eq!(disc_json["Elements"][1]["x_center"].as_f64(), Some(0.75));

        std::fs::create_dir_all("./test_output").unwrap();
        disc.export_to_json("./test_output/discretization.json")
            .unwrap();

        let read_back =
            json::parse(&std::fs::read_to_string("./test_output/discretization.json").unwrap())
                .unwrap();
        assert_eq!(read_back["element_length"].as_f64(), Some(0.5));
        assert_eq!(read_back["Elements"][0]["id"].as_usize(), Some(0));
        assert_eq!(read_back["Elements"][1]["x_center"].as_f64(), Some(0.75));
    }
}
