use super::point::Point;
use std::fmt;
use std::io::{self, Write};

/// The drawable extent of one `Element`: a horizontal line from `start` to `end`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub id: usize,
    pub start: Point,
    pub end: Point,
}

/// Line colors understood by [Renderer]s
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Blue,
    Green,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
            Self::Green => write!(f, "green"),
        }
    }
}

/// Default coloring: even ids are red, odd ids are blue
pub fn parity_color(id: usize) -> Color {
    if id % 2 == 0 {
        Color::Red
    } else {
        Color::Blue
    }
}

/// A consumer that draws the [Segment]s of a `Discretization`
pub trait Renderer {
    fn draw_segment(&mut self, segment: &Segment, color: Color) -> io::Result<()>;
}

/// Writes one line of text per [Segment] to the wrapped writer
pub struct TextRenderer<W: Write> {
    writer: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn draw_segment(&mut self, segment: &Segment, color: Color) -> io::Result<()> {
        writeln!(
            self.writer,
            "Element {}: end1:{}, end2:{} [{}]",
            segment.id, segment.start, segment.end, color
        )
    }
}
