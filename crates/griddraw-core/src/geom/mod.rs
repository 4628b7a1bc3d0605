//! Grid-space geometry primitives.

mod line;
mod rect;
mod segment;
mod vector;

pub use line::Line;
pub use rect::Rectangle;
pub use segment::Segment;
pub use vector::Vector;
