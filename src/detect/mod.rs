mod grid;
mod mask;
mod segment;

pub use grid::{Axis, BoundingBox, Grid};
pub use mask::{BackgroundColor, Mask};
pub use segment::{ScanState, Segment, SegmentScanner, find_segments};
