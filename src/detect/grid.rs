use std::fmt;

use log::warn;
use serde::Serialize;

use super::Segment;
use crate::error::SlicerError;
use crate::geometry::Rect;

/// Projection axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// One grid cell: the pairing of a row segment with a column segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Grid row index
    pub row: usize,
    /// Grid column index
    pub column: usize,
    /// Vertical extent
    pub rows: Segment,
    /// Horizontal extent
    pub columns: Segment,
}

impl BoundingBox {
    /// Detected footprint of the sprite
    pub fn bounds(&self) -> Rect {
        Rect::new(
            i64::from(self.columns.start),
            i64::from(self.rows.start),
            self.columns.len(),
            self.rows.len(),
        )
    }

    /// Integer midpoint `(cx, cy)` of the paired segments
    pub fn centroid(&self) -> (u32, u32) {
        (self.columns.midpoint(), self.rows.midpoint())
    }

    /// Square window of side `2 * half_size` centered on the centroid.
    ///
    /// The detected size only positions the window; it never sizes it.
    /// `half_size` is expected to be within `SpriteExtractor::validate` limits.
    pub fn crop_window(&self, half_size: u32) -> Rect {
        let (cx, cy) = self.centroid();
        let half = i64::from(half_size);
        let side = half_size.saturating_mul(2);
        Rect::new(i64::from(cx) - half, i64::from(cy) - half, side, side)
    }
}

/// Row and column segments retained for pairing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<Segment>,
    pub columns: Vec<Segment>,
}

impl Grid {
    /// Limit detected segments to a `max_rows` x `max_columns` grid.
    ///
    /// Fails when either axis has no segments. Extra segments are dropped,
    /// unless `strict` is set, in which case any count other than the exact
    /// grid size is an error.
    pub fn fit(
        mut rows: Vec<Segment>,
        mut columns: Vec<Segment>,
        max_rows: usize,
        max_columns: usize,
        strict: bool,
    ) -> Result<Self, SlicerError> {
        if rows.is_empty() {
            return Err(SlicerError::DegenerateInput { axis: Axis::Row });
        }
        if columns.is_empty() {
            return Err(SlicerError::DegenerateInput { axis: Axis::Column });
        }

        for (axis, segments, expected) in [
            (Axis::Row, &mut rows, max_rows),
            (Axis::Column, &mut columns, max_columns),
        ] {
            let found = segments.len();
            if strict && found != expected {
                return Err(SlicerError::GridMismatch {
                    axis,
                    expected,
                    found,
                });
            }
            if found > expected {
                warn!(
                    "Found {} {} segments, keeping the first {}",
                    found, axis, expected
                );
                segments.truncate(expected);
            }
        }

        Ok(Self { rows, columns })
    }

    /// Number of boxes the grid yields
    pub fn len(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Boxes in row-major order
    pub fn boxes(&self) -> impl Iterator<Item = BoundingBox> + '_ {
        self.rows.iter().enumerate().flat_map(move |(row, &rs)| {
            self.columns
                .iter()
                .enumerate()
                .map(move |(column, &cs)| BoundingBox {
                    row,
                    column,
                    rows: rs,
                    columns: cs,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(spans: &[(u32, u32)]) -> Vec<Segment> {
        spans.iter().map(|&(s, e)| Segment::new(s, e)).collect()
    }

    #[test]
    fn test_row_major_order() {
        let grid = Grid::fit(
            segs(&[(0, 10), (20, 30)]),
            segs(&[(100, 110), (120, 130), (140, 150)]),
            3,
            3,
            false,
        )
        .unwrap();

        let order: Vec<(usize, usize)> = grid.boxes().map(|b| (b.row, b.column)).collect();
        assert_eq!(
            order,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );

        let first = grid.boxes().next().unwrap();
        assert_eq!(first.bounds(), Rect::new(100, 0, 10, 10));
        assert_eq!(grid.len(), 6);
    }

    #[test]
    fn test_truncates_extra_segments() {
        let grid = Grid::fit(
            segs(&[(0, 10), (20, 30), (40, 50), (60, 70)]),
            segs(&[(0, 10)]),
            3,
            3,
            false,
        )
        .unwrap();

        assert_eq!(grid.rows, segs(&[(0, 10), (20, 30), (40, 50)]));
        assert_eq!(grid.columns, segs(&[(0, 10)]));
    }

    #[test]
    fn test_strict_rejects_mismatch() {
        let err = Grid::fit(
            segs(&[(0, 10), (20, 30), (40, 50), (60, 70)]),
            segs(&[(0, 10), (20, 30), (40, 50)]),
            3,
            3,
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SlicerError::GridMismatch {
                axis: Axis::Row,
                expected: 3,
                found: 4
            }
        ));

        let err = Grid::fit(
            segs(&[(0, 10), (20, 30), (40, 50)]),
            segs(&[(0, 10), (20, 30)]),
            3,
            3,
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SlicerError::GridMismatch {
                axis: Axis::Column,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_degenerate_axes() {
        let err = Grid::fit(Vec::new(), segs(&[(0, 10)]), 3, 3, false).unwrap_err();
        assert!(matches!(
            err,
            SlicerError::DegenerateInput { axis: Axis::Row }
        ));

        let err = Grid::fit(segs(&[(0, 10)]), Vec::new(), 3, 3, false).unwrap_err();
        assert!(matches!(
            err,
            SlicerError::DegenerateInput { axis: Axis::Column }
        ));
    }

    #[test]
    fn test_crop_window_ignores_box_size() {
        let small = BoundingBox {
            row: 0,
            column: 0,
            rows: Segment::new(290, 310),
            columns: Segment::new(280, 320),
        };
        let large = BoundingBox {
            row: 0,
            column: 0,
            rows: Segment::new(100, 500),
            columns: Segment::new(50, 550),
        };

        assert_eq!(small.centroid(), (300, 300));
        assert_eq!(small.crop_window(250), Rect::new(50, 50, 500, 500));
        assert_eq!(large.centroid(), (300, 300));
        assert_eq!(large.crop_window(250), small.crop_window(250));
    }

    #[test]
    fn test_crop_window_can_start_negative() {
        let b = BoundingBox {
            row: 0,
            column: 0,
            rows: Segment::new(0, 20),
            columns: Segment::new(5, 15),
        };
        assert_eq!(b.crop_window(25), Rect::new(-15, -15, 50, 50));
    }
}
