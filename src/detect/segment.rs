use serde::Serialize;

/// A half-open run `[start, end)` of active projection entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
}

impl Segment {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Floor of the interval midpoint
    pub fn midpoint(&self) -> u32 {
        self.start + (self.end - self.start) / 2
    }
}

/// Scanner state while walking a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Not inside a run
    Outside,
    /// Inside a run that began at `start`
    Inside { start: u32 },
}

/// Two-state run-length scanner over a boolean projection.
///
/// Feed values in order with [`step`](Self::step), then call
/// [`finish`](Self::finish) to close a run that reaches the end of input.
/// Runs shorter than `min_len` are dropped.
#[derive(Debug, Clone)]
pub struct SegmentScanner {
    min_len: u32,
    position: u32,
    state: ScanState,
    segments: Vec<Segment>,
}

impl SegmentScanner {
    pub fn new(min_len: u32) -> Self {
        Self {
            min_len,
            position: 0,
            state: ScanState::Outside,
            segments: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Consume the value at the current position.
    pub fn step(&mut self, active: bool) {
        let i = self.position;
        self.state = match (self.state, active) {
            (ScanState::Outside, true) => ScanState::Inside { start: i },
            (ScanState::Inside { start }, false) => {
                self.close(start, i);
                ScanState::Outside
            }
            (state, _) => state,
        };
        self.position += 1;
    }

    /// Close any open run at the end of input and return the kept segments.
    pub fn finish(mut self) -> Vec<Segment> {
        if let ScanState::Inside { start } = self.state {
            self.close(start, self.position);
        }
        self.segments
    }

    fn close(&mut self, start: u32, end: u32) {
        if end - start >= self.min_len {
            self.segments.push(Segment::new(start, end));
        }
    }
}

/// Extract runs of `true` at least `min_len` long, ordered by position.
pub fn find_segments(projection: &[bool], min_len: u32) -> Vec<Segment> {
    let mut scanner = SegmentScanner::new(min_len);
    for &active in projection {
        scanner.step(active);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(len: usize, runs: &[(usize, usize)]) -> Vec<bool> {
        let mut p = vec![false; len];
        for &(start, end) in runs {
            for v in &mut p[start..end] {
                *v = true;
            }
        }
        p
    }

    #[test]
    fn test_scanner_transitions() {
        let mut scanner = SegmentScanner::new(1);
        assert_eq!(scanner.state(), ScanState::Outside);
        scanner.step(false);
        assert_eq!(scanner.state(), ScanState::Outside);
        scanner.step(true);
        assert_eq!(scanner.state(), ScanState::Inside { start: 1 });
        scanner.step(true);
        assert_eq!(scanner.state(), ScanState::Inside { start: 1 });
        scanner.step(false);
        assert_eq!(scanner.state(), ScanState::Outside);
        assert_eq!(scanner.finish(), vec![Segment::new(1, 3)]);
    }

    #[test]
    fn test_interior_runs() {
        let p = projection(100, &[(10, 30), (40, 60), (70, 90)]);
        assert_eq!(
            find_segments(&p, 10),
            vec![
                Segment::new(10, 30),
                Segment::new(40, 60),
                Segment::new(70, 90)
            ]
        );
    }

    #[test]
    fn test_min_length_boundary() {
        let exact = projection(30, &[(5, 15)]);
        assert_eq!(find_segments(&exact, 10), vec![Segment::new(5, 15)]);

        let short = projection(30, &[(5, 14)]);
        assert!(find_segments(&short, 10).is_empty());
    }

    #[test]
    fn test_run_touching_start() {
        let p = projection(50, &[(0, 12)]);
        assert_eq!(find_segments(&p, 10), vec![Segment::new(0, 12)]);

        let short = projection(50, &[(0, 9)]);
        assert!(find_segments(&short, 10).is_empty());
    }

    #[test]
    fn test_run_touching_end() {
        let p = projection(50, &[(38, 50)]);
        assert_eq!(find_segments(&p, 10), vec![Segment::new(38, 50)]);

        let exact = projection(50, &[(40, 50)]);
        assert_eq!(find_segments(&exact, 10), vec![Segment::new(40, 50)]);

        let short = projection(50, &[(41, 50)]);
        assert!(find_segments(&short, 10).is_empty());
    }

    #[test]
    fn test_fully_active() {
        let p = vec![true; 20];
        assert_eq!(find_segments(&p, 10), vec![Segment::new(0, 20)]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(find_segments(&[], 1).is_empty());
        assert!(find_segments(&[false; 16], 1).is_empty());
    }

    #[test]
    fn test_noise_is_filtered() {
        // single stray pixel between two real rows
        let p = projection(60, &[(0, 15), (25, 26), (40, 55)]);
        assert_eq!(
            find_segments(&p, 10),
            vec![Segment::new(0, 15), Segment::new(40, 55)]
        );
    }

    #[test]
    fn test_idempotent() {
        let p = projection(80, &[(0, 10), (13, 14), (20, 45), (70, 80)]);
        let first = find_segments(&p, 10);
        let second = find_segments(&p, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_segment_midpoint() {
        assert_eq!(Segment::new(10, 30).midpoint(), 20);
        assert_eq!(Segment::new(10, 31).midpoint(), 20);
        assert_eq!(Segment::new(0, 1).midpoint(), 0);
        assert_eq!(Segment::new(4, 9).len(), 5);
    }
}
