// src/analysis/motion_history.rs
//
// Bounded newest-first history of accepted positions and radii.
//
// Frames without an accepted detection push an explicit Gap so the buffer
// stays aligned with frame order. Gaps break the rendered trail and are
// skipped by every numeric aggregate.

use crate::types::Point;
use serde::Serialize;

pub const HISTORY_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slot<T> {
    Sample(T),
    Gap,
}

impl<T: Copy> Slot<T> {
    pub fn sample(&self) -> Option<T> {
        match self {
            Self::Sample(v) => Some(*v),
            Self::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Sample(v),
            None => Self::Gap,
        }
    }
}

/// Fixed-capacity circular buffer. Once full, each push overwrites the
/// oldest slot.
#[derive(Debug, Clone)]
pub struct GapRing<T: Copy, const N: usize> {
    slots: [Slot<T>; N],
    /// Index where the next slot will be written
    head: usize,
    len: usize,
}

impl<T: Copy, const N: usize> GapRing<T, N> {
    pub fn new() -> Self {
        Self {
            slots: [Slot::Gap; N],
            head: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, slot: Slot<T>) {
        if N == 0 {
            return;
        }
        self.slots[self.head] = slot;
        self.head = (self.head + 1) % N;
        if self.len < N {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot `i` positions back from the newest (0 = newest)
    pub fn get(&self, i: usize) -> Option<&Slot<T>> {
        if i >= self.len {
            return None;
        }
        let idx = (self.head + N - 1 - i) % N;
        Some(&self.slots[idx])
    }

    /// Newest-first iteration
    pub fn iter(&self) -> impl Iterator<Item = &Slot<T>> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// Newest-first samples with gaps removed
    pub fn samples(&self) -> Vec<T> {
        self.iter().filter_map(|s| s.sample()).collect()
    }
}

impl<T: Copy, const N: usize> Default for GapRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment of the rendered trail between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailSegment {
    pub from: Point,
    pub to: Point,
    pub thickness: i32,
}

#[derive(Debug, Clone, Default)]
pub struct MotionHistory {
    positions: GapRing<Point, HISTORY_CAPACITY>,
    radii: GapRing<i32, HISTORY_CAPACITY>,
}

impl MotionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, position: Slot<Point>, radius: Slot<i32>) {
        self.positions.push(position);
        self.radii.push(radius);
    }

    pub fn push_gap(&mut self) {
        self.push(Slot::Gap, Slot::Gap);
    }

    pub fn snapshot(&self) -> HistorySnapshot<'_> {
        HistorySnapshot { history: self }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Consecutive non-gap pairs, newest first. Stroke thickness tapers
    /// with age.
    pub fn trail_segments(&self) -> Vec<TrailSegment> {
        let mut segments = Vec::new();
        for i in 1..self.positions.len() {
            let (Some(newer), Some(older)) = (self.positions.get(i - 1), self.positions.get(i))
            else {
                continue;
            };
            let (Slot::Sample(from), Slot::Sample(to)) = (*newer, *older) else {
                continue;
            };
            let thickness = ((HISTORY_CAPACITY as f64 / (i + 1) as f64).sqrt() * 2.5) as i32;
            segments.push(TrailSegment {
                from,
                to,
                thickness,
            });
        }
        segments
    }
}

/// Read-only view handed to the dynamics estimator
#[derive(Clone, Copy)]
pub struct HistorySnapshot<'a> {
    history: &'a MotionHistory,
}

impl<'a> HistorySnapshot<'a> {
    pub fn positions(&self) -> impl Iterator<Item = &'a Slot<Point>> + 'a {
        self.history.positions.iter()
    }

    pub fn radii(&self) -> impl Iterator<Item = &'a Slot<i32>> + 'a {
        self.history.radii.iter()
    }

    pub fn valid_positions(&self) -> Vec<Point> {
        self.history.positions.samples()
    }

    pub fn valid_radii(&self) -> Vec<i32> {
        self.history.radii.samples()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_never_exceeds_capacity() {
        let mut history = MotionHistory::new();
        for i in 0..100 {
            if i % 7 == 0 {
                history.push_gap();
            } else {
                history.push(Slot::Sample(Point::new(i, i)), Slot::Sample(i));
            }
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.snapshot().positions().count(), HISTORY_CAPACITY);
        assert_eq!(history.snapshot().radii().count(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_iteration_is_newest_first() {
        let mut ring: GapRing<i32, 4> = GapRing::new();
        for v in 1..=6 {
            ring.push(Slot::Sample(v));
        }
        // 1 and 2 were evicted
        assert_eq!(ring.samples(), vec![6, 5, 4, 3]);
        assert_eq!(ring.get(0), Some(&Slot::Sample(6)));
        assert_eq!(ring.get(4), None);
    }

    #[test]
    fn test_gaps_kept_in_sequence_but_skipped_in_samples() {
        let mut history = MotionHistory::new();
        history.push(Slot::Sample(Point::new(1, 1)), Slot::Sample(10));
        history.push_gap();
        history.push(Slot::Sample(Point::new(3, 3)), Slot::Sample(12));

        let snap = history.snapshot();
        let seq: Vec<_> = snap.positions().copied().collect();
        assert_eq!(
            seq,
            vec![
                Slot::Sample(Point::new(3, 3)),
                Slot::Gap,
                Slot::Sample(Point::new(1, 1))
            ]
        );
        assert_eq!(
            snap.valid_positions(),
            vec![Point::new(3, 3), Point::new(1, 1)]
        );
        assert_eq!(snap.valid_radii(), vec![12, 10]);
    }

    #[test]
    fn test_trail_breaks_at_gaps() {
        let mut history = MotionHistory::new();
        history.push(Slot::Sample(Point::new(0, 0)), Slot::Sample(5));
        history.push(Slot::Sample(Point::new(2, 0)), Slot::Sample(5));
        history.push_gap();
        history.push(Slot::Sample(Point::new(6, 0)), Slot::Sample(5));
        history.push(Slot::Sample(Point::new(8, 0)), Slot::Sample(5));

        let trail = history.trail_segments();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].from, Point::new(8, 0));
        assert_eq!(trail[0].to, Point::new(6, 0));
        // i=1 -> sqrt(32/2)*2.5 = 10
        assert_eq!(trail[0].thickness, 10);
        assert_eq!(trail[1].from, Point::new(2, 0));
        assert!(trail[1].thickness < trail[0].thickness);
    }

    #[test]
    fn test_slot_from_option() {
        assert_eq!(Slot::from(Some(3)), Slot::Sample(3));
        assert!(Slot::<i32>::from(None).is_gap());
    }
}
