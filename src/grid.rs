//! Grid plumbing shared by grid based games: pixel <-> cell mapping and
//! one-shot delayed actions.

use web_time::{Duration, Instant};

use crate::types::Position;

/// Geometry of a `rows` x `columns` grid drawn on a `width` x `height` canvas
/// with `padding` pixels between cells and around the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    pub padding: u32,
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    pub fn new(rows: usize, columns: usize, padding: u32, width: u32, height: u32) -> Self {
        Self {
            rows,
            columns,
            padding,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Width of one cell, padding excluded.
    pub fn cell_width(&self) -> u32 {
        cell_extent(self.width, self.columns, self.padding)
    }

    /// Height of one cell, padding excluded.
    pub fn cell_height(&self) -> u32 {
        cell_extent(self.height, self.rows, self.padding)
    }

    /// Maps a canvas pixel to the cell under it. Pixels in the padding or
    /// outside the canvas snap to the nearest cell.
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Position {
        let half = i64::from(self.padding / 2);
        let row = snap(i64::from(y) - half, self.cell_height(), self.padding, self.rows);
        let col = snap(i64::from(x) - half, self.cell_width(), self.padding, self.columns);
        Position::new(row, col)
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, row: usize, col: usize) -> (u32, u32) {
        let origin = |index: usize, extent: u32| {
            u32::try_from(index)
                .unwrap_or(u32::MAX)
                .saturating_mul(extent.saturating_add(self.padding))
                .saturating_add(self.padding)
        };
        (origin(col, self.cell_width()), origin(row, self.cell_height()))
    }
}

fn cell_extent(total: u32, cells: usize, padding: u32) -> u32 {
    let cells = u32::try_from(cells.max(1)).unwrap_or(u32::MAX);
    total.saturating_sub(padding.saturating_mul(cells.saturating_add(1))) / cells
}

// i64 holds any i32 pixel minus half a u32 padding, and any u32 stride.
fn snap(offset: i64, extent: u32, padding: u32, cells: usize) -> usize {
    let stride = (i64::from(extent) + i64::from(padding)).max(1);
    let last = i64::try_from(cells.saturating_sub(1)).unwrap_or(i64::MAX);
    (offset / stride).clamp(0, last) as usize
}

/// A game drawn as a grid of independently painted cells and driven by
/// cell clicks.
pub trait GridGame {
    /// What the host should draw in one cell.
    type Visual;
    /// What a click produced.
    type Outcome;

    fn layout(&self) -> &GridLayout;

    fn paint_cell(&self, row: usize, col: usize) -> Self::Visual;

    fn cell_clicked(&mut self, row: usize, col: usize) -> Self::Outcome;

    /// Dispatches a click at canvas pixel `(x, y)`.
    fn click_at(&mut self, x: i32, y: i32) -> Self::Outcome {
        let pos = self.layout().cell_at_pixel(x, y);
        self.cell_clicked(pos.row, pos.col)
    }

    /// Paints every cell in row-major order.
    fn paint_all(&self) -> Vec<Self::Visual> {
        let layout = *self.layout();
        (0..layout.rows)
            .flat_map(|row| (0..layout.columns).map(move |col| (row, col)))
            .map(|(row, col)| self.paint_cell(row, col))
            .collect()
    }
}

/// One-shot delayed items. The host polls with its own clock; nothing here
/// spawns timers or calls back.
#[derive(Debug, Clone)]
pub struct DelayQueue<T> {
    pending: Vec<(Instant, T)>,
}

impl<T> DelayQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedules `item` to become due `delay` after `now`.
    pub fn after(&mut self, now: Instant, delay: Duration, item: T) {
        self.pending.push((now + delay, item));
    }

    /// Removes and returns every item due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(deadline, _)| *deadline <= now);
        self.pending = pending;
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, item)| item).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        // 8 cells of 70px with 3px padding: 8 * 70 + 9 * 3 = 587.
        GridLayout::new(8, 8, 3, 587, 587)
    }

    #[test]
    fn cell_size_excludes_padding() {
        let layout = layout();

        assert_eq!(layout.cell_width(), 70);
        assert_eq!(layout.cell_height(), 70);
    }

    #[test]
    fn pixel_maps_to_cell_under_it() {
        let layout = layout();

        assert_eq!(layout.cell_at_pixel(10, 10), Position::new(0, 0));
        assert_eq!(layout.cell_at_pixel(80, 10), Position::new(0, 1));
        assert_eq!(layout.cell_at_pixel(10, 300), Position::new(4, 0));
        assert_eq!(layout.cell_at_pixel(580, 580), Position::new(7, 7));
    }

    #[test]
    fn pixels_off_the_grid_are_clamped() {
        let layout = layout();

        assert_eq!(layout.cell_at_pixel(-50, -50), Position::new(0, 0));
        assert_eq!(layout.cell_at_pixel(5000, 20), Position::new(0, 7));
        assert_eq!(layout.cell_at_pixel(i32::MIN, 10), Position::new(0, 0));
        assert_eq!(layout.cell_at_pixel(10, i32::MIN), Position::new(0, 0));
        assert_eq!(layout.cell_at_pixel(i32::MAX, i32::MAX), Position::new(7, 7));
        assert_eq!(layout.cell_at_pixel(i32::MIN, i32::MAX), Position::new(7, 0));
    }

    #[test]
    fn oversized_padding_saturates_instead_of_overflowing() {
        let layout = GridLayout::new(8, 8, u32::MAX / 4, 587, 587);

        assert_eq!(layout.cell_width(), 0);
        assert_eq!(layout.cell_height(), 0);
        assert_eq!(layout.cell_at_pixel(10, 10), Position::new(0, 0));
        assert_eq!(layout.cell_at_pixel(i32::MAX, i32::MIN), Position::new(0, 1));
        assert_eq!(layout.cell_origin(7, 7), (u32::MAX, u32::MAX));

        let max = GridLayout::new(8, 8, u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(max.cell_at_pixel(i32::MIN, i32::MAX), Position::new(0, 0));
        assert_eq!(max.cell_origin(0, 0), (u32::MAX, u32::MAX));
    }

    #[test]
    fn cell_origin_round_trips_through_pixel_lookup() {
        let layout = layout();

        assert_eq!(layout.cell_origin(0, 0), (3, 3));
        assert_eq!(layout.cell_origin(2, 5), (5 * 73 + 3, 2 * 73 + 3));
        let (x, y) = layout.cell_origin(6, 1);
        assert_eq!(layout.cell_at_pixel(x as i32 + 1, y as i32 + 1), Position::new(6, 1));
    }

    #[test]
    fn tiny_canvas_does_not_underflow() {
        let layout = GridLayout::new(8, 8, 3, 10, 10);

        assert_eq!(layout.cell_width(), 0);
        assert_eq!(layout.cell_at_pixel(9, 9), Position::new(2, 2));
    }

    #[test]
    fn delayed_items_fire_once_after_deadline() {
        let start = Instant::now();
        let mut queue = DelayQueue::new();
        queue.after(start, Duration::from_millis(500), "late");
        queue.after(start, Duration::from_millis(100), "early");

        assert!(queue.drain_due(start).is_empty());
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(100)));
        assert_eq!(queue.drain_due(start + Duration::from_millis(600)), vec!["early", "late"]);
        assert!(queue.is_empty());
        assert!(queue.drain_due(start + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn drain_keeps_items_not_yet_due() {
        let start = Instant::now();
        let mut queue = DelayQueue::new();
        queue.after(start, Duration::from_millis(100), 1);
        queue.after(start, Duration::from_millis(300), 2);

        assert_eq!(queue.drain_due(start + Duration::from_millis(200)), vec![1]);
        assert_eq!(queue.len(), 1);
        queue.clear();
        assert!(queue.is_empty());
    }
}
