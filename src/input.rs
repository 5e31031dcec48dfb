//! Shared input handling: normalized events, click targets, hit testing.
//!
//! Screens register rectangular click targets while rendering; the mouse
//! handler converts pixel coordinates to terminal cells and hit-tests them
//! into semantic action ids (constants in `arena::actions`).

use ratzilla::ratatui::layout::Rect;

/// Input events normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable key press.
    Key(char),
    Backspace,
    Enter,
    /// A click/tap on a registered target, identified by its action id.
    Click(u16),
}

/// A screen region that triggers an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (which registers targets every frame)
/// and the mouse handler (which hit-tests against them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on one row of `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Hit-test a terminal cell. Later-registered targets win when regions
    /// overlap, matching UI layering.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside =
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Below this column count the content stacks vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 70
}

/// Convert a pixel coordinate (relative to the grid container) into a
/// terminal cell. Returns None outside the grid or for a zero-sized grid.
pub fn pixel_to_cell(
    click_x: f64,
    click_y: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if click_x < 0.0 || click_y < 0.0 {
        return None;
    }
    let col = (click_x / (grid_width / cols as f64)) as u16;
    let row = (click_y / (grid_height / rows as f64)) as u16;
    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_basic() {
        let mut cs = ClickState::new();
        cs.add_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_target(Rect::new(0, 11, 80, 1), 2);
        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_respects_horizontal_bounds() {
        let mut cs = ClickState::new();
        cs.add_target(Rect::new(10, 5, 20, 1), 7);
        assert_eq!(cs.hit_test(9, 5), None);
        assert_eq!(cs.hit_test(10, 5), Some(7));
        assert_eq!(cs.hit_test(29, 5), Some(7));
        assert_eq!(cs.hit_test(30, 5), None);
    }

    #[test]
    fn overlapping_targets_last_registered_wins() {
        let mut cs = ClickState::new();
        cs.add_target(Rect::new(0, 0, 80, 24), 1);
        cs.add_target(Rect::new(0, 10, 80, 1), 2);
        assert_eq!(cs.hit_test(5, 10), Some(2));
        assert_eq!(cs.hit_test(5, 9), Some(1));
    }

    #[test]
    fn add_row_target_ignores_rows_outside_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(0, 5, 40, 10);
        cs.add_row_target(area, 4, 1); // above
        cs.add_row_target(area, 15, 2); // below
        cs.add_row_target(area, 8, 3);
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(0, 8), Some(3));
    }

    #[test]
    fn clear_targets_empties_state() {
        let mut cs = ClickState::new();
        cs.add_target(Rect::new(0, 0, 10, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn pixel_to_cell_maps_evenly() {
        // 800x480 grid, 80x24 cells → 10px per col, 20px per row
        assert_eq!(pixel_to_cell(0.0, 0.0, 800.0, 480.0, 80, 24), Some((0, 0)));
        assert_eq!(pixel_to_cell(15.0, 25.0, 800.0, 480.0, 80, 24), Some((1, 1)));
        assert_eq!(pixel_to_cell(799.0, 479.0, 800.0, 480.0, 80, 24), Some((79, 23)));
    }

    #[test]
    fn pixel_to_cell_rejects_out_of_bounds() {
        assert_eq!(pixel_to_cell(-1.0, 0.0, 800.0, 480.0, 80, 24), None);
        assert_eq!(pixel_to_cell(0.0, 480.0, 800.0, 480.0, 80, 24), None);
        assert_eq!(pixel_to_cell(0.0, 0.0, 0.0, 480.0, 80, 24), None);
        assert_eq!(pixel_to_cell(0.0, 0.0, 800.0, 480.0, 0, 24), None);
    }
}
