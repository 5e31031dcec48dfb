//! Reusable clickable UI components.
//!
//! Each component co-locates rendering with click-target registration so a
//! screen can't draw a button without making it tappable.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Horizontal tab navigation. Renders labels separated by `│` and registers
/// one click target per tab, sized from the rendered label widths.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        const SEPARATOR: &str = " │ ";
        let sep_width = Line::from(SEPARATOR).width() as u16;

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let mut spans: Vec<Span> = Vec::new();
        let mut cursor: u16 = 0;
        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
                cursor += sep_width;
            }
            let padded = format!(" {} ", label);
            let width = Line::from(padded.as_str()).width() as u16;
            // Full outer height for tap tolerance; half the separator on
            // each side so there are no dead gaps between tabs.
            let left = cursor.saturating_sub(sep_width / 2);
            let right = (cursor + width + sep_width / 2).min(inner.width);
            cs.add_target(
                Rect::new(inner.x + left, area.y, right.saturating_sub(left), area.height.max(1)),
                *action_id,
            );
            spans.push(Span::styled(padded, *style));
            cursor += width;
        }

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// A builder pairing rendered [`Line`]s with click actions. Lines marked
/// clickable are bound to whatever row they end up on, so inserting or
/// removing lines never desynchronizes the targets.
///
/// Lists built with this widget must not use `Wrap`: one logical line is
/// assumed to occupy exactly one visual row.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line with a semantic action id.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Register click targets for every clickable line.
    ///
    /// * `top_offset` — rows before content (1 for a top border).
    /// * `bottom_offset` — rows after content (1 for a bottom border).
    /// * `scroll` — vertical scroll offset in rows.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            if line_idx < scroll {
                continue;
            }
            let row = content_y + (line_idx - scroll);
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_lines_map_to_their_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("first"), 10);
        cl.push(Line::from("spacer"));
        cl.push_clickable(Line::from("second"), 20);

        let mut cs = ClickState::new();
        // Area at y=5 with a border: content starts at row 6
        cl.register_targets(Rect::new(0, 5, 40, 10), &mut cs, 1, 1, 0);

        assert_eq!(cs.hit_test(0, 7), Some(10)); // line index 1
        assert_eq!(cs.hit_test(0, 9), Some(20)); // line index 3
        assert_eq!(cs.hit_test(0, 6), None); // header not clickable
    }

    #[test]
    fn targets_clipped_to_content_area() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("row {}", i)), i);
        }
        let mut cs = ClickState::new();
        // Only 4 content rows fit (height 6, border both sides)
        cl.register_targets(Rect::new(0, 0, 40, 6), &mut cs, 1, 1, 0);
        assert_eq!(cs.targets.len(), 4);
    }

    #[test]
    fn scroll_shifts_visible_targets() {
        let mut cl = ClickableList::new();
        for i in 0..10 {
            cl.push_clickable(Line::from(format!("row {}", i)), 100 + i);
        }
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 40, 8), &mut cs, 1, 1, 3);
        // First visible line is logical index 3 at content row 1
        assert_eq!(cs.hit_test(0, 1), Some(103));
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn list_len_counts_all_lines() {
        let mut cl = ClickableList::new();
        assert!(cl.is_empty());
        cl.push(Line::from("a"));
        cl.push_clickable(Line::from("b"), 1);
        assert_eq!(cl.len(), 2);
    }
}
