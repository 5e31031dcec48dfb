//! Arena rendering — tab bar + one screen per tab.
//!
//! Layout: title, tabs, content, help/status bar. Every tappable element is
//! registered as a click target through the shared widgets.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::battle::BattleRound;
use crate::form::Field;
use crate::input::{is_narrow_layout, ClickState};
use crate::monster::Monster;
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::sorted_view;
use super::state::{ArenaState, BattlePhase, Replay, Screen};

pub fn render(state: &ArenaState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // tabs
            Constraint::Min(8),    // content
            Constraint::Length(3), // help / status
        ])
        .split(area);

    render_title(f, chunks[0]);
    render_tabs(state, f, chunks[1], click_state);
    match state.screen {
        Screen::Monsters => render_monsters(state, f, chunks[2], click_state),
        Screen::Create => render_create(state, f, chunks[2], click_state),
        Screen::Battle => match state.battle_phase {
            BattlePhase::Setup => render_setup(state, f, chunks[2], click_state),
            BattlePhase::Arena => render_arena(state, f, chunks[2], click_state),
            BattlePhase::Result => render_result(state, f, chunks[2], click_state),
        },
    }
    render_help(state, f, chunks[3]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "⚔ Monster Battle Arena ⚔",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_tabs(state: &ArenaState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let tab_style = |screen: Screen| {
        if state.screen == screen {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let mut cs = click_state.borrow_mut();
    TabBar::new()
        .tab("Monsters", tab_style(Screen::Monsters), TAB_MONSTERS)
        .tab("Create", tab_style(Screen::Create), TAB_CREATE)
        .tab("Battle", tab_style(Screen::Battle), TAB_BATTLE)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, &mut cs);
}

// ── Helpers ─────────────────────────────────────────────────

fn hp_bar(current: u32, max: u32, width: usize) -> (String, Color) {
    let ratio = if max > 0 { current as f64 / max as f64 } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    let bar = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width.saturating_sub(filled));
    let color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };
    (bar, color)
}

fn stat_summary(m: &Monster) -> String {
    format!("ATK {:>3}  DEF {:>3}  SPD {:>3}", m.attack, m.defense, m.speed)
}

fn monster_row(m: &Monster, marker: &str, highlighted: bool) -> Line<'static> {
    let (bar, bar_color) = hp_bar(m.hp, m.max_hp, 10);
    let name_style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{:<4}", marker), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<18}", m.name), name_style),
        Span::styled(bar, Style::default().fg(bar_color)),
        Span::styled(
            format!(" {:>4}/{:<4}", m.hp, m.max_hp),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("  pwr {:>3}", m.power()), Style::default().fg(Color::Magenta)),
    ])
}

// ── Monsters ────────────────────────────────────────────────

fn render_monsters(state: &ArenaState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let view = sorted_view(state);
    let mut cl = ClickableList::new();

    if view.is_empty() {
        cl.push(Line::from(Span::styled(
            "  no monsters yet — create one!",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, m) in view.iter().enumerate() {
        let focused = state.focused == Some(m.id);
        let marker = format!("{:>2}.", i + 1);
        cl.push_clickable(monster_row(m, &marker, focused), MONSTER_ROW_BASE + i as u16);
        cl.push(Line::from(Span::styled(
            format!("      {}", stat_summary(m)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if state.focused.is_some() {
        cl.push(Line::from(""));
        cl.push_clickable(
            Line::from(Span::styled(
                " [H] Heal to full ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            MONSTER_HEAL,
        );
        cl.push_clickable(
            Line::from(Span::styled(
                " [D] Delete ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            MONSTER_DELETE,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Collection (by power) ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Create ──────────────────────────────────────────────────

fn render_create(state: &ArenaState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "  type into the highlighted field — Enter moves on, last field submits",
        Style::default().fg(Color::DarkGray),
    )));
    cl.push(Line::from(""));

    for (i, field) in Field::all().iter().enumerate() {
        let active = state.form.active_field() == *field;
        let value = state.form.value(*field);
        let cursor = if active { "_" } else { "" };
        let style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!("  {:<9}", field.label()), style),
                Span::styled(format!("{}{}", value, cursor), Style::default().fg(Color::White)),
                Span::styled(
                    format!("   ({})", field.hint()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            FORM_FIELD_BASE + i as u16,
        );
        if let Some(err) = state.form.error_for(*field) {
            cl.push(Line::from(Span::styled(
                format!("            ✗ {}", err),
                Style::default().fg(Color::Red),
            )));
        }
    }

    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " ▶ Create monster ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        FORM_SUBMIT,
    );
    cl.push_clickable(
        Line::from(Span::styled(" ✗ Clear form ", Style::default().fg(Color::Red))),
        FORM_CLEAR,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" New monster ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Battle: setup ───────────────────────────────────────────

fn render_setup(state: &ArenaState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let view = sorted_view(state);
    let slots = state.collection.selected;
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        "  tap two monsters to send them into the arena",
        Style::default().fg(Color::DarkGray),
    )));
    cl.push(Line::from(""));

    for (i, m) in view.iter().enumerate() {
        let marker = if slots[0] == Some(m.id) {
            "[1]".to_string()
        } else if slots[1] == Some(m.id) {
            "[2]".to_string()
        } else {
            "   ".to_string()
        };
        let selected = marker.starts_with('[');
        let mut line = monster_row(m, &marker, selected);
        if m.is_defeated() {
            line.spans.push(Span::styled(
                "  (defeated — heal first)",
                Style::default().fg(Color::Red),
            ));
        }
        cl.push_clickable(line, SETUP_ROW_BASE + i as u16);
    }

    cl.push(Line::from(""));
    let ready = state.collection.selected_pair().is_some();
    let start_style = if ready {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    cl.push_clickable(Line::from(Span::styled(" ▶ [S] Start battle ", start_style)), SETUP_START);
    cl.push_clickable(
        Line::from(Span::styled(" ✗ [C] Clear selection ", Style::default().fg(Color::Gray))),
        SETUP_CLEAR,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Battle setup ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Battle: arena (replay) ──────────────────────────────────

fn combatant_panel(replay: &Replay, m: &Monster, f: &mut Frame, area: Rect) {
    let hp = replay.display_hp(m.id);
    let (bar, bar_color) = hp_bar(hp, m.max_hp, (area.width as usize).saturating_sub(4).min(24));
    let dead = hp == 0;
    let name_style = if dead {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let lines = vec![
        Line::from(Span::styled(m.name.clone(), name_style)),
        Line::from(vec![
            Span::styled(bar, Style::default().fg(bar_color)),
            Span::styled(format!(" {}/{}", hp, m.max_hp), Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(stat_summary(m), Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if dead { Color::DarkGray } else { Color::Cyan }));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn round_line(round: &BattleRound) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("R{:<3} ", round.round_number),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(round.attacker.name.clone(), Style::default().fg(Color::White)),
        Span::styled(" hits ", Style::default().fg(Color::Gray)),
        Span::styled(round.defender.name.clone(), Style::default().fg(Color::White)),
        Span::styled(
            format!(" for {} ", round.damage),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            format!("({} → {})", round.defender_hp_before, round.defender_hp_after),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if round.killing_blow {
        spans.push(Span::styled(
            "  ☠ KILLING BLOW",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn render_arena(state: &ArenaState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let Some(replay) = &state.replay else {
        return;
    };
    let narrow = is_narrow_layout(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if narrow { 10 } else { 5 }), // combatants
            Constraint::Min(4),                              // round log
            Constraint::Length(3),                           // controls
        ])
        .split(area);

    let (left, right) = (&replay.initial.0, &replay.initial.1);
    if narrow {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(5)])
            .split(chunks[0]);
        combatant_panel(replay, left, f, halves[0]);
        combatant_panel(replay, right, f, halves[1]);
    } else {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);
        combatant_panel(replay, left, f, halves[0]);
        combatant_panel(replay, right, f, halves[1]);
    }

    // Round log: most recent revealed rounds that fit
    let visible = chunks[1].height.saturating_sub(2) as usize;
    let revealed = &replay.result.rounds[..replay.revealed as usize];
    let start = revealed.len().saturating_sub(visible);
    let mut lines: Vec<Line> = revealed[start..].iter().map(round_line).collect();
    if revealed.is_empty() {
        lines.push(Line::from(Span::styled(
            "  press play to begin…",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let log_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(
            " Round {}/{} ",
            replay.revealed, replay.result.total_rounds
        ));
    f.render_widget(Paragraph::new(lines).block(log_block), chunks[1]);

    // Controls
    let play_label = if replay.playing { "⏸ [P] Pause" } else { "▶ [P] Play" };
    let mut controls = ClickableList::new();
    controls.push_clickable(
        Line::from(vec![
            Span::styled(play_label, Style::default().fg(Color::Green)),
            Span::styled("   ", Style::default()),
            Span::styled("[N] Next", Style::default().fg(Color::Yellow)),
            Span::styled("   ", Style::default()),
            Span::styled("[E] Skip to end", Style::default().fg(Color::Magenta)),
            Span::styled("   ", Style::default()),
            Span::styled("[Q] Back", Style::default().fg(Color::Gray)),
        ]),
        REPLAY_TOGGLE,
    );
    let mut cs = click_state.borrow_mut();
    controls.register_targets(chunks[2], &mut cs, 1, 1, 0);
    // Finer-grained targets over the same row, splitting it in four
    let quarter = chunks[2].width / 4;
    for (i, id) in [REPLAY_TOGGLE, REPLAY_STEP, REPLAY_SKIP, REPLAY_BACK].iter().enumerate() {
        let x = chunks[2].x + quarter * i as u16;
        let w = if i == 3 { chunks[2].width - quarter * 3 } else { quarter };
        cs.add_target(Rect::new(x, chunks[2].y + 1, w, 1), *id);
    }
    f.render_widget(
        Paragraph::new(controls.into_lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        chunks[2],
    );
}

// ── Battle: result ──────────────────────────────────────────

fn render_result(state: &ArenaState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let Some(replay) = &state.replay else {
        return;
    };
    let result = &replay.result;
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!("  ★ {} wins! ★", result.winner.name),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        format!(
            "    {} hp remaining — {} defeated in {} rounds ({:.1} ms)",
            result.winner.hp, result.loser.name, result.total_rounds, result.duration_ms
        ),
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));

    // Full trace, capped to what fits above the buttons
    let budget = (area.height as usize).saturating_sub(cl.len() + 5);
    let shown = result.rounds.len().min(budget);
    for round in &result.rounds[result.rounds.len() - shown..] {
        cl.push(round_line(round));
    }
    if shown < result.rounds.len() {
        cl.push(Line::from(Span::styled(
            format!("  … {} earlier rounds", result.rounds.len() - shown),
            Style::default().fg(Color::DarkGray),
        )));
    }

    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " ▶ [N] New battle ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        RESULT_NEW_BATTLE,
    );
    cl.push_clickable(
        Line::from(Span::styled(
            " ◀ [M] Back to collection ",
            Style::default().fg(Color::Gray),
        )),
        RESULT_TO_MONSTERS,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Battle result ");
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Help bar ────────────────────────────────────────────────

fn render_help(state: &ArenaState, f: &mut Frame, area: Rect) {
    let text = match &state.status {
        Some(msg) => msg.clone(),
        None => match state.screen {
            Screen::Monsters => "[1-9] focus  [H] heal  [D] delete  [C]reate  [B]attle".to_string(),
            Screen::Create => "type to edit — Enter: next field / submit".to_string(),
            Screen::Battle => match state.battle_phase {
                BattlePhase::Setup => "[1-9] select  [S] start  [C] clear  [M]onsters".to_string(),
                BattlePhase::Arena => "[P] play/pause  [N] next  [E] skip  [Q] back".to_string(),
                BattlePhase::Result => "[N] new battle  [M] collection".to_string(),
            },
        },
    };
    let style = if state.status.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let help = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}
