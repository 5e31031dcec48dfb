mod arena;
mod battle;
mod collection;
mod form;
mod input;
mod monster;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use arena::ArenaApp;
use input::{pixel_to_cell, ClickState, InputEvent};
use time::ReplayClock;

/// Replay pacing: 10 ticks per second feeding the arena's reveal cadence.
const TICKS_PER_SEC: u32 = 10;

/// Convert a mouse event's pixel position into a terminal cell by querying
/// the grid container's bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    )
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let app = Rc::new(RefCell::new(ArenaApp::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(ReplayClock::new(TICKS_PER_SEC)));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Mouse/touch handler: pixel → cell → registered action id
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_cols == 0 || cs.terminal_rows == 0 {
                return;
            }
            let (col, row) = (mouse_event.col, mouse_event.row);
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(id) = action {
                app.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Enter => InputEvent::Enter,
                _ => return,
            };
            app.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let app = app.clone();
        let click_state = click_state.clone();
        move |f| {
            // Fixed-timestep replay clock driven by the frame callback
            let ticks = clock.borrow_mut().update(js_sys::Date::now());
            let mut app_mut = app.borrow_mut();
            if ticks > 0 {
                app_mut.tick(ticks);
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            app_mut.render(f, size, &click_state);
        }
    });

    Ok(())
}
