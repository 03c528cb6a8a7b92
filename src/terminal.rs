//! Terminal Frontend - Drive a menu from a desktop terminal
//!
//! Bridges crossterm's event system with [`Menu::handle_input`] and draws the
//! active page as a character-LCD frame. The frontend only uses the menu's
//! public surface; it exists to try menus out without hardware.
//!
//! # API
//!
//! - `convert_key_event` - Convert a crossterm KeyEvent to an [`Input`]
//! - `frame_lines` - Text rows of the simulated display
//! - `render` - Draw the frame plus a status line
//! - `run` - Raw-mode event loop until Esc or Ctrl+C
//!
//! # Example
//!
//! ```ignore
//! use static_menu::terminal::{run, Display};
//!
//! let mut menu = build_menu();
//! run(&mut menu, &Display::default())?;
//! ```

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::menu::Menu;
use crate::types::{Capabilities, Error, Input};

// =============================================================================
// DISPLAY CONFIG
// =============================================================================

/// Geometry of the simulated character display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display {
    pub columns: u16,
    pub rows: u16,
}

impl Default for Display {
    fn default() -> Self {
        Self { columns: 20, rows: 4 }
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm KeyEvent to an input. Releases and unmapped keys
/// become [`Input::NONE`].
pub fn convert_key_event(event: KeyEvent) -> Input {
    if event.kind == KeyEventKind::Release {
        return Input::NONE;
    }

    match event.code {
        KeyCode::Up => Input::UP,
        KeyCode::Down => Input::DOWN,
        KeyCode::Left => Input::LEFT,
        KeyCode::Right => Input::RIGHT,
        KeyCode::Enter => Input::ENTER,
        KeyCode::Backspace => Input::character(0x08u8),
        KeyCode::Delete => Input::character(0x7fu8),
        KeyCode::Char(c) => Input::from(c),
        _ => Input::NONE,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    event.code == KeyCode::Esc
        || (event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL))
}

// =============================================================================
// FRAME LAYOUT
// =============================================================================

/// Clip `s` to `width` display cells and pad the rest with spaces.
fn fit(s: &str, width: usize) -> String {
    let mut line = String::with_capacity(width);
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        line.push(c);
        used += w;
    }
    line.extend(std::iter::repeat_n(' ', width - used));
    line
}

/// Text rows of the display: the page title, then as many items as fit,
/// scrolled so the cursor stays visible.
///
/// The cursor row is marked `>`, or `*` while the page is editing. Editable
/// items show their name with the value right-aligned.
pub fn frame_lines<const P: usize, const N: usize>(menu: &Menu<P, N>, display: &Display) -> Vec<String> {
    let width = usize::from(display.columns);
    let visible = usize::from(display.rows).saturating_sub(1);
    let page = menu.active_page();

    let mut lines = Vec::with_capacity(usize::from(display.rows));
    lines.push(fit(page.title(), width));

    let first = (page.cursor() + 1).saturating_sub(visible);
    for (index, item) in page.items().iter().enumerate().skip(first).take(visible) {
        let marker = match (index == page.cursor(), page.is_editing()) {
            (true, true) => '*',
            (true, false) => '>',
            _ => ' ',
        };

        let body_width = width.saturating_sub(1);
        let body = if item.capabilities().contains(Capabilities::EDITABLE) {
            let value = item.text();
            let value_width = value.width().min(body_width);
            let name = fit(item.name(), body_width - value_width);
            format!("{name}{}", fit(value, value_width))
        } else {
            fit(item.text(), body_width)
        };

        lines.push(format!("{marker}{body}"));
    }

    while lines.len() < usize::from(display.rows) {
        lines.push(fit("", width));
    }
    lines
}

// =============================================================================
// RENDERING
// =============================================================================

/// Draw the frame with a border, then a status line showing the last
/// rejected `(Error, Input)` pair or a key hint.
pub fn render<W: Write, const P: usize, const N: usize>(
    out: &mut W,
    menu: &Menu<P, N>,
    display: &Display,
    last: Option<(Error, Input)>,
) -> io::Result<()> {
    let border = format!("+{}+", "-".repeat(usize::from(display.columns)));

    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0), Print(&border))?;

    let mut row = 1;
    for line in frame_lines(menu, display) {
        queue!(out, cursor::MoveTo(0, row), Print(format!("|{line}|")))?;
        row += 1;
    }
    queue!(out, cursor::MoveTo(0, row), Print(&border))?;

    let status = match last {
        Some((err, input)) => format!("{err} ({input:?})"),
        None => "arrows move | Enter edits | Esc quits".to_string(),
    };
    queue!(out, cursor::MoveTo(0, row + 2), Print(status))?;

    out.flush()
}

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Run the menu interactively until Esc or Ctrl+C.
pub fn run<const P: usize, const N: usize>(menu: &mut Menu<P, N>, display: &Display) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(menu, display, &mut out);

    execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn event_loop<W: Write, const P: usize, const N: usize>(
    menu: &mut Menu<P, N>,
    display: &Display,
    out: &mut W,
) -> io::Result<()> {
    let mut last = None;
    render(out, menu, display, last)?;

    loop {
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            Event::Resize(..) => {
                render(out, menu, display, last)?;
                continue;
            }
            _ => continue,
        };

        if is_quit(&key) {
            return Ok(());
        }

        let input = convert_key_event(key);
        if input.is_none() {
            continue;
        }

        last = menu.handle_input(input).err().map(|err| (err, input));
        if let Some((err, input)) = last {
            tracing::info!(error = %err, ?input, page = menu.active_page().name(), "input rejected");
        }
        render(out, menu, display, last)?;
    }
}

// =============================================================================
// TESTS
// =============================================================================
