//! Interactive demo: a small instrument menu on a simulated 20x4 display.
//!
//! Arrows move and step values, Enter toggles edit mode, digits type into
//! numeric fields, Esc quits. Set `MENU_LOG` to a file path to capture the
//! menu's tracing output; `RUST_LOG` filters it.

use std::fs::File;
use std::sync::Mutex;

use static_menu::terminal::{self, Display};
use static_menu::{Action, EnumEntry, FormatKind, Item, Menu, MenuResult, Numeric, Page};
use tracing_subscriber::EnvFilter;

static WAVEFORMS: [EnumEntry; 4] = [
    EnumEntry::new(0, "sine"),
    EnumEntry::new(1, "square"),
    EnumEntry::new(2, "triangle"),
    EnumEntry::new(3, "saw"),
];

static UNITS: [EnumEntry; 3] = [
    EnumEntry::new(1, "Hz"),
    EnumEntry::new(1_000, "kHz"),
    EnumEntry::new(1_000_000, "MHz"),
];

fn reset_output(item: &mut Item, _: ()) -> MenuResult {
    tracing::info!(item = item.name(), "output reset");
    item.set_text("Reset done");
    Ok(())
}

fn entered(page: &mut Page<6>, _: ()) -> MenuResult {
    page.set_item_cursor(0);
    Ok(())
}

fn build_menu() -> Menu<3, 6> {
    Menu::new([
        Page::new("main", "Signal Generator", [
            Item::boolean("output", false).with_labels("ON", "OFF"),
            Item::enumeration("wave", &WAVEFORMS, 0),
            Item::numeric(
                "freq",
                Numeric::new(440.0)
                    .with_range(1.0, 20_000.0)
                    .with_step(10.0)
                    .with_kind(FormatKind::Integer),
            ),
            Item::page_link("to_setup", "Setup...", "setup"),
            Item::page_link("to_about", "About...", "about"),
        ]),
        Page::new("setup", "Setup", [
            Item::enumeration("unit", &UNITS, 0),
            Item::numeric(
                "level",
                Numeric::new(0.5)
                    .with_range(0.0, 1.0)
                    .with_step(0.05)
                    .with_precision(2)
                    .with_kind(FormatKind::Fixed),
            ),
            Item::numeric(
                "addr",
                Numeric::new(32.0).with_range(0.0, 255.0).with_kind(FormatKind::Hex),
            ),
            Item::button("reset", "Reset output").on_click(Action::from_fn(reset_output)),
            Item::page_link("back", "Back", "main"),
        ])
        .with_enter_action(Action::from_fn(entered)),
        Page::new("about", "About", [
            Item::labelled("static-menu demo"),
            Item::labelled("no heap in core"),
            Item::page_link("back", "Back", "main"),
        ])
        .with_enter_action(Action::from_fn(entered)),
    ])
}

fn init_logging() -> std::io::Result<()> {
    let Some(path) = std::env::var_os("MENU_LOG") else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn main() -> std::io::Result<()> {
    init_logging()?;

    let mut menu = build_menu();
    tracing::info!(pages = menu.len(), "menu demo started");
    terminal::run(&mut menu, &Display::default())
}
