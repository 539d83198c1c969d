//! One function per widget demo. Each takes the shared terminal, runs the
//! widget to completion and returns a one-line summary for stdout.

use anyhow::{Context, Result};
use core_config::{Config, EscapeSetting};
use core_events::Key;
use core_model::Region;
use core_terminal::Terminal;
use core_widgets::{
    Editable, EscapePolicy, FieldEditor, IntegerValue, NavigationPolicy, Selection,
    SelectionOptions, SelectionWidget, Table, TableSource, TextValue, ToggleValue,
};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Language {
    pub name: &'static str,
    pub year: u16,
    pub paradigm: &'static str,
}

pub const LANGUAGES: [Language; 5] = [
    Language { name: "Rust", year: 2015, paradigm: "systems" },
    Language { name: "Haskell", year: 1990, paradigm: "functional" },
    Language { name: "Smalltalk", year: 1972, paradigm: "objects" },
    Language { name: "Prolog", year: 1972, paradigm: "logic" },
    Language { name: "Erlang", year: 1986, paradigm: "concurrent" },
];

/// A `height` x `width` window centred on the screen, shrunk to fit.
fn window(term: &Terminal, height: u16, width: u16) -> Region {
    let (max_h, max_w) = term.screen_limits();
    let h = height.min(max_h);
    let w = width.min(max_w);
    Region::new(h, w, (max_h - h) / 2, (max_w - w) / 2)
}

pub fn escape_policy(setting: EscapeSetting) -> EscapePolicy {
    match setting {
        EscapeSetting::Keep => EscapePolicy::Keep,
        EscapeSetting::Discard => EscapePolicy::Discard,
    }
}

/// Browse the language table with Up/Down; Enter picks, Escape closes.
pub fn table(term: &Terminal) -> Result<String> {
    let source = TableSource::new(["Language", "Year", "Paradigm"], |l: &Language, col| {
        match col {
            0 => l.name.to_string(),
            1 => l.year.to_string(),
            _ => l.paradigm.to_string(),
        }
    })
    .rows(LANGUAGES.to_vec())
    .auto_resize(true);
    let mut table =
        Table::new(term, source, window(term, 10, 48)).context("table does not fit the terminal")?;
    term.set_echo(false);
    term.set_cursor_visible(false)?;
    table.surface_mut().set_keypad(true);

    let last = table.rows().len().saturating_sub(1);
    let mut row = 0;
    table.highlight_row(row)?;
    loop {
        match table.surface().read_key()? {
            Key::Up => row = row.saturating_sub(1),
            Key::Down => row = (row + 1).min(last),
            Key::Enter => {
                let name = table.rows().get(row).map_or("nothing", |l| l.name);
                return Ok(format!("table: picked {name}"));
            }
            Key::Esc => return Ok("table: closed".to_string()),
            _ => continue,
        }
        debug!(target: "runtime", row, "table_row_highlighted");
        table.highlight_row(row)?;
    }
}

pub fn select(term: &Terminal, config: &Config, multi: bool) -> Result<String> {
    let options = SelectionOptions {
        centered: config.file.selection.centered,
        multi,
    };
    let (title, label) = if multi {
        ("Pick any", "multi")
    } else {
        ("Pick one", "select")
    };
    let names = LANGUAGES.iter().map(|l| l.name);
    let mut widget = SelectionWidget::new(term, title, window(term, 12, 40), names, options)
        .context("selection does not fit the terminal")?
        .with_escape_policy(escape_policy(config.file.selection.escape));

    let mut selected = Selection::new();
    let any = widget.run(&mut selected)?;
    let picked = if any {
        selected
            .iter()
            .filter_map(|i| LANGUAGES.get(*i))
            .map(|l| l.name)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "nothing".to_string()
    };
    let suffix = if widget.cancelled() { " (cancelled)" } else { "" };
    Ok(format!("{label}: {picked}{suffix}"))
}

pub fn form(term: &Terminal, config: &Config) -> Result<String> {
    let policy = NavigationPolicy {
        down_wraps: config.file.editor.down_wraps,
    };
    let region = window(term, 10, 44);
    let mut editor = FieldEditor::new(term, "New user", ["Name", "Age", "Admin"], region)
        .context("form does not fit the terminal")?
        .with_navigation_policy(policy);

    let mut name = String::new();
    let mut age = 0i64;
    let mut admin = false;
    let done = {
        let mut n = TextValue::new(&mut name);
        let mut a = IntegerValue::new(&mut age);
        let mut t = ToggleValue::new(&mut admin);
        let mut values: [&mut dyn Editable; 3] = [&mut n, &mut a, &mut t];
        editor.run(&mut values)?
    };
    if done {
        Ok(format!("form: name={name} age={age} admin={admin}"))
    } else {
        Ok("form: cancelled".to_string())
    }
}
