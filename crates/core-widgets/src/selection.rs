//! Option list with single or multiple selection.
//!
//! States: browsing an option, sitting on the confirm control (multi-select
//! only, cursor index `N`), done. Up/Down move the cursor (clamped), Enter
//! selects / toggles / confirms, Escape finishes early.

use crate::WidgetResult;
use crate::confirm::draw_confirm;
use core_events::Key;
use core_model::Region;
use core_render::TitledSurface;
use core_render::text::center;
use core_terminal::{Attr, Terminal};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Indices of the chosen options.
pub type Selection = BTreeSet<usize>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Centre every option across the content width.
    pub centered: bool,
    /// Allow several options and show the confirm control.
    pub multi: bool,
}

/// What Escape does to the selection accumulated during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapePolicy {
    /// Return whatever was toggled before Escape.
    Keep,
    /// Restore the selection to its contents when the run started.
    #[default]
    Discard,
}

/// Cursor and termination state, independent of any backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    cursor: usize,
    len: usize,
    multi: bool,
    done: bool,
    cancelled: bool,
}

impl SelectionState {
    pub fn new(len: usize, multi: bool) -> Self {
        Self {
            cursor: 0,
            len,
            multi,
            done: false,
            cancelled: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// True while the cursor sits on the confirm control.
    pub fn on_confirm(&self) -> bool {
        self.multi && self.cursor == self.len
    }

    fn max_cursor(&self) -> usize {
        if self.multi {
            self.len
        } else {
            self.len.saturating_sub(1)
        }
    }

    /// Consume one key, updating the cursor and `selected`.
    pub fn handle_key(&mut self, key: Key, selected: &mut Selection) {
        if self.done {
            return;
        }
        match key {
            Key::Up => self.cursor = self.cursor.saturating_sub(1),
            Key::Down => self.cursor = (self.cursor + 1).min(self.max_cursor()),
            Key::Esc => {
                self.cancelled = true;
                self.done = true;
            }
            Key::Enter if !self.multi => {
                if self.cursor < self.len {
                    selected.insert(self.cursor);
                }
                self.done = true;
            }
            Key::Enter if self.on_confirm() => self.done = true,
            Key::Enter => {
                if !selected.remove(&self.cursor) {
                    selected.insert(self.cursor);
                }
            }
            _ => {}
        }
    }
}

pub struct SelectionWidget {
    surface: TitledSurface,
    options: Vec<String>,
    config: SelectionOptions,
    escape: EscapePolicy,
    state: SelectionState,
}

impl SelectionWidget {
    pub fn new<I, S>(
        term: &Terminal,
        title: &str,
        region: Region,
        options: I,
        config: SelectionOptions,
    ) -> WidgetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let surface = TitledSurface::new(term, title, region)?;
        let width = usize::from(region.width.saturating_sub(4));
        let options: Vec<String> = options
            .into_iter()
            .map(Into::into)
            .map(|o| if config.centered { center(&o, width) } else { o })
            .collect();
        let state = SelectionState::new(options.len(), config.multi);
        debug!(
            target: "widget.selection",
            options = options.len(),
            multi = config.multi,
            centered = config.centered,
            "selection_created"
        );
        Ok(Self {
            surface,
            options,
            config,
            escape: EscapePolicy::default(),
            state,
        })
    }

    pub fn with_escape_policy(mut self, policy: EscapePolicy) -> Self {
        self.escape = policy;
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Whether the last `run` ended through Escape.
    pub fn cancelled(&self) -> bool {
        self.state.cancelled()
    }

    pub fn surface(&self) -> &TitledSurface {
        &self.surface
    }

    /// Drive the selection until Enter completes it or Escape cancels it.
    /// Returns whether `selected` is non-empty afterwards.
    pub fn run(&mut self, selected: &mut Selection) -> WidgetResult<bool> {
        let term = self.surface.content().terminal().clone();
        term.set_echo(false);
        term.set_cursor_visible(false)?;
        self.surface.content_mut().set_keypad(true);

        self.state = SelectionState::new(self.options.len(), self.config.multi);
        let at_entry = selected.clone();
        while !self.state.is_done() {
            self.draw(selected)?;
            let key = self.surface.content().read_key()?;
            self.state.handle_key(key, selected);
            self.surface.refresh()?;
        }
        if self.state.cancelled() && self.escape == EscapePolicy::Discard {
            *selected = at_entry;
        }
        self.draw(selected)?;
        info!(
            target: "widget.selection",
            selected = selected.len(),
            cancelled = self.state.cancelled(),
            "selection_finished"
        );
        Ok(!selected.is_empty())
    }

    fn draw(&self, selected: &Selection) -> WidgetResult<()> {
        let content = self.surface.content();
        for (i, option) in self.options.iter().enumerate() {
            let Ok(row) = u16::try_from(i) else { break };
            let lit = selected.contains(&i) || i == self.state.cursor();
            let attr = if lit { Attr::REVERSE } else { Attr::NORMAL };
            content.write_text_with(row, 1, option, attr)?;
        }
        if self.config.multi {
            draw_confirm(content, self.surface.region().width, self.state.on_confirm())?;
        }
        content.refresh()?;
        Ok(())
    }
}
