use crate::consts;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;

/// The name editor shown when a finished run qualifies for the leaderboard.
///
/// This is the one place that consumes raw key events instead of
/// [`Command`][crate::command::Command]s: every printable character is input
/// here, including the letters the other modes treat as hotkeys.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct NameEntry {
    score: u32,
    buffer: String,
}

/// What the player decided to do with the editor
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum EntryOutcome {
    /// Submit the buffer (possibly blank) as the name
    Submit(String),
    /// Give up on typing a name and be recorded as anonymous
    Cancel,
}

impl NameEntry {
    /// The height that should be used for the `Rect` passed to
    /// `NameEntry::render()`
    pub(super) const HEIGHT: u16 = 8;

    /// The width that should be used for the `Rect` passed to
    /// `NameEntry::render()`
    pub(super) const WIDTH: u16 = 36;

    pub(super) fn new(score: u32) -> NameEntry {
        NameEntry {
            score,
            buffer: String::new(),
        }
    }

    /// Handle an input event.  Returns `Some` when the editor is done.
    pub(super) fn handle_key(&mut self, ev: KeyEvent) -> Option<EntryOutcome> {
        let typing_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match ev.code {
            KeyCode::Enter => return Some(EntryOutcome::Submit(self.buffer.clone())),
            KeyCode::Esc => return Some(EntryOutcome::Cancel),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if typing_modifiers.contains(ev.modifiers) => self.push(c),
            _ => (),
        }
        None
    }

    /// Append a character, ignoring unprintables and anything past the
    /// [`NAME_LIMIT`][consts::NAME_LIMIT]-grapheme cap
    fn push(&mut self, c: char) {
        if c.general_category_group() == GeneralCategoryGroup::Other {
            return;
        }
        if self.len() < consts::NAME_LIMIT {
            self.buffer.push(c);
        }
    }

    /// Remove the last grapheme, if any
    fn backspace(&mut self) {
        if let Some((idx, _)) = self.buffer.grapheme_indices(true).next_back() {
            self.buffer.truncate(idx);
        }
    }

    fn len(&self) -> usize {
        self.buffer.graphemes(true).count()
    }
}

impl Widget for &NameEntry {
    /*
     * ┌───────── NEW HIGH SCORE! ────────┐
     * │ Score: 120                       │
     * │                                  │
     * │ Name: Alice_                     │
     * │                          5/12    │
     * │                                  │
     * │ Enter: submit — Esc: "Anonymous" │
     * └──────────────────────────────────┘
     */
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" NEW HIGH SCORE! ")
            .title_style(consts::BANNER_STYLE)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let cursor = if self.len() < consts::NAME_LIMIT {
            "_"
        } else {
            ""
        };
        let lines = [
            Line::from(format!("Score: {}", self.score)),
            Line::default(),
            Line::from(format!("Name: {}{cursor}", self.buffer)),
            Line::from(Span::styled(
                format!("{}/{}    ", self.len(), consts::NAME_LIMIT),
                consts::FINE_PRINT_STYLE,
            ))
            .right_aligned(),
            Line::default(),
            Line::from_iter([
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(": submit — "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(": \"Anonymous\""),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
