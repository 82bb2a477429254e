use crate::audio::{AudioSettings, Volume};
use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        StatefulWidget, Widget,
    },
};
use std::fmt;

/// The audio-settings panel, openable from any mode.  The simulation halts
/// while it is up; it closes back to whatever mode it was opened over.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct AudioPanel {
    /// The currently-selected settings row
    selection: SettingKey,
}

/// What the panel decided after an input event
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum PanelOutcome {
    /// Dismiss the panel and return to the mode beneath it
    Close,
}

impl AudioPanel {
    /// The height that should be used for the `Rect` passed to
    /// `AudioPanel::render()`
    pub(super) const HEIGHT: u16 = 10;

    /// The width that should be used for the `Rect` passed to
    /// `AudioPanel::render()`
    pub(super) const WIDTH: u16 = 2 /* border */ + 2 /* padding */
        + Self::POINTER_WIDTH
        + SettingKey::DISPLAY_WIDTH
        + Self::LABEL_VALUE_GUTTER
        + SettingValue::DISPLAY_WIDTH;

    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;

    pub(super) fn new() -> AudioPanel {
        AudioPanel {
            selection: SettingKey::min(),
        }
    }

    /// Handle an input event against the live settings.  Returns `Some` when
    /// the panel is done.
    pub(super) fn handle_command(
        &mut self,
        cmd: Command,
        settings: &mut AudioSettings,
    ) -> Option<PanelOutcome> {
        match cmd {
            Command::Esc | Command::M | Command::Space => return Some(PanelOutcome::Close),
            Command::S => settings.sound_enabled = !settings.sound_enabled,
            Command::Up => {
                if let Some(key) = self.selection.prev() {
                    self.selection = key;
                }
            }
            Command::Down => {
                if let Some(key) = self.selection.next() {
                    self.selection = key;
                }
            }
            Command::Left => {
                let mut value = settings.get(self.selection);
                value.decrease();
                settings.set(self.selection, value);
            }
            Command::Right => {
                let mut value = settings.get(self.selection);
                value.increase();
                settings.set(self.selection, value);
            }
            Command::Enter => {
                let mut value = settings.get(self.selection);
                value.toggle();
                settings.set(self.selection, value);
            }
            // Shift+arrows always mean the SFX volume, whatever is selected.
            Command::SfxUp => settings.sfx_volume = settings.sfx_volume.louder(),
            Command::SfxDown => settings.sfx_volume = settings.sfx_volume.softer(),
            _ => (),
        }
        None
    }
}

/// Per-row access to [`AudioSettings`], mirroring the key/value scheme of the
/// panel itself
impl AudioSettings {
    fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Sound => self.sound_enabled.into(),
            SettingKey::MusicVolume => self.music_volume.into(),
            SettingKey::SfxVolume => self.sfx_volume.into(),
        }
    }

    fn set(&mut self, key: SettingKey, value: SettingValue) {
        match key {
            SettingKey::Sound => {
                self.sound_enabled = value
                    .try_into()
                    .expect("AudioSettings::set(Sound, value) called with non-Bool value");
            }
            SettingKey::MusicVolume => {
                self.music_volume = value
                    .try_into()
                    .expect("AudioSettings::set(MusicVolume, value) called with non-Volume value");
            }
            SettingKey::SfxVolume => {
                self.sfx_volume = value
                    .try_into()
                    .expect("AudioSettings::set(SfxVolume, value) called with non-Volume value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum SettingKey {
    Sound,
    MusicVolume,
    SfxVolume,
}

impl SettingKey {
    const DISPLAY_WIDTH: u16 = 10;

    fn as_str(self) -> &'static str {
        match self {
            SettingKey::Sound => "Sound",
            SettingKey::MusicVolume => "Music vol.",
            SettingKey::SfxVolume => "SFX vol.",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SettingValue {
    Bool(bool),
    Volume,
}

impl SettingValue {
    const DISPLAY_WIDTH: u16 = 9;
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SettingValue::Bool(false) => write!(f, "  [ ]    "),
            SettingValue::Bool(true) => write!(f, "  [✓]    "),
            SettingValue::Volume(vol) => {
                write!(
                    f,
                    "{left} {vol:^5} {right}",
                    left = if vol.can_decrease() { '◀' } else { '◁' },
                    right = if vol.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

impl Adjustable for Volume {
    fn increase(&mut self) {
        *self = self.louder();
    }

    fn decrease(&mut self) {
        *self = self.softer();
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        *self != Volume::FULL
    }

    fn can_decrease(&self) -> bool {
        *self != Volume::MUTED
    }
}

impl StatefulWidget for &AudioPanel {
    type State = AudioSettings;

    /*
     * ┌────── AUDIO SETTINGS ──────┐
     * │ » Sound       [✓]          │
     * │   Music vol.  ◀  0.3  ▶    │
     * │   SFX vol.    ◀  0.5  ▶    │
     * │                            │
     * │ s: toggle sound            │
     * │ Shift+↑/↓: SFX volume      │
     * │ Esc: back                  │
     * └────────────────────────────┘
     */
    fn render(self, area: Rect, buf: &mut Buffer, state: &mut AudioSettings) {
        let block = Block::bordered()
            .title(" AUDIO SETTINGS ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let mut lines = Vec::with_capacity(usize::from(AudioPanel::HEIGHT) - 2);
        for key in SettingKey::iter() {
            let selected = self.selection == key;
            let mut line = Line::from(format!(
                "{pointer} {key:key_width$}  {value}",
                pointer = if selected { '»' } else { ' ' },
                key_width = usize::from(SettingKey::DISPLAY_WIDTH),
                value = state.get(key),
            ));
            if selected {
                line = line.style(consts::MENU_SELECTION_STYLE);
            }
            lines.push(line);
        }
        lines.push(Line::default());
        lines.push(Line::from_iter([
            Span::styled("s", consts::KEY_STYLE),
            Span::raw(": toggle sound"),
        ]));
        lines.push(Line::from_iter([
            Span::styled("Shift+↑/↓", consts::KEY_STYLE),
            Span::raw(": SFX volume"),
        ]));
        lines.push(Line::from_iter([
            Span::styled("Esc", consts::KEY_STYLE),
            Span::raw(": back"),
        ]));
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
