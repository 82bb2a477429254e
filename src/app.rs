use crate::audio::Mixer;
use crate::config::Config;
use crate::game::Game;
use crate::scores::ScoreBoard;
use ratatui::{backend::Backend, Terminal};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
    /// Warnings harvested from a finished game, reported by `main()` after
    /// the terminal is restored
    warnings: Vec<String>,
}

impl App {
    pub(crate) fn new(config: &Config, scores_override: Option<PathBuf>) -> App {
        let scores_path = scores_override.or_else(|| config.scores_file().map(Cow::into_owned));
        let scores = ScoreBoard::load(scores_path);
        let mixer = Mixer::new(config.audio);
        App {
            screen: Screen::Game(Game::new(scores, mixer)),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn run<B: Backend>(&mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        match self.screen {
            Screen::Game(ref mut game) => {
                if let Some(screen) = game.process_input()? {
                    self.warnings.extend(game.take_warnings());
                    self.screen = screen;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }

    /// Drain the deferred warnings, wherever they currently live
    pub(crate) fn take_warnings(&mut self) -> Vec<String> {
        let mut warnings = std::mem::take(&mut self.warnings);
        if let Screen::Game(ref mut game) = self.screen {
            warnings.extend(game.take_warnings());
        }
        warnings
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Game(Game),
    Quit,
}
