mod audio_panel;
mod direction;
mod food;
mod name_entry;
mod snake;
use self::audio_panel::AudioPanel;
use self::direction::Direction;
use self::name_entry::{EntryOutcome, NameEntry};
use self::snake::Snake;
use crate::app::Screen;
use crate::audio::{AudioBackend, Cue, Mixer, Silent};
use crate::command::Command;
use crate::consts;
use crate::scores::ScoreBoard;
use crate::util::{center_rect, error_chain, get_display_area};
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        StatefulWidget, Widget,
    },
    Frame,
};
use std::mem;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// One full game session: the snake run currently on screen plus the
/// leaderboard and audio settings that survive across restarts.
///
/// All mutation happens synchronously inside [`Game::process_input()`]; the
/// simulation advances only while the mode is [`Mode::Playing`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng, B = Silent> {
    rng: R,
    snake: Snake,
    food: Position,
    score: u32,
    /// Current speed tier; monotonically non-decreasing within a run
    tier: u32,
    mode: Mode,
    /// Set once the player's name has been recorded for this run
    new_high_score: bool,
    scores: ScoreBoard,
    mixer: Mixer<B>,
    /// Persistence failures, reported on stderr after the terminal is restored
    warnings: Vec<String>,
    next_tick: Option<Instant>,
}

impl Game {
    pub(crate) fn new(scores: ScoreBoard, mixer: Mixer) -> Game {
        Game::with_rng(scores, mixer, rand::rng())
    }
}

impl<R: Rng, B: AudioBackend> Game<R, B> {
    pub(crate) fn with_rng(scores: ScoreBoard, mixer: Mixer<B>, mut rng: R) -> Game<R, B> {
        let snake = Snake::new(grid_center());
        let food = food::spawn(&mut rng, consts::GRID_SIZE, snake.body());
        Game {
            rng,
            snake,
            food,
            score: 0,
            tier: 1,
            mode: Mode::Playing,
            new_high_score: false,
            scores,
            mixer,
            warnings: Vec::new(),
            next_tick: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            if self.next_tick.is_none() {
                self.next_tick = Some(Instant::now() + self.tick_period());
            }
            let when = self.next_tick.expect("next_tick should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Advance the simulation by one tick
    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        match self.snake.advance(consts::GRID_SIZE) {
            Err(_) => self.die(),
            Ok(()) => {
                if self.snake.head() == self.food {
                    self.eat();
                }
            }
        }
    }

    fn eat(&mut self) {
        self.snake.grow();
        self.score += consts::POINTS_PER_FOOD;
        self.food = food::spawn(&mut self.rng, consts::GRID_SIZE, self.snake.body());
        self.mixer.play(Cue::Eat);
        let tier = tier_for(self.score);
        if tier > self.tier {
            self.tier = tier;
            self.mixer.play(Cue::LevelUp);
        }
    }

    fn die(&mut self) {
        self.mixer.play(Cue::GameOver);
        self.new_high_score = false;
        self.mode = if self.scores.qualifies(self.score) {
            self.mixer.play(Cue::HighScore);
            Mode::Over(OverView::Entry(NameEntry::new(self.score)))
        } else {
            Mode::Over(OverView::Summary)
        };
    }

    /// Reset every per-run field for a fresh game.  The leaderboard, the
    /// audio settings, and any queued warnings carry over.
    fn reset(&mut self) {
        self.snake = Snake::new(grid_center());
        self.food = food::spawn(&mut self.rng, consts::GRID_SIZE, self.snake.body());
        self.score = 0;
        self.tier = 1;
        self.new_high_score = false;
        self.mode = Mode::Playing;
        self.next_tick = None;
    }

    fn record_score(&mut self, name: &str) {
        if self.scores.record(self.score, name) {
            self.new_high_score = true;
            self.mixer.play(Cue::HighScore);
            if let Err(e) = self.scores.save() {
                self.warnings.push(error_chain(&e));
            }
        }
        self.mode = Mode::Over(OverView::Summary);
    }

    fn open_audio_panel(&mut self) {
        let from = Box::new(mem::replace(&mut self.mode, Mode::Paused));
        self.mode = Mode::Audio {
            panel: AudioPanel::new(),
            from,
        };
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.mode {
            Mode::Playing => {
                if event == Event::FocusLost {
                    self.mode = Mode::Paused;
                    return None;
                }
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Esc | Command::Q => return Some(Screen::Quit),
                    Command::Up => self.snake.turn(Direction::North),
                    Command::Down => self.snake.turn(Direction::South),
                    Command::Left => self.snake.turn(Direction::West),
                    Command::Right => self.snake.turn(Direction::East),
                    Command::Space => self.mode = Mode::Paused,
                    Command::M => self.open_audio_panel(),
                    _ => (),
                }
            }
            Mode::Paused => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::Quit | Command::Esc | Command::Q => return Some(Screen::Quit),
                Command::Space => self.mode = Mode::Playing,
                Command::M => self.open_audio_panel(),
                _ => (),
            },
            Mode::Over(OverView::Entry(ref mut entry)) => {
                let ev = event.as_key_press_event()?;
                if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
                    return Some(Screen::Quit);
                }
                if let Some(outcome) = entry.handle_key(ev) {
                    let name = match outcome {
                        EntryOutcome::Submit(name) => name,
                        EntryOutcome::Cancel => String::new(),
                    };
                    self.record_score(&name);
                }
            }
            Mode::Over(OverView::Summary) => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Esc | Command::Q => return Some(Screen::Quit),
                    Command::Space => self.reset(),
                    Command::H => self.mode = Mode::Over(OverView::Scores),
                    Command::M => self.open_audio_panel(),
                    _ => (),
                }
            }
            Mode::Over(OverView::Scores) => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Quit | Command::Esc | Command::Q => return Some(Screen::Quit),
                    Command::Space | Command::H => self.mode = Mode::Over(OverView::Summary),
                    Command::M => self.open_audio_panel(),
                    _ => (),
                }
            }
            Mode::Audio {
                ref mut panel,
                ref mut from,
            } => {
                let cmd = Command::from_key_event(event.as_key_press_event()?)?;
                if matches!(cmd, Command::Quit | Command::Q) {
                    return Some(Screen::Quit);
                }
                let outcome = self.mixer.adjust(|s| panel.handle_command(cmd, s));
                if outcome.is_some() {
                    let prev = mem::replace(from, Box::new(Mode::Playing));
                    self.mode = *prev;
                }
            }
        }
        None
    }
}

impl<R, B> Game<R, B> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Persistence failures queued for stderr once the terminal is restored
    pub(crate) fn take_warnings(&mut self) -> Vec<String> {
        mem::take(&mut self.warnings)
    }

    fn running(&self) -> bool {
        self.mode == Mode::Playing
    }

    /// Effective movement rate for the current tier, in cells per second
    fn tick_rate(&self) -> u32 {
        (consts::INITIAL_TICK_RATE + self.tier - 1).min(consts::MAX_TICK_RATE)
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.tick_rate()))
    }

    /// Whether the run beneath the current mode has ended
    fn run_over(&self) -> bool {
        match self.mode {
            Mode::Over(_) => true,
            Mode::Audio { ref from, .. } => matches!(**from, Mode::Over(_)),
            Mode::Playing | Mode::Paused => false,
        }
    }

    #[cfg(test)]
    fn mixer(&self) -> &Mixer<B> {
        &self.mixer
    }
}

fn grid_center() -> Position {
    Position::new(consts::GRID_SIZE.width / 2, consts::GRID_SIZE.height / 2)
}

fn tier_for(score: u32) -> u32 {
    1 + score / consts::POINTS_PER_TIER
}

impl<R, B> Widget for &Game<R, B> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let sound = if self.mixer.settings().sound_enabled {
            "on"
        } else {
            "off"
        };
        Line::styled(
            format!(
                " Score: {}   Speed: {}/s (Tier {})   Sound: {sound}",
                self.score,
                self.tick_rate(),
                self.tier
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_size = Size {
            width: consts::GRID_SIZE.width.saturating_add(2),
            height: consts::GRID_SIZE.height.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);
        let level_area = block_area.inner(Margin::new(1, 1));
        let mut level = Canvas {
            area: level_area,
            buf,
        };
        for &p in self.snake.body() {
            level.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        level.draw_cell(self.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.run_over() {
            level.draw_cell(
                self.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            level.draw_cell(self.snake.head(), self.snake.head_symbol(), consts::SNAKE_STYLE);
        }

        match self.mode {
            Mode::Playing => {
                if self.tick_rate() < consts::MAX_TICK_RATE {
                    let needed = consts::POINTS_PER_TIER - self.score % consts::POINTS_PER_TIER;
                    Span::from(format!(" Next speed-up in {needed} points")).render(msg1_area, buf);
                } else {
                    Span::from(" Top speed!").render(msg1_area, buf);
                }
                Line::from_iter([
                    Span::raw(" Move ("),
                    Span::styled("↑↓←→", consts::KEY_STYLE),
                    Span::raw(") — Pause ("),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(") — Audio ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("Esc", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            Mode::Paused => {
                Span::from(" — PAUSED —").render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Resume ("),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(") — Audio ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("Esc", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            Mode::Over(OverView::Entry(ref entry)) => {
                let popup_area = center_rect(
                    display,
                    Size {
                        width: NameEntry::WIDTH,
                        height: NameEntry::HEIGHT,
                    },
                );
                entry.render(popup_area, buf);
            }
            Mode::Over(OverView::Summary) => self.render_summary(display, buf),
            Mode::Over(OverView::Scores) => self.render_scores(display, buf),
            Mode::Audio { ref panel, .. } => {
                let popup_area = center_rect(
                    display,
                    Size {
                        width: AudioPanel::WIDTH,
                        height: AudioPanel::HEIGHT,
                    },
                );
                let mut settings = *self.mixer.settings();
                StatefulWidget::render(panel, popup_area, buf, &mut settings);
            }
        }
    }
}

impl<R, B> Game<R, B> {
    /*
     * ┌───────────── GAME OVER ─────────────┐
     * │           NEW HIGH SCORE!           │
     * │                                     │
     * │ Final score: 120                    │
     * │ Best: 150 by Carol                  │
     * │                                     │
     * │ Space: play again — h: high scores  │
     * │ m: audio — Esc: quit                │
     * └─────────────────────────────────────┘
     */
    fn render_summary(&self, display: Rect, buf: &mut Buffer) {
        const SIZE: Size = Size {
            width: 39,
            height: 9,
        };
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let popup_area = center_rect(display, SIZE);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        let banner = if self.new_high_score {
            Line::styled("NEW HIGH SCORE!", consts::BANNER_STYLE).centered()
        } else {
            Line::default()
        };
        let best = match self.scores.best() {
            Some(entry) => Line::from(format!("Best: {} by {}", entry.score, entry.name)),
            None => Line::default(),
        };
        let lines = [
            banner,
            Line::default(),
            Line::from(format!("Final score: {}", self.score)),
            best,
            Line::default(),
            Line::from_iter([
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(": play again — "),
                Span::styled("h", consts::KEY_STYLE),
                Span::raw(": high scores"),
            ]),
            Line::from_iter([
                Span::styled("m", consts::KEY_STYLE),
                Span::raw(": audio — "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(": quit"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }

    fn render_scores(&self, display: Rect, buf: &mut Buffer) {
        const SIZE: Size = Size {
            width: 46,
            height: 10,
        };
        let block = Block::bordered()
            .title(" HIGH SCORES ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let popup_area = center_rect(display, SIZE);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        let mut lines = Vec::with_capacity(usize::from(SIZE.height) - 2);
        if self.scores.entries().is_empty() {
            lines.push(Line::from("No high scores yet!"));
            lines.push(Line::from("Finish a run to set the first one."));
        } else {
            for (i, entry) in self.scores.entries().iter().enumerate() {
                // Pad names by display width so the dates line up even with
                // fullwidth characters.
                let pad = consts::NAME_LIMIT.saturating_sub(entry.name.width());
                lines.push(Line::from_iter([
                    Span::raw(format!(
                        "{rank}. {score:>6}  {name}{:pad$}  ",
                        "",
                        rank = i + 1,
                        score = entry.score,
                        name = entry.name,
                    )),
                    Span::styled(entry.date.clone(), consts::FINE_PRINT_STYLE),
                ]));
            }
        }
        while lines.len() < usize::from(SIZE.height) - 3 {
            lines.push(Line::default());
        }
        lines.push(Line::from_iter([
            Span::styled("Space", consts::KEY_STYLE),
            Span::raw(": back — "),
            Span::styled("Esc", consts::KEY_STYLE),
            Span::raw(": quit"),
        ]));
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// The mode state machine.  Exactly one mode is active at a time; the audio
/// panel is modal and remembers the mode it was opened over.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Mode {
    Playing,
    Paused,
    Over(OverView),
    Audio { panel: AudioPanel, from: Box<Mode> },
}

/// Which of the post-run views is on screen
#[derive(Clone, Debug, Eq, PartialEq)]
enum OverView {
    /// Qualifying score, name not yet recorded
    Entry(NameEntry),
    Summary,
    Scores,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioSettings, Recorder, Volume};
    use crossterm::event::KeyEvent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn test_game() -> Game<ChaCha12Rng, Recorder> {
        Game::with_rng(
            ScoreBoard::load(None),
            Mixer::with_backend(Recorder::default(), AudioSettings::default()),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn full_board() -> ScoreBoard {
        let mut board = ScoreBoard::load(None);
        for score in [50, 40, 30, 20, 10] {
            assert!(board.record(score, "veteran"), "seed score should qualify");
        }
        board
    }

    fn key(game: &mut Game<ChaCha12Rng, Recorder>, code: KeyCode) -> Option<Screen> {
        game.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn new_game_state() {
        let game = test_game();
        assert_eq!(game.mode, Mode::Playing);
        assert_eq!(game.score, 0);
        assert_eq!(game.tier, 1);
        assert_eq!(game.snake.head(), Position::new(20, 9));
        assert_eq!(game.snake.body().len(), 1);
        assert_ne!(game.food, game.snake.head());
        assert_eq!(game.tick_rate(), 5);
    }

    #[test]
    fn eating_scores_and_respawns() {
        let mut game = test_game();
        let head = game.snake.head();
        game.food = Position::new(head.x + 1, head.y);
        game.advance();
        assert_eq!(game.score, 10);
        assert_ne!(game.food, game.snake.head(), "food should respawn elsewhere");
        assert_eq!(game.mixer().backend_for_tests().cues, [Cue::Eat]);
        // Growth lands on the following tick.
        assert_eq!(game.snake.body().len(), 1);
        game.advance();
        assert_eq!(game.snake.body().len(), 2);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(10, 1)]
    #[case(29, 1)]
    #[case(30, 2)]
    #[case(59, 2)]
    #[case(60, 3)]
    #[case(300, 11)]
    fn test_tier_for(#[case] score: u32, #[case] tier: u32) {
        assert_eq!(tier_for(score), tier);
    }

    #[test]
    fn three_meals_raise_the_tier_once() {
        let mut game = test_game();
        for _ in 0..3 {
            let head = game.snake.head();
            game.food = Position::new(head.x + 1, head.y);
            game.advance();
        }
        assert_eq!(game.score, 30);
        assert_eq!(game.tier, 2);
        assert_eq!(game.tick_rate(), 6);
        let level_ups = game
            .mixer()
            .backend_for_tests()
            .cues
            .iter()
            .filter(|&&c| c == Cue::LevelUp)
            .count();
        assert_eq!(level_ups, 1, "exactly one level-up cue at the 30-point boundary");
    }

    #[test]
    fn tick_rate_is_capped() {
        let mut game = test_game();
        game.tier = 40;
        assert_eq!(game.tick_rate(), consts::MAX_TICK_RATE);
        assert_eq!(game.tick_period(), Duration::from_millis(50));
    }

    #[test]
    fn qualifying_death_asks_for_a_name() {
        let mut game = test_game();
        game.score = 10;
        game.snake = Snake::new(Position::new(0, 0));
        game.snake.facing = Direction::North;
        game.advance();
        assert!(matches!(game.mode, Mode::Over(OverView::Entry(_))));
        assert_eq!(
            game.mixer().backend_for_tests().cues,
            [Cue::GameOver, Cue::HighScore]
        );
    }

    #[test]
    fn non_qualifying_death_goes_straight_to_the_summary() {
        let mut game = Game::with_rng(
            full_board(),
            Mixer::with_backend(Recorder::default(), AudioSettings::default()),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        game.score = 10; // ties the minimum, which does not qualify
        game.snake = Snake::new(Position::new(0, 0));
        game.snake.facing = Direction::West;
        game.advance();
        assert_eq!(game.mode, Mode::Over(OverView::Summary));
        assert!(!game.new_high_score);
        assert_eq!(game.mixer().backend_for_tests().cues, [Cue::GameOver]);
    }

    #[test]
    fn submitting_a_name_records_the_score() {
        let mut game = test_game();
        game.score = 70;
        game.die();
        for c in "Ada".chars() {
            assert!(key(&mut game, KeyCode::Char(c)).is_none());
        }
        assert!(key(&mut game, KeyCode::Enter).is_none());
        assert_eq!(game.mode, Mode::Over(OverView::Summary));
        assert!(game.new_high_score);
        let entry = game.scores.best().expect("score should be on the board");
        assert_eq!((entry.score, entry.name.as_str()), (70, "Ada"));
    }

    #[test]
    fn cancelling_name_entry_records_anonymous() {
        let mut game = test_game();
        game.score = 70;
        game.die();
        assert!(key(&mut game, KeyCode::Esc).is_none());
        assert_eq!(game.mode, Mode::Over(OverView::Summary));
        let entry = game.scores.best().expect("score should be on the board");
        assert_eq!(entry.name, "Anonymous");
    }

    #[test]
    fn pause_toggles_and_freezes_the_simulation() {
        let mut game = test_game();
        assert!(key(&mut game, KeyCode::Char(' ')).is_none());
        assert_eq!(game.mode, Mode::Paused);
        let body = game.snake.body().clone();
        game.advance();
        assert_eq!(game.snake.body(), &body, "paused snake should not move");
        assert!(key(&mut game, KeyCode::Char(' ')).is_none());
        assert_eq!(game.mode, Mode::Playing);
    }

    #[test]
    fn restart_resets_the_run_but_not_the_board() {
        let mut game = test_game();
        game.score = 70;
        game.die();
        assert!(key(&mut game, KeyCode::Enter).is_none());
        assert!(key(&mut game, KeyCode::Char(' ')).is_none());
        assert_eq!(game.mode, Mode::Playing);
        assert_eq!(game.score, 0);
        assert_eq!(game.tier, 1);
        assert!(!game.new_high_score);
        assert_eq!(game.snake.head(), Position::new(20, 9));
        assert_eq!(
            game.scores.best().map(|e| e.score),
            Some(70),
            "the leaderboard should survive a restart"
        );
    }

    #[test]
    fn scores_browser_round_trip() {
        let mut game = test_game();
        game.score = 70;
        game.die();
        assert!(key(&mut game, KeyCode::Enter).is_none());
        assert!(key(&mut game, KeyCode::Char('h')).is_none());
        assert_eq!(game.mode, Mode::Over(OverView::Scores));
        assert!(key(&mut game, KeyCode::Char(' ')).is_none());
        assert_eq!(game.mode, Mode::Over(OverView::Summary));
    }

    #[test]
    fn audio_panel_opens_over_any_mode_and_returns() {
        let mut game = test_game();
        assert!(key(&mut game, KeyCode::Char('m')).is_none());
        assert!(matches!(game.mode, Mode::Audio { .. }));
        let body = game.snake.body().clone();
        game.advance();
        assert_eq!(game.snake.body(), &body, "panel should halt the simulation");
        assert!(key(&mut game, KeyCode::Esc).is_none());
        assert_eq!(game.mode, Mode::Playing);

        assert!(key(&mut game, KeyCode::Char(' ')).is_none());
        assert!(key(&mut game, KeyCode::Char('m')).is_none());
        assert!(key(&mut game, KeyCode::Esc).is_none());
        assert_eq!(game.mode, Mode::Paused, "panel should return to Paused");
    }

    #[test]
    fn panel_adjustments_reach_the_mixer() {
        let mut game = test_game();
        assert!(key(&mut game, KeyCode::Char('m')).is_none());
        assert!(key(&mut game, KeyCode::Down).is_none());
        assert!(key(&mut game, KeyCode::Right).is_none());
        assert_eq!(
            game.mixer().settings().music_volume,
            Volume::from_f32(0.4)
        );
        assert!(key(&mut game, KeyCode::Char('s')).is_none());
        assert!(!game.mixer().settings().sound_enabled);
        game.advance(); // no-op in panel mode, but must not cue either way
        assert!(key(&mut game, KeyCode::Esc).is_none());
        let head = game.snake.head();
        game.food = Position::new(head.x + 1, head.y);
        game.advance();
        assert!(
            game.mixer().backend_for_tests().cues.is_empty(),
            "cues should be muted after disabling sound"
        );
    }

    #[test]
    fn quit_commands_end_the_session() {
        let mut game = test_game();
        assert!(matches!(
            key(&mut game, KeyCode::Char('q')),
            Some(Screen::Quit)
        ));
        let mut game = test_game();
        game.score = 70;
        game.die();
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(
            matches!(game.handle_event(Event::Key(ev)), Some(Screen::Quit)),
            "Ctrl-C should quit even during name entry"
        );
    }

    #[test]
    fn focus_loss_pauses() {
        let mut game = test_game();
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert_eq!(game.mode, Mode::Paused);
    }

    mod rendering {
        use super::*;

        fn render(game: &Game<ChaCha12Rng, Recorder>) -> Buffer {
            let area = Rect::new(0, 0, 80, 24);
            let mut buffer = Buffer::empty(area);
            game.render(area, &mut buffer);
            buffer
        }

        fn row_text(buf: &Buffer, y: u16) -> String {
            (0..buf.area.width)
                .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
                .collect()
        }

        fn screen_text(buf: &Buffer) -> String {
            (0..buf.area.height)
                .map(|y| row_text(buf, y))
                .collect::<Vec<_>>()
                .join("\n")
        }

        #[test]
        fn playing_screen_probes() {
            let game = test_game();
            let buf = render(&game);
            assert!(row_text(&buf, 0).starts_with(" Score: 0   Speed: 5/s (Tier 1)   Sound: on"));
            let head = buf.cell((40, 11)).expect("head cell should exist");
            assert_eq!(head.symbol(), "<", "eastbound head glyph at grid center");
            assert!(row_text(&buf, 22).contains("Next speed-up in 30 points"));
        }

        #[test]
        fn paused_screen_probes() {
            let mut game = test_game();
            assert!(key(&mut game, KeyCode::Char(' ')).is_none());
            let buf = render(&game);
            assert!(row_text(&buf, 22).contains("PAUSED"));
        }

        #[test]
        fn summary_screen_probes() {
            let mut game = test_game();
            game.score = 70;
            game.die();
            assert!(key(&mut game, KeyCode::Enter).is_none());
            let text = screen_text(&render(&game));
            assert!(text.contains("GAME OVER"));
            assert!(text.contains("NEW HIGH SCORE!"));
            assert!(text.contains("Final score: 70"));
            assert!(text.contains("Best: 70 by Anonymous"));
        }

        #[test]
        fn scores_screen_probes() {
            let mut game = test_game();
            game.score = 70;
            game.die();
            assert!(key(&mut game, KeyCode::Enter).is_none());
            assert!(key(&mut game, KeyCode::Char('h')).is_none());
            let text = screen_text(&render(&game));
            assert!(text.contains("HIGH SCORES"));
            assert!(text.contains("1."));
            assert!(text.contains("Anonymous"));
        }

        #[test]
        fn audio_panel_probes() {
            let mut game = test_game();
            assert!(key(&mut game, KeyCode::Char('m')).is_none());
            let text = screen_text(&render(&game));
            assert!(text.contains("AUDIO SETTINGS"));
            assert!(text.contains("Music vol."));
            assert!(text.contains("0.3"));
        }
    }
}
