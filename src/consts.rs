//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Dimensions of the playfield, in cells
pub(crate) const GRID_SIZE: Size = Size {
    width: 40,
    height: 18,
};

/// Snake movement rate at the start of a run, in cells per second
pub(crate) const INITIAL_TICK_RATE: u32 = 5;

/// Snake movement rate cap, in cells per second
pub(crate) const MAX_TICK_RATE: u32 = 20;

/// Points awarded for each piece of food eaten
pub(crate) const POINTS_PER_FOOD: u32 = 10;

/// Points between speed-tier increases
pub(crate) const POINTS_PER_TIER: u32 = 30;

/// Maximum number of entries kept on the leaderboard
pub(crate) const SCOREBOARD_CAPACITY: usize = 5;

/// Maximum length of a leaderboard name, in graphemes
pub(crate) const NAME_LIMIT: usize = 12;

/// Name recorded when the player submits a blank one
pub(crate) const FALLBACK_NAME: &str = "Anonymous";

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected settings-panel row
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the "NEW HIGH SCORE!" banner
pub(crate) const BANNER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Style for leaderboard entry dates and other fine print
pub(crate) const FINE_PRINT_STYLE: Style = Style::new().fg(Color::DarkGray);
