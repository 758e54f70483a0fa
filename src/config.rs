use ratatui::style::Color;
use ratatui::symbols::border;

/// Logical grid dimensions passed through the game as a named type.
///
/// The board is always square, but width and height stay separate so every
/// bounds check reads the same way at its call site.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a square grid with `side` cells on each axis.
    #[must_use]
    pub fn square(side: u16) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// Default side length of the square board.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest accepted board side.
pub const MIN_GRID_SIZE: u16 = 4;

/// Largest accepted board side.
pub const MAX_GRID_SIZE: u16 = 64;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 30;

/// Maximum tick interval in milliseconds.
pub const MAX_TICK_INTERVAL_MS: u64 = 2_000;

/// Score granted for each food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Terminal columns used to draw one board cell.
pub const CELL_WIDTH: u16 = 2;

/// Colors applied to all visual elements.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub border: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub status_running: Color,
    pub status_idle: Color,
    pub status_over: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Orange snake on a dark board with green food.
pub const PALETTE_RETRO: Palette = Palette {
    snake_head: Color::Rgb(249, 115, 22),
    snake_body: Color::Rgb(234, 88, 12),
    snake_tail: Color::Rgb(154, 52, 18),
    food: Color::Rgb(34, 197, 94),
    border: Color::DarkGray,
    hud_label: Color::Gray,
    hud_value: Color::White,
    status_running: Color::Green,
    status_idle: Color::Yellow,
    status_over: Color::Red,
    menu_title: Color::Rgb(249, 115, 22),
    menu_footer: Color::DarkGray,
};

/// Rounded border used around the play area.
pub const BORDER_BOARD: border::Set = border::ROUNDED;

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲ ";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼ ";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀ ";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶ ";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_FOOD: &str = "● ";

/// Separator between HUD fields.
pub const GLYPH_HUD_SEPARATOR: &str = "│";
