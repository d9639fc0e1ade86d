/// Presentation layer: diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` (array of Cell)
///   2. Compare each cell with `back` (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once
///   5. Swap front/back
///
/// One maze tile is two terminal columns wide. The simulation is read
/// by shared reference only; nothing here mutates game state.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::config::UiConfig;
use crate::domain::entity::Rgb;
use crate::domain::motion;
use crate::domain::tile::Tile;
use crate::sim::session::{Mode, Session};

/// Terminal columns per maze tile.
const TILE_COLS: u16 = 2;

/// Axis-aligned cell rectangle; used for the Start button hit test.
#[derive(Clone, Copy, Debug)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell { ch: ' ', fg: Color::Reset };

pub struct Renderer {
    out: BufWriter<Stdout>,
    front: Vec<Cell>,
    back: Vec<Cell>,
    cols: u16,
    rows: u16,
    needs_full: bool,
    ui: UiConfig,
}

impl Renderer {
    pub fn new(ui: UiConfig) -> Self {
        Renderer {
            out: BufWriter::new(io::stdout()),
            front: vec![],
            back: vec![],
            cols: 0,
            rows: 0,
            needs_full: true,
            ui,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide,
            Clear(ClearType::All)
        )?;
        // Release events make held-key tracking exact; terminals that
        // don't support this are handled by the input timeout fallback.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.out, DisableMouseCapture, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// The clickable Start region in terminal cells. Mirrors the panel
    /// layout: scoreboard (6 rows), instructions (2 rows), padding.
    pub fn start_button_rect(&self, session: &Session) -> Rect {
        let panel_left = session.map.width() as u16 * TILE_COLS;
        let pad = self.ui.padding;
        let row = self.ui.row_height;
        Rect {
            x: panel_left + pad,
            y: pad + row * 6 + row * 2 + pad,
            w: self.ui.panel_cols.saturating_sub(pad * 2),
            h: row * 2,
        }
    }

    pub fn render(&mut self, session: &Session, hover: bool) -> io::Result<()> {
        let map_cols = session.map.width() as u16 * TILE_COLS;
        let map_rows = session.map.height() as u16;
        let needed_cols = map_cols + self.ui.panel_cols;
        let needed_rows = map_rows.max(self.start_button_rect(session).y + self.ui.row_height * 2 + 4);

        let (term_cols, term_rows) = terminal::size()?;
        if term_cols < needed_cols || term_rows < needed_rows {
            queue!(
                self.out,
                Clear(ClearType::All),
                MoveTo(0, 0),
                Print(format!(
                    "Terminal too small: need {}x{}, have {}x{}",
                    needed_cols, needed_rows, term_cols, term_rows
                ))
            )?;
            self.out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        if self.cols != needed_cols || self.rows != needed_rows {
            self.cols = needed_cols;
            self.rows = needed_rows;
            self.front = vec![BLANK; (needed_cols as usize) * (needed_rows as usize)];
            self.back = vec![BLANK; (needed_cols as usize) * (needed_rows as usize)];
            self.needs_full = true;
        }

        self.front.fill(BLANK);
        self.compose_map(session);
        self.compose_entities(session);
        self.compose_panel(session, hover);

        if self.needs_full {
            queue!(self.out, Clear(ClearType::All))?;
        }

        // Diff + emit
        let mut last_fg = Color::Reset;
        queue!(self.out, SetForegroundColor(last_fg))?;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = row as usize * self.cols as usize + col as usize;
                let cell = self.front[idx];
                if !self.needs_full && cell == self.back[idx] {
                    continue;
                }
                queue!(self.out, MoveTo(col, row))?;
                if cell.fg != last_fg {
                    queue!(self.out, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;

        std::mem::swap(&mut self.front, &mut self.back);
        self.needs_full = false;
        Ok(())
    }

    // ── Frame composition ──

    fn put(&mut self, col: u16, row: u16, ch: char, fg: Color) {
        if col < self.cols && row < self.rows {
            self.front[row as usize * self.cols as usize + col as usize] = Cell { ch, fg };
        }
    }

    fn put_str(&mut self, col: u16, row: u16, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as u16, row, ch, fg);
        }
    }

    fn compose_map(&mut self, session: &Session) {
        for y in 0..session.map.height() {
            for x in 0..session.map.width() {
                let (col, row) = (x as u16 * TILE_COLS, y as u16);
                match session.map.tile_at(x, y) {
                    Tile::Wall => {
                        let c = Color::Rgb { r: 60, g: 80, b: 200 };
                        self.put(col, row, '█', c);
                        self.put(col + 1, row, '█', c);
                    }
                    Tile::Pellet => self.put(col, row, '·', Color::White),
                    Tile::Empty => {}
                    Tile::Other(ch) => self.put(col, row, ch, Color::DarkGrey),
                }
            }
        }
    }

    fn compose_entities(&mut self, session: &Session) {
        for ghost in &session.ghosts {
            let (tx, ty) = motion::tile_of(ghost.position, session.tile_size);
            self.put(tx as u16 * TILE_COLS, ty as u16, '∩', to_color(ghost.color));
        }

        // Players last so they stay visible on a shared tile
        for (player, ch) in [(&session.player_a, 'A'), (&session.player_b, 'B')] {
            let (tx, ty) = motion::tile_of(player.position, session.tile_size);
            self.put(tx as u16 * TILE_COLS, ty as u16, ch, to_color(player.color));
        }
    }

    fn compose_panel(&mut self, session: &Session, hover: bool) {
        let left = session.map.width() as u16 * TILE_COLS + self.ui.padding;
        let row_h = self.ui.row_height.max(1);
        let mut row = self.ui.padding;

        // Scoreboard: 6 rows
        self.put_str(left, row, "PACMEN", Color::White);
        row += row_h;
        let a = &session.player_a;
        self.put_str(
            left,
            row,
            &format!("P1  score {:>5}  lives {}", a.score, a.lives),
            to_color(a.color),
        );
        row += row_h;
        let b = &session.player_b;
        self.put_str(
            left,
            row,
            &format!("P2  score {:>5}  lives {}", b.score, b.lives),
            to_color(b.color),
        );
        row += row_h;
        self.put_str(
            left,
            row,
            &format!("Pellets left: {}", session.map.remaining_pellets()),
            Color::Grey,
        );
        row += row_h * 3;

        // Instructions: 2 rows
        self.put_str(left, row, "P1: WASD   P2: Arrows", Color::DarkGrey);
        row += row_h;
        self.put_str(left, row, "Enter: start   R: menu", Color::DarkGrey);

        // Start button (menu only)
        if session.mode == Mode::Menu {
            let rect = self.start_button_rect(session);
            let fg = if hover { Color::Black } else { Color::White };
            let fill = if hover { '█' } else { ' ' };
            for dy in 0..rect.h {
                for dx in 0..rect.w {
                    self.put(rect.x + dx, rect.y + dy, fill, Color::Green);
                }
            }
            let label = "[ START ]";
            let lx = rect.x + (rect.w.saturating_sub(label.len() as u16)) / 2;
            let ly = rect.y + rect.h / 2;
            self.put_str(lx, ly, label, fg);
        }

        // State banner below the button area
        let banner_row = self.start_button_rect(session).y + self.ui.row_height * 2 + 2;
        match session.mode {
            Mode::Menu => {
                self.put_str(left, banner_row, "Press Enter or click Start", Color::Grey)
            }
            Mode::Playing => {}
            Mode::GameOver => self.put_str(left, banner_row, "GAME OVER - R for menu", Color::Red),
            Mode::Win => self.put_str(left, banner_row, "YOU WIN! - R for menu", Color::Green),
        }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}
