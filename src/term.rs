use crate::{Coords, TermInt};
use crate::snake::Position;
use crate::state::GRID_SIZE;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// Every grid cell is two terminal columns wide so the board looks square.
const CELL_WIDTH: TermInt = 2;
const STATUS_ROW: TermInt = 0;
const BOARD_TOP: TermInt = 1;

pub const BOARD_WIDTH: TermInt = GRID_SIZE as TermInt * CELL_WIDTH + 2;
pub const BOARD_HEIGHT: TermInt = GRID_SIZE as TermInt + 2;

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Whether the board plus its status line fits in the terminal.
    pub fn fits_board(&self) -> bool {
        self.width >= BOARD_WIDTH && self.height >= BOARD_TOP + BOARD_HEIGHT
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Collects the key presses that arrive within `timeout`, returning as soon
    /// as the first one is in.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        if poll(timeout)? {
            while poll(Duration::from_millis(0))? {
                if let Event::Key(ev) = read()? {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let end_x = BOARD_WIDTH - 1;
        let end_y = BOARD_TOP + BOARD_HEIGHT - 1;

        for x in 0..BOARD_WIDTH {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, BOARD_TOP), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in BOARD_TOP + 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    pub fn draw_status(&mut self, line: &str) -> Result<()> {
        let padded = format!("{line: <width$}", line = line, width = BOARD_WIDTH as usize);
        for (x, ch) in padded.chars().enumerate() {
            self.print_at((x as TermInt, STATUS_ROW), ch)?;
        }
        Ok(())
    }

    /// Fills one grid cell. `pos` must be on the grid.
    pub fn print_cell(&mut self, pos: Position, ch: char) -> Result<()> {
        let (x, y) = cell_origin(pos);
        for dx in 0..CELL_WIDTH {
            self.print_at((x + dx, y), ch)?;
        }
        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (BOARD_WIDTH / 2, BOARD_TOP + BOARD_HEIGHT / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore what the message covered from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let ch = self.screen[self.width as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), ch)?;
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Messages bypass the screen buffer so hiding one can restore what was
        // underneath
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }
}

/// Terminal coordinates of the left half of a grid cell.
fn cell_origin(pos: Position) -> Coords {
    let x = 1 + (pos.x as TermInt - 1) * CELL_WIDTH;
    let y = BOARD_TOP + pos.y as TermInt;
    (x, y)
}
