//! Draw command types
//!
//! Text-mode commands addressed by character row and column.

use heapless::{String, Vec};

/// Number of character rows on the status display
pub const SCREEN_ROWS: u8 = 8;

/// Maximum characters per line
pub const LINE_LEN: usize = 21;

/// Maximum commands in one frame
pub const MAX_DRAW_COMMANDS: usize = 8;

/// Semantic color of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorClass {
    /// Ordinary text
    #[default]
    Normal,
    /// Header / status bar
    Title,
    /// Best signal quality
    Ideal,
    /// Very good signal quality
    Excellent,
    /// Usable, worth a glance
    Good,
    /// Degraded, treat with caution
    Moderate,
    /// Stale data kept on screen for reference
    Muted,
    /// Fault or missing data
    Alert,
}

/// Font size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontClass {
    #[default]
    Small,
    Large,
}

/// One line of text to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCommand {
    pub row: u8,
    pub col: u8,
    pub text: String<LINE_LEN>,
    pub color: ColorClass,
    pub font: FontClass,
}

impl DrawCommand {
    /// Create a command, truncating `text` to the line width
    pub fn new(row: u8, col: u8, text: &str, color: ColorClass, font: FontClass) -> Self {
        let mut line = String::new();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        Self {
            row,
            col,
            text: line,
            color,
            font,
        }
    }

    /// Text as a string slice
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DrawCommand {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "[{}:{}] {} ({})",
            self.row,
            self.col,
            self.text.as_str(),
            self.color
        );
    }
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawList {
    commands: Vec<DrawCommand, MAX_DRAW_COMMANDS>,
}

impl DrawList {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command; extra commands beyond capacity are dropped
    pub fn push(&mut self, command: DrawCommand) {
        let _ = self.commands.push(command);
    }

    /// Append a line of text at column 0
    pub fn line(&mut self, row: u8, text: &str, color: ColorClass) {
        self.push(DrawCommand::new(row, 0, text, color, FontClass::Small));
    }

    /// Remove every command
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands in draw order
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command drawn at `row`, if any
    pub fn at_row(&self, row: u8) -> Option<&DrawCommand> {
        self.commands.iter().find(|c| c.row == row)
    }

    /// First command whose text contains `needle`
    pub fn find(&self, needle: &str) -> Option<&DrawCommand> {
        self.commands.iter().find(|c| c.text.contains(needle))
    }
}
