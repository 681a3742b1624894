//! Indentation configuration for generated Go source.

/// Indentation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character, the gofmt style.
    Tab,
}

impl Indent {
    /// Tab indentation, as gofmt writes it.
    pub const GO: Self = Self::Tab;

    /// Columns a tab occupies when measuring line width.
    pub const TAB_WIDTH: usize = 8;

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(4) => "    ",
            Self::Spaces(8) => "        ",
            // Fallback to 4 whitespaces
            Self::Spaces(_) => "    ",
            Self::Tab => "\t",
        }
    }

    /// Display width of one indent level.
    pub fn width(&self) -> usize {
        match self {
            Self::Tab => Self::TAB_WIDTH,
            spaces => spaces.as_str().len(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::GO
    }
}
