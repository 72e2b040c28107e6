#![forbid(unsafe_code)]

//! Directional input understood by the navigation controllers.

/// A directional move request.
///
/// Linear lists honor `Next`/`Previous`/`First`/`Last`; `Up`/`Down` act as
/// `Previous`/`Next` there. Grids use all eight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
    First,
    Last,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a key identifier forwarded by a UI layer to a direction.
    ///
    /// Accepts DOM-style names (`"ArrowDown"`), short names (`"Down"`), and
    /// vi keys (`"j"`). Unknown names yield `None`.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        let dir = match name {
            "ArrowDown" | "Down" | "j" => Self::Down,
            "ArrowUp" | "Up" | "k" => Self::Up,
            "ArrowLeft" | "Left" | "h" => Self::Left,
            "ArrowRight" | "Right" | "l" => Self::Right,
            "Home" | "g" => Self::First,
            "End" | "G" => Self::Last,
            "Tab" | "n" => Self::Next,
            "BackTab" | "p" => Self::Previous,
            _ => return None,
        };
        Some(dir)
    }

    /// The direction in a single-axis list.
    #[must_use]
    pub fn linear(self) -> Self {
        match self {
            Self::Down | Self::Right => Self::Next,
            Self::Up | Self::Left => Self::Previous,
            other => other,
        }
    }
}
