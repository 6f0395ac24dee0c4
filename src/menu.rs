//! Visibility state of the feed menu.

/// Whether the feed menu panel is shown.
///
/// Starts [`MenuVisibility::Hidden`]; the only transition is [`toggle`](Self::toggle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuVisibility {
    #[default]
    Hidden,
    Visible,
}

impl MenuVisibility {
    /// Flip between hidden and visible, returning the new state.
    pub fn toggle(&mut self) -> Self {
        *self = match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        };
        *self
    }

    pub fn is_hidden(self) -> bool {
        self == Self::Hidden
    }

    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}
