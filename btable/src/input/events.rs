/// Modifier keys state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
    /// Meta key held (cmd on macOS)
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Only ctrl held
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Only shift held
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Only meta held
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Check if any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.meta
    }

    /// Ctrl or cmd: the toggle / additive-sort modifier
    pub fn toggle(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a click landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A column header, by field key
    Header(String),
    /// A data row, by displayed (sorted) index
    Row(usize),
}

/// Click event from mouse or keyboard activation
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Where the click occurred
    pub target: ClickTarget,
    /// Modifier keys held during click
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// Create a header click event
    pub fn header(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            target: ClickTarget::Header(key.into()),
            modifiers,
        }
    }

    /// Create a row click event
    pub fn row(index: usize, modifiers: Modifiers) -> Self {
        Self {
            target: ClickTarget::Row(index),
            modifiers,
        }
    }
}
