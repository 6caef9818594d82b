//! The fixed slot namespace.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// A persistence bucket holding one saved snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Written automatically after every change.
    Auto,
    /// Manual slot 1.
    One,
    /// Manual slot 2.
    Two,
    /// Manual slot 3.
    Three,
}

impl Slot {
    /// Every slot, in listing order.
    pub const ALL: [Slot; 4] = [Slot::Auto, Slot::One, Slot::Two, Slot::Three];

    /// The slots a player saves to by hand.
    pub const MANUAL: [Slot; 3] = [Slot::One, Slot::Two, Slot::Three];

    /// Storage key for this slot.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Auto => "autosave",
            Slot::One => "slot-1",
            Slot::Two => "slot-2",
            Slot::Three => "slot-3",
        }
    }

    /// Display name for menus.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Auto => "Auto-Save",
            Slot::One => "Slot 1",
            Slot::Two => "Slot 2",
            Slot::Three => "Slot 3",
        }
    }

    /// Whether this is one of the numbered slots.
    pub fn is_manual(self) -> bool {
        self != Slot::Auto
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Auto => "auto",
            Slot::One => "1",
            Slot::Two => "2",
            Slot::Three => "3",
        };
        f.write_str(name)
    }
}

impl FromStr for Slot {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "autosave" | "a" => Ok(Slot::Auto),
            "1" => Ok(Slot::One),
            "2" => Ok(Slot::Two),
            "3" => Ok(Slot::Three),
            other => Err(StoreError::UnknownSlot(other.to_string())),
        }
    }
}
