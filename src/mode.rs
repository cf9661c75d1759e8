//! Editing mode flag set.

use std::fmt;
use std::ops::BitOr;

/// Set of active editing modes for one drawing surface.
///
/// Modes combine: `Mode::CREATE | Mode::EDIT` allows drawing new polygons
/// while dragging the vertices of existing ones. The set is never empty:
/// any transition that would clear every flag lands on [`Mode::VIEW`]
/// instead, so `from_bits(0)` and `set_mode` with an all-cleared value both
/// behave as a switch to view-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u8);

impl Mode {
    /// View-only; the implicit fallback when nothing else is set.
    pub const VIEW: Mode = Mode(1);
    /// Freehand polygon creation.
    pub const CREATE: Mode = Mode(1 << 1);
    /// Per-vertex drag editing.
    pub const EDIT: Mode = Mode(1 << 2);
    /// Click-to-delete whole polygons.
    pub const DELETE: Mode = Mode(1 << 3);
    /// Context-gesture deletion of single vertices.
    pub const DELETE_POINT: Mode = Mode(1 << 4);
    /// Every mode at once.
    pub const ALL: Mode = Mode(0b1_1111);

    /// Builds a mode set from raw bits, masking unknown bits and collapsing
    /// an empty set to [`Mode::VIEW`].
    pub fn from_bits(bits: u8) -> Mode {
        let masked = bits & Mode::ALL.0;
        if masked == 0 { Mode::VIEW } else { Mode(masked) }
    }

    /// Raw bit representation; never zero.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag in `other` is set in `self`.
    pub fn contains(self, other: Mode) -> bool {
        self.0 & other.0 == other.0
    }

    /// The set with the flags of `other` toggled (XOR).
    pub fn toggled(self, other: Mode) -> Mode {
        Mode::from_bits(self.0 ^ other.0)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::VIEW
    }
}

impl BitOr for Mode {
    type Output = Mode;

    fn bitor(self, rhs: Mode) -> Mode {
        Mode(self.0 | rhs.0)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Mode::VIEW, "view"),
            (Mode::CREATE, "create"),
            (Mode::EDIT, "edit"),
            (Mode::DELETE, "delete"),
            (Mode::DELETE_POINT, "delete-point"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
