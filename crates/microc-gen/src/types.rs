//! IR base types and the source-type mapping.

use std::fmt;

/// A QBE base type.
///
/// `w` and `s` values live in 4-byte stack slots, `l` and `d` in 8-byte
/// slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IrType {
    /// 32-bit integer.
    W,
    /// 64-bit integer or pointer.
    L,
    /// 32-bit float.
    S,
    /// 64-bit float.
    D,
}

impl IrType {
    /// Maps a Micro type name to its IR base type.
    ///
    /// `void` has no value type and is handled separately as a return
    /// type; every unlisted name is unknown and a fatal diagnostic.
    pub fn from_name(name: &str) -> Option<IrType> {
        match name {
            "int" => Some(IrType::L),
            "float" => Some(IrType::D),
            "string" => Some(IrType::L),
            _ => None,
        }
    }

    /// The one-letter IR spelling.
    pub const fn name(&self) -> &'static str {
        match self {
            IrType::W => "w",
            IrType::L => "l",
            IrType::S => "s",
            IrType::D => "d",
        }
    }

    /// Returns true for the floating-point types.
    pub const fn is_float(&self) -> bool {
        matches!(self, IrType::S | IrType::D)
    }

    /// Slot size in bytes.
    pub const fn size(&self) -> u32 {
        match self {
            IrType::W | IrType::S => 4,
            IrType::L | IrType::D => 8,
        }
    }

    /// The stack allocation instruction for one slot of this type.
    pub const fn alloc_instr(&self) -> &'static str {
        match self {
            IrType::W | IrType::S => "alloc4",
            IrType::L | IrType::D => "alloc8",
        }
    }

    /// The typed store instruction.
    pub const fn store_instr(&self) -> &'static str {
        match self {
            IrType::W => "storew",
            IrType::L => "storel",
            IrType::S => "stores",
            IrType::D => "stored",
        }
    }

    /// The typed load instruction.
    pub const fn load_instr(&self) -> &'static str {
        match self {
            IrType::W => "loadw",
            IrType::L => "loadl",
            IrType::S => "loads",
            IrType::D => "loadd",
        }
    }

    /// A zero immediate of this type.
    pub const fn zero(&self) -> &'static str {
        match self {
            IrType::W | IrType::L => "0",
            IrType::S => "s_0",
            IrType::D => "d_0",
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
