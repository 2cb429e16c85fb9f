/// Module defining the EVM opcodes that make up a function dispatch check.
///
/// A Solidity dispatcher compares the call selector against each public function with
/// `PUSH4 <selector> EQ PUSHn <dest> JUMPI`. Only the opcodes of that idiom are named here;
/// every other byte is carried as `Other(u8)`.
use std::fmt;

/// First byte of the PUSH1..PUSH32 range.
const PUSH_BASE: u8 = 0x60;
/// Largest immediate a PUSH instruction can carry.
const MAX_PUSH_LEN: u8 = 32;

/// Enumeration of the EVM opcodes used by dispatch detection.
///
/// `PUSH(n)` covers PUSH1 to PUSH32, with `n` the number of immediate bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    EQ,       // 0x14
    JUMPI,    // 0x57
    PUSH(u8), // 0x60–0x7f (PUSH1 to PUSH32)
    // Catch-all for opcodes outside the dispatch idiom
    Other(u8),
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EQ => write!(f, "EQ"),
            Self::JUMPI => write!(f, "JUMPI"),
            Self::PUSH(n) => write!(f, "PUSH{n}"),
            Self::Other(byte) => write!(f, "UNKNOWN{byte:02x}"),
        }
    }
}

impl Opcode {
    /// Parses a raw byte into an `Opcode` and its immediate data size.
    ///
    /// # Examples
    /// ```rust
    /// use abiprobe_core::Opcode;
    ///
    /// let (opcode, imm_size) = Opcode::parse(0x61);
    /// assert_eq!(opcode, Opcode::PUSH(2));
    /// assert_eq!(imm_size, 2);
    /// ```
    pub fn parse(byte: u8) -> (Self, usize) {
        match byte {
            0x14 => (Self::EQ, 0),
            0x57 => (Self::JUMPI, 0),
            _ => match Self::push_len(byte) {
                Some(n) => (Self::PUSH(n as u8), n),
                None => (Self::Other(byte), 0),
            },
        }
    }

    /// Number of immediate bytes pushed by `byte` (`byte - 0x60 + 1`), if it is PUSH1..PUSH32.
    pub const fn push_len(byte: u8) -> Option<usize> {
        if byte >= PUSH_BASE && byte < PUSH_BASE + MAX_PUSH_LEN {
            Some((byte - PUSH_BASE) as usize + 1)
        } else {
            None
        }
    }

    /// Converts the opcode to its byte representation.
    ///
    /// `PUSH(n)` is only meaningful for `n` in 1..=32.
    pub const fn to_byte(&self) -> u8 {
        match self {
            Self::EQ => 0x14,
            Self::JUMPI => 0x57,
            Self::PUSH(n) => PUSH_BASE - 1 + *n,
            Self::Other(byte) => *byte,
        }
    }
}
