use crate::Opcode;
use crate::selector::Selector;
use serde::{Deserialize, Serialize};

/// How many occurrences of a selector comparison are examined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStrategy {
    /// Only the first textual occurrence of `PUSH4 <selector> EQ` is examined. If its tail
    /// is not a `PUSHn <dest> JUMPI` branch, the selector is reported as absent even when a
    /// valid check appears later in the stream.
    #[default]
    FirstOccurrence,
    /// Every occurrence is examined until one is followed by a valid branch.
    AllOccurrences,
}

/// Hex text of `PUSH4 <selector> EQ`, the start of a dispatcher's selector check.
pub fn selector_probe(selector: Selector) -> String {
    format!(
        "{:02x}{selector}{:02x}",
        Opcode::PUSH(4).to_byte(),
        Opcode::EQ.to_byte()
    )
}

/// Encodes a complete selector check `PUSH4 <selector> EQ PUSHn <dest> JUMPI` as hex text.
///
/// Returns `None` when `dest` is empty or longer than 32 bytes.
pub fn encode_selector_check(selector: Selector, dest: &[u8]) -> Option<String> {
    if dest.is_empty() || dest.len() > 32 {
        return None;
    }
    Some(format!(
        "{}{:02x}{}{:02x}",
        selector_probe(selector),
        Opcode::PUSH(dest.len() as u8).to_byte(),
        hex::encode(dest),
        Opcode::JUMPI.to_byte()
    ))
}

/// Tells whether `stream` contains a dispatch check branching on `selector`.
///
/// `stream` is lowercase hex without a `0x` prefix. Only the first occurrence of the
/// selector comparison is examined, see [`ScanStrategy::FirstOccurrence`].
///
/// # Examples
/// ```rust
/// use abiprobe_core::{Selector, detection::matches};
///
/// let selector = Selector::from(0xa905_9cbb);
/// assert!(matches("8063a9059cbb14610045575b", selector));
/// assert!(!matches("8063a9059cbb15610045575b", selector));
/// ```
pub fn matches(stream: &str, selector: Selector) -> bool {
    matches_with(stream, selector, ScanStrategy::FirstOccurrence)
}

/// [`matches`] with an explicit scan strategy.
pub fn matches_with(stream: &str, selector: Selector, strategy: ScanStrategy) -> bool {
    let probe = selector_probe(selector);
    let mut from = 0;

    while let Some(found) = stream.get(from..).and_then(|rest| rest.find(&probe)) {
        let start = from + found;
        let tail = &stream[start + probe.len()..];

        if branches_to_handler(tail) {
            tracing::debug!("selector 0x{} dispatched at hex offset {}", selector, start);
            return true;
        }

        if strategy == ScanStrategy::FirstOccurrence {
            tracing::debug!(
                "selector 0x{} compared at hex offset {} but not followed by PUSHn JUMPI",
                selector,
                start
            );
            return false;
        }
        from = start + 1;
    }

    tracing::debug!("no dispatch check for selector 0x{}", selector);
    false
}

/// Checks that `tail` opens with `PUSHn <n bytes> JUMPI`. The pushed destination is not
/// decoded.
fn branches_to_handler(tail: &str) -> bool {
    let Some(push) = byte_at(tail, 0) else {
        return false;
    };
    let Some(dest_len) = Opcode::push_len(push) else {
        return false;
    };
    byte_at(tail, 1 + dest_len) == Some(Opcode::JUMPI.to_byte())
}

/// Reads the `index`-th byte of a hex string. Only lowercase digits are recognized.
fn byte_at(hex: &str, index: usize) -> Option<u8> {
    let start = index.checked_mul(2)?;
    let pair = hex.as_bytes().get(start..start.checked_add(2)?)?;
    Some((nibble(pair[0])? << 4) | nibble(pair[1])?)
}

const fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}
