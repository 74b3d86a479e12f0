//! Letter-to-symbol conversion and modular arithmetic over the 26-letter
//! alphabet.
//!
//! Every component works on symbols `0..26`; letters only appear at the
//! message boundary and in wiring strings.

/// Number of symbols in the machine alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// Code point of the letter mapped to symbol 0.
const ALPHABET_BASE: u8 = b'A';

/// Converts an uppercase letter `A`–`Z` to its symbol `0..26`.
///
/// # Returns
/// `None` for anything else, lowercase letters included.
pub fn letter_to_symbol(letter: char) -> Option<u8> {
    if letter.is_ascii_uppercase() {
        Some(letter as u8 - ALPHABET_BASE)
    } else {
        None
    }
}

/// Converts a symbol `0..26` back to its uppercase letter.
///
/// # Returns
/// `None` if `symbol >= 26`.
pub fn symbol_to_letter(symbol: u8) -> Option<char> {
    if is_symbol(symbol) {
        Some((ALPHABET_BASE + symbol) as char)
    } else {
        None
    }
}

/// Returns `true` if `value` is a valid symbol.
pub fn is_symbol(value: u8) -> bool {
    (value as usize) < ALPHABET_SIZE
}

/// Returns `true` for characters copied verbatim into the ciphertext
/// without touching the rotors: ASCII digits and whitespace.
pub fn is_pass_through(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace()
}

/// `(a + b) mod 26` for symbols.
pub(crate) fn add(a: u8, b: u8) -> u8 {
    ((a as usize + b as usize) % ALPHABET_SIZE) as u8
}

/// `(a - b) mod 26` for symbols.
pub(crate) fn sub(a: u8, b: u8) -> u8 {
    ((a as usize + ALPHABET_SIZE - b as usize % ALPHABET_SIZE) % ALPHABET_SIZE) as u8
}
