//! Error types for the Enigma machine library.
//!
//! Construction failures ([`ConfigurationError`], [`PlugboardError`]) abort
//! object creation; no partially built component is ever returned.
//! Message failures ([`MessageError`]) carry the ciphertext produced before
//! the offending character.

use thiserror::Error;

/// Invalid rotor, reflector or machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A wiring string contains a character outside `A`–`Z`.
    #[error("invalid wiring character {character:?} at offset {offset}")]
    InvalidWiring {
        /// The offending character.
        character: char,
        /// Character offset within the wiring string.
        offset: usize,
    },

    /// A wiring string does not hold exactly 26 characters.
    #[error("wiring must contain exactly 26 letters, got {0}")]
    InvalidWiringLength(usize),

    /// A wiring string is not a permutation.
    #[error("wiring is not a permutation: {letter} is wired more than once")]
    DuplicateWiring {
        /// The letter that receives a second source.
        letter: char,
    },

    /// No rotor with this label exists in the catalogue.
    #[error("unknown rotor {0:?}")]
    UnknownRotor(String),

    /// No reflector with this label exists in the catalogue.
    #[error("unknown reflector {0:?}")]
    UnknownReflector(String),

    /// A rotor position is outside 0..26.
    #[error("rotor position {0} is outside 0..26")]
    InvalidPosition(u8),

    /// A ring setting is outside 0..26.
    #[error("ring setting {0} is outside 0..26")]
    InvalidRingSetting(u8),

    /// A notch position is outside 0..26.
    #[error("notch position {0} is outside 0..26")]
    InvalidNotch(u8),

    /// A machine was configured with fewer than three rotors.
    #[error("a machine needs at least 3 rotors, got {0}")]
    TooFewRotors(usize),

    /// A state snapshot does not describe the same number of rotors.
    #[error("state describes {actual} rotors but the machine has {expected}")]
    RotorCountMismatch {
        /// Rotors in the machine.
        expected: usize,
        /// Rotors in the snapshot.
        actual: usize,
    },

    /// A state snapshot tries to change a ring setting.
    #[error("ring setting of rotor {index} is fixed at {expected}, snapshot has {actual}")]
    RingSettingMismatch {
        /// Rotor index, 0 being the rightmost rotor.
        index: usize,
        /// Ring setting the rotor was built with.
        expected: u8,
        /// Ring setting found in the snapshot.
        actual: u8,
    },
}

/// Invalid plugboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlugboardError {
    /// More pairs than the plugboard accepts.
    #[error("too many plugboard pairs: {count}, limit is {max}")]
    TooManyPairs {
        /// Pairs supplied.
        count: usize,
        /// Configured cap.
        max: usize,
    },

    /// A symbol paired with itself.
    #[error("cannot pair symbol {0} with itself")]
    SelfPair(u8),

    /// A symbol outside 0..26.
    #[error("plugboard symbol {0} is outside 0..26")]
    OutOfRange(u8),

    /// A symbol used by more than one pair.
    #[error("plugboard symbol {0} is already paired")]
    Reused(u8),

    /// A textual group that is not exactly two letters.
    #[error("malformed plugboard pair {0:?}, expected two letters")]
    MalformedPair(String),

    /// A textual group containing a character outside `A`–`Z`.
    #[error("invalid plugboard letter {0:?}, must be upper case A-Z")]
    InvalidLetter(char),

    /// A pair cap larger than the hardware ever allowed.
    #[error("plugboard cap {requested} exceeds the maximum of {max}")]
    CapTooLarge {
        /// Requested cap.
        requested: usize,
        /// Largest accepted cap.
        max: usize,
    },
}

/// Input that cannot be pushed through the machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// A character outside `A`–`Z` and outside the pass-through class.
    #[error("unencodable character {character:?} at offset {offset}")]
    Unencodable {
        /// The offending character.
        character: char,
        /// Character offset within the message.
        offset: usize,
    },

    /// A raw symbol outside 0..26.
    #[error("symbol {0} is outside 0..26")]
    InvalidSymbol(u8),
}

/// A message that stopped encoding part way through.
///
/// Holds the ciphertext produced before the failure so the caller can decide
/// whether to keep it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("message encoding stopped: {error}")]
pub struct MessageError {
    /// Ciphertext accumulated before the failing character.
    pub ciphertext: String,
    /// The failure that stopped processing.
    #[source]
    pub error: EncodingError,
}

impl MessageError {
    /// Returns the partial ciphertext.
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Consumes the error, returning the partial ciphertext and the cause.
    pub fn into_parts(self) -> (String, EncodingError) {
        (self.ciphertext, self.error)
    }
}

/// Any failure while assembling a [`Machine`](crate::Machine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Rotor, reflector or machine level configuration error.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Plugboard configuration error.
    #[error(transparent)]
    Plugboard(#[from] PlugboardError),
}
