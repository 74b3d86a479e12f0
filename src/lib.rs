//! Enigma-family rotor cipher machine.
//!
//! A machine composes a plugboard, a stack of rotors and a reflector into a
//! deterministic, self-reciprocal letter substitution whose key changes with
//! every keystroke.
//!
//! # Architecture
//!
//! ```text
//! Rotor       (wiring tables + position + ring setting + notches)
//!     ↕ N rotors in a stack, index 0 rightmost and fastest
//! Reflector   (fixed involutive wiring, sends the signal back)
//! Plugboard   (symmetric letter swaps on entry and exit)
//! Machine     (orchestrator: stepping with double-step + signal path)
//! ```
//!
//! Each keystroke steps the rotors first, then sends the signal
//! `plugboard → rotors 0..n → reflector → rotors n..0 → plugboard`.
//!
//! # Examples
//!
//! Encrypt and decrypt with the same starting state:
//!
//! ```
//! use enigma_machine::{MachineConfig, ReflectorConfig, RotorConfig};
//!
//! let config = MachineConfig::new(ReflectorConfig::catalogue("B").unwrap())
//!     .rotor(RotorConfig::catalogue("III").unwrap())
//!     .rotor(RotorConfig::catalogue("II").unwrap())
//!     .rotor(RotorConfig::catalogue("I").unwrap())
//!     .with_plugboard_text("AZ")
//!     .unwrap();
//!
//! let mut encoder = config.build().unwrap();
//! let ciphertext = encoder.encode_message("AAAZZ").unwrap();
//! assert_eq!(ciphertext, "UTZGO");
//!
//! let mut decoder = config.build().unwrap();
//! assert_eq!(decoder.encode_message(&ciphertext).unwrap(), "AAAZZ");
//! ```
//!
//! Digits and whitespace pass through without stepping the rotors:
//!
//! ```
//! use enigma_machine::{Machine, Plugboard, Reflector, Rotor};
//!
//! let rotors = vec![
//!     Rotor::from_catalogue("III", 0, 0).unwrap(),
//!     Rotor::from_catalogue("II", 0, 0).unwrap(),
//!     Rotor::from_catalogue("I", 0, 0).unwrap(),
//! ];
//! let reflector = Reflector::from_catalogue("B").unwrap();
//! let mut machine = Machine::from_parts(rotors, reflector, Plugboard::empty()).unwrap();
//!
//! assert_eq!(machine.encode_message("A1AAA").unwrap(), "B1DZG");
//! ```

#![deny(clippy::all)]

pub mod catalogue;
pub mod error;
pub mod utils;

mod machine;
mod plugboard;
mod rotor;

pub use error::{ConfigurationError, EncodingError, EnigmaError, MessageError, PlugboardError};
pub use machine::{
    Keystroke, KeystrokeObserver, Machine, MachineConfig, MachineState, RotorState, MIN_ROTORS,
};
pub use plugboard::{parse_pairs, Plugboard, ABSOLUTE_MAX_PAIRS, DEFAULT_MAX_PAIRS};
pub use rotor::{Direction, NotchSet, Reflector, ReflectorConfig, Rotor, RotorConfig, RotorWiring};
