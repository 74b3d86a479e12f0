//! Historical rotor and reflector wirings.
//!
//! One canonical, immutable table per component kind. Wirings list, for
//! each input letter `A`–`Z`, the letter it is wired to at ring setting
//! `A` and position `A`. Notch positions are the rotor positions at which
//! the next rotor to the left is carried on the following keystroke.

use crate::error::ConfigurationError;

/// A named rotor wiring with its notch positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorSpec {
    /// Catalogue label, e.g. `"III"`.
    pub label: &'static str,
    /// 26-letter wiring permutation.
    pub wiring: &'static str,
    /// Notch positions (`0..26`). Empty for the M4 thin rotors.
    pub notches: &'static [u8],
}

/// A named reflector wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectorSpec {
    /// Catalogue label, e.g. `"B"`.
    pub label: &'static str,
    /// 26-letter involutive wiring.
    pub wiring: &'static str,
}

/// Rotors I–VIII and the M4 thin rotors Beta and Gamma.
pub const ROTORS: [RotorSpec; 10] = [
    RotorSpec {
        label: "I",
        wiring: "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
        notches: &[16],
    },
    RotorSpec {
        label: "II",
        wiring: "AJDKSIRUXBLHWTMCQGZNPYFVOE",
        notches: &[4],
    },
    RotorSpec {
        label: "III",
        wiring: "BDFHJLCPRTXVZNYEIWGAKMUSQO",
        notches: &[21],
    },
    RotorSpec {
        label: "IV",
        wiring: "ESOVPZJAYQUIRHXLNFTGKDCMWB",
        notches: &[9],
    },
    RotorSpec {
        label: "V",
        wiring: "VZBRGITYUPSDNHLXAWMJQOFECK",
        notches: &[25],
    },
    RotorSpec {
        label: "VI",
        wiring: "JPGVOUMFYQBENHZRDKASXLICTW",
        notches: &[12, 25],
    },
    RotorSpec {
        label: "VII",
        wiring: "NZJHGRCXMYSWBOUFAIVLPEKQDT",
        notches: &[12, 25],
    },
    RotorSpec {
        label: "VIII",
        wiring: "FKQHTLXOCBJSPDZRAMEWNIUYGV",
        notches: &[12, 25],
    },
    RotorSpec {
        label: "Beta",
        wiring: "LEYJVCNIXWPBQMDRTAKZGFUHOS",
        notches: &[],
    },
    RotorSpec {
        label: "Gamma",
        wiring: "FSOKANUERHMBTIQCWGPDYVJZXL",
        notches: &[],
    },
];

/// Wide reflectors A, B, C and the M4 thin reflectors.
pub const REFLECTORS: [ReflectorSpec; 5] = [
    ReflectorSpec {
        label: "A",
        wiring: "EJMZALYXVBWFCRQUONTSPIKHGD",
    },
    ReflectorSpec {
        label: "B",
        wiring: "YRUHQSLDPXNGOKMIEBFZCWVJAT",
    },
    ReflectorSpec {
        label: "C",
        wiring: "FVPJIAOYEDRZXWGCTKUQSBNMHL",
    },
    ReflectorSpec {
        label: "B-thin",
        wiring: "ENKQAUYWJICOPBLMDXZVFTHRGS",
    },
    ReflectorSpec {
        label: "C-thin",
        wiring: "RDOBJNTKVEHMLFCWZAXGYIPSUQ",
    },
];

/// Looks up a rotor by label (ASCII case-insensitive).
///
/// # Errors
/// Returns [`ConfigurationError::UnknownRotor`] if no rotor carries `label`.
///
/// # Examples
///
/// ```
/// use enigma_machine::catalogue;
///
/// let spec = catalogue::rotor("iii").unwrap();
/// assert_eq!(spec.label, "III");
/// assert_eq!(spec.notches, &[21]);
/// ```
pub fn rotor(label: &str) -> Result<&'static RotorSpec, ConfigurationError> {
    ROTORS
        .iter()
        .find(|spec| spec.label.eq_ignore_ascii_case(label))
        .ok_or_else(|| ConfigurationError::UnknownRotor(label.to_string()))
}

/// Looks up a reflector by label (ASCII case-insensitive).
///
/// # Errors
/// Returns [`ConfigurationError::UnknownReflector`] if no reflector carries `label`.
pub fn reflector(label: &str) -> Result<&'static ReflectorSpec, ConfigurationError> {
    REFLECTORS
        .iter()
        .find(|spec| spec.label.eq_ignore_ascii_case(label))
        .ok_or_else(|| ConfigurationError::UnknownReflector(label.to_string()))
}
