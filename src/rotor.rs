//! Rotor: a rotatable wiring permutation with ring setting and notches.
//!
//! Each rotor stores its wiring as a pair of lookup tables (forward and
//! backward) already shifted into the ring-setting frame, so a traversal is
//! two modular additions and one table lookup. The reflector shares the
//! same wiring representation but never rotates.

use crate::catalogue;
use crate::error::ConfigurationError;
use crate::utils::alphabet::{self, is_symbol, letter_to_symbol, ALPHABET_SIZE};

/// Direction of a signal through a rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Entry side towards the reflector (right to left).
    Forward,
    /// Reflector side back towards the entry wheel (left to right).
    Backward,
}

/// Bijection over the 26 symbols, stored as paired lookup tables.
///
/// Invariant: `backward[forward[x]] == x` for every symbol `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorWiring {
    forward: [u8; ALPHABET_SIZE],
    backward: [u8; ALPHABET_SIZE],
}

impl RotorWiring {
    /// Builds the lookup tables for a wiring string at a given ring setting.
    ///
    /// Both table frames are shifted by the ring setting:
    /// `forward[(i + ring) % 26] = (wiring[i] + ring) % 26`, and `backward`
    /// holds the inverse mapping.
    ///
    /// # Parameters
    /// - `wiring`: 26 uppercase letters forming a permutation of `A`–`Z`.
    /// - `ring_setting`: Ring offset (0..26).
    ///
    /// # Errors
    /// - [`ConfigurationError::InvalidRingSetting`] if `ring_setting >= 26`.
    /// - [`ConfigurationError::InvalidWiringLength`] if `wiring` is not 26 characters.
    /// - [`ConfigurationError::InvalidWiring`] for a character outside `A`–`Z`.
    /// - [`ConfigurationError::DuplicateWiring`] if a letter appears twice.
    pub fn new(wiring: &str, ring_setting: u8) -> Result<Self, ConfigurationError> {
        if !is_symbol(ring_setting) {
            return Err(ConfigurationError::InvalidRingSetting(ring_setting));
        }
        let length = wiring.chars().count();
        if length != ALPHABET_SIZE {
            return Err(ConfigurationError::InvalidWiringLength(length));
        }

        let mut forward = [None; ALPHABET_SIZE];
        let mut backward = [None; ALPHABET_SIZE];
        for (offset, character) in wiring.chars().enumerate() {
            let target = letter_to_symbol(character)
                .ok_or(ConfigurationError::InvalidWiring { character, offset })?;
            let source = alphabet::add(offset as u8, ring_setting);
            let target = alphabet::add(target, ring_setting);
            if backward[target as usize].is_some() {
                return Err(ConfigurationError::DuplicateWiring { letter: character });
            }
            forward[source as usize] = Some(target);
            backward[target as usize] = Some(source);
        }

        match (collapse(forward), collapse(backward)) {
            (Some(forward), Some(backward)) => Ok(RotorWiring { forward, backward }),
            _ => Err(ConfigurationError::InvalidWiringLength(length)),
        }
    }

    /// Forward lookup table, in the ring-setting frame.
    pub fn forward(&self) -> &[u8; ALPHABET_SIZE] {
        &self.forward
    }

    /// Backward lookup table, in the ring-setting frame.
    pub fn backward(&self) -> &[u8; ALPHABET_SIZE] {
        &self.backward
    }

    fn lookup(&self, index: u8, direction: Direction) -> u8 {
        match direction {
            Direction::Forward => self.forward[index as usize],
            Direction::Backward => self.backward[index as usize],
        }
    }
}

/// Collapses validated construction slots into a plain table.
///
/// Returns `None` if any slot was left unfilled.
fn collapse(slots: [Option<u8>; ALPHABET_SIZE]) -> Option<[u8; ALPHABET_SIZE]> {
    let mut table = [0u8; ALPHABET_SIZE];
    for (entry, slot) in table.iter_mut().zip(slots) {
        *entry = slot?;
    }
    Some(table)
}

/// Set of notch positions, held as a bitmask over the 26 positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotchSet(u32);

impl NotchSet {
    /// Builds a notch set from positions.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidNotch`] for a position `>= 26`.
    pub fn from_positions(positions: &[u8]) -> Result<Self, ConfigurationError> {
        let mut mask = 0u32;
        for &position in positions {
            if !is_symbol(position) {
                return Err(ConfigurationError::InvalidNotch(position));
            }
            mask |= 1 << position;
        }
        Ok(NotchSet(mask))
    }

    /// Returns `true` if `position` carries a notch.
    pub fn contains(&self, position: u8) -> bool {
        is_symbol(position) && self.0 & (1 << position) != 0
    }

    /// Number of notches.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` for rotors without notches.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Notch positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..ALPHABET_SIZE as u8).filter(move |&p| self.contains(p))
    }
}

/// Construction parameters for a [`Rotor`].
///
/// Holds raw, unvalidated values; validation happens in [`Rotor::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorConfig {
    /// Display name used in logs and [`Rotor::name`].
    pub name: String,
    /// 26-letter wiring permutation.
    pub wiring: String,
    /// Initial rotation position (0..26).
    pub position: u8,
    /// Ring setting (0..26).
    pub ring_setting: u8,
    /// Notch positions (0..26).
    pub notches: Vec<u8>,
}

impl RotorConfig {
    /// Creates a configuration from raw wiring, at position and ring setting 0.
    pub fn new(name: impl Into<String>, wiring: impl Into<String>, notches: &[u8]) -> Self {
        RotorConfig {
            name: name.into(),
            wiring: wiring.into(),
            position: 0,
            ring_setting: 0,
            notches: notches.to_vec(),
        }
    }

    /// Resolves wiring and notches from the rotor catalogue.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownRotor`] for an unknown label.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::RotorConfig;
    ///
    /// let config = RotorConfig::catalogue("II").unwrap().position(3).ring_setting(1);
    /// assert_eq!(config.notches, vec![4]);
    /// assert_eq!(config.position, 3);
    /// ```
    pub fn catalogue(label: &str) -> Result<Self, ConfigurationError> {
        let spec = catalogue::rotor(label)?;
        Ok(Self::new(spec.label, spec.wiring, spec.notches))
    }

    /// Sets the initial rotation position.
    pub fn position(mut self, position: u8) -> Self {
        self.position = position;
        self
    }

    /// Sets the ring setting.
    pub fn ring_setting(mut self, ring_setting: u8) -> Self {
        self.ring_setting = ring_setting;
        self
    }
}

/// A rotor in a machine: wiring, rotation position, ring setting and notches.
///
/// Wiring and ring setting are fixed at construction. The position changes
/// only through [`step`](Self::step) during encoding, or through
/// [`set_position`](Self::set_position) when restoring a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    wiring: RotorWiring,
    position: u8,
    ring_setting: u8,
    notches: NotchSet,
}

impl Rotor {
    /// Builds a rotor from its configuration.
    ///
    /// # Errors
    /// - Any wiring error from [`RotorWiring::new`].
    /// - [`ConfigurationError::InvalidPosition`] if the position is `>= 26`.
    /// - [`ConfigurationError::InvalidNotch`] if a notch is `>= 26`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::{Rotor, RotorConfig};
    ///
    /// let config = RotorConfig::new("shift", "BCDEFGHIJKLMNOPQRSTUVWXYZA", &[25]);
    /// let rotor = Rotor::new(&config).unwrap();
    /// assert_eq!(rotor.position(), 0);
    ///
    /// let bad = RotorConfig::new("short", "ABC", &[]);
    /// assert!(Rotor::new(&bad).is_err());
    /// ```
    pub fn new(config: &RotorConfig) -> Result<Self, ConfigurationError> {
        let wiring = RotorWiring::new(&config.wiring, config.ring_setting)?;
        if !is_symbol(config.position) {
            return Err(ConfigurationError::InvalidPosition(config.position));
        }
        let notches = NotchSet::from_positions(&config.notches)?;
        Ok(Rotor {
            name: config.name.clone(),
            wiring,
            position: config.position,
            ring_setting: config.ring_setting,
            notches,
        })
    }

    /// Builds a catalogue rotor at the given position and ring setting.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownRotor`] for an unknown label, or
    /// any validation error from [`Rotor::new`].
    pub fn from_catalogue(
        label: &str,
        position: u8,
        ring_setting: u8,
    ) -> Result<Self, ConfigurationError> {
        let config = RotorConfig::catalogue(label)?
            .position(position)
            .ring_setting(ring_setting);
        Self::new(&config)
    }

    /// Passes a signal through the rotor at its current position.
    ///
    /// The signal enters the wiring frame by adding the position, is looked
    /// up in the table for `direction`, and leaves by subtracting the
    /// position again (all modulo 26).
    ///
    /// # Parameters
    /// - `signal`: Input symbol (0..26).
    /// - `direction`: Which lookup table to use.
    ///
    /// # Returns
    /// Output symbol (0..26).
    pub fn traverse(&self, signal: u8, direction: Direction) -> u8 {
        let entry = alphabet::add(signal, self.position);
        let exit = self.wiring.lookup(entry, direction);
        alphabet::sub(exit, self.position)
    }

    /// Returns `true` if the current position carries a notch.
    pub fn is_notch_engaged(&self) -> bool {
        self.notches.contains(self.position)
    }

    /// Advances the rotor by one position.
    pub fn step(&mut self) {
        self.position = alphabet::add(self.position, 1);
    }

    /// Moves the rotor to `position`.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidPosition`] if `position >= 26`.
    pub fn set_position(&mut self, position: u8) -> Result<(), ConfigurationError> {
        if !is_symbol(position) {
            return Err(ConfigurationError::InvalidPosition(position));
        }
        self.position = position;
        Ok(())
    }

    /// Rotor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current rotation position.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Ring setting fixed at construction.
    pub fn ring_setting(&self) -> u8 {
        self.ring_setting
    }

    /// Notch positions.
    pub fn notches(&self) -> NotchSet {
        self.notches
    }

    /// Wiring tables.
    pub fn wiring(&self) -> &RotorWiring {
        &self.wiring
    }
}

/// Construction parameters for a [`Reflector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectorConfig {
    /// Display name.
    pub name: String,
    /// 26-letter wiring; should be an involution.
    pub wiring: String,
}

impl ReflectorConfig {
    /// Creates a configuration from raw wiring.
    pub fn new(name: impl Into<String>, wiring: impl Into<String>) -> Self {
        ReflectorConfig {
            name: name.into(),
            wiring: wiring.into(),
        }
    }

    /// Resolves the wiring from the reflector catalogue.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownReflector`] for an unknown label.
    pub fn catalogue(label: &str) -> Result<Self, ConfigurationError> {
        let spec = catalogue::reflector(label)?;
        Ok(Self::new(spec.label, spec.wiring))
    }
}

/// Fixed wiring that sends the signal back through the rotor stack.
///
/// Position is always 0 and there are no notches. The wiring should be a
/// fixed-point-free involution for the cipher to be reciprocal; this is
/// reported by [`is_involution`](Self::is_involution) but not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    name: String,
    wiring: RotorWiring,
}

impl Reflector {
    /// Builds a reflector from its configuration.
    ///
    /// # Errors
    /// Any wiring error from [`RotorWiring::new`].
    pub fn new(config: &ReflectorConfig) -> Result<Self, ConfigurationError> {
        Ok(Reflector {
            name: config.name.clone(),
            wiring: RotorWiring::new(&config.wiring, 0)?,
        })
    }

    /// Builds a catalogue reflector.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::UnknownReflector`] for an unknown label.
    pub fn from_catalogue(label: &str) -> Result<Self, ConfigurationError> {
        Self::new(&ReflectorConfig::catalogue(label)?)
    }

    /// Reflects a signal.
    pub fn reflect(&self, signal: u8) -> u8 {
        self.wiring.forward[signal as usize % ALPHABET_SIZE]
    }

    /// Returns `true` if the wiring is self-inverse with no fixed point.
    pub fn is_involution(&self) -> bool {
        self.wiring
            .forward()
            .iter()
            .enumerate()
            .all(|(x, &y)| x as u8 != y && self.wiring.forward()[y as usize] == x as u8)
    }

    /// Reflector name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wiring tables.
    pub fn wiring(&self) -> &RotorWiring {
        &self.wiring
    }
}
