//! Machine: rotor stack, reflector and plugboard wired into one cipher.
//!
//! Orchestrates the stepping mechanism (including the double-step of the
//! middle rotor) and the signal path
//! `plugboard → rotors forward → reflector → rotors backward → plugboard`.
//! Rotor index 0 is the rightmost, fastest rotor and is entered first.

use std::fmt;

use crate::error::{ConfigurationError, EncodingError, EnigmaError, MessageError, PlugboardError};
use crate::plugboard::{self, Plugboard, DEFAULT_MAX_PAIRS};
use crate::rotor::{Direction, Reflector, ReflectorConfig, Rotor, RotorConfig};
use crate::utils::alphabet::{is_pass_through, is_symbol, letter_to_symbol, symbol_to_letter};

/// Fewest rotors a machine can hold.
pub const MIN_ROTORS: usize = 3;

/// Snapshot of one rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorState {
    /// Rotation position (0..26).
    pub position: u8,
    /// Ring setting; read-only, checked on restore.
    pub ring_setting: u8,
}

/// Snapshot of every rotor, rightmost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    /// Per-rotor state, index 0 being the rightmost rotor.
    pub rotors: Vec<RotorState>,
}

/// One encoded letter, reported to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    /// Symbol pressed.
    pub input: u8,
    /// Symbol lit.
    pub output: u8,
    /// Positions of the three stepping rotors after stepping, rightmost first.
    pub positions: [u8; 3],
}

/// Callback invoked after every encoded letter.
pub type KeystrokeObserver = Box<dyn FnMut(&Keystroke) + Send>;

/// Full construction parameters for a [`Machine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Rotors, rightmost (fastest) first.
    pub rotors: Vec<RotorConfig>,
    /// Reflector.
    pub reflector: ReflectorConfig,
    /// Plugboard symbol pairs.
    pub plug_pairs: Vec<(u8, u8)>,
    /// Plugboard cable cap.
    pub max_plug_pairs: usize,
}

impl MachineConfig {
    /// Starts a configuration with no rotors and an empty plugboard.
    pub fn new(reflector: ReflectorConfig) -> Self {
        MachineConfig {
            rotors: Vec::new(),
            reflector,
            plug_pairs: Vec::new(),
            max_plug_pairs: DEFAULT_MAX_PAIRS,
        }
    }

    /// Appends a rotor to the left of those already configured.
    pub fn rotor(mut self, rotor: RotorConfig) -> Self {
        self.rotors.push(rotor);
        self
    }

    /// Sets the plugboard pairs.
    pub fn plug_pairs(mut self, pairs: &[(u8, u8)]) -> Self {
        self.plug_pairs = pairs.to_vec();
        self
    }

    /// Sets the plugboard cable cap.
    pub fn max_plug_pairs(mut self, max_pairs: usize) -> Self {
        self.max_plug_pairs = max_pairs;
        self
    }

    /// Sets the plugboard pairs from text such as `"AZ GH"`.
    ///
    /// The cable cap is checked when the machine is built, so this may be
    /// called before or after [`max_plug_pairs`](Self::max_plug_pairs).
    ///
    /// # Errors
    /// Any error from [`plugboard::parse_pairs`].
    pub fn with_plugboard_text(mut self, text: &str) -> Result<Self, PlugboardError> {
        self.plug_pairs = plugboard::parse_pairs(text)?;
        Ok(self)
    }

    /// Builds the machine.
    ///
    /// # Errors
    /// See [`Machine::new`].
    pub fn build(&self) -> Result<Machine, EnigmaError> {
        Machine::new(self)
    }
}

/// A configured rotor cipher machine.
///
/// Encoding mutates rotor positions, so a machine is an ordered, stateful
/// stream: decode a message by restoring the starting state (see
/// [`state`](Self::state) and [`restore`](Self::restore)) and encoding the
/// ciphertext again.
///
/// # Examples
///
/// ```
/// use enigma_machine::{Machine, MachineConfig, ReflectorConfig, RotorConfig};
///
/// let config = MachineConfig::new(ReflectorConfig::catalogue("B").unwrap())
///     .rotor(RotorConfig::catalogue("III").unwrap())
///     .rotor(RotorConfig::catalogue("II").unwrap())
///     .rotor(RotorConfig::catalogue("I").unwrap());
/// let mut machine = Machine::new(&config).unwrap();
///
/// let start = machine.state();
/// let ciphertext = machine.encode_message("AAAAA").unwrap();
/// assert_eq!(ciphertext, "BDZGO");
///
/// machine.restore(&start).unwrap();
/// assert_eq!(machine.encode_message(&ciphertext).unwrap(), "AAAAA");
/// ```
pub struct Machine {
    rotors: Vec<Rotor>,
    reflector: Reflector,
    plugboard: Plugboard,
    observer: Option<KeystrokeObserver>,
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("rotors", &self.rotors)
            .field("reflector", &self.reflector)
            .field("plugboard", &self.plugboard)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Machine {
    /// Builds every component from `config` and assembles the machine.
    ///
    /// # Errors
    /// - [`ConfigurationError::TooFewRotors`] for fewer than 3 rotors.
    /// - Any rotor, reflector or plugboard construction error, unchanged.
    pub fn new(config: &MachineConfig) -> Result<Self, EnigmaError> {
        if config.rotors.len() < MIN_ROTORS {
            return Err(ConfigurationError::TooFewRotors(config.rotors.len()).into());
        }
        let rotors = config
            .rotors
            .iter()
            .map(Rotor::new)
            .collect::<Result<Vec<_>, _>>()?;
        let reflector = Reflector::new(&config.reflector)?;
        let plugboard = Plugboard::with_max_pairs(&config.plug_pairs, config.max_plug_pairs)?;
        Self::from_parts(rotors, reflector, plugboard).map_err(EnigmaError::from)
    }

    /// Assembles a machine from already built components.
    ///
    /// A reflector that is not an involution is accepted; encoding and
    /// decoding will then differ.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::TooFewRotors`] for fewer than 3 rotors.
    pub fn from_parts(
        rotors: Vec<Rotor>,
        reflector: Reflector,
        plugboard: Plugboard,
    ) -> Result<Self, ConfigurationError> {
        if rotors.len() < MIN_ROTORS {
            return Err(ConfigurationError::TooFewRotors(rotors.len()));
        }
        if !reflector.is_involution() {
            tracing::warn!(
                reflector = reflector.name(),
                "reflector is not an involution, ciphertext will not decode by re-encoding"
            );
        }
        tracing::debug!(
            rotors = ?rotors.iter().map(Rotor::name).collect::<Vec<_>>(),
            positions = ?rotors.iter().map(Rotor::position).collect::<Vec<_>>(),
            reflector = reflector.name(),
            plugboard = %plugboard,
            "machine assembled"
        );
        Ok(Machine {
            rotors,
            reflector,
            plugboard,
            observer: None,
        })
    }

    /// Advances the rotors for one keystroke.
    ///
    /// Notches are read on the positions left by the previous keystroke:
    /// - rotor 0 on its notch carries rotor 1;
    /// - rotor 1 on its notch steps itself and rotor 2 (the double step).
    ///
    /// Rotor 0 always steps. Rotors beyond index 2 never move.
    pub(crate) fn step_rotors(&mut self) {
        let carry_middle = self.rotors[0].is_notch_engaged();
        let double_step = self.rotors[1].is_notch_engaged();

        self.rotors[0].step();
        if carry_middle || double_step {
            self.rotors[1].step();
        }
        if double_step {
            self.rotors[2].step();
            tracing::trace!(
                middle = self.rotors[1].position(),
                left = self.rotors[2].position(),
                "middle rotor double-stepped"
            );
        }
    }

    /// Encodes one symbol, stepping the rotors first.
    ///
    /// # Parameters
    /// - `symbol`: Input symbol (0..26).
    ///
    /// # Returns
    /// The output symbol (0..26).
    ///
    /// # Errors
    /// Returns [`EncodingError::InvalidSymbol`] for `symbol >= 26`, leaving
    /// the rotors untouched.
    pub fn encode_symbol(&mut self, symbol: u8) -> Result<u8, EncodingError> {
        if !is_symbol(symbol) {
            return Err(EncodingError::InvalidSymbol(symbol));
        }
        Ok(self.encode_signal(symbol))
    }

    fn encode_signal(&mut self, symbol: u8) -> u8 {
        let mut signal = self.plugboard.traverse(symbol);
        self.step_rotors();
        for rotor in &self.rotors {
            signal = rotor.traverse(signal, Direction::Forward);
        }
        signal = self.reflector.reflect(signal);
        for rotor in self.rotors.iter().rev() {
            signal = rotor.traverse(signal, Direction::Backward);
        }
        let output = self.plugboard.traverse(signal);

        if let Some(observer) = self.observer.as_mut() {
            let keystroke = Keystroke {
                input: symbol,
                output,
                positions: [
                    self.rotors[0].position(),
                    self.rotors[1].position(),
                    self.rotors[2].position(),
                ],
            };
            observer(&keystroke);
        }
        output
    }

    /// Encodes a message.
    ///
    /// Uppercase `A`–`Z` are encoded one keystroke each. ASCII digits and
    /// whitespace are copied unchanged and do not step the rotors.
    ///
    /// # Errors
    /// Stops at the first other character (lowercase included) with
    /// [`EncodingError::Unencodable`]; the returned [`MessageError`] holds
    /// the ciphertext produced so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::{EncodingError, MachineConfig, ReflectorConfig, RotorConfig};
    ///
    /// let mut machine = MachineConfig::new(ReflectorConfig::catalogue("B").unwrap())
    ///     .rotor(RotorConfig::catalogue("III").unwrap())
    ///     .rotor(RotorConfig::catalogue("II").unwrap())
    ///     .rotor(RotorConfig::catalogue("I").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let err = machine.encode_message("AAa").unwrap_err();
    /// assert_eq!(err.ciphertext, "BD");
    /// assert_eq!(err.error, EncodingError::Unencodable { character: 'a', offset: 2 });
    /// ```
    pub fn encode_message(&mut self, text: &str) -> Result<String, MessageError> {
        let mut ciphertext = String::with_capacity(text.len());
        for (offset, character) in text.chars().enumerate() {
            if is_pass_through(character) {
                ciphertext.push(character);
                continue;
            }
            let Some(symbol) = letter_to_symbol(character) else {
                tracing::trace!(?character, offset, "unencodable character, stopping");
                return Err(MessageError {
                    ciphertext,
                    error: EncodingError::Unencodable { character, offset },
                });
            };
            let output = self.encode_signal(symbol);
            ciphertext.extend(symbol_to_letter(output));
        }
        Ok(ciphertext)
    }

    /// Captures every rotor's position and ring setting.
    pub fn state(&self) -> MachineState {
        MachineState {
            rotors: self
                .rotors
                .iter()
                .map(|rotor| RotorState {
                    position: rotor.position(),
                    ring_setting: rotor.ring_setting(),
                })
                .collect(),
        }
    }

    /// Restores rotor positions from a snapshot.
    ///
    /// The snapshot is validated in full before any rotor moves.
    ///
    /// # Errors
    /// - [`ConfigurationError::RotorCountMismatch`] if the rotor count differs.
    /// - [`ConfigurationError::InvalidPosition`] for a position `>= 26`.
    /// - [`ConfigurationError::RingSettingMismatch`] if a ring setting differs.
    pub fn restore(&mut self, state: &MachineState) -> Result<(), ConfigurationError> {
        self.check_rotor_count(state.rotors.len())?;
        for (index, (rotor, saved)) in self.rotors.iter().zip(&state.rotors).enumerate() {
            if !is_symbol(saved.position) {
                return Err(ConfigurationError::InvalidPosition(saved.position));
            }
            if saved.ring_setting != rotor.ring_setting() {
                return Err(ConfigurationError::RingSettingMismatch {
                    index,
                    expected: rotor.ring_setting(),
                    actual: saved.ring_setting,
                });
            }
        }
        for (rotor, saved) in self.rotors.iter_mut().zip(&state.rotors) {
            rotor.set_position(saved.position)?;
        }
        Ok(())
    }

    /// Current rotor positions, rightmost first.
    pub fn positions(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::position).collect()
    }

    /// Moves every rotor, rightmost first.
    ///
    /// # Errors
    /// - [`ConfigurationError::RotorCountMismatch`] if `positions` has the wrong length.
    /// - [`ConfigurationError::InvalidPosition`] for a position `>= 26`; no rotor moves.
    pub fn set_positions(&mut self, positions: &[u8]) -> Result<(), ConfigurationError> {
        self.check_rotor_count(positions.len())?;
        if let Some(&bad) = positions.iter().find(|&&p| !is_symbol(p)) {
            return Err(ConfigurationError::InvalidPosition(bad));
        }
        for (rotor, &position) in self.rotors.iter_mut().zip(positions) {
            rotor.set_position(position)?;
        }
        Ok(())
    }

    fn check_rotor_count(&self, actual: usize) -> Result<(), ConfigurationError> {
        if actual != self.rotors.len() {
            return Err(ConfigurationError::RotorCountMismatch {
                expected: self.rotors.len(),
                actual,
            });
        }
        Ok(())
    }

    /// Installs a callback invoked after every encoded letter.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&Keystroke) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the keystroke callback.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Rotors, rightmost first.
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Reflector.
    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Plugboard.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn rotor(label: &str, position: u8) -> RotorConfig {
        RotorConfig::catalogue(label).unwrap().position(position)
    }

    fn config(positions: [u8; 3]) -> MachineConfig {
        MachineConfig::new(ReflectorConfig::catalogue("B").unwrap())
            .rotor(rotor("III", positions[0]))
            .rotor(rotor("II", positions[1]))
            .rotor(rotor("I", positions[2]))
    }

    fn machine(positions: [u8; 3]) -> Machine {
        Machine::new(&config(positions)).unwrap()
    }

    #[test]
    fn test_too_few_rotors() {
        let config = MachineConfig::new(ReflectorConfig::catalogue("B").unwrap())
            .rotor(RotorConfig::catalogue("III").unwrap())
            .rotor(RotorConfig::catalogue("II").unwrap());
        assert_eq!(
            Machine::new(&config).unwrap_err(),
            EnigmaError::Configuration(ConfigurationError::TooFewRotors(2))
        );
    }

    #[test]
    fn test_component_errors_propagate() {
        let bad_rotor =
            config([0, 0, 0]).rotor(RotorConfig::catalogue("IV").unwrap().ring_setting(30));
        assert_eq!(
            Machine::new(&bad_rotor).unwrap_err(),
            EnigmaError::Configuration(ConfigurationError::InvalidRingSetting(30))
        );

        let bad_plugs = config([0, 0, 0]).plug_pairs(&[(1, 2), (2, 3)]);
        assert_eq!(
            Machine::new(&bad_plugs).unwrap_err(),
            EnigmaError::Plugboard(PlugboardError::Reused(2))
        );

        let mut bad_reflector = config([0, 0, 0]);
        bad_reflector.reflector = ReflectorConfig::new("broken", "YRUHQSLDPXNGOKMIEBFZCWVJA");
        assert_eq!(
            Machine::new(&bad_reflector).unwrap_err(),
            EnigmaError::Configuration(ConfigurationError::InvalidWiringLength(25))
        );
    }

    #[test]
    fn test_rotor_zero_always_steps() {
        let mut m = machine([0, 0, 0]);
        m.step_rotors();
        assert_eq!(m.positions(), vec![1, 0, 0]);
    }

    #[test]
    fn test_full_revolution_carries_once() {
        let mut m = machine([0, 0, 0]);
        for _ in 0..26 {
            m.step_rotors();
        }
        assert_eq!(m.positions(), vec![0, 1, 0]);
    }

    #[test]
    fn test_carry_happens_on_notch() {
        // Rotor III notch is at V (21).
        let mut m = machine([21, 0, 0]);
        m.step_rotors();
        assert_eq!(m.positions(), vec![22, 1, 0]);
    }

    #[test]
    fn test_double_step() {
        // Rotor II notch is at E (4).
        let mut m = machine([20, 4, 0]);
        m.step_rotors();
        assert_eq!(m.positions(), vec![21, 5, 1]);
        m.step_rotors();
        assert_eq!(m.positions(), vec![22, 6, 1]);
    }

    #[test]
    fn test_middle_enters_notch_then_double_steps() {
        let mut m = machine([21, 3, 0]);
        m.step_rotors();
        assert_eq!(m.positions(), vec![22, 4, 0]);
        m.step_rotors();
        assert_eq!(m.positions(), vec![23, 5, 1]);
    }

    #[test]
    fn test_left_rotor_notch_is_ignored() {
        // Rotor I notch is at Q (16); nothing sits to its left.
        let mut m = machine([0, 0, 16]);
        m.step_rotors();
        assert_eq!(m.positions(), vec![1, 0, 16]);
    }

    #[test]
    fn test_fourth_rotor_never_steps() {
        let config = MachineConfig::new(ReflectorConfig::catalogue("B-thin").unwrap())
            .rotor(RotorConfig::catalogue("III").unwrap())
            .rotor(RotorConfig::catalogue("II").unwrap())
            .rotor(RotorConfig::catalogue("I").unwrap())
            .rotor(RotorConfig::catalogue("Beta").unwrap().position(7));
        let mut m = Machine::new(&config).unwrap();
        for _ in 0..(26 * 26 * 26 + 5) {
            m.step_rotors();
            assert_eq!(m.rotors()[3].position(), 7);
        }
    }

    #[test]
    fn test_encode_symbol_rejects_out_of_range() {
        let mut m = machine([3, 4, 5]);
        assert_eq!(m.encode_symbol(26), Err(EncodingError::InvalidSymbol(26)));
        assert_eq!(m.positions(), vec![3, 4, 5]);
    }

    #[test]
    fn test_encode_symbol_never_maps_to_itself() {
        let mut m = machine([0, 0, 0]);
        for i in 0..200u32 {
            let symbol = (i % 26) as u8;
            assert_ne!(m.encode_symbol(symbol).unwrap(), symbol);
        }
    }

    #[test]
    fn test_pass_through_does_not_step() {
        let mut m = machine([0, 0, 0]);
        assert_eq!(m.encode_message("12 \t90").unwrap(), "12 \t90");
        assert_eq!(m.positions(), vec![0, 0, 0]);
    }

    #[test]
    fn test_unencodable_keeps_partial_output() {
        let mut m = machine([0, 0, 0]);
        let err = m.encode_message("AAA!AA").unwrap_err();
        assert_eq!(err.ciphertext, "BDZ");
        assert_eq!(
            err.error,
            EncodingError::Unencodable {
                character: '!',
                offset: 3
            }
        );
        assert_eq!(m.positions(), vec![3, 0, 0]);
    }

    #[test]
    fn test_state_and_restore() {
        let mut m = machine([20, 3, 0]);
        let start = m.state();
        assert_eq!(
            start.rotors[1],
            RotorState {
                position: 3,
                ring_setting: 0
            }
        );
        let first = m.encode_message("HELLOWORLD").unwrap();
        assert_ne!(m.state(), start);
        m.restore(&start).unwrap();
        assert_eq!(m.encode_message("HELLOWORLD").unwrap(), first);
    }

    #[test]
    fn test_restore_is_atomic() {
        let mut m = machine([1, 2, 3]);
        let mut state = m.state();
        state.rotors[0].position = 9;
        state.rotors[2].ring_setting = 4;
        assert_eq!(
            m.restore(&state),
            Err(ConfigurationError::RingSettingMismatch {
                index: 2,
                expected: 0,
                actual: 4
            })
        );
        assert_eq!(m.positions(), vec![1, 2, 3]);

        let mut state = m.state();
        state.rotors[1].position = 26;
        assert_eq!(
            m.restore(&state),
            Err(ConfigurationError::InvalidPosition(26))
        );

        let mut state = m.state();
        state.rotors.pop();
        assert_eq!(
            m.restore(&state),
            Err(ConfigurationError::RotorCountMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(m.positions(), vec![1, 2, 3]);
    }

    #[test]
    fn test_set_positions() {
        let mut m = machine([0, 0, 0]);
        m.set_positions(&[20, 3, 0]).unwrap();
        assert_eq!(m.encode_message("AAAAA").unwrap(), "EQIBM");
        assert_eq!(
            m.set_positions(&[1, 2, 99]),
            Err(ConfigurationError::InvalidPosition(99))
        );
        assert_eq!(m.positions(), vec![25, 5, 1]);
    }

    #[test]
    fn test_observer_sees_every_keystroke() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut m = machine([0, 0, 0]);
        m.set_observer(move |k: &Keystroke| sink.lock().unwrap().push(*k));

        m.encode_message("A1A").unwrap();
        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 2);
            assert_eq!(
                seen[0],
                Keystroke {
                    input: 0,
                    output: 1,
                    positions: [1, 0, 0]
                }
            );
            assert_eq!(seen[1].output, 3);
        }

        m.clear_observer();
        m.encode_message("A").unwrap();
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_non_involutive_reflector_is_accepted() {
        let rotors = vec![
            Rotor::from_catalogue("III", 0, 0).unwrap(),
            Rotor::from_catalogue("II", 0, 0).unwrap(),
            Rotor::from_catalogue("I", 0, 0).unwrap(),
        ];
        let reflector =
            Reflector::new(&ReflectorConfig::new("shift", "BCDEFGHIJKLMNOPQRSTUVWXYZA")).unwrap();
        let mut m = Machine::from_parts(rotors, reflector, Plugboard::empty()).unwrap();
        let start = m.state();
        let ciphertext = m.encode_message("ATTACK").unwrap();
        m.restore(&start).unwrap();
        assert_ne!(m.encode_message(&ciphertext).unwrap(), "ATTACK");
    }
}
