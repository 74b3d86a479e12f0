//! Plugboard: symmetric letter swaps applied on entry and exit.

use std::str::FromStr;

use crate::error::PlugboardError;
use crate::utils::alphabet::{is_symbol, letter_to_symbol, symbol_to_letter, ALPHABET_SIZE};

/// Default number of cables (the Wehrmacht issue).
pub const DEFAULT_MAX_PAIRS: usize = 10;

/// Largest cap accepted by [`Plugboard::with_max_pairs`].
pub const ABSOLUTE_MAX_PAIRS: usize = 13;

/// Symmetric partial substitution over the 26 symbols.
///
/// Unlisted symbols map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    mapping: [u8; ALPHABET_SIZE],
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::empty()
    }
}

impl Plugboard {
    /// A plugboard with no cables.
    pub fn empty() -> Self {
        let mut mapping = [0u8; ALPHABET_SIZE];
        for (symbol, entry) in mapping.iter_mut().enumerate() {
            *entry = symbol as u8;
        }
        Plugboard { mapping }
    }

    /// Builds a plugboard from symbol pairs with the default cap of 10.
    ///
    /// # Errors
    /// See [`with_max_pairs`](Self::with_max_pairs).
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::Plugboard;
    ///
    /// let plugboard = Plugboard::new(&[(0, 25), (7, 12)]).unwrap();
    /// assert_eq!(plugboard.traverse(0), 25);
    /// assert_eq!(plugboard.traverse(12), 7);
    /// assert_eq!(plugboard.traverse(1), 1);
    ///
    /// assert!(Plugboard::new(&[(0, 25), (0, 24)]).is_err());
    /// ```
    pub fn new(pairs: &[(u8, u8)]) -> Result<Self, PlugboardError> {
        Self::with_max_pairs(pairs, DEFAULT_MAX_PAIRS)
    }

    /// Builds a plugboard from symbol pairs with a custom cap.
    ///
    /// # Parameters
    /// - `pairs`: Symbol pairs (0..26).
    /// - `max_pairs`: Largest number of pairs accepted (at most 13).
    ///
    /// # Errors
    /// - [`PlugboardError::CapTooLarge`] if `max_pairs > 13`.
    /// - [`PlugboardError::TooManyPairs`] if `pairs.len() > max_pairs`.
    /// - [`PlugboardError::SelfPair`] for a pair of two equal symbols.
    /// - [`PlugboardError::OutOfRange`] for a symbol `>= 26`.
    /// - [`PlugboardError::Reused`] for a symbol already in an earlier pair.
    pub fn with_max_pairs(pairs: &[(u8, u8)], max_pairs: usize) -> Result<Self, PlugboardError> {
        if max_pairs > ABSOLUTE_MAX_PAIRS {
            return Err(PlugboardError::CapTooLarge {
                requested: max_pairs,
                max: ABSOLUTE_MAX_PAIRS,
            });
        }
        if pairs.len() > max_pairs {
            return Err(PlugboardError::TooManyPairs {
                count: pairs.len(),
                max: max_pairs,
            });
        }

        let mut plugboard = Self::empty();
        for &(a, b) in pairs {
            if a == b {
                return Err(PlugboardError::SelfPair(a));
            }
            for symbol in [a, b] {
                if !is_symbol(symbol) {
                    return Err(PlugboardError::OutOfRange(symbol));
                }
                if plugboard.is_plugged(symbol) {
                    return Err(PlugboardError::Reused(symbol));
                }
            }
            plugboard.mapping[a as usize] = b;
            plugboard.mapping[b as usize] = a;
        }
        Ok(plugboard)
    }

    /// Parses space-separated two-letter groups, e.g. `"AZ GH"`.
    ///
    /// An empty or all-whitespace string gives an empty plugboard.
    ///
    /// # Errors
    /// Any error from [`parse_pairs`] or [`Plugboard::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::Plugboard;
    ///
    /// let plugboard = Plugboard::parse("AZ GH").unwrap();
    /// assert_eq!(plugboard.pairs(), vec![(0, 25), (6, 7)]);
    /// assert!(Plugboard::parse("AZ ZG").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, PlugboardError> {
        Self::parse_with_max_pairs(text, DEFAULT_MAX_PAIRS)
    }

    /// Parses a textual plugboard with a custom cap.
    ///
    /// # Errors
    /// Any error from [`parse_pairs`] or [`Plugboard::with_max_pairs`].
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_machine::Plugboard;
    ///
    /// let text = "AN BO CP DQ ER FS GT HU IV JW KX LY";
    /// assert!(Plugboard::parse(text).is_err());
    /// assert_eq!(Plugboard::parse_with_max_pairs(text, 12).unwrap().len(), 12);
    /// ```
    pub fn parse_with_max_pairs(text: &str, max_pairs: usize) -> Result<Self, PlugboardError> {
        Self::with_max_pairs(&parse_pairs(text)?, max_pairs)
    }

    /// Passes a signal through the plugboard.
    pub fn traverse(&self, signal: u8) -> u8 {
        self.mapping[signal as usize % ALPHABET_SIZE]
    }

    /// Returns `true` if `symbol` has a cable in it.
    pub fn is_plugged(&self, symbol: u8) -> bool {
        is_symbol(symbol) && self.mapping[symbol as usize] != symbol
    }

    /// Configured pairs, lower symbol first, ordered by lower symbol.
    pub fn pairs(&self) -> Vec<(u8, u8)> {
        self.mapping
            .iter()
            .enumerate()
            .filter(|&(a, &b)| (a as u8) < b)
            .map(|(a, &b)| (a as u8, b))
            .collect()
    }

    /// Number of cables.
    pub fn len(&self) -> usize {
        self.pairs().len()
    }

    /// Returns `true` if no cable is plugged.
    pub fn is_empty(&self) -> bool {
        (0..ALPHABET_SIZE as u8).all(|symbol| !self.is_plugged(symbol))
    }
}

impl FromStr for Plugboard {
    type Err = PlugboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Plugboard {
    /// Formats as space-separated letter pairs, the inverse of [`Plugboard::parse`].
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let groups: Vec<String> = self
            .pairs()
            .into_iter()
            .filter_map(|(a, b)| Some(format!("{}{}", symbol_to_letter(a)?, symbol_to_letter(b)?)))
            .collect();
        write!(f, "{}", groups.join(" "))
    }
}

/// Tokenizes a textual plugboard into symbol pairs.
///
/// Groups are separated by whitespace and must be exactly two uppercase
/// letters. Letters repeated across groups or within one group are
/// rejected here, mirroring [`Plugboard::new`]. The configured cap is
/// applied later by [`Plugboard::with_max_pairs`]; only the hard limit
/// of 13 pairs is checked here.
///
/// # Errors
/// - [`PlugboardError::MalformedPair`] for a group that is not two characters.
/// - [`PlugboardError::InvalidLetter`] for a character outside `A`–`Z`.
/// - [`PlugboardError::SelfPair`] / [`PlugboardError::Reused`] for repeated letters.
/// - [`PlugboardError::TooManyPairs`] for more than 13 groups.
pub fn parse_pairs(text: &str) -> Result<Vec<(u8, u8)>, PlugboardError> {
    let groups: Vec<&str> = text.split_whitespace().collect();
    if groups.len() > ABSOLUTE_MAX_PAIRS {
        return Err(PlugboardError::TooManyPairs {
            count: groups.len(),
            max: ABSOLUTE_MAX_PAIRS,
        });
    }

    let mut occupied = [false; ALPHABET_SIZE];
    let mut pairs = Vec::with_capacity(groups.len());
    for group in groups {
        let letters: Vec<char> = group.chars().collect();
        let [first, second] = letters[..] else {
            return Err(PlugboardError::MalformedPair(group.to_string()));
        };
        let a = letter_to_symbol(first).ok_or(PlugboardError::InvalidLetter(first))?;
        let b = letter_to_symbol(second).ok_or(PlugboardError::InvalidLetter(second))?;
        if a == b {
            return Err(PlugboardError::SelfPair(a));
        }
        for symbol in [a, b] {
            if occupied[symbol as usize] {
                return Err(PlugboardError::Reused(symbol));
            }
            occupied[symbol as usize] = true;
        }
        pairs.push((a, b));
    }
    Ok(pairs)
}
