//! Property tests for the cipher's structural invariants.
//!
//! Machines are drawn from the catalogue with arbitrary positions, ring
//! settings and plugboards; wirings are drawn as arbitrary permutations.

use enigma_machine::catalogue::ROTORS;
use enigma_machine::{
    Direction, Machine, MachineConfig, Plugboard, ReflectorConfig, Rotor, RotorConfig, RotorWiring,
};
use proptest::prelude::*;
use proptest::sample::subsequence;

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An arbitrary permutation of the 26 symbols.
fn permutation() -> impl Strategy<Value = Vec<u8>> {
    Just((0..26u8).collect::<Vec<_>>()).prop_shuffle()
}

fn wiring_string(symbols: &[u8]) -> String {
    symbols.iter().map(|&s| (b'A' + s) as char).collect()
}

/// Disjoint plugboard pairs, between 0 and 10 of them.
fn plug_pairs() -> impl Strategy<Value = Vec<(u8, u8)>> {
    (permutation(), 0..=10usize).prop_map(|(symbols, count)| {
        symbols
            .chunks(2)
            .take(count)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    })
}

/// Three or four catalogue rotors with arbitrary positions and ring settings.
fn machine_config() -> impl Strategy<Value = MachineConfig> {
    let labels: Vec<&'static str> = ROTORS.iter().map(|spec| spec.label).collect();
    (
        subsequence(labels, 3..=4).prop_shuffle(),
        prop::collection::vec((0..26u8, 0..26u8), 4),
        plug_pairs(),
        prop::sample::select(vec!["A", "B", "C"]),
    )
        .prop_map(|(labels, settings, pairs, reflector)| {
            let mut config = MachineConfig::new(ReflectorConfig::catalogue(reflector).unwrap())
                .plug_pairs(&pairs);
            for (label, (position, ring)) in labels.into_iter().zip(settings) {
                config = config.rotor(
                    RotorConfig::catalogue(label)
                        .unwrap()
                        .position(position)
                        .ring_setting(ring),
                );
            }
            config
        })
}

fn message() -> impl Strategy<Value = String> {
    "[A-Z0-9 ]{0,80}"
}

proptest! {
    #[test]
    fn forward_then_backward_is_identity(
        symbols in permutation(),
        ring in 0..26u8,
        position in 0..26u8,
    ) {
        let config = RotorConfig::new("random", wiring_string(&symbols), &[]).position(position).ring_setting(ring);
        let rotor = Rotor::new(&config).unwrap();
        for x in 0..26u8 {
            let out = rotor.traverse(x, Direction::Forward);
            prop_assert!(out < 26);
            prop_assert_eq!(rotor.traverse(out, Direction::Backward), x);
        }
    }

    #[test]
    fn wiring_tables_are_mutual_inverses(symbols in permutation(), ring in 0..26u8) {
        let wiring = RotorWiring::new(&wiring_string(&symbols), ring).unwrap();
        for x in 0..26usize {
            prop_assert_eq!(wiring.backward()[wiring.forward()[x] as usize] as usize, x);
        }
    }

    #[test]
    fn encoding_is_self_reciprocal(config in machine_config(), plaintext in message()) {
        let mut machine = Machine::new(&config).unwrap();
        let start = machine.state();
        let ciphertext = machine.encode_message(&plaintext).unwrap();
        prop_assert_eq!(ciphertext.len(), plaintext.len());

        machine.restore(&start).unwrap();
        prop_assert_eq!(machine.encode_message(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn no_letter_encodes_to_itself(config in machine_config(), plaintext in "[A-Z]{1,60}") {
        let mut machine = Machine::new(&config).unwrap();
        let ciphertext = machine.encode_message(&plaintext).unwrap();
        for (p, c) in plaintext.chars().zip(ciphertext.chars()) {
            prop_assert_ne!(p, c);
        }
    }

    #[test]
    fn independent_machines_agree(config in machine_config(), plaintext in message()) {
        let mut first = Machine::new(&config).unwrap();
        let mut second = Machine::new(&config).unwrap();
        prop_assert_eq!(
            first.encode_message(&plaintext).unwrap(),
            second.encode_message(&plaintext).unwrap()
        );
        prop_assert_eq!(first.state(), second.state());
    }

    #[test]
    fn plugboard_is_symmetric(pairs in plug_pairs()) {
        let plugboard = Plugboard::new(&pairs).unwrap();
        for &(a, b) in &pairs {
            prop_assert_eq!(plugboard.traverse(a), b);
            prop_assert_eq!(plugboard.traverse(b), a);
        }
        for c in 0..26u8 {
            if !pairs.iter().any(|&(a, b)| a == c || b == c) {
                prop_assert_eq!(plugboard.traverse(c), c);
            }
        }
    }

    #[test]
    fn textual_plugboard_matches_structured(pairs in plug_pairs()) {
        let text: Vec<String> = pairs
            .iter()
            .map(|&(a, b)| {
                let bytes = LETTERS.as_bytes();
                format!("{}{}", bytes[a as usize] as char, bytes[b as usize] as char)
            })
            .collect();
        let parsed = Plugboard::parse(&text.join(" ")).unwrap();
        prop_assert_eq!(parsed, Plugboard::new(&pairs).unwrap());
    }

    #[test]
    fn fast_rotor_period_is_26(
        config in machine_config(),
        keys in prop::collection::vec(0..26u8, 26),
    ) {
        let mut machine = Machine::new(&config).unwrap();
        let start = machine.positions();
        for key in keys {
            machine.encode_symbol(key).unwrap();
        }
        let end = machine.positions();
        prop_assert_eq!(end[0], start[0]);
        if end.len() == 4 {
            prop_assert_eq!(end[3], start[3]);
        }
    }
}
