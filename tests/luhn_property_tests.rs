mod common;

use checkout_wizard::domain::format::format_card_number;
use checkout_wizard::domain::validation::{FieldError, luhn_checksum_valid, validate_card_number};
use common::luhn_valid_number;
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_generated_numbers_pass_for_every_length() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in 13..=19 {
        for _ in 0..200 {
            let number = luhn_valid_number(&mut rng, len);
            assert_eq!(number.len(), len);
            assert_eq!(validate_card_number(&number), Ok(()), "{number}");
        }
    }
}

#[test]
fn test_single_digit_mutation_is_detected() {
    let mut rng = StdRng::seed_from_u64(42);
    for len in 13..=19 {
        for _ in 0..50 {
            let number = luhn_valid_number(&mut rng, len);
            let position = rng.gen_range(0..len);
            let original = number.as_bytes()[position] - b'0';
            let replacement = (original + rng.gen_range(1..10)) % 10;

            let mut mutated = number.clone().into_bytes();
            mutated[position] = b'0' + replacement;
            let mutated = String::from_utf8(mutated).unwrap();

            assert!(!luhn_checksum_valid(&mutated), "{number} -> {mutated}");
            assert_eq!(
                validate_card_number(&mutated),
                Err(FieldError::CardNumberInvalid)
            );
        }
    }
}

#[test]
fn test_known_test_numbers() {
    assert_eq!(validate_card_number("4539148803436467"), Ok(()));
    assert_eq!(
        validate_card_number("4539148803436468"),
        Err(FieldError::CardNumberInvalid)
    );
    assert_eq!(validate_card_number("4111111111111111"), Ok(()));
}

#[test]
fn test_formatting_is_idempotent_on_random_input() {
    let mut rng = StdRng::seed_from_u64(3);
    let alphabet: Vec<char> = "0123456789 -/abc".chars().collect();
    for _ in 0..500 {
        let len = rng.gen_range(0..30);
        let input: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        let once = format_card_number(&input);
        assert_eq!(format_card_number(&once), once, "input: {input:?}");
    }
}
