//! CPF (Brazilian taxpayer id) checksum validation.
//!
//! A CPF is nine base digits followed by two check digits. Each check digit is
//! a weighted sum modulo 11 over the digits before it; a remainder below 2
//! yields 0, anything else yields `11 - remainder`. Strings made of one
//! repeated digit satisfy the checksum but are well-known placeholders, so
//! they are rejected outright.

const FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

pub const CPF_LEN: usize = 11;

/// Returns `true` when `cpf` is eleven ASCII digits with matching check digits.
pub fn validate(cpf: &str) -> bool {
    let bytes = cpf.as_bytes();
    if bytes.len() != CPF_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let digits: Vec<u8> = bytes.iter().map(|b| b - b'0').collect();

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let mut base = [0u8; 9];
    base.copy_from_slice(&digits[..9]);
    check_digits(&base) == [digits[9], digits[10]]
}

/// Computes both check digits for a nine-digit base.
pub fn check_digits(base: &[u8; 9]) -> [u8; 2] {
    let first = check_digit(base, &FIRST_WEIGHTS);

    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;
    let second = check_digit(&extended, &SECOND_WEIGHTS);

    [first, second]
}

fn check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, &w)| u32::from(d) * w)
        .sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => (11 - r) as u8,
    }
}
