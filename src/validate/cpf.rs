//! CPF checksum validation.
//!
//! The CPF is an 11-digit Brazilian national identifier whose last two
//! digits are check digits computed by two weighted mod-11 passes.

/// Checks a CPF candidate.
///
/// Non-digit characters are stripped first, so both `529.982.247-25` and
/// `52998224725` are accepted forms. Rejects anything that is not exactly
/// 11 digits or has all digits identical (those pass the checksum but are
/// not valid identifiers).
pub fn is_valid_cpf(candidate: &str) -> bool {
    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
}

/// Computes one check digit over a digit prefix.
///
/// Weights descend from `start_weight`; the weighted sum times 10 mod 11
/// yields the digit, with 10 and 11 mapped to 0.
fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (start_weight - i as u32))
        .sum();
    let digit = (sum * 10) % 11;
    if digit >= 10 {
        0
    } else {
        digit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf_bare_digits() {
        assert!(is_valid_cpf("52998224725"));
    }

    #[test]
    fn test_valid_cpf_formatted() {
        assert!(is_valid_cpf("529.982.247-25"));
    }

    #[test]
    fn test_all_same_digits_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(11);
            assert!(!is_valid_cpf(&cpf), "{} should be rejected", cpf);
        }
    }

    #[test]
    fn test_single_digit_mutations_rejected() {
        let valid = "52998224725";
        for pos in 0..valid.len() {
            for d in b'0'..=b'9' {
                let mut mutated = valid.as_bytes().to_vec();
                if mutated[pos] == d {
                    continue;
                }
                mutated[pos] = d;
                let mutated = String::from_utf8(mutated).unwrap();
                assert!(!is_valid_cpf(&mutated), "{} should be rejected", mutated);
            }
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247255"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn test_non_digit_garbage_rejected() {
        assert!(!is_valid_cpf("abcdefghijk"));
    }
}
