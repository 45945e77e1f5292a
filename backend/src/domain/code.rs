//! Access code generation and format validation.

use chrono::Utc;
use rand::Rng;

/// Access codes are always exactly this many ASCII digits.
pub const CODE_LENGTH: usize = 10;

/// Generate a 10-digit access code.
///
/// Construction: the last 5 digits of the current millisecond timestamp,
/// followed by a zero-padded uniform random number in [0, 99999]. Two calls
/// within the same millisecond can collide if the random suffixes match;
/// uniqueness is probabilistic, not enforced (see DESIGN.md).
pub fn generate_code() -> String {
    let millis = Utc::now().timestamp_millis();
    let timestamp_part = millis.rem_euclid(100_000);
    format!("{:05}{:05}", timestamp_part, random_suffix())
}

/// Uniform draw of the 5-digit random component.
fn random_suffix() -> u32 {
    rand::thread_rng().gen_range(0..100_000)
}

/// Returns true iff `s` is exactly 10 ASCII decimal digits.
///
/// Called before any store lookup so malformed input gets its own error
/// without a wasted round-trip.
pub fn is_valid_code_format(s: &str) -> bool {
    s.len() == CODE_LENGTH && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_format_accepts_ten_digits() {
        assert!(is_valid_code_format("0123456789"));
        assert!(is_valid_code_format("0000000000"));
        assert!(is_valid_code_format("9999999999"));
    }

    #[test]
    fn valid_format_rejects_wrong_length() {
        assert!(!is_valid_code_format(""));
        assert!(!is_valid_code_format("12345"));
        assert!(!is_valid_code_format("123456789"));
        assert!(!is_valid_code_format("12345678901"));
    }

    #[test]
    fn valid_format_rejects_non_digits() {
        assert!(!is_valid_code_format("12345abcde"));
        assert!(!is_valid_code_format(" 123456789"));
        assert!(!is_valid_code_format("123456789 "));
        assert!(!is_valid_code_format("12345-6789"));
        // Unicode digits are not ASCII digits
        assert!(!is_valid_code_format("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn generated_codes_are_ten_ascii_digits() {
        for _ in 0..1_000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
            assert!(is_valid_code_format(&code));
        }
    }

    #[test]
    fn generated_codes_are_mostly_distinct() {
        // Collisions need the same millisecond AND the same 5-digit suffix,
        // so 1000 draws should be nearly all unique. This pins the known
        // weak-uniqueness property without asserting true uniqueness.
        let codes: std::collections::HashSet<String> =
            (0..1_000).map(|_| generate_code()).collect();
        assert!(codes.len() > 990, "only {} distinct codes", codes.len());
    }

    #[test]
    fn same_millisecond_codes_collide_like_uniform_suffixes() {
        // With the timestamp prefix frozen, collisions come entirely from
        // the 5-digit suffix. 100,000 uniform draws from a space of 100,000
        // leave about 100000 * (1 - 1/e) ~ 63212 distinct values; a wide
        // band around that pins the uniform-suffix collision behavior
        // without making the test flaky.
        let prefix = "00042";
        let codes: std::collections::HashSet<String> = (0..100_000)
            .map(|_| format!("{}{:05}", prefix, random_suffix()))
            .collect();

        assert!(
            codes.len() > 60_000 && codes.len() < 66_500,
            "{} distinct codes, outside the uniform-suffix band",
            codes.len()
        );
        // Same-millisecond collisions do happen; uniqueness is probabilistic
        assert!(codes.len() < 100_000);
        assert!(codes.iter().all(|c| is_valid_code_format(c)));
    }

    #[test]
    fn random_suffix_stays_in_range() {
        for _ in 0..1_000 {
            let code = generate_code();
            let suffix: u32 = code[5..].parse().unwrap();
            assert!(suffix < 100_000);
        }
    }
}
