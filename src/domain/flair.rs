//! Cosmetic values attached to gadgets at the edges of the system.
//!
//! None of these are persisted or verified later.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Names handed out when a gadget is created without one.
pub const CODENAMES: [&str; 4] = ["The Nightingale", "The Kraken", "The Phoenix", "The Shadow"];

/// Picks a codename. Repeats across calls are expected.
pub fn random_codename<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CODENAMES.choose(rng).copied().unwrap_or(CODENAMES[0])
}

/// A percentage between `0%` and `99%`.
pub fn mission_success_probability<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}%", rng.random_range(0..100u8))
}

/// Six decimal digits, never starting with zero.
pub fn confirmation_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.random_range(100_000..1_000_000u32).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_codename_comes_from_fixed_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(CODENAMES.contains(&random_codename(&mut rng)));
        }
    }

    #[test]
    fn test_probability_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let value = mission_success_probability(&mut rng);
            let number: u8 = value.strip_suffix('%').unwrap().parse().unwrap();
            assert!(number < 100);
        }
    }

    #[test]
    fn test_confirmation_code_is_six_digits() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let code = confirmation_code(&mut rng);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));
        }
    }
}
