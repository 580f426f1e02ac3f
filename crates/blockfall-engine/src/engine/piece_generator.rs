use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseSeedError, ShapeKind};

/// Supplies the kind of each newly spawned piece.
///
/// [`PieceGenerator`] is the normal source. Any `FnMut() -> ShapeKind`
/// closure is also a source, which is handy for scripting a fixed order:
///
/// ```
/// use blockfall_engine::{PieceSource, ShapeKind};
///
/// let mut kinds = [ShapeKind::I, ShapeKind::O].into_iter().cycle();
/// let mut source = move || kinds.next().unwrap();
///
/// assert_eq!(source.next_kind(), ShapeKind::I);
/// assert_eq!(source.next_kind(), ShapeKind::O);
/// assert_eq!(source.next_kind(), ShapeKind::I);
/// ```
pub trait PieceSource {
    fn next_kind(&mut self) -> ShapeKind;
}

impl<F> PieceSource for F
where
    F: FnMut() -> ShapeKind,
{
    fn next_kind(&mut self) -> ShapeKind {
        self()
    }
}

/// Draws piece kinds uniformly at random.
///
/// Each of the 7 kinds is equally likely on every draw, independent of the
/// previous ones.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl PieceSource for PieceGenerator {
    fn next_kind(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator. Using the same seed produces the same sequence of pieces.
/// It is written as 32 hexadecimal characters, both in serialized form and on
/// the command line.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed, PieceSource as _};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
///
/// for _ in 0..20 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        // `from_str_radix` accepts a leading sign, which is not hex.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidHex(s.to_owned()));
        }
        let num =
            u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidHex(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod piece_seed {
        use super::*;

        #[test]
        fn test_display_is_32_char_hex() {
            let seed = PieceSeed([0xab; 16]);
            assert_eq!(seed.to_string(), "ab".repeat(16));

            let seed = PieceSeed([0; 16]);
            assert_eq!(seed.to_string(), "0".repeat(32));
        }

        #[test]
        fn test_parse_roundtrip() {
            let seed: PieceSeed = rand::rng().random();
            let parsed: PieceSeed = seed.to_string().parse().unwrap();
            assert_eq!(parsed, seed);
        }

        #[test]
        fn test_parse_accepts_uppercase() {
            let seed: PieceSeed = "ABCDEF0123456789ABCDEF0123456789".parse().unwrap();
            assert_eq!(seed.to_string(), "abcdef0123456789abcdef0123456789");
        }

        #[test]
        fn test_parse_rejects_wrong_length() {
            assert_eq!(
                "abc".parse::<PieceSeed>(),
                Err(ParseSeedError::InvalidLength(3))
            );
            assert!("0".repeat(33).parse::<PieceSeed>().is_err());
        }

        #[test]
        fn test_parse_rejects_non_hex() {
            let input = format!("{}g", "0".repeat(31));
            assert_eq!(
                input.parse::<PieceSeed>(),
                Err(ParseSeedError::InvalidHex(input.clone()))
            );
            let signed = format!("+{}", "0".repeat(31));
            assert!(signed.parse::<PieceSeed>().is_err());
        }

        #[test]
        fn test_serde_uses_hex_string() {
            let seed = PieceSeed([0x11; 16]);
            let json = serde_json::to_string(&seed).unwrap();
            assert_eq!(json, format!("\"{}\"", "11".repeat(16)));
            let back: PieceSeed = serde_json::from_str(&json).unwrap();
            assert_eq!(back, seed);
        }

        #[test]
        fn test_deserialize_error_cases() {
            assert!(serde_json::from_str::<PieceSeed>("\"abc\"").is_err());
            assert!(serde_json::from_str::<PieceSeed>("123").is_err());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = rand::rng().random();
        let mut a = PieceGenerator::with_seed(seed);
        let mut b = PieceGenerator::with_seed(seed);
        let seq_a: Vec<_> = (0..100).map(|_| a.next_kind()).collect();
        let seq_b: Vec<_> = (0..100).map(|_| b.next_kind()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_generator_produces_every_kind() {
        let mut generator = PieceGenerator::with_seed(PieceSeed([3; 16]));
        let mut seen = [false; ShapeKind::LEN];
        for _ in 0..500 {
            seen[generator.next_kind().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "not every kind was drawn: {seen:?}");
    }

    #[test]
    fn test_closure_source() {
        let mut count = 0;
        let mut source = || {
            count += 1;
            ShapeKind::T
        };
        assert_eq!(source.next_kind(), ShapeKind::T);
        assert_eq!(source.next_kind(), ShapeKind::T);
        drop(source);
        assert_eq!(count, 2);
    }
}
