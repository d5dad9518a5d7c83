use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, BitXor, Not};

use rand::Rng;

use crate::core::error::OError;

/// A fixed-length bit string, the decision-variable encoding used throughout
/// this crate.
///
/// Bits are stored one byte per bit rather than packed: a packed bit vector
/// would make the sub-sequence views used by the `mLOTZ` slicing in
/// [`crate::benchmark::lotz`] alias into a single word, which one byte per
/// bit avoids entirely. Every byte is normalised to `{0, 1}` on construction
/// and by every mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genome(Vec<u8>);

impl Genome {
    /// Build a genome from bits that are not yet normalised to `{0, 1}`
    /// (non-zero counts as `1`).
    pub fn from_bits(bits: impl IntoIterator<Item = u8>) -> Self {
        Self(bits.into_iter().map(|b| u8::from(b != 0)).collect())
    }

    /// Generate a genome of the given length with i.i.d. uniform random bits.
    pub fn random(len: usize, rng: &mut impl Rng) -> Self {
        Self((0..len).map(|_| rng.gen_range(0u8..=1)).collect())
    }

    /// The number of bits in this genome.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow a contiguous sub-sequence of bits as a view, without copying.
    ///
    /// This is the Rust analogue of `individual::span`: a slice over the same
    /// backing storage, used to hand a slice of the genome to the mLOTZ
    /// objective without allocating.
    pub fn slice(&self, start: usize, len: usize) -> &[u8] {
        &self.0[start..start + len]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Convert the genome to an integer, treating the first bit as the most
    /// significant one.
    pub fn to_bits_be(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, &b| (acc << 1) | u64::from(b & 1))
    }

    /// Convert the genome to an integer, treating the first bit as the least
    /// significant one.
    pub fn to_bits_le(&self) -> u64 {
        self.0
            .iter()
            .enumerate()
            .fold(0u64, |acc, (k, &b)| acc | (u64::from(b & 1) << k))
    }

    fn check_same_len(&self, other: &Self, op: &str) -> Result<(), OError> {
        if self.len() != other.len() {
            return Err(OError::precondition(
                "genome",
                format!(
                    "cannot apply '{op}' to genomes of different length ({} vs {})",
                    self.len(),
                    other.len()
                ),
            ));
        }
        Ok(())
    }

    /// Bitwise AND. Returns an error if the two genomes have different
    /// lengths.
    pub fn and(&self, other: &Self) -> Result<Self, OError> {
        self.check_same_len(other, "&")?;
        Ok(Self(
            self.0.iter().zip(&other.0).map(|(a, b)| a & b).collect(),
        ))
    }

    /// Bitwise OR. Returns an error if the two genomes have different
    /// lengths.
    pub fn or(&self, other: &Self) -> Result<Self, OError> {
        self.check_same_len(other, "|")?;
        Ok(Self(
            self.0.iter().zip(&other.0).map(|(a, b)| a | b).collect(),
        ))
    }

    /// Bitwise XOR. Returns an error if the two genomes have different
    /// lengths.
    pub fn xor(&self, other: &Self) -> Result<Self, OError> {
        self.check_same_len(other, "^")?;
        Ok(Self(
            self.0.iter().zip(&other.0).map(|(a, b)| a ^ b).collect(),
        ))
    }

    /// Bitwise NOT.
    pub fn not(&self) -> Self {
        Self(self.0.iter().map(|b| 1 - b).collect())
    }

    /// Flip the bit at `index` with probability `p`, using `rng`.
    pub fn mutate_bit(&mut self, index: usize, p: f64, rng: &mut impl Rng) {
        if rng.gen_bool(p) {
            self.0[index] ^= 1;
        }
    }
}

impl std::ops::Index<usize> for Genome {
    type Output = u8;
    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl Display for Genome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{}", if *b != 0 { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// `a & b` via [`Genome::and`], panicking on a length mismatch. Provided for
/// call sites that have already checked the lengths match (e.g. property
/// tests generating equal-length operands).
impl BitAnd for &Genome {
    type Output = Genome;
    fn bitand(self, rhs: Self) -> Genome {
        self.and(rhs).expect("genomes must have the same length")
    }
}

impl BitOr for &Genome {
    type Output = Genome;
    fn bitor(self, rhs: Self) -> Genome {
        self.or(rhs).expect("genomes must have the same length")
    }
}

impl BitXor for &Genome {
    type Output = Genome;
    fn bitxor(self, rhs: Self) -> Genome {
        self.xor(rhs).expect("genomes must have the same length")
    }
}

impl Not for &Genome {
    type Output = Genome;
    fn not(self) -> Genome {
        Genome::not(self)
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn from_bits_normalises_to_01() {
        let g = Genome::from_bits([0, 5, 0, 200]);
        assert_eq!(g.as_slice(), &[0, 1, 0, 1]);
    }

    #[test]
    fn bitwise_identity_and_or_xor() {
        // (a & b) | (a ^ b) == a | b
        let a = Genome::from_bits([1, 0, 1, 1, 0]);
        let b = Genome::from_bits([0, 0, 1, 0, 1]);
        let lhs = (&(&a & &b) | &(&a ^ &b)).to_string();
        let rhs = (&a | &b).to_string();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn double_complement_is_identity() {
        let a = Genome::from_bits([1, 0, 1, 1, 0, 0, 1]);
        assert_eq!(!&!&a, a);
    }

    #[test]
    fn palindrome_be_le_agree() {
        let a = Genome::from_bits([1, 0, 1, 1, 0, 1]);
        assert_eq!(a.to_bits_be(), a.to_bits_le());
    }

    #[test]
    fn to_bits_examples() {
        let z = Genome::from_bits([1, 1, 0]);
        assert_eq!(z.to_bits_be(), 0b110);
        assert_eq!(z.to_bits_le(), 0b011);
    }

    #[test]
    fn mismatched_length_is_precondition_error() {
        let a = Genome::from_bits([1, 0]);
        let b = Genome::from_bits([1, 0, 1]);
        assert!(a.and(&b).is_err());
    }

    #[test]
    fn random_genome_has_requested_length_and_is_binary() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let g = Genome::random(37, &mut rng);
        assert_eq!(g.len(), 37);
        assert!(g.iter().all(|b| b == 0 || b == 1));
    }
}
