use std::{array, fmt, str::FromStr};

use rand::Rng;

use crate::{CHROMOSOME_LENGTH, X_BITS};

/// A single candidate solution: an immutable 6-bit chromosome.
///
/// Bits are stored as `bool`s; the `0`/`1` text form is only produced by [`Display`]
/// and accepted by [`FromStr`].
///
/// ```
/// use bitmin_engine::Individual;
///
/// let individual: Individual = "011010".parse().unwrap();
/// assert_eq!(individual.decode(), (3, 2));
/// assert_eq!(individual.to_string(), "011010");
/// ```
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Individual {
    genes: [bool; CHROMOSOME_LENGTH],
}

/// Error returned when parsing a chromosome from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidChromosomeError {
    #[display("chromosome must have exactly 6 bits, got {len}")]
    WrongLength { len: usize },
    #[display("invalid bit {found:?} at position {index}")]
    InvalidBit { index: usize, found: char },
}

impl Individual {
    /// The chromosome `000000`, which decodes to the global minimum.
    pub const OPTIMUM: Self = Self::from_genes([false; CHROMOSOME_LENGTH]);

    #[must_use]
    pub const fn from_genes(genes: [bool; CHROMOSOME_LENGTH]) -> Self {
        Self { genes }
    }

    /// Creates an individual whose bits are independently uniform.
    #[must_use]
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            genes: array::from_fn(|_| rng.random()),
        }
    }

    #[must_use]
    pub fn genes(&self) -> &[bool; CHROMOSOME_LENGTH] {
        &self.genes
    }

    /// Decodes the chromosome into its `(x, y)` coordinates.
    #[must_use]
    pub fn decode(&self) -> (u32, u32) {
        let (x, y) = self.genes.split_at(X_BITS);
        (decode_bits(x), decode_bits(y))
    }

    /// Returns the individual with every bit flipped.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self {
            genes: self.genes.map(|bit| !bit),
        }
    }
}

/// Reads bits as an unsigned integer, most significant bit first.
fn decode_bits(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.genes {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Individual {
    type Err = InvalidChromosomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != CHROMOSOME_LENGTH {
            return Err(InvalidChromosomeError::WrongLength { len });
        }
        let mut genes = [false; CHROMOSOME_LENGTH];
        for (index, (gene, found)) in genes.iter_mut().zip(s.chars()).enumerate() {
            *gene = match found {
                '0' => false,
                '1' => true,
                _ => return Err(InvalidChromosomeError::InvalidBit { index, found }),
            };
        }
        Ok(Self { genes })
    }
}
