//! 错误类型

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeqError>;

/// Input-validation failures. All are deterministic: retrying with the same
/// input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// An alignment operand has zero length.
    #[error("alignment requires non-empty sequences")]
    EmptySequence,

    /// Hamming distance (or an aligned-pair metric) on unequal lengths.
    #[error("sequence lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Non-positive match score or a positive penalty.
    #[error("invalid scoring matrix: {0}")]
    InvalidScoringMatrix(String),

    /// k must be at least 1.
    #[error("invalid k-mer size: {0}")]
    InvalidK(usize),

    /// k exceeds the length of a sequence it is applied to.
    #[error("k = {k} exceeds sequence length {len}")]
    KOutOfRange { k: usize, len: usize },

    /// Combining counters built with different k.
    #[error("cannot combine k-mer counters with k = {left} and k = {right}")]
    KMerMismatch { left: usize, right: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let e = SeqError::KOutOfRange { k: 5, len: 3 };
        assert_eq!(e.to_string(), "k = 5 exceeds sequence length 3");
        let e = SeqError::KMerMismatch { left: 2, right: 3 };
        assert!(e.to_string().contains("k = 2"));
    }
}
