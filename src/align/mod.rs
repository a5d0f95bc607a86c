//! 双序列比对：局部（Smith-Waterman）、全局（Needleman-Wunsch）、半全局、带状。
//!
//! 所有模式共用同一个线性间隙代价 [`ScoringMatrix::linear_gap_penalty`]。

pub mod alignment;
pub mod banded;
pub mod batch;
pub mod cigar;
pub mod distance;
pub mod dp;
pub mod scoring;

pub use alignment::{percent_identity, Alignment, AlignmentKind};
pub use banded::{banded_smith_waterman, banded_smith_waterman_with_buf};
pub use batch::{align_against_multiple, find_best_alignment};
pub use cigar::{ops_to_cigar, parse_cigar, CigarOp};
pub use distance::{alignment_score_only, edit_distance, hamming_distance};
pub use dp::DpBuffer;
pub use scoring::ScoringMatrix;

use crate::error::{Result, SeqError};
use dp::{align_with_buf, FillMode};

fn require_non_empty(seq1: &[u8], seq2: &[u8]) -> Result<()> {
    if seq1.is_empty() || seq2.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    Ok(())
}

/// Smith-Waterman 局部对齐
pub fn smith_waterman(seq1: &[u8], seq2: &[u8], scoring: &ScoringMatrix) -> Result<Alignment> {
    smith_waterman_with_buf(seq1, seq2, scoring, &mut DpBuffer::new())
}

pub fn smith_waterman_with_buf(
    seq1: &[u8],
    seq2: &[u8],
    scoring: &ScoringMatrix,
    buf: &mut DpBuffer,
) -> Result<Alignment> {
    require_non_empty(seq1, seq2)?;
    Ok(align_with_buf(seq1, seq2, scoring, FillMode::Local, buf))
}

/// Needleman-Wunsch 全局对齐：两条序列都被完整消耗
pub fn needleman_wunsch(seq1: &[u8], seq2: &[u8], scoring: &ScoringMatrix) -> Result<Alignment> {
    needleman_wunsch_with_buf(seq1, seq2, scoring, &mut DpBuffer::new())
}

pub fn needleman_wunsch_with_buf(
    seq1: &[u8],
    seq2: &[u8],
    scoring: &ScoringMatrix,
    buf: &mut DpBuffer,
) -> Result<Alignment> {
    require_non_empty(seq1, seq2)?;
    Ok(align_with_buf(seq1, seq2, scoring, FillMode::Global, buf))
}

/// 半全局对齐：`seq1`（如 read）必须完整出现在 `seq2`（如参考）中，
/// `seq2` 两端的间隙不计分。
pub fn semi_global_alignment(seq1: &[u8], seq2: &[u8], scoring: &ScoringMatrix) -> Alignment {
    semi_global_alignment_with_buf(seq1, seq2, scoring, &mut DpBuffer::new())
}

pub fn semi_global_alignment_with_buf(
    seq1: &[u8],
    seq2: &[u8],
    scoring: &ScoringMatrix,
    buf: &mut DpBuffer,
) -> Alignment {
    if seq1.is_empty() {
        return Alignment::empty(AlignmentKind::SemiGlobal);
    }
    align_with_buf(seq1, seq2, scoring, FillMode::SemiGlobal, buf)
}

/// 绑定一个已校验的 [`ScoringMatrix`]，提供全部比对模式。
///
/// `AlignmentEngine::default()` 使用默认打分。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentEngine {
    scoring: ScoringMatrix,
}

impl AlignmentEngine {
    pub fn new(scoring: ScoringMatrix) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> &ScoringMatrix {
        &self.scoring
    }

    pub fn local(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment> {
        smith_waterman(seq1, seq2, &self.scoring)
    }

    pub fn global(&self, seq1: &[u8], seq2: &[u8]) -> Result<Alignment> {
        needleman_wunsch(seq1, seq2, &self.scoring)
    }

    pub fn semi_global(&self, seq1: &[u8], seq2: &[u8]) -> Alignment {
        semi_global_alignment(seq1, seq2, &self.scoring)
    }

    pub fn banded(&self, seq1: &[u8], seq2: &[u8], bandwidth: usize) -> Alignment {
        banded_smith_waterman(seq1, seq2, bandwidth, &self.scoring)
    }

    pub fn score_only(&self, seq1: &[u8], seq2: &[u8]) -> Result<i32> {
        alignment_score_only(seq1, seq2, &self.scoring)
    }

    /// 复用 `buf` 执行 `kind` 比对，适合循环中批量比对
    pub fn align_with_buf(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        kind: AlignmentKind,
        buf: &mut DpBuffer,
    ) -> Result<Alignment> {
        log::debug!("align {:?}: {} x {}", kind, seq1.len(), seq2.len());
        match kind {
            AlignmentKind::Local => smith_waterman_with_buf(seq1, seq2, &self.scoring, buf),
            AlignmentKind::Global => needleman_wunsch_with_buf(seq1, seq2, &self.scoring, buf),
            AlignmentKind::SemiGlobal => {
                Ok(semi_global_alignment_with_buf(seq1, seq2, &self.scoring, buf))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple() -> ScoringMatrix {
        ScoringMatrix::new(2, -1, -2).unwrap()
    }

    #[test]
    fn sw_perfect_match() {
        let res = smith_waterman(b"ACGT", b"ACGT", &simple()).unwrap();
        assert_eq!(res.score(), 8);
        assert_eq!(res.aligned_seq1(), "ACGT");
        assert_eq!(res.aligned_seq2(), "ACGT");
        assert_eq!(res.matches(), 4);
        assert_eq!(res.total_gaps(), 0);
        assert!((res.identity() - 1.0).abs() < f64::EPSILON);
        assert_eq!(res.cigar(), "4M");
        assert_eq!(res.kind(), AlignmentKind::Local);
    }

    #[test]
    fn sw_single_mismatch() {
        let res = smith_waterman(b"ACGT", b"AGGT", &simple()).unwrap();
        // A C G T / A G G T: 3 matches, 1 mismatch
        assert_eq!(res.score(), 5);
        assert_eq!(res.cigar(), "1M1X2M");
    }

    #[test]
    fn sw_no_similarity() {
        let res = smith_waterman(b"AAAA", b"TTTT", &simple()).unwrap();
        assert_eq!(res.score(), 0);
        assert!(res.is_empty());
        assert_eq!(res.identity(), 0.0);
    }

    #[test]
    fn sw_rejects_empty() {
        assert_eq!(smith_waterman(b"", b"ACGT", &simple()), Err(SeqError::EmptySequence));
        assert_eq!(needleman_wunsch(b"ACGT", b"", &simple()), Err(SeqError::EmptySequence));
    }

    #[test]
    fn nw_with_gap() {
        let res = needleman_wunsch(b"ACGT", b"ACT", &ScoringMatrix::default()).unwrap();
        assert_eq!(res.aligned_seq1(), "ACGT");
        assert_eq!(res.aligned_seq2(), "AC-T");
        assert_eq!(res.score(), 4);
        assert_eq!(res.total_gaps(), 1);
        assert_eq!((res.start1(), res.end1()), (0, 4));
        assert_eq!((res.start2(), res.end2()), (0, 3));
    }

    #[test]
    fn nw_spans_everything() {
        let res = needleman_wunsch(b"TTTTACGT", b"ACGT", &simple()).unwrap();
        assert_eq!(res.aligned_seq1(), "TTTTACGT");
        assert_eq!(res.aligned_seq2(), "----ACGT");
        assert_eq!(res.score(), 8 - 8);
        assert_eq!(res.kind(), AlignmentKind::Global);
    }

    #[test]
    fn semi_global_empty_operands() {
        let s = simple();
        let a = semi_global_alignment(b"", b"ACGT", &s);
        assert!(a.is_empty());
        assert_eq!(a.score(), 0);
        let b = semi_global_alignment(b"ACG", b"", &s);
        assert_eq!(b.aligned_seq1(), "ACG");
        assert_eq!(b.aligned_seq2(), "---");
        assert_eq!(b.score(), -6);
    }

    #[test]
    fn semi_global_read_inside_reference() {
        let res = semi_global_alignment(b"GATTACA", b"CCCCGATTACACCCC", &simple());
        assert_eq!(res.score(), 14);
        assert_eq!(res.aligned_seq1(), "GATTACA");
        assert_eq!((res.start2(), res.end2()), (4, 11));
        assert_eq!(res.kind(), AlignmentKind::SemiGlobal);
    }

    #[test]
    fn engine_dispatch() {
        let engine = AlignmentEngine::default();
        let mut buf = DpBuffer::new();
        let local = engine
            .align_with_buf(b"ACGT", b"ACGT", AlignmentKind::Local, &mut buf)
            .unwrap();
        assert_eq!(local, engine.local(b"ACGT", b"ACGT").unwrap());
        let global = engine
            .align_with_buf(b"ACGT", b"ACT", AlignmentKind::Global, &mut buf)
            .unwrap();
        assert_eq!(global, engine.global(b"ACGT", b"ACT").unwrap());
        assert_eq!(engine.score_only(b"ACGT", b"ACGT").unwrap(), 8);
        assert_eq!(engine.banded(b"ACGT", b"ACGT", 1).score(), 8);
    }
}
