use super::alignment::{Alignment, AlignmentKind};
use super::dp::{align_with_buf, DpBuffer, FillMode};
use super::scoring::ScoringMatrix;

/// 带状 Smith-Waterman 局部对齐：只计算 |i - j| <= bandwidth 的单元。
///
/// 两条序列长度差超过带宽时，带无法覆盖所需单元，退回到完整的局部对齐。
/// 任一输入为空时返回得分为 0 的空比对。
pub fn banded_smith_waterman(
    seq1: &[u8],
    seq2: &[u8],
    bandwidth: usize,
    scoring: &ScoringMatrix,
) -> Alignment {
    banded_smith_waterman_with_buf(seq1, seq2, bandwidth, scoring, &mut DpBuffer::new())
}

pub fn banded_smith_waterman_with_buf(
    seq1: &[u8],
    seq2: &[u8],
    bandwidth: usize,
    scoring: &ScoringMatrix,
    buf: &mut DpBuffer,
) -> Alignment {
    if seq1.is_empty() || seq2.is_empty() {
        return Alignment::empty(AlignmentKind::Local);
    }

    let diff = seq1.len().abs_diff(seq2.len());
    let mode = if diff > bandwidth {
        log::debug!(
            "banded_sw: length difference {} exceeds bandwidth {}, using full local alignment",
            diff,
            bandwidth
        );
        FillMode::Local
    } else {
        FillMode::Banded(bandwidth)
    };
    align_with_buf(seq1, seq2, scoring, mode, buf)
}
