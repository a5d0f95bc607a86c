use rayon::prelude::*;

use super::alignment::Alignment;
use super::dp::DpBuffer;
use super::scoring::ScoringMatrix;
use super::smith_waterman_with_buf;
use crate::error::{Result, SeqError};

/// 将 query 与多个目标序列分别做局部对齐（rayon 并行，每个线程独立缓冲区）。
/// 返回 `(目标下标, 比对)`，顺序与 `targets` 一致。
pub fn align_against_multiple<T>(
    query: &[u8],
    targets: &[T],
    scoring: &ScoringMatrix,
) -> Result<Vec<(usize, Alignment)>>
where
    T: AsRef<[u8]> + Sync,
{
    if query.is_empty() || targets.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    log::debug!("align_against_multiple: query {} bp vs {} targets", query.len(), targets.len());

    targets
        .par_iter()
        .enumerate()
        .map_init(DpBuffer::new, |buf, (i, target)| {
            smith_waterman_with_buf(query, target.as_ref(), scoring, buf).map(|aln| (i, aln))
        })
        .collect()
}

/// 得分最高的目标；同分取下标最小者
pub fn find_best_alignment<T>(
    query: &[u8],
    targets: &[T],
    scoring: &ScoringMatrix,
) -> Result<(usize, Alignment)>
where
    T: AsRef<[u8]> + Sync,
{
    let results = align_against_multiple(query, targets, scoring)?;
    let mut best: Option<(usize, Alignment)> = None;
    for (i, aln) in results {
        if best.as_ref().map_or(true, |(_, b)| aln.score() > b.score()) {
            best = Some((i, aln));
        }
    }
    best.ok_or(SeqError::EmptySequence)
}
