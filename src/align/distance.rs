use super::scoring::ScoringMatrix;
use crate::error::{Result, SeqError};

/// 只计算局部对齐最高分（不回溯），两行滚动，O(n) 空间
pub fn alignment_score_only(seq1: &[u8], seq2: &[u8], scoring: &ScoringMatrix) -> Result<i32> {
    if seq1.is_empty() || seq2.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    let n = seq2.len();
    let gap = scoring.linear_gap_penalty();
    let mut prev = vec![0i32; n + 1];
    let mut curr = vec![0i32; n + 1];
    let mut max_score = 0i32;

    for &a in seq1 {
        curr[0] = 0;
        for j in 1..=n {
            let diag = prev[j - 1] + scoring.score(a, seq2[j - 1]);
            let up = prev[j] + gap;
            let left = curr[j - 1] + gap;
            let best = 0.max(diag).max(up).max(left);
            curr[j] = best;
            if best > max_score {
                max_score = best;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    Ok(max_score)
}

/// Levenshtein 编辑距离（单位代价的替换、插入、删除）
pub fn edit_distance(seq1: &[u8], seq2: &[u8]) -> usize {
    let n = seq2.len();
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &a) in seq1.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            let cost = usize::from(a != seq2[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

pub fn hamming_distance(seq1: &[u8], seq2: &[u8]) -> Result<usize> {
    if seq1.len() != seq2.len() {
        return Err(SeqError::LengthMismatch { left: seq1.len(), right: seq2.len() });
    }
    Ok(seq1.iter().zip(seq2).filter(|(a, b)| a != b).count())
}
