use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqError};

/// 打分参数：匹配得分为正，其余罚分 ≤ 0。
///
/// 字段只能通过校验过的构造函数写入；反序列化同样会重新校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScoring")]
pub struct ScoringMatrix {
    match_score: i32,
    mismatch_penalty: i32,
    gap_open_penalty: i32,
    gap_extend_penalty: i32,
}

#[derive(Deserialize)]
struct RawScoring {
    match_score: i32,
    mismatch_penalty: i32,
    gap_open_penalty: i32,
    gap_extend_penalty: i32,
}

impl TryFrom<RawScoring> for ScoringMatrix {
    type Error = SeqError;

    fn try_from(raw: RawScoring) -> Result<Self> {
        ScoringMatrix::with_affine_gaps(
            raw.match_score,
            raw.mismatch_penalty,
            raw.gap_open_penalty,
            raw.gap_extend_penalty,
        )
    }
}

impl Default for ScoringMatrix {
    /// match=2, mismatch=-1, gap_open=-2, gap_extend=-1
    fn default() -> Self {
        Self {
            match_score: 2,
            mismatch_penalty: -1,
            gap_open_penalty: -2,
            gap_extend_penalty: -1,
        }
    }
}

impl ScoringMatrix {
    /// 单一间隙代价：open 与 extend 都取 `gap_penalty`
    pub fn new(match_score: i32, mismatch_penalty: i32, gap_penalty: i32) -> Result<Self> {
        Self::with_affine_gaps(match_score, mismatch_penalty, gap_penalty, gap_penalty)
    }

    pub fn with_affine_gaps(
        match_score: i32,
        mismatch_penalty: i32,
        gap_open_penalty: i32,
        gap_extend_penalty: i32,
    ) -> Result<Self> {
        if match_score <= 0 {
            return Err(SeqError::InvalidScoringMatrix(format!(
                "match score must be positive, got {}",
                match_score
            )));
        }
        for (name, value) in [
            ("mismatch penalty", mismatch_penalty),
            ("gap open penalty", gap_open_penalty),
            ("gap extend penalty", gap_extend_penalty),
        ] {
            if value > 0 {
                return Err(SeqError::InvalidScoringMatrix(format!(
                    "{} must be <= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            match_score,
            mismatch_penalty,
            gap_open_penalty,
            gap_extend_penalty,
        })
    }

    /// 严格打分：match=5, mismatch=-4, gap_open=-10, gap_extend=-1
    pub fn stringent() -> Self {
        Self {
            match_score: 5,
            mismatch_penalty: -4,
            gap_open_penalty: -10,
            gap_extend_penalty: -1,
        }
    }

    pub fn match_score(&self) -> i32 {
        self.match_score
    }

    pub fn mismatch_penalty(&self) -> i32 {
        self.mismatch_penalty
    }

    pub fn gap_open_penalty(&self) -> i32 {
        self.gap_open_penalty
    }

    pub fn gap_extend_penalty(&self) -> i32 {
        self.gap_extend_penalty
    }

    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }

    /// 所有 DP 递推使用的单位间隙代价
    #[inline]
    pub fn linear_gap_penalty(&self) -> i32 {
        self.gap_open_penalty
    }

    /// 长度为 `length` 的整段间隙代价；长度 0 时为 0
    pub fn affine_gap_penalty(&self, length: usize) -> i32 {
        if length == 0 {
            return 0;
        }
        self.gap_open_penalty + (length as i32 - 1) * self.gap_extend_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let s = ScoringMatrix::default();
        assert_eq!(s.match_score(), 2);
        assert_eq!(s.mismatch_penalty(), -1);
        assert_eq!(s.gap_open_penalty(), -2);
        assert_eq!(s.gap_extend_penalty(), -1);
    }

    #[test]
    fn score_is_symbol_equality() {
        let s = ScoringMatrix::default();
        assert_eq!(s.score(b'A', b'A'), 2);
        assert_eq!(s.score(b'A', b'T'), -1);
        assert_eq!(s.score(b'N', b'N'), 2);
    }

    #[test]
    fn gap_costs() {
        let s = ScoringMatrix::with_affine_gaps(2, -1, -5, -1).unwrap();
        assert_eq!(s.linear_gap_penalty(), -5);
        assert_eq!(s.affine_gap_penalty(0), 0);
        assert_eq!(s.affine_gap_penalty(1), -5);
        assert_eq!(s.affine_gap_penalty(4), -8);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            ScoringMatrix::new(0, -1, -2),
            Err(SeqError::InvalidScoringMatrix(_))
        ));
        assert!(ScoringMatrix::new(2, 1, -2).is_err());
        assert!(ScoringMatrix::new(2, -1, 3).is_err());
        assert!(ScoringMatrix::with_affine_gaps(2, -1, -2, 1).is_err());
        // zero penalties are allowed
        assert!(ScoringMatrix::new(1, 0, 0).is_ok());
    }

    #[test]
    fn stringent_preset_is_valid() {
        let s = ScoringMatrix::stringent();
        let again = ScoringMatrix::with_affine_gaps(
            s.match_score(),
            s.mismatch_penalty(),
            s.gap_open_penalty(),
            s.gap_extend_penalty(),
        )
        .unwrap();
        assert_eq!(s, again);
    }
}
