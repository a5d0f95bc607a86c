use std::fmt;

use serde::{Deserialize, Serialize};

use super::cigar::{ops_to_cigar, CigarOp};
use crate::error::{Result, SeqError};
use crate::util::dna::GAP;

/// 比对类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentKind {
    Local,
    Global,
    SemiGlobal,
}

/// 比对结果。两条比对串等长，且同一列不会两侧都是间隙；
/// 其余统计量（匹配数、CIGAR、identity 等）按需从比对串推导。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    aligned_seq1: String,
    aligned_seq2: String,
    score: i32,
    /// seq1 上的区间 [start1, end1)
    start1: usize,
    end1: usize,
    /// seq2 上的区间 [start2, end2)
    start2: usize,
    end2: usize,
    kind: AlignmentKind,
}

impl Alignment {
    pub(crate) fn new(
        aligned_seq1: String,
        aligned_seq2: String,
        score: i32,
        (start1, end1): (usize, usize),
        (start2, end2): (usize, usize),
        kind: AlignmentKind,
    ) -> Self {
        debug_assert_eq!(aligned_seq1.len(), aligned_seq2.len());
        Self { aligned_seq1, aligned_seq2, score, start1, end1, start2, end2, kind }
    }

    /// 得分为 0 的空比对
    pub(crate) fn empty(kind: AlignmentKind) -> Self {
        Self::new(String::new(), String::new(), 0, (0, 0), (0, 0), kind)
    }

    pub fn aligned_seq1(&self) -> &str {
        &self.aligned_seq1
    }

    pub fn aligned_seq2(&self) -> &str {
        &self.aligned_seq2
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn start1(&self) -> usize {
        self.start1
    }

    pub fn end1(&self) -> usize {
        self.end1
    }

    pub fn start2(&self) -> usize {
        self.start2
    }

    pub fn end2(&self) -> usize {
        self.end2
    }

    pub fn kind(&self) -> AlignmentKind {
        self.kind
    }

    pub fn alignment_length(&self) -> usize {
        self.aligned_seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_seq1.is_empty()
    }

    fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.aligned_seq1.bytes().zip(self.aligned_seq2.bytes())
    }

    /// 逐列操作
    pub fn ops(&self) -> Vec<CigarOp> {
        self.columns().map(|(a, b)| CigarOp::classify(a, b)).collect()
    }

    pub fn matches(&self) -> usize {
        self.columns().filter(|&(a, b)| CigarOp::classify(a, b) == CigarOp::Match).count()
    }

    pub fn mismatches(&self) -> usize {
        self.columns().filter(|&(a, b)| CigarOp::classify(a, b) == CigarOp::Mismatch).count()
    }

    pub fn gaps_seq1(&self) -> usize {
        self.aligned_seq1.bytes().filter(|&b| b == GAP).count()
    }

    pub fn gaps_seq2(&self) -> usize {
        self.aligned_seq2.bytes().filter(|&b| b == GAP).count()
    }

    pub fn total_gaps(&self) -> usize {
        self.gaps_seq1() + self.gaps_seq2()
    }

    /// 间隙游程数，两条序列分别计数
    pub fn gap_openings(&self) -> usize {
        let mut openings = 0;
        let mut in_gap1 = false;
        let mut in_gap2 = false;
        for (a, b) in self.columns() {
            let gap1 = a == GAP;
            let gap2 = b == GAP;
            if gap1 && !in_gap1 {
                openings += 1;
            }
            if gap2 && !in_gap2 {
                openings += 1;
            }
            in_gap1 = gap1;
            in_gap2 = gap2;
        }
        openings
    }

    /// matches / alignment_length，空比对为 0
    pub fn identity(&self) -> f64 {
        let len = self.alignment_length();
        if len == 0 {
            0.0
        } else {
            self.matches() as f64 / len as f64
        }
    }

    pub fn cigar(&self) -> String {
        ops_to_cigar(&self.ops())
    }

    /// 比对区间占第一条原始序列长度的比例
    pub fn coverage_seq1(&self, seq1_len: usize) -> f64 {
        coverage(self.end1 - self.start1, seq1_len)
    }

    pub fn coverage_seq2(&self, seq2_len: usize) -> f64 {
        coverage(self.end2 - self.start2, seq2_len)
    }

    /// 三行块状显示：`|` 匹配，`.` 错配，空格为间隙
    pub fn format_alignment(&self, line_width: usize) -> String {
        let width = line_width.max(1);
        let s1 = self.aligned_seq1.as_bytes();
        let s2 = self.aligned_seq2.as_bytes();
        let mut out = String::new();
        for start in (0..s1.len()).step_by(width) {
            let end = (start + width).min(s1.len());
            out.push_str("Seq1: ");
            out.push_str(&self.aligned_seq1[start..end]);
            out.push_str("\n      ");
            for i in start..end {
                out.push(match CigarOp::classify(s1[i], s2[i]) {
                    CigarOp::Match => '|',
                    CigarOp::Mismatch => '.',
                    CigarOp::Insertion | CigarOp::Deletion => ' ',
                });
            }
            out.push_str("\nSeq2: ");
            out.push_str(&self.aligned_seq2[start..end]);
            out.push_str("\n\n");
        }
        out
    }
}

fn coverage(span: usize, len: usize) -> f64 {
    if len == 0 {
        0.0
    } else {
        span as f64 / len as f64
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alignment ({:?}):", self.kind)?;
        writeln!(f, "  Score: {}", self.score)?;
        writeln!(f, "  Identity: {:.1}%", self.identity() * 100.0)?;
        writeln!(
            f,
            "  Matches: {}, Mismatches: {}, Gaps: {}",
            self.matches(),
            self.mismatches(),
            self.total_gaps()
        )?;
        writeln!(f, "  CIGAR: {}", self.cigar())?;
        writeln!(
            f,
            "  Position: seq1[{}..{}], seq2[{}..{}]",
            self.start1, self.end1, self.start2, self.end2
        )?;
        writeln!(f)?;
        write!(f, "{}", self.format_alignment(60))
    }
}

/// 两条已比对（含间隙）串的百分比一致性，取值 0..=100
pub fn percent_identity(aligned1: &[u8], aligned2: &[u8]) -> Result<f64> {
    if aligned1.len() != aligned2.len() {
        return Err(SeqError::LengthMismatch { left: aligned1.len(), right: aligned2.len() });
    }
    if aligned1.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    let matches = aligned1
        .iter()
        .zip(aligned2)
        .filter(|&(&a, &b)| CigarOp::classify(a, b) == CigarOp::Match)
        .count();
    Ok(matches as f64 / aligned1.len() as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aln(a: &str, b: &str) -> Alignment {
        Alignment::new(a.to_string(), b.to_string(), 0, (0, 4), (0, 4), AlignmentKind::Global)
    }

    #[test]
    fn counts_and_identity() {
        let a = aln("ACGT", "AGGT");
        assert_eq!(a.matches(), 3);
        assert_eq!(a.mismatches(), 1);
        assert_eq!(a.total_gaps(), 0);
        assert!((a.identity() - 0.75).abs() < f64::EPSILON);
        assert_eq!(a.cigar(), "1M1X2M");
    }

    #[test]
    fn gap_runs_per_side() {
        let a = aln("AC--GT-A", "A-TTG-CA");
        assert_eq!(a.gaps_seq1(), 3);
        assert_eq!(a.gaps_seq2(), 2);
        // seq1: runs at 2..4 and 6; seq2: runs at 1 and 5
        assert_eq!(a.gap_openings(), 4);
        assert_eq!(a.cigar(), "1M1D2I1M1D1I1M");
    }

    #[test]
    fn adjacent_runs_on_both_sides() {
        let a = aln("A-C", "AG-");
        assert_eq!(a.gap_openings(), 2);
    }

    #[test]
    fn empty_alignment() {
        let a = Alignment::empty(AlignmentKind::Local);
        assert!(a.is_empty());
        assert_eq!(a.identity(), 0.0);
        assert_eq!(a.cigar(), "");
        assert_eq!(a.gap_openings(), 0);
    }

    #[test]
    fn format_marks_columns() {
        let text = aln("AC-T", "AGGT").format_alignment(60);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Seq1: AC-T");
        assert_eq!(lines[1], "      |. |");
        assert_eq!(lines[2], "Seq2: AGGT");
    }

    #[test]
    fn format_wraps_lines() {
        let text = aln("ACGTACGT", "ACGTACGT").format_alignment(3);
        assert_eq!(text.lines().filter(|l| l.starts_with("Seq1:")).count(), 3);
    }

    #[test]
    fn coverage_of_span() {
        let a = Alignment::new("CG".into(), "CG".into(), 4, (1, 3), (0, 2), AlignmentKind::Local);
        assert!((a.coverage_seq1(4) - 0.5).abs() < f64::EPSILON);
        assert!((a.coverage_seq2(2) - 1.0).abs() < f64::EPSILON);
        assert_eq!(a.coverage_seq1(0), 0.0);
    }

    #[test]
    fn percent_identity_checks() {
        assert!((percent_identity(b"ACGT", b"ACGA").unwrap() - 75.0).abs() < 1e-9);
        assert_eq!(
            percent_identity(b"ACG", b"AC"),
            Err(SeqError::LengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(percent_identity(b"", b""), Err(SeqError::EmptySequence));
    }
}
