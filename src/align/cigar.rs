use std::fmt::Write as _;

use crate::util::dna::GAP;

/// 比对列的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarOp {
    /// 两侧为相同的真实符号
    Match,
    /// 两侧为不同的真实符号
    Mismatch,
    /// 第一条序列为间隙
    Insertion,
    /// 第二条序列为间隙
    Deletion,
}

impl CigarOp {
    pub fn code(self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Mismatch => 'X',
            CigarOp::Insertion => 'I',
            CigarOp::Deletion => 'D',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(CigarOp::Match),
            'X' => Some(CigarOp::Mismatch),
            'I' => Some(CigarOp::Insertion),
            'D' => Some(CigarOp::Deletion),
            _ => None,
        }
    }

    /// 单列分类；同一列不会两侧都是间隙
    #[inline]
    pub fn classify(a: u8, b: u8) -> Self {
        if a == GAP {
            CigarOp::Insertion
        } else if b == GAP {
            CigarOp::Deletion
        } else if a == b {
            CigarOp::Match
        } else {
            CigarOp::Mismatch
        }
    }
}

/// 将逐列操作游程编码为 CIGAR 字符串
pub fn ops_to_cigar(ops: &[CigarOp]) -> String {
    let mut cigar = String::new();
    if ops.is_empty() {
        return cigar;
    }
    let mut cur = ops[0];
    let mut len = 1usize;
    for &op in &ops[1..] {
        if op == cur {
            len += 1;
        } else {
            let _ = write!(&mut cigar, "{}{}", len, cur.code());
            cur = op;
            len = 1;
        }
    }
    let _ = write!(&mut cigar, "{}{}", len, cur.code());
    cigar
}

/// 解析 CIGAR；无法识别的操作码与零长度项被跳过
pub fn parse_cigar(cigar: &str) -> Vec<(CigarOp, usize)> {
    let mut result = Vec::new();
    let mut num = 0usize;
    for ch in cigar.chars() {
        if let Some(d) = ch.to_digit(10) {
            num = num * 10 + d as usize;
        } else {
            if num > 0 {
                if let Some(op) = CigarOp::from_code(ch) {
                    result.push((op, num));
                }
            }
            num = 0;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_columns() {
        assert_eq!(CigarOp::classify(b'A', b'A'), CigarOp::Match);
        assert_eq!(CigarOp::classify(b'A', b'C'), CigarOp::Mismatch);
        assert_eq!(CigarOp::classify(b'-', b'C'), CigarOp::Insertion);
        assert_eq!(CigarOp::classify(b'A', b'-'), CigarOp::Deletion);
    }

    #[test]
    fn run_length_encoding() {
        use CigarOp::*;
        assert_eq!(ops_to_cigar(&[]), "");
        assert_eq!(ops_to_cigar(&[Match, Match, Match, Match]), "4M");
        assert_eq!(
            ops_to_cigar(&[Match, Match, Insertion, Match, Mismatch, Deletion, Deletion]),
            "2M1I1M1X2D"
        );
    }

    #[test]
    fn parse_back() {
        let ops = parse_cigar("12M1I3X2D");
        assert_eq!(
            ops,
            vec![
                (CigarOp::Match, 12),
                (CigarOp::Insertion, 1),
                (CigarOp::Mismatch, 3),
                (CigarOp::Deletion, 2),
            ]
        );
        assert!(parse_cigar("").is_empty());
        assert_eq!(parse_cigar("3S4M"), vec![(CigarOp::Match, 4)]);
    }
}
