/// 无歧义碱基（字典序）
pub const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// 比对结果中的间隙符号
pub const GAP: u8 = b'-';

/// A/C/G/T（不区分大小写）之外的符号都视为歧义碱基
#[inline]
pub fn is_unambiguous(b: u8) -> bool {
    matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T')
}

/// 互补碱基；歧义符号（N 等）映射为自身（大写）
#[inline]
pub fn complement(base: u8) -> u8 {
    match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' => b'A',
        other => other,
    }
}

pub fn revcomp(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq.iter().rev() {
        out.push(complement(b));
    }
    out
}

/// 单个符号规范化：ASCII 转大写，非 ASCII 字节记为 N
#[inline]
pub fn normalize_base(b: u8) -> u8 {
    if b.is_ascii() {
        b.to_ascii_uppercase()
    } else {
        b'N'
    }
}

/// 序列规范化（见 [`normalize_base`]），输出长度与输入相同且全为 ASCII
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| normalize_base(b)).collect()
}
