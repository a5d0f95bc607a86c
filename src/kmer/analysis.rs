//! 单条序列上的 k-mer 分析：计数入口、频谱、唯一 k-mer、位置查找。
//!
//! 与 [`KMerCounter::count`] 不同，这里的入口要求 `1 <= k <= len`，
//! 否则返回 `InvalidK` / `KOutOfRange`。

use std::collections::BTreeMap;

use super::canonical::CanonicalKMerCounter;
use super::counter::KMerCounter;
use crate::error::{Result, SeqError};

pub(crate) fn check_k(k: usize, seqs: &[&[u8]]) -> Result<()> {
    if k == 0 {
        return Err(SeqError::InvalidK(k));
    }
    for s in seqs {
        if k > s.len() {
            return Err(SeqError::KOutOfRange { k, len: s.len() });
        }
    }
    Ok(())
}

/// 对一条序列计数（跳过歧义窗口）
pub fn count_kmers(seq: &[u8], k: usize) -> Result<KMerCounter> {
    check_k(k, &[seq])?;
    let mut counter = KMerCounter::new(k)?;
    counter.count(seq);
    Ok(counter)
}

/// 对一条序列做 canonical 计数
pub fn count_kmers_canonical(seq: &[u8], k: usize) -> Result<CanonicalKMerCounter> {
    check_k(k, &[seq])?;
    let mut counter = CanonicalKMerCounter::new(k)?;
    counter.count(seq);
    Ok(counter)
}

pub fn most_frequent_kmers(seq: &[u8], k: usize, n: usize) -> Result<Vec<(String, usize)>> {
    Ok(count_kmers(seq, k)?.most_frequent(n))
}

/// k-mer 频谱：`(出现次数, 具有该次数的 k-mer 种数)`，按出现次数升序
pub fn kmer_spectrum(seq: &[u8], k: usize) -> Result<Vec<(usize, usize)>> {
    let counter = count_kmers(seq, k)?;
    let mut spectrum: BTreeMap<usize, usize> = BTreeMap::new();
    for (_, count) in counter.iter() {
        *spectrum.entry(count).or_insert(0) += 1;
    }
    Ok(spectrum.into_iter().collect())
}

/// 恰好出现一次的 k-mer，按字典序
pub fn find_unique_kmers(seq: &[u8], k: usize) -> Result<Vec<String>> {
    Ok(count_kmers(seq, k)?
        .kmers_in_range(1, 1)
        .into_iter()
        .map(|(kmer, _)| kmer)
        .collect())
}

/// `kmer` 在 `seq` 中所有（可重叠）出现的起始位置，不区分大小写
pub fn kmer_positions(seq: &[u8], kmer: &str) -> Result<Vec<usize>> {
    let probe = kmer.as_bytes();
    check_k(probe.len(), &[seq])?;
    Ok(seq
        .windows(probe.len())
        .enumerate()
        .filter(|(_, w)| w.eq_ignore_ascii_case(probe))
        .map(|(i, _)| i)
        .collect())
}
