use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::counter::{ascii_key, KMerCounter, KmerProfile};
use crate::error::Result;
use crate::util::dna;

/// 反向互补（大写输出；歧义符号映射为自身，非 ASCII 字符记为 N）
pub fn reverse_complement(kmer: &str) -> String {
    kmer.chars()
        .rev()
        .map(|c| if c.is_ascii() { char::from(dna::complement(c as u8)) } else { 'N' })
        .collect()
}

/// k-mer 与其反向互补中字典序较小者
pub fn canonical_kmer(kmer: &str) -> String {
    let upper = kmer.to_ascii_uppercase();
    let rc = reverse_complement(&upper);
    if upper <= rc {
        upper
    } else {
        rc
    }
}

fn canonical_bytes(window: &[u8]) -> String {
    let rc = dna::revcomp(window);
    ascii_key(if window <= rc.as_slice() { window } else { rc.as_slice() })
}

/// 链无关的 k-mer 计数：正反两条链上的同一 k-mer 计入同一个 canonical 键。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalKMerCounter {
    inner: KMerCounter,
}

impl CanonicalKMerCounter {
    pub fn new(k: usize) -> Result<Self> {
        Ok(Self { inner: KMerCounter::new(k)? })
    }

    pub fn include_ambiguous(self, include: bool) -> Self {
        Self { inner: self.inner.include_ambiguous(include) }
    }

    pub fn k(&self) -> usize {
        self.inner.k()
    }

    pub fn count(&mut self, seq: &[u8]) {
        self.inner.count_with(seq, canonical_bytes);
    }

    pub fn count_all<I, S>(&mut self, seqs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        for s in seqs {
            self.count(s.as_ref());
        }
    }

    /// 查询 canonical 形式的计数，正反方向均可传入
    pub fn get(&self, kmer: &str) -> usize {
        self.inner.get(&canonical_kmer(kmer))
    }

    pub fn frequency(&self, kmer: &str) -> f64 {
        self.inner.frequency(&canonical_kmer(kmer))
    }

    pub fn most_frequent(&self, n: usize) -> Vec<(String, usize)> {
        self.inner.most_frequent(n)
    }

    pub fn least_frequent(&self, n: usize) -> Vec<(String, usize)> {
        self.inner.least_frequent(n)
    }

    pub fn total_kmers(&self) -> usize {
        self.inner.total_kmers()
    }

    pub fn unique_kmers(&self) -> usize {
        self.inner.unique_kmers()
    }

    pub fn merge(&mut self, other: &CanonicalKMerCounter) -> Result<()> {
        self.inner.merge(&other.inner)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.inner.iter()
    }
}

impl KmerProfile for CanonicalKMerCounter {
    fn k(&self) -> usize {
        self.inner.k()
    }

    fn counts(&self) -> &HashMap<String, usize> {
        KmerProfile::counts(&self.inner)
    }

    fn total_kmers(&self) -> usize {
        self.inner.total_kmers()
    }
}
