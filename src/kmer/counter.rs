use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqError};
use crate::util::dna::{is_unambiguous, normalize_seq, BASES};

/// 规范化后的窗口只含 ASCII，逐字节转 char 即可
pub(crate) fn ascii_key(window: &[u8]) -> String {
    window.iter().map(|&b| char::from(b)).collect()
}

/// 只读的 k-mer 频数表视图，距离度量对两种计数器一视同仁
pub trait KmerProfile {
    fn k(&self) -> usize;
    fn counts(&self) -> &HashMap<String, usize>;
    fn total_kmers(&self) -> usize;
}

/// 定长 k-mer 频数表。
///
/// 不变量：每个键长度为 k，`total_kmers == Σ counts`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMerCounter {
    k: usize,
    counts: HashMap<String, usize>,
    total_kmers: usize,
    include_ambiguous: bool,
}

impl KMerCounter {
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(SeqError::InvalidK(k));
        }
        Ok(Self {
            k,
            counts: HashMap::new(),
            total_kmers: 0,
            include_ambiguous: false,
        })
    }

    /// 是否统计含歧义碱基（N 等）的窗口，默认跳过
    pub fn include_ambiguous(mut self, include: bool) -> Self {
        self.include_ambiguous = include;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn total_kmers(&self) -> usize {
        self.total_kmers
    }

    pub fn unique_kmers(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_kmers == 0
    }

    /// 统计 `seq` 的全部 k 长窗口；短于 k 的序列不计数
    pub fn count(&mut self, seq: &[u8]) {
        self.count_with(seq, ascii_key);
    }

    /// 公共窗口循环；`key` 把规范化后的窗口映射为计数键
    pub(crate) fn count_with(&mut self, seq: &[u8], key: impl Fn(&[u8]) -> String) {
        if seq.len() < self.k {
            return;
        }
        let before = self.total_kmers;
        let seq = normalize_seq(seq);
        for w in seq.windows(self.k) {
            if !self.include_ambiguous && !w.iter().all(|&b| is_unambiguous(b)) {
                continue;
            }
            *self.counts.entry(key(w)).or_insert(0) += 1;
            self.total_kmers += 1;
        }
        log::trace!(
            "counted {} {}-mers from {} bp",
            self.total_kmers - before,
            self.k,
            seq.len()
        );
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

    /// 并行计数：rayon fold 出局部计数器后逐个 merge
    pub fn count_parallel<S>(k: usize, seqs: &[S]) -> Result<Self>
    where
        S: AsRef<[u8]> + Sync,
    {
        let empty = Self::new(k)?;
        seqs.par_iter()
            .fold(
                || empty.clone(),
                |mut acc, s| {
                    acc.count(s.as_ref());
                    acc
                },
            )
            .map(Ok::<Self, SeqError>)
            .reduce(
                || Ok(empty.clone()),
                |a, b| {
                    let mut a = a?;
                    a.merge(&b?)?;
                    Ok(a)
                },
            )
    }

    /// 不区分大小写查询，不存在返回 0
    pub fn get(&self, kmer: &str) -> usize {
        self.counts.get(&kmer.to_ascii_uppercase()).copied().unwrap_or(0)
    }

    pub fn frequency(&self, kmer: &str) -> f64 {
        if self.total_kmers == 0 {
            return 0.0;
        }
        self.get(kmer) as f64 / self.total_kmers as f64
    }

    /// 按计数降序取前 `n` 项，同计数按 k-mer 字典序
    pub fn most_frequent(&self, n: usize) -> Vec<(String, usize)> {
        let mut entries = self.entries();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// 按计数升序取前 `n` 项，同计数按 k-mer 字典序
    pub fn least_frequent(&self, n: usize) -> Vec<(String, usize)> {
        let mut entries = self.entries();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// 按 k-mer 字典序排序的全部条目
    pub fn all_kmers(&self) -> Vec<(String, usize)> {
        let mut entries = self.entries();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// 计数落在 `min..=max` 的条目，按 k-mer 排序
    pub fn kmers_in_range(&self, min: usize, max: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .filter(|&(_, &c)| c >= min && c <= max)
            .map(|(k, &c)| (k.clone(), c))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    fn entries(&self) -> Vec<(String, usize)> {
        self.counts.iter().map(|(k, &c)| (k.clone(), c)).collect()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.total_kmers = 0;
    }

    pub fn merge(&mut self, other: &KMerCounter) -> Result<()> {
        if self.k != other.k {
            return Err(SeqError::KMerMismatch { left: self.k, right: other.k });
        }
        for (kmer, &count) in &other.counts {
            *self.counts.entry(kmer.clone()).or_insert(0) += count;
        }
        self.total_kmers += other.total_kmers;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, &c)| (k.as_str(), c))
    }

    /// k-mer 分布的 Shannon 熵（bit）
    pub fn entropy(&self) -> f64 {
        if self.total_kmers == 0 {
            return 0.0;
        }
        let total = self.total_kmers as f64;
        self.counts
            .values()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum()
    }

    /// 4^k，k 过大时饱和为 `usize::MAX`
    pub fn expected_unique_kmers(&self) -> usize {
        u32::try_from(self.k)
            .ok()
            .and_then(|k| 4usize.checked_pow(k))
            .unwrap_or(usize::MAX)
    }

    /// Observed fraction of all possible k-mers.
    pub fn saturation(&self) -> f64 {
        self.unique_kmers() as f64 / self.expected_unique_kmers() as f64
    }
}

impl KmerProfile for KMerCounter {
    fn k(&self) -> usize {
        self.k
    }

    fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    fn total_kmers(&self) -> usize {
        self.total_kmers
    }
}

/// 按字典序生成全部 4^k 个 k-mer；k = 0 时返回一个空串
pub fn generate_all_kmers(k: usize) -> Vec<String> {
    let mut kmers = vec![String::new()];
    for _ in 0..k {
        let mut next = Vec::with_capacity(kmers.len() * BASES.len());
        for prefix in &kmers {
            for &b in &BASES {
                let mut s = String::with_capacity(k);
                s.push_str(prefix);
                s.push(char::from(b));
                next.push(s);
            }
        }
        kmers = next;
    }
    kmers
}
