//! 两个 k-mer 频数表之间的距离 / 相似度。
//!
//! 集合度量（Jaccard）只看出现与否；向量度量（cosine、Euclidean、Bray-Curtis）
//! 在两表键的并集上取计数，缺失的键计为 0。

use std::collections::HashSet;

use rayon::prelude::*;

use super::analysis::{check_k, count_kmers};
use super::counter::KmerProfile;
use crate::error::{Result, SeqError};

fn union_keys<'a>(a: &'a impl KmerProfile, b: &'a impl KmerProfile) -> HashSet<&'a str> {
    a.counts().keys().chain(b.counts().keys()).map(String::as_str).collect()
}

#[inline]
fn count_of(p: &impl KmerProfile, kmer: &str) -> f64 {
    p.counts().get(kmer).copied().unwrap_or(0) as f64
}

/// |A∩B| / |A∪B|；并集为空时为 0
pub fn jaccard_similarity(a: &impl KmerProfile, b: &impl KmerProfile) -> f64 {
    let (small, large) = if a.counts().len() <= b.counts().len() {
        (a.counts(), b.counts())
    } else {
        (b.counts(), a.counts())
    };
    let intersection = small.keys().filter(|k| large.contains_key(*k)).count();
    let union = small.len() + large.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// 1 − |A∩B| / |A∪B|；相同集合为 0，不相交为 1，两者皆空为 0
pub fn jaccard_distance(a: &impl KmerProfile, b: &impl KmerProfile) -> f64 {
    if a.counts().is_empty() && b.counts().is_empty() {
        return 0.0;
    }
    1.0 - jaccard_similarity(a, b)
}

/// 计数向量夹角余弦；任一向量全零时为 0
pub fn cosine_similarity(a: &impl KmerProfile, b: &impl KmerProfile) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for kmer in union_keys(a, b) {
        let ca = count_of(a, kmer);
        let cb = count_of(b, kmer);
        dot += ca * cb;
        norm_a += ca * ca;
        norm_b += cb * cb;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

/// 1 − cosine；任一向量模为 0 时为 1
pub fn cosine_distance(a: &impl KmerProfile, b: &impl KmerProfile) -> f64 {
    1.0 - cosine_similarity(a, b)
}

pub fn euclidean_distance(a: &impl KmerProfile, b: &impl KmerProfile) -> f64 {
    union_keys(a, b)
        .into_iter()
        .map(|kmer| {
            let d = count_of(a, kmer) - count_of(b, kmer);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// 1 − 2·Σmin / Σ(a+b)；两者皆空时为 0
pub fn bray_curtis_dissimilarity(a: &impl KmerProfile, b: &impl KmerProfile) -> f64 {
    let mut sum_min = 0.0;
    let mut sum_total = 0.0;
    for kmer in union_keys(a, b) {
        let ca = count_of(a, kmer);
        let cb = count_of(b, kmer);
        sum_min += ca.min(cb);
        sum_total += ca + cb;
    }
    if sum_total == 0.0 {
        0.0
    } else {
        1.0 - 2.0 * sum_min / sum_total
    }
}

/// 距离度量选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Jaccard,
    Cosine,
    Euclidean,
    BrayCurtis,
}

impl Metric {
    pub fn distance(self, a: &impl KmerProfile, b: &impl KmerProfile) -> f64 {
        match self {
            Metric::Jaccard => jaccard_distance(a, b),
            Metric::Cosine => cosine_distance(a, b),
            Metric::Euclidean => euclidean_distance(a, b),
            Metric::BrayCurtis => bray_curtis_dissimilarity(a, b),
        }
    }
}

/// k-mer Jaccard 距离（直接从两条序列计算）
pub fn sequence_jaccard_distance(seq1: &[u8], seq2: &[u8], k: usize) -> Result<f64> {
    check_k(k, &[seq1, seq2])?;
    Ok(jaccard_distance(&count_kmers(seq1, k)?, &count_kmers(seq2, k)?))
}

/// 两条序列共有的 k-mer，按字典序排序
pub fn shared_kmers(seq1: &[u8], seq2: &[u8], k: usize) -> Result<Vec<String>> {
    check_k(k, &[seq1, seq2])?;
    let a = count_kmers(seq1, k)?;
    let b = count_kmers(seq2, k)?;
    let mut shared: Vec<String> = KmerProfile::counts(&a)
        .keys()
        .filter(|kmer| KmerProfile::counts(&b).contains_key(*kmer))
        .cloned()
        .collect();
    shared.sort();
    Ok(shared)
}

/// 对称距离矩阵，对角线为 0。每条序列先各自计数，再并行计算上三角。
pub fn distance_matrix<S>(seqs: &[S], k: usize, metric: Metric) -> Result<Vec<Vec<f64>>>
where
    S: AsRef<[u8]> + Sync,
{
    if seqs.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    let refs: Vec<&[u8]> = seqs.iter().map(<S as AsRef<[u8]>>::as_ref).collect();
    check_k(k, &refs)?;

    let profiles = refs
        .par_iter()
        .map(|s| count_kmers(s, k))
        .collect::<Result<Vec<_>>>()?;

    let n = profiles.len();
    log::debug!("distance_matrix: {} sequences, k = {}, {:?}", n, k, metric);
    let upper: Vec<(usize, usize, f64)> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let profiles = &profiles;
            (i + 1..n).map(move |j| (i, j, metric.distance(&profiles[i], &profiles[j])))
        })
        .collect();

    let mut matrix = vec![vec![0.0; n]; n];
    for (i, j, d) in upper {
        matrix[i][j] = d;
        matrix[j][i] = d;
    }
    Ok(matrix)
}
