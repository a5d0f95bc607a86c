//! # seqcore
//!
//! 双序列比对与 k-mer 频数分析的核心库。
//!
//! 本 crate 提供：
//!
//! - **序列比对**：Smith-Waterman 局部对齐、Needleman-Wunsch 全局对齐、半全局对齐、带状局部对齐
//! - **距离标量**：编辑距离、Hamming 距离、仅计算得分的 O(n) 空间局部对齐
//! - **k-mer 计数**：定长 k-mer 频数表、canonical（链无关）计数、并行计数
//! - **频数表距离**：Jaccard、cosine、Euclidean、Bray-Curtis
//!
//! 序列以 `&[u8]`（ASCII 符号）传入，字母表校验由调用方负责。
//!
//! ## 快速示例
//!
//! ```rust
//! use seqcore::align::{smith_waterman, ScoringMatrix};
//! use seqcore::kmer::{jaccard_distance, KMerCounter};
//!
//! let scoring = ScoringMatrix::new(2, -1, -2)?;
//! let aln = smith_waterman(b"ACGTACGT", b"CGTACG", &scoring)?;
//! println!("score={} cigar={}", aln.score(), aln.cigar());
//!
//! let mut a = KMerCounter::new(3)?;
//! a.count(b"ATGATGATG");
//! let mut b = KMerCounter::new(3)?;
//! b.count(b"ATGATGCCC");
//! println!("jaccard distance = {:.3}", jaccard_distance(&a, &b));
//! # Ok::<(), seqcore::SeqError>(())
//! ```
//!
//! ## 模块说明
//!
//! - [`align`] — 打分矩阵、DP 填充与回溯、比对结果、CIGAR、批量比对
//! - [`kmer`] — k-mer 计数、反向互补与 canonical 形式、距离度量
//! - [`util`] — DNA 互补 / 反向互补等工具函数
//! - [`error`] — 错误类型

pub mod align;
pub mod error;
pub mod kmer;
pub mod util;

pub use align::{
    alignment_score_only, banded_smith_waterman, edit_distance, hamming_distance,
    needleman_wunsch, semi_global_alignment, smith_waterman, Alignment, AlignmentEngine,
    AlignmentKind, ScoringMatrix,
};
pub use error::{Result, SeqError};
pub use kmer::{
    canonical_kmer, cosine_distance, euclidean_distance, jaccard_distance, CanonicalKMerCounter,
    KMerCounter,
};
