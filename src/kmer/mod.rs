//! k-mer 计数、canonical 折叠、单序列分析与频数表距离。

pub mod analysis;
pub mod canonical;
pub mod counter;
pub mod distance;

pub use analysis::{
    count_kmers, count_kmers_canonical, find_unique_kmers, kmer_positions, kmer_spectrum,
    most_frequent_kmers,
};
pub use canonical::{canonical_kmer, reverse_complement, CanonicalKMerCounter};
pub use counter::{generate_all_kmers, KMerCounter, KmerProfile};
pub use distance::{
    bray_curtis_dissimilarity, cosine_distance, cosine_similarity, distance_matrix,
    euclidean_distance, jaccard_distance, jaccard_similarity, sequence_jaccard_distance,
    shared_kmers, Metric,
};
