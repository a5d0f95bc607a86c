use anyhow::Result;

use seqcore::kmer::{
    canonical_kmer, cosine_distance, distance_matrix, generate_all_kmers, jaccard_distance,
    reverse_complement, CanonicalKMerCounter, KMerCounter, Metric,
};
use seqcore::util::dna;
use seqcore::SeqError;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_seq(len: usize, seed: u32) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            bases[(x >> 16) as usize % 4]
        })
        .collect()
}

#[test]
fn counts_dinucleotide_repeat() -> Result<()> {
    let mut c = KMerCounter::new(2)?;
    c.count(b"ATATATATAT");
    assert_eq!(c.get("AT"), 5);
    assert_eq!(c.get("TA"), 4);
    assert_eq!(c.total_kmers(), 9);
    assert_eq!(c.unique_kmers(), 2);
    assert_eq!(c.most_frequent(1), vec![("AT".to_string(), 5)]);
    Ok(())
}

#[test]
fn jaccard_self_and_disjoint() -> Result<()> {
    let mut a = KMerCounter::new(3)?;
    a.count(&make_seq(200, 5));
    assert_eq!(jaccard_distance(&a, &a), 0.0);

    let mut gc = KMerCounter::new(3)?;
    gc.count(b"GCGCGCGCGC");
    let mut at = KMerCounter::new(3)?;
    at.count(b"ATATATATAT");
    assert_eq!(jaccard_distance(&gc, &at), 1.0);
    Ok(())
}

#[test]
fn merge_rejects_different_k() -> Result<()> {
    let mut a = KMerCounter::new(3)?;
    let b = KMerCounter::new(5)?;
    assert_eq!(a.merge(&b), Err(SeqError::KMerMismatch { left: 3, right: 5 }));
    Ok(())
}

#[test]
fn canonical_form_ignores_strand() {
    assert_eq!(canonical_kmer("ATAT"), "ATAT");
    for kmer in generate_all_kmers(5) {
        let rc = reverse_complement(&kmer);
        assert_eq!(canonical_kmer(&kmer), canonical_kmer(&rc));
        assert!(canonical_kmer(&kmer) <= kmer);
    }
}

#[test]
fn parallel_count_matches_sequential() -> Result<()> {
    init_logger();
    let reads: Vec<Vec<u8>> = (0..32).map(|i| make_seq(150, i + 1)).collect();
    let mut sequential = KMerCounter::new(7)?;
    sequential.count_all(&reads);
    let parallel = KMerCounter::count_parallel(7, &reads)?;
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.total_kmers(), 32 * (150 - 7 + 1));
    Ok(())
}

#[test]
fn canonical_counts_are_strand_independent() -> Result<()> {
    let genome = make_seq(500, 42);
    let mut fwd = CanonicalKMerCounter::new(11)?;
    fwd.count(&genome);
    let mut rev = CanonicalKMerCounter::new(11)?;
    rev.count(&dna::revcomp(&genome));
    assert_eq!(fwd, rev);
    assert!(cosine_distance(&fwd, &rev).abs() < 1e-12);
    Ok(())
}

#[test]
fn ambiguous_windows_are_skipped_by_default() -> Result<()> {
    let mut strict = KMerCounter::new(3)?;
    strict.count(b"ACGNACG");
    assert_eq!(strict.total_kmers(), 2);
    assert_eq!(strict.get("ACG"), 2);

    let mut lenient = KMerCounter::new(3)?.include_ambiguous(true);
    lenient.count(b"ACGNACG");
    assert_eq!(lenient.total_kmers(), 5);
    Ok(())
}

#[test]
fn distance_matrix_of_related_sequences() -> Result<()> {
    init_logger();
    let base = make_seq(400, 8);
    let mut near = base.clone();
    for i in (0..near.len()).step_by(50) {
        near[i] = if near[i] == b'A' { b'T' } else { b'A' };
    }
    let far = make_seq(400, 999);
    let seqs = vec![base, near, far];

    for metric in [Metric::Jaccard, Metric::Cosine, Metric::Euclidean, Metric::BrayCurtis] {
        let m = distance_matrix(&seqs, 8, metric)?;
        for i in 0..3 {
            assert_eq!(m[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(m[i][j], m[j][i]);
            }
        }
        assert!(m[0][1] < m[0][2], "{:?}: {:?}", metric, m);
    }

    assert_eq!(
        distance_matrix(&seqs, 500, Metric::Jaccard),
        Err(SeqError::KOutOfRange { k: 500, len: 400 })
    );
    Ok(())
}

#[test]
fn counter_state_round_trips_through_bincode() -> Result<()> {
    let mut c = KMerCounter::new(4)?;
    c.count(&make_seq(100, 3));
    let bytes = bincode::serialize(&c)?;
    let back: KMerCounter = bincode::deserialize(&bytes)?;
    assert_eq!(back, c);
    Ok(())
}
