use nw_aligner::{
    needleman_wunsch, Alignment, NwAligner, ScoreParams, TracebackStrategy, GAP_SYMBOL,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Score-only DP over two rolling rows, written without the crate's builder.
fn reference_score(a: &[u8], b: &[u8], params: ScoreParams) -> i32 {
    let mut prev: Vec<i32> = (0..=b.len() as i32).map(|j| j * params.gap).collect();
    for (i, &x) in a.iter().enumerate() {
        let mut cur = vec![(i as i32 + 1) * params.gap; b.len() + 1];
        for (j, &y) in b.iter().enumerate() {
            let sub = if x == y { params.match_score } else { params.mismatch };
            cur[j + 1] = (prev[j] + sub)
                .max(prev[j + 1] + params.gap)
                .max(cur[j] + params.gap);
        }
        prev = cur;
    }
    prev[b.len()]
}

fn random_seq(rng: &mut ChaCha8Rng, alphabet: &[u8], max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

fn random_params(rng: &mut ChaCha8Rng) -> ScoreParams {
    ScoreParams::new(
        rng.gen_range(-3..=5),
        rng.gen_range(-5..=3),
        rng.gen_range(-5..=1),
    )
}

fn without_gaps(aligned: &[u8]) -> Vec<u8> {
    aligned.iter().copied().filter(|&c| c != GAP_SYMBOL).collect()
}

fn check_alignment(a: &[u8], b: &[u8], params: ScoreParams, alignment: &Alignment) {
    let Alignment { matrix, result } = alignment;

    assert_eq!(matrix.rows(), a.len() + 1);
    assert_eq!(matrix.cols(), b.len() + 1);
    assert_eq!(matrix.get(0, 0), 0);
    for i in 0..=a.len() {
        assert_eq!(matrix.get(i, 0), i as i32 * params.gap);
    }
    for j in 0..=b.len() {
        assert_eq!(matrix.get(0, j), j as i32 * params.gap);
    }

    assert_eq!(result.score, matrix.final_score());
    assert_eq!(result.score, reference_score(a, b, params));
    assert_eq!(result.column_score(&params), result.score as i64);

    assert_eq!(result.aligned_seq1.len(), result.aligned_seq2.len());
    assert_eq!(result.aligned_seq1.len(), result.len());
    assert_eq!(without_gaps(&result.aligned_seq1), a);
    assert_eq!(without_gaps(&result.aligned_seq2), b);
    for (x, y) in result.aligned_seq1.iter().zip(&result.aligned_seq2) {
        assert!(!(*x == GAP_SYMBOL && *y == GAP_SYMBOL), "gap-gap column");
    }
}

#[test]
fn gattaca_matches_reference() {
    let params = ScoreParams::new(2, -1, -2);
    let (matrix, result) = needleman_wunsch(b"GATTACA", b"GCATGCU", 2, -1, -2).unwrap();
    let expected = reference_score(b"GATTACA", b"GCATGCU", params);
    assert_eq!(expected, 2);
    assert_eq!(matrix.get(7, 7), expected);
    assert_eq!(result.score, expected);
    assert_eq!(result.aligned_seq1, b"GATTACA");
    assert_eq!(result.aligned_seq2, b"GCATGCU");
}

#[test]
fn degenerate_empty_first() {
    let (_, result) = needleman_wunsch(b"", b"ACGT", 2, -1, -2).unwrap();
    assert_eq!(result.aligned_seq1_str(), "----");
    assert_eq!(result.aligned_seq2_str(), "ACGT");
    assert_eq!(result.score, -8);
}

#[test]
fn identical_sequences() {
    let (_, result) = needleman_wunsch(b"ACGT", b"ACGT", 2, -1, -2).unwrap();
    assert_eq!(result.aligned_seq1_str(), "ACGT");
    assert_eq!(result.aligned_seq2_str(), "ACGT");
    assert_eq!(result.score, 8);
}

#[test]
fn random_pairs_satisfy_alignment_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(31415);
    for _ in 0..300 {
        let a = random_seq(&mut rng, b"ACGT", 24);
        let b = random_seq(&mut rng, b"ACGT", 24);
        let params = random_params(&mut rng);

        let pointers = NwAligner::new(params).align(&a, &b).unwrap();
        check_alignment(&a, &b, params, &pointers);

        let recompute = NwAligner::new(params)
            .with_strategy(TracebackStrategy::Recompute)
            .align(&a, &b)
            .unwrap();
        assert_eq!(pointers, recompute);
    }
}

#[test]
fn swapping_inputs_transposes_the_matrix() {
    let mut rng = ChaCha8Rng::seed_from_u64(2718);
    for _ in 0..100 {
        let a = random_seq(&mut rng, b"ACG", 16);
        let b = random_seq(&mut rng, b"ACG", 16);
        let params = random_params(&mut rng);
        let aligner = NwAligner::new(params);

        let forward = aligner.align(&a, &b).unwrap();
        let backward = aligner.align(&b, &a).unwrap();
        assert_eq!(forward.result.score, backward.result.score);
        for i in 0..=a.len() {
            for j in 0..=b.len() {
                assert_eq!(forward.matrix.get(i, j), backward.matrix.get(j, i));
            }
        }
    }
}

#[test]
fn swapping_inputs_swaps_a_unique_alignment() {
    let aligner = NwAligner::new(ScoreParams::new(2, -1, -2));
    let forward = aligner.align(b"GATTACA", b"GCATGCU").unwrap();
    let backward = aligner.align(b"GCATGCU", b"GATTACA").unwrap();
    assert_eq!(forward.result.aligned_seq1, backward.result.aligned_seq2);
    assert_eq!(forward.result.aligned_seq2, backward.result.aligned_seq1);
}

#[test]
fn repeated_runs_are_identical() {
    let aligner = NwAligner::new(ScoreParams::new(1, -1, -1));
    let first = aligner.align(b"ACGTTGCAAT", b"TTGCACGA").unwrap();
    for _ in 0..5 {
        assert_eq!(aligner.align(b"ACGTTGCAAT", b"TTGCACGA").unwrap(), first);
    }
}

#[test]
fn non_ascii_symbols_are_compared_bytewise() {
    let (_, result) = needleman_wunsch(&[0, 255, 7], &[0, 7], 3, -3, -1).unwrap();
    assert_eq!(result.aligned_seq1, vec![0, 255, 7]);
    assert_eq!(result.aligned_seq2, vec![0, GAP_SYMBOL, 7]);
    assert_eq!(result.score, 5);
}
