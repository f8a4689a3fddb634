use std::collections::HashSet;

use proptest::prelude::*;

use pairalign::aligner::scoring::{GapLinear, ScoringFunction};
use pairalign::aligner::{align, AlignmentEngine, AlignmentMode, Global, Local};

fn dna() -> impl Strategy<Value = String> {
    "[ACGT]{1,12}"
}

proptest! {
    #[test]
    fn test_score_symmetric(a in dna(), b in dna()) {
        let scoring = GapLinear::default();

        for mode in [AlignmentMode::Global, AlignmentMode::Local] {
            let (ab, _) = align(mode, &a, &b, scoring, 1).unwrap();
            let (ba, _) = align(mode, &b, &a, scoring, 1).unwrap();
            prop_assert_eq!(ab, ba);
        }
    }

    #[test]
    fn test_global_never_beats_local(a in dna(), b in dna()) {
        let (global, _) = align(AlignmentMode::Global, &a, &b, GapLinear::default(), 1).unwrap();
        let (local, _) = align(AlignmentMode::Local, &a, &b, GapLinear::default(), 1).unwrap();
        prop_assert!(global <= local);
    }

    #[test]
    fn test_global_alignments_are_valid(a in dna(), b in dna()) {
        let scoring = GapLinear::default();
        let (score, alns) = align(AlignmentMode::Global, &a, &b, scoring, 20).unwrap();
        prop_assert!(!alns.is_empty());

        for aln in &alns {
            prop_assert_eq!(aln.first.len(), aln.second.len());

            let (first, second) = aln.ungapped();
            prop_assert_eq!(first, a.as_bytes().to_vec());
            prop_assert_eq!(second, b.as_bytes().to_vec());

            let rescored: i32 = aln.first.iter()
                .zip(&aln.second)
                .map(|(&x, &y)| scoring.score(x, y))
                .sum();
            prop_assert_eq!(rescored, score);
        }
    }

    #[test]
    fn test_local_alignments_are_valid(a in dna(), b in dna()) {
        let scoring = GapLinear::default();
        let (score, alns) = align(AlignmentMode::Local, &a, &b, scoring, 20).unwrap();

        for aln in &alns {
            prop_assert_eq!(aln.first.len(), aln.second.len());

            let (first, second) = aln.ungapped();
            prop_assert_eq!(&first[..], &a.as_bytes()[aln.first_range.clone()]);
            prop_assert_eq!(&second[..], &b.as_bytes()[aln.second_range.clone()]);

            let rescored: i32 = aln.first.iter()
                .zip(&aln.second)
                .map(|(&x, &y)| scoring.score(x, y))
                .sum();
            prop_assert_eq!(rescored, score);
        }
    }

    #[test]
    fn test_enumeration_idempotent(a in dna(), b in dna(), n in 1usize..8) {
        let mut global = AlignmentEngine::<Global, _>::new(&a, &b, GapLinear::default()).unwrap();
        global.compute_score();
        let first: Vec<_> = global.enumerate_alignments(n).unwrap().collect();
        let second: Vec<_> = global.enumerate_alignments(n).unwrap().collect();
        prop_assert!(first.len() <= n);
        prop_assert_eq!(first, second);

        let mut local = AlignmentEngine::<Local, _>::new(&a, &b, GapLinear::default()).unwrap();
        local.compute_score();
        let first: Vec<_> = local.enumerate_alignments(n).unwrap().collect();
        let second: Vec<_> = local.enumerate_alignments(n).unwrap().collect();
        prop_assert!(first.len() <= n);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_no_duplicate_paths(a in "[AT]{1,8}", b in "[AT]{1,8}") {
        for mode in [AlignmentMode::Global, AlignmentMode::Local] {
            let (_, alns) = align(mode, &a, &b, GapLinear::default(), 10_000).unwrap();

            let unique: HashSet<_> = alns.iter()
                .map(|aln| (aln.first.clone(), aln.second.clone(), aln.first_range.clone(), aln.second_range.clone()))
                .collect();
            prop_assert_eq!(unique.len(), alns.len());
        }
    }
}
