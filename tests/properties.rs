//! Property tests over random instances.

use proptest::prelude::*;
use u_grasp::constructive::{Alpha, ConstructiveKind};
use u_grasp::grasp::{Grasp, GraspConfig};
use u_grasp::local_search::{LocalSearchKind, VariableNeighborhoodDescent};
use u_grasp::models::{Problem, Tour};

const KINDS: [ConstructiveKind; 5] = [
    ConstructiveKind::CheapestArc,
    ConstructiveKind::SemiGreedyArc,
    ConstructiveKind::CheapestInsertion,
    ConstructiveKind::RandomInsertion,
    ConstructiveKind::SemiGreedyInsertion,
];

/// Square matrix with zero diagonal and arbitrary (asymmetric) positive
/// off-diagonal entries.
fn matrix() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..20).prop_flat_map(|n| {
        prop::collection::vec(1.0f64..100.0, n * n).prop_map(move |flat| {
            (0..n)
                .map(|i| {
                    (0..n)
                        .map(|j| if i == j { 0.0 } else { flat[i * n + j] })
                        .collect()
                })
                .collect()
        })
    })
}

fn closed_cost(seq: &[usize], rows: &[Vec<f64>]) -> f64 {
    seq.windows(2).map(|w| rows[w[0]][w[1]]).sum()
}

fn is_closed_permutation(seq: &[usize], n: usize) -> bool {
    if seq.len() != n + 1 || seq.first() != seq.last() {
        return false;
    }
    let mut sorted = seq[..n].to_vec();
    sorted.sort_unstable();
    sorted == (0..n).collect::<Vec<_>>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_construction_is_valid_tour(
        rows in matrix(),
        kind in 0usize..5,
        seed in any::<u64>(),
    ) {
        let problem = Problem::from_rows(rows.clone()).expect("generated square");
        let mut heuristic = KINDS[kind].build(Alpha::default(), seed);
        let tour = heuristic.build(&problem);
        let seq = tour.solution();

        prop_assert!(is_closed_permutation(&seq, problem.n()));
        prop_assert!(tour.is_hamiltonian());
        prop_assert!((tour.cost() - closed_cost(&seq, &rows)).abs() < 1e-6);
    }

    #[test]
    fn prop_local_search_never_worsens(
        rows in matrix(),
        seed in any::<u64>(),
        shuffle_seed in any::<u64>(),
    ) {
        let n = rows.len();
        let mut seq: Vec<usize> = (0..n).collect();
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(shuffle_seed);
        rand::seq::SliceRandom::shuffle(seq.as_mut_slice(), &mut rng);

        let problem = Problem::from_rows(rows.clone()).expect("generated square");
        let mut tour = Tour::from_sequence(&seq, n).expect("permutation");
        let stats = VariableNeighborhoodDescent::new(seed).improve(&mut tour, &problem, 1000);

        let improved = tour.solution();
        prop_assert!(is_closed_permutation(&improved, n));
        prop_assert_eq!(improved[0], seq[0]);
        prop_assert!(stats.final_cost <= stats.initial_cost + 1e-9);
        prop_assert!((stats.final_cost - closed_cost(&improved, &rows)).abs() < 1e-6);
    }

    #[test]
    fn prop_incumbent_is_history_minimum(
        rows in matrix(),
        kind in 0usize..5,
        annealing in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let local_search = if annealing {
            LocalSearchKind::annealing()
        } else {
            LocalSearchKind::Descent
        };
        let config = GraspConfig::default()
            .with_constructive(KINDS[kind])
            .with_local_search(local_search)
            .with_max_iter(4)
            .with_max_moves(50)
            .with_seed(seed);
        let result = Grasp::new(config).expect("valid").solve_matrix(rows.clone()).expect("square");

        prop_assert_eq!(result.iterations, 4);
        let best = result.best.expect("iterations ran");
        let min = result.costs.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(best.cost, min);
        prop_assert!(is_closed_permutation(&best.tour, rows.len()));
        prop_assert!((best.cost - closed_cost(&best.tour, &rows)).abs() < 1e-6);
    }

    #[test]
    fn prop_same_seed_same_result(rows in matrix(), seed in any::<u64>()) {
        let config = GraspConfig::default()
            .with_constructive(ConstructiveKind::SemiGreedyInsertion)
            .with_max_iter(3)
            .with_seed(seed);
        let a = Grasp::new(config.clone()).expect("valid").solve_matrix(rows.clone()).expect("square");
        let b = Grasp::new(config).expect("valid").solve_matrix(rows).expect("square");
        prop_assert_eq!(a.costs, b.costs);
        prop_assert_eq!(a.best, b.best);
    }
}
