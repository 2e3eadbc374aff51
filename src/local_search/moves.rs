//! Neighborhood move catalog.
//!
//! Every move is evaluated for an ordered pair `(u, v)` of tour nodes with
//! the shorthands
//!
//! ```text
//! p = u.prev   x = u.next   xn = x.next
//! vp = v.prev  y = v.next   yn = y.next
//! ```
//!
//! | Move | Effect |
//! |------|--------|
//! | [`Relocate`](Move::Relocate) | move `u` after `v` |
//! | [`RelocatePair`](Move::RelocatePair) | move `(u, x)` after `v` |
//! | [`RelocatePairReversed`](Move::RelocatePairReversed) | move `(x, u)` after `v` |
//! | [`Swap`](Move::Swap) | exchange `u` and `v` |
//! | [`SwapWithPair`](Move::SwapWithPair) | exchange `(u, x)` with `v` |
//! | [`SwapPairs`](Move::SwapPairs) | exchange `(u, x)` with `(v, y)` |
//! | [`TwoOpt`](Move::TwoOpt) | replace `u→x, v→y` by `u→v, x→y`, reversing `x..v` |
//!
//! Deltas are exact, including for asymmetric matrices: the 2-opt delta
//! reads the reversed-minus-forward prefix sums kept by
//! [`Tour::calc_costs`], so it is O(1).

use crate::distance::DistanceMatrix;
use crate::models::Tour;

/// One neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Relocate,
    RelocatePair,
    RelocatePairReversed,
    Swap,
    SwapWithPair,
    SwapPairs,
    TwoOpt,
}

impl Move {
    /// All moves in evaluation priority order.
    pub const CATALOG: [Move; 7] = [
        Move::Relocate,
        Move::RelocatePair,
        Move::RelocatePairReversed,
        Move::Swap,
        Move::SwapWithPair,
        Move::SwapPairs,
        Move::TwoOpt,
    ];

    /// Moves retried with the depot as `v` when the depot precedes the
    /// original `v`.
    pub const DEPOT_FALLBACK: [Move; 3] = [
        Move::Relocate,
        Move::RelocatePair,
        Move::RelocatePairReversed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Move::Relocate => "relocate",
            Move::RelocatePair => "relocate_pair",
            Move::RelocatePairReversed => "relocate_pair_reversed",
            Move::Swap => "swap",
            Move::SwapWithPair => "swap_with_pair",
            Move::SwapPairs => "swap_pairs",
            Move::TwoOpt => "two_opt",
        }
    }

    /// Change in tour cost if the move were applied, or `None` when the
    /// move is not allowed for this pair.
    ///
    /// Requires `tour` to be complete with up-to-date costs.
    pub fn delta(self, tour: &Tour, d: &DistanceMatrix, u: usize, v: usize) -> Option<f64> {
        if u == v {
            return None;
        }
        let p = tour.prev(u);
        let x = tour.next(u);
        let xn = tour.next(x);
        let vp = tour.prev(v);
        let y = tour.next(v);
        let dep = |i: usize| tour.is_depot(i);

        match self {
            Move::Relocate => {
                if u == y {
                    return None;
                }
                let out = d.get(p, x) - d.get(p, u) - d.get(u, x);
                let into = d.get(v, u) + d.get(u, y) - d.get(v, y);
                Some(out + into)
            }
            Move::RelocatePair => {
                if u == y || v == x || dep(x) {
                    return None;
                }
                let out = d.get(p, xn) - d.get(p, u) - d.get(x, xn);
                let into = d.get(v, u) + d.get(x, y) - d.get(v, y);
                Some(out + into)
            }
            Move::RelocatePairReversed => {
                if u == y || v == x || dep(x) {
                    return None;
                }
                let out = d.get(p, xn) - d.get(p, u) - d.get(u, x) - d.get(x, xn);
                let into = d.get(v, x) + d.get(x, u) + d.get(u, y) - d.get(v, y);
                Some(out + into)
            }
            Move::Swap => {
                // Each unordered pair once, never adjacent
                if u == vp || u == y || v <= u {
                    return None;
                }
                let at_u = d.get(p, v) + d.get(v, x) - d.get(p, u) - d.get(u, x);
                let at_v = d.get(vp, u) + d.get(u, y) - d.get(vp, v) - d.get(v, y);
                Some(at_u + at_v)
            }
            Move::SwapWithPair => {
                if u == vp || x == vp || u == y || dep(x) || dep(vp) {
                    return None;
                }
                let at_u = d.get(p, v) + d.get(v, xn) - d.get(p, u) - d.get(x, xn);
                let at_v = d.get(vp, u) + d.get(x, y) - d.get(vp, v) - d.get(v, y);
                Some(at_u + at_v)
            }
            Move::SwapPairs => {
                if dep(x) || dep(y) || y == p || u == y || x == v || v == xn || dep(vp) {
                    return None;
                }
                let yn = tour.next(y);
                let at_u = d.get(p, v) + d.get(y, xn) - d.get(p, u) - d.get(x, xn);
                let at_v = d.get(vp, u) + d.get(x, yn) - d.get(vp, v) - d.get(y, yn);
                Some(at_u + at_v)
            }
            Move::TwoOpt => {
                if u == y || dep(vp) || x == v {
                    return None;
                }
                let node = |i: usize| tour.node(i).position();
                // Reversal changes x..v internal arcs by their reverse-minus-forward sum
                let segment = if node(x) <= node(v) {
                    tour.prefix_rdist(v) - tour.prefix_rdist(x)
                } else {
                    tour.total_rdist() - tour.prefix_rdist(x) + tour.prefix_rdist(v)
                };
                let arcs = d.get(u, v) + d.get(x, y) - d.get(u, x) - d.get(v, y);
                Some(arcs + segment)
            }
        }
    }

    /// Applies the move to the links. Costs are stale afterwards.
    pub fn apply(self, tour: &mut Tour, u: usize, v: usize) {
        match self {
            Move::Relocate => tour.relocate_after(u, v),
            Move::RelocatePair => {
                let x = tour.next(u);
                tour.relocate_after(u, v);
                tour.relocate_after(x, u);
            }
            Move::RelocatePairReversed => {
                let x = tour.next(u);
                tour.relocate_after(x, v);
                tour.relocate_after(u, x);
            }
            Move::Swap => tour.swap(u, v),
            Move::SwapWithPair => {
                let x = tour.next(u);
                tour.swap(u, v);
                tour.relocate_after(x, u);
            }
            Move::SwapPairs => {
                let x = tour.next(u);
                let y = tour.next(v);
                tour.swap(u, v);
                tour.swap(x, y);
            }
            Move::TwoOpt => tour.reverse_between(u, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn asymmetric(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.0 } else { rng.random_range(1.0..50.0) })
                    .collect()
            })
            .collect();
        DistanceMatrix::from_rows(&rows).expect("square")
    }

    fn closed_cost(tour: &Tour, d: &DistanceMatrix) -> f64 {
        tour.solution().windows(2).map(|w| d.get(w[0], w[1])).sum()
    }

    /// Every allowed move's delta matches the recomputed cost change and
    /// leaves a Hamiltonian cycle.
    fn check_all_pairs(n: usize, seed: u64) {
        let d = asymmetric(n, seed);
        let mut rng = StdRng::seed_from_u64(seed ^ 0xA5);
        let mut seq: Vec<usize> = (0..n).collect();
        rand::seq::SliceRandom::shuffle(seq.as_mut_slice(), &mut rng);

        let mut base = Tour::from_sequence(&seq, n).expect("permutation");
        base.calc_costs(&d);
        let before = base.cost();

        for mv in Move::CATALOG {
            for u in (0..n).filter(|&u| !base.is_depot(u)) {
                for v in 0..n {
                    let Some(delta) = mv.delta(&base, &d, u, v) else {
                        continue;
                    };
                    let mut tour = base.clone();
                    mv.apply(&mut tour, u, v);
                    assert!(tour.is_hamiltonian(), "{} u={u} v={v}", mv.name());
                    tour.calc_costs(&d);
                    let actual = tour.cost() - before;
                    assert!(
                        (actual - delta).abs() < 1e-8,
                        "{} u={u} v={v}: delta {delta} actual {actual}",
                        mv.name()
                    );
                    assert!((tour.cost() - closed_cost(&tour, &d)).abs() < 1e-8);
                }
            }
        }
    }

    #[test]
    fn test_deltas_exact_small() {
        for seed in 0..6 {
            check_all_pairs(6, seed);
        }
    }

    #[test]
    fn test_deltas_exact_medium() {
        for seed in 0..3 {
            check_all_pairs(11, seed);
        }
    }

    #[test]
    fn test_two_opt_wraps_depot() {
        let d = asymmetric(6, 17);
        let mut tour = Tour::from_sequence(&[0, 1, 2, 3, 4, 5], 6).expect("permutation");
        tour.calc_costs(&d);
        // u = 4, v = 2: segment 5 → 0 → 1 → 2 passes through the depot
        let delta = Move::TwoOpt.delta(&tour, &d, 4, 2).expect("allowed");
        let before = tour.cost();
        Move::TwoOpt.apply(&mut tour, 4, 2);
        assert!(tour.is_hamiltonian());
        tour.calc_costs(&d);
        assert!((tour.cost() - before - delta).abs() < 1e-8);
        assert!((tour.cost() - closed_cost(&tour, &d)).abs() < 1e-8);
    }

    #[test]
    fn test_disallowed_pairs() {
        let d = asymmetric(5, 1);
        let mut tour = Tour::from_sequence(&[0, 1, 2, 3, 4], 5).expect("permutation");
        tour.calc_costs(&d);
        // u already follows v
        assert_eq!(Move::Relocate.delta(&tour, &d, 2, 1), None);
        // x is the depot
        assert_eq!(Move::RelocatePair.delta(&tour, &d, 4, 2), None);
        // adjacent swap
        assert_eq!(Move::Swap.delta(&tour, &d, 1, 2), None);
        // ordered pair only once
        assert_eq!(Move::Swap.delta(&tour, &d, 3, 1), None);
        assert!(Move::Swap.delta(&tour, &d, 1, 3).is_some());
        // v directly after the depot
        assert_eq!(Move::TwoOpt.delta(&tour, &d, 3, 1), None);
        assert_eq!(Move::TwoOpt.delta(&tour, &d, 2, 1), None);
        for mv in Move::CATALOG {
            assert_eq!(mv.delta(&tour, &d, 2, 2), None);
        }
    }

    #[test]
    fn test_relocate_improves_crossed_square() {
        let d = DistanceMatrix::from_rows(&[
            vec![0.0, 1.0, 1.5, 1.0],
            vec![1.0, 0.0, 1.0, 1.5],
            vec![1.5, 1.0, 0.0, 1.0],
            vec![1.0, 1.5, 1.0, 0.0],
        ])
        .expect("square");
        let mut tour = Tour::from_sequence(&[0, 2, 1, 3], 4).expect("permutation");
        tour.calc_costs(&d);
        let delta = Move::Relocate.delta(&tour, &d, 2, 1).expect("allowed");
        assert!((delta + 1.0).abs() < 1e-10);
        Move::Relocate.apply(&mut tour, 2, 1);
        tour.calc_costs(&d);
        assert_eq!(tour.solution(), vec![0, 1, 2, 3, 0]);
        assert!((tour.cost() - 4.0).abs() < 1e-10);
    }
}
