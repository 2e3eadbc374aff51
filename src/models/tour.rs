//! Circular tour with cumulative cost bookkeeping.
//!
//! # Representation
//!
//! Nodes live in an arena indexed by city index; `prev`/`next` links are
//! arena indices. Exactly one node is the depot, and following `next` from
//! the depot returns to it after visiting every linked node once.
//!
//! # Bookkeeping
//!
//! After [`Tour::calc_costs`] every non-depot node holds
//!
//! ```text
//! cum_dist(k)  = Σ d(prev, cur)                   over edges depot → … → k
//! cum_rdist(k) = Σ d(cur, prev) − d(prev, cur)    over the same edges
//! ```
//!
//! and the depot holds the closing totals (edge back into the depot
//! included), so `cost() == depot.cum_dist`. Reversing the path between two
//! nodes changes its internal length by the difference of their
//! `cum_rdist`, which is what makes the 2-opt delta O(1).

use crate::distance::DistanceMatrix;
use crate::error::{GraspError, Result};

/// A city slot in a [`Tour`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    index: usize,
    prev: usize,
    next: usize,
    is_depot: bool,
    linked: bool,
    position: usize,
    cum_dist: f64,
    cum_rdist: f64,
}

impl Node {
    fn detached(index: usize) -> Self {
        Self {
            index,
            prev: index,
            next: index,
            is_depot: false,
            linked: false,
            position: 0,
            cum_dist: 0.0,
            cum_rdist: 0.0,
        }
    }

    /// City index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Predecessor city.
    pub fn prev(&self) -> usize {
        self.prev
    }

    /// Successor city.
    pub fn next(&self) -> usize {
        self.next
    }

    /// Whether this node anchors the tour.
    pub fn is_depot(&self) -> bool {
        self.is_depot
    }

    /// Cumulative distance from the depot (closing total for the depot).
    pub fn cum_dist(&self) -> f64 {
        self.cum_dist
    }

    /// Cumulative reverse-minus-forward difference from the depot.
    pub fn cum_rdist(&self) -> f64 {
        self.cum_rdist
    }

    /// Steps from the depot as of the last [`Tour::calc_costs`].
    pub fn position(&self) -> usize {
        self.position
    }
}

/// A Hamiltonian cycle (possibly partial while under construction) rooted
/// at a depot.
///
/// # Examples
///
/// ```
/// use u_grasp::models::{Problem, Tour};
///
/// let problem = Problem::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ]).unwrap();
///
/// let mut tour = Tour::new(3, 1);
/// tour.insert(0);
/// tour.insert(2);
/// tour.calc_costs(problem.matrix());
/// assert_eq!(tour.solution(), vec![1, 0, 2, 1]);
/// assert!((tour.cost() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    nodes: Vec<Node>,
    depot: usize,
    len: usize,
}

impl Tour {
    /// Creates a one-node tour over `n` cities with `depot` as its anchor.
    ///
    /// # Panics
    ///
    /// Panics if `depot >= n`.
    pub fn new(n: usize, depot: usize) -> Self {
        assert!(depot < n, "depot {depot} out of range for {n} nodes");
        let mut nodes: Vec<Node> = (0..n).map(Node::detached).collect();
        nodes[depot].is_depot = true;
        nodes[depot].linked = true;
        Self {
            nodes,
            depot,
            len: 1,
        }
    }

    /// Builds a complete tour visiting `seq` in order; `seq[0]` is the depot.
    ///
    /// Accepts either the open form (a permutation of `0..n`) or the closed
    /// form with the depot repeated at the end. Costs are not computed.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidInput`] if `seq` is not a permutation of `0..n`.
    pub fn from_sequence(seq: &[usize], n: usize) -> Result<Self> {
        let open = match seq {
            [first, .., last] if seq.len() == n + 1 && first == last => &seq[..n],
            _ => seq,
        };
        if open.len() != n || n == 0 {
            return Err(GraspError::InvalidInput(format!(
                "sequence has {} nodes, expected {n}",
                open.len()
            )));
        }
        let mut seen = vec![false; n];
        for &i in open {
            if i >= n || seen[i] {
                return Err(GraspError::InvalidInput(format!(
                    "sequence is not a permutation of 0..{n}: offending node {i}"
                )));
            }
            seen[i] = true;
        }
        let mut tour = Self::new(n, open[0]);
        for &i in &open[1..] {
            tour.insert(i);
        }
        Ok(tour)
    }

    /// Index of the depot city.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of cities currently linked into the cycle.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a tour holds at least its depot.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of city slots (the problem size).
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` once every city is linked.
    pub fn is_complete(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns `true` if city `i` is linked into the cycle.
    pub fn contains(&self, i: usize) -> bool {
        self.nodes[i].linked
    }

    /// Returns the node slot for city `i`.
    pub fn node(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    #[inline]
    pub fn is_depot(&self, i: usize) -> bool {
        i == self.depot
    }

    #[inline]
    pub fn next(&self, i: usize) -> usize {
        self.nodes[i].next
    }

    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        self.nodes[i].prev
    }

    /// Last city before returning to the depot.
    pub fn tail(&self) -> usize {
        self.nodes[self.depot].prev
    }

    /// Total closed-cycle length as of the last [`Tour::calc_costs`].
    pub fn cost(&self) -> f64 {
        self.nodes[self.depot].cum_dist
    }

    /// `cum_rdist` as a prefix from the depot: zero at the depot itself.
    #[inline]
    pub(crate) fn prefix_rdist(&self, i: usize) -> f64 {
        if self.is_depot(i) {
            0.0
        } else {
            self.nodes[i].cum_rdist
        }
    }

    /// Closing reverse-minus-forward total held by the depot.
    #[inline]
    pub(crate) fn total_rdist(&self) -> f64 {
        self.nodes[self.depot].cum_rdist
    }

    /// Appends city `i` at the tail, immediately before the depot. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `i` is already linked.
    pub fn insert(&mut self, i: usize) {
        let tail = self.tail();
        self.insert_after(tail, i);
    }

    /// Links city `i` immediately after `anchor`. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `i` is already linked or `anchor` is not.
    pub fn insert_after(&mut self, anchor: usize, i: usize) {
        assert!(!self.contains(i), "node {i} already in tour");
        assert!(self.contains(anchor), "anchor {anchor} not in tour");
        let after = self.nodes[anchor].next;
        self.nodes[i].prev = anchor;
        self.nodes[i].next = after;
        self.nodes[i].linked = true;
        self.nodes[after].prev = i;
        self.nodes[anchor].next = i;
        self.len += 1;
    }

    /// Unlinks `u` and relinks it immediately after `v`.
    pub(crate) fn relocate_after(&mut self, u: usize, v: usize) {
        let (p, x) = (self.nodes[u].prev, self.nodes[u].next);
        self.nodes[p].next = x;
        self.nodes[x].prev = p;

        let y = self.nodes[v].next;
        self.nodes[y].prev = u;
        self.nodes[u].prev = v;
        self.nodes[u].next = y;
        self.nodes[v].next = u;
    }

    /// Exchanges the positions of two non-adjacent nodes.
    pub(crate) fn swap(&mut self, u: usize, v: usize) {
        let (up, un) = (self.nodes[u].prev, self.nodes[u].next);
        let (vp, vn) = (self.nodes[v].prev, self.nodes[v].next);

        self.nodes[up].next = v;
        self.nodes[un].prev = v;
        self.nodes[vp].next = u;
        self.nodes[vn].prev = u;

        self.nodes[u].prev = vp;
        self.nodes[u].next = vn;
        self.nodes[v].prev = up;
        self.nodes[v].next = un;
    }

    /// Reverses the path `u.next ..= v`, leaving `u → v → … → u.next → y`
    /// where `y` was `v.next`. O(segment length).
    pub(crate) fn reverse_between(&mut self, u: usize, v: usize) {
        let x = self.nodes[u].next;
        let y = self.nodes[v].next;

        let mut node = self.nodes[x].next;
        self.nodes[x].prev = node;
        self.nodes[x].next = y;

        while node != v {
            let following = self.nodes[node].next;
            self.nodes[node].next = self.nodes[node].prev;
            self.nodes[node].prev = following;
            node = following;
        }

        self.nodes[v].next = self.nodes[v].prev;
        self.nodes[v].prev = u;
        self.nodes[u].next = v;
        self.nodes[y].prev = x;
    }

    /// Recomputes `cum_dist`, `cum_rdist`, and positions for every node in
    /// one traversal from the depot. O(n).
    pub fn calc_costs(&mut self, distances: &DistanceMatrix) {
        let depot = self.depot;
        self.nodes[depot].cum_dist = 0.0;
        self.nodes[depot].cum_rdist = 0.0;
        self.nodes[depot].position = 0;
        if self.len == 1 {
            return;
        }

        let mut dist = 0.0;
        let mut rdist = 0.0;
        let mut prev = depot;
        let mut node = self.nodes[depot].next;
        let mut position = 0;
        loop {
            let forward = distances.get(prev, node);
            dist += forward;
            rdist += distances.get(node, prev) - forward;
            if node == depot {
                break;
            }
            position += 1;
            let slot = &mut self.nodes[node];
            slot.cum_dist = dist;
            slot.cum_rdist = rdist;
            slot.position = position;
            prev = node;
            node = slot.next;
        }
        self.nodes[depot].cum_dist = dist;
        self.nodes[depot].cum_rdist = rdist;
    }

    /// Iterates linked cities in tour order, starting at the depot.
    pub fn iter(&self) -> TourIter<'_> {
        TourIter {
            tour: self,
            current: self.depot,
            remaining: self.len,
        }
    }

    /// Closed-cycle sequence: tour order from the depot with the depot
    /// appended once more (length `len() + 1`).
    pub fn solution(&self) -> Vec<usize> {
        let mut seq: Vec<usize> = self.iter().collect();
        seq.push(self.depot);
        seq
    }

    /// Checks the cycle invariant: following `next` from the depot returns
    /// to it after exactly `len()` steps, each linked city is visited once,
    /// and `prev` mirrors `next`.
    pub fn is_hamiltonian(&self) -> bool {
        let mut seen = vec![false; self.nodes.len()];
        let mut node = self.depot;
        for _ in 0..self.len {
            if seen[node] || !self.nodes[node].linked {
                return false;
            }
            seen[node] = true;
            let next = self.nodes[node].next;
            if self.nodes[next].prev != node {
                return false;
            }
            node = next;
        }
        node == self.depot
            && self
                .nodes
                .iter()
                .filter(|n| n.is_depot)
                .map(|n| n.index)
                .eq(std::iter::once(self.depot))
    }
}

/// Iterator over a tour's cities in cycle order.
pub struct TourIter<'a> {
    tour: &'a Tour,
    current: usize,
    remaining: usize,
}

impl Iterator for TourIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.current;
        self.current = self.tour.nodes[node].next;
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for TourIter<'_> {}
