//! Breadth-first enumeration of every board reachable from a start board.
//!
//! The graph is built once and then only read. Storage sits behind the
//! [`StateGraph`] trait so the builder and the solver work with any backing
//! store; [`HashGraph`] keeps adjacency lists in an `FxHashMap` keyed by the
//! canonical board encoding.

use std::collections::VecDeque;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;
use crate::pieces::PieceMove;

/// One labelled edge: `via` takes the source board to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    pub via: PieceMove,
    pub to: Board,
}

/// Storage for a fully expanded state graph.
///
/// Implementors only provide storage; building and arc traversal are
/// provided on top of it.
pub trait StateGraph: Sized {
    /// An empty graph that will be expanded from `start`.
    fn with_start(start: Board) -> Self;

    /// The board the graph was built from.
    fn start(&self) -> Board;

    /// Number of expanded boards.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `board` already has its outgoing transitions recorded.
    fn is_expanded(&self, board: Board) -> bool;

    /// Records the outgoing transitions of `board`.
    fn insert(&mut self, board: Board, transitions: Vec<Transition>);

    /// Outgoing transitions of `board`, or `None` if it was never reached.
    fn transitions(&self, board: Board) -> Option<&[Transition]>;

    /// Expanded boards in discovery order.
    fn boards(&self) -> impl Iterator<Item = Board> + '_;

    /// Total number of stored transitions.
    fn arc_count(&self) -> usize {
        self.boards()
            .filter_map(|board| self.transitions(board))
            .map(<[Transition]>::len)
            .sum()
    }

    /// Expands every board reachable from `start`, which must be canonical.
    fn build(start: Board) -> Self {
        debug_assert!(start.is_canonical(), "start board {start:?} is not canonical");
        debug!("building state graph from {start:?}");

        let mut graph = Self::with_start(start);
        let mut frontier = VecDeque::from([start]);

        while let Some(current) = frontier.pop_front() {
            // a board can be queued several times before its first expansion
            if graph.is_expanded(current) {
                continue;
            }

            let transitions: Vec<Transition> = current
                .successors()
                .map(|(via, to)| Transition { via, to })
                .collect();
            for transition in &transitions {
                if !graph.is_expanded(transition.to) {
                    frontier.push_back(transition.to);
                }
            }
            graph.insert(current, transitions);
        }

        debug!(
            "state graph complete: {} boards, {} transitions",
            graph.len(),
            graph.arc_count()
        );
        graph
    }

    /// Visits every stored transition once, breadth-first from the start.
    ///
    /// Boards are dequeued in the order their first incoming arc was
    /// visited, so the first arc to reach a board comes from a board with
    /// the smallest possible distance to the start.
    fn for_each_arc(&self, mut visit: impl FnMut(Board, PieceMove, Board)) {
        let mut visited: FxHashSet<Board> = FxHashSet::default();
        let mut frontier = VecDeque::from([self.start()]);

        while let Some(current) = frontier.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(transitions) = self.transitions(current) else {
                continue;
            };
            for transition in transitions {
                visit(current, transition.via, transition.to);
                if !visited.contains(&transition.to) {
                    frontier.push_back(transition.to);
                }
            }
        }
    }
}

/// Hash-map backed state graph.
pub struct HashGraph {
    start: Board,
    adjacency: FxHashMap<Board, Vec<Transition>>,
    /// Boards in expansion order, for deterministic iteration.
    order: Vec<Board>,
}

impl StateGraph for HashGraph {
    fn with_start(start: Board) -> Self {
        Self {
            start,
            adjacency: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    fn start(&self) -> Board {
        self.start
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn is_expanded(&self, board: Board) -> bool {
        self.adjacency.contains_key(&board)
    }

    fn insert(&mut self, board: Board, transitions: Vec<Transition>) {
        if self.adjacency.insert(board, transitions).is_none() {
            self.order.push(board);
        }
    }

    fn transitions(&self, board: Board) -> Option<&[Transition]> {
        self.adjacency.get(&board).map(Vec::as_slice)
    }

    fn boards(&self) -> impl Iterator<Item = Board> + '_ {
        self.order.iter().copied()
    }
}
