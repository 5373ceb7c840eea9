//! Shortest solutions over a built state graph.
//!
//! Distances are assigned by a breadth-first walk over the stored arcs, never
//! by regenerating moves. Every labelled board also remembers the arc that
//! first reached it, so a path is read back by following those predecessor
//! links from the goal to the start.

use log::debug;
use rustc_hash::FxHashMap;

use crate::board::Board;
use crate::error::SolveError;
use crate::graph::StateGraph;
use crate::pieces::{Location, PieceMove, NUM_PIECES};

/// Distance of a board plus the arc that first reached it.
#[derive(Clone, Copy, Debug)]
struct Label {
    distance: u32,
    parent: Option<(Board, PieceMove)>,
}

/// Shortest move counts from the start of a graph to every reachable board.
pub struct Distances {
    start: Board,
    labels: FxHashMap<Board, Label>,
    /// Labelled boards in breadth-first order, so distances never decrease.
    order: Vec<Board>,
}

impl Distances {
    /// Labels every board reachable from `graph.start()`.
    pub fn label<G: StateGraph>(graph: &G) -> Self {
        let start = graph.start();
        let mut labels = FxHashMap::default();
        labels.insert(
            start,
            Label {
                distance: 0,
                parent: None,
            },
        );
        let mut order = vec![start];

        graph.for_each_arc(|from, via, to| {
            if labels.contains_key(&to) {
                return;
            }
            let distance = match labels.get(&from) {
                Some(label) => label.distance + 1,
                None => panic!("arc {via} leaves unlabelled board {from:?}"),
            };
            labels.insert(
                to,
                Label {
                    distance,
                    parent: Some((from, via)),
                },
            );
            order.push(to);
        });

        debug!(
            "labelled {} boards, deepest at distance {}",
            order.len(),
            order.last().map_or(0, |board| labels[board].distance)
        );
        Self {
            start,
            labels,
            order,
        }
    }

    pub fn start(&self) -> Board {
        self.start
    }

    /// Number of labelled boards.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Moves needed to reach `board`, or `None` if it is unreachable.
    pub fn distance(&self, board: Board) -> Option<u32> {
        self.labels.get(&board).map(|label| label.distance)
    }

    /// Labelled boards and their distances, nearest first.
    pub fn iter(&self) -> impl Iterator<Item = (Board, u32)> + '_ {
        self.order
            .iter()
            .map(|&board| (board, self.labels[&board].distance))
    }

    /// The nearest board satisfying `goal`. Ties go to the board labelled first.
    pub fn nearest(&self, goal: impl Fn(Board) -> bool) -> Option<(Board, u32)> {
        // order is breadth-first, so the first match is a nearest one
        self.iter().find(|&(board, _)| goal(board))
    }

    /// A shortest move sequence from the start to `target`.
    ///
    /// Piece indices refer to the canonical board each move is played on, so
    /// [`Board::replay`] from the start reproduces `target` exactly.
    pub fn path_to(&self, target: Board) -> Option<Vec<PieceMove>> {
        let mut label = *self.labels.get(&target)?;
        let mut moves = Vec::with_capacity(label.distance as usize);

        while let Some((parent, via)) = label.parent {
            moves.push(via);
            label = match self.labels.get(&parent) {
                Some(&parent_label) => parent_label,
                None => panic!("predecessor {parent:?} of a labelled board has no label"),
            };
        }

        moves.reverse();
        Some(moves)
    }
}

/// A shortest way from a start board to a goal board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub start: Board,
    pub goal: Board,
    /// Moves in play order.
    pub moves: Vec<PieceMove>,
}

impl Solution {
    /// Number of moves.
    pub fn distance(&self) -> usize {
        self.moves.len()
    }

    /// Every board along the way, start and goal included.
    pub fn boards(&self) -> Vec<Board> {
        let mut boards = Vec::with_capacity(self.moves.len() + 1);
        boards.push(self.start);
        for &mv in &self.moves {
            let current = boards[boards.len() - 1];
            boards.push(current.apply_move(mv));
        }
        boards
    }
}

/// Goal predicate: `piece` anchored at `target`.
///
/// Panics if `piece` is not a valid piece index.
pub fn piece_anchored_at(piece: usize, target: Location) -> impl Fn(Board) -> bool {
    assert!(piece < NUM_PIECES, "piece index {piece} is out of range");
    move |board| board.decode(piece) == target
}

/// Finds a shortest path from the graph's start to a board matching `goal`.
pub fn solve<G: StateGraph>(
    graph: &G,
    goal: impl Fn(Board) -> bool,
) -> Result<Solution, SolveError> {
    let distances = Distances::label(graph);
    solve_with(&distances, goal)
}

/// Like [`solve`], reusing an existing distance labelling.
pub fn solve_with(
    distances: &Distances,
    goal: impl Fn(Board) -> bool,
) -> Result<Solution, SolveError> {
    let (target, distance) = distances
        .nearest(goal)
        .ok_or(SolveError::Unreachable {
            explored: distances.len(),
        })?;
    debug!("goal {target:?} found at distance {distance}");

    let moves = distances
        .path_to(target)
        .ok_or(SolveError::Unreachable {
            explored: distances.len(),
        })?;
    debug_assert_eq!(moves.len(), distance as usize);

    Ok(Solution {
        start: distances.start(),
        goal: target,
        moves,
    })
}
