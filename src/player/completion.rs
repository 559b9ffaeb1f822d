//! n-completion: how many more stones a player needs to join their edges.
//!
//! The count is a depth-first branch and bound over simple paths from the
//! player's starting edge. Stepping onto an own stone is free, onto an empty
//! cell costs one, and a bridge with both carriers empty is free whether its
//! far endpoint is own or empty. Opponent stones are walls.
//!
//! Branches are cut against the remaining distance to the far edge, worked
//! out once per call by a 0-1 breadth-first sweep back from that edge. It
//! ignores which cells the current path has used, so it never overestimates
//! and the search stays exact.

use std::collections::VecDeque;

use crate::hex::{CellSet, HexBoard, HexCoord, Stone, BOARD_SIZE};

/// Returned when no route to the far edge survives; callers read it as
/// "as far from winning as possible".
pub const INFEASIBLE: i32 = 999;

/// Starting value of the running best bound.
pub const UNBOUNDED: i32 = (BOARD_SIZE * BOARD_SIZE) as i32;

const CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// One top-level completion computation. Holds the running best bound so it
/// never outlives the call that created it.
pub struct PathSearch<'a> {
    board: &'a HexBoard,
    stone: Stone,
    best: i32,
    remaining: [i32; CELLS],
    nodes: u64,
}

impl<'a> PathSearch<'a> {
    pub fn new(board: &'a HexBoard, stone: Stone) -> Self {
        PathSearch {
            board,
            stone,
            best: UNBOUNDED,
            remaining: remaining_distance(board, stone),
            nodes: 0,
        }
    }

    /// Start from an explicit bound instead of [`UNBOUNDED`].
    pub fn with_bound(mut self, best: i32) -> Self {
        self.best = best;
        self
    }

    pub fn best(&self) -> i32 {
        self.best
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Fewest stones still needed to get from `at` to the far edge, given
    /// `count` already spent and the cells of the current path in `visited`.
    pub fn path_cost(&mut self, at: HexCoord, visited: CellSet, count: i32) -> i32 {
        self.nodes += 1;

        if self.stone.on_far_edge(at) {
            if count < self.best {
                self.best = count;
            }
            return count;
        }

        // exact remaining distance in place of a row-count estimate; ties
        // cannot improve on the bound, so they prune too
        if count + self.remaining[at.index()] >= self.best {
            return INFEASIBLE;
        }

        let visited = visited.with(at);

        let mut jumps = Vec::with_capacity(6);
        for bridge in at.bridges() {
            let (m1, m2) = bridge.carriers;
            if !self.board.is_empty(m1) || !self.board.is_empty(m2) {
                continue;
            }

            if self.step_cost(bridge.to, visited).is_some() {
                jumps.push((0, bridge.to));
            }
        }

        let steps = at
            .neighbors()
            .filter_map(|nb| self.step_cost(nb, visited).map(|step| (step, nb)))
            .collect();

        let min = self.descend(jumps, visited, count);
        min.min(self.descend(steps, visited, count))
    }

    /// Try each candidate move, cheapest estimated total first.
    fn descend(&mut self, mut moves: Vec<(i32, HexCoord)>, visited: CellSet, count: i32) -> i32 {
        moves.sort_by_key(|&(step, to)| step + self.remaining[to.index()]);

        moves
            .into_iter()
            .map(|(step, to)| self.path_cost(to, visited, count + step))
            .min()
            .unwrap_or(INFEASIBLE)
    }

    fn step_cost(&self, to: HexCoord, visited: CellSet) -> Option<i32> {
        if visited.contains(to) {
            return None;
        }

        self.cell_cost(to)
    }

    fn cell_cost(&self, c: HexCoord) -> Option<i32> {
        match self.board.get(c) {
            None => Some(1),
            Some(s) if s == self.stone => Some(0),
            Some(_) => None,
        }
    }
}

/// Fewest stones needed from each cell to the far edge, not counting the
/// cell itself, or [`INFEASIBLE`] where the far edge is out of reach.
fn remaining_distance(board: &HexBoard, stone: Stone) -> [i32; CELLS] {
    let search = PathSearch {
        board,
        stone,
        best: UNBOUNDED,
        remaining: [0; CELLS],
        nodes: 0,
    };
    let mut dist = [INFEASIBLE; CELLS];
    let mut queue = VecDeque::new();

    for i in 0..BOARD_SIZE {
        let c = stone.far_cell(i);
        if search.cell_cost(c).is_some() {
            dist[c.index()] = 0;
            queue.push_back(c);
        }
    }

    while let Some(to) = queue.pop_front() {
        // a step onto `to` pays what `to` costs, a bridge onto it is free
        let Some(enter) = search.cell_cost(to) else {
            continue;
        };

        let open_bridges = to
            .bridges()
            .filter(|b| board.is_empty(b.carriers.0) && board.is_empty(b.carriers.1))
            .map(|b| (b.to, 0));
        let steps = to.neighbors().map(|nb| (nb, enter));

        for (from, cost) in open_bridges.chain(steps) {
            let through = dist[to.index()] + cost;
            if search.cell_cost(from).is_none() || through >= dist[from.index()] {
                continue;
            }

            dist[from.index()] = through;
            if cost == 0 {
                queue.push_front(from);
            } else {
                queue.push_back(from);
            }
        }
    }

    dist
}

/// n-completion value of `stone` on `board`, scanning every cell of the
/// starting edge with one shared bound.
pub fn completion(board: &HexBoard, stone: Stone) -> i32 {
    completion_from(board, stone, None)
}

/// Same value as [`completion`]; start cells closest to `hint` are tried
/// first, which usually tightens the bound sooner.
pub fn completion_from(board: &HexBoard, stone: Stone, hint: Option<HexCoord>) -> i32 {
    let mut starts: Vec<HexCoord> = (0..BOARD_SIZE).map(|i| stone.start_cell(i)).collect();

    if let Some(h) = hint {
        let across = |c: &HexCoord| match stone {
            Stone::White => c.x().abs_diff(h.x()),
            Stone::Black => c.y().abs_diff(h.y()),
        };
        starts.sort_by_key(across);
    }

    let mut search = PathSearch::new(board, stone);
    let mut min = INFEASIBLE;

    for start in starts {
        let count = match board.get(start) {
            Some(s) if s != stone => continue,
            Some(_) => 0,
            None => 1,
        };

        min = min.min(search.path_cost(start, CellSet::new(), count));
    }

    min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> HexBoard {
        s.parse().unwrap()
    }

    #[test]
    fn empty_board_needs_one() {
        // one stone on the edge, then bridges all the way across
        let board = HexBoard::new();
        assert_eq!(completion(&board, Stone::White), 1);
        assert_eq!(completion(&board, Stone::Black), 1);
    }

    #[test]
    fn lone_edge_stone_with_open_bridges_is_complete() {
        let mut board = HexBoard::new();
        board.place(HexCoord::new(3, 0), Stone::White).unwrap();
        assert_eq!(completion(&board, Stone::White), 0);
        assert_eq!(completion(&board, Stone::Black), 1);
    }

    #[test]
    fn finished_chain_costs_nothing() {
        let board = parse(
            "W . . . . . .
             W . . . . . .
             W . . . . . .
             W . . . . . .
             W . . . . . .
             W . . . . . .
             W . . . . . .",
        );

        assert_eq!(completion(&board, Stone::White), 0);
        // every black starting cell is taken
        assert_eq!(completion(&board, Stone::Black), INFEASIBLE);
    }

    fn corridor() -> HexBoard {
        // white may only use the two leftmost columns
        parse(
            ". W B B B B B
             . . B B B B B
             W . B B B B B
             . W B B B B B
             . . B B B B B
             W . B B B B B
             . W B B B B B",
        )
    }

    #[test]
    fn bridges_with_open_carriers_are_free_between_own_stones() {
        let board = corridor();
        assert_eq!(completion(&board, Stone::White), 0);

        // take one carrier of the (1, 0) - (0, 2) bridge
        let mut cut = board;
        cut.place(HexCoord::new(1, 1), Stone::Black).unwrap();
        assert_eq!(completion(&cut, Stone::White), 1);
    }

    #[test]
    fn walled_off_player_is_infeasible() {
        let board = parse(
            ". . . . . . .
             . . . . . . .
             . . . . . . .
             B B B B B B B
             . . . . . . .
             . . . . . . .
             . . . . . . .",
        );

        assert_eq!(completion(&board, Stone::White), INFEASIBLE);
        assert_eq!(completion(&board, Stone::Black), 0);
    }

    #[test]
    fn losing_own_stones_never_shortens_the_path() {
        let mut board = parse(
            ". . W . . . .
             . . W . . . .
             . . . . B . .
             . W . . . . .
             . . . B . . .
             . W . . . . .
             . . . . . . .",
        );

        let mut last = completion(&board, Stone::White);
        for c in board.stones(Stone::White) {
            board.set(c, Some(Stone::Black));
            let next = completion(&board, Stone::White);
            assert!(next >= last, "{} < {} after flipping {}", next, last, c);
            last = next;
        }
    }

    #[test]
    fn scan_order_does_not_change_the_value() {
        let board = parse(
            ". . . . . . .
             . . B . . . .
             . . W . . W .
             . B . . . . .
             . . . W B . .
             . . . . . . .
             . . . . . . .",
        );

        for stone in [Stone::White, Stone::Black] {
            let plain = completion(&board, stone);
            for i in 0..BOARD_SIZE * BOARD_SIZE {
                let hint = Some(HexCoord::from_index(i));
                assert_eq!(completion_from(&board, stone, hint), plain);
            }
        }
    }

    #[test]
    fn tie_with_bound_prunes() {
        let board = HexBoard::new();
        let start = HexCoord::new(3, 0);

        // best reachable is 1, so a bound of 1 leaves nothing to improve on
        let mut tight = PathSearch::new(&board, Stone::White).with_bound(1);
        assert_eq!(tight.path_cost(start, CellSet::new(), 1), INFEASIBLE);
        assert_eq!(tight.best(), 1);
        assert_eq!(tight.nodes(), 1);

        let mut loose = PathSearch::new(&board, Stone::White).with_bound(2);
        assert_eq!(loose.path_cost(start, CellSet::new(), 1), 1);
        assert_eq!(loose.best(), 1);
    }

    #[test]
    fn far_edge_is_terminal() {
        let board = HexBoard::new();
        let mut search = PathSearch::new(&board, Stone::Black).with_bound(0);
        assert_eq!(search.path_cost(HexCoord::new(6, 2), CellSet::new(), 3), 3);
        assert_eq!(search.nodes(), 1);
    }

    #[test]
    fn remaining_distance_follows_bridges() {
        let dist = remaining_distance(&HexBoard::new(), Stone::White);
        assert_eq!(dist[HexCoord::new(3, 0).index()], 0);
        assert_eq!(dist[HexCoord::new(0, 6).index()], 0);

        let mut cut = corridor();
        cut.place(HexCoord::new(1, 1), Stone::Black).unwrap();
        let dist = remaining_distance(&cut, Stone::White);
        assert_eq!(dist[HexCoord::new(0, 2).index()], 0);
        assert_eq!(dist[HexCoord::new(1, 0).index()], 1);
        assert_eq!(dist[HexCoord::new(0, 0).index()], 1);
        assert_eq!(dist[HexCoord::new(2, 0).index()], INFEASIBLE);

        let board = parse(
            ". . . . . . .
             . . . . . . .
             . . . . . . .
             B B B B B B B
             . . . . . . .
             . . . . . . .
             . . . . . . .",
        );
        let dist = remaining_distance(&board, Stone::White);
        assert_eq!(dist[HexCoord::new(3, 2).index()], INFEASIBLE);
        assert_eq!(dist[HexCoord::new(3, 4).index()], 0);
    }

    #[test]
    fn sealed_off_region_is_cheap_to_rule_out() {
        let board = parse(
            ". . . . . . .
             . . . . . . .
             B B B . . . .
             . . B . . . .
             . . B B B B B
             . . . . . . .
             . . . . . . .",
        );

        let mut search = PathSearch::new(&board, Stone::White);
        for i in 0..BOARD_SIZE {
            let start = Stone::White.start_cell(i);
            assert_eq!(search.path_cost(start, CellSet::new(), 1), INFEASIBLE);
        }
        assert_eq!(search.nodes(), BOARD_SIZE as u64);
    }
}
