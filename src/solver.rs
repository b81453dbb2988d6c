//! Two-phase IDA* search.
//!
//! Phase 1 drives the cube into the subgroup G1 = <U, D, R2, L2, F2, B2>
//! (orientations solved, slice edges in the slice); phase 2 finishes the
//! solve using only G1 moves. Both phases are iterative-deepening searches
//! bounded by the pruning tables.

use crate::prelude::*;

/// A verified cube paired with the shared tables. One instance can run many
/// searches, but each `search` call owns its own scratch arrays, so a single
/// instance must not be searched from two threads at once.
#[derive(Debug)]
pub struct Solver {
    cube: CubieCube,
    tables: &'static Tables,
}

impl Solver {
    pub fn from_facelets(facelets: &str) -> Result<Solver, Error> {
        let facelet_cube: FaceletCube = facelets.parse()?;
        Solver::new(facelet_cube.to_cubie_cube())
    }

    pub fn new(cube: CubieCube) -> Result<Solver, Error> {
        cube.verify()?;
        Ok(Solver {
            cube,
            tables: tables(),
        })
    }

    /// Finds a solution of fewer than `allowed_length` moves, or `None` if
    /// none exists within that bound. Exceeding `timeout` is an error;
    /// exhausting the bound is not.
    pub fn search(
        &self,
        allowed_length: usize,
        timeout: Duration,
    ) -> Result<Option<Solution>, Error> {
        Search::new(
            &self.cube,
            self.tables,
            allowed_length,
            Instant::now() + timeout,
        )
        .run()
    }

    /// Repeatedly re-searches with a tighter bound until the budget runs
    /// out, keeping the shortest solution found. Returns `None` when the
    /// first search times out before producing anything.
    pub fn search_best(&self, timeout: Duration) -> Option<Solution> {
        let deadline = Instant::now() + timeout;
        let mut best = None;
        let mut allowed_length = 25;
        while allowed_length > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.search(allowed_length, remaining) {
                Ok(Some(solution)) => {
                    log::info!("Found a {} move solution, tightening the bound", solution.len());
                    allowed_length = solution.len().saturating_sub(1);
                    best = Some(solution);
                }
                // Exhaustion means nothing shorter exists; a timeout is
                // swallowed so the best solution so far survives.
                Ok(None) | Err(_) => break,
            }
        }
        best
    }
}

/// A solved move sequence, rendered in Singmaster notation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solution(Vec<Move>);

impl Solution {
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, move_) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", move_)?;
        }
        Ok(())
    }
}

impl IntoIterator for Solution {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Scratch state for one `search` call. Node `i` of the current path keeps
/// its move (`axis`/`power`) and every coordinate, so backtracking is just
/// an index decrement.
struct Search<'a> {
    cube: &'a CubieCube,
    tables: &'a Tables,
    deadline: Instant,
    allowed_length: usize,
    axis: Vec<usize>,
    power: Vec<usize>,
    twist: Vec<usize>,
    flip: Vec<usize>,
    udslice: Vec<usize>,
    edge4: Vec<usize>,
    edge8: Vec<usize>,
    corner: Vec<usize>,
    min_dist_1: Vec<usize>,
    min_dist_2: Vec<usize>,
}

impl<'a> Search<'a> {
    fn new(
        cube: &'a CubieCube,
        tables: &'a Tables,
        allowed_length: usize,
        deadline: Instant,
    ) -> Search<'a> {
        let len = allowed_length + 1;
        Search {
            cube,
            tables,
            deadline,
            allowed_length,
            axis: vec![0; len],
            power: vec![0; len],
            twist: vec![0; len],
            flip: vec![0; len],
            udslice: vec![0; len],
            edge4: vec![0; len],
            edge8: vec![0; len],
            corner: vec![0; len],
            min_dist_1: vec![0; len],
            min_dist_2: vec![0; len],
        }
    }

    fn run(mut self) -> Result<Option<Solution>, Error> {
        let coords = CoordCube::from(self.cube);
        self.twist[0] = coords.twist as usize;
        self.flip[0] = coords.flip as usize;
        self.udslice[0] = coords.udslice as usize;
        self.min_dist_1[0] = self.phase_1_cost(0);

        for depth in 0..self.allowed_length {
            log::debug!("Searching phase 1 to depth {}", depth);
            if let Some(length) = self.phase_1_search(0, depth)? {
                let moves = (0..length)
                    .map(|i| Move::from_axis_power(self.axis[i], self.power[i]))
                    .collect();
                return Ok(Some(Solution(moves)));
            }
        }
        Ok(None)
    }

    fn phase_1_search(&mut self, n: usize, depth: usize) -> Result<Option<usize>, Error> {
        if Instant::now() > self.deadline {
            return Err(Error::SolvingTimeout);
        }
        if self.min_dist_1[n] == 0 {
            // Exactly on the G1 coset: phase 2 takes over from here.
            return self.phase_2_init(n);
        }
        if self.min_dist_1[n] <= depth {
            for face in 0..6 {
                if n > 0 && !Face::ALL[face].may_follow(Face::ALL[self.axis[n - 1]]) {
                    continue;
                }
                for power in 1..=3 {
                    self.axis[n] = face;
                    self.power[n] = power;
                    let m = 3 * face + power - 1;
                    self.twist[n + 1] =
                        self.tables.twist_move[self.twist[n] * N_MOVE + m] as usize;
                    self.flip[n + 1] = self.tables.flip_move[self.flip[n] * N_MOVE + m] as usize;
                    self.udslice[n + 1] =
                        self.tables.udslice_move[self.udslice[n] * N_MOVE + m] as usize;
                    self.min_dist_1[n + 1] = self.phase_1_cost(n + 1);

                    if let Some(length) = self.phase_1_search(n + 1, depth - 1)? {
                        return Ok(Some(length));
                    }
                }
            }
        }
        Ok(None)
    }

    fn phase_2_init(&mut self, n: usize) -> Result<Option<usize>, Error> {
        if Instant::now() > self.deadline {
            return Err(Error::SolvingTimeout);
        }

        // The orientation and slice coordinates are known zero here; the
        // permutation coordinates are recovered by replaying the phase-1
        // moves on a copy of the input cube.
        let mut cube = self.cube.clone();
        for i in 0..n {
            for _ in 0..self.power[i] {
                cube.multiply(&MOVE_CUBES[self.axis[i]]);
            }
        }
        self.edge4[n] = cube.edge4();
        self.edge8[n] = cube.edge8();
        self.corner[n] = cube.corner();
        self.min_dist_2[n] = self.phase_2_cost(n);

        for depth in 0..self.allowed_length - n {
            if let Some(length) = self.phase_2_search(n, depth) {
                log::debug!("Solved at total length {}", length);
                return Ok(Some(length));
            }
        }
        Ok(None)
    }

    fn phase_2_search(&mut self, n: usize, depth: usize) -> Option<usize> {
        if self.min_dist_2[n] == 0 {
            return Some(n);
        }
        if self.min_dist_2[n] <= depth {
            for face in 0..6 {
                if n > 0 && !Face::ALL[face].may_follow(Face::ALL[self.axis[n - 1]]) {
                    continue;
                }
                for power in 1..=3 {
                    // Only U and D may turn a quarter; side faces stay in G1
                    // with half turns alone.
                    if face != 0 && face != 3 && power != 2 {
                        continue;
                    }
                    self.axis[n] = face;
                    self.power[n] = power;
                    let m = 3 * face + power - 1;
                    self.edge4[n + 1] =
                        self.tables.edge4_move[self.edge4[n] * N_MOVE + m] as usize;
                    self.edge8[n + 1] =
                        self.tables.edge8_move[self.edge8[n] * N_MOVE + m] as usize;
                    self.corner[n + 1] =
                        self.tables.corner_move[self.corner[n] * N_MOVE + m] as usize;
                    self.min_dist_2[n + 1] = self.phase_2_cost(n + 1);

                    if let Some(length) = self.phase_2_search(n + 1, depth - 1) {
                        return Some(length);
                    }
                }
            }
        }
        None
    }

    fn phase_1_cost(&self, n: usize) -> usize {
        let udslice = self.udslice[n];
        let twist = self.twist[n];
        let flip = self.flip[n];
        let bound = std::cmp::max(
            self.tables.udslice_twist_prune[udslice * N_TWIST + twist],
            self.tables.udslice_flip_prune[udslice * N_FLIP + flip],
        ) as usize;
        // With orientations solved but the slice unsolved, some side face
        // must still turn a quarter, and undoing its orientation damage
        // costs at least one extra move.
        if twist == 0 && flip == 0 && udslice != 0 {
            bound + 1
        } else {
            bound
        }
    }

    fn phase_2_cost(&self, n: usize) -> usize {
        let edge4 = self.edge4[n];
        std::cmp::max(
            self.tables.edge4_corner_prune[edge4 * N_CORNER + self.corner[n]],
            self.tables.edge4_edge8_prune[edge4 * N_EDGE8 + self.edge8[n]],
        ) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
    const SCRAMBLED: &str = "DFLRUBRDFRLDURRLRRUFDFFLBDFULUUDULBURBBBLRBFLFLBDBDFUD";
    const SUPERFLIP: &str = "UBULURUFURURFRBRDRFUFLFRFDFDFDLDRDBDLULBLFLDLBUBRBLBDB";

    fn assert_solves(facelets: &str, solution: &Solution) {
        let cube: FaceletCube = facelets.parse().unwrap();
        let solved = cube.to_cubie_cube().apply_all(solution.clone());
        assert_eq!(solved, CubieCube::solved());
    }

    #[test]
    fn solved_cube_has_the_empty_solution() {
        let solver = Solver::from_facelets(SOLVED).unwrap();
        let solution = solver
            .search(25, Duration::from_secs(10))
            .unwrap()
            .expect("solved cube is solvable");
        assert!(solution.is_empty());
        assert!(solution.moves().is_empty());
        assert_eq!(solution.to_string(), "");
    }

    #[test]
    fn solves_a_scrambled_cube() {
        let solver = Solver::from_facelets(SCRAMBLED).unwrap();
        let solution = solver
            .search(25, Duration::from_secs(30))
            .unwrap()
            .expect("scramble is solvable within 25 moves");
        assert_solves(SCRAMBLED, &solution);
        assert_eq!(
            solution.to_string(),
            "U2 B' U F L' U2 L' B' U L U R2 U' F2 B2 U' B2 R2 U' R2 F2 U L2 U"
        );
    }

    #[test]
    fn solves_the_superflip() {
        let solver = Solver::from_facelets(SUPERFLIP).unwrap();
        let solution = solver
            .search(25, Duration::from_secs(30))
            .unwrap()
            .expect("superflip is solvable within 25 moves");
        assert_solves(SUPERFLIP, &solution);
        assert_eq!(solution.len(), 23);
    }

    #[test]
    fn solves_random_cubes() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        for _ in 0..5 {
            let cube = random_cube(&mut rng);
            let solver = Solver::new(cube.clone()).unwrap();
            let solution = solver
                .search(25, Duration::from_secs(30))
                .unwrap()
                .expect("random cube is solvable within 25 moves");
            assert_eq!(cube.apply_all(solution), CubieCube::solved());
        }
    }

    #[test]
    fn search_best_improves_or_matches_search() {
        let solver = Solver::from_facelets(SCRAMBLED).unwrap();
        let first = solver
            .search(25, Duration::from_secs(30))
            .unwrap()
            .expect("scramble is solvable");
        let best = solver
            .search_best(Duration::from_secs(5))
            .expect("a first solution appears well before the deadline");
        assert!(best.len() <= first.len());
        assert_solves(SCRAMBLED, &best);
    }

    #[test]
    fn exhaustion_is_not_an_error() {
        let cube = cube_with_moves("R U");
        let solver = Solver::new(cube).unwrap();
        let result = solver.search(1, Duration::from_secs(10)).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn zero_timeout_fails_fast() {
        let solver = Solver::from_facelets(SCRAMBLED).unwrap();
        match solver.search(25, Duration::ZERO) {
            Err(Error::SolvingTimeout) => {}
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn rejects_an_unreachable_cube() {
        let mut cube = CubieCube::solved();
        cube.co[0] = 1;
        match Solver::new(cube) {
            Err(Error::CubeVerificationFailed(VerifyError::CornerOrientationInvalid)) => {}
            other => panic!("expected verification failure, got {:?}", other),
        }
    }

    #[test]
    fn rejects_a_malformed_facelet_string() {
        match Solver::from_facelets("UUU") {
            Err(Error::FaceletInvalidLength(_)) => {}
            other => panic!("expected length error, got {:?}", other),
        }
    }
}
