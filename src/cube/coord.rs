//! Coordinate encodings: bijections between cubie states and the compact
//! integer indices that drive the table lookups.

use crate::prelude::*;

pub const N_TWIST: usize = 2187; // 3^7 corner orientations
pub const N_FLIP: usize = 2048; // 2^11 edge orientations
pub const N_UDSLICE: usize = 495; // C(12, 4) slice-edge position sets
pub const N_EDGE4: usize = 24; // 4! slice-edge permutations
pub const N_EDGE8: usize = 40320; // 8! non-slice-edge permutations
pub const N_CORNER: usize = 40320; // 8! corner permutations
pub const N_EDGE: usize = 479001600; // 12! full edge permutations

impl CubieCube {
    pub fn twist(&self) -> usize {
        self.co[..7].iter().fold(0, |t, &o| 3 * t + o as usize)
    }

    /// Inverse of [`twist`](Self::twist); the eighth orientation is forced by
    /// the orientation-sum invariant.
    pub fn set_twist(&mut self, mut twist: usize) {
        let mut total = 0;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            total += twist % 3;
            twist /= 3;
        }
        self.co[7] = ((3 - total % 3) % 3) as u8;
    }

    pub fn flip(&self) -> usize {
        self.eo[..11].iter().fold(0, |f, &o| 2 * f + o as usize)
    }

    pub fn set_flip(&mut self, mut flip: usize) {
        let mut total = 0;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            total += flip % 2;
            flip /= 2;
        }
        self.eo[11] = (total % 2) as u8;
    }

    /// Combinatorial rank of the set of positions occupied by the four slice
    /// edges, ignoring their order.
    pub fn udslice(&self) -> usize {
        let mut udslice = 0;
        let mut seen = 0;
        for j in 0..12 {
            if self.ep[j].is_slice() {
                seen += 1;
            } else if seen > 0 {
                udslice += choose(j, seen - 1);
            }
        }
        udslice
    }

    pub fn set_udslice(&mut self, mut udslice: usize) {
        const SLICE: [Edge; 4] = [Edge::FR, Edge::FL, Edge::BL, Edge::BR];

        let mut placed = [None; 12];
        let mut seen: i32 = 3;
        for j in (0..12).rev() {
            if seen < 0 {
                break;
            }
            let c = choose(j, seen as usize);
            if udslice < c {
                placed[j] = Some(SLICE[seen as usize]);
                seen -= 1;
            } else {
                udslice -= c;
            }
        }

        let mut next_other = 0;
        for j in 0..12 {
            self.ep[j] = placed[j].unwrap_or_else(|| {
                next_other += 1;
                Edge::ALL[next_other - 1]
            });
        }
    }

    /// Lehmer rank of the slice-edge permutation. Meaningful inside G1,
    /// where the slice positions hold slice edges.
    pub fn edge4(&self) -> usize {
        permutation_rank(core::array::from_fn::<_, 4, _>(|i| {
            self.ep[8 + i] as usize
        }))
    }

    pub fn set_edge4(&mut self, edge4: usize) {
        let perm = permutation_unrank::<4>(edge4);
        for j in 0..8 {
            self.ep[j] = Edge::ALL[j];
        }
        for (j, &p) in perm.iter().enumerate() {
            self.ep[8 + j] = Edge::ALL[8 + p];
        }
    }

    /// Lehmer rank of the non-slice-edge permutation. Meaningful inside G1.
    pub fn edge8(&self) -> usize {
        permutation_rank(core::array::from_fn::<_, 8, _>(|i| self.ep[i] as usize))
    }

    pub fn set_edge8(&mut self, edge8: usize) {
        let perm = permutation_unrank::<8>(edge8);
        for (j, &p) in perm.iter().enumerate() {
            self.ep[j] = Edge::ALL[p];
        }
        for j in 8..12 {
            self.ep[j] = Edge::ALL[j];
        }
    }

    pub fn corner(&self) -> usize {
        permutation_rank(core::array::from_fn::<_, 8, _>(|i| self.cp[i] as usize))
    }

    pub fn set_corner(&mut self, corner: usize) {
        let perm = permutation_unrank::<8>(corner);
        for (j, &p) in perm.iter().enumerate() {
            self.cp[j] = Corner::ALL[p];
        }
    }

    /// Rank of the full twelve-edge permutation. Only the random-cube
    /// generator needs this one.
    pub fn edge(&self) -> usize {
        permutation_rank(core::array::from_fn::<_, 12, _>(|i| self.ep[i] as usize))
    }

    pub fn set_edge(&mut self, edge: usize) {
        let perm = permutation_unrank::<12>(edge);
        for (j, &p) in perm.iter().enumerate() {
            self.ep[j] = Edge::ALL[p];
        }
    }
}

/// The six-coordinate projection of a cubie cube. Moves advance it through
/// table lookups alone.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CoordCube {
    pub twist: u16,
    pub flip: u16,
    pub udslice: u16,
    pub edge4: u16,
    pub edge8: u16,
    pub corner: u16,
}

impl From<&CubieCube> for CoordCube {
    fn from(cube: &CubieCube) -> Self {
        CoordCube {
            twist: cube.twist() as u16,
            flip: cube.flip() as u16,
            udslice: cube.udslice() as u16,
            edge4: cube.edge4() as u16,
            edge8: cube.edge8() as u16,
            corner: cube.corner() as u16,
        }
    }
}

impl CoordCube {
    pub fn solved() -> CoordCube {
        CoordCube {
            twist: 0,
            flip: 0,
            udslice: 0,
            edge4: 0,
            edge8: 0,
            corner: 0,
        }
    }

    /// Advances every coordinate by one table lookup. The phase-2
    /// coordinates (edge4, edge8, corner) are only tracked across moves that
    /// stay inside G1; after any other move they are undefined until reset
    /// from a cubie cube.
    pub fn apply(&mut self, move_: Move, tables: &Tables) {
        let m = move_.code();
        self.twist = tables.twist_move[self.twist as usize * N_MOVE + m] as u16;
        self.flip = tables.flip_move[self.flip as usize * N_MOVE + m] as u16;
        self.udslice = tables.udslice_move[self.udslice as usize * N_MOVE + m] as u16;

        let edge4 = tables.edge4_move[self.edge4 as usize * N_MOVE + m];
        let edge8 = tables.edge8_move[self.edge8 as usize * N_MOVE + m];
        let corner = tables.corner_move[self.corner as usize * N_MOVE + m];
        debug_assert!(
            edge4 >= 0 && edge8 >= 0 && corner >= 0,
            "phase-2 coordinate advanced across a move outside G1"
        );
        self.edge4 = edge4 as u16;
        self.edge8 = edge8 as u16;
        self.corner = corner as u16;
    }
}

pub(crate) fn choose(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let mut c = 1;
    for i in 0..k {
        c = c * (n - i) / (i + 1);
    }
    c
}

/// Rank in the factorial number system: digit `j` counts the entries left of
/// `j` that exceed `perm[j]`, processed from the high index down.
fn permutation_rank<const N: usize>(perm: [usize; N]) -> usize {
    let mut rank = 0;
    for j in (1..N).rev() {
        let digit = perm[..j].iter().filter(|&&p| p > perm[j]).count();
        rank = (rank + digit) * j;
    }
    rank
}

fn permutation_unrank<const N: usize>(mut rank: usize) -> [usize; N] {
    let mut digits = [0; N];
    for j in 1..N {
        digits[j] = rank % (j + 1);
        rank /= j + 1;
    }

    let mut remaining: Vec<usize> = (0..N).collect();
    let mut perm = [0; N];
    for j in (0..N).rev() {
        perm[j] = remaining.remove(remaining.len() - 1 - digits[j]);
    }
    perm
}
