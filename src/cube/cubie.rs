use crate::prelude::*;

use super::Corner::*;
use super::Edge::*;

/// Permutation-and-orientation representation of the cube.
///
/// `cp[i]` / `ep[i]` name the piece currently sitting in slot `i`; `co[i]`
/// (mod 3) and `eo[i]` (mod 2) give that piece's orientation. The solved cube
/// is the identity of the group.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

impl CubieCube {
    pub fn solved() -> CubieCube {
        CubieCube {
            cp: Corner::ALL,
            co: [0; 8],
            ep: Edge::ALL,
            eo: [0; 12],
        }
    }

    /// Composes the corner state: first `self`, then `other`.
    pub fn corner_multiply(&mut self, other: &CubieCube) {
        let mut cp = [URF; 8];
        let mut co = [0; 8];
        for i in 0..8 {
            let j = other.cp[i] as usize;
            cp[i] = self.cp[j];
            co[i] = (self.co[j] + other.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Composes the edge state: first `self`, then `other`.
    pub fn edge_multiply(&mut self, other: &CubieCube) {
        let mut ep = [UR; 12];
        let mut eo = [0; 12];
        for i in 0..12 {
            let j = other.ep[i] as usize;
            ep[i] = self.ep[j];
            eo[i] = (self.eo[j] + other.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    pub fn multiply(&mut self, other: &CubieCube) {
        self.corner_multiply(other);
        self.edge_multiply(other);
    }

    pub fn inverse(&self) -> CubieCube {
        let mut inv = CubieCube::solved();
        for i in 0..12 {
            inv.ep[self.ep[i] as usize] = Edge::ALL[i];
        }
        for i in 0..12 {
            inv.eo[i] = self.eo[inv.ep[i] as usize];
        }
        for i in 0..8 {
            inv.cp[self.cp[i] as usize] = Corner::ALL[i];
        }
        for i in 0..8 {
            inv.co[i] = (3 - self.co[inv.cp[i] as usize]) % 3;
        }
        inv
    }

    pub fn apply(mut self, move_: Move) -> Self {
        for _ in 0..move_.amount.quarter_turns() {
            self.multiply(&MOVE_CUBES[move_.face.index()]);
        }
        self
    }

    pub fn apply_all(self, moves: impl IntoIterator<Item = Move>) -> Self {
        moves.into_iter().fold(self, |cube, m| cube.apply(m))
    }

    /// Permutation parity of the corners: inversion count mod 2.
    pub fn corner_parity(&self) -> bool {
        let mut inversions = 0;
        for i in 1..8 {
            for j in 0..i {
                if self.cp[j] > self.cp[i] {
                    inversions += 1;
                }
            }
        }
        inversions % 2 == 1
    }

    pub fn edge_parity(&self) -> bool {
        let mut inversions = 0;
        for i in 1..12 {
            for j in 0..i {
                if self.ep[j] > self.ep[i] {
                    inversions += 1;
                }
            }
        }
        inversions % 2 == 1
    }

    /// Checks every invariant of a physically reachable cube.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let mut edge_count = [0; 12];
        for e in self.ep {
            edge_count[e as usize] += 1;
        }
        if edge_count.iter().any(|&c| c != 1) {
            return Err(VerifyError::NotAllEdgesUnique);
        }

        let mut corner_count = [0; 8];
        for c in self.cp {
            corner_count[c as usize] += 1;
        }
        if corner_count.iter().any(|&c| c != 1) {
            return Err(VerifyError::NotAllCornersUnique);
        }

        if self.eo.iter().any(|&o| o > 1) || self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0
        {
            return Err(VerifyError::EdgeOrientationInvalid);
        }
        if self.co.iter().any(|&o| o > 2) || self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0
        {
            return Err(VerifyError::CornerOrientationInvalid);
        }

        if self.edge_parity() != self.corner_parity() {
            return Err(VerifyError::ParityMismatch);
        }
        Ok(())
    }
}

/// The six basic 90-degree clockwise face turns as group elements. Every
/// other move is a power of one of these.
pub const MOVE_CUBES: [CubieCube; 6] = [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE];

const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
    co: [2, 0, 0, 1, 1, 0, 0, 2],
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};
