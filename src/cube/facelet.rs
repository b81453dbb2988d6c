use crate::prelude::*;

use super::Face::{B, D, F, L, R, U};

/// The 54-sticker surface representation, in facelet-string order:
/// U1..U9, R1..R9, F1..F9, D1..D9, L1..L9, B1..B9.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FaceletCube(pub [Face; 54]);

/// Facelet positions of each corner slot's three stickers, U/D sticker
/// first, then clockwise around the corner.
const CORNER_FACELET: [[usize; 3]; 8] = [
    [8, 9, 20],   // URF: U9 R1 F3
    [6, 18, 38],  // UFL: U7 F1 L3
    [0, 36, 47],  // ULB: U1 L1 B3
    [2, 45, 11],  // UBR: U3 B1 R3
    [29, 26, 15], // DFR: D3 F9 R7
    [27, 44, 24], // DLF: D1 L9 F7
    [33, 53, 42], // DBL: D7 B9 L7
    [35, 17, 51], // DRB: D9 R9 B7
];

/// Facelet positions of each edge slot's two stickers.
const EDGE_FACELET: [[usize; 2]; 12] = [
    [5, 10],  // UR: U6 R2
    [7, 19],  // UF: U8 F2
    [3, 37],  // UL: U4 L2
    [1, 46],  // UB: U2 B2
    [32, 16], // DR: D6 R8
    [28, 25], // DF: D2 F8
    [30, 43], // DL: D4 L8
    [34, 52], // DB: D8 B8
    [23, 12], // FR: F6 R4
    [21, 41], // FL: F4 L6
    [50, 39], // BL: B6 L4
    [48, 14], // BR: B4 R6
];

/// Sticker colors of each corner piece, in the same cyclic order as
/// `CORNER_FACELET`.
const CORNER_COLOR: [[Face; 3]; 8] = [
    [U, R, F],
    [U, F, L],
    [U, L, B],
    [U, B, R],
    [D, F, R],
    [D, L, F],
    [D, B, L],
    [D, R, B],
];

const EDGE_COLOR: [[Face; 2]; 12] = [
    [U, R],
    [U, F],
    [U, L],
    [U, B],
    [D, R],
    [D, F],
    [D, L],
    [D, B],
    [F, R],
    [F, L],
    [B, L],
    [B, R],
];

impl FaceletCube {
    pub fn solved() -> FaceletCube {
        FaceletCube::from_cubie_cube(&CubieCube::solved())
    }

    /// Reads off the cubie state from the stickers. The result is not
    /// verified; callers run [`CubieCube::verify`] separately, and an
    /// inconsistent sticker pattern surfaces there as a duplicate piece.
    pub fn to_cubie_cube(&self) -> CubieCube {
        let mut cube = CubieCube {
            cp: [Corner::URF; 8],
            co: [0; 8],
            ep: [Edge::UR; 12],
            eo: [0; 12],
        };

        for slot in 0..8 {
            let facelets = CORNER_FACELET[slot];
            // The U or D sticker marks the orientation.
            let mut ori = 0;
            for (k, &position) in facelets.iter().enumerate() {
                if self.0[position] == U || self.0[position] == D {
                    ori = k;
                    break;
                }
            }
            let col1 = self.0[facelets[(ori + 1) % 3]];
            let col2 = self.0[facelets[(ori + 2) % 3]];
            for piece in 0..8 {
                if col1 == CORNER_COLOR[piece][1] && col2 == CORNER_COLOR[piece][2] {
                    cube.cp[slot] = Corner::ALL[piece];
                    cube.co[slot] = ori as u8;
                    break;
                }
            }
        }

        for slot in 0..12 {
            let col0 = self.0[EDGE_FACELET[slot][0]];
            let col1 = self.0[EDGE_FACELET[slot][1]];
            for piece in 0..12 {
                if col0 == EDGE_COLOR[piece][0] && col1 == EDGE_COLOR[piece][1] {
                    cube.ep[slot] = Edge::ALL[piece];
                    cube.eo[slot] = 0;
                    break;
                }
                if col0 == EDGE_COLOR[piece][1] && col1 == EDGE_COLOR[piece][0] {
                    cube.ep[slot] = Edge::ALL[piece];
                    cube.eo[slot] = 1;
                    break;
                }
            }
        }

        cube
    }

    pub fn from_cubie_cube(cube: &CubieCube) -> FaceletCube {
        let mut f = [U; 54];
        // Centers never move.
        for (i, &face) in Face::ALL.iter().enumerate() {
            f[9 * i + 4] = face;
        }
        for slot in 0..8 {
            let piece = cube.cp[slot] as usize;
            let ori = cube.co[slot] as usize;
            for k in 0..3 {
                f[CORNER_FACELET[slot][(k + ori) % 3]] = CORNER_COLOR[piece][k];
            }
        }
        for slot in 0..12 {
            let piece = cube.ep[slot] as usize;
            let ori = cube.eo[slot] as usize;
            for k in 0..2 {
                f[EDGE_FACELET[slot][(k + ori) % 2]] = EDGE_COLOR[piece][k];
            }
        }
        FaceletCube(f)
    }
}

impl core::str::FromStr for FaceletCube {
    type Err = Error;

    fn from_str(s: &str) -> Result<FaceletCube, Error> {
        if s.chars().count() != 54 {
            return Err(Error::FaceletInvalidLength(s.to_string()));
        }
        let mut facelets = [U; 54];
        for (index, c) in s.chars().enumerate() {
            facelets[index] = match c {
                'U' => U,
                'R' => R,
                'F' => F,
                'D' => D,
                'L' => L,
                'B' => B,
                _ => return Err(Error::FaceletInvalidCharacter(c, index)),
            };
        }
        Ok(FaceletCube(facelets))
    }
}

impl core::fmt::Display for FaceletCube {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for face in self.0 {
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn solved_string_is_the_identity_cube() {
        let cube: FaceletCube = SOLVED.parse().unwrap();
        assert_eq!(cube.to_cubie_cube(), CubieCube::solved());
        assert_eq!(cube.to_string(), SOLVED);
        assert_eq!(FaceletCube::solved(), cube);
    }

    #[test]
    fn rejects_wrong_length() {
        let short = &SOLVED[..53];
        match short.parse::<FaceletCube>() {
            Err(Error::FaceletInvalidLength(s)) => assert_eq!(s, short),
            other => panic!("expected invalid length, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_character() {
        let mut chars: Vec<char> = SOLVED.chars().collect();
        chars[51] = 'X';
        let bad: String = chars.into_iter().collect();
        match bad.parse::<FaceletCube>() {
            Err(Error::FaceletInvalidCharacter(c, index)) => {
                assert_eq!(c, 'X');
                assert_eq!(index, 51);
            }
            other => panic!("expected invalid character, got {:?}", other),
        }
    }

    #[test]
    fn single_moves_round_trip() {
        for mv in Move::all() {
            let cube = CubieCube::solved().apply(mv);
            let facelets = FaceletCube::from_cubie_cube(&cube);
            assert_eq!(facelets.to_cubie_cube(), cube, "round trip of {}", mv);
        }
    }

    #[quickcheck]
    fn cubie_round_trips_through_facelets(moves: Vec<Move>) -> bool {
        let cube = CubieCube::solved().apply_all(moves);
        FaceletCube::from_cubie_cube(&cube).to_cubie_cube() == cube
    }

    #[quickcheck]
    fn string_round_trips_through_parsing(moves: Vec<Move>) -> bool {
        let s = FaceletCube::from_cubie_cube(&CubieCube::solved().apply_all(moves)).to_string();
        s.parse::<FaceletCube>().unwrap().to_string() == s
    }
}
