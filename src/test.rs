use crate::prelude::*;

pub fn cube_with_moves(moves: &str) -> CubieCube {
    CubieCube::solved().apply_all(Move::parse_sequence(moves).unwrap())
}
