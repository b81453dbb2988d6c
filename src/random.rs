use crate::prelude::*;

use rand::Rng;

/// Draws a uniformly random legal cube.
///
/// Orientations are free; the permutation pair is rejection-sampled until
/// edge and corner parity agree, which keeps exactly the reachable 1/12 of
/// the raw coordinate space.
pub fn random_cube<R: Rng + ?Sized>(rng: &mut R) -> CubieCube {
    let mut cube = CubieCube::solved();
    cube.set_flip(rng.gen_range(0..N_FLIP));
    cube.set_twist(rng.gen_range(0..N_TWIST));
    loop {
        cube.set_corner(rng.gen_range(0..N_CORNER));
        cube.set_edge(rng.gen_range(0..N_EDGE));
        if cube.edge_parity() == cube.corner_parity() {
            return cube;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn random_cubes_always_verify() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        for _ in 0..200 {
            random_cube(&mut rng).verify().unwrap();
        }
    }

    #[test]
    fn random_cubes_are_rarely_solved() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(2);
        let solved = (0..50)
            .filter(|_| random_cube(&mut rng) == CubieCube::solved())
            .count();
        assert_eq!(solved, 0);
    }
}
