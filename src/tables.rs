//! Move tables and pruning tables.
//!
//! Move tables advance one coordinate by one move in a single lookup.
//! Pruning tables hold BFS distances over a pair of coordinates and give the
//! search an admissible lower bound. Everything is a flat buffer with an
//! explicit stride; the tables are built once per process and shared
//! read-only.

use crate::prelude::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tables {
    /// `twist_move[twist * 18 + m]`: twist after move `m`.
    pub twist_move: Vec<i32>,
    pub flip_move: Vec<i32>,
    pub udslice_move: Vec<i32>,
    /// Phase-2 move tables carry `-1` where the move leaves G1 (a quarter
    /// turn of a side face); those entries are never read in phase 2.
    pub edge4_move: Vec<i32>,
    pub edge8_move: Vec<i32>,
    pub corner_move: Vec<i32>,
    /// `udslice_twist_prune[udslice * 2187 + twist]`: lower bound on the
    /// moves needed to reach `(0, 0)`.
    pub udslice_twist_prune: Vec<i32>,
    pub udslice_flip_prune: Vec<i32>,
    pub edge4_edge8_prune: Vec<i32>,
    pub edge4_corner_prune: Vec<i32>,
}

lazy_static::lazy_static! {
    static ref TABLES: Tables = Tables::build();
}

/// The process-wide tables, built on first access and shared read-only by
/// every solver.
pub fn tables() -> &'static Tables {
    &TABLES
}

/// Forces table construction now instead of on first use.
pub fn init_tables() {
    lazy_static::initialize(&TABLES);
}

impl Tables {
    pub fn build() -> Tables {
        let start = Instant::now();
        log::info!("Building move tables");

        let twist_move = move_table(N_TWIST, CubieCube::set_twist, CubieCube::twist, false);
        let flip_move = move_table(N_FLIP, CubieCube::set_flip, CubieCube::flip, false);
        let udslice_move = move_table(N_UDSLICE, CubieCube::set_udslice, CubieCube::udslice, false);
        let edge4_move = move_table(N_EDGE4, CubieCube::set_edge4, CubieCube::edge4, true);
        let edge8_move = move_table(N_EDGE8, CubieCube::set_edge8, CubieCube::edge8, true);
        let corner_move = move_table(N_CORNER, CubieCube::set_corner, CubieCube::corner, true);

        log::info!("Building pruning tables");
        let udslice_twist_prune = prune_table(&udslice_move, &twist_move, N_TWIST);
        let udslice_flip_prune = prune_table(&udslice_move, &flip_move, N_FLIP);
        let edge4_edge8_prune = prune_table(&edge4_move, &edge8_move, N_EDGE8);
        let edge4_corner_prune = prune_table(&edge4_move, &corner_move, N_CORNER);

        log::info!("Finished building tables, took {:?}", start.elapsed());
        Tables {
            twist_move,
            flip_move,
            udslice_move,
            edge4_move,
            edge8_move,
            corner_move,
            udslice_twist_prune,
            udslice_flip_prune,
            edge4_edge8_prune,
            edge4_corner_prune,
        }
    }

    /// Loads tables from `path`, picking the format by extension: `.json`
    /// is the JSON layout, anything else the little-endian binary layout.
    pub fn load(path: impl AsRef<Path>) -> Result<Tables, Error> {
        let path = path.as_ref();
        if path.extension().is_some_and(|e| e == "json") {
            Tables::load_json(path)
        } else {
            Tables::load_binary(path)
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if path.extension().is_some_and(|e| e == "json") {
            self.save_json(path)
        } else {
            self.save_binary(path)
        }
    }

    /// Entry counts of the ten tables, in wire order.
    const LAYOUT: [usize; 10] = [
        N_TWIST * N_MOVE,
        N_FLIP * N_MOVE,
        N_UDSLICE * N_MOVE,
        N_EDGE4 * N_MOVE,
        N_EDGE8 * N_MOVE,
        N_CORNER * N_MOVE,
        N_UDSLICE * N_TWIST,
        N_UDSLICE * N_FLIP,
        N_EDGE4 * N_EDGE8,
        N_EDGE4 * N_CORNER,
    ];

    fn wire_order(&self) -> [&Vec<i32>; 10] {
        [
            &self.twist_move,
            &self.flip_move,
            &self.udslice_move,
            &self.edge4_move,
            &self.edge8_move,
            &self.corner_move,
            &self.udslice_twist_prune,
            &self.udslice_flip_prune,
            &self.edge4_edge8_prune,
            &self.edge4_corner_prune,
        ]
    }

    pub fn save_binary(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = fs::File::create(path).map_err(Error::TablesSaveFailed)?;
        let mut out = std::io::BufWriter::new(file);
        for table in self.wire_order() {
            for &entry in table {
                out.write_all(&entry.to_le_bytes())
                    .map_err(Error::TablesSaveFailed)?;
            }
        }
        out.flush().map_err(Error::TablesSaveFailed)
    }

    pub fn load_binary(path: impl AsRef<Path>) -> Result<Tables, Error> {
        let data = fs::read(path).map_err(Error::TablesLoadFailed)?;
        let expected: usize = Tables::LAYOUT.iter().sum();
        if data.len() != expected * 4 {
            return Err(Error::TablesLoadInvalidData);
        }

        let mut offset = 0;
        let mut take = |entries: usize| -> Vec<i32> {
            let bytes = &data[offset * 4..(offset + entries) * 4];
            offset += entries;
            bytes
                .chunks_exact(4)
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect()
        };

        Ok(Tables {
            twist_move: take(N_TWIST * N_MOVE),
            flip_move: take(N_FLIP * N_MOVE),
            udslice_move: take(N_UDSLICE * N_MOVE),
            edge4_move: take(N_EDGE4 * N_MOVE),
            edge8_move: take(N_EDGE8 * N_MOVE),
            corner_move: take(N_CORNER * N_MOVE),
            udslice_twist_prune: take(N_UDSLICE * N_TWIST),
            udslice_flip_prune: take(N_UDSLICE * N_FLIP),
            edge4_edge8_prune: take(N_EDGE4 * N_EDGE8),
            edge4_corner_prune: take(N_EDGE4 * N_CORNER),
        })
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = fs::File::create(path).map_err(Error::TablesSaveFailed)?;
        serde_json::to_writer(std::io::BufWriter::new(file), &TablesFile::from(self))
            .map_err(|e| Error::TablesSaveFailed(e.into()))
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Tables, Error> {
        let data = fs::read(path).map_err(Error::TablesLoadFailed)?;
        let file: TablesFile =
            serde_json::from_slice(&data).map_err(|_| Error::TablesLoadInvalidData)?;
        Tables::try_from(file)
    }
}

/// The JSON layout: move tables as row-per-coordinate 2-D arrays, pruning
/// tables flat row-major.
#[derive(Serialize, Deserialize)]
struct TablesFile {
    twist_move: Vec<Vec<i32>>,
    flip_move: Vec<Vec<i32>>,
    udslice_move: Vec<Vec<i32>>,
    edge4_move: Vec<Vec<i32>>,
    edge8_move: Vec<Vec<i32>>,
    corner_move: Vec<Vec<i32>>,
    udslice_twist_prune: Vec<i32>,
    udslice_flip_prune: Vec<i32>,
    edge4_edge8_prune: Vec<i32>,
    edge4_corner_prune: Vec<i32>,
}

impl From<&Tables> for TablesFile {
    fn from(tables: &Tables) -> TablesFile {
        fn rows(table: &[i32]) -> Vec<Vec<i32>> {
            table.chunks(N_MOVE).map(|row| row.to_vec()).collect()
        }
        TablesFile {
            twist_move: rows(&tables.twist_move),
            flip_move: rows(&tables.flip_move),
            udslice_move: rows(&tables.udslice_move),
            edge4_move: rows(&tables.edge4_move),
            edge8_move: rows(&tables.edge8_move),
            corner_move: rows(&tables.corner_move),
            udslice_twist_prune: tables.udslice_twist_prune.clone(),
            udslice_flip_prune: tables.udslice_flip_prune.clone(),
            edge4_edge8_prune: tables.edge4_edge8_prune.clone(),
            edge4_corner_prune: tables.edge4_corner_prune.clone(),
        }
    }
}

impl TryFrom<TablesFile> for Tables {
    type Error = Error;

    fn try_from(file: TablesFile) -> Result<Tables, Error> {
        let flatten = |rows: Vec<Vec<i32>>, count: usize| -> Result<Vec<i32>, Error> {
            if rows.len() != count || rows.iter().any(|row| row.len() != N_MOVE) {
                return Err(Error::TablesLoadInvalidData);
            }
            Ok(rows.into_iter().flatten().collect())
        };
        let sized = |flat: Vec<i32>, entries: usize| -> Result<Vec<i32>, Error> {
            if flat.len() != entries {
                return Err(Error::TablesLoadInvalidData);
            }
            Ok(flat)
        };

        Ok(Tables {
            twist_move: flatten(file.twist_move, N_TWIST)?,
            flip_move: flatten(file.flip_move, N_FLIP)?,
            udslice_move: flatten(file.udslice_move, N_UDSLICE)?,
            edge4_move: flatten(file.edge4_move, N_EDGE4)?,
            edge8_move: flatten(file.edge8_move, N_EDGE8)?,
            corner_move: flatten(file.corner_move, N_CORNER)?,
            udslice_twist_prune: sized(file.udslice_twist_prune, N_UDSLICE * N_TWIST)?,
            udslice_flip_prune: sized(file.udslice_flip_prune, N_UDSLICE * N_FLIP)?,
            edge4_edge8_prune: sized(file.edge4_edge8_prune, N_EDGE4 * N_EDGE8)?,
            edge4_corner_prune: sized(file.edge4_corner_prune, N_EDGE4 * N_CORNER)?,
        })
    }
}

/// Walks the coordinate graph: set each coordinate value on a cubie cube,
/// then record the coordinate after one, two, and three quarter turns of
/// every face. The fourth turn restores the cube for the next face.
fn move_table(
    count: usize,
    set: fn(&mut CubieCube, usize),
    get: fn(&CubieCube) -> usize,
    g1_only: bool,
) -> Vec<i32> {
    let mut table = vec![0; count * N_MOVE];
    let mut cube = CubieCube::solved();
    for x in 0..count {
        set(&mut cube, x);
        for (face, move_cube) in MOVE_CUBES.iter().enumerate() {
            for power in 1..=3 {
                cube.multiply(move_cube);
                let legal = !g1_only || face == 0 || face == 3 || power == 2;
                table[x * N_MOVE + 3 * face + power - 1] =
                    if legal { get(&cube) as i32 } else { -1 };
            }
            cube.multiply(move_cube);
        }
    }
    table
}

/// BFS over the composite coordinate `a * b_count + b`, seeded with the goal
/// `(0, 0)` at distance 0. A `-1` factor in a move table marks a move that
/// is illegal for that coordinate; the transition is not an edge.
fn prune_table(a_move: &[i32], b_move: &[i32], b_count: usize) -> Vec<i32> {
    let total = (a_move.len() / N_MOVE) * b_count;
    let mut table = vec![-1; total];
    table[0] = 0;
    let mut filled = 1;
    let mut depth = 0;
    while filled < total {
        for index in 0..total {
            if table[index] != depth {
                continue;
            }
            let a = index / b_count;
            let b = index % b_count;
            for m in 0..N_MOVE {
                let a1 = a_move[a * N_MOVE + m];
                let b1 = b_move[b * N_MOVE + m];
                if a1 < 0 || b1 < 0 {
                    continue;
                }
                let next = a1 as usize * b_count + b1 as usize;
                if table[next] < 0 {
                    table[next] = depth + 1;
                    filled += 1;
                }
            }
        }
        depth += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twist_of_solved_after_basic_moves() {
        let tables = tables();
        // U and D leave corner orientations alone.
        for m in [0, 1, 2, 9, 10, 11] {
            assert_eq!(tables.twist_move[m], 0);
        }
        // R twists four corners: co = [2,0,0,1,1,0,0,2].
        assert_eq!(tables.twist_move[Move::parse_sequence("R").unwrap()[0].code()], 1494);
    }

    #[test]
    fn four_quarter_turns_fix_every_coordinate() {
        let tables = tables();
        let cases: [(&Vec<i32>, usize); 3] = [
            (&tables.twist_move, N_TWIST),
            (&tables.flip_move, N_FLIP),
            (&tables.udslice_move, N_UDSLICE),
        ];
        for (table, count) in cases {
            for x in (0..count).step_by(17) {
                for face in 0..6 {
                    let m = 3 * face; // quarter turn
                    let mut y = x;
                    for _ in 0..4 {
                        y = table[y * N_MOVE + m] as usize;
                    }
                    assert_eq!(y, x);
                }
            }
        }
    }

    #[test]
    fn half_turns_are_self_inverse_in_phase_2_tables() {
        let tables = tables();
        let cases: [(&Vec<i32>, usize); 3] = [
            (&tables.edge4_move, N_EDGE4),
            (&tables.edge8_move, N_EDGE8),
            (&tables.corner_move, N_CORNER),
        ];
        for (table, count) in cases {
            for x in (0..count).step_by(13) {
                for face in 0..6 {
                    let m = 3 * face + 1; // half turn
                    let y = table[x * N_MOVE + m];
                    assert!(y >= 0);
                    assert_eq!(table[y as usize * N_MOVE + m] as usize, x);
                }
            }
        }
    }

    #[test]
    fn phase_2_tables_mark_side_quarter_turns_illegal() {
        let tables = tables();
        for x in (0..N_EDGE4).step_by(5) {
            for face in 0..6 {
                for power in 1..=3 {
                    let entry = tables.edge4_move[x * N_MOVE + 3 * face + power - 1];
                    let legal = face == 0 || face == 3 || power == 2;
                    assert_eq!(entry >= 0, legal);
                }
            }
        }
    }

    #[test]
    fn pruning_tables_are_complete_and_rooted_at_the_goal() {
        let tables = tables();
        for prune in [
            &tables.udslice_twist_prune,
            &tables.udslice_flip_prune,
            &tables.edge4_edge8_prune,
            &tables.edge4_corner_prune,
        ] {
            assert_eq!(prune[0], 0);
            assert!(prune.iter().all(|&d| (0..20).contains(&d)));
        }
    }

    #[test]
    fn phase_1_pruning_never_exceeds_move_count() {
        let tables = tables();
        // Walk random-ish move sequences in coordinate space; the BFS
        // distance back to the goal can never exceed the walk length.
        let moves: Vec<usize> = vec![3, 7, 16, 0, 5, 11, 8, 14, 2, 9, 17, 4];
        let mut udslice = 0;
        let mut twist = 0;
        let mut flip = 0;
        for (steps, &m) in moves.iter().enumerate() {
            udslice = tables.udslice_move[udslice * N_MOVE + m] as usize;
            twist = tables.twist_move[twist * N_MOVE + m] as usize;
            flip = tables.flip_move[flip * N_MOVE + m] as usize;
            assert!(tables.udslice_twist_prune[udslice * N_TWIST + twist] <= steps as i32 + 1);
            assert!(tables.udslice_flip_prune[udslice * N_FLIP + flip] <= steps as i32 + 1);
        }
    }

    #[test]
    fn phase_2_pruning_never_exceeds_move_count() {
        let tables = tables();
        let g1_moves = Move::parse_sequence("U R2 D' F2 U2 B2 L2 D U' R2").unwrap();
        let mut coords = CoordCube::solved();
        for (steps, &m) in g1_moves.iter().enumerate() {
            coords.apply(m, tables);
            let edge4 = coords.edge4 as usize;
            let h = std::cmp::max(
                tables.edge4_corner_prune[edge4 * N_CORNER + coords.corner as usize],
                tables.edge4_edge8_prune[edge4 * N_EDGE8 + coords.edge8 as usize],
            );
            assert!(h <= steps as i32 + 1);
        }
    }

    #[cfg(test)]
    mod persistence {
        use super::*;

        fn scratch_path(name: &str) -> std::path::PathBuf {
            std::env::temp_dir().join(format!("twophase-{}-{}", std::process::id(), name))
        }

        #[test]
        fn binary_round_trip_matches_built_tables() {
            let path = scratch_path("tables.bin");
            let built = tables();
            built.save(&path).unwrap();
            let loaded = Tables::load(&path).unwrap();
            fs::remove_file(&path).unwrap();
            assert_eq!(&loaded, built);
        }

        #[test]
        fn json_round_trip_matches_built_tables() {
            let path = scratch_path("tables.json");
            let built = tables();
            built.save(&path).unwrap();
            let loaded = Tables::load(&path).unwrap();
            fs::remove_file(&path).unwrap();
            assert_eq!(&loaded, built);
        }

        #[test]
        fn truncated_binary_is_invalid_data() {
            let path = scratch_path("truncated.bin");
            fs::write(&path, [0u8; 1024]).unwrap();
            let result = Tables::load(&path);
            fs::remove_file(&path).unwrap();
            assert!(matches!(result, Err(Error::TablesLoadInvalidData)));
        }

        #[test]
        fn mistyped_json_is_invalid_data() {
            let path = scratch_path("mistyped.json");
            fs::write(&path, r#"{"twist_move": "not a table"}"#).unwrap();
            let result = Tables::load(&path);
            fs::remove_file(&path).unwrap();
            assert!(matches!(result, Err(Error::TablesLoadInvalidData)));
        }

        #[test]
        fn missing_file_is_a_load_failure() {
            let result = Tables::load(scratch_path("does-not-exist.bin"));
            assert!(matches!(result, Err(Error::TablesLoadFailed(_))));
        }
    }
}
