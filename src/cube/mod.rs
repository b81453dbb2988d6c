mod coord;
mod cubie;
mod facelet;

pub use coord::{
    CoordCube, N_CORNER, N_EDGE, N_EDGE4, N_EDGE8, N_FLIP, N_TWIST, N_UDSLICE,
};
pub use cubie::{CubieCube, MOVE_CUBES};
pub use facelet::FaceletCube;

/// The six faces, in the order they appear in a facelet string. Colors are
/// identified with the face they belong to on a solved cube.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, enum_iterator::Sequence)]
#[repr(u8)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether a turn of this face directly after one of `prev` is
    /// canonical. Same-face repeats collapse, and opposite faces commute,
    /// so only one order of an axis pair is kept; the `+ 3` test never
    /// wraps, which is what admits the high-numbered face first.
    pub fn may_follow(self, prev: Face) -> bool {
        prev.index() != self.index() && prev.index() != self.index() + 3
    }
}

impl core::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Face::U => "U",
                Face::R => "R",
                Face::F => "F",
                Face::D => "D",
                Face::L => "L",
                Face::B => "B",
            }
        )
    }
}

/// Corner slots, named by their three adjacent faces.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, enum_iterator::Sequence)]
#[repr(u8)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::URF,
        Corner::UFL,
        Corner::ULB,
        Corner::UBR,
        Corner::DFR,
        Corner::DLF,
        Corner::DBL,
        Corner::DRB,
    ];
}

/// Edge slots. The last four (FR, FL, BL, BR) form the UD slice.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, enum_iterator::Sequence)]
#[repr(u8)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::UR,
        Edge::UF,
        Edge::UL,
        Edge::UB,
        Edge::DR,
        Edge::DF,
        Edge::DL,
        Edge::DB,
        Edge::FR,
        Edge::FL,
        Edge::BL,
        Edge::BR,
    ];

    pub fn is_slice(self) -> bool {
        self >= Edge::FR
    }
}
