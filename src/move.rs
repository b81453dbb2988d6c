use crate::cube::*;

pub const N_MOVE: usize = 18;

/// A face turn in Singmaster notation.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub struct Move {
    pub face: Face,
    pub amount: Amount,
}

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, enum_iterator::Sequence)]
pub enum Amount {
    Single,
    Double,
    Reverse,
}

impl Amount {
    pub fn quarter_turns(self) -> usize {
        match self {
            Amount::Single => 1,
            Amount::Double => 2,
            Amount::Reverse => 3,
        }
    }
}

impl Move {
    pub fn new(face: Face, amount: Amount) -> Move {
        Move { face, amount }
    }

    /// All 18 face turns, in move-code order.
    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL.into_iter().flat_map(|face| {
            enum_iterator::all::<Amount>().map(move |amount| Move { face, amount })
        })
    }

    /// The move's index into a move-table row: `3 * face + power - 1`.
    pub fn code(self) -> usize {
        3 * self.face.index() + self.amount.quarter_turns() - 1
    }

    pub(crate) fn from_axis_power(axis: usize, power: usize) -> Move {
        let amount = match power {
            1 => Amount::Single,
            2 => Amount::Double,
            3 => Amount::Reverse,
            _ => unreachable!("power is always 1..=3"),
        };
        Move::new(Face::ALL[axis], amount)
    }

    pub fn parse_sequence(s: &str) -> anyhow::Result<Vec<Move>> {
        s.split_whitespace().map(|s| s.parse()).collect()
    }
}

impl core::str::FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Move> {
        let mut chars = s.chars();
        let face_char = match chars.next() {
            Some(c) => c,
            None => return Err(anyhow::anyhow!("No face for move")),
        };

        let face = match face_char {
            'U' | 'u' => Face::U,
            'R' | 'r' => Face::R,
            'F' | 'f' => Face::F,
            'D' | 'd' => Face::D,
            'L' | 'l' => Face::L,
            'B' | 'b' => Face::B,
            _ => return Err(anyhow::anyhow!("Unrecognized face {}", face_char)),
        };

        let amount = match chars.next() {
            None => Amount::Single,
            Some('2') => Amount::Double,
            Some('\'') => Amount::Reverse,
            Some(c) => return Err(anyhow::anyhow!("Unrecognized amount {}", c)),
        };

        Ok(Move { face, amount })
    }
}

impl core::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let suffix = match self.amount {
            Amount::Single => "",
            Amount::Double => "2",
            Amount::Reverse => "'",
        };
        write!(f, "{}{}", self.face, suffix)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Move {
    fn arbitrary(g: &mut quickcheck::Gen) -> Move {
        *g.choose(&Move::all().collect::<Vec<_>>()).unwrap()
    }
}
