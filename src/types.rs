use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use simple_error::SimpleError;

///One of the eight rays walked outward from a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    South,
    North,
    SouthEast,
    NorthWest,
    NorthEast,
    SouthWest,
}

///All directions, in the order in which they are searched
pub const DIRECTIONS: [Direction; 8] = [
    Direction::East,
    Direction::West,
    Direction::South,
    Direction::North,
    Direction::SouthEast,
    Direction::NorthWest,
    Direction::NorthEast,
    Direction::SouthWest,
];

impl Direction {
    ///Unit step as (row delta, column delta)
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Self::East => (0, 1),
            Self::West => (0, -1),
            Self::South => (1, 0),
            Self::North => (-1, 0),
            Self::SouthEast => (1, 1),
            Self::NorthWest => (-1, -1),
            Self::NorthEast => (-1, 1),
            Self::SouthWest => (1, -1),
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::East => "e",
            Self::West => "w",
            Self::South => "s",
            Self::North => "n",
            Self::SouthEast => "se",
            Self::NorthWest => "nw",
            Self::NorthEast => "ne",
            Self::SouthWest => "sw",
        }
    }

    pub fn flag(&self) -> Directions {
        match self {
            Self::East => Directions::EAST,
            Self::West => Directions::WEST,
            Self::South => Directions::SOUTH,
            Self::North => Directions::NORTH,
            Self::SouthEast => Directions::SOUTHEAST,
            Self::NorthWest => Directions::NORTHWEST,
            Self::NorthEast => Directions::NORTHEAST,
            Self::SouthWest => Directions::SOUTHWEST,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::East => "east",
            Self::West => "west",
            Self::South => "south",
            Self::North => "north",
            Self::SouthEast => "southeast",
            Self::NorthWest => "northwest",
            Self::NorthEast => "northeast",
            Self::SouthWest => "southwest",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = SimpleError;

    ///Accepts both the abbreviation (`se`) and the full name (`southeast`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        for direction in DIRECTIONS.iter() {
            if s == direction.abbreviation() || s == direction.to_string() {
                return Ok(*direction);
            }
        }
        Err(SimpleError::new(format!("Unknown direction: {}", s)))
    }
}

bitflags! {
    ///A set of directions to search in
    pub struct Directions: u8 {
        const EAST = 0b0000_0001;
        const WEST = 0b0000_0010;
        const SOUTH = 0b0000_0100;
        const NORTH = 0b0000_1000;
        const SOUTHEAST = 0b0001_0000;
        const NORTHWEST = 0b0010_0000;
        const NORTHEAST = 0b0100_0000;
        const SOUTHWEST = 0b1000_0000;

        const HORIZONTAL = Self::EAST.bits | Self::WEST.bits;
        const VERTICAL = Self::SOUTH.bits | Self::NORTH.bits;
        const DIAGONAL = Self::SOUTHEAST.bits | Self::NORTHWEST.bits | Self::NORTHEAST.bits | Self::SOUTHWEST.bits;
        ///Only the directions in which text reads forward (left to right, top to bottom)
        const FORWARD = Self::EAST.bits | Self::SOUTH.bits | Self::SOUTHEAST.bits | Self::NORTHEAST.bits;
    }
}

impl Directions {
    ///Parses a comma separated list of directions (abbreviations or full names), `all` selects everything
    pub fn parse(list: &str) -> Result<Self, SimpleError> {
        let mut directions = Directions::empty();
        for item in list.split(',').map(|x| x.trim()).filter(|x| !x.is_empty()) {
            if item.eq_ignore_ascii_case("all") {
                directions |= Directions::all();
            } else {
                directions |= item.parse::<Direction>()?.flag();
            }
        }
        if directions.is_empty() {
            return Err(SimpleError::new("No directions specified"));
        }
        Ok(directions)
    }

    ///Iterates over the selected directions, in search order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        DIRECTIONS.iter().copied().filter(move |d| self.contains(d.flag()))
    }
}

impl Default for Directions {
    fn default() -> Self {
        Directions::all()
    }
}

///A word found in the grid
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Match {
    ///The matched word
    pub text: String,

    ///Row of the cell where the word starts
    pub row: usize,

    ///Column of the cell where the word starts
    pub column: usize,

    ///Direction in which the word reads; a single-cell word has none
    pub direction: Option<Direction>,
}

impl Match {
    pub fn new(text: String, row: usize, column: usize, direction: Option<Direction>) -> Self {
        Self {
            text,
            row,
            column,
            direction,
        }
    }

    ///Number of characters (and therefore cells) spanned
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    ///Position of the last cell of the match
    pub fn end(&self) -> (usize, usize) {
        match self.direction {
            None => (self.row, self.column),
            Some(direction) => {
                let (drow, dcolumn) = direction.delta();
                let steps = self.len() as isize - 1;
                (
                    (self.row as isize + drow * steps) as usize,
                    (self.column as isize + dcolumn * steps) as usize,
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    ///Walks every ray to the edge of the grid and checks every string for being a word
    Naive,
    ///Abandons a ray as soon as the string built so far is not a prefix of any word
    Pruned,
}

impl FromStr for Algorithm {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "naive" | "regular" => Ok(Self::Naive),
            "pruned" | "enhanced" => Ok(Self::Pruned),
            _ => Err(SimpleError::new(format!("Unknown algorithm: {} (expected naive or pruned)", s))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchParameters {
    /// The search algorithm, the algorithms differ only in cost, never in their results
    pub algorithm: Algorithm,

    /// The directions to search in
    pub directions: Directions,

    /// Use only a single-thread instead of distributing the rows of the grid over multiple cores
    pub single_thread: bool,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Pruned,
            directions: Directions::all(),
            single_thread: false,
        }
    }
}

impl SearchParameters {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }
    pub fn with_single_thread(mut self) -> Self {
        self.single_thread = true;
        self
    }
}

///Counters collected during a search, these quantify the cost of an algorithm
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    ///Number of origin cells examined
    pub cells: usize,
    ///Number of grid cells read (the origin counts once per origin cell)
    pub steps: usize,
    ///Number of index lookups
    pub lookups: usize,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.cells += other.cells;
        self.steps += other.steps;
        self.lookups += other.lookups;
    }
}
