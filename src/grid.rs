use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use rand::Rng;
use simple_error::SimpleError;

///A rectangular matrix of characters that can be searched for words.
///Accessing a cell outside of the grid is a contract violation and may panic.
pub trait Grid {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;
    fn char_at(&self, row: usize, column: usize) -> char;
}

///A grid stored in row-major order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    rows: usize,
    columns: usize,
    cells: Vec<char>,
}

impl CharGrid {
    ///Creates a grid with every cell set to `fill`
    pub fn new(rows: usize, columns: usize, fill: char) -> Self {
        Self {
            rows,
            columns,
            cells: vec![fill; rows * columns],
        }
    }

    ///Creates a grid of random lowercase letters
    pub fn random<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let cells = (0..rows * columns)
            .map(|_| (b'a' + rng.gen_range(0..26u8)) as char)
            .collect();
        Self {
            rows,
            columns,
            cells,
        }
    }

    ///Parses a grid from lines of text, one row per line.
    ///Cells may be written adjacent (`cat`) or separated by whitespace (`c a t`), in which case
    ///every separated token must be a single character. Blank lines are ignored.
    pub fn from_lines<I, T>(lines: I) -> Result<Self, SimpleError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut rows = 0;
        let mut columns = 0;
        let mut cells = Vec::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let row: Vec<char> = if line.contains(char::is_whitespace) {
                let mut row = Vec::new();
                for token in line.split_whitespace() {
                    let mut chars = token.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => row.push(c),
                        _ => {
                            return Err(SimpleError::new(format!(
                                "Row {}: expected single characters separated by whitespace, got {}",
                                rows + 1,
                                token
                            )))
                        }
                    }
                }
                row
            } else {
                line.chars().collect()
            };
            if rows == 0 {
                columns = row.len();
            } else if row.len() != columns {
                return Err(SimpleError::new(format!(
                    "Row {} has {} columns, expected {}",
                    rows + 1,
                    row.len(),
                    columns
                )));
            }
            cells.extend(row);
            rows += 1;
        }
        if rows == 0 {
            return Err(SimpleError::new("Grid is empty"));
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    ///Reads a grid from a text file, see `from_lines()` for the format
    pub fn read(filename: &str) -> Result<Self, Box<dyn Error>> {
        let f = File::open(filename)?;
        let f_buffer = BufReader::new(f);
        let lines = f_buffer.lines().collect::<Result<Vec<String>, _>>()?;
        Ok(Self::from_lines(lines)?)
    }

    pub fn set(&mut self, row: usize, column: usize, c: char) {
        assert!(row < self.rows && column < self.columns, "cell out of range");
        self.cells[row * self.columns + column] = c;
    }

    ///Returns one row of the grid
    pub fn row(&self, row: usize) -> &[char] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }
}

impl Grid for CharGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn char_at(&self, row: usize, column: usize) -> char {
        assert!(row < self.rows && column < self.columns, "cell out of range");
        self.cells[row * self.columns + column]
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            for (i, c) in self.row(row).iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
