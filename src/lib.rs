extern crate rayon;
extern crate simple_error;

use std::fs::File;
use std::io::{BufReader,BufRead};
use std::time::SystemTime;

pub mod types;
pub mod primes;
pub mod index;
pub mod dictionary;
pub mod grid;
pub mod search;


pub use crate::types::*;
pub use crate::primes::*;
pub use crate::index::*;
pub use crate::dictionary::*;
pub use crate::grid::*;
pub use crate::search::*;


pub struct WordSearchModel {
    ///The main index, holding every prefix of every word in the loaded dictionaries
    pub index: PrefixIndex<String>,

    /// Stores the names of the loaded dictionaries
    pub dictionaries: Vec<String>,

    ///Number of distinct words added
    pub word_count: usize,

    pub debug: bool
}

impl WordSearchModel {
    pub fn new(debug: bool) -> WordSearchModel {
        Self::with_capacity(DEFAULT_TABLE_SIZE, debug)
    }

    ///Creates a model whose index is preallocated for the given number of keys (i.e. prefixes,
    ///not words), avoiding repeated growth while loading a large dictionary
    pub fn with_capacity(capacity: usize, debug: bool) -> WordSearchModel {
        WordSearchModel {
            index: PrefixIndex::with_capacity(capacity),
            dictionaries: Vec::new(),
            word_count: 0,
            debug: debug,
        }
    }

    ///Read a dictionary from file, one word per line. Blank lines are skipped.
    pub fn read_dictionary(&mut self, filename: &str) -> Result<(), std::io::Error> {
        if self.debug {
            eprintln!("Reading dictionary from {}...", filename);
        }
        let words_before = self.word_count;
        let f = File::open(filename)?;
        let f_buffer = BufReader::new(f);
        for line in f_buffer.lines() {
            self.add_word(&line?);
        }
        if self.debug {
            eprintln!(" - Read {} new words, index now holds {} prefixes in {} slots (longest: {} characters)",
                      self.word_count - words_before, self.index.live_size(), self.index.capacity(), self.index.max_key_length());
        }
        self.dictionaries.push(filename.to_string());
        Ok(())
    }

    ///Adds a single word (and all its prefixes) to the index, returns false if the word was blank
    pub fn add_word(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        let known = self.index.has_word(word);
        if self.debug {
            eprintln!(" -- Adding to dictionary: {}", word);
        }
        self.index.add_word(word);
        if !known {
            self.word_count += 1;
        }
        true
    }

    ///Tests if the dictionary has a specific word
    pub fn has_word(&self, text: &str) -> bool {
        self.index.has_word(text)
    }

    ///Tests if any word in the dictionary starts with the given text
    pub fn has_prefix(&self, text: &str) -> bool {
        self.index.contains(text)
    }

    ///Find all dictionary words in the grid
    pub fn find_words<G: Grid + Sync + ?Sized>(&self, grid: &G, params: &SearchParameters) -> Vec<Match> {
        let begintime = if self.debug {
            eprintln!("(searching {}x{} grid, algorithm {:?}, directions {:?})", grid.rows(), grid.columns(), params.algorithm, params.directions);
            Some(SystemTime::now())
        } else {
            None
        };

        let (matches, stats) = search_with_stats(&self.index, grid, params);

        if let Some(begintime) = begintime {
            let duration = SystemTime::now().duration_since(begintime).map(|d| d.as_micros()).unwrap_or(0);
            eprintln!("(found {} matches in {} μs; {} cells, {} steps, {} lookups)",
                      matches.len(), duration, stats.cells, stats.steps, stats.lookups);
        }
        matches
    }
}
