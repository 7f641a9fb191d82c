use std::collections::hash_map::RandomState;
use std::fs::File;
use std::hash::BuildHasher;
use std::io::{BufRead, BufReader};

use crate::index::*;

impl PrefixIndex<String, RandomState> {
    ///Builds an index holding every prefix of every given word, flagging the words themselves
    pub fn from_words<I, T>(words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut index = Self::new();
        for word in words {
            index.add_word(word.as_ref());
        }
        index
    }
}

impl<S: BuildHasher> PrefixIndex<String, S> {
    ///Adds a dictionary word: every non-empty prefix (on character boundaries) is inserted and the
    ///full word is flagged as a word. Surrounding whitespace is ignored.
    ///Blank entries are skipped and leave the index untouched; returns false in that case.
    pub fn add_word(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        for (pos, c) in word.char_indices() {
            let prefix = &word[..pos + c.len_utf8()];
            if !self.contains(prefix) {
                self.insert(prefix.to_string());
            }
        }
        self.mark_as_word(word)
    }

    ///Reads a word list, one word per line, and adds all words to the index.
    ///Returns the number of (non-blank) words read.
    pub fn read_dictionary(&mut self, filename: &str) -> Result<usize, std::io::Error> {
        let f = File::open(filename)?;
        let f_buffer = BufReader::new(f);
        let mut count = 0;
        for line in f_buffer.lines() {
            let line = line?;
            if self.add_word(&line) {
                count += 1;
            }
        }
        Ok(count)
    }

    ///Tests whether the text is a complete (active) word
    pub fn has_word(&self, text: &str) -> bool {
        self.contains(text) && self.is_word(text)
    }
}
