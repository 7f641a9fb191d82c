use std::hash::BuildHasher;

use rayon::prelude::*;

use crate::grid::Grid;
use crate::index::PrefixIndex;
use crate::types::*;

///Returns the cell one step further along the direction, if it is still inside the grid
fn step<G: Grid + ?Sized>(grid: &G, row: usize, column: usize, direction: Direction) -> Option<(usize, usize)> {
    let (drow, dcolumn) = direction.delta();
    let row = row.checked_add_signed(drow)?;
    let column = column.checked_add_signed(dcolumn)?;
    if row < grid.rows() && column < grid.columns() {
        Some((row, column))
    } else {
        None
    }
}

///Checks every string starting at the cell, walking each ray all the way to the edge of the grid
fn search_cell_naive<G: Grid + ?Sized, S: BuildHasher>(
    index: &PrefixIndex<String, S>,
    grid: &G,
    row: usize,
    column: usize,
    directions: Directions,
    matches: &mut Vec<Match>,
    stats: &mut SearchStats,
) {
    stats.cells += 1;
    stats.steps += 1;
    let origin = grid.char_at(row, column);
    let mut text = String::new();
    text.push(origin);

    //the single cell reads the same in every direction, so it is only checked once
    stats.lookups += 1;
    if index.is_word(text.as_str()) {
        matches.push(Match::new(text.clone(), row, column, None));
    }

    for direction in directions.iter() {
        let mut buffer = text.clone();
        let (mut r, mut c) = (row, column);
        while let Some((next_r, next_c)) = step(grid, r, c, direction) {
            r = next_r;
            c = next_c;
            buffer.push(grid.char_at(r, c));
            stats.steps += 1;
            stats.lookups += 1;
            if index.is_word(buffer.as_str()) {
                matches.push(Match::new(buffer.clone(), row, column, Some(direction)));
            }
        }
    }
}

///Like `search_cell_naive()`, but abandons a ray as soon as the string built so far is not a
///prefix of any word, or has reached the length of the longest key in the index
fn search_cell_pruned<G: Grid + ?Sized, S: BuildHasher>(
    index: &PrefixIndex<String, S>,
    grid: &G,
    row: usize,
    column: usize,
    directions: Directions,
    matches: &mut Vec<Match>,
    stats: &mut SearchStats,
) {
    stats.cells += 1;
    stats.steps += 1;
    let origin = grid.char_at(row, column);
    let mut text = String::new();
    text.push(origin);

    stats.lookups += 1;
    if !index.contains(text.as_str()) {
        //no word starts with this character, none of the rays can match
        return;
    }
    stats.lookups += 1;
    if index.is_word(text.as_str()) {
        matches.push(Match::new(text.clone(), row, column, None));
    }

    let max_length = index.max_key_length();
    for direction in directions.iter() {
        let mut buffer = text.clone();
        let mut length = 1;
        let (mut r, mut c) = (row, column);
        while length < max_length {
            let (next_r, next_c) = match step(grid, r, c, direction) {
                Some(next) => next,
                None => break,
            };
            r = next_r;
            c = next_c;
            buffer.push(grid.char_at(r, c));
            length += 1;
            stats.steps += 1;
            stats.lookups += 1;
            if !index.contains(buffer.as_str()) {
                break;
            }
            stats.lookups += 1;
            if index.is_word(buffer.as_str()) {
                matches.push(Match::new(buffer.clone(), row, column, Some(direction)));
            }
        }
    }
}

fn search_row<G: Grid + ?Sized, S: BuildHasher>(
    index: &PrefixIndex<String, S>,
    grid: &G,
    row: usize,
    params: &SearchParameters,
) -> (Vec<Match>, SearchStats) {
    let mut matches = Vec::new();
    let mut stats = SearchStats::default();
    for column in 0..grid.columns() {
        match params.algorithm {
            Algorithm::Naive => search_cell_naive(index, grid, row, column, params.directions, &mut matches, &mut stats),
            Algorithm::Pruned => search_cell_pruned(index, grid, row, column, params.directions, &mut matches, &mut stats),
        }
    }
    (matches, stats)
}

///Searches all rows in order on the current thread
fn search_sequential<G: Grid + ?Sized, S: BuildHasher>(
    index: &PrefixIndex<String, S>,
    grid: &G,
    params: &SearchParameters,
) -> (Vec<Match>, SearchStats) {
    let mut matches = Vec::new();
    let mut stats = SearchStats::default();
    for row in 0..grid.rows() {
        let (row_matches, row_stats) = search_row(index, grid, row, params);
        matches.extend(row_matches);
        stats += row_stats;
    }
    (matches, stats)
}

///Finds all words in the grid by walking every ray to the edge of the grid.
///The cost depends only on the size of the grid, this serves as a baseline for `search_pruned()`.
pub fn search_naive<G: Grid + ?Sized, S: BuildHasher>(index: &PrefixIndex<String, S>, grid: &G) -> Vec<Match> {
    let params = SearchParameters::default()
        .with_algorithm(Algorithm::Naive)
        .with_single_thread();
    search_sequential(index, grid, &params).0
}

///Finds all words in the grid, abandoning rays that can no longer lead to a word.
///Returns exactly the same matches as `search_naive()`, in the same order.
pub fn search_pruned<G: Grid + ?Sized, S: BuildHasher>(index: &PrefixIndex<String, S>, grid: &G) -> Vec<Match> {
    let params = SearchParameters::default()
        .with_algorithm(Algorithm::Pruned)
        .with_single_thread();
    search_sequential(index, grid, &params).0
}

///Finds all words in the grid according to the search parameters
pub fn search<G: Grid + Sync + ?Sized, S: BuildHasher + Sync>(
    index: &PrefixIndex<String, S>,
    grid: &G,
    params: &SearchParameters,
) -> Vec<Match> {
    search_with_stats(index, grid, params).0
}

///Finds all words in the grid according to the search parameters, also returning counters that
///quantify the work done.
///Unless `single_thread` is set, rows are distributed over multiple threads that share the index
///read-only; results are still returned in row order.
pub fn search_with_stats<G: Grid + Sync + ?Sized, S: BuildHasher + Sync>(
    index: &PrefixIndex<String, S>,
    grid: &G,
    params: &SearchParameters,
) -> (Vec<Match>, SearchStats) {
    if params.single_thread {
        return search_sequential(index, grid, params);
    }
    let rows: Vec<(Vec<Match>, SearchStats)> = (0..grid.rows())
        .into_par_iter()
        .map(|row| search_row(index, grid, row, params))
        .collect();
    let mut matches = Vec::new();
    let mut stats = SearchStats::default();
    for (row_matches, row_stats) in rows {
        matches.extend(row_matches);
        stats += row_stats;
    }
    (matches, stats)
}
