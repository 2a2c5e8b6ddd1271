//! Sorting and rendering of the merged word counts.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write;

use crate::WordCounts;
use crate::utils::config::{LINE_BREAK, PAR_SORT_THRESHOLD};

#[derive(Serialize)]
struct WordEntry<'a> {
    word: &'a str,
    count: u64,
}

fn by_count_desc_then_word(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Sort by descending count; equal counts in ascending word order. Every word is kept.
pub fn sort_counts(counts: &WordCounts) -> Vec<(String, u64)> {
    let mut sorted: Vec<(String, u64)> = counts.iter().map(|(w, c)| (w.clone(), *c)).collect();
    if sorted.len() >= PAR_SORT_THRESHOLD {
        sorted.par_sort_unstable_by(by_count_desc_then_word);
    } else {
        sorted.sort_unstable_by(by_count_desc_then_word);
    }
    sorted
}

fn limit(sorted: &[(String, u64)], top: Option<usize>) -> &[(String, u64)] {
    match top {
        Some(n) if n < sorted.len() => &sorted[..n],
        _ => sorted,
    }
}

/// Plain-text table: header, then `word<TAB><TAB>count` per line, framed by rule lines.
pub fn render_table(sorted: &[(String, u64)], top: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{LINE_BREAK}");
    let _ = writeln!(out, "Merged Word Count:");
    let _ = writeln!(out);
    for (word, count) in limit(sorted, top) {
        let _ = writeln!(out, "{word}\t\t{count}");
    }
    let _ = writeln!(out, "{LINE_BREAK}");
    out
}

/// JSON array of `{"word": ..., "count": ...}` in sorted order.
pub fn render_json(sorted: &[(String, u64)], top: Option<usize>) -> Result<String> {
    let entries: Vec<WordEntry<'_>> = limit(sorted, top)
        .iter()
        .map(|(word, count)| WordEntry {
            word,
            count: *count,
        })
        .collect();
    serde_json::to_string_pretty(&entries).context("serialize word counts")
}
