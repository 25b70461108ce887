//! Levenshtein distance over characters and arbitrary token sequences.

/// Character-level edit distance between two strings.
///
/// Counts the minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`. Characters are Unicode scalar
/// values, so multi-byte text is measured per character, not per byte.
pub fn char_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance(&a, &b)
}

/// Word-level edit distance, splitting both inputs on whitespace.
pub fn word_distance(a: &str, b: &str) -> usize {
    let a: Vec<&str> = a.split_whitespace().collect();
    let b: Vec<&str> = b.split_whitespace().collect();
    distance(&a, &b)
}

/// Edit distance between two token slices.
///
/// Keeps a single rolling row sized to the shorter input.
pub fn distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, long_item) in long.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, short_item) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(long_item != short_item);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[short.len()]
}
