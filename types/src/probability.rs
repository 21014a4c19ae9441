//! Exhaustive win probabilities between two dice.
//!
//! Every face of one die is compared against every face of the other. Equal
//! faces count for neither side, so for any pair of dice
//! `win_probability(a, b) + win_probability(b, a) + tie_probability(a, b) == 1`.
//!
//! Only the help screen uses these numbers; gameplay never consults them.

use crate::Die;

/// Number of face pairs where `a` shows strictly more than `b`.
pub fn wins(a: &Die, b: &Die) -> usize {
    a.faces()
        .iter()
        .map(|fa| b.faces().iter().filter(|fb| fa > fb).count())
        .sum()
}

fn pairs(a: &Die, b: &Die) -> usize {
    a.face_count() * b.face_count()
}

/// Probability that `a` rolls strictly higher than `b`.
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    wins(a, b) as f64 / pairs(a, b) as f64
}

/// Probability that `a` and `b` roll the same value.
pub fn tie_probability(a: &Die, b: &Die) -> f64 {
    let ties: usize = a
        .faces()
        .iter()
        .map(|fa| b.faces().iter().filter(|fb| fa == *fb).count())
        .sum();
    ties as f64 / pairs(a, b) as f64
}
