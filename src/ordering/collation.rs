//! Natural, case-insensitive string collation.
//!
//! Digit runs compare by numeric value (`Cherry2 < Cherry10`), everything else compares
//! character by character after lowercasing (`apple == APPLE`). Leading zeros do not
//! matter (`v01 == v1`). There is no accent folding, so `é` and `e` are different
//! characters.
//!
//! The comparison is a lexicographic order over tokens, where a token is either a maximal
//! ASCII digit run or a single non-digit character. Digit runs all sit at the position of
//! the ASCII digits in the character order, so the result is a total preorder.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings in natural, case-insensitive order.
///
/// # Examples
///
/// ```
/// # use notefeed::ordering::collation::natural_cmp;
/// use std::cmp::Ordering;
/// assert_eq!(natural_cmp("Cherry2", "Cherry10"), Ordering::Less);
/// assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
/// assert_eq!(natural_cmp("Note", "note"), Ordering::Equal);
/// ```
///
/// Only case is folded. Accented letters stay distinct from their base letters:
///
/// ```
/// # use notefeed::ordering::collation::natural_cmp;
/// use std::cmp::Ordering;
/// assert_ne!(natural_cmp("café", "cafe"), Ordering::Equal);
/// assert_ne!(natural_cmp("É", "e"), Ordering::Equal);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (l, r),
        };

        if l.is_ascii_digit() && r.is_ascii_digit() {
            let lhs = take_digit_run(&mut left);
            let rhs = take_digit_run(&mut right);
            match compare_digit_runs(&lhs, &rhs) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        match fold(l).cmp(&fold(r)) {
            Ordering::Equal => {
                left.next();
                right.next();
            }
            ord => return ord,
        }
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn take_digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
