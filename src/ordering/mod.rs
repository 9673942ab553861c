//! Sort/ordering policy for the entry sequence.
//!
//! Derives a total order over entries from an optional sort specification. Only the first
//! sort field is honored. Without a sort property, entries sort by title, ascending,
//! case-insensitive and numeric-aware, whatever direction was requested.

pub mod collation;

use serde::Deserialize;
use std::cmp::Ordering;
use tracing::trace;

use crate::model::{is_markdown, Entry, EntryRef, PropertyId, SortKey};
use collation::natural_cmp;

/// Sort direction for a sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Ascending,
    /// Largest first.
    #[serde(rename = "DESC", alias = "desc")]
    Descending,
}

/// One `{property, direction}` pair of a sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Property to sort by.
    pub property: PropertyId,
    /// Requested direction.
    pub direction: SortDirection,
}

/// Ordered list of sort fields. Only the first is honored by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortSpec {
    fields: Vec<SortField>,
}

impl SortSpec {
    /// Sort specification with no fields (title fallback).
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from a list of fields.
    pub fn new(fields: Vec<SortField>) -> Self {
        Self { fields }
    }

    /// Single-field specification.
    pub fn by(property: PropertyId, direction: SortDirection) -> Self {
        Self::new(vec![SortField {
            property,
            direction,
        }])
    }

    /// The honored field, if any.
    pub fn primary(&self) -> Option<&SortField> {
        self.fields.first()
    }

    /// All fields as configured.
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    /// Comparator for the primary field (or the title fallback).
    pub fn comparator(&self) -> EntryComparator {
        match self.primary() {
            Some(field) => comparator(Some(&field.property), field.direction),
            None => comparator(None, SortDirection::Ascending),
        }
    }
}

/// Comparison policy derived from a sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryComparator {
    /// Compare a property value; nulls last in both directions.
    ByProperty {
        /// Property to read.
        property: PropertyId,
        /// Direction applied to non-null comparisons.
        direction: SortDirection,
    },
    /// Compare titles ascending (fallback).
    ByTitle,
}

/// Build a comparator for an optional property and direction.
///
/// The direction is ignored when no property is given.
pub fn comparator(property: Option<&PropertyId>, direction: SortDirection) -> EntryComparator {
    match property {
        Some(property) => EntryComparator::ByProperty {
            property: property.clone(),
            direction,
        },
        None => EntryComparator::ByTitle,
    }
}

impl EntryComparator {
    /// Compare two entries.
    pub fn compare(&self, a: &dyn Entry, b: &dyn Entry) -> Ordering {
        match self {
            EntryComparator::ByProperty {
                property,
                direction,
            } => compare_keys(
                read_sort_key(a, property).as_ref(),
                read_sort_key(b, property).as_ref(),
                *direction,
            ),
            EntryComparator::ByTitle => natural_cmp(a.title(), b.title()),
        }
    }

    /// Extract the comparable key of one entry.
    fn key_of(&self, entry: &dyn Entry) -> Option<SortKey> {
        match self {
            EntryComparator::ByProperty { property, .. } => read_sort_key(entry, property),
            EntryComparator::ByTitle => Some(SortKey::Text(entry.title().to_string())),
        }
    }

    fn compare_extracted(&self, a: Option<&SortKey>, b: Option<&SortKey>) -> Ordering {
        match self {
            EntryComparator::ByProperty { direction, .. } => compare_keys(a, b, *direction),
            EntryComparator::ByTitle => compare_keys(a, b, SortDirection::Ascending),
        }
    }
}

/// Read a property as a sort key. Accessor failures count as null.
fn read_sort_key(entry: &dyn Entry, property: &PropertyId) -> Option<SortKey> {
    match entry.value(property) {
        Ok(value) => value.sort_key(),
        Err(err) => {
            trace!(path = %entry.path(), error = %err, "Property unreadable, sorting as null");
            None
        }
    }
}

/// Compare two optional sort keys.
///
/// Keys are ranked by class before they are compared: numbers, then text, then nulls.
/// The class order is the same in both directions. Within a class, numbers compare
/// numerically and text compares naturally, and only that comparison follows the direction.
pub fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>, direction: SortDirection) -> Ordering {
    let ordering = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(SortKey::Number(_)), Some(SortKey::Text(_))) => return Ordering::Less,
        (Some(SortKey::Text(_)), Some(SortKey::Number(_))) => return Ordering::Greater,
        (Some(SortKey::Number(x)), Some(SortKey::Number(y))) => x.total_cmp(y),
        (Some(SortKey::Text(x)), Some(SortKey::Text(y))) => natural_cmp(x, y),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Filter to markdown documents and stable-sort by the sort specification.
///
/// Keys are read once per entry before sorting, so property accessors run `n` times
/// rather than `n log n` times.
pub fn order_entries(entries: Vec<EntryRef>, spec: &SortSpec) -> Vec<EntryRef> {
    let comparator = spec.comparator();
    let mut keyed: Vec<(Option<SortKey>, EntryRef)> = entries
        .into_iter()
        .filter(|entry| is_markdown(entry.as_ref()))
        .map(|entry| (comparator.key_of(entry.as_ref()), entry))
        .collect();

    // `sort_by` is stable: ties keep their source order.
    keyed.sort_by(|(a, _), (b, _)| comparator.compare_extracted(a.as_ref(), b.as_ref()));

    keyed.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentPath, NoteEntry, PropertyError, Value};

    fn note(path: &str) -> NoteEntry {
        NoteEntry::new(DocumentPath::new(path).unwrap())
    }

    fn titles(entries: &[EntryRef]) -> Vec<String> {
        entries.iter().map(|e| e.title().to_string()).collect()
    }

    fn rank() -> PropertyId {
        PropertyId::new("note.rank").unwrap()
    }

    #[derive(Debug)]
    struct Exploding(DocumentPath);

    impl Entry for Exploding {
        fn path(&self) -> &DocumentPath {
            &self.0
        }

        fn value(&self, property: &PropertyId) -> Result<Value, PropertyError> {
            Err(PropertyError {
                property: property.clone(),
                reason: "formula error".to_string(),
            })
        }
    }

    #[test]
    fn fallback_orders_titles_naturally() {
        let entries = vec![
            note("Banana.md").into_ref(),
            note("apple.md").into_ref(),
            note("Cherry10.md").into_ref(),
            note("Cherry2.md").into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::none());
        assert_eq!(titles(&ordered), vec!["apple", "Banana", "Cherry2", "Cherry10"]);
    }

    #[test]
    fn fallback_ignores_direction() {
        let a = note("a.md");
        let b = note("b.md");
        let cmp = comparator(None, SortDirection::Descending);
        assert_eq!(cmp.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn non_markdown_entries_are_dropped() {
        let entries = vec![
            note("b.md").into_ref(),
            note("board.canvas").into_ref(),
            note("a.md").into_ref(),
            note("photo.png").into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::none());
        assert_eq!(titles(&ordered), vec!["a", "b"]);
    }

    #[test]
    fn numeric_property_sorts_numerically() {
        let entries = vec![
            note("a.md").with_property("note.rank", 10.0).into_ref(),
            note("b.md").with_property("note.rank", 9.0).into_ref(),
            note("c.md").with_property("note.rank", 100.0).into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::by(rank(), SortDirection::Ascending));
        assert_eq!(titles(&ordered), vec!["b", "a", "c"]);
    }

    #[test]
    fn descending_reverses_values_but_keeps_nulls_last() {
        let entries = vec![
            note("none.md").into_ref(),
            note("low.md").with_property("note.rank", 1.0).into_ref(),
            note("high.md").with_property("note.rank", 5.0).into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::by(rank(), SortDirection::Descending));
        assert_eq!(titles(&ordered), vec!["high", "low", "none"]);
    }

    #[test]
    fn falsy_values_sort_as_null() {
        let entries = vec![
            note("zero.md").with_property("note.rank", 0.0).into_ref(),
            note("blank.md").with_property("note.rank", "  ").into_ref(),
            note("one.md").with_property("note.rank", 1.0).into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::by(rank(), SortDirection::Ascending));
        assert_eq!(titles(&ordered), vec!["one", "zero", "blank"]);
    }

    #[test]
    fn unreadable_property_sorts_as_null() {
        let broken: EntryRef = std::rc::Rc::new(Exploding(DocumentPath::new("broken.md").unwrap()));
        let entries = vec![
            broken,
            note("fine.md").with_property("note.rank", 2.0).into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::by(rank(), SortDirection::Ascending));
        assert_eq!(titles(&ordered), vec!["fine", "broken"]);
    }

    #[test]
    fn text_values_use_natural_collation() {
        let entries = vec![
            note("a.md").with_property("note.rank", "Chapter 10").into_ref(),
            note("b.md").with_property("note.rank", "chapter 2").into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::by(rank(), SortDirection::Ascending));
        assert_eq!(titles(&ordered), vec!["b", "a"]);
    }

    #[test]
    fn numbers_rank_before_text_in_both_directions() {
        let n = SortKey::Number(10.0);
        let t = SortKey::Text("9".to_string());
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            assert_eq!(compare_keys(Some(&n), Some(&t), direction), Ordering::Less);
            assert_eq!(compare_keys(Some(&t), Some(&n), direction), Ordering::Greater);
        }
    }

    #[test]
    fn negative_numbers_and_numeric_text_do_not_cycle() {
        let a = SortKey::Number(-10.0);
        let b = SortKey::Number(-2.0);
        let c = SortKey::Text("-5".to_string());
        let asc = SortDirection::Ascending;
        assert_eq!(compare_keys(Some(&a), Some(&b), asc), Ordering::Less);
        assert_eq!(compare_keys(Some(&b), Some(&c), asc), Ordering::Less);
        assert_eq!(compare_keys(Some(&a), Some(&c), asc), Ordering::Less);
    }

    #[test]
    fn mixed_property_values_sort_by_class() {
        let values: [Value; 6] = [
            "1.7".into(),
            1.5.into(),
            "-5".into(),
            (-10.0).into(),
            "apple".into(),
            1.25.into(),
        ];
        let entries: Vec<EntryRef> = values
            .iter()
            .enumerate()
            .map(|(i, v)| note(&format!("n{i}.md")).with_property("note.rank", v.clone()).into_ref())
            .collect();

        let asc = order_entries(entries.clone(), &SortSpec::by(rank(), SortDirection::Ascending));
        assert_eq!(titles(&asc), vec!["n3", "n5", "n1", "n2", "n0", "n4"]);

        let desc = order_entries(entries, &SortSpec::by(rank(), SortDirection::Descending));
        assert_eq!(titles(&desc), vec!["n1", "n5", "n3", "n4", "n0", "n2"]);
    }

    #[test]
    fn ties_keep_source_order() {
        let entries = vec![
            note("first.md").with_property("note.rank", 1.0).into_ref(),
            note("second.md").with_property("note.rank", 1.0).into_ref(),
            note("third.md").with_property("note.rank", 1.0).into_ref(),
        ];
        let ordered = order_entries(entries, &SortSpec::by(rank(), SortDirection::Descending));
        assert_eq!(titles(&ordered), vec!["first", "second", "third"]);
    }

    #[test]
    fn only_primary_field_is_honored() {
        let spec = SortSpec::new(vec![
            SortField {
                property: rank(),
                direction: SortDirection::Ascending,
            },
            SortField {
                property: PropertyId::new("note.other").unwrap(),
                direction: SortDirection::Descending,
            },
        ]);
        assert_eq!(
            spec.comparator(),
            EntryComparator::ByProperty {
                property: rank(),
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn extracted_and_direct_comparison_agree() {
        let a = note("a.md").with_property("note.rank", "x2");
        let b = note("b.md").with_property("note.rank", "X10");
        let cmp = comparator(Some(&rank()), SortDirection::Descending);
        let direct = cmp.compare(&a, &b);
        let extracted = cmp.compare_extracted(cmp.key_of(&a).as_ref(), cmp.key_of(&b).as_ref());
        assert_eq!(direct, extracted);
        assert_eq!(direct, Ordering::Greater);
    }
}
