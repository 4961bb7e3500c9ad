//! List options: equality filtering, single-field sort, pagination.
//!
//! Comparison here is loose on purpose: row stores hand back numeric IDs as
//! numbers or digit strings depending on the backend, so `2` and `"2"` must
//! compare equal and ordering falls back to text when values are not both
//! numeric.

use std::cmp::Ordering;

use serde_json::Value;

/// Sort direction for a single-field sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Single-field sort specification.
#[derive(Debug, Clone)]
pub struct SortSpec {
    /// Logical field to sort on
    pub field: String,
    pub direction: SortDirection,
}

/// 1-indexed page slice.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    /// Page number, starting at 1
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
}

/// Options for [`RecordRepository::list`].
///
/// [`RecordRepository::list`]: super::repository::RecordRepository::list
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Equality conditions, all ANDed
    pub filter: Vec<(String, Value)>,
    /// Optional single-field sort
    pub sort: Option<SortSpec>,
    /// Optional page slice, applied after filter and sort
    pub page: Option<PageSpec>,
}

impl ListOptions {
    /// Creates empty options: all rows, store order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    pub fn filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filter.push((field.into(), value));
        self
    }

    /// Sorts ascending on a field.
    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            direction: SortDirection::Asc,
        });
        self
    }

    /// Sorts descending on a field.
    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            direction: SortDirection::Desc,
        });
        self
    }

    /// Slices to the given 1-indexed page.
    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(PageSpec { page, page_size });
        self
    }
}

/// Renders a value as comparison text.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Loose structural equality: numbers compare against their string
/// representations, everything else by text.
pub(crate) fn loose_eq(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x == y;
    }
    value_text(a) == value_text(b)
}

/// Loose ordering: numeric when both sides are numeric, text otherwise.
/// Missing values order first.
pub(crate) fn loose_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            } else {
                value_text(a).cmp(&value_text(b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loose_eq_number_vs_string() {
        assert!(loose_eq(&json!(2), &json!("2")));
        assert!(loose_eq(&json!("2"), &json!(2)));
        assert!(loose_eq(&json!(2.0), &json!("2")));
        assert!(!loose_eq(&json!(2), &json!("3")));
    }

    #[test]
    fn test_loose_eq_strings_and_bools() {
        assert!(loose_eq(&json!("Ativo"), &json!("Ativo")));
        assert!(!loose_eq(&json!("Ativo"), &json!("Inativo")));
        assert!(loose_eq(&json!(true), &json!(true)));
    }

    #[test]
    fn test_loose_cmp_numeric() {
        assert_eq!(loose_cmp(Some(&json!(2)), Some(&json!("10"))), Ordering::Less);
        assert_eq!(
            loose_cmp(Some(&json!("10")), Some(&json!(2))),
            Ordering::Greater
        );
    }

    #[test]
    fn test_loose_cmp_text_fallback() {
        assert_eq!(
            loose_cmp(Some(&json!("Ana")), Some(&json!("Bruno"))),
            Ordering::Less
        );
    }

    #[test]
    fn test_loose_cmp_missing_orders_first() {
        assert_eq!(loose_cmp(None, Some(&json!(1))), Ordering::Less);
        assert_eq!(loose_cmp(Some(&json!(1)), None), Ordering::Greater);
    }

    #[test]
    fn test_options_builder() {
        let options = ListOptions::new()
            .filter("Status", json!("Ativo"))
            .sort_desc("ID")
            .page(2, 10);
        assert_eq!(options.filter.len(), 1);
        assert!(matches!(
            options.sort.as_ref().unwrap().direction,
            SortDirection::Desc
        ));
        assert_eq!(options.page.unwrap().page, 2);
    }
}
