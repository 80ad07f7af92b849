//! Query filters for list endpoints.
//!
//! V3 list endpoints take filters as comma-separated value lists
//! (`names=a,b`), plus a few special parameters (`label_selector`,
//! `order_by`, `include`). [`ListFilter`] collects them explicitly and
//! renders them together with a [`PageCursor`].

use std::collections::BTreeMap;

use crate::pagination::PageCursor;

/// Filters for a list request.
///
/// # Example
///
/// ```
/// use cfapi::{ListFilter, PageCursor};
///
/// let filter = ListFilter::new()
///     .names(["web", "worker"])
///     .order_by("-created_at");
///
/// assert_eq!(
///     filter.to_query_string(&PageCursor::new(2, 10)),
///     "names=web%2Cworker&order_by=-created_at&page=2&per_page=10"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    filters: BTreeMap<String, Vec<String>>,
    include: Vec<String>,
    label_selector: Option<String>,
    order_by: Option<String>,
}

impl ListFilter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `name` by any of `values`. An empty list removes the filter.
    #[must_use]
    pub fn with<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.filters.remove(name);
        } else {
            self.filters.insert(name.to_string(), values);
        }
        self
    }

    /// Filter by resource names.
    #[must_use]
    pub fn names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with("names", names)
    }

    /// Filter by resource guids.
    #[must_use]
    pub fn guids<I, S>(self, guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with("guids", guids)
    }

    /// Filter by owning space guids.
    #[must_use]
    pub fn space_guids<I, S>(self, guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with("space_guids", guids)
    }

    /// Filter by owning organization guids.
    #[must_use]
    pub fn organization_guids<I, S>(self, guids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with("organization_guids", guids)
    }

    /// Filter by label selector, e.g. `env=prod,!canary`.
    #[must_use]
    pub fn label_selector(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = Some(selector.into());
        self
    }

    /// Sort field; prefix with `-` for descending order.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Ask the server to embed a related resource (`space`, `organization`...).
    #[must_use]
    pub fn include(mut self, relation: impl Into<String>) -> Self {
        let relation = relation.into();
        if !self.include.contains(&relation) {
            self.include.push(relation);
        }
        self
    }

    /// Values of a filter, if set.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.filters.get(name).map(Vec::as_slice)
    }

    /// Query parameters for this filter at `cursor`.
    ///
    /// Filters come first (sorted by name), then `include`,
    /// `label_selector`, `order_by` and the cursor.
    pub fn query_pairs(&self, cursor: &PageCursor) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(name, values)| (name.clone(), values.join(",")))
            .collect();

        if !self.include.is_empty() {
            pairs.push(("include".to_string(), self.include.join(",")));
        }
        if let Some(ref selector) = self.label_selector {
            pairs.push(("label_selector".to_string(), selector.clone()));
        }
        if let Some(ref order_by) = self.order_by {
            pairs.push(("order_by".to_string(), order_by.clone()));
        }

        pairs.extend(
            cursor
                .query_pairs()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v)),
        );
        pairs
    }

    /// Percent-encoded query string for this filter at `cursor`.
    pub fn to_query_string(&self, cursor: &PageCursor) -> String {
        self.query_pairs(cursor)
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_renders_only_cursor() {
        let filter = ListFilter::new();
        assert_eq!(filter.to_query_string(&PageCursor::default()), "");
        assert_eq!(
            filter.to_query_string(&PageCursor::first_page(50)),
            "page=1&per_page=50"
        );
    }

    #[test]
    fn test_filters_are_sorted_and_comma_joined() {
        let filter = ListFilter::new()
            .space_guids(["s1", "s2"])
            .names(["app"])
            .include("space")
            .include("space.organization")
            .include("space");

        assert_eq!(
            filter.query_pairs(&PageCursor::default()),
            vec![
                ("names".to_string(), "app".to_string()),
                ("space_guids".to_string(), "s1,s2".to_string()),
                ("include".to_string(), "space,space.organization".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_values_remove_filter() {
        let filter = ListFilter::new()
            .names(["a"])
            .names(Vec::<String>::new());
        assert!(filter.get("names").is_none());
    }

    #[test]
    fn test_label_selector_is_encoded() {
        let filter = ListFilter::new().label_selector("env in (prod,staging)");
        assert_eq!(
            filter.to_query_string(&PageCursor::default()),
            "label_selector=env%20in%20%28prod%2Cstaging%29"
        );
    }
}
