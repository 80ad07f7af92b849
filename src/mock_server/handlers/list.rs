//! Paginated list endpoint.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use url::form_urlencoded;

use super::{authorize, cf_error, unknown_request, SharedState};
use crate::mock_server::state::MockState;
use crate::pagination::MAX_PER_PAGE;

const DEFAULT_PER_PAGE: u32 = 50;

/// Paging, ordering and side-loading options pulled out of a list query.
/// Every other parameter is treated as a filter.
#[derive(Debug)]
struct ListQuery {
    page: u32,
    per_page: u32,
    include: Vec<String>,
    order_by: Option<String>,
    label_selector: Option<String>,
    filters: BTreeMap<String, Vec<String>>,
    /// Non-paging parameters, repeated in every pagination link.
    passthrough: Vec<(String, String)>,
}

impl ListQuery {
    fn parse(params: Vec<(String, String)>) -> Result<Self, Response> {
        let mut query = ListQuery {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            include: Vec::new(),
            order_by: None,
            label_selector: None,
            filters: BTreeMap::new(),
            passthrough: Vec::new(),
        };

        for (name, value) in params {
            match name.as_str() {
                "page" => query.page = parse_bounded(&name, &value, u32::MAX)?,
                "per_page" => query.per_page = parse_bounded(&name, &value, MAX_PER_PAGE)?,
                _ => {
                    let values = split(&value);
                    match name.as_str() {
                        "include" => query.include.extend(values),
                        "order_by" => query.order_by = Some(value.clone()),
                        "label_selector" => query.label_selector = Some(value.clone()),
                        _ => {
                            query.filters.insert(name.clone(), values);
                        }
                    }
                    query.passthrough.push((name, value));
                }
            }
        }

        Ok(query)
    }

    fn link(&self, state: &MockState, collection: &str, page: u32) -> Value {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.passthrough {
            query.append_pair(name, value);
        }
        query.append_pair("page", &page.to_string());
        query.append_pair("per_page", &self.per_page.to_string());

        json!({ "href": format!("{}?{}", state.url(&format!("v3/{collection}")), query.finish()) })
    }
}

fn split(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bounded(name: &str, value: &str, max: u32) -> Result<u32, Response> {
    match value.parse::<u32>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(cf_error(
            StatusCode::BAD_REQUEST,
            10005,
            "CF-BadQueryParameter",
            &format!("The query parameter is invalid: {name} must be between 1 and {max}"),
        )),
    }
}

/// `key=value` and bare `key` terms, all of which must hold.
fn matches_labels(resource: &Value, selector: &str) -> bool {
    let labels = resource.pointer("/metadata/labels");
    selector.split(',').filter(|t| !t.is_empty()).all(|term| {
        let (key, expected) = match term.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (term, None),
        };
        match (labels.and_then(|l| l.get(key)), expected) {
            (Some(Value::String(actual)), Some(expected)) => actual == expected,
            (Some(value), None) => !value.is_null(),
            _ => false,
        }
    })
}

fn compare(a: &Value, b: &Value, field: &str) -> Ordering {
    let key = |v: &Value| v.get(field).map(|f| f.to_string()).unwrap_or_default();
    key(a).cmp(&key(b))
}

/// Related resources for `include=relation`, keyed by the plural collection.
fn included(state: &MockState, page: &[Value], relations: &[String]) -> Map<String, Value> {
    let mut included = Map::new();
    for relation in relations {
        let collection = format!("{relation}s");
        let mut guids: Vec<&str> = page
            .iter()
            .filter_map(|r| {
                r.pointer(&format!("/relationships/{relation}/data/guid"))
                    .and_then(Value::as_str)
            })
            .collect();
        guids.sort_unstable();
        guids.dedup();

        let related = guids
            .into_iter()
            .filter_map(|guid| state.get(&collection, guid).cloned())
            .collect();
        included.insert(collection, Value::Array(related));
    }
    included
}

/// GET /v3/{collection}
pub async fn list_resources(
    State(state): State<SharedState>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if !state.has_collection(&collection) {
        return unknown_request();
    }

    let query = match ListQuery::parse(params) {
        Ok(query) => query,
        Err(rejection) => return rejection,
    };

    let mut matching: Vec<&Value> = state.list(&collection, &query.filters);
    if let Some(selector) = query.label_selector.as_deref() {
        matching.retain(|r| matches_labels(r, selector));
    }
    if let Some(order_by) = query.order_by.as_deref() {
        match order_by.strip_prefix('-') {
            Some(field) => matching.sort_by(|a, b| compare(b, a, field)),
            None => matching.sort_by(|a, b| compare(a, b, order_by)),
        }
    }

    let total = matching.len() as u64;
    let per_page = u64::from(query.per_page);
    let total_pages = total.div_ceil(per_page).max(1);
    let page = u64::from(query.page);

    let resources: Vec<Value> = matching
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .cloned()
        .collect();

    let last_page = total_pages as u32;
    let next = (page < total_pages).then(|| query.link(&state, &collection, query.page + 1));
    let previous = (page > 1).then(|| query.link(&state, &collection, query.page - 1));

    let mut body = json!({
        "pagination": {
            "total_results": total,
            "total_pages": total_pages,
            "first": query.link(&state, &collection, 1),
            "last": query.link(&state, &collection, last_page),
            "next": next,
            "previous": previous,
        },
        "resources": resources,
    });

    if !query.include.is_empty() {
        body["included"] = Value::Object(included(&state, &resources, &query.include));
    }

    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_separates_paging_from_filters() {
        let query = ListQuery::parse(params(&[
            ("names", "web,worker"),
            ("include", "space"),
            ("page", "2"),
            ("per_page", "10"),
        ]))
        .unwrap();

        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.include, vec!["space"]);
        assert_eq!(query.filters["names"], vec!["web", "worker"]);
        assert_eq!(query.passthrough.len(), 2);
    }

    #[test]
    fn test_parse_rejects_out_of_range_paging() {
        assert!(ListQuery::parse(params(&[("page", "0")])).is_err());
        assert!(ListQuery::parse(params(&[("per_page", "5001")])).is_err());
        assert!(ListQuery::parse(params(&[("page", "two")])).is_err());
    }

    #[test]
    fn test_label_selector() {
        let resource = json!({ "metadata": { "labels": { "env": "prod", "tier": "web" } } });
        assert!(matches_labels(&resource, "env=prod"));
        assert!(matches_labels(&resource, "env=prod,tier"));
        assert!(!matches_labels(&resource, "env=dev"));
        assert!(!matches_labels(&resource, "owner"));
    }
}
