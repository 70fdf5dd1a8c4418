//! HATEOAS link generation and response envelopes.
//!
//! Pure string/JSON assembly with no side effects. Handlers fetch their
//! domain result from the service layer, then call one of the envelope
//! builders before responding.

use serde::Serialize;
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

use crate::repository::EntityModel;

/// A single navigation link in a response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    fn new(rel: &str, href: impl Into<String>, method: Option<&str>) -> Self {
        Self {
            rel: rel.to_string(),
            href: href.into(),
            method: method.map(str::to_string),
        }
    }
}

/// An endpoint-specific link advertised next to the defaults.
///
/// `endpoint` is appended to the record's canonical URL. When `overwrite`
/// names a relation, the previously collected link with that name is dropped
/// once this one is in place, so an endpoint can swap the generic `update`
/// for a purpose-specific action while leaving the rest untouched.
#[derive(Debug, Clone, Copy)]
pub struct ExtraRel {
    pub rel: &'static str,
    pub method: &'static str,
    pub endpoint: &'static str,
    pub overwrite: Option<&'static str>,
}

/// Canonical REST URL for one record, or for the collection when `id` is
/// empty: `{base_url}{prefix}/{name}s[/{id}]`.
pub fn canonical_url(base_url: &str, prefix: &str, name: &str, id: &str) -> String {
    if id.is_empty() {
        format!("{base_url}{prefix}/{name}s")
    } else {
        format!("{base_url}{prefix}/{name}s/{id}")
    }
}

/// Default links for a single record plus the endpoint's extra relations.
pub fn item_links(canonical: &str, request_url: &str, extra_rels: &[ExtraRel]) -> Vec<Link> {
    let mut links = vec![
        Link::new("self", request_url, None),
        Link::new("update", canonical, Some("PUT")),
        Link::new("delete", canonical, Some("DELETE")),
    ];
    for relation in extra_rels {
        links.push(Link::new(
            relation.rel,
            format!("{canonical}{}", relation.endpoint),
            Some(relation.method),
        ));
        if let Some(overwritten) = relation.overwrite {
            links.retain(|link| link.rel != overwritten);
        }
    }
    links
}

/// Page navigation links for a collection response. `prev` only appears
/// past the first page.
pub fn collection_links(canonical: &str, page: i64, limit: i64) -> Vec<Link> {
    let mut links = vec![
        Link::new("self", format!("{canonical}?page={page}&limit={limit}"), None),
        Link::new(
            "next",
            format!("{canonical}?page={}&limit={limit}", page + 1),
            None,
        ),
    ];
    if page > 1 {
        links.push(Link::new(
            "prev",
            format!("{canonical}?page={}&limit={limit}", page - 1),
            None,
        ));
    }
    links
}

/// One record flattened into its fields plus a `_links` array.
pub fn item_envelope<T>(
    record: &T,
    base_url: &str,
    prefix: &str,
    request_url: &str,
    extra_rels: &[ExtraRel],
) -> Value
where
    T: EntityModel + Serialize,
{
    let canonical = canonical_url(base_url, prefix, T::NAME, record.id());
    let mut fields = record_fields(record);
    fields.insert(
        "_links".to_string(),
        json!(item_links(&canonical, request_url, extra_rels)),
    );
    Value::Object(fields)
}

/// A page of records as `{items, _links}`; links are built against the
/// collection URL, independent of the individual items.
pub fn collection_envelope<T>(
    records: &[T],
    base_url: &str,
    prefix: &str,
    page: i64,
    limit: i64,
) -> Value
where
    T: EntityModel + Serialize,
{
    let canonical = canonical_url(base_url, prefix, T::NAME, "");
    let items: Vec<Value> = records
        .iter()
        .map(|record| Value::Object(record_fields(record)))
        .collect();
    json!({
        "items": items,
        "_links": collection_links(&canonical, page, limit),
    })
}

fn record_fields<T: Serialize>(record: &T) -> Map<String, Value> {
    // Records are plain field structs; anything else serializes to an
    // empty envelope rather than a panic.
    serde_json::to_value(record)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default()
}
