//! Hand-rolled resolver behind the GraphQL-shaped endpoint.
//!
//! Queries are matched by operation name or field text rather than
//! parsed; each recognized section contributes its key to the response
//! `data` object, so one request can resolve several sections.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::content::{ContentCatalog, Relationship};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct GraphQLRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

/// Operation name after the `query` keyword, when present.
pub fn operation_name(query: &str) -> Option<String> {
    let re = Regex::new(r"query\s+(\w+)").ok()?;
    re.captures(query)
        .map(|caps| caps[1].to_string())
}

/// Relationships where either endpoint belongs to the pantheon. The
/// wire contract is looser than the catalog filter, which requires
/// both endpoints.
fn relationships_touching<'a>(
    catalog: &'a ContentCatalog,
    pantheon_id: &str,
) -> Vec<&'a Relationship> {
    let members: HashSet<&str> = catalog
        .deities()
        .iter()
        .filter(|d| d.pantheon_id == pantheon_id)
        .map(|d| d.id.as_str())
        .collect();

    catalog
        .relationships()
        .iter()
        .filter(|r| {
            members.contains(r.from_deity_id.as_str())
                || members.contains(r.to_deity_id.as_str())
        })
        .collect()
}

fn contains_search(
    catalog: &ContentCatalog,
    needle: &str,
    limit: usize,
) -> serde_json::Result<Value> {
    let needle = needle.to_lowercase();

    let deities: Vec<_> = catalog
        .deities()
        .iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&needle)
                || d.description.to_lowercase().contains(&needle)
                || d.domains.iter().any(|dom| dom.to_lowercase().contains(&needle))
        })
        .take(limit)
        .collect();

    let pantheons: Vec<_> = catalog
        .pantheons()
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.culture.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect();

    let stories: Vec<_> = catalog
        .stories()
        .iter()
        .filter(|s| {
            s.title.to_lowercase().contains(&needle)
                || s.summary.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect();

    Ok(json!({
        "deities": serde_json::to_value(deities)?,
        "pantheons": serde_json::to_value(pantheons)?,
        "stories": serde_json::to_value(stories)?,
    }))
}

/// Resolve every section the query text mentions. Unrecognized queries
/// produce an empty data object.
pub fn resolve(
    catalog: &ContentCatalog,
    query: &str,
    variables: &Map<String, Value>,
) -> serde_json::Result<Map<String, Value>> {
    let mut data = Map::new();
    let str_var = |name: &str| variables.get(name).and_then(Value::as_str);

    if query.contains("GetPantheons") || query.contains("pantheons {") {
        data.insert(
            "pantheons".to_string(),
            serde_json::to_value(catalog.pantheons())?,
        );
    }

    if query.contains("GetDeities") || query.contains("deities(") || query.contains("deities {") {
        let value = match str_var("pantheonId") {
            Some(pantheon_id) => serde_json::to_value(catalog.deities_for_pantheon(pantheon_id))?,
            None => serde_json::to_value(catalog.deities())?,
        };
        data.insert("deities".to_string(), value);
    }

    if query.contains("GetDeity") || query.contains("deity(") {
        if let Some(id) = str_var("id") {
            if let Some(deity) = catalog.deity(id) {
                data.insert("deity".to_string(), serde_json::to_value(deity)?);
            }
        }
    }

    if query.contains("GetStories") || query.contains("stories(") || query.contains("stories {") {
        let value = match str_var("pantheonId") {
            Some(pantheon_id) => serde_json::to_value(catalog.stories_for_pantheon(pantheon_id))?,
            None => serde_json::to_value(catalog.stories())?,
        };
        data.insert("stories".to_string(), value);
    }

    if query.contains("GetStory") || query.contains("story(") {
        if let Some(id) = str_var("id") {
            if let Some(story) = catalog.story(id) {
                data.insert("story".to_string(), serde_json::to_value(story)?);
            }
        }
    }

    if query.contains("GetDeityRelationships") || query.contains("deityRelationships(") {
        if let Some(deity_id) = str_var("deityId") {
            data.insert(
                "deityRelationships".to_string(),
                serde_json::to_value(catalog.relationships_for_deity(deity_id))?,
            );
        }
    }

    if query.contains("GetAllRelationships") || query.contains("allRelationships(") {
        let value = match str_var("pantheonId") {
            Some(pantheon_id) => {
                serde_json::to_value(relationships_touching(catalog, pantheon_id))?
            }
            None => serde_json::to_value(catalog.relationships())?,
        };
        data.insert("allRelationships".to_string(), value);
    }

    if query.contains("Search") || query.contains("search(") {
        let limit = match variables.get("limit").and_then(Value::as_u64) {
            Some(0) | None => 10,
            Some(n) => n as usize,
        };
        if let Some(needle) = str_var("query") {
            data.insert(
                "search".to_string(),
                contains_search(catalog, needle, limit)?,
            );
        }
    }

    if query.contains("locations") {
        data.insert("locations".to_string(), Value::Array(Vec::new()));
    }
    if query.contains("events") {
        data.insert("events".to_string(), Value::Array(Vec::new()));
    }

    Ok(data)
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "errors": [{ "message": "Internal server error" }] })),
    )
        .into_response()
}

/// POST /api/graphql
pub async fn execute(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GraphQLRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            error!("GraphQL request body rejected: {}", rejection);
            return internal_error();
        }
    };

    if let Some(operation) = operation_name(&request.query) {
        debug!("GraphQL operation: {}", operation);
    }

    match resolve(&state.catalog, &request.query, &request.variables) {
        Ok(data) => Json(json!({ "data": data })).into_response(),
        Err(e) => {
            error!("GraphQL resolver error: {}", e);
            internal_error()
        }
    }
}

/// GET /api/graphql
pub async fn describe() -> Json<Value> {
    Json(json!({
        "message": "Mythos Atlas GraphQL API",
        "endpoints": {
            "pantheons": "Query all pantheons",
            "deities": "Query deities, optionally filtered by pantheonId",
            "deity": "Query a single deity by id",
            "stories": "Query stories, optionally filtered by pantheonId",
            "story": "Query a single story by id",
            "deityRelationships": "Query relationships for a specific deity",
            "allRelationships": "Query all relationships, optionally filtered by pantheonId",
            "search": "Search across deities, pantheons, and stories",
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::sample_catalog;

    fn vars(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_operation_name_extraction() {
        assert_eq!(
            operation_name("query GetPantheons { pantheons { id } }").as_deref(),
            Some("GetPantheons")
        );
        assert_eq!(operation_name("{ pantheons { id } }"), None);
    }

    #[test]
    fn test_pantheons_query() {
        let catalog = sample_catalog();
        let data = resolve(&catalog, "query GetPantheons { pantheons { id } }", &Map::new())
            .unwrap();
        assert_eq!(data["pantheons"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_deities_filtered_by_variable() {
        let catalog = sample_catalog();

        let all = resolve(&catalog, "query GetDeities { deities { id } }", &Map::new()).unwrap();
        assert_eq!(all["deities"].as_array().unwrap().len(), 10);

        let norse = resolve(
            &catalog,
            "query GetDeities { deities(pantheonId: $pantheonId) { id } }",
            &vars(&[("pantheonId", json!("norse"))]),
        )
        .unwrap();
        assert_eq!(norse["deities"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_single_deity_by_id_or_slug() {
        let catalog = sample_catalog();

        let by_slug = resolve(
            &catalog,
            "query GetDeity { deity(id: $id) { name } }",
            &vars(&[("id", json!("thor-norse"))]),
        )
        .unwrap();
        assert_eq!(by_slug["deity"]["name"], "Thor");

        // Unknown id leaves the key out entirely.
        let missing = resolve(
            &catalog,
            "query GetDeity { deity(id: $id) { name } }",
            &vars(&[("id", json!("nobody"))]),
        )
        .unwrap();
        assert!(!missing.contains_key("deity"));

        // No id variable at all also resolves nothing.
        let no_id = resolve(&catalog, "query GetDeity { deity(id: $id) { name } }", &Map::new())
            .unwrap();
        assert!(!no_id.contains_key("deity"));
    }

    #[test]
    fn test_deity_relationships_both_directions() {
        let catalog = sample_catalog();
        let data = resolve(
            &catalog,
            "query GetDeityRelationships { deityRelationships(deityId: $deityId) { id } }",
            &vars(&[("deityId", json!("loki"))]),
        )
        .unwrap();
        // Loki appears in the enemy edge and the disputed sibling edge.
        assert_eq!(data["deityRelationships"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_all_relationships_touching_pantheon() {
        let catalog = sample_catalog();
        let data = resolve(
            &catalog,
            "query GetAllRelationships { allRelationships(pantheonId: $pantheonId) { id } }",
            &vars(&[("pantheonId", json!("norse"))]),
        )
        .unwrap();
        assert_eq!(data["allRelationships"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_search_section() {
        let catalog = sample_catalog();
        let data = resolve(
            &catalog,
            "query Search { search(query: $query) { deities { id } } }",
            &vars(&[("query", json!("zeus"))]),
        )
        .unwrap();

        let hits = &data["search"];
        assert!(!hits["deities"].as_array().unwrap().is_empty());
        assert!(hits["pantheons"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_search_limit() {
        let catalog = sample_catalog();
        let data = resolve(
            &catalog,
            "query Search { search(query: $query, limit: $limit) { deities { id } } }",
            &vars(&[("query", json!("the")), ("limit", json!(2))]),
        )
        .unwrap();

        let hits = &data["search"];
        assert!(hits["deities"].as_array().unwrap().len() <= 2);
        assert!(hits["stories"].as_array().unwrap().len() <= 2);
    }

    #[test]
    fn test_unrecognized_operation_is_empty() {
        let catalog = sample_catalog();
        let data = resolve(&catalog, "query Nothing { nothing { id } }", &Map::new()).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_locations_and_events_resolve_empty() {
        let catalog = sample_catalog();
        let data = resolve(
            &catalog,
            "query GetLocations { locations { id } events { id } }",
            &Map::new(),
        )
        .unwrap();
        assert_eq!(data["locations"], json!([]));
        assert_eq!(data["events"], json!([]));
    }

    #[test]
    fn test_combined_query_resolves_multiple_sections() {
        let catalog = sample_catalog();
        let data = resolve(
            &catalog,
            "query Everything { pantheons { id } stories { id } }",
            &Map::new(),
        )
        .unwrap();
        assert!(data.contains_key("pantheons"));
        assert!(data.contains_key("stories"));
    }
}
