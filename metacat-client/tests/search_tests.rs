use metacat_client::search::{SortOrder, fields};
use metacat_client::{FluentSearch, Query, SortItem};
use metacat_model::kinds::{GlossaryTermAttributes, TableAttributes};
use metacat_model::schema_for;
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Query DSL ───────────────────────────────────────────────────

#[test]
fn leaf_queries_serialize_to_dsl() {
    assert_eq!(fields::QUALIFIED_NAME.eq("a/b").to_json(), json!({"term": {"qualifiedName": "a/b"}}));
    assert_eq!(
        fields::CONNECTOR_NAME.within(["snowflake", "postgres"]).to_json(),
        json!({"terms": {"connectorName": ["snowflake", "postgres"]}})
    );
    assert_eq!(
        fields::QUALIFIED_NAME.starts_with("default/snowflake").to_json(),
        json!({"prefix": {"qualifiedName": "default/snowflake"}})
    );
    assert_eq!(
        fields::CERTIFICATE_STATUS.has_any_value().to_json(),
        json!({"exists": {"field": "certificateStatus"}})
    );
    assert_eq!(
        fields::DESCRIPTION.matches("monthly revenue").to_json(),
        json!({"match": {"description": {"query": "monthly revenue"}}})
    );
    assert_eq!(
        fields::NAME.wildcard("ORD*").to_json(),
        json!({"wildcard": {"name.keyword": "ORD*"}})
    );
    assert_eq!(
        fields::connection::ALLOW_QUERY.eq(true).to_json(),
        json!({"term": {"allowQuery": true}})
    );
}

#[test]
fn numeric_ranges() {
    assert_eq!(
        fields::table::ROW_COUNT.gt(1000).to_json(),
        json!({"range": {"rowCount": {"gt": 1000}}})
    );
    assert_eq!(
        fields::UPDATE_TIME.between(1_700_000_000_000i64, 1_800_000_000_000i64).to_json(),
        json!({"range": {"__modificationTimestamp": {"gte": 1_700_000_000_000i64, "lte": 1_800_000_000_000i64}}})
    );
    assert_eq!(fields::column::ORDER.eq(1).to_json(), json!({"term": {"order": 1}}));
}

#[test]
fn bool_query_omits_empty_clauses() {
    let q = Query::and([Query::exists("a"), Query::not(Query::term("b", "x"))]);
    assert_eq!(
        q.to_json(),
        json!({"bool": {"must": [
            {"exists": {"field": "a"}},
            {"bool": {"must_not": [{"term": {"b": "x"}}]}}
        ]}})
    );
    assert_eq!(
        Query::or([Query::term("a", 1)]).to_json(),
        json!({"bool": {"should": [{"term": {"a": 1}}], "minimum_should_match": 1}})
    );
}

#[test]
fn query_serializes_like_to_json() {
    let q = fields::TAGS.eq("PII");
    assert_eq!(serde_json::to_value(&q).unwrap(), q.to_json());
}

#[test]
fn sort_items() {
    assert_eq!(
        serde_json::to_value(SortItem::desc("__timestamp")).unwrap(),
        json!({"__timestamp": {"order": "desc"}})
    );
    assert_eq!(SortItem::asc("name.keyword").order, SortOrder::Asc);
}

#[test]
fn relation_fields_come_from_schema() {
    let schema = schema_for("GlossaryTerm").unwrap();
    let anchor = fields::RelationField::from_def(schema.relationship("anchor").unwrap());
    assert_eq!(anchor, fields::glossary_term::ANCHOR);
    assert_eq!(anchor.has_any().to_json(), json!({"exists": {"field": "anchor"}}));
}

// ── FluentSearch ────────────────────────────────────────────────

#[test]
fn for_kind_filters_type_and_active_state() {
    let request = FluentSearch::for_kind::<TableAttributes>().to_request(0);
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(
        body["dsl"]["query"],
        json!({"bool": {"filter": [
            {"term": {"__typeName.keyword": "Table"}},
            {"term": {"__state": "ACTIVE"}}
        ]}})
    );
    assert_eq!(body["dsl"]["from"], 0);
    assert_eq!(body["dsl"]["size"], 100);
    assert_eq!(body["dsl"]["track_total_hits"], true);
    assert_eq!(body["dsl"]["sort"], json!([{"__guid": {"order": "asc"}}]));
    assert_eq!(body["suppressLogs"], true);
    assert!(body.get("attributes").is_none());
}

#[test]
fn include_archived_drops_state_filter() {
    let query = FluentSearch::for_kind::<TableAttributes>().include_archived(true).query();
    assert_eq!(
        query.to_json(),
        json!({"bool": {"filter": [{"term": {"__typeName.keyword": "Table"}}]}})
    );
}

#[test]
fn some_conditions_use_minimum_should_match() {
    let query = FluentSearch::new()
        .include_archived(true)
        .where_some(fields::TAGS.eq("PII"))
        .where_some(fields::TAGS.eq("GDPR"))
        .where_some(fields::CERTIFICATE_STATUS.eq("VERIFIED"))
        .min_somes(2)
        .where_not(fields::OWNER_USERS.eq("bot"))
        .query();
    let json = query.to_json();
    assert_eq!(json["bool"]["should"].as_array().unwrap().len(), 3);
    assert_eq!(json["bool"]["minimum_should_match"], 2);
    assert_eq!(json["bool"]["must_not"], json!([{"term": {"ownerUsers": "bot"}}]));
    assert!(json["bool"].get("filter").is_none());
}

#[test]
fn guid_tie_breaker_follows_user_sort() {
    let request = FluentSearch::new()
        .sort(SortItem::desc("__timestamp"))
        .page_size(20)
        .to_request(40);
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(
        body["dsl"]["sort"],
        json!([{"__timestamp": {"order": "desc"}}, {"__guid": {"order": "asc"}}])
    );
    assert_eq!(body["dsl"]["from"], 40);
    assert_eq!(body["dsl"]["size"], 20);

    let explicit = FluentSearch::new().sort(SortItem::desc("__guid")).to_request(0);
    assert_eq!(explicit.dsl.sort, vec![SortItem::desc("__guid")]);
}

#[test]
fn page_size_is_clamped() {
    assert_eq!(FluentSearch::new().page_size(0).to_request(0).dsl.size, 1);
    assert_eq!(FluentSearch::new().page_size(5000).to_request(0).dsl.size, 1000);
}

#[test]
fn include_relationships_of_kind() {
    let request = FluentSearch::new()
        .include_on_results("description")
        .include_relationships_of::<GlossaryTermAttributes>()
        .include_on_relations("name")
        .to_request(0);
    assert_eq!(
        request.attributes,
        vec!["description", "anchor", "assignedEntities", "seeAlso", "synonyms", "meanings"]
    );
    assert_eq!(request.relation_attributes, vec!["name"]);
}
