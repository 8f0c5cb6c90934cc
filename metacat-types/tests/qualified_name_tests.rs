use metacat_types::qualified_name as qn;
use proptest::prelude::*;

#[test]
fn join_appends_segment() {
    assert_eq!(qn::join("default/snowflake/1700000000", "DB").unwrap(), "default/snowflake/1700000000/DB");
}

#[test]
fn join_rejects_empty_parts() {
    assert!(qn::join("", "DB").is_err());
    assert!(qn::join("default/snowflake/1", "").is_err());
}

#[test]
fn parent_and_last_segment() {
    let table = "default/snowflake/1/DB/SCH/ORDERS";
    assert_eq!(qn::parent(table), Some("default/snowflake/1/DB/SCH"));
    assert_eq!(qn::last_segment(table), "ORDERS");
    assert_eq!(qn::parent("single"), None);
    assert_eq!(qn::last_segment("single"), "single");
}

#[test]
fn connection_prefix() {
    let column = "default/postgres/1712345678/db/public/users/id";
    assert_eq!(
        qn::connection_qualified_name(column),
        Some("default/postgres/1712345678")
    );
    assert_eq!(qn::connector_name(column), Some("postgres"));
    assert_eq!(qn::connection_qualified_name("default/postgres"), None);
}

#[test]
fn prefix_and_segment() {
    let name = "a/b/c/d";
    assert_eq!(qn::prefix(name, 1), Some("a"));
    assert_eq!(qn::prefix(name, 4), Some("a/b/c/d"));
    assert_eq!(qn::prefix(name, 5), None);
    assert_eq!(qn::prefix(name, 0), None);
    assert_eq!(qn::segment(name, 2), Some("c"));
    assert_eq!(qn::segment(name, 9), None);
    assert_eq!(qn::depth(name), 4);
    assert_eq!(qn::depth(""), 0);
}

#[test]
fn connection_builder() {
    assert_eq!(qn::connection("bigquery", 1700000000), "default/bigquery/1700000000");
}

#[test]
fn require_depth_checks_segments() {
    assert!(qn::require_depth("default/snowflake/1/DB", 4, "database").is_ok());
    assert!(qn::require_depth("default/snowflake/1", 4, "database").is_err());
    assert!(qn::require_depth("default//1/DB", 4, "database").is_err());
}

proptest! {
    #[test]
    fn parent_of_join_is_parent(
        parent in "[a-z0-9]{1,8}(/[a-z0-9]{1,8}){0,5}",
        name in "[A-Za-z0-9_]{1,12}",
    ) {
        let joined = qn::join(&parent, &name).unwrap();
        prop_assert_eq!(qn::parent(&joined), Some(parent.as_str()));
        prop_assert_eq!(qn::last_segment(&joined), name.as_str());
        prop_assert_eq!(qn::depth(&joined), qn::depth(&parent) + 1);
    }
}
