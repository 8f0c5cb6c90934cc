use metacat_types::{
    AnnouncementType, CertificateStatus, ConnectorCategory, ConnectorType, DeleteType,
    EntityStatus, SaveSemantic,
};

#[test]
fn save_semantic_defaults_to_replace() {
    assert_eq!(SaveSemantic::default(), SaveSemantic::Replace);
}

#[test]
fn save_semantic_wire_values() {
    assert_eq!(serde_json::to_string(&SaveSemantic::Append).unwrap(), "\"APPEND\"");
    assert_eq!(serde_json::to_string(&SaveSemantic::Remove).unwrap(), "\"REMOVE\"");
}

#[test]
fn entity_status_wire_values() {
    assert_eq!(EntityStatus::Deleted.as_str(), "DELETED");
    let parsed: EntityStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
    assert_eq!(parsed, EntityStatus::Active);
}

#[test]
fn delete_type_values() {
    assert_eq!(DeleteType::Soft.as_str(), "SOFT");
    assert_eq!(DeleteType::Purge.as_str(), "PURGE");
}

#[test]
fn certificate_and_announcement_wire_values() {
    assert_eq!(
        serde_json::to_value(CertificateStatus::Verified).unwrap(),
        "VERIFIED"
    );
    assert_eq!(
        serde_json::to_value(AnnouncementType::Warning).unwrap(),
        "warning"
    );
}

#[test]
fn connector_parse_and_category() {
    let c = ConnectorType::parse("snowflake").unwrap();
    assert_eq!(c, ConnectorType::Snowflake);
    assert_eq!(c.category(), ConnectorCategory::Warehouse);
    assert_eq!(ConnectorType::S3.category(), ConnectorCategory::ObjectStore);
}

#[test]
fn connector_parse_unknown() {
    assert!(ConnectorType::parse("oracle-9i").is_err());
}

#[test]
fn connector_values_roundtrip() {
    for c in ConnectorType::ALL {
        assert_eq!(ConnectorType::parse(c.value()).unwrap(), c);
        assert_eq!(serde_json::to_value(c).unwrap(), c.value());
    }
}

#[test]
fn connector_category_kebab_case() {
    assert_eq!(
        serde_json::to_value(ConnectorCategory::ObjectStore).unwrap(),
        "object-store"
    );
}
