use metacat_model::{
    AnyAsset, Asset, Column, ColumnParent, Entity, GlossaryTerm, ModelError, Reference, Table, Tag,
};
use metacat_model::kinds::TableAttributes;
use metacat_types::{AnnouncementType, CertificateStatus, EntityStatus, Guid, SaveSemantic};
use pretty_assertions::assert_eq;
use serde_json::json;

const SCHEMA_QN: &str = "default/snowflake/1700000000/ANALYTICS/SALES";

fn orders() -> Table {
    Table::creator("ORDERS", SCHEMA_QN).unwrap()
}

// ── to_entity ────────────────────────────────────────────────────

#[test]
fn to_entity_writes_attributes_without_nulls() {
    let entity = orders().to_entity().unwrap();
    assert_eq!(entity.type_name, "Table");
    assert!(entity.guid.as_ref().unwrap().is_placeholder());
    assert_eq!(
        entity.attributes,
        json!({
            "qualifiedName": "default/snowflake/1700000000/ANALYTICS/SALES/ORDERS",
            "name": "ORDERS",
            "connectorName": "snowflake",
            "connectionQualifiedName": "default/snowflake/1700000000",
            "schemaName": "SALES",
            "schemaQualifiedName": SCHEMA_QN,
            "databaseName": "ANALYTICS",
            "databaseQualifiedName": "default/snowflake/1700000000/ANALYTICS"
        })
        .as_object()
        .unwrap()
        .clone()
    );
}

#[test]
fn replace_references_go_to_relationship_attributes() {
    let entity = orders().to_entity().unwrap();
    assert_eq!(
        entity.relationship_attributes["atlanSchema"],
        json!({"typeName": "Schema", "uniqueAttributes": {"qualifiedName": SCHEMA_QN}})
    );
    assert!(entity.append_relationship_attributes.is_empty());
    assert!(entity.remove_relationship_attributes.is_empty());
    assert!(!entity.attributes.contains_key("atlanSchema"));
}

#[test]
fn references_are_split_by_semantic() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    let keep = Guid::random();
    let drop = Guid::random();
    table.append_columns([Reference::by_guid("Column", keep.clone())]);
    table.remove_columns([Reference::by_guid("Column", drop.clone())]);

    let entity = table.to_entity().unwrap();
    assert_eq!(
        entity.append_relationship_attributes["columns"],
        json!([{"typeName": "Column", "guid": keep.as_str()}])
    );
    assert_eq!(
        entity.remove_relationship_attributes["columns"],
        json!([{"typeName": "Column", "guid": drop.as_str()}])
    );
    assert!(entity.relationship_attributes.is_empty());
}

#[test]
fn mixed_set_keeps_each_group() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.attributes.columns = Some(vec![
        Reference::by_qualified_name("Column", "a/b/c/d/e/T/ID"),
        Reference::by_qualified_name("Column", "a/b/c/d/e/T/X").with_semantic(SaveSemantic::Append),
    ]);
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.relationship_attributes["columns"].as_array().unwrap().len(), 1);
    assert_eq!(entity.append_relationship_attributes["columns"].as_array().unwrap().len(), 1);
}

#[test]
fn empty_set_clears_relationship() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.attributes.columns = Some(Vec::new());
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.relationship_attributes["columns"], json!([]));
}

#[test]
fn invalid_reference_blocks_serialization() {
    let mut table = orders();
    table.attributes.atlan_schema = Some(Reference::by_qualified_name("Schema", ""));
    let err = table.to_entity().unwrap_err();
    assert!(matches!(err, ModelError::InvalidReference(_)));
    assert!(serde_json::to_value(&table).is_err());
}

#[test]
fn tags_are_sent_as_classifications() {
    let mut table = orders();
    table.tags = Some(vec![Tag::new("PII")]);
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.classifications.unwrap()[0].type_name, "PII");
}

// ── Explicit nulls ──────────────────────────────────────────────

#[test]
fn remove_helpers_send_nulls() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.remove_certificate();
    table.remove_announcement();
    table.remove_description();
    table.remove_owners();
    let entity = table.to_entity().unwrap();
    for field in [
        "certificateStatus",
        "certificateStatusMessage",
        "announcementType",
        "announcementTitle",
        "announcementMessage",
        "description",
        "ownerUsers",
        "ownerGroups",
    ] {
        assert_eq!(entity.attributes[field], json!(null), "{field}");
    }
}

#[test]
fn clearing_terms_empties_the_relationship() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.assign_terms(SaveSemantic::Replace, Vec::new());
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.relationship_attributes["meanings"], json!([]));
    assert!(!entity.attributes.contains_key("meanings"));
}

#[test]
fn certificate_set_after_removal_is_sent() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.remove_certificate();
    table.set_certificate(CertificateStatus::Verified, Some("ok".into()));
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.attributes["certificateStatus"], "VERIFIED");
    assert_eq!(entity.attributes["certificateStatusMessage"], "ok");
    assert_eq!(table.null_fields().count(), 1);
}

#[test]
fn certificate_set_without_message_still_clears_old_message() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.remove_certificate();
    table.set_certificate(CertificateStatus::Draft, None);
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.attributes["certificateStatus"], "DRAFT");
    assert_eq!(entity.attributes["certificateStatusMessage"], json!(null));
}

#[test]
fn announcement_set_after_removal_is_sent() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.remove_announcement();
    table.set_announcement(AnnouncementType::Issue, "Broken".into(), Some("load failed".into()));
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.attributes["announcementType"], "issue");
    assert_eq!(entity.attributes["announcementTitle"], "Broken");
    assert_eq!(entity.attributes["announcementMessage"], "load failed");
}

#[test]
fn description_assigned_after_removal_is_sent() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.remove_description();
    table.common.description = Some("orders by day".into());
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.attributes["description"], "orders by day");
}

#[test]
fn terms_assigned_after_clearing_are_sent() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    let term = Guid::random();
    table.assign_terms(SaveSemantic::Replace, Vec::new());
    table.assign_terms(SaveSemantic::Replace, vec![Reference::by_guid("GlossaryTerm", term.clone())]);
    let entity = table.to_entity().unwrap();
    assert_eq!(
        entity.relationship_attributes["meanings"],
        json!([{"typeName": "GlossaryTerm", "guid": term.as_str()}])
    );
    assert_eq!(table.null_fields().count(), 0);
}

#[test]
fn appended_terms_after_clearing_do_not_send_empty_replace() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    let term = Guid::random();
    table.assign_terms(SaveSemantic::Replace, Vec::new());
    table.assign_terms(SaveSemantic::Append, vec![Reference::by_guid("GlossaryTerm", term)]);
    let entity = table.to_entity().unwrap();
    assert!(!entity.relationship_attributes.contains_key("meanings"));
    assert_eq!(entity.append_relationship_attributes["meanings"].as_array().unwrap().len(), 1);
}

#[test]
fn appended_terms_use_append_map() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    let term = Guid::random();
    table.assign_terms(SaveSemantic::Append, vec![Reference::by_guid("GlossaryTerm", term.clone())]);
    let entity = table.to_entity().unwrap();
    assert_eq!(
        entity.append_relationship_attributes["meanings"],
        json!([{"typeName": "GlossaryTerm", "guid": term.as_str()}])
    );
}

#[test]
fn certificate_and_announcement_setters() {
    let mut table = Table::updater("a/b/c/d/e/T", "T");
    table.set_certificate(CertificateStatus::Verified, Some("checked".into()));
    table.set_announcement(AnnouncementType::Warning, "Migrating".into(), None);
    let entity = table.to_entity().unwrap();
    assert_eq!(entity.attributes["certificateStatus"], "VERIFIED");
    assert_eq!(entity.attributes["certificateStatusMessage"], "checked");
    assert_eq!(entity.attributes["announcementType"], "warning");
    assert_eq!(entity.attributes["announcementTitle"], "Migrating");
    assert!(!entity.attributes.contains_key("announcementMessage"));
}

// ── from_entity ─────────────────────────────────────────────────

fn server_table() -> Entity {
    serde_json::from_value(json!({
        "typeName": "Table",
        "guid": "0f4b4b50-6a5f-4c8e-9a5c-3c2b1a0f9e8d",
        "status": "ACTIVE",
        "attributes": {
            "qualifiedName": "default/snowflake/1/DB/SCH/ORDERS",
            "name": "ORDERS",
            "rowCount": 1200,
            "description": null,
            "certificateStatus": "DRAFT"
        },
        "relationshipAttributes": {
            "atlanSchema": {
                "guid": "9b7c8d6e-5f4a-4b3c-8d2e-1f0a9b8c7d6e",
                "typeName": "Schema",
                "displayText": "SCH"
            },
            "columns": [],
            "meanings": null
        },
        "classifications": [{"typeName": "PII", "entityGuid": "0f4b4b50-6a5f-4c8e-9a5c-3c2b1a0f9e8d"}],
        "createTime": 1700000000000i64,
        "updateTime": 1700000500000i64,
        "createdBy": "jdoe"
    }))
    .unwrap()
}

#[test]
fn from_entity_reads_typed_fields() {
    let table = Table::from_entity(server_table()).unwrap();
    assert_eq!(table.qualified_name(), Some("default/snowflake/1/DB/SCH/ORDERS"));
    assert_eq!(table.attributes.row_count, Some(1200));
    assert_eq!(table.common.description, None);
    assert_eq!(table.common.certificate_status, Some(CertificateStatus::Draft));
    assert_eq!(table.status, Some(EntityStatus::Active));
    assert_eq!(table.attributes.atlan_schema.as_ref().unwrap().display_text.as_deref(), Some("SCH"));
    assert_eq!(table.attributes.columns, Some(Vec::new()));
    assert_eq!(table.common.meanings, None);
    assert!(table.has_tag("PII"));
    assert_eq!(table.created_by.as_deref(), Some("jdoe"));
    assert_eq!(table.created_at().unwrap().timestamp(), 1_700_000_000);
    assert_eq!(table.updated_at().unwrap().timestamp(), 1_700_000_500);
}

#[test]
fn from_entity_rejects_other_types() {
    let mut entity = server_table();
    entity.type_name = "View".into();
    match Table::from_entity(entity) {
        Err(ModelError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, "Table");
            assert_eq!(actual, "View");
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
}

#[test]
fn serde_goes_through_the_wire_shape() {
    let json = serde_json::to_value(orders()).unwrap();
    assert_eq!(json["typeName"], "Table");
    assert_eq!(json["attributes"]["name"], "ORDERS");
    let back: Table = serde_json::from_value(json).unwrap();
    assert_eq!(back.name(), Some("ORDERS"));
    assert_eq!(back.attributes.schema_name.as_deref(), Some("SALES"));
}

// ── References and trimming ─────────────────────────────────────

#[test]
fn ref_builders_carry_type_and_semantic() {
    let by_qn = Table::ref_by_qualified_name("a/b", SaveSemantic::Remove);
    assert_eq!(by_qn.type_name, "Table");
    assert_eq!(by_qn.semantic, SaveSemantic::Remove);
    let guid = Guid::random();
    let by_guid = Column::ref_by_guid(guid.clone(), SaveSemantic::Append);
    assert_eq!(by_guid.type_name, "Column");
    assert_eq!(by_guid.guid, Some(guid));
}

#[test]
fn to_reference_prefers_server_guid_then_qualified_name() {
    let table = Table::from_entity(server_table()).unwrap();
    let r = table.to_reference(SaveSemantic::Replace).unwrap();
    assert_eq!(r.guid.unwrap().as_str(), "0f4b4b50-6a5f-4c8e-9a5c-3c2b1a0f9e8d");

    let fresh = orders();
    let r = fresh.to_reference(SaveSemantic::Append).unwrap();
    assert!(r.guid.is_none());
    assert_eq!(r.qualified_name(), fresh.qualified_name());
    assert_eq!(r.semantic, SaveSemantic::Append);
}

#[test]
fn to_reference_falls_back_to_placeholder() {
    let mut table = orders();
    table.common.qualified_name = None;
    let r = table.to_reference(SaveSemantic::Replace).unwrap();
    assert!(r.guid.unwrap().is_placeholder());
}

#[test]
fn to_reference_without_identity_fails() {
    let table: Table = Asset::<TableAttributes>::default();
    assert!(matches!(
        table.to_reference(SaveSemantic::Replace),
        Err(ModelError::InvalidReference(_))
    ));
}

#[test]
fn trim_to_required_keeps_identity_only() {
    let table = Table::from_entity(server_table()).unwrap();
    let trimmed = table.trim_to_required().unwrap();
    assert_eq!(trimmed.guid, table.guid);
    assert_eq!(trimmed.qualified_name(), table.qualified_name());
    assert_eq!(trimmed.name(), Some("ORDERS"));
    assert_eq!(trimmed.attributes, TableAttributes::default());
    assert_eq!(trimmed.tags, None);
    assert_eq!(trimmed.common.certificate_status, None);
}

#[test]
fn trim_to_required_keeps_required_relationships() {
    let glossary = Guid::random();
    let mut term = GlossaryTerm::updater("x@glossary", "Revenue", glossary.clone());
    term.attributes.short_description = Some("money in".into());
    let trimmed = term.trim_to_required().unwrap();
    assert_eq!(trimmed.attributes.anchor.unwrap().guid, Some(glossary));
    assert_eq!(trimmed.attributes.short_description, None);
}

#[test]
fn trim_to_required_fails_without_required_fields() {
    let mut term = GlossaryTerm::updater("x@glossary", "Revenue", Guid::random());
    term.attributes.anchor = None;
    match term.trim_to_required() {
        Err(ModelError::MissingField { type_name, field }) => {
            assert_eq!(type_name, "GlossaryTerm");
            assert_eq!(field, "anchor");
        }
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn validate_required_needs_name_and_qualified_name() {
    let mut table = orders();
    table.common.name = Some(String::new());
    assert!(matches!(
        table.validate_required(),
        Err(ModelError::MissingField { ref field, .. }) if field == "name"
    ));
    table.common.qualified_name = None;
    assert!(matches!(
        table.validate_required(),
        Err(ModelError::MissingField { ref field, .. }) if field == "qualifiedName"
    ));
}

#[test]
fn with_status_sets_status() {
    let entity = orders().with_status(EntityStatus::Active).to_entity().unwrap();
    assert_eq!(entity.status, Some(EntityStatus::Active));
}

// ── AnyAsset ────────────────────────────────────────────────────

#[test]
fn any_asset_dispatches_on_type_name() {
    let any = AnyAsset::from_entity(server_table()).unwrap();
    assert!(matches!(any, AnyAsset::Table(_)));
    assert_eq!(any.type_name(), "Table");
    assert_eq!(any.name(), Some("ORDERS"));
    assert_eq!(any.status(), Some(EntityStatus::Active));
    assert!(any.is_known());
}

#[test]
fn any_asset_keeps_unknown_types() {
    let entity: Entity = serde_json::from_value(json!({
        "typeName": "TableauDashboard",
        "guid": "1a2b3c4d-1a2b-4c3d-8e9f-0a1b2c3d4e5f",
        "attributes": {"qualifiedName": "default/tableau/1/site/dash", "name": "dash"}
    }))
    .unwrap();
    let any = AnyAsset::from_entity(entity.clone()).unwrap();
    assert!(!any.is_known());
    assert_eq!(any.type_name(), "TableauDashboard");
    assert_eq!(any.qualified_name(), Some("default/tableau/1/site/dash"));
    assert_eq!(any.to_entity().unwrap(), entity);
}

#[test]
fn any_asset_downcast_borrows_matching_kind() {
    let any = AnyAsset::from(orders());
    let table = any.downcast::<TableAttributes>().unwrap();
    assert_eq!(table.name(), Some("ORDERS"));
    assert!(any.downcast::<metacat_model::kinds::ViewAttributes>().is_none());
}

#[test]
fn any_asset_into_kind() {
    let any = AnyAsset::from(Column::creator("ID", ColumnParent::Table, "d/s/1/DB/SCH/T", 1).unwrap());
    let column = any.clone().into_kind::<metacat_model::kinds::ColumnAttributes>().unwrap();
    assert_eq!(column.attributes.order, Some(1));
    assert!(matches!(
        any.into_kind::<TableAttributes>(),
        Err(ModelError::TypeMismatch { .. })
    ));
}
