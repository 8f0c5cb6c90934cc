use metacat_types::Guid;
use std::collections::HashSet;
use std::str::FromStr;

// ── Placeholders ──────────────────────────────────────────────────

#[test]
fn placeholder_is_negative_number() {
    let guid = Guid::placeholder();
    assert!(guid.is_placeholder());
    let n: i64 = guid.as_str().parse().unwrap();
    assert!(n < 0);
}

#[test]
fn placeholders_are_unique() {
    let set: HashSet<Guid> = (0..100).map(|_| Guid::placeholder()).collect();
    assert_eq!(set.len(), 100);
}

#[test]
fn placeholder_parses_back() {
    let guid = Guid::placeholder();
    let parsed = Guid::parse(guid.as_str()).unwrap();
    assert_eq!(guid, parsed);
    assert!(parsed.is_placeholder());
}

// ── Server GUIDs ─────────────────────────────────────────────────

#[test]
fn uuid_guid_is_not_placeholder() {
    let guid = Guid::parse("3f8ae0b8-6a1d-4d0c-9a4e-0d5c1f2e7b11").unwrap();
    assert!(!guid.is_placeholder());
    assert_eq!(guid.to_string(), "3f8ae0b8-6a1d-4d0c-9a4e-0d5c1f2e7b11");
}

#[test]
fn random_guid_is_uuid() {
    let guid = Guid::random();
    assert!(uuid::Uuid::parse_str(guid.as_str()).is_ok());
    assert!(!guid.is_placeholder());
}

#[test]
fn from_str_matches_parse() {
    let guid = Guid::from_str("-12345").unwrap();
    assert_eq!(guid, Guid::parse("-12345").unwrap());
}

// ── Invalid input ────────────────────────────────────────────────

#[test]
fn empty_guid_rejected() {
    assert!(Guid::parse("").is_err());
}

#[test]
fn bare_dash_rejected() {
    assert!(Guid::parse("-").is_err());
}

#[test]
fn dash_with_letters_rejected() {
    assert!(Guid::parse("-12ab").is_err());
}

#[test]
fn garbage_rejected() {
    assert!(Guid::parse("not-a-guid").is_err());
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn guid_serializes_as_plain_string() {
    let guid = Guid::parse("-42").unwrap();
    assert_eq!(serde_json::to_string(&guid).unwrap(), "\"-42\"");
    let back: Guid = serde_json::from_str("\"-42\"").unwrap();
    assert_eq!(back, guid);
}
