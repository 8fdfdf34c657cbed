//! Integration tests for translatable entities
//!
//! These tests drive the public API the way a host application would: a `Day`
//! model with a translatable `name` field, rows coming from a shared
//! translation table, and the locale switching between requests.

use serde_json::json;
use std::sync::Arc;
use translatable_fields::{
    Entity, FieldValue, FixedLocales, GroupId, Interception, Locale, LocaleFn, Translatable,
    TranslationError, TranslationGroup, TranslationTable,
};

// ==================== Test Helpers ====================

type Day = Entity<FixedLocales>;

fn locale(code: &str) -> Locale {
    Locale::new(code).expect("valid locale")
}

/// A `days` row whose `name` lives in translation group 7
fn monday(current: &str, fallback: &str) -> Day {
    Entity::from_json(
        json!({"id": 1, "key": "monday", "_name": 7}),
        FixedLocales::new(locale(current), locale(fallback)),
    )
    .expect("valid row")
}

/// A translation table holding group 7 = {en: "Monday"}
fn seeded_table() -> TranslationTable {
    let table = TranslationTable::new();
    table
        .insert(GroupId::Int(7), locale("en"), "Monday")
        .expect("insert");
    table
}

fn text(day: &mut Day, key: &str) -> Option<String> {
    day.get_attribute(key)
        .expect("readable")
        .and_then(|value| value.as_text().map(str::to_string))
}

// ==================== Read Scenarios ====================

#[test]
fn test_read_in_current_locale() {
    let table = seeded_table();
    let mut day = monday("en", "en").with_source(Arc::new(table));

    assert_eq!(
        day.intercept_get("name").unwrap(),
        Some(Interception::Text(Some("Monday".to_string())))
    );
    assert_eq!(day.intercept_get("other").unwrap(), None);
}

#[test]
fn test_read_reference_returns_group_object() {
    let table = seeded_table();
    let mut day = monday("en", "en").with_source(Arc::new(table));

    match day.intercept_get("_name").unwrap() {
        Some(Interception::Group(group)) => {
            assert_eq!(group.id(), &GroupId::Int(7));
            assert_eq!(group.get(&locale("en")), Some("Monday"));
        }
        other => panic!("expected the group for id 7, got {:?}", other),
    }
}

#[test]
fn test_read_falls_back_to_default_locale() {
    let table = seeded_table();
    let mut day = monday("fr", "en").with_source(Arc::new(table));

    assert_eq!(text(&mut day, "name"), Some("Monday".to_string()));
}

#[test]
fn test_plain_attributes_pass_through() {
    let mut day = monday("en", "en");

    assert_eq!(
        day.get_attribute("key").unwrap(),
        Some(FieldValue::Plain(&json!("monday")))
    );
    assert_eq!(day.get_attribute("id").unwrap(), Some(FieldValue::Plain(&json!(1))));
}

// ==================== Write Scenarios ====================

#[test]
fn test_write_updates_current_locale_only() {
    let table = seeded_table();
    let mut day = monday("es", "en").with_source(Arc::new(table.clone()));

    assert!(day.intercept_set("name", "Lunes").unwrap());

    let group = day.group("name").unwrap();
    assert_eq!(group.in_locale(&locale("es"), &locale("en")), Some("Lunes"));
    assert_eq!(group.get(&locale("en")), Some("Monday"));

    // Not persisted until saved
    assert_eq!(table.value(&GroupId::Int(7), &locale("es")).unwrap(), None);
    assert_eq!(day.save_translations().unwrap(), 1);
    assert_eq!(
        table.value(&GroupId::Int(7), &locale("es")).unwrap(),
        Some("Lunes".to_string())
    );
}

#[test]
fn test_saved_translations_visible_to_new_entities() {
    let table = seeded_table();

    let mut writer = monday("es", "en").with_source(Arc::new(table.clone()));
    writer.set_attribute("name", "Lunes").unwrap();
    writer.save_translations().unwrap();

    let mut reader = monday("es", "en").with_source(Arc::new(table));
    assert_eq!(text(&mut reader, "name"), Some("Lunes".to_string()));
}

#[test]
fn test_switching_locale_between_requests() {
    let mut day = monday("en", "en");
    day.set_attribute("name", "Monday").unwrap();

    day.locales_mut().set_current(locale("es"));
    assert_eq!(text(&mut day, "name"), Some("Monday".to_string()));

    day.set_attribute("name", "Lunes").unwrap();
    assert_eq!(text(&mut day, "name"), Some("Lunes".to_string()));
}

// ==================== Cache Behaviour ====================

#[test]
fn test_group_is_same_object_within_entity() {
    let mut day = monday("en", "en");

    let first: *const TranslationGroup = day.group("name").unwrap();
    let second: *const TranslationGroup = day.group("name").unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_cache_is_not_shared_between_entities() {
    let mut first = monday("en", "en");
    let mut second = monday("en", "en");

    first.set_attribute("name", "Monday").unwrap();
    assert_eq!(text(&mut second, "name"), None);
}

// ==================== Errors ====================

#[test]
fn test_resolve_group_id_misuse() {
    let day = monday("en", "en");

    assert_eq!(day.resolve_group_id("name").unwrap(), GroupId::Int(7));
    assert_eq!(day.resolve_group_id("_name").unwrap(), GroupId::Int(7));
    assert_eq!(
        day.resolve_group_id("key"),
        Err(TranslationError::KeyNotTranslatable("key".to_string()))
    );
}

#[test]
fn test_get_and_set_never_raise_for_unknown_keys() {
    let mut day = monday("en", "en");

    assert!(day.get_attribute("unknown").unwrap().is_none());
    day.set_attribute("unknown", "value").unwrap();
    assert!(day.has_attribute("unknown"));
}

#[test]
fn test_underscore_columns_without_group_id_read_as_plain() {
    let mut row = Entity::from_json(
        json!({"_draft": null, "_score": 1.5, "_name": 7}),
        FixedLocales::single(locale("en")),
    )
    .expect("valid row");

    assert_eq!(
        row.get_attribute("_draft").expect("readable"),
        Some(FieldValue::Plain(&serde_json::Value::Null))
    );
    assert_eq!(
        row.get_attribute("_score").expect("readable"),
        Some(FieldValue::Plain(&json!(1.5)))
    );
    assert!(!row.is_translation_reference("_draft"));
    assert!(row.is_translation_reference("_name"));
}

#[test]
fn test_invalid_row() {
    let result = Entity::from_json(json!("monday"), FixedLocales::single(locale("en")));
    assert!(matches!(result, Err(TranslationError::InvalidRow(_))));
}

// ==================== Raw Columns ====================

#[test]
fn test_legacy_plain_column_survives_marker() {
    let mut day = Entity::from_json(
        json!({"id": 1, "name": "legacy", "_name": 7}),
        FixedLocales::single(locale("en")),
    )
    .expect("valid row")
    .with_source(Arc::new(seeded_table()));

    assert!(day.is_translatable("name"));
    assert!(day.has_attribute("_name"));
    assert_eq!(text(&mut day, "name"), Some("Monday".to_string()));
    assert_eq!(day.to_raw(), json!({"id": 1, "name": "legacy", "_name": 7}));
}

#[test]
fn test_clearing_reference_column_is_kept() {
    let mut day = monday("en", "en");
    day.set_attribute("_name", serde_json::Value::Null)
        .expect("writable");

    assert!(!day.is_translatable("name"));
    assert!(day.resolve_group_id("name").is_err());
    assert_eq!(day.to_raw()["_name"], serde_json::Value::Null);
    assert!(day.get_attribute("name").expect("readable").is_none());
}

// ==================== Locale Providers ====================

#[test]
fn test_closure_locale_provider() {
    let current = std::cell::Cell::new("es");
    let provider = LocaleFn::new(|| locale(current.get()), locale("en"));

    let mut day = Entity::from_json(json!({"_name": 7}), provider).unwrap();
    day.set_attribute("name", "Lunes").unwrap();

    current.set("en");
    day.set_attribute("name", "Monday").unwrap();

    let group = day.group("_name").unwrap();
    assert_eq!(group.get(&locale("es")), Some("Lunes"));
    assert_eq!(group.get(&locale("en")), Some("Monday"));
}

// ==================== New Records ====================

#[test]
fn test_new_record_gets_fresh_group() {
    let table = seeded_table();
    let mut tuesday = Entity::from_json(json!({"id": 2, "key": "tuesday"}), FixedLocales::single(locale("en")))
        .unwrap()
        .with_source(Arc::new(table.clone()));

    assert!(!tuesday.is_translatable("name"));
    let id = tuesday.make_translatable("name", &table).unwrap();
    assert_eq!(id, GroupId::Int(8));
    assert!(tuesday.is_translatable("name"));

    tuesday.set_attribute("name", "Tuesday").unwrap();
    tuesday.save_translations().unwrap();

    assert_eq!(table.group_count().unwrap(), 2);
    assert_eq!(tuesday.to_raw()["_name"], json!(8));
}

#[test]
fn test_unsaved_new_records_never_share_a_group() {
    let table = seeded_table();
    let new_day = |key: &str| {
        Entity::from_json(json!({"key": key}), FixedLocales::single(locale("en")))
            .expect("valid row")
            .with_source(Arc::new(table.clone()))
    };
    let mut tuesday = new_day("tuesday");
    let mut wednesday = new_day("wednesday");

    let tuesday_name = tuesday.make_translatable("name", &table).unwrap();
    let tuesday_note = tuesday.make_translatable("note", &table).unwrap();
    let wednesday_name = wednesday.make_translatable("name", &table).unwrap();
    assert_eq!(
        [tuesday_name, tuesday_note, wednesday_name],
        [GroupId::Int(8), GroupId::Int(9), GroupId::Int(10)]
    );

    tuesday.set_attribute("name", "Tuesday").unwrap();
    wednesday.set_attribute("name", "Wednesday").unwrap();
    tuesday.save_translations().unwrap();
    wednesday.save_translations().unwrap();

    assert_eq!(
        table.value(&GroupId::Int(8), &locale("en")).unwrap(),
        Some("Tuesday".to_string())
    );
    assert_eq!(
        table.value(&GroupId::Int(10), &locale("en")).unwrap(),
        Some("Wednesday".to_string())
    );
}

#[test]
fn test_group_ids_exhausted() {
    let table = TranslationTable::new();
    table
        .insert(GroupId::Int(i64::MAX), locale("en"), "Last")
        .expect("insert");
    let mut day = monday("en", "en");

    assert_eq!(
        day.make_translatable("note", &table),
        Err(TranslationError::GroupIdsExhausted)
    );
}
