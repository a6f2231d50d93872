use super::*;
use crate::metadata::OptionValue;
use proptest::prelude::*;
use std::collections::BTreeMap;

const CLASS: &str = "App\\SimpleClass";

fn metadata() -> ClassMetadata {
    ClassMetadata::new(CLASS)
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn accessor_returns_the_borrowed_descriptor() {
    let mut meta = metadata();
    let addr: *const ClassMetadata = &meta;

    let builder = ClassMetadataBuilder::new(&mut meta);

    assert!(std::ptr::eq(builder.class_metadata(), addr));
}

#[test]
fn mutations_outlive_the_builder() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta).table("simple");

    assert_eq!(meta.table_name(), Some("simple"));
}

#[test]
fn mapped_superclass_defaults_to_true() {
    let mut meta = metadata();
    let mut builder = ClassMetadataBuilder::new(&mut meta);

    builder.mapped_superclass();
    assert!(builder.class_metadata().is_mapped_superclass);

    builder.set_mapped_superclass(false);
    assert!(!builder.class_metadata().is_mapped_superclass);
}

#[test]
fn table_name_last_write_wins() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .table("first")
        .table("second")
        .table("test_table");

    assert_eq!(meta.table_name(), Some("test_table"));
}

#[test]
fn table_indexes_accumulate_by_name() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .table_index("table_index_one", ["id", "name"])
        .table_index("table_index_two", ["name"]);

    let expected = BTreeMap::from([
        ("table_index_one".to_string(), columns(&["id", "name"])),
        ("table_index_two".to_string(), columns(&["name"])),
    ]);
    assert_eq!(meta.table.indexes, expected);
    assert!(meta.table.unique_constraints.is_empty());
}

#[test]
fn unique_constraints_overwrite_same_name() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .table_unique_constraint("table_index_one", ["id"])
        .table_unique_constraint("table_index_one", vec!["id".to_string(), "name".to_string()]);

    let expected = BTreeMap::from([("table_index_one".to_string(), columns(&["id", "name"]))]);
    assert_eq!(meta.table.unique_constraints, expected);
    assert!(meta.table.indexes.is_empty());
}

fn joined(b: &mut ClassMetadataBuilder<'_>) {
    b.joined_table_inheritance();
}

fn single(b: &mut ClassMetadataBuilder<'_>) {
    b.single_table_inheritance();
}

fn per_class(b: &mut ClassMetadataBuilder<'_>) {
    b.table_per_class_inheritance();
}

fn none(b: &mut ClassMetadataBuilder<'_>) {
    b.no_inheritance();
}

#[test]
fn each_inheritance_setter_selects_its_strategy() {
    let cases = [
        (joined as fn(&mut ClassMetadataBuilder<'_>), InheritanceType::Joined),
        (single, InheritanceType::SingleTable),
        (per_class, InheritanceType::TablePerClass),
        (none, InheritanceType::None),
    ];

    for (set, expected) in cases {
        let mut meta = metadata();
        if expected == InheritanceType::None {
            meta.inheritance_type = InheritanceType::Joined;
        }

        set(&mut ClassMetadataBuilder::new(&mut meta));

        assert_eq!(meta.inheritance_type, expected, "setter for {expected}");
    }
}

#[test]
fn second_inheritance_setter_overwrites_first() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .single_table_inheritance()
        .joined_table_inheritance();

    assert!(meta.is_inheritance_type_joined());
    assert!(!meta.is_inheritance_type_single_table());
}

#[test]
fn discriminator_column_is_replaced_wholesale() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .discriminator_column("type", "string", 10)
        .unwrap()
        .discriminator_column("name", "varchar", 25)
        .unwrap();

    assert_eq!(
        meta.discriminator_column,
        Some(DiscriminatorColumn {
            name: "name".to_string(),
            field_name: "name".to_string(),
            ty: "varchar".to_string(),
            length: 25,
        })
    );
}

#[test]
fn discriminator_column_error_passes_through() {
    let mut meta = metadata();

    let err = ClassMetadataBuilder::new(&mut meta)
        .discriminator_column("kind", "boolean", 1)
        .err();

    assert!(matches!(
        err,
        Some(MappingError::InvalidDiscriminatorColumnType { .. })
    ));
    assert!(meta.discriminator_column.is_none());
}

#[test]
fn discriminator_map_append_only_by_default() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .discriminator_map("simple", CLASS)
        .discriminator_map("complex", "App\\ComplexClass");

    assert_eq!(
        meta.discriminator_map,
        BTreeMap::from([
            ("simple".to_string(), CLASS.to_string()),
            ("complex".to_string(), "App\\ComplexClass".to_string()),
        ])
    );
    assert!(meta.discriminator_value.is_none());
    assert!(meta.sub_classes.is_empty());
}

#[test]
fn discriminator_map_resolve_assigns_value_and_sub_classes() {
    let mut meta = metadata();
    let options = BuilderOptions::new().discriminator_map(DiscriminatorMapMode::Resolve);

    ClassMetadataBuilder::with_options(&mut meta, options)
        .discriminator_map("simple", CLASS)
        .discriminator_map("complex", "App\\ComplexClass");

    assert_eq!(meta.discriminator_map.len(), 2);
    assert_eq!(meta.discriminator_value.as_deref(), Some("simple"));
    assert_eq!(meta.sub_classes, ["App\\ComplexClass"]);
}

#[test]
fn discriminator_map_resolve_strips_leading_separator() {
    let mut meta = metadata();
    let options = BuilderOptions::new().discriminator_map(DiscriminatorMapMode::Resolve);

    ClassMetadataBuilder::with_options(&mut meta, options)
        .discriminator_map("simple", "\\App\\SimpleClass")
        .discriminator_map("complex", "\\App\\ComplexClass");

    assert_eq!(meta.discriminator_value.as_deref(), Some("simple"));
    assert_eq!(meta.sub_classes, ["App\\ComplexClass"]);
    assert_eq!(
        meta.discriminator_map,
        BTreeMap::from([
            ("simple".to_string(), CLASS.to_string()),
            ("complex".to_string(), "App\\ComplexClass".to_string()),
        ])
    );
}

#[test]
fn discriminator_map_append_only_stores_stripped_class() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta).discriminator_map("simple", "\\App\\SimpleClass");

    assert_eq!(meta.discriminator_map["simple"], CLASS);
    assert!(meta.discriminator_value.is_none());
}

#[test]
fn change_tracking_setters_last_write_wins() {
    let mut meta = metadata();
    let mut builder = ClassMetadataBuilder::new(&mut meta);

    builder.change_tracking_policy_notify();
    assert!(builder.class_metadata().is_change_tracking_notify());

    builder.change_tracking_policy_deferred_explicit();
    assert!(builder.class_metadata().is_change_tracking_deferred_explicit());

    builder.change_tracking_policy_deferred_implicit();
    assert!(builder.class_metadata().is_change_tracking_deferred_implicit());
}

#[test]
fn field_registers_mapping() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .field("name", "string", FieldOptions::new())
        .unwrap();

    let mapping = meta.field_mapping("name").unwrap();
    assert_eq!(mapping.ty, "string");
    assert_eq!(mapping.column_name, "name");
    assert!(!mapping.id);
}

#[test]
fn field_options_are_merged() {
    let mut meta = metadata();
    let options = FieldOptions::new()
        .column_name("user_name")
        .length(50)
        .nullable(true)
        .option("comment", "display name");

    ClassMetadataBuilder::new(&mut meta)
        .field("name", "string", options)
        .unwrap();

    let mapping = meta.field_mapping("name").unwrap();
    assert_eq!(mapping.field_name, "name");
    assert_eq!(mapping.column_name, "user_name");
    assert_eq!(mapping.length, Some(50));
    assert!(mapping.nullable);
    assert_eq!(
        mapping.options.get("comment"),
        Some(&OptionValue::Text("display name".to_string()))
    );
}

#[test]
fn field_last_write_per_name_wins() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .field("name", "string", FieldOptions::new())
        .unwrap()
        .field("name", "text", FieldOptions::new())
        .unwrap();

    assert_eq!(meta.field_mappings.len(), 1);
    assert_eq!(meta.field_mapping("name").unwrap().ty, "text");
}

#[test]
fn version_field_marks_descriptor_versioned() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .version_field("version", "integer", FieldOptions::new())
        .unwrap();

    assert!(meta.is_versioned);
    assert_eq!(meta.version_field.as_deref(), Some("version"));

    let mapping = meta.field_mapping("version").unwrap();
    assert_eq!(mapping.ty, "integer");
    assert!(mapping.version);
}

#[test]
fn primary_field_builds_single_identifier() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .primary_field("id", "integer", FieldOptions::new())
        .unwrap();

    assert_eq!(meta.identifier, ["id"]);
    assert!(!meta.is_identifier_composite);
    assert!(meta.field_mapping("id").unwrap().id);
}

#[test]
fn two_primary_fields_build_composite_identifier() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .primary_field("tenant", "integer", FieldOptions::new())
        .unwrap()
        .primary_field("id", "integer", FieldOptions::new())
        .unwrap();

    assert_eq!(meta.identifier, ["tenant", "id"]);
    assert!(meta.is_identifier_composite);
}

#[test]
fn primary_field_options_override_id() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .primary_field("tenant", "integer", FieldOptions::new())
        .unwrap()
        .primary_field("id", "integer", FieldOptions::new().id(false))
        .unwrap();

    assert_eq!(meta.identifier, ["tenant"]);
    assert!(!meta.is_identifier_composite);
    assert!(!meta.field_mapping("id").unwrap().id);
}

#[test]
fn sequence_generator_is_replaced_wholesale() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .default_sequence_generator("old")
        .sequence_generator("seq", 1, 400);

    assert_eq!(
        meta.sequence_generator_definition,
        Some(SequenceGeneratorDefinition {
            sequence_name: "seq".to_string(),
            allocation_size: 1,
            initial_value: 400,
        })
    );
}

#[test]
fn default_sequence_generator_starts_at_one() {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta).default_sequence_generator("seq");

    let definition = meta.sequence_generator_definition.unwrap();
    assert_eq!(definition.allocation_size, 1);
    assert_eq!(definition.initial_value, 1);
}

#[test]
fn full_chain_composes_with_question_mark() -> Result<(), MappingError> {
    let mut meta = metadata();

    ClassMetadataBuilder::new(&mut meta)
        .table("simple")
        .single_table_inheritance()
        .discriminator_column("kind", "string", 32)?
        .discriminator_map("simple", CLASS)
        .primary_field("id", "integer", FieldOptions::new())?
        .field("name", "string", FieldOptions::new().length(25))?
        .version_field("version", "integer", FieldOptions::new())?
        .default_sequence_generator("simple_seq")
        .change_tracking_policy_notify();

    assert_eq!(meta.field_mappings.len(), 3);
    assert_eq!(meta.single_identifier_field_name(), Some("id"));
    assert!(meta.is_inheritance_type_single_table());

    Ok(())
}

proptest! {
    #[test]
    fn table_name_is_the_last_of_any_sequence(names in prop::collection::vec("[a-z_]{1,12}", 1..8)) {
        let mut meta = metadata();
        let mut builder = ClassMetadataBuilder::new(&mut meta);

        for name in &names {
            builder.table(name.as_str());
        }

        prop_assert_eq!(meta.table_name(), names.last().map(String::as_str));
    }

    #[test]
    fn indexes_keep_the_last_columns_per_name(
        entries in prop::collection::vec(("[a-c]", prop::collection::vec("[a-z]{1,6}", 1..4)), 1..12)
    ) {
        let mut meta = metadata();
        let mut builder = ClassMetadataBuilder::new(&mut meta);
        let mut expected = BTreeMap::new();

        for (name, cols) in &entries {
            builder.table_index(name.as_str(), cols.iter().cloned());
            expected.insert(name.clone(), cols.clone());
        }

        prop_assert_eq!(&meta.table.indexes, &expected);
    }
}
