//! Invariants that must hold for any input

use healthgen_codegen::ir::{FieldRole, GenerationStrategy, JoinSpec, SemanticType, StructuralCategory};
use healthgen_codegen::{CodeGenerator, Limits};
use serde_json::{json, Value};

fn resolve(spec: Value) -> CodeGenerator {
    CodeGenerator::from_spec(&spec, &Limits::default()).unwrap()
}

fn pair(kind: &str, source: &str, target: &str, mult_source: &str, mult_target: &str) -> Value {
    json!({
        "entities": [
            {"name": source, "attributes": [{"name": "label"}]},
            {"name": target, "attributes": [{"name": "label"}]}
        ],
        "relations": [
            {"type": kind, "source": source, "target": target, "multSource": mult_source, "multTarget": mult_target}
        ]
    })
}

#[test]
fn test_synthetic_identity_key_prepended() {
    let codegen = resolve(json!({
        "entities": [{"name": "Ward", "attributes": [{"name": "floor", "type": "INT"}]}]
    }));
    let ward = codegen.model().entity("Ward").unwrap();

    let first = &ward.attributes[0];
    assert_eq!(first.name, "id");
    assert!(first.is_primary_key);
    assert_eq!(first.semantic_type, SemanticType::Long);
    assert_eq!(first.generation, Some(GenerationStrategy::Identity));
    assert_eq!(ward.attributes.iter().filter(|a| a.is_primary_key).count(), 1);
}

#[test]
fn test_many_to_many_owner_is_lexicographically_smaller() {
    // declared in both directions; ownership must not depend on it
    for (source, target) in [("Student", "Course"), ("Course", "Student")] {
        let codegen = resolve(pair("association", source, target, "*", "1..*"));
        let model = codegen.model();
        let rel = &model.relationships[0];

        assert_eq!(rel.category, StructuralCategory::ManyToMany);
        assert_eq!(rel.owning_side.as_deref(), Some("Course"));
        assert_eq!(rel.inverse_side.as_deref(), Some("Student"));
        assert_eq!(rel.join_identifier.as_deref(), Some("course_student"));

        let owner = model.entity("Course").unwrap().field("students").unwrap();
        assert!(matches!(
            &owner.role,
            FieldRole::Owner {
                join: JoinSpec::JoinTable { .. }
            }
        ));
        let inverse = model.entity("Student").unwrap().field("courses").unwrap();
        assert_eq!(
            inverse.role,
            FieldRole::Inverse {
                mapped_by: "students".to_string()
            }
        );
    }
}

#[test]
fn test_composition_cascades_aggregation_does_not() {
    let composed = resolve(pair("composition", "Order", "Line", "1", "*"));
    let lines = composed.model().entity("Order").unwrap().field("lines").unwrap();
    assert!(lines.cascade_on_delete);
    assert!(lines.orphan_removal);

    let aggregated = resolve(pair("aggregation", "Order", "Line", "1", "*"));
    let lines = aggregated
        .model()
        .entity("Order")
        .unwrap()
        .field("lines")
        .unwrap();
    assert!(!lines.cascade_on_delete);
    assert!(!lines.orphan_removal);
    assert!(!aggregated.model().relationships[0].cascade_on_delete);
}

#[test]
fn test_blank_multiplicity_defaults_by_kind() {
    for kind in ["aggregation", "composition"] {
        let codegen = resolve(pair(kind, "Ward", "Bed", "", ""));
        assert_eq!(
            codegen.model().relationships[0].category,
            StructuralCategory::OneToMany,
            "{kind} should default to one-to-many"
        );
        assert!(codegen.model().entity("Ward").unwrap().field("beds").is_some());
    }

    let codegen = resolve(pair("association", "Ward", "Bed", "", ""));
    assert_eq!(
        codegen.model().relationships[0].category,
        StructuralCategory::OneToOne
    );
}

#[test]
fn test_mapped_by_matches_owner_field_everywhere() {
    let codegen = resolve(json!({
        "entities": [
            {"name": "Doctor", "attributes": [{"name": "name"}, {"name": "patient"}]},
            {"name": "Patient", "attributes": [{"name": "doctor"}]},
            {"name": "Clinic"},
            {"name": "Employee"}
        ],
        "relations": [
            {"type": "association", "source": "Doctor", "target": "Patient", "multSource": "1", "multTarget": "*"},
            {"type": "association", "source": "Patient", "target": "Doctor", "multSource": "1", "multTarget": "1"},
            {"type": "association", "source": "Doctor", "target": "Clinic", "multSource": "*", "multTarget": "*"},
            {"type": "composition", "source": "Employee", "target": "Employee", "multSource": "1", "multTarget": "*"},
            {"type": "association", "source": "Employee", "target": "Employee", "multSource": "*", "multTarget": "*"}
        ]
    }));
    let model = codegen.model();

    let mut inverse_count = 0;
    for entity in &model.entities {
        for field in &entity.fields {
            if let FieldRole::Inverse { mapped_by } = &field.role {
                inverse_count += 1;
                let counterpart = model.entity(&field.counterpart).unwrap();
                let owner = counterpart
                    .field(mapped_by)
                    .unwrap_or_else(|| panic!("{}.{mapped_by} missing", counterpart.name));
                assert!(owner.is_owner());
                assert_eq!(owner.relationship, field.relationship);

                let rel = &model.relationships[field.relationship];
                assert_eq!(rel.owner_field_name.as_deref(), Some(mapped_by.as_str()));
                assert_eq!(rel.inverse_field_name.as_deref(), Some(field.name.as_str()));
            }
        }
    }
    assert_eq!(inverse_count, 5);

    // field names never collide with attributes or each other
    for entity in &model.entities {
        let mut names: Vec<&str> = entity.attributes.iter().map(|a| a.name.as_str()).collect();
        names.extend(entity.fields.iter().map(|f| f.name.as_str()));
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "duplicate member on {}", entity.name);

        let mut transfer: Vec<&str> = entity.attributes.iter().map(|a| a.name.as_str()).collect();
        transfer.extend(entity.fields.iter().map(|f| f.transfer_name.as_str()));
        let total = transfer.len();
        transfer.sort_unstable();
        transfer.dedup();
        assert_eq!(transfer.len(), total, "duplicate transfer name on {}", entity.name);
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let spec = json!({
        "name": "Clinic Manager",
        "packageBase": "org.clinic",
        "entities": [
            {"name": "doctor", "attributes": [{"name": "full name"}]},
            {"name": "patient", "attributes": [{"name": "birth date", "type": "date"}]},
            {"name": "room"}
        ],
        "relations": [
            {"type": "uml.Association", "source": "doctor", "target": "patient", "multSource": "many", "multTarget": "many"},
            {"type": "aggregation", "source": "room", "target": "patient"}
        ]
    });

    let first = resolve(spec.clone());
    let second = resolve(spec);
    assert_eq!(first.model(), second.model());
    assert_eq!(
        serde_json::to_string(first.model()).unwrap(),
        serde_json::to_string(second.model()).unwrap()
    );
    assert_eq!(first.model().project.artifact_id, "clinic-manager");
    assert_eq!(first.model().project.package_namespace, "org.clinic");
}
