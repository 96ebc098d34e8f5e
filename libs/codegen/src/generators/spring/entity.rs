//! JPA persistence types

use super::types::{accessors, file_header, generation_type, java_type};
use super::{Emit, Layer};
use crate::ir::{FieldRole, JoinSpec, RelationField, ResolvedEntity, StructuralCategory};
use std::collections::BTreeSet;

pub(super) fn render(emit: &Emit<'_>, entity: &ResolvedEntity) -> String {
    let mut imports = BTreeSet::from(["jakarta.persistence.*".to_string()]);
    if entity.has_collections() {
        imports.insert("java.util.HashSet".to_string());
        imports.insert("java.util.Set".to_string());
    }

    let mut code = file_header(&emit.package(Layer::Domain), &imports);

    if emit.docs() {
        code.push_str(&format!(
            "/**\n * Persistent {} stored in table {{@code {}}}.\n */\n",
            entity.name, entity.table_name
        ));
    }
    code.push_str("@Entity\n");
    code.push_str(&format!("@Table(name = \"{}\")\n", entity.table_name));
    code.push_str(&format!("public class {} {{\n", entity.name));

    for attribute in &entity.attributes {
        code.push('\n');
        if attribute.is_primary_key {
            code.push_str("    @Id\n");
            if let Some(strategy) = attribute.generation {
                code.push_str(&format!(
                    "    @GeneratedValue(strategy = {})\n",
                    generation_type(strategy)
                ));
            }
        }
        code.push_str(&format!(
            "    private {} {};\n",
            java_type(attribute.semantic_type),
            attribute.name
        ));
    }

    for field in &entity.fields {
        code.push('\n');
        if emit.docs() {
            code.push_str(&field_doc(field));
        }
        for annotation in relation_annotations(field) {
            code.push_str(&format!("    {annotation}\n"));
        }
        if field.is_collection() {
            code.push_str(&format!(
                "    private Set<{}> {} = new HashSet<>();\n",
                field.counterpart, field.name
            ));
        } else {
            code.push_str(&format!(
                "    private {} {};\n",
                field.counterpart, field.name
            ));
        }
    }

    for attribute in &entity.attributes {
        code.push('\n');
        code.push_str(&accessors(java_type(attribute.semantic_type), &attribute.name));
    }
    for field in &entity.fields {
        code.push('\n');
        code.push_str(&accessors(&field_type(field), &field.name));
    }

    code.push_str("}\n");
    code
}

fn field_type(field: &RelationField) -> String {
    if field.is_collection() {
        format!("Set<{}>", field.counterpart)
    } else {
        field.counterpart.clone()
    }
}

fn field_doc(field: &RelationField) -> String {
    let side = match &field.role {
        FieldRole::Owner { join } => format!("Owning side, stored in {{@code {}}}", join.identifier()),
        FieldRole::Inverse { mapped_by } => {
            format!("Inverse side, mapped by {{@code {}.{}}}", field.counterpart, mapped_by)
        }
    };
    format!("    /** {side}. */\n")
}

/// Mapping annotations for a relationship-backed field
pub(super) fn relation_annotations(field: &RelationField) -> Vec<String> {
    let name = match field.category {
        StructuralCategory::OneToOne => "OneToOne",
        StructuralCategory::ManyToMany => "ManyToMany",
        _ if field.is_collection() => "OneToMany",
        _ => "ManyToOne",
    };

    let mut attributes = Vec::new();
    if let FieldRole::Inverse { mapped_by } = &field.role {
        attributes.push(format!("mappedBy = \"{mapped_by}\""));
    }
    if field.cascade_on_delete {
        attributes.push("cascade = CascadeType.REMOVE".to_string());
    }
    if field.orphan_removal {
        attributes.push("orphanRemoval = true".to_string());
    }

    let mut annotations = vec![if attributes.is_empty() {
        format!("@{name}")
    } else {
        format!("@{name}({})", attributes.join(", "))
    }];

    if let FieldRole::Owner { join } = &field.role {
        annotations.push(match join {
            JoinSpec::ForeignKey { column, unique: true } => {
                format!("@JoinColumn(name = \"{column}\", unique = true)")
            }
            JoinSpec::ForeignKey { column, .. } => format!("@JoinColumn(name = \"{column}\")"),
            JoinSpec::JoinTable {
                table,
                join_column,
                inverse_join_column,
            } => format!(
                "@JoinTable(name = \"{table}\", joinColumns = @JoinColumn(name = \"{join_column}\"), inverseJoinColumns = @JoinColumn(name = \"{inverse_join_column}\"))"
            ),
        });
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FieldCardinality;

    fn field(category: StructuralCategory, cardinality: FieldCardinality, role: FieldRole) -> RelationField {
        RelationField {
            name: "doctor".to_string(),
            counterpart: "Doctor".to_string(),
            cardinality,
            role,
            category,
            cascade_on_delete: false,
            orphan_removal: false,
            transfer_name: "doctorId".to_string(),
            relationship: 0,
        }
    }

    #[test]
    fn many_to_one_owner_gets_join_column() {
        let owner = field(
            StructuralCategory::OneToMany,
            FieldCardinality::Single,
            FieldRole::Owner {
                join: JoinSpec::ForeignKey {
                    column: "doctor_id".to_string(),
                    unique: false,
                },
            },
        );
        assert_eq!(
            relation_annotations(&owner),
            vec!["@ManyToOne", "@JoinColumn(name = \"doctor_id\")"]
        );
    }

    #[test]
    fn inverse_collection_carries_mapped_by_and_cascade() {
        let mut inverse = field(
            StructuralCategory::OneToMany,
            FieldCardinality::Collection,
            FieldRole::Inverse {
                mapped_by: "visit".to_string(),
            },
        );
        inverse.cascade_on_delete = true;
        inverse.orphan_removal = true;
        assert_eq!(
            relation_annotations(&inverse),
            vec!["@OneToMany(mappedBy = \"visit\", cascade = CascadeType.REMOVE, orphanRemoval = true)"]
        );
    }

    #[test]
    fn one_to_one_owner_is_unique() {
        let owner = field(
            StructuralCategory::OneToOne,
            FieldCardinality::Single,
            FieldRole::Owner {
                join: JoinSpec::ForeignKey {
                    column: "passport_id".to_string(),
                    unique: true,
                },
            },
        );
        assert_eq!(
            relation_annotations(&owner)[1],
            "@JoinColumn(name = \"passport_id\", unique = true)"
        );
    }
}
