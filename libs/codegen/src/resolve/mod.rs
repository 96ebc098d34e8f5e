//! Relationship resolver
//!
//! Classifies every normalized relationship into a structural mapping
//! strategy, picks the owning side and allocates the field, column, join and
//! transfer names for both ends. The result is the immutable
//! [`ResolvedModel`] that every emitter reads.
//!
//! Field names are allocated per entity, in relationship order, against the
//! entity's attribute names and the fields allocated before them. Each
//! relationship allocates its owner field first, so `mappedBy` on the inverse
//! side is always the owner's final (possibly suffixed) name.

use crate::ir::{
    ArtifactNames, FieldCardinality, FieldRole, JoinSpec, NormalizedModel, RelationField,
    Relationship, RelationshipKind, ResolvedEntity, ResolvedModel, ResolvedRelationship,
    StructuralCategory,
};
use crate::naming::{self, NaivePluralizer, Pluralizer};
use std::collections::{HashMap, HashSet};

/// Field name used for the single-valued end of a self-referencing hierarchy
pub const PARENT_FIELD: &str = "parent";
/// Field name used for the collection end of a self-referencing hierarchy
pub const CHILDREN_FIELD: &str = "children";
const CHILD_TRANSFER_BASE: &str = "child";

/// Ownership policy for symmetric cardinalities (one-to-one, many-to-many).
///
/// Returns `(owner, inverse)`: the entity whose name is byte-wise smaller owns
/// the relationship; the source wins a tie. Both sides of every generated
/// artifact depend on this exact ordering.
pub fn lexicographic_owner<'a>(source: &'a str, target: &'a str) -> (&'a str, &'a str) {
    if target < source {
        (target, source)
    } else {
        (source, target)
    }
}

/// Resolve with the default (naive) pluralizer.
pub fn resolve(model: &NormalizedModel) -> ResolvedModel {
    Resolver::<NaivePluralizer>::default().resolve(model)
}

#[derive(Debug, Clone, Default)]
pub struct Resolver<P: Pluralizer = NaivePluralizer> {
    pluralizer: P,
}

impl<P: Pluralizer> Resolver<P> {
    pub fn with_pluralizer(pluralizer: P) -> Self {
        Self { pluralizer }
    }

    pub fn resolve(&self, model: &NormalizedModel) -> ResolvedModel {
        let mut scopes: HashMap<String, Scope> = model
            .entities
            .iter()
            .map(|e| {
                let attributes: HashSet<String> =
                    e.attributes.iter().map(|a| a.name.clone()).collect();
                (
                    e.name.clone(),
                    Scope {
                        used: attributes.clone(),
                        transfer_used: attributes,
                        fields: Vec::new(),
                    },
                )
            })
            .collect();

        let mut relationships = Vec::with_capacity(model.relationships.len());
        for (index, rel) in model.relationships.iter().enumerate() {
            let mut ctx = Allocation {
                scopes: &mut scopes,
                index,
                pluralizer: &self.pluralizer,
            };
            let resolved = ctx.resolve_one(rel);
            tracing::trace!(
                source = %rel.source,
                target = %rel.target,
                category = ?resolved.category,
                "Resolved relationship"
            );
            relationships.push(resolved);
        }

        let entities = model
            .entities
            .iter()
            .map(|e| {
                let fields = scopes
                    .remove(&e.name)
                    .map(|scope| scope.fields)
                    .unwrap_or_default();
                ResolvedEntity {
                    name: e.name.clone(),
                    variable_name: naming::to_field_case(&e.name),
                    table_name: naming::to_table_name(&e.name, &self.pluralizer),
                    resource_path: naming::to_resource_path(&e.name, &self.pluralizer),
                    artifacts: ArtifactNames::for_type(&e.name),
                    attributes: e.attributes.clone(),
                    fields,
                }
            })
            .collect();

        ResolvedModel {
            project: model.project.clone(),
            entities,
            relationships,
        }
    }
}

/// Per-entity naming namespaces and the fields allocated so far
#[derive(Debug, Default)]
struct Scope {
    used: HashSet<String>,
    transfer_used: HashSet<String>,
    fields: Vec<RelationField>,
}

/// Everything needed to place one relationship's fields
struct Allocation<'s, 'p, P: Pluralizer> {
    scopes: &'s mut HashMap<String, Scope>,
    index: usize,
    pluralizer: &'p P,
}

/// Description of one field before it is pushed into its entity scope
struct FieldPlan<'a> {
    entity: &'a str,
    counterpart: &'a str,
    name: String,
    transfer_base: String,
    cardinality: FieldCardinality,
    role: FieldRole,
    category: StructuralCategory,
    cascade_on_delete: bool,
    orphan_removal: bool,
}

impl<P: Pluralizer> Allocation<'_, '_, P> {
    fn resolve_one(&mut self, rel: &Relationship) -> ResolvedRelationship {
        let source_many = rel.multiplicity_source.is_many();
        let target_many = rel.multiplicity_target.is_many();

        if rel.is_self_reference() && source_many != target_many {
            return self.self_hierarchy(rel);
        }
        if !rel.kind.is_structural() {
            return ResolvedRelationship {
                kind: rel.kind,
                source: rel.source.clone(),
                target: rel.target.clone(),
                category: StructuralCategory::None,
                owning_side: None,
                inverse_side: None,
                owner_field_name: None,
                inverse_field_name: None,
                join_identifier: None,
                cascade_on_delete: false,
            };
        }

        match (source_many, target_many) {
            (false, false) => self.one_to_one(rel),
            (true, true) => self.many_to_many(rel),
            // the entity on the "many" end holds the foreign key
            (false, true) => self.one_to_many(rel, &rel.source, &rel.target),
            (true, false) => self.one_to_many(rel, &rel.target, &rel.source),
        }
    }

    fn self_hierarchy(&mut self, rel: &Relationship) -> ResolvedRelationship {
        let entity = rel.source.as_str();
        let cascade = rel.kind == RelationshipKind::Composition;

        let parent = self.allocate(entity, PARENT_FIELD);
        let column = foreign_key_column(&parent);
        let children = self.allocate(entity, CHILDREN_FIELD);

        self.push(FieldPlan {
            entity,
            counterpart: entity,
            name: parent.clone(),
            transfer_base: format!("{parent}Id"),
            cardinality: FieldCardinality::Single,
            role: FieldRole::Owner {
                join: JoinSpec::ForeignKey {
                    column: column.clone(),
                    unique: false,
                },
            },
            category: StructuralCategory::SelfReferencingHierarchy,
            cascade_on_delete: false,
            orphan_removal: false,
        });
        self.push(FieldPlan {
            entity,
            counterpart: entity,
            name: children.clone(),
            transfer_base: format!("{CHILD_TRANSFER_BASE}Ids"),
            cardinality: FieldCardinality::Collection,
            role: FieldRole::Inverse {
                mapped_by: parent.clone(),
            },
            category: StructuralCategory::SelfReferencingHierarchy,
            cascade_on_delete: cascade,
            orphan_removal: cascade,
        });

        ResolvedRelationship {
            kind: rel.kind,
            source: rel.source.clone(),
            target: rel.target.clone(),
            category: StructuralCategory::SelfReferencingHierarchy,
            owning_side: Some(entity.to_string()),
            inverse_side: Some(entity.to_string()),
            owner_field_name: Some(parent),
            inverse_field_name: Some(children),
            join_identifier: Some(column),
            cascade_on_delete: cascade,
        }
    }

    fn one_to_one(&mut self, rel: &Relationship) -> ResolvedRelationship {
        let (owner, inverse) = lexicographic_owner(&rel.source, &rel.target);
        let composition = rel.kind == RelationshipKind::Composition;

        let owner_field = self.allocate(owner, &naming::to_field_case(inverse));
        let column = foreign_key_column(&owner_field);
        let inverse_field = self.allocate(inverse, &naming::to_field_case(owner));

        // composition cascades from the whole (source) end
        let (owner_cascade, inverse_cascade) = match (composition, owner == rel.source) {
            (false, _) => (false, false),
            (true, true) => (true, false),
            (true, false) => (false, true),
        };

        self.push(FieldPlan {
            entity: owner,
            counterpart: inverse,
            name: owner_field.clone(),
            transfer_base: format!("{owner_field}Id"),
            cardinality: FieldCardinality::Single,
            role: FieldRole::Owner {
                join: JoinSpec::ForeignKey {
                    column: column.clone(),
                    unique: true,
                },
            },
            category: StructuralCategory::OneToOne,
            cascade_on_delete: owner_cascade,
            orphan_removal: owner_cascade,
        });
        self.push(FieldPlan {
            entity: inverse,
            counterpart: owner,
            name: inverse_field.clone(),
            transfer_base: format!("{inverse_field}Id"),
            cardinality: FieldCardinality::Single,
            role: FieldRole::Inverse {
                mapped_by: owner_field.clone(),
            },
            category: StructuralCategory::OneToOne,
            cascade_on_delete: inverse_cascade,
            orphan_removal: inverse_cascade,
        });

        ResolvedRelationship {
            kind: rel.kind,
            source: rel.source.clone(),
            target: rel.target.clone(),
            category: StructuralCategory::OneToOne,
            owning_side: Some(owner.to_string()),
            inverse_side: Some(inverse.to_string()),
            owner_field_name: Some(owner_field),
            inverse_field_name: Some(inverse_field),
            join_identifier: Some(column),
            cascade_on_delete: composition,
        }
    }

    /// `one` holds the collection, `many` owns the foreign key.
    fn one_to_many(&mut self, rel: &Relationship, one: &str, many: &str) -> ResolvedRelationship {
        let cascade = rel.kind == RelationshipKind::Composition;

        let owner_field = self.allocate(many, &naming::to_field_case(one));
        let column = foreign_key_column(&owner_field);
        let many_base = naming::to_field_case(many);
        let collection_base = self.pluralizer.pluralize(&many_base);
        let collection_field = self.allocate(one, &collection_base);

        self.push(FieldPlan {
            entity: many,
            counterpart: one,
            name: owner_field.clone(),
            transfer_base: format!("{owner_field}Id"),
            cardinality: FieldCardinality::Single,
            role: FieldRole::Owner {
                join: JoinSpec::ForeignKey {
                    column: column.clone(),
                    unique: false,
                },
            },
            category: StructuralCategory::OneToMany,
            cascade_on_delete: false,
            orphan_removal: false,
        });
        self.push(FieldPlan {
            entity: one,
            counterpart: many,
            name: collection_field.clone(),
            transfer_base: format!("{many_base}Ids"),
            cardinality: FieldCardinality::Collection,
            role: FieldRole::Inverse {
                mapped_by: owner_field.clone(),
            },
            category: StructuralCategory::OneToMany,
            cascade_on_delete: cascade,
            orphan_removal: cascade,
        });

        ResolvedRelationship {
            kind: rel.kind,
            source: rel.source.clone(),
            target: rel.target.clone(),
            category: StructuralCategory::OneToMany,
            owning_side: Some(many.to_string()),
            inverse_side: Some(one.to_string()),
            owner_field_name: Some(owner_field),
            inverse_field_name: Some(collection_field),
            join_identifier: Some(column),
            cascade_on_delete: cascade,
        }
    }

    fn many_to_many(&mut self, rel: &Relationship) -> ResolvedRelationship {
        let (owner, inverse) = lexicographic_owner(&rel.source, &rel.target);
        let cascade = rel.kind == RelationshipKind::Composition;

        let inverse_base = naming::to_field_case(inverse);
        let owner_base = naming::to_field_case(owner);
        let owner_plural = self.pluralizer.pluralize(&inverse_base);
        let inverse_plural = self.pluralizer.pluralize(&owner_base);
        let owner_field = self.allocate(owner, &owner_plural);
        let inverse_field = self.allocate(inverse, &inverse_plural);

        let table = format!(
            "{}_{}",
            owner.to_ascii_lowercase(),
            inverse.to_ascii_lowercase()
        );
        let join_column = foreign_key_column(&owner_base);
        let mut inverse_join_column = foreign_key_column(&inverse_base);
        if inverse_join_column == join_column {
            inverse_join_column = format!("related_{inverse_join_column}");
        }

        self.push(FieldPlan {
            entity: owner,
            counterpart: inverse,
            name: owner_field.clone(),
            transfer_base: format!("{inverse_base}Ids"),
            cardinality: FieldCardinality::Collection,
            role: FieldRole::Owner {
                join: JoinSpec::JoinTable {
                    table: table.clone(),
                    join_column,
                    inverse_join_column,
                },
            },
            category: StructuralCategory::ManyToMany,
            // join-table collections cannot remove orphans
            cascade_on_delete: cascade,
            orphan_removal: false,
        });
        self.push(FieldPlan {
            entity: inverse,
            counterpart: owner,
            name: inverse_field.clone(),
            transfer_base: format!("{owner_base}Ids"),
            cardinality: FieldCardinality::Collection,
            role: FieldRole::Inverse {
                mapped_by: owner_field.clone(),
            },
            category: StructuralCategory::ManyToMany,
            cascade_on_delete: false,
            orphan_removal: false,
        });

        ResolvedRelationship {
            kind: rel.kind,
            source: rel.source.clone(),
            target: rel.target.clone(),
            category: StructuralCategory::ManyToMany,
            owning_side: Some(owner.to_string()),
            inverse_side: Some(inverse.to_string()),
            owner_field_name: Some(owner_field),
            inverse_field_name: Some(inverse_field),
            join_identifier: Some(table),
            cascade_on_delete: cascade,
        }
    }

    /// Reserve a collision-free field name on `entity`.
    fn allocate(&mut self, entity: &str, base: &str) -> String {
        let scope = self.scope(entity);
        let name = naming::unique_field_name(base, &scope.used);
        scope.used.insert(name.clone());
        name
    }

    fn push(&mut self, plan: FieldPlan<'_>) {
        let index = self.index;
        let scope = self.scope(plan.entity);
        let transfer_name = naming::unique_field_name(&plan.transfer_base, &scope.transfer_used);
        scope.transfer_used.insert(transfer_name.clone());
        scope.fields.push(RelationField {
            name: plan.name,
            counterpart: plan.counterpart.to_string(),
            cardinality: plan.cardinality,
            role: plan.role,
            category: plan.category,
            cascade_on_delete: plan.cascade_on_delete,
            orphan_removal: plan.orphan_removal,
            transfer_name,
            relationship: index,
        });
    }

    fn scope(&mut self, entity: &str) -> &mut Scope {
        self.scopes.entry(entity.to_string()).or_default()
    }
}

fn foreign_key_column(field: &str) -> String {
    format!("{}_id", naming::to_column_name(field))
}
