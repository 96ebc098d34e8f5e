//! Flat transfer types
//!
//! Scalars are copied as-is; relationship fields are flattened to the
//! counterpart's key (`doctorId`) or a set of keys (`patientIds`).

use super::types::{accessors, counterpart_id_type, file_header, java_type};
use super::{Emit, Layer};
use crate::ir::{RelationField, ResolvedEntity};
use std::collections::BTreeSet;

pub(super) fn render(emit: &Emit<'_>, entity: &ResolvedEntity) -> String {
    let mut imports = BTreeSet::new();
    if entity.has_collections() {
        imports.insert("java.util.HashSet".to_string());
        imports.insert("java.util.Set".to_string());
    }

    let mut code = file_header(&emit.package(Layer::Dto), &imports);
    if emit.docs() {
        code.push_str(&format!(
            "/**\n * Transfer shape of {}. Related records are referenced by key.\n */\n",
            entity.name
        ));
    }
    code.push_str(&format!("public class {} {{\n\n", entity.artifacts.dto));

    for attribute in &entity.attributes {
        code.push_str(&format!(
            "    private {} {};\n",
            java_type(attribute.semantic_type),
            attribute.name
        ));
    }
    for field in &entity.fields {
        let ty = reference_type(emit, field);
        if field.is_collection() {
            code.push_str(&format!(
                "    private {ty} {} = new HashSet<>();\n",
                field.transfer_name
            ));
        } else {
            code.push_str(&format!("    private {ty} {};\n", field.transfer_name));
        }
    }

    for attribute in &entity.attributes {
        code.push('\n');
        code.push_str(&accessors(java_type(attribute.semantic_type), &attribute.name));
    }
    for field in &entity.fields {
        code.push('\n');
        code.push_str(&accessors(&reference_type(emit, field), &field.transfer_name));
    }

    code.push_str("}\n");
    code
}

/// `Long` or `Set<Long>`, keyed by the counterpart's primary-key type
fn reference_type(emit: &Emit<'_>, field: &RelationField) -> String {
    let id = counterpart_id_type(emit.model, &field.counterpart);
    if field.is_collection() {
        format!("Set<{id}>")
    } else {
        id.to_string()
    }
}
