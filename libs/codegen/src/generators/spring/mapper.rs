//! Conversions between persistence and transfer types
//!
//! Only owning-side references are written back to the entity; inverse
//! fields are populated by the persistence provider and are read-only on
//! the transfer shape.

use super::types::{counterpart_id_field, counterpart_id_type, file_header, getter, setter};
use super::{Emit, Layer};
use crate::ir::{RelationField, ResolvedEntity};
use std::collections::BTreeSet;

pub(super) fn render(emit: &Emit<'_>, entity: &ResolvedEntity) -> String {
    let artifacts = &entity.artifacts;
    let name = &entity.name;
    let dto = &artifacts.dto;

    let written: Vec<&RelationField> = entity.fields.iter().filter(|f| f.is_owner()).collect();
    let referenced: BTreeSet<&str> = written.iter().map(|f| f.counterpart.as_str()).collect();

    let mut imports = BTreeSet::from([
        emit.qualified(Layer::Domain, name),
        emit.qualified(Layer::Dto, dto),
        "org.springframework.stereotype.Component".to_string(),
    ]);
    for field in &entity.fields {
        imports.insert(emit.qualified(Layer::Domain, &field.counterpart));
    }
    if entity.has_collections() {
        imports.insert("java.util.stream.Collectors".to_string());
    }
    if written.iter().any(|f| f.is_collection()) {
        imports.insert("java.util.HashSet".to_string());
    }

    let mut code = file_header(&emit.package(Layer::Mapper), &imports);
    if emit.docs() {
        code.push_str(&format!(
            "/**\n * Maps {{@link {name}}} to and from {{@link {dto}}}.\n */\n"
        ));
    }
    code.push_str("@Component\n");
    code.push_str(&format!("public class {} {{\n\n", artifacts.mapper));

    // toDto
    code.push_str(&format!(
        "    public {dto} toDto({name} entity) {{\n        if (entity == null) {{\n            return null;\n        }}\n        {dto} dto = new {dto}();\n"
    ));
    for attribute in &entity.attributes {
        code.push_str(&format!(
            "        dto.{}(entity.{}());\n",
            setter(&attribute.name),
            getter(&attribute.name)
        ));
    }
    for field in &entity.fields {
        let key_getter = getter(counterpart_id_field(emit.model, &field.counterpart));
        let field_getter = getter(&field.name);
        let transfer_setter = setter(&field.transfer_name);
        if field.is_collection() {
            code.push_str(&format!(
                "        dto.{transfer_setter}(entity.{field_getter}().stream().map({}::{key_getter}).collect(Collectors.toSet()));\n",
                field.counterpart
            ));
        } else {
            code.push_str(&format!(
                "        dto.{transfer_setter}(entity.{field_getter}() == null ? null : entity.{field_getter}().{key_getter}());\n"
            ));
        }
    }
    code.push_str("        return dto;\n    }\n\n");

    // toEntity
    code.push_str(&format!(
        "    public {name} toEntity({dto} dto) {{\n        if (dto == null) {{\n            return null;\n        }}\n        {name} entity = new {name}();\n"
    ));
    if let Some(pk) = entity.primary_key() {
        if pk.generation.is_none() {
            code.push_str(&format!(
                "        entity.{}(dto.{}());\n",
                setter(&pk.name),
                getter(&pk.name)
            ));
        }
    }
    code.push_str("        updateEntity(dto, entity);\n        return entity;\n    }\n\n");

    // updateEntity
    if emit.docs() {
        code.push_str(
            "    /** Copies values and owning-side references; the key and inverse fields are left untouched. */\n",
        );
    }
    code.push_str(&format!(
        "    public void updateEntity({dto} dto, {name} entity) {{\n"
    ));
    for attribute in entity.attributes.iter().filter(|a| !a.is_primary_key) {
        code.push_str(&format!(
            "        entity.{}(dto.{}());\n",
            setter(&attribute.name),
            getter(&attribute.name)
        ));
    }
    for field in &written {
        let transfer_getter = getter(&field.transfer_name);
        let field_setter = setter(&field.name);
        let stub = format!("reference{}", field.counterpart);
        if field.is_collection() {
            code.push_str(&format!(
                "        entity.{field_setter}(dto.{transfer_getter}() == null ? new HashSet<>() : dto.{transfer_getter}().stream().map({}::{stub}).collect(Collectors.toSet()));\n",
                artifacts.mapper
            ));
        } else {
            code.push_str(&format!(
                "        entity.{field_setter}({stub}(dto.{transfer_getter}()));\n"
            ));
        }
    }
    code.push_str("    }\n");

    for counterpart in referenced {
        let key_type = counterpart_id_type(emit.model, counterpart);
        let key_setter = setter(counterpart_id_field(emit.model, counterpart));
        code.push_str(&format!(
            "\n    private static {counterpart} reference{counterpart}({key_type} id) {{\n        if (id == null) {{\n            return null;\n        }}\n        {counterpart} reference = new {counterpart}();\n        reference.{key_setter}(id);\n        return reference;\n    }}\n"
        ));
    }

    code.push_str("}\n");
    code
}
