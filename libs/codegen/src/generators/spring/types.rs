//! Java type mapping and shared source helpers

use crate::ir::{GenerationStrategy, ResolvedEntity, ResolvedModel, SemanticType};
use std::collections::BTreeSet;

/// Map a semantic type to its (boxed) Java type
pub fn java_type(semantic_type: SemanticType) -> &'static str {
    match semantic_type {
        SemanticType::Long => "Long",
        SemanticType::Int => "Integer",
        SemanticType::Boolean => "Boolean",
        SemanticType::Decimal => "java.math.BigDecimal",
        SemanticType::Date => "java.time.LocalDate",
        SemanticType::DateTime => "java.time.LocalDateTime",
        SemanticType::String => "String",
    }
}

pub fn generation_type(strategy: GenerationStrategy) -> &'static str {
    match strategy {
        GenerationStrategy::Identity => "GenerationType.IDENTITY",
        GenerationStrategy::Sequence => "GenerationType.SEQUENCE",
        GenerationStrategy::Table => "GenerationType.TABLE",
        GenerationStrategy::Auto => "GenerationType.AUTO",
        GenerationStrategy::Uuid => "GenerationType.UUID",
    }
}

/// Java type of an entity's primary key (`Long` when absent)
pub fn id_type(entity: &ResolvedEntity) -> &'static str {
    entity
        .primary_key()
        .map(|pk| java_type(pk.semantic_type))
        .unwrap_or("Long")
}

/// Primary-key field name (`id` when absent)
pub fn id_field(entity: &ResolvedEntity) -> &str {
    entity
        .primary_key()
        .map(|pk| pk.name.as_str())
        .unwrap_or("id")
}

/// Primary-key Java type of the entity called `name`
pub fn counterpart_id_type(model: &ResolvedModel, name: &str) -> &'static str {
    model.entity(name).map(id_type).unwrap_or("Long")
}

/// Primary-key field name of the entity called `name`
pub fn counterpart_id_field<'m>(model: &'m ResolvedModel, name: &str) -> &'m str {
    model.entity(name).map(id_field).unwrap_or("id")
}

/// JavaBeans accessor suffix: `birthDate` -> `BirthDate`
pub fn bean_suffix(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

pub fn getter(field: &str) -> String {
    format!("get{}", bean_suffix(field))
}

pub fn setter(field: &str) -> String {
    format!("set{}", bean_suffix(field))
}

/// `package` line followed by sorted imports
pub fn file_header(package: &str, imports: &BTreeSet<String>) -> String {
    let mut code = format!("package {package};\n\n");
    if !imports.is_empty() {
        for import in imports {
            code.push_str(&format!("import {import};\n"));
        }
        code.push('\n');
    }
    code
}

/// Plain getter/setter pair for a private field
pub fn accessors(java_type: &str, field: &str) -> String {
    format!(
        "    public {java_type} {getter}() {{\n        return {field};\n    }}\n\n    public void {setter}({java_type} {field}) {{\n        this.{field} = {field};\n    }}\n",
        getter = getter(field),
        setter = setter(field),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_semantic_types() {
        assert_eq!(java_type(SemanticType::Long), "Long");
        assert_eq!(java_type(SemanticType::Decimal), "java.math.BigDecimal");
        assert_eq!(java_type(SemanticType::DateTime), "java.time.LocalDateTime");
    }

    #[test]
    fn bean_accessors() {
        assert_eq!(getter("birthDate"), "getBirthDate");
        assert_eq!(setter("manager2"), "setManager2");
        assert_eq!(bean_suffix(""), "");
    }

    #[test]
    fn header_sorts_imports() {
        let imports: BTreeSet<String> = ["java.util.Set", "jakarta.persistence.*"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            file_header("com.acme.domain", &imports),
            "package com.acme.domain;\n\nimport jakarta.persistence.*;\nimport java.util.Set;\n\n"
        );
    }
}
