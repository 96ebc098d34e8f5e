//! Naming engine
//!
//! Pure string transforms shared by the resolver and every emitter. Any name
//! that ends up in generated source is produced here, once, by the resolver;
//! emitters only read the results back out of the resolved model.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use std::collections::HashSet;

/// Strategy for turning a singular noun into its plural.
///
/// The resolver only ever goes through this trait so the naive default can be
/// replaced by a linguistic implementation without touching cardinality logic.
pub trait Pluralizer {
    fn pluralize(&self, word: &str) -> String;
}

/// Suffix-only pluralization: `es` after a trailing `s`, otherwise `s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaivePluralizer;

impl Pluralizer for NaivePluralizer {
    fn pluralize(&self, word: &str) -> String {
        if word.ends_with('s') {
            format!("{word}es")
        } else {
            format!("{word}s")
        }
    }
}

/// Pluralize with the default strategy.
pub fn pluralize(word: &str) -> String {
    NaivePluralizer.pluralize(word)
}

/// Suffix appended to type names that would shadow a framework type
pub const RESERVED_TYPE_SUFFIX: &str = "Entity";

/// `medical record` / `medical_record` -> `MedicalRecord`
///
/// Names that clash with a framework or `java.lang` type referenced by the
/// generated sources get [`RESERVED_TYPE_SUFFIX`]: `Service` -> `ServiceEntity`.
pub fn to_type_case(raw: &str) -> String {
    let name = guard_leading_digit(raw.to_upper_camel_case());
    if is_framework_type(&name) {
        format!("{name}{RESERVED_TYPE_SUFFIX}")
    } else {
        name
    }
}

/// `Medical Record` / `medical_record` -> `medicalRecord`
///
/// Java reserved words get a `Value` suffix so the result is always a legal
/// field identifier.
pub fn to_field_case(raw: &str) -> String {
    let name = guard_leading_digit(raw.to_lower_camel_case());
    if is_java_reserved(&name) {
        format!("{name}Value")
    } else {
        name
    }
}

/// Return `base` if unused, else `base2`, `base3`, ... (first free).
pub fn unique_field_name(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Database column name for a field: `birthDate` -> `birth_date`
pub fn to_column_name(field: &str) -> String {
    field.to_snake_case()
}

/// Table name for an entity type: `MedicalRecord` -> `medical_records`
pub fn to_table_name(type_name: &str, pluralizer: &dyn Pluralizer) -> String {
    pluralizer.pluralize(&type_name.to_snake_case())
}

/// REST collection path: `MedicalRecord` -> `/api/medical-records`
pub fn to_resource_path(type_name: &str, pluralizer: &dyn Pluralizer) -> String {
    format!("/api/{}", pluralizer.pluralize(&type_name.to_kebab_case()))
}

/// Artifact-friendly project identifier: `Clinic Manager` -> `clinic-manager`
pub fn to_artifact_id(name: &str) -> String {
    let id = name.to_kebab_case();
    if id.is_empty() {
        "generated-app".to_string()
    } else {
        id
    }
}

fn guard_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Simple names the emitted sources use unqualified, through single-type or
/// on-demand imports or implicitly from `java.lang`. A generated type with one
/// of these names would shadow or conflict with the import.
fn is_framework_type(s: &str) -> bool {
    matches!(
        s,
        // java.lang
        "Boolean"
            | "Integer"
            | "Long"
            | "Object"
            | "String"
            | "Void"
            // java.util, java.net
            | "HashSet"
            | "List"
            | "Optional"
            | "Set"
            | "Collectors"
            | "URI"
            // jakarta.persistence
            | "CascadeType"
            | "Entity"
            | "GeneratedValue"
            | "GenerationType"
            | "Id"
            | "JoinColumn"
            | "JoinTable"
            | "ManyToMany"
            | "ManyToOne"
            | "OneToMany"
            | "OneToOne"
            | "Table"
            // spring
            | "Component"
            | "DeleteMapping"
            | "GetMapping"
            | "JpaRepository"
            | "PathVariable"
            | "PostMapping"
            | "PutMapping"
            | "Repository"
            | "RequestBody"
            | "RequestMapping"
            | "ResponseEntity"
            | "RestController"
            | "Service"
            | "ServletUriComponentsBuilder"
            | "SpringApplication"
            | "SpringBootApplication"
            | "Transactional"
    )
}

fn is_java_reserved(s: &str) -> bool {
    matches!(
        s,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "false"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "null"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "true"
            | "try"
            | "void"
            | "volatile"
            | "while"
            | "var"
            | "record"
            | "yield"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_case_strips_separators() {
        assert_eq!(to_type_case("medical record"), "MedicalRecord");
        assert_eq!(to_type_case("medical_record"), "MedicalRecord");
        assert_eq!(to_type_case("  doctor!! "), "Doctor");
        assert_eq!(to_type_case("DoctorPatient"), "DoctorPatient");
        assert_eq!(to_type_case("!!"), "");
    }

    #[test]
    fn type_case_avoids_framework_names() {
        assert_eq!(to_type_case("service"), "ServiceEntity");
        assert_eq!(to_type_case("Table"), "TableEntity");
        assert_eq!(to_type_case("string"), "StringEntity");
        assert_eq!(to_type_case("table booking"), "TableBooking");
        assert_eq!(to_type_case("ServiceEntity"), "ServiceEntity");
    }

    #[test]
    fn field_case_lowers_first_token() {
        assert_eq!(to_field_case("Birth Date"), "birthDate");
        assert_eq!(to_field_case("birth_date"), "birthDate");
        assert_eq!(to_field_case("Doctor"), "doctor");
    }

    #[test]
    fn field_case_escapes_reserved_words_and_digits() {
        assert_eq!(to_field_case("class"), "classValue");
        assert_eq!(to_field_case("Default"), "defaultValue");
        assert_eq!(to_field_case("2nd phone"), "_2ndPhone");
    }

    #[test]
    fn naive_pluralization() {
        assert_eq!(pluralize("patient"), "patients");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("address"), "addresses");
        // intentionally naive
        assert_eq!(pluralize("child"), "childs");
    }

    #[test]
    fn unique_names_start_suffixing_at_two() {
        let mut used = HashSet::new();
        assert_eq!(unique_field_name("manager", &used), "manager");
        used.insert("manager".to_string());
        assert_eq!(unique_field_name("manager", &used), "manager2");
        used.insert("manager2".to_string());
        assert_eq!(unique_field_name("manager", &used), "manager3");
    }

    #[test]
    fn derived_identifiers() {
        let p = NaivePluralizer;
        assert_eq!(to_table_name("MedicalRecord", &p), "medical_records");
        assert_eq!(to_resource_path("MedicalRecord", &p), "/api/medical-records");
        assert_eq!(to_column_name("birthDate"), "birth_date");
        assert_eq!(to_artifact_id("Clinic Manager"), "clinic-manager");
        assert_eq!(to_artifact_id(""), "generated-app");
    }
}
