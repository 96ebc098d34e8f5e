use serde_json::{json, Value};

/// Two entities joined by a one-to-many association
pub fn clinic_spec() -> Value {
    json!({
        "name": "Clinic Manager",
        "version": "1.2.0",
        "packageNamespace": "org.clinic",
        "entities": [
            {"name": "Doctor", "attributes": [{"name": "name"}]},
            {"name": "Patient", "attributes": [{"name": "name"}, {"name": "born", "type": "DATE"}]}
        ],
        "relations": [
            {"type": "association", "source": "Doctor", "target": "Patient", "multSource": "1", "multTarget": "*"}
        ]
    })
}

/// One valid entity plus items that are dropped during normalization
pub fn spec_with_dropped_items() -> Value {
    json!({
        "entities": [
            {"name": "Doctor"},
            {"name": "  "}
        ],
        "relations": [
            {"type": "friendship", "source": "Doctor", "target": "Doctor"}
        ]
    })
}
