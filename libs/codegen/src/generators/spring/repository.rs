//! Spring Data access layer

use super::types::{file_header, id_type};
use super::{Emit, Layer};
use crate::ir::ResolvedEntity;
use std::collections::BTreeSet;

pub(super) fn render(emit: &Emit<'_>, entity: &ResolvedEntity) -> String {
    let imports = BTreeSet::from([
        emit.qualified(Layer::Domain, &entity.name),
        "org.springframework.data.jpa.repository.JpaRepository".to_string(),
        "org.springframework.stereotype.Repository".to_string(),
    ]);

    let mut code = file_header(&emit.package(Layer::Repository), &imports);
    if emit.docs() {
        code.push_str(&format!(
            "/**\n * Create, read and delete access to {{@link {}}} rows.\n */\n",
            entity.name
        ));
    }
    code.push_str("@Repository\n");
    code.push_str(&format!(
        "public interface {} extends JpaRepository<{}, {}> {{\n}}\n",
        entity.artifacts.repository,
        entity.name,
        id_type(entity)
    ));
    code
}
