//! Transactional services wrapping the access layer

use super::types::{file_header, id_type};
use super::{Emit, Layer};
use crate::ir::ResolvedEntity;
use std::collections::BTreeSet;

pub(super) fn render(emit: &Emit<'_>, entity: &ResolvedEntity) -> String {
    let repository = &entity.artifacts.repository;
    let imports = BTreeSet::from([
        emit.qualified(Layer::Domain, &entity.name),
        emit.qualified(Layer::Repository, repository),
        "java.util.List".to_string(),
        "java.util.Optional".to_string(),
        "org.springframework.stereotype.Service".to_string(),
        "org.springframework.transaction.annotation.Transactional".to_string(),
    ]);

    let name = &entity.name;
    let id = id_type(entity);

    let mut code = file_header(&emit.package(Layer::Service), &imports);
    if emit.docs() {
        code.push_str(&format!(
            "/**\n * Business operations on {{@link {name}}}.\n */\n"
        ));
    }
    code.push_str("@Service\n@Transactional\n");
    code.push_str(&format!("public class {} {{\n\n", entity.artifacts.service));
    code.push_str(&format!("    private final {repository} repository;\n\n"));
    code.push_str(&format!(
        "    public {}({repository} repository) {{\n        this.repository = repository;\n    }}\n\n",
        entity.artifacts.service
    ));
    code.push_str(&format!(
        "    public {name} save({name} entity) {{\n        return repository.save(entity);\n    }}\n\n"
    ));
    code.push_str(&format!(
        "    @Transactional(readOnly = true)\n    public Optional<{name}> findById({id} id) {{\n        return repository.findById(id);\n    }}\n\n"
    ));
    code.push_str(&format!(
        "    @Transactional(readOnly = true)\n    public List<{name}> findAll() {{\n        return repository.findAll();\n    }}\n\n"
    ));
    code.push_str(&format!(
        "    @Transactional(readOnly = true)\n    public boolean existsById({id} id) {{\n        return repository.existsById(id);\n    }}\n\n"
    ));
    code.push_str(&format!(
        "    public void deleteById({id} id) {{\n        repository.deleteById(id);\n    }}\n"
    ));
    code.push_str("}\n");
    code
}
