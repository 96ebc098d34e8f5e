//! REST resource handlers

use super::types::{file_header, getter, id_field, id_type};
use super::{Emit, Layer};
use crate::ir::ResolvedEntity;
use std::collections::BTreeSet;

pub(super) fn render(emit: &Emit<'_>, entity: &ResolvedEntity) -> String {
    let artifacts = &entity.artifacts;
    let imports = BTreeSet::from([
        emit.qualified(Layer::Domain, &entity.name),
        emit.qualified(Layer::Dto, &artifacts.dto),
        emit.qualified(Layer::Mapper, &artifacts.mapper),
        emit.qualified(Layer::Service, &artifacts.service),
        "java.net.URI".to_string(),
        "java.util.List".to_string(),
        "org.springframework.http.ResponseEntity".to_string(),
        "org.springframework.web.bind.annotation.*".to_string(),
        "org.springframework.web.servlet.support.ServletUriComponentsBuilder".to_string(),
    ]);

    let name = &entity.name;
    let dto = &artifacts.dto;
    let service = &artifacts.service;
    let mapper = &artifacts.mapper;
    let id = id_type(entity);
    let id_getter = getter(id_field(entity));

    let mut code = file_header(&emit.package(Layer::Controller), &imports);
    if emit.docs() {
        code.push_str(&format!(
            "/**\n * REST endpoints for {{@link {name}}} under {{@code {}}}.\n */\n",
            entity.resource_path
        ));
    }
    code.push_str("@RestController\n");
    code.push_str(&format!("@RequestMapping(\"{}\")\n", entity.resource_path));
    code.push_str(&format!("public class {} {{\n\n", artifacts.controller));
    code.push_str(&format!("    private final {service} service;\n"));
    code.push_str(&format!("    private final {mapper} mapper;\n\n"));
    code.push_str(&format!(
        "    public {}({service} service, {mapper} mapper) {{\n        this.service = service;\n        this.mapper = mapper;\n    }}\n\n",
        artifacts.controller
    ));

    code.push_str(&format!(
        r#"    @PostMapping
    public ResponseEntity<{dto}> create(@RequestBody {dto} body) {{
        {name} saved = service.save(mapper.toEntity(body));
        URI location = ServletUriComponentsBuilder.fromCurrentRequest()
                .path("/{{id}}")
                .buildAndExpand(saved.{id_getter}())
                .toUri();
        return ResponseEntity.created(location).body(mapper.toDto(saved));
    }}

    @GetMapping
    public List<{dto}> list() {{
        return service.findAll().stream().map(mapper::toDto).toList();
    }}

    @GetMapping("/{{id}}")
    public ResponseEntity<{dto}> get(@PathVariable("id") {id} id) {{
        return service.findById(id)
                .map(mapper::toDto)
                .map(ResponseEntity::ok)
                .orElseGet(() -> ResponseEntity.notFound().build());
    }}

    @PutMapping("/{{id}}")
    public ResponseEntity<{dto}> update(@PathVariable("id") {id} id, @RequestBody {dto} body) {{
        return service.findById(id)
                .map(existing -> {{
                    mapper.updateEntity(body, existing);
                    return ResponseEntity.ok(mapper.toDto(service.save(existing)));
                }})
                .orElseGet(() -> ResponseEntity.notFound().build());
    }}

    @DeleteMapping("/{{id}}")
    public ResponseEntity<Void> delete(@PathVariable("id") {id} id) {{
        if (!service.existsById(id)) {{
            return ResponseEntity.notFound().build();
        }}
        service.deleteById(id);
        return ResponseEntity.noContent().build();
    }}
"#
    ));
    code.push_str("}\n");
    code
}
