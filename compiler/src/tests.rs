use strata_model::{Component, ComponentName, Model, Role};
use strata_scaffold::StubKind;

use crate::{CompilationConfig, Compiler, Error, classify, resolve, topology};

fn name(value: &str) -> ComponentName {
    ComponentName::new(value).unwrap()
}

fn model(components: &[(&str, &str)]) -> Model {
    Model::new(
        components
            .iter()
            .map(|(n, role)| Component::new(*n, role.parse().unwrap()).unwrap())
            .collect(),
    )
}

fn compile(components: &[(&str, &str)]) -> crate::CompileOutput {
    Compiler::default().compile(&model(components)).unwrap()
}

#[test]
fn classification_keeps_declaration_order() {
    let classification = classify::classify(&model(&[
        ("web1", "frontend"),
        ("db1", "database"),
        ("api1", "backend"),
    ]));

    let names: Vec<&str> = classification
        .entries()
        .iter()
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(names, ["web1", "db1", "api1"]);
    assert_eq!(classification.role(&name("db1")), Some(&Role::Database));
}

#[test]
fn singleton_roles_bind_the_last_declaration() {
    let classification = classify::classify(&model(&[
        ("a", "database"),
        ("b", "database"),
        ("api1", "backend"),
    ]));

    assert_eq!(classification.database(), Some(&name("b")));
}

#[test]
fn missing_roles_resolve_to_none() {
    let classification = classify::classify(&model(&[("web1", "frontend")]));

    assert_eq!(classification.database(), None);
    assert_eq!(classification.document_store(), None);
    assert_eq!(classification.backend(), None);
}

#[test]
fn backend_refs_carry_both_stores() {
    let classification = classify::classify(&model(&[
        ("db1", "database"),
        ("docs1", "nosql"),
        ("api1", "backend"),
    ]));
    let refs = resolve::resolve(&classification);

    let api = refs.get(&name("api1"));
    assert_eq!(api.database, Some(name("db1")));
    assert_eq!(api.document_store, Some(name("docs1")));
    assert_eq!(api.backend, None);
}

#[test]
fn frontend_refs_carry_the_winning_backend() {
    let classification = classify::classify(&model(&[
        ("old", "backend"),
        ("new", "backend"),
        ("web1", "frontend"),
    ]));
    let refs = resolve::resolve(&classification);

    assert_eq!(refs.get(&name("web1")).backend, Some(name("new")));
}

#[test]
fn shadowed_backend_resolves_to_nothing() {
    let classification = classify::classify(&model(&[
        ("old", "backend"),
        ("new", "backend"),
        ("db1", "database"),
    ]));
    let refs = resolve::resolve(&classification);

    assert!(refs.get(&name("old")).is_empty());
    assert_eq!(refs.get(&name("new")).database, Some(name("db1")));
}

#[test]
fn resolution_is_total_over_any_classification() {
    let classification = classify::classify(&model(&[
        ("queue1", "broker"),
        ("web1", "frontend"),
        ("api1", "backend"),
    ]));
    let refs = resolve::resolve(&classification);

    // No database or nosql exists: references are absent, never empty strings.
    let api = refs.get(&name("api1"));
    assert_eq!(api.database, None);
    assert_eq!(api.document_store, None);
    assert!(refs.get(&name("queue1")).is_empty());
}

#[test]
fn topology_order_is_a_stable_two_tier_partition() {
    let classification = classify::classify(&model(&[
        ("web1", "frontend"),
        ("api1", "backend"),
        ("db1", "database"),
        ("api2", "backend"),
        ("docs1", "nosql"),
    ]));

    let order = topology::order(&classification);
    let order: Vec<&str> = order.iter().map(|n| n.as_str()).collect();
    assert_eq!(order, ["db1", "docs1", "web1", "api1", "api2"]);
}

#[test]
fn compile_rejects_duplicate_names() {
    let err = Compiler::default()
        .compile(&model(&[("api1", "backend"), ("api1", "database")]))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Model(strata_model::Error::DuplicateComponentName { .. })
    ));
}

#[test]
fn compile_is_deterministic() {
    let components = [
        ("db1", "database"),
        ("api1", "backend"),
        ("web1", "frontend"),
    ];
    let first = compile(&components);
    let second = compile(&components);

    assert_eq!(first.order, second.order);
    assert_eq!(first.stubs, second.stubs);
    assert_eq!(first.classification, second.classification);
}

#[test]
fn compile_builds_one_stub_per_component() {
    let output = compile(&[
        ("db1", "database"),
        ("docs1", "nosql"),
        ("api1", "backend"),
        ("web1", "frontend"),
        ("queue1", "message-broker"),
    ]);

    assert_eq!(output.stubs.len(), 5);
    assert_eq!(output.stubs[0].kind, StubKind::Database);
    assert_eq!(output.stubs[1].kind, StubKind::DocumentStore);
    assert_eq!(
        output.stubs[2].kind,
        StubKind::Backend {
            database: Some(name("db1")),
            document_store: Some(name("docs1")),
        }
    );
    assert_eq!(
        output.stubs[3].kind,
        StubKind::Frontend {
            backend: Some(name("api1")),
        }
    );
    assert_eq!(
        output.stubs[4].kind,
        StubKind::Service {
            role: "message-broker".to_string(),
        }
    );
}

#[test]
fn check_validates_without_building_stubs() {
    let compiler = Compiler::default();
    compiler.check(&model(&[("db1", "database")])).unwrap();
    compiler
        .check(&model(&[("x", "backend"), ("x", "backend")]))
        .unwrap_err();
}

#[test]
fn config_builder_defaults_match_the_legacy_stack() {
    let config = CompilationConfig::default();
    assert_eq!(config.base_port, 8000);
    assert_eq!(config.relational_port, 3306);
    assert_eq!(config.document_port, 8000);
    assert_eq!(config.service_port, 80);
    assert_eq!(config.relational_image, "mysql:8");
    assert_eq!(config.document_image, "amazon/dynamodb-local:latest");
}
