//! End-to-end placement scenarios
//!
//! Each test compiles the same class model for both targets and checks
//! what each compiled output and the endpoint registry receive.

use sunder_engine::analysis::analyze_method;
use sunder_engine::diagnostic::codes;
use sunder_engine::model::{KEEP_TAG, SHARED_TAG};
use sunder_engine::rewrite::STUB_RETURN_TYPE;
use sunder_engine::{
    compile, ClassModel, Compilation, Endpoint, Expression, FieldModel, Method, Parameter,
    Placement, PrettyPrint, SunderConfig, Target, Variable,
};

fn method(name: &str, params: &[&str], body: Expression) -> FieldModel {
    FieldModel::Method(Method::new(
        name,
        params.iter().map(|p| Parameter::new(*p)).collect(),
        Some(body),
    ))
}

fn todo_class() -> ClassModel {
    let mut items = Variable::new("items", Some("Array<String>".to_string()));
    items.metadata.insert(SHARED_TAG.to_string());

    ClassModel::new(
        "Todo",
        vec![
            FieldModel::Variable(items),
            method("new", &[], Expression::block(vec![])),
            // addItem(text) { remote(Storage.push(text)) }
            method(
                "addItem",
                &["text"],
                Expression::call(
                    Expression::ident("remote"),
                    vec![Expression::call(
                        Expression::path("Storage.push"),
                        vec![Expression::ident("text")],
                    )],
                ),
            ),
            // render() { js.Browser.document.body.appendChild(...) }
            method(
                "render",
                &[],
                Expression::call(
                    Expression::path("js.Browser.document.body.appendChild"),
                    vec![Expression::ident("node")],
                ),
            ),
            // format(s) { s.toUpperCase() }
            method(
                "format",
                &["s"],
                Expression::call(Expression::path("s.toUpperCase"), vec![]),
            ),
        ],
    )
}

fn find<'a>(classes: &'a [ClassModel], class: &str, method: &str) -> Option<&'a Method> {
    classes.iter().find(|c| c.name == class)?.method(method)
}

#[test]
fn test_scenario_a_remote_call_is_server_bound() {
    let config = SunderConfig::default();
    let original = todo_class();
    let add_item = original.method("addItem").unwrap();
    assert_eq!(
        analyze_method(add_item, &config.signals).placement,
        Placement::ServerBound
    );

    let client = compile(vec![todo_class()], Target::Client, &config, None).unwrap();
    let stub = find(&client.classes, "Todo", "addItem").unwrap();
    assert_eq!(stub.return_type.as_deref(), Some(STUB_RETURN_TYPE));
    let printed = client.classes.pretty_print();
    assert!(printed.contains(
        r#"globalThis.JSON.stringify({ method: "Todo.addItem", args: { text: text } })"#
    ));
    assert!(printed.contains(r#"await globalThis.fetch("/rpc", { method: "POST", headers: { "Content-Type": "application/json" }"#));
    assert!(client.output.endpoints.is_empty());

    let server = compile(vec![todo_class()], Target::Server, &config, None).unwrap();
    let kept = find(&server.classes, "Todo", "addItem").unwrap();
    assert_eq!(kept.body, add_item.body);
    assert!(kept.has_tag(KEEP_TAG));
    assert_eq!(
        server.output.endpoints,
        vec![Endpoint::new("Todo", "addItem", vec!["text".to_string()])]
    );
}

#[test]
fn test_scenario_b_host_anchor_is_client_anchored() {
    let config = SunderConfig::default();
    let original = todo_class();
    let render = original.method("render").unwrap();
    assert_eq!(
        analyze_method(render, &config.signals).placement,
        Placement::ClientAnchored
    );

    let client = compile(vec![todo_class()], Target::Client, &config, None).unwrap();
    assert_eq!(find(&client.classes, "Todo", "render"), Some(render));

    let server = compile(vec![todo_class()], Target::Server, &config, None).unwrap();
    assert!(find(&server.classes, "Todo", "render").is_none());
}

#[test]
fn test_scenario_c_portable_is_identical_in_both_outputs() {
    let config = SunderConfig::default();
    let original = todo_class();
    let format = original.method("format").unwrap();
    assert_eq!(
        analyze_method(format, &config.signals).placement,
        Placement::Portable
    );

    for target in [Target::Client, Target::Server] {
        let out = compile(vec![todo_class()], target, &config, None).unwrap();
        assert_eq!(find(&out.classes, "Todo", "format"), Some(format));
    }
}

#[test]
fn test_scenario_d_mixed_signals_warn_and_resolve_to_server() {
    let config = SunderConfig::default();
    let class = ClassModel::new(
        "Todo",
        vec![method(
            "sync",
            &[],
            Expression::block(vec![
                Expression::call(Expression::ident("remote"), vec![]),
                Expression::call(Expression::path("js.Browser.alert"), vec![Expression::string("done")]),
            ]),
        )],
    );

    let mut pass = Compilation::new(Target::Server, &config);
    pass.configure();
    pass.build_class(class).unwrap();
    let output = pass.finish(None).unwrap();

    assert_eq!(output.endpoints.len(), 1);
    let warnings: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|d| d.code == codes::AMBIGUOUS_PLACEMENT)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("Todo.sync"));
}

#[test]
fn test_scenario_e_two_endpoints_two_sections_two_arms() {
    let config = SunderConfig::default();
    let remote = || Expression::call(Expression::ident("remote"), vec![]);
    let class = ClassModel::new(
        "ClassName",
        vec![
            method("methodA", &["a"], remote()),
            method("helper", &[], Expression::ident("x")),
            method("methodB", &["b", "c"], remote()),
        ],
    );

    let server = compile(vec![class], Target::Server, &config, None).unwrap();
    let artifacts = server.output.artifacts.expect("artifacts emitted");

    let sections: Vec<&str> = artifacts
        .manifest
        .lines()
        .filter(|l| l.starts_with("## "))
        .collect();
    assert_eq!(sections, vec!["## ClassName.methodA", "## ClassName.methodB"]);

    let arms: Vec<&str> = artifacts
        .shell
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("case "))
        .collect();
    assert_eq!(
        arms,
        vec!["case \"ClassName.methodA\":", "case \"ClassName.methodB\":"]
    );
}

#[test]
fn test_constructor_survives_both_targets() {
    let config = SunderConfig::default();
    for target in [Target::Client, Target::Server] {
        let out = compile(vec![todo_class()], target, &config, None).unwrap();
        assert!(find(&out.classes, "Todo", "new").is_some());
    }
}

#[test]
fn test_shared_variable_passes_through() {
    let config = SunderConfig::default();
    for target in [Target::Client, Target::Server] {
        let out = compile(vec![todo_class()], target, &config, None).unwrap();
        match &out.classes[0].fields[0] {
            FieldModel::Variable(v) => assert!(v.is_shared()),
            other => panic!("expected variable, got {:?}", other),
        }
    }
}

#[test]
fn test_registry_matches_server_bound_methods_across_classes() {
    let config = SunderConfig::default();
    let remote = || Expression::call(Expression::path("api.remote"), vec![]);
    let forced = || Expression::call(Expression::ident("serverOnly"), vec![]);
    let classes = vec![
        todo_class(),
        ClassModel::new(
            "Auth",
            vec![
                method("login", &["user", "password"], remote()),
                method("logout", &[], Expression::ident("x")),
                method("purge", &[], Expression::other("while", vec![forced()])),
            ],
        ),
    ];

    let expected: Vec<Endpoint> = classes
        .iter()
        .flat_map(|class| {
            class
                .methods()
                .filter(|m| !m.is_constructor())
                .filter(|m| analyze_method(m, &config.signals).placement == Placement::ServerBound)
                .map(move |m| Endpoint::new(&class.name, &m.name, m.param_names()))
        })
        .collect();

    let server = compile(classes, Target::Server, &config, None).unwrap();
    assert_eq!(server.output.endpoints, expected);
    let names: Vec<String> = expected.iter().map(Endpoint::qualified_name).collect();
    assert_eq!(names, vec!["Todo.addItem", "Auth.login", "Auth.purge"]);
}

#[test]
fn test_client_pass_emits_nothing() {
    let config = SunderConfig::default();
    let client = compile(vec![todo_class()], Target::Client, &config, None).unwrap();
    assert!(client.output.endpoints.is_empty());
    assert!(client.output.artifacts.is_none());
}

#[test]
fn test_malformed_declaration_aborts_compilation() {
    let config = SunderConfig::default();
    let bad = ClassModel::new(
        "Bad",
        vec![FieldModel::Method(Method::new(
            "dup",
            vec![Parameter::new("a"), Parameter::new("a")],
            None,
        ))],
    );
    assert!(compile(vec![todo_class(), bad], Target::Server, &config, None).is_err());
}
