//! Which graph each declaration lands in.

use rstest::rstest;
use symgraph::{
    Access, AccessPolicy, DeclKind, ExtractError, ExtractOptions, GraphId, NewDecl,
    RelationshipKind, extract,
};

use crate::helpers::fixtures::{Fixture, extract_ok};
use crate::helpers::graph_assertions::{assert_edge, edges_of_kind, node_decls, sorted};

#[test]
fn test_module_without_extensions_has_only_main_graph() {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let proto = fx.protocol(app, "Drawable", &[]);
    let shape = fx.add(app, NewDecl::new("Shape", DeclKind::Struct).inherits(proto));
    let draw = fx.decl(shape, "draw", DeclKind::Function);
    let tree = fx.finish();

    let registry = extract_ok(&tree, &ExtractOptions::new(app));

    assert_eq!(registry.graph_count(), 1);
    assert_eq!(registry.extension_graph_count(), 0);
    let main = registry.main();
    assert_eq!(node_decls(main), sorted(vec![proto, shape, draw]));
    assert_edge(
        main,
        (GraphId::MAIN, draw),
        (GraphId::MAIN, shape),
        RelationshipKind::MemberOf,
    );
    assert_edge(
        main,
        (GraphId::MAIN, shape),
        (GraphId::MAIN, proto),
        RelationshipKind::ConformsTo,
    );
    assert_eq!(main.edge_count(), 2);
}

#[test]
fn test_class_inheritance_recorded() {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let base = fx.decl(app, "View", DeclKind::Class);
    let button = fx.add(app, NewDecl::new("Button", DeclKind::Class).inherits(base));
    let tree = fx.finish();

    let registry = extract_ok(&tree, &ExtractOptions::new(app));

    assert_edge(
        registry.main(),
        (GraphId::MAIN, button),
        (GraphId::MAIN, base),
        RelationshipKind::InheritsFrom,
    );
}

#[rstest]
#[case::blocks_on(true)]
#[case::blocks_off(false)]
fn test_local_extension_merges_into_type(#[case] blocks: bool) {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let shape = fx.decl(app, "Shape", DeclKind::Struct);
    let ext = fx.extension(app, shape, vec![]);
    let area = fx.decl(ext, "area", DeclKind::Variable);
    let tree = fx.finish();

    let options = ExtractOptions::new(app).with_extension_block_symbols(blocks);
    let registry = extract_ok(&tree, &options);

    assert_eq!(registry.extension_graph_count(), 0);
    let main = registry.main();
    assert_eq!(node_decls(main), sorted(vec![shape, area]));
    assert!(!main.contains_decl(ext));
    assert!(edges_of_kind(main, RelationshipKind::ExtensionTo).is_empty());
    assert_edge(
        main,
        (GraphId::MAIN, area),
        (GraphId::MAIN, shape),
        RelationshipKind::MemberOf,
    );
}

#[test]
fn test_foreign_representation_of_own_module_stays_in_main() {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let app_foreign = fx.foreign_module("App");
    let legacy = fx.decl(app_foreign, "Legacy", DeclKind::Class);
    let ext = fx.extension(app, legacy, vec![]);
    let run = fx.decl(ext, "run", DeclKind::Function);
    let tree = fx.finish();

    let options = ExtractOptions::new(app).with_extension_block_symbols(true);
    let registry = extract_ok(&tree, &options);

    assert_eq!(registry.extension_graph_count(), 0);
    let main = registry.main();
    assert!(main.contains_decl(run));
    assert!(!main.contains_decl(ext));
    assert_edge(
        main,
        (GraphId::MAIN, run),
        (GraphId::MAIN, legacy),
        RelationshipKind::MemberOf,
    );
}

#[test]
fn test_overlay_extensions_of_declaring_module_stay_in_main() {
    let mut fx = Fixture::new();
    let kit = fx.module("Kit");
    let overlay = fx.module("_KitCharts");
    let widget = fx.decl(kit, "Widget", DeclKind::Struct);
    let ext = fx.extension(overlay, widget, vec![]);
    let chart = fx.decl(ext, "chart", DeclKind::Function);
    let tree = fx.finish();

    let plain = extract_ok(&tree, &ExtractOptions::new(overlay));
    assert!(plain.extension_graph("Kit").is_some_and(|g| g.contains_decl(chart)));
    assert!(!plain.main().contains_decl(chart));

    let options = ExtractOptions::new(overlay).with_declaring_module(kit);
    let registry = extract_ok(&tree, &options);

    assert_eq!(registry.extension_graph_count(), 0);
    assert!(registry.main().contains_decl(chart));
    assert_eq!(registry.main().declaring_module(), Some(kit));
}

#[test]
fn test_hidden_declarations_prune_subtree() {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let hidden = fx.decl(app, "_Storage", DeclKind::Struct);
    let inner = fx.decl(hidden, "buffer", DeclKind::Variable);
    let internal = fx.add(
        app,
        NewDecl::new("Cache", DeclKind::Class).access(Access::Internal),
    );
    let method = fx.decl(internal, "clear", DeclKind::Function);
    let public = fx.decl(app, "Api", DeclKind::Struct);
    let local = fx.decl(public, "call", DeclKind::Function);
    let helper = fx.decl(local, "Helper", DeclKind::Struct);
    let tree = fx.finish();

    let registry = extract_ok(&tree, &ExtractOptions::new(app));
    let main = registry.main();

    assert_eq!(node_decls(main), sorted(vec![public, local]));
    for absent in [hidden, inner, internal, method, helper] {
        assert!(!main.contains_decl(absent));
    }
}

#[test]
fn test_custom_minimum_access_admits_internal() {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let cache = fx.add(
        app,
        NewDecl::new("Cache", DeclKind::Class).access(Access::Internal),
    );
    let tree = fx.finish();

    let policy = AccessPolicy::new().with_minimum_access(Access::Internal);
    let registry = extract(&tree, &ExtractOptions::new(app), &policy).unwrap();

    assert!(registry.main().contains_decl(cache));
}

#[test]
fn test_unbound_extension_aborts_walk() {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let ghost = fx.add(app, NewDecl::unbound_extension("Ghost"));
    let tree = fx.finish();

    let result = extract(&tree, &ExtractOptions::new(app), &AccessPolicy::default());

    assert!(matches!(result, Err(ExtractError::UnboundExtension(id)) if id == ghost));
}

#[test]
fn test_unknown_module_rejected() {
    let mut fx = Fixture::new();
    let app = fx.module("App");
    let tree = fx.finish();

    let mut other = Fixture::new();
    other.module("App");
    let stray = other.module("Stray");

    let options = ExtractOptions::new(app).with_exported_module(stray);
    let result = extract(&tree, &options, &AccessPolicy::default());

    assert!(matches!(result, Err(ExtractError::UnknownModule(id)) if id == stray));
}
