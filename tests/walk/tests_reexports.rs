//! Re-exported modules and declarations fold into the main graph.

use symgraph::{DeclKind, ExtractOptions, GraphId, RelationshipKind};

use crate::helpers::fixtures::{Fixture, extract_ok};
use crate::helpers::graph_assertions::{assert_edge, node_decls, sorted};

#[test]
fn test_exported_module_folds_into_main_graph() {
    let mut fx = Fixture::new();
    let kit = fx.module("Kit");
    let app = fx.module("App");
    let widget = fx.decl(kit, "Widget", DeclKind::Struct);
    let layout = fx.decl(widget, "layout", DeclKind::Function);
    let ext = fx.extension(app, widget, vec![]);
    let render = fx.decl(ext, "render", DeclKind::Function);
    let tree = fx.finish();

    let options = ExtractOptions::new(app)
        .with_exported_module(kit)
        .with_extension_block_symbols(true);
    let registry = extract_ok(&tree, &options);

    assert_eq!(registry.extension_graph_count(), 0);
    let main = registry.main();
    assert_eq!(node_decls(main), sorted(vec![widget, layout, ext, render]));
    assert_edge(
        main,
        (GraphId::MAIN, ext),
        (GraphId::MAIN, widget),
        RelationshipKind::ExtensionTo,
    );
    assert_edge(
        main,
        (GraphId::MAIN, render),
        (GraphId::MAIN, ext),
        RelationshipKind::MemberOf,
    );
    assert_edge(
        main,
        (GraphId::MAIN, layout),
        (GraphId::MAIN, widget),
        RelationshipKind::MemberOf,
    );
}

#[test]
fn test_exported_module_identity_is_strict() {
    let mut fx = Fixture::new();
    let kit = fx.module("Kit");
    let kit_foreign = fx.foreign_module("Kit");
    let app = fx.module("App");
    let legacy = fx.decl(kit_foreign, "LegacyWidget", DeclKind::Class);
    let ext = fx.extension(app, legacy, vec![]);
    let tree = fx.finish();

    let options = ExtractOptions::new(app)
        .with_exported_module(kit)
        .with_extension_block_symbols(true);
    let registry = extract_ok(&tree, &options);

    let kit_graph = registry.extension_graph("Kit").unwrap();
    assert_eq!(node_decls(kit_graph), vec![ext]);
    assert!(!registry.main().contains_decl(ext));
}

#[test]
fn test_qualified_export_folds_single_declaration() {
    let mut fx = Fixture::new();
    let kit = fx.module("Kit");
    let app = fx.module("App");
    let widget = fx.decl(kit, "Widget", DeclKind::Struct);
    let layout = fx.decl(widget, "layout", DeclKind::Function);
    let gadget = fx.decl(kit, "Gadget", DeclKind::Struct);
    let ext = fx.extension(app, gadget, vec![]);
    let tree = fx.finish();

    let options = ExtractOptions::new(app)
        .with_qualified_export(kit, widget)
        .with_extension_block_symbols(true);
    let registry = extract_ok(&tree, &options);

    let main = registry.main();
    assert_eq!(node_decls(main), sorted(vec![widget, layout]));
    assert!(!main.contains_decl(gadget));

    let kit_graph = registry.extension_graph("Kit").unwrap();
    assert_eq!(node_decls(kit_graph), vec![ext]);
}

#[test]
fn test_extension_of_qualified_export_stays_in_main() {
    let mut fx = Fixture::new();
    let kit = fx.module("Kit");
    let app = fx.module("App");
    let widget = fx.decl(kit, "Widget", DeclKind::Struct);
    let ext = fx.extension(app, widget, vec![]);
    let render = fx.decl(ext, "render", DeclKind::Function);
    let tree = fx.finish();

    let options = ExtractOptions::new(app).with_qualified_export(kit, widget);
    let registry = extract_ok(&tree, &options);

    assert_eq!(registry.extension_graph_count(), 0);
    assert!(registry.main().contains_decl(render));
    assert_edge(
        registry.main(),
        (GraphId::MAIN, render),
        (GraphId::MAIN, widget),
        RelationshipKind::MemberOf,
    );
}
