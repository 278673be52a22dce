//! Serializable read-out of a finished [`GraphRegistry`].
//!
//! Each graph becomes one [`GraphDocument`]. The main graph is written as
//! `<Module>.symbols.json`, an extension graph as
//! `<Module>@<Extended>.symbols.json`.

use serde::Serialize;

use crate::base::{DeclId, Name};
use crate::error::Result;
use crate::graph::{GraphRegistry, Symbol, SymbolGraph};
use crate::tree::DeclTree;

/// One exported symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    /// Unique within the document.
    pub precise_identifier: String,
    pub kind: &'static str,
    pub name: Name,
    pub path_components: Vec<Name>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesized_for: Option<String>,
}

/// One exported relationship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRecord {
    pub source: String,
    pub target: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conformance_extension: Option<String>,
}

/// One graph, ready to be written out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    pub module: Name,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_module: Option<Name>,
    pub symbols: Vec<SymbolRecord>,
    pub relationships: Vec<RelationshipRecord>,
}

impl GraphDocument {
    pub fn from_graph(tree: &DeclTree, graph: &SymbolGraph) -> Result<Self> {
        let symbols = graph
            .nodes()
            .map(|symbol| symbol_record(tree, symbol))
            .collect::<Result<Vec<_>>>()?;

        let relationships = graph
            .edges()
            .map(|edge| {
                Ok(RelationshipRecord {
                    source: precise_identifier(tree, &edge.source)?,
                    target: precise_identifier(tree, &edge.target)?,
                    kind: edge.kind.label(),
                    conformance_extension: graph
                        .conformance_extension(edge)
                        .map(|ext| decl_identifier(tree, ext))
                        .transpose()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            module: tree.module(graph.module()).name.clone(),
            extended_module: graph
                .extended_module()
                .map(|module| tree.module(module).name.clone()),
            symbols,
            relationships,
        })
    }

    pub fn file_name(&self) -> String {
        match &self.extended_module {
            Some(extended) => format!("{}@{}.symbols.json", self.module, extended),
            None => format!("{}.symbols.json", self.module),
        }
    }
}

fn decl_identifier(tree: &DeclTree, decl: DeclId) -> Result<String> {
    let module = &tree.module(tree.module_of(decl)).name;
    let path = tree.qualified_path(decl)?;
    let mut id = format!("{}.{}", module, path.join("."));
    if tree.decl(decl).kind.is_extension() {
        id.push_str(&format!("::EXTENSION#{}", decl.index()));
    }
    Ok(id)
}

fn precise_identifier(tree: &DeclTree, symbol: &Symbol) -> Result<String> {
    let mut id = decl_identifier(tree, symbol.decl)?;
    if let Some(base) = symbol.synthesized_for {
        id.push_str("::SYNTHESIZED::");
        id.push_str(&decl_identifier(tree, base)?);
    }
    Ok(id)
}

fn symbol_record(tree: &DeclTree, symbol: &Symbol) -> Result<SymbolRecord> {
    let decl = tree.decl(symbol.decl);
    Ok(SymbolRecord {
        precise_identifier: precise_identifier(tree, symbol)?,
        kind: decl.kind.display(),
        name: decl.name.clone(),
        path_components: tree.qualified_path(symbol.decl)?,
        synthesized_for: symbol
            .synthesized_for
            .map(|base| decl_identifier(tree, base))
            .transpose()?,
    })
}

/// One document per graph, main graph first.
pub fn documents(tree: &DeclTree, registry: &GraphRegistry) -> Result<Vec<GraphDocument>> {
    registry
        .graphs()
        .map(|graph| GraphDocument::from_graph(tree, graph))
        .collect()
}

/// Render every graph as pretty JSON, paired with its file name.
pub fn to_json(tree: &DeclTree, registry: &GraphRegistry) -> Result<Vec<(String, String)>> {
    documents(tree, registry)?
        .into_iter()
        .map(|doc| {
            let json = serde_json::to_string_pretty(&doc)?;
            Ok((doc.file_name(), json))
        })
        .collect()
}
