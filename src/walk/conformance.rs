//! Interface conformance expansion.
//!
//! Turns the inherited types stated on an extension into the flat list of
//! interfaces it conforms to: compositions are split into their members and
//! every interface contributes the interfaces it inherits. The expansion is a
//! worklist, so deeply nested compositions do not grow the call stack.

use rustc_hash::FxHashSet;

use crate::base::DeclId;
use crate::error::{ExtractError, Result};
use crate::tree::{DeclTree, TypeExpr, TypeShape};

#[derive(Default)]
struct Worklist<'a> {
    /// Interfaces still to expand.
    interfaces: Vec<DeclId>,
    /// (declaration stating it, members) of compositions still to expand.
    compositions: Vec<(DeclId, &'a [TypeExpr])>,
}

impl<'a> Worklist<'a> {
    fn push(&mut self, tree: &'a DeclTree, owner: DeclId, ty: &'a TypeExpr) -> Result<()> {
        match tree.classify(ty)? {
            TypeShape::Interface(interface) => self.interfaces.push(interface),
            TypeShape::Composition(members) => self.compositions.push((owner, members)),
            // Already diagnosed by the front end.
            TypeShape::Unresolved => {}
            TypeShape::Nominal(_) | TypeShape::Structural(_) => {
                return Err(ExtractError::invalid_inherited(
                    tree.decl(owner).name.clone(),
                    tree.render_type(ty),
                ));
            }
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.compositions.is_empty()
    }
}

/// Expand the types `owner` states in its inheritance clause into every
/// interface they imply, directly or transitively.
///
/// Compositions are expanded before interfaces. Each interface appears once
/// in the result, in the order its expansion completed; an interface reached
/// along several paths is expanded only the first time, which also makes a
/// cyclic inheritance graph terminate.
///
/// A stated type that is neither an interface nor a composition is
/// [`ExtractError::InvalidInheritedType`]. Unresolved types are skipped.
pub fn expand_conformances<'a>(
    tree: &'a DeclTree,
    owner: DeclId,
    stated: &'a [TypeExpr],
) -> Result<Vec<DeclId>> {
    let mut work = Worklist::default();
    for ty in stated {
        work.push(tree, owner, ty)?;
    }

    let mut expanded = FxHashSet::default();
    let mut interfaces = Vec::new();
    while !work.is_empty() {
        if let Some((composition_owner, members)) = work.compositions.pop() {
            for member in members {
                work.push(tree, composition_owner, member)?;
            }
        } else if let Some(interface) = work.interfaces.pop() {
            if !expanded.insert(interface) {
                continue;
            }
            for ty in &tree.decl(interface).inherited {
                work.push(tree, interface, ty)?;
            }
            interfaces.push(interface);
        }
    }

    Ok(interfaces)
}
