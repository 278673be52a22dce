//! Stated type expressions and their classification.

use crate::base::{DeclId, Name};
use crate::error::{ExtractError, Result};

use super::{DeclKind, DeclTree};

/// A type as written in an inheritance clause or alias target, after name
/// binding by the front end.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Reference to a declared type (nominal, interface or alias).
    Named(DeclId),
    /// `A & B & ...`. `Any` and `AnyObject` are written as empty compositions.
    Composition(Vec<TypeExpr>),
    /// Tuples, function types and other types with no declaration behind them.
    Structural(Name),
    /// A type the front end failed to resolve.
    Unresolved(Name),
}

impl TypeExpr {
    pub fn composition(members: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Composition(members.into_iter().collect())
    }
}

impl From<DeclId> for TypeExpr {
    fn from(decl: DeclId) -> Self {
        TypeExpr::Named(decl)
    }
}

/// What a [`TypeExpr`] denotes once type aliases are looked through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeShape<'a> {
    Interface(DeclId),
    Composition(&'a [TypeExpr]),
    /// A non-interface type declaration (class, struct, enum, ...).
    Nominal(DeclId),
    Structural(&'a Name),
    Unresolved,
}

impl DeclTree {
    /// Classify a type expression, looking through type aliases.
    ///
    /// `typealias Both = A & B` classifies as a composition; an alias whose
    /// target the front end never resolved classifies as unresolved.
    pub fn classify<'a>(&'a self, ty: &'a TypeExpr) -> Result<TypeShape<'a>> {
        let mut current = ty;
        let mut first_alias: Option<DeclId> = None;
        let mut steps = 0usize;

        loop {
            let decl_id = match current {
                TypeExpr::Named(id) => *id,
                TypeExpr::Composition(members) => return Ok(TypeShape::Composition(members)),
                TypeExpr::Structural(name) => return Ok(TypeShape::Structural(name)),
                TypeExpr::Unresolved(_) => return Ok(TypeShape::Unresolved),
            };
            let decl = self.get(decl_id).ok_or(ExtractError::UnknownDecl(decl_id))?;

            match decl.kind {
                DeclKind::Protocol => return Ok(TypeShape::Interface(decl_id)),
                DeclKind::TypeAlias => {
                    steps += 1;
                    if steps > self.len() {
                        let alias = first_alias.unwrap_or(decl_id);
                        return Err(ExtractError::CyclicTypeAlias(self.decl(alias).name.clone()));
                    }
                    first_alias.get_or_insert(decl_id);
                    match &decl.aliased {
                        Some(target) => current = target,
                        None => return Ok(TypeShape::Unresolved),
                    }
                }
                _ => return Ok(TypeShape::Nominal(decl_id)),
            }
        }
    }

    /// Render a type expression for diagnostics.
    pub fn render_type(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(id) => self
                .get(*id)
                .map(|decl| decl.name.to_string())
                .unwrap_or_else(|| id.to_string()),
            TypeExpr::Composition(members) => members
                .iter()
                .map(|member| self.render_type(member))
                .collect::<Vec<_>>()
                .join(" & "),
            TypeExpr::Structural(name) | TypeExpr::Unresolved(name) => name.to_string(),
        }
    }
}
