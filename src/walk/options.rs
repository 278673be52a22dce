//! Extraction configuration.

use indexmap::{IndexMap, IndexSet};

use crate::base::{DeclId, ModuleId, TargetPlatform};

/// Configuration for one extraction run.
///
/// ```ignore
/// let options = ExtractOptions::new(app)
///     .with_exported_module(vendored)
///     .with_extension_block_symbols(true);
/// ```
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// The module under inspection.
    pub module: ModuleId,
    /// Modules whose whole public surface is re-exported.
    pub exported_imported_modules: Vec<ModuleId>,
    /// Individually re-exported declarations, per source module.
    pub qualified_exported_imports: IndexMap<ModuleId, IndexSet<DeclId>>,
    /// Record extensions of foreign types as first-class nodes.
    pub emit_extension_block_symbols: bool,
    /// For a cross-import overlay: the module it declares itself as extending.
    pub declaring_module: Option<ModuleId>,
    /// Platform used for availability pruning. `None` disables pruning.
    pub target: Option<TargetPlatform>,
}

impl ExtractOptions {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            exported_imported_modules: Vec::new(),
            qualified_exported_imports: IndexMap::new(),
            emit_extension_block_symbols: false,
            declaring_module: None,
            target: None,
        }
    }

    pub fn with_exported_module(mut self, module: ModuleId) -> Self {
        if !self.exported_imported_modules.contains(&module) {
            self.exported_imported_modules.push(module);
        }
        self
    }

    pub fn with_qualified_export(mut self, module: ModuleId, decl: DeclId) -> Self {
        self.qualified_exported_imports
            .entry(module)
            .or_default()
            .insert(decl);
        self
    }

    pub fn with_extension_block_symbols(mut self, enabled: bool) -> Self {
        self.emit_extension_block_symbols = enabled;
        self
    }

    pub fn with_declaring_module(mut self, module: ModuleId) -> Self {
        self.declaring_module = Some(module);
        self
    }

    pub fn with_target(mut self, target: TargetPlatform) -> Self {
        self.target = Some(target);
        self
    }
}
