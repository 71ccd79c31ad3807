//! Generated modules and the module set.

use indexmap::IndexMap;

use gantry_schema::{Fingerprint, Schema};

use crate::GenerateError;

/// Ownership class of a generated module, decided once by the emitter and
/// consumed verbatim by the delivery pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Engine-owned: fully regenerated from the schema on every run.
    Base,
    /// Scaffolded once; preserved whenever a remote copy already exists.
    Override,
}

/// One generated artifact: a repository-relative path and its full textual
/// body. `content: None` on a base module means the file is an intended
/// deletion; override modules are never emitted as deletions.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub path: String,
    pub content: Option<String>,
    pub provenance: Provenance,
}

impl Module {
    /// An engine-owned module, regenerated every run.
    pub fn base(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: Some(content.into()),
            provenance: Provenance::Base,
        }
    }

    /// An editable wrapper, scaffolded only when absent remotely.
    pub fn scaffold(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: Some(content.into()),
            provenance: Provenance::Override,
        }
    }

    /// An explicit file removal.
    pub fn removal(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: None,
            provenance: Provenance::Base,
        }
    }

    pub fn is_base(&self) -> bool {
        self.provenance == Provenance::Base
    }

    pub fn is_override(&self) -> bool {
        self.provenance == Provenance::Override
    }
}

/// The ordered, path-deduplicated output of one generation run.
///
/// Iteration order is entity declaration order, then template order, so the
/// commit content downstream is reproducible for identical schema input.
#[derive(Debug, Clone)]
pub struct ModuleSet {
    modules: IndexMap<String, Module>,
    /// Fingerprint of the schema that produced this set.
    pub fingerprint: Fingerprint,
    /// Application name; drives derived branch names and commit messages.
    pub app_name: String,
}

impl ModuleSet {
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn get(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Paths in iteration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

/// Accumulates modules across entities; the single serialization point of a
/// generation run. Duplicate detection needs one consistent view of all
/// paths, so parallel emitters merge here.
#[derive(Debug, Default)]
pub struct ModuleSetBuilder {
    modules: IndexMap<String, Module>,
}

impl ModuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly generated module. A repeated path is a fatal build
    /// error: it indicates a template resolution defect, never valid input.
    pub fn insert(&mut self, module: Module) -> Result<(), GenerateError> {
        if self.modules.contains_key(&module.path) {
            return Err(GenerateError::DuplicateModule { path: module.path });
        }
        self.modules.insert(module.path.clone(), module);
        Ok(())
    }

    /// Merge a hand-authored module over whatever is already present at its
    /// path. This is the one sanctioned way a later write wins.
    pub fn merge(&mut self, module: Module) {
        self.modules.insert(module.path.clone(), module);
    }

    pub fn finish(self, schema: &Schema) -> ModuleSet {
        ModuleSet {
            modules: self.modules,
            fingerprint: schema.fingerprint(),
            app_name: schema.app_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use gantry_schema::Schema;

    use super::*;

    fn schema() -> Schema {
        Schema::from_json_str(r#"{ "appName": "test", "entities": [] }"#).unwrap()
    }

    #[test]
    fn duplicate_path_is_fatal() {
        let mut builder = ModuleSetBuilder::new();
        builder
            .insert(Module::base("user/base/user.service.base.ts", "a"))
            .unwrap();
        let err = builder
            .insert(Module::base("user/base/user.service.base.ts", "b"))
            .unwrap_err();
        assert!(
            matches!(err, GenerateError::DuplicateModule { path } if path == "user/base/user.service.base.ts")
        );
    }

    #[test]
    fn merge_replaces_existing_content() {
        let mut builder = ModuleSetBuilder::new();
        builder.insert(Module::base("app.module.ts", "generated")).unwrap();
        builder.merge(Module::base("app.module.ts", "hand-authored"));

        let set = builder.finish(&schema());
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("app.module.ts").unwrap().content.as_deref(),
            Some("hand-authored")
        );
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut builder = ModuleSetBuilder::new();
        builder.insert(Module::base("b.ts", "")).unwrap();
        builder.insert(Module::base("a.ts", "")).unwrap();
        builder.insert(Module::base("c.ts", "")).unwrap();

        let set = builder.finish(&schema());
        let paths: Vec<_> = set.paths().collect();
        assert_eq!(paths, vec!["b.ts", "a.ts", "c.ts"]);
    }
}
