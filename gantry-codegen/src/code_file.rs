//! Structured TypeScript file assembly.
//!
//! Generated files have two parts: an import block and body sections,
//! rendered in order with blank lines between them. Keeping imports
//! structured (instead of inline strings) lets templates accumulate the
//! import edges relation fields introduce without duplicating them.

/// A TypeScript import statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    from: String,
    default: Option<String>,
    named: Vec<String>,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            named: Vec::new(),
        }
    }

    /// Import a default export.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    fn render(&self) -> String {
        match (&self.default, self.named.is_empty()) {
            (Some(def), true) => format!("import {} from \"{}\";", def, self.from),
            (Some(def), false) => format!(
                "import {}, {{ {} }} from \"{}\";",
                def,
                self.named.join(", "),
                self.from
            ),
            (None, false) => format!(
                "import {{ {} }} from \"{}\";",
                self.named.join(", "),
                self.from
            ),
            (None, true) => format!("import \"{}\";", self.from),
        }
    }
}

/// An importable file under assembly: imports first, then body sections.
#[derive(Debug, Default)]
pub struct CodeFile {
    imports: Vec<Import>,
    sections: Vec<String>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import, merging named specifiers when the source repeats.
    pub fn import(mut self, import: Import) -> Self {
        if let Some(existing) = self
            .imports
            .iter_mut()
            .find(|i| i.from == import.from && i.default == import.default)
        {
            for name in import.named {
                if !existing.named.contains(&name) {
                    existing.named.push(name);
                }
            }
        } else {
            self.imports.push(import);
        }
        self
    }

    /// Add a body section. Sections are separated by one blank line.
    pub fn section(mut self, body: impl Into<String>) -> Self {
        self.sections.push(body.into());
        self
    }

    /// Render the file with a trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for import in &self.imports {
            out.push_str(&import.render());
            out.push('\n');
        }
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 || !self.imports.is_empty() {
                out.push('\n');
            }
            out.push_str(section.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_imports_then_sections() {
        let file = CodeFile::new()
            .import(Import::new("@nestjs/common").named("Injectable"))
            .import(Import::new("./base/user.service.base").named("UserServiceBase"))
            .section("export class UserService extends UserServiceBase {}");

        assert_eq!(
            file.render(),
            "import { Injectable } from \"@nestjs/common\";\n\
             import { UserServiceBase } from \"./base/user.service.base\";\n\
             \n\
             export class UserService extends UserServiceBase {}\n"
        );
    }

    #[test]
    fn merges_repeated_import_sources() {
        let file = CodeFile::new()
            .import(Import::new("@nestjs/common").named("Get"))
            .import(Import::new("@nestjs/common").named("Post"))
            .import(Import::new("@nestjs/common").named("Get"));

        assert_eq!(
            file.render(),
            "import { Get, Post } from \"@nestjs/common\";\n"
        );
    }

    #[test]
    fn default_import_renders_alone() {
        let file = CodeFile::new().import(Import::new("express").default("express"));
        assert_eq!(file.render(), "import express from \"express\";\n");
    }
}
