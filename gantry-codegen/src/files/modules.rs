//! NestJS module wiring templates.

use gantry_schema::{Entity, Schema};

use crate::{CodeFile, Import};

use super::EntityNames;

/// `<entity>/base/<entity>.module.base.ts`: regenerated every run.
pub struct ModuleBase<'a> {
    entity: &'a Entity,
}

impl<'a> ModuleBase<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;

        let body = format!(
            concat!(
                "@Module({{\n",
                "  imports: [PrismaModule],\n",
                "  exports: [PrismaModule],\n",
                "}})\n",
                "export class {class}ModuleBase {{}}"
            ),
            class = class,
        );

        CodeFile::new()
            .import(Import::new("@nestjs/common").named("Module"))
            .import(Import::new("../../prisma/prisma.module").named("PrismaModule"))
            .section(body)
            .render()
    }
}

/// `<entity>/<entity>.module.ts`: scaffolded once; providers users add
/// stay here.
pub struct ModuleWiring<'a> {
    entity: &'a Entity,
}

impl<'a> ModuleWiring<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;
        let dir = &n.dir;

        let body = format!(
            concat!(
                "@Module({{\n",
                "  imports: [{class}ModuleBase],\n",
                "  controllers: [{class}Controller],\n",
                "  providers: [{class}Service, {class}Resolver],\n",
                "  exports: [{class}Service],\n",
                "}})\n",
                "export class {class}Module {{}}"
            ),
            class = class,
        );

        CodeFile::new()
            .import(Import::new("@nestjs/common").named("Module"))
            .import(
                Import::new(format!("./base/{dir}.module.base"))
                    .named(format!("{class}ModuleBase")),
            )
            .import(Import::new(format!("./{dir}.service")).named(format!("{class}Service")))
            .import(Import::new(format!("./{dir}.controller")).named(format!("{class}Controller")))
            .import(Import::new(format!("./{dir}.resolver")).named(format!("{class}Resolver")))
            .section(body)
            .render()
    }
}

/// `app.module.ts`: regenerated every run; imports every entity module
/// plus the health surface.
pub struct AppModule<'a> {
    schema: &'a Schema,
}

impl<'a> AppModule<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn render(&self) -> String {
        let mut file = CodeFile::new().import(Import::new("@nestjs/common").named("Module"));

        let mut module_classes = Vec::new();
        for entity in &self.schema.entities {
            let n = EntityNames::of(entity);
            file = file.import(
                Import::new(format!("./{dir}/{dir}.module", dir = n.dir))
                    .named(format!("{}Module", n.class)),
            );
            module_classes.push(format!("{}Module", n.class));
        }
        file = file.import(Import::new("./health/health.module").named("HealthModule"));
        module_classes.push("HealthModule".to_string());

        let body = format!(
            concat!(
                "@Module({{\n",
                "  imports: [{imports}],\n",
                "}})\n",
                "export class AppModule {{}}"
            ),
            imports = module_classes.join(", "),
        );

        file.section(body).render()
    }
}
