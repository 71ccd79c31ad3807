//! REST controller templates.

use gantry_schema::Entity;

use crate::{CodeFile, Import};

use super::EntityNames;

/// `<entity>/base/<entity>.controller.base.ts`: regenerated every run.
pub struct ControllerBase<'a> {
    entity: &'a Entity,
}

impl<'a> ControllerBase<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;
        let dir = &n.dir;

        let body = format!(
            concat!(
                "export class {class}ControllerBase {{\n",
                "  constructor(protected readonly service: {class}Service) {{}}\n",
                "\n",
                "  @Post()\n",
                "  async create(@Body() data: {class}CreateInput): Promise<{class}> {{\n",
                "    return this.service.create(data);\n",
                "  }}\n",
                "\n",
                "  @Get()\n",
                "  async findMany(@Query() where?: {class}WhereInput): Promise<{class}[]> {{\n",
                "    return this.service.findMany(where);\n",
                "  }}\n",
                "\n",
                "  @Get(\":id\")\n",
                "  async findOne(@Param(\"id\") id: string): Promise<{class} | null> {{\n",
                "    return this.service.findOne({{ id }});\n",
                "  }}\n",
                "\n",
                "  @Patch(\":id\")\n",
                "  async update(@Param(\"id\") id: string, @Body() data: {class}UpdateInput): Promise<{class}> {{\n",
                "    return this.service.update({{ id }}, data);\n",
                "  }}\n",
                "\n",
                "  @Delete(\":id\")\n",
                "  async delete(@Param(\"id\") id: string): Promise<{class}> {{\n",
                "    return this.service.delete({{ id }});\n",
                "  }}\n",
                "}}"
            ),
            class = class,
        );

        CodeFile::new()
            .import(
                Import::new("@nestjs/common")
                    .named("Body")
                    .named("Delete")
                    .named("Get")
                    .named("Param")
                    .named("Patch")
                    .named("Post")
                    .named("Query"),
            )
            .import(Import::new(format!("../{dir}.service")).named(format!("{class}Service")))
            .import(Import::new(format!("./{class}")).named(class.clone()))
            .import(Import::new(format!("./{class}CreateInput")).named(format!("{class}CreateInput")))
            .import(Import::new(format!("./{class}UpdateInput")).named(format!("{class}UpdateInput")))
            .import(Import::new(format!("./{class}WhereInput")).named(format!("{class}WhereInput")))
            .section(body)
            .render()
    }
}

/// `<entity>/<entity>.controller.ts`: scaffolded once; route and guards
/// live here so user edits survive regeneration.
pub struct ControllerWrapper<'a> {
    entity: &'a Entity,
}

impl<'a> ControllerWrapper<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;
        let dir = &n.dir;
        let route = &n.route;

        let body = format!(
            concat!(
                "@Controller(\"{route}\")\n",
                "export class {class}Controller extends {class}ControllerBase {{\n",
                "  constructor(protected readonly service: {class}Service) {{\n",
                "    super(service);\n",
                "  }}\n",
                "}}"
            ),
            route = route,
            class = class,
        );

        CodeFile::new()
            .import(Import::new("@nestjs/common").named("Controller"))
            .import(Import::new(format!("./{dir}.service")).named(format!("{class}Service")))
            .import(
                Import::new(format!("./base/{dir}.controller.base"))
                    .named(format!("{class}ControllerBase")),
            )
            .section(body)
            .render()
    }
}
