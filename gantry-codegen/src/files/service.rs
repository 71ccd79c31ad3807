//! Service templates: engine-owned base class and editable wrapper.

use gantry_schema::Entity;

use crate::{CodeFile, Import};

use super::EntityNames;

/// `<entity>/base/<entity>.service.base.ts`: regenerated every run.
pub struct ServiceBase<'a> {
    entity: &'a Entity,
}

impl<'a> ServiceBase<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;
        let var = &n.var;

        let body = format!(
            concat!(
                "export class {class}ServiceBase {{\n",
                "  constructor(protected readonly prisma: PrismaService) {{}}\n",
                "\n",
                "  async findMany(where?: {class}WhereInput): Promise<{class}[]> {{\n",
                "    return this.prisma.{var}.findMany({{ where }});\n",
                "  }}\n",
                "\n",
                "  async findOne(where: {class}WhereUniqueInput): Promise<{class} | null> {{\n",
                "    return this.prisma.{var}.findUnique({{ where }});\n",
                "  }}\n",
                "\n",
                "  async create(data: {class}CreateInput): Promise<{class}> {{\n",
                "    return this.prisma.{var}.create({{ data }});\n",
                "  }}\n",
                "\n",
                "  async update(where: {class}WhereUniqueInput, data: {class}UpdateInput): Promise<{class}> {{\n",
                "    return this.prisma.{var}.update({{ where, data }});\n",
                "  }}\n",
                "\n",
                "  async delete(where: {class}WhereUniqueInput): Promise<{class}> {{\n",
                "    return this.prisma.{var}.delete({{ where }});\n",
                "  }}\n",
                "}}"
            ),
            class = class,
            var = var,
        );

        CodeFile::new()
            .import(Import::new("../../prisma/prisma.service").named("PrismaService"))
            .import(Import::new(format!("./{class}")).named(class.clone()))
            .import(Import::new(format!("./{class}CreateInput")).named(format!("{class}CreateInput")))
            .import(Import::new(format!("./{class}UpdateInput")).named(format!("{class}UpdateInput")))
            .import(Import::new(format!("./{class}WhereInput")).named(format!("{class}WhereInput")))
            .import(
                Import::new(format!("./{class}WhereUniqueInput"))
                    .named(format!("{class}WhereUniqueInput")),
            )
            .section(body)
            .render()
    }
}

/// `<entity>/<entity>.service.ts`: scaffolded once, user-extendable.
pub struct ServiceWrapper<'a> {
    entity: &'a Entity,
}

impl<'a> ServiceWrapper<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;
        let dir = &n.dir;

        let body = format!(
            concat!(
                "@Injectable()\n",
                "export class {class}Service extends {class}ServiceBase {{\n",
                "  constructor(protected readonly prisma: PrismaService) {{\n",
                "    super(prisma);\n",
                "  }}\n",
                "}}"
            ),
            class = class,
        );

        CodeFile::new()
            .import(Import::new("@nestjs/common").named("Injectable"))
            .import(Import::new("../prisma/prisma.service").named("PrismaService"))
            .import(
                Import::new(format!("./base/{dir}.service.base"))
                    .named(format!("{class}ServiceBase")),
            )
            .section(body)
            .render()
    }
}
