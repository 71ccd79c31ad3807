//! GraphQL resolver templates.

use gantry_schema::Entity;

use crate::{CodeFile, Import};

use super::EntityNames;

/// `<entity>/base/<entity>.resolver.base.ts`: regenerated every run.
pub struct ResolverBase<'a> {
    entity: &'a Entity,
}

impl<'a> ResolverBase<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;
        let dir = &n.dir;
        let var = &n.var;
        let plural_var = &n.plural_var;

        let body = format!(
            concat!(
                "export class {class}ResolverBase {{\n",
                "  constructor(protected readonly service: {class}Service) {{}}\n",
                "\n",
                "  @Query(() => [{class}])\n",
                "  async {plural_var}(@Args(\"where\", {{ nullable: true }}) where?: {class}WhereInput): Promise<{class}[]> {{\n",
                "    return this.service.findMany(where);\n",
                "  }}\n",
                "\n",
                "  @Query(() => {class}, {{ nullable: true }})\n",
                "  async {var}(@Args(\"where\") where: {class}WhereUniqueInput): Promise<{class} | null> {{\n",
                "    return this.service.findOne(where);\n",
                "  }}\n",
                "\n",
                "  @Mutation(() => {class})\n",
                "  async create{class}(@Args(\"data\") data: {class}CreateInput): Promise<{class}> {{\n",
                "    return this.service.create(data);\n",
                "  }}\n",
                "\n",
                "  @Mutation(() => {class})\n",
                "  async update{class}(\n",
                "    @Args(\"where\") where: {class}WhereUniqueInput,\n",
                "    @Args(\"data\") data: {class}UpdateInput\n",
                "  ): Promise<{class}> {{\n",
                "    return this.service.update(where, data);\n",
                "  }}\n",
                "\n",
                "  @Mutation(() => {class})\n",
                "  async delete{class}(@Args(\"where\") where: {class}WhereUniqueInput): Promise<{class}> {{\n",
                "    return this.service.delete(where);\n",
                "  }}\n",
                "}}"
            ),
            class = class,
            var = var,
            plural_var = plural_var,
        );

        CodeFile::new()
            .import(
                Import::new("@nestjs/graphql")
                    .named("Args")
                    .named("Mutation")
                    .named("Query"),
            )
            .import(Import::new(format!("../{dir}.service")).named(format!("{class}Service")))
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

/// `<entity>/<entity>.resolver.ts`: scaffolded once, user-extendable.
pub struct ResolverWrapper<'a> {
    entity: &'a Entity,
}

impl<'a> ResolverWrapper<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let class = &n.class;
        let dir = &n.dir;

        let body = format!(
            concat!(
                "@Resolver(() => {class})\n",
                "export class {class}Resolver extends {class}ResolverBase {{\n",
                "  constructor(protected readonly service: {class}Service) {{\n",
                "    super(service);\n",
                "  }}\n",
                "}}"
            ),
            class = class,
        );

        CodeFile::new()
            .import(Import::new("@nestjs/graphql").named("Resolver"))
            .import(Import::new(format!("./{dir}.service")).named(format!("{class}Service")))
            .import(Import::new(format!("./base/{class}")).named(class.clone()))
            .import(
                Import::new(format!("./base/{dir}.resolver.base"))
                    .named(format!("{class}ResolverBase")),
            )
            .section(body)
            .render()
    }
}
