//! DTO and input templates.
//!
//! All of these are engine-owned base modules: the entity object type, the
//! create/update inputs, the filter inputs, and the reference inputs that
//! relation fields pull into the owning entity's directory.

use gantry_schema::{Entity, Field, FieldType, Schema};

use crate::naming::{to_kebab_case, to_pascal_case};
use crate::type_map::TsField;
use crate::{CodeFile, Import};

use super::EntityNames;

/// Which GraphQL class decorator the template uses.
#[derive(Clone, Copy, PartialEq)]
enum DtoKind {
    ObjectType,
    InputType,
}

impl DtoKind {
    fn decorator(self) -> &'static str {
        match self {
            Self::ObjectType => "ObjectType",
            Self::InputType => "InputType",
        }
    }
}

/// One rendered property plus the imports it needs.
struct Property {
    block: String,
    gql_imports: Vec<&'static str>,
    validator_imports: Vec<String>,
    uses_json: bool,
}

fn scalar_property(field: &Field, optional: bool) -> Property {
    let ts = TsField::of(field);
    let mut lines = Vec::new();

    let nullable = if optional { ", { nullable: true }" } else { "" };
    lines.push(format!("  @Field(() => {}{nullable})", ts.gql_type));

    let mut validator_imports: Vec<String> = Vec::new();
    if optional {
        lines.push("  @IsOptional()".to_string());
        validator_imports.push("IsOptional".to_string());
    }
    for validator in &ts.validators {
        lines.push(format!("  {validator}"));
    }
    validator_imports.extend(ts.validator_imports.iter().map(|s| s.to_string()));

    let (marker, suffix) = if optional { ("?", " | null") } else { ("!", "") };
    lines.push(format!("  {}{marker}: {}{suffix};", field.name, ts.ts_type));

    let gql_imports = match ts.gql_type.as_str() {
        "ID" => vec!["ID"],
        "Int" => vec!["Int"],
        "Float" => vec!["Float"],
        _ => vec![],
    };

    Property {
        block: lines.join("\n"),
        gql_imports,
        validator_imports,
        uses_json: ts.gql_type == "GraphQLJSON",
    }
}

fn relation_property(field: &Field, class: &str, allow_multiple: bool, optional: bool) -> Property {
    let mut lines = Vec::new();
    let factory = if allow_multiple {
        format!("[{class}]")
    } else {
        class.to_string()
    };
    let nullable = if optional { ", { nullable: true }" } else { "" };
    lines.push(format!("  @Field(() => {factory}{nullable})"));

    let mut validator_imports = Vec::new();
    if optional {
        lines.push("  @IsOptional()".to_string());
        validator_imports.push("IsOptional".to_string());
    }
    lines.push("  @ValidateNested()".to_string());
    validator_imports.push("ValidateNested".to_string());

    let ts_type = if allow_multiple {
        format!("{class}[]")
    } else {
        class.to_string()
    };
    let (marker, suffix) = if optional { ("?", " | null") } else { ("!", "") };
    lines.push(format!("  {}{marker}: {ts_type}{suffix};", field.name));

    Property {
        block: lines.join("\n"),
        gql_imports: vec![],
        validator_imports,
        uses_json: false,
    }
}

fn assemble(class: &str, kind: DtoKind, properties: Vec<Property>, mut file: CodeFile) -> String {
    file = file.import(
        Import::new("@nestjs/graphql")
            .named("Field")
            .named(kind.decorator()),
    );

    let mut validator_names: Vec<String> = Vec::new();
    let mut uses_json = false;
    for property in &properties {
        for name in &property.gql_imports {
            file = file.import(Import::new("@nestjs/graphql").named(*name));
        }
        for name in &property.validator_imports {
            if !validator_names.contains(name) {
                validator_names.push(name.clone());
            }
        }
        uses_json |= property.uses_json;
    }
    if uses_json {
        file = file.import(Import::new("graphql-type-json").default("GraphQLJSON"));
    }
    if !validator_names.is_empty() {
        let mut import = Import::new("class-validator");
        for name in validator_names {
            import = import.named(name);
        }
        file = file.import(import);
    }

    let blocks: Vec<String> = properties.into_iter().map(|p| p.block).collect();
    let body = if blocks.is_empty() {
        format!("@{}()\nexport class {class} {{}}", kind.decorator())
    } else {
        format!(
            "@{}()\nexport class {class} {{\n{}\n}}",
            kind.decorator(),
            blocks.join("\n\n")
        )
    };

    file.section(body).render()
}

/// `<entity>/base/<Class>.ts`: the entity object type.
pub struct EntityDto<'a> {
    schema: &'a Schema,
    entity: &'a Entity,
}

impl<'a> EntityDto<'a> {
    pub fn new(schema: &'a Schema, entity: &'a Entity) -> Self {
        Self { schema, entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let mut file = CodeFile::new();
        let mut properties = Vec::new();

        for field in &self.entity.fields {
            if let FieldType::Lookup {
                related_entity_id,
                allow_multiple,
            } = &field.data_type
            {
                let Some(related) = self.schema.entity(related_entity_id) else {
                    continue;
                };
                let class = to_pascal_case(&related.name);
                if related.id != self.entity.id {
                    file = file.import(
                        Import::new(format!(
                            "../../{dir}/base/{class}",
                            dir = to_kebab_case(&related.name)
                        ))
                        .named(class.clone()),
                    );
                }
                properties.push(relation_property(
                    field,
                    &class,
                    *allow_multiple,
                    !field.required,
                ));
            } else {
                let optional = !field.required && !field.data_type.is_system();
                properties.push(scalar_property(field, optional));
            }
        }

        assemble(&n.class, DtoKind::ObjectType, properties, file)
    }
}

/// `<entity>/base/<Class>CreateInput.ts`.
pub struct CreateInput<'a> {
    schema: &'a Schema,
    entity: &'a Entity,
}

impl<'a> CreateInput<'a> {
    pub fn new(schema: &'a Schema, entity: &'a Entity) -> Self {
        Self { schema, entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        input_dto(
            self.schema,
            self.entity,
            format!("{}CreateInput", n.class),
            InputMode::Create,
        )
    }
}

/// `<entity>/base/<Class>UpdateInput.ts`: every property optional.
pub struct UpdateInput<'a> {
    schema: &'a Schema,
    entity: &'a Entity,
}

impl<'a> UpdateInput<'a> {
    pub fn new(schema: &'a Schema, entity: &'a Entity) -> Self {
        Self { schema, entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        input_dto(
            self.schema,
            self.entity,
            format!("{}UpdateInput", n.class),
            InputMode::Update,
        )
    }
}

#[derive(Clone, Copy, PartialEq)]
enum InputMode {
    Create,
    Update,
}

fn input_dto(schema: &Schema, entity: &Entity, class: String, mode: InputMode) -> String {
    let mut file = CodeFile::new();
    let mut properties = Vec::new();

    for field in &entity.fields {
        // System fields are engine-managed; clients never supply them.
        if field.data_type.is_system() {
            continue;
        }
        let optional = mode == InputMode::Update || !field.required;

        if let FieldType::Lookup {
            related_entity_id,
            allow_multiple,
        } = &field.data_type
        {
            let Some(related) = schema.entity(related_entity_id) else {
                continue;
            };
            let reference = format!("{}WhereUniqueInput", to_pascal_case(&related.name));
            file = file.import(Import::new(format!("./{reference}")).named(reference.clone()));
            properties.push(relation_property(field, &reference, *allow_multiple, optional));
        } else {
            properties.push(scalar_property(field, optional));
        }
    }

    assemble(&class, DtoKind::InputType, properties, file)
}

/// `<entity>/base/<Class>WhereInput.ts`: filter over searchable fields.
pub struct WhereInput<'a> {
    entity: &'a Entity,
}

impl<'a> WhereInput<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        let mut properties = Vec::new();

        for field in &self.entity.fields {
            let filterable = matches!(field.data_type, FieldType::Id) || field.searchable;
            let scalar = !matches!(field.data_type, FieldType::Lookup { .. } | FieldType::Json);
            if filterable && scalar {
                properties.push(scalar_property(field, true));
            }
        }

        assemble(
            &format!("{}WhereInput", n.class),
            DtoKind::InputType,
            properties,
            CodeFile::new(),
        )
    }
}

/// `<entity>/base/<Class>WhereUniqueInput.ts`: id reference.
pub struct WhereUniqueInput<'a> {
    entity: &'a Entity,
}

impl<'a> WhereUniqueInput<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn render(&self) -> String {
        let n = EntityNames::of(self.entity);
        reference_input(&n.class)
    }
}

/// `<owner>/base/<Related>WhereUniqueInput.ts`: the nested reference input
/// a relation field adds to the owning entity's directory.
pub struct RelationInput<'a> {
    related: &'a Entity,
}

impl<'a> RelationInput<'a> {
    pub fn new(related: &'a Entity) -> Self {
        Self { related }
    }

    pub fn render(&self) -> String {
        reference_input(&to_pascal_case(&self.related.name))
    }
}

fn reference_input(class: &str) -> String {
    let body = format!(
        concat!(
            "@InputType()\n",
            "export class {class}WhereUniqueInput {{\n",
            "  @Field(() => ID)\n",
            "  @IsString()\n",
            "  id!: string;\n",
            "}}"
        ),
        class = class,
    );

    CodeFile::new()
        .import(
            Import::new("@nestjs/graphql")
                .named("Field")
                .named("ID")
                .named("InputType"),
        )
        .import(Import::new("class-validator").named("IsString"))
        .section(body)
        .render()
}
