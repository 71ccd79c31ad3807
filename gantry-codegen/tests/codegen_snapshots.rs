//! Snapshot tests for generated server modules.
//!
//! These pin the exact content of representative generated files. Run
//! `cargo insta review` to update snapshots after intentional template
//! changes.

use gantry_codegen::generate;
use gantry_schema::Schema;

fn user_schema() -> Schema {
    Schema::from_json_str(
        r#"{
            "appName": "crm",
            "entities": [{
                "id": "e-user",
                "name": "User",
                "displayName": "User",
                "fields": [
                    { "id": "f-id", "name": "id", "dataType": "id" },
                    { "id": "f-name", "name": "name", "dataType": "singleLineText" },
                    { "id": "f-email", "name": "email", "dataType": "email", "required": true }
                ]
            }]
        }"#,
    )
    .unwrap()
}

fn module_content(schema: &Schema, path: &str) -> String {
    let set = generate(schema).unwrap();
    set.get(path)
        .unwrap_or_else(|| panic!("no module at {path}"))
        .content
        .clone()
        .expect("module has content")
}

#[test]
fn user_entity_dto() {
    let content = module_content(&user_schema(), "user/base/User.ts");
    insta::assert_snapshot!(content, @r#"
import { Field, ObjectType, ID } from "@nestjs/graphql";
import { IsString, IsOptional, IsEmail } from "class-validator";

@ObjectType()
export class User {
  @Field(() => ID)
  @IsString()
  id!: string;

  @Field(() => String, { nullable: true })
  @IsOptional()
  @IsString()
  name?: string | null;

  @Field(() => String)
  @IsEmail()
  email!: string;
}
"#);
}

#[test]
fn user_service_wrapper() {
    let content = module_content(&user_schema(), "user/user.service.ts");
    insta::assert_snapshot!(content, @r#"
import { Injectable } from "@nestjs/common";
import { PrismaService } from "../prisma/prisma.service";
import { UserServiceBase } from "./base/user.service.base";

@Injectable()
export class UserService extends UserServiceBase {
  constructor(protected readonly prisma: PrismaService) {
    super(prisma);
  }
}
"#);
}

#[test]
fn health_controller_base() {
    let content = module_content(&user_schema(), "health/base/health.controller.base.ts");
    insta::assert_snapshot!(content, @r#"
import { Get, HttpStatus, Res } from "@nestjs/common";
import { Response } from "express";
import { HealthService } from "../health.service";

export class HealthControllerBase {
  constructor(protected readonly healthService: HealthService) {}

  @Get("live")
  healthLive(@Res() response: Response): Response<void> {
    return response.status(HttpStatus.OK).send();
  }

  @Get("ready")
  async healthReady(@Res() response: Response): Promise<Response<void>> {
    const dbConnection = await this.healthService.isDbReady();
    if (!dbConnection) {
      return response.status(HttpStatus.SERVICE_UNAVAILABLE).json({
        status: "SERVICE UNAVAILABLE",
        message: "No connection to db",
      });
    }
    return response.status(HttpStatus.OK).send();
  }
}
"#);
}

#[test]
fn module_paths_follow_declaration_then_template_order() {
    let set = generate(&user_schema()).unwrap();
    let paths: Vec<&str> = set.paths().collect();

    assert_eq!(
        paths,
        vec![
            "user/base/User.ts",
            "user/base/UserCreateInput.ts",
            "user/base/UserUpdateInput.ts",
            "user/base/UserWhereInput.ts",
            "user/base/UserWhereUniqueInput.ts",
            "user/base/user.service.base.ts",
            "user/user.service.ts",
            "user/base/user.controller.base.ts",
            "user/user.controller.ts",
            "user/base/user.resolver.base.ts",
            "user/user.resolver.ts",
            "user/base/user.module.base.ts",
            "user/user.module.ts",
            "prisma/prisma.service.ts",
            "prisma/prisma.module.ts",
            "health/base/health.controller.base.ts",
            "health/base/health.service.base.ts",
            "health/health.controller.ts",
            "health/health.service.ts",
            "health/health.module.ts",
            "app.module.ts",
        ]
    );
}

#[test]
fn relation_fields_add_reference_inputs_and_import_edges() {
    let schema = Schema::from_json_str(
        r#"{
            "appName": "shop",
            "entities": [
                { "id": "e-customer", "name": "Customer", "displayName": "Customer",
                  "fields": [{ "id": "f-id", "name": "id", "dataType": "id" }] },
                { "id": "e-order", "name": "Order", "displayName": "Order",
                  "fields": [
                    { "id": "f-id", "name": "id", "dataType": "id" },
                    { "id": "f-cust", "name": "customer", "dataType": "lookup",
                      "properties": { "relatedEntityId": "e-customer" }, "required": true }
                  ] }
            ]
        }"#,
    )
    .unwrap();
    let set = generate(&schema).unwrap();

    // The relation adds a reference input in the owning entity's directory.
    let reference = set
        .get("order/base/CustomerWhereUniqueInput.ts")
        .expect("relation reference input");
    assert!(reference.is_base());

    // The entity DTO gains an import edge to the related entity's module.
    let dto = module_content(&schema, "order/base/Order.ts");
    assert!(dto.contains("import { Customer } from \"../../customer/base/Customer\";"));
    assert!(dto.contains("customer!: Customer;"));

    // The create input references the relation by unique id.
    let create = module_content(&schema, "order/base/OrderCreateInput.ts");
    assert!(create.contains("import { CustomerWhereUniqueInput } from \"./CustomerWhereUniqueInput\";"));
    assert!(create.contains("customer!: CustomerWhereUniqueInput;"));
}
