//! Health surface templates.
//!
//! Two read endpoints: `live` always reports OK, `ready` is gated on a
//! downstream connectivity check and returns a fixed SERVICE UNAVAILABLE
//! payload when that check fails.

/// `health/base/health.controller.base.ts`: regenerated every run.
pub fn controller_base() -> &'static str {
    concat!(
        "import { Get, HttpStatus, Res } from \"@nestjs/common\";\n",
        "import { Response } from \"express\";\n",
        "import { HealthService } from \"../health.service\";\n",
        "\n",
        "export class HealthControllerBase {\n",
        "  constructor(protected readonly healthService: HealthService) {}\n",
        "\n",
        "  @Get(\"live\")\n",
        "  healthLive(@Res() response: Response): Response<void> {\n",
        "    return response.status(HttpStatus.OK).send();\n",
        "  }\n",
        "\n",
        "  @Get(\"ready\")\n",
        "  async healthReady(@Res() response: Response): Promise<Response<void>> {\n",
        "    const dbConnection = await this.healthService.isDbReady();\n",
        "    if (!dbConnection) {\n",
        "      return response.status(HttpStatus.SERVICE_UNAVAILABLE).json({\n",
        "        status: \"SERVICE UNAVAILABLE\",\n",
        "        message: \"No connection to db\",\n",
        "      });\n",
        "    }\n",
        "    return response.status(HttpStatus.OK).send();\n",
        "  }\n",
        "}\n"
    )
}

/// `health/base/health.service.base.ts`: regenerated every run.
pub fn service_base() -> &'static str {
    concat!(
        "import { PrismaService } from \"../../prisma/prisma.service\";\n",
        "\n",
        "export class HealthServiceBase {\n",
        "  constructor(protected readonly prisma: PrismaService) {}\n",
        "\n",
        "  async isDbReady(): Promise<boolean> {\n",
        "    try {\n",
        "      await this.prisma.$queryRaw`SELECT 1`;\n",
        "      return true;\n",
        "    } catch (error) {\n",
        "      return false;\n",
        "    }\n",
        "  }\n",
        "}\n"
    )
}

/// `health/health.controller.ts`: scaffolded once.
pub fn controller() -> &'static str {
    concat!(
        "import { Controller } from \"@nestjs/common\";\n",
        "import { HealthControllerBase } from \"./base/health.controller.base\";\n",
        "import { HealthService } from \"./health.service\";\n",
        "\n",
        "@Controller(\"_health\")\n",
        "export class HealthController extends HealthControllerBase {\n",
        "  constructor(protected readonly healthService: HealthService) {\n",
        "    super(healthService);\n",
        "  }\n",
        "}\n"
    )
}

/// `health/health.service.ts`: scaffolded once.
pub fn service() -> &'static str {
    concat!(
        "import { Injectable } from \"@nestjs/common\";\n",
        "import { PrismaService } from \"../prisma/prisma.service\";\n",
        "import { HealthServiceBase } from \"./base/health.service.base\";\n",
        "\n",
        "@Injectable()\n",
        "export class HealthService extends HealthServiceBase {\n",
        "  constructor(protected readonly prisma: PrismaService) {\n",
        "    super(prisma);\n",
        "  }\n",
        "}\n"
    )
}

/// `health/health.module.ts`: regenerated every run.
pub fn module() -> &'static str {
    concat!(
        "import { Module } from \"@nestjs/common\";\n",
        "import { PrismaModule } from \"../prisma/prisma.module\";\n",
        "import { HealthController } from \"./health.controller\";\n",
        "import { HealthService } from \"./health.service\";\n",
        "\n",
        "@Module({\n",
        "  imports: [PrismaModule],\n",
        "  controllers: [HealthController],\n",
        "  providers: [HealthService],\n",
        "})\n",
        "export class HealthModule {}\n"
    )
}
