//! Prisma wiring templates, referenced by every entity module.

/// `prisma/prisma.service.ts`: regenerated every run.
pub fn service() -> &'static str {
    concat!(
        "import { Injectable, OnModuleInit } from \"@nestjs/common\";\n",
        "import { PrismaClient } from \"@prisma/client\";\n",
        "\n",
        "@Injectable()\n",
        "export class PrismaService extends PrismaClient implements OnModuleInit {\n",
        "  async onModuleInit(): Promise<void> {\n",
        "    await this.$connect();\n",
        "  }\n",
        "}\n"
    )
}

/// `prisma/prisma.module.ts`: regenerated every run.
pub fn module() -> &'static str {
    concat!(
        "import { Global, Module } from \"@nestjs/common\";\n",
        "import { PrismaService } from \"./prisma.service\";\n",
        "\n",
        "@Global()\n",
        "@Module({\n",
        "  providers: [PrismaService],\n",
        "  exports: [PrismaService],\n",
        "})\n",
        "export class PrismaModule {}\n"
    )
}
