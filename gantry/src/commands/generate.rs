use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use gantry_codegen::write_to_dir;
use gantry_schema::Schema;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the entity schema document
    #[arg(default_value = "schema.json")]
    pub schema: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated paths without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let schema = Schema::from_file(&self.schema).unwrap_or_exit();
        let set = gantry_codegen::generate(&schema).unwrap_or_exit();

        if self.dry_run {
            for module in set.iter() {
                println!("── {} ──", module.path);
                if let Some(content) = &module.content {
                    println!("{content}");
                }
            }
            println!("── Summary ──");
            println!("{} modules would be generated", set.len());
            return Ok(());
        }

        let summary = write_to_dir(&set, &self.output)
            .wrap_err("Failed to write generated modules")?;

        println!("{} (schema {})", set.app_name, set.fingerprint.short());
        println!();
        println!("Written: {} modules", summary.written.len());
        if !summary.skipped.is_empty() {
            println!("Preserved (already present):");
            for path in &summary.skipped {
                println!("  = {path}");
            }
        }
        if !summary.removed.is_empty() {
            println!("Removed:");
            for path in &summary.removed {
                println!("  - {path}");
            }
        }

        Ok(())
    }
}
