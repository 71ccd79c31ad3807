use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use gantry_schema::Schema;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the entity schema document
    #[arg(default_value = "schema.json")]
    pub schema: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let schema = Schema::from_file(&self.schema).unwrap_or_exit();

        println!("{} (schema {})", schema.app_name, schema.fingerprint().short());
        println!();
        println!("Entities ({}):", schema.entities.len());
        for entity in &schema.entities {
            println!("  {} ({} fields)", entity.name, entity.fields.len());
            for field in &entity.fields {
                let mut flags = Vec::new();
                if field.required {
                    flags.push("required");
                }
                if field.unique {
                    flags.push("unique");
                }
                if field.searchable {
                    flags.push("searchable");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };
                println!("    {}: {}{}", field.name, field.data_type.name(), flags);
            }
        }
        println!();
        println!("Schema is valid.");

        Ok(())
    }
}
