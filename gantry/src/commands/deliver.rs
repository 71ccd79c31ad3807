use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use gantry_git::{DeliveryOutcome, DeliveryPipeline, GithubProvider};
use gantry_schema::Schema;

use crate::config::Settings;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct DeliverCommand {
    /// Path to the entity schema document
    #[arg(default_value = "schema.json")]
    pub schema: PathBuf,

    /// Path to the delivery settings
    #[arg(short, long, default_value = "gantry.toml")]
    pub config: PathBuf,
}

impl DeliverCommand {
    pub fn run(&self) -> Result<()> {
        let schema = Schema::from_file(&self.schema).unwrap_or_exit();
        let settings = Settings::from_file(&self.config).unwrap_or_exit();
        let auth = settings.auth_from_env().unwrap_or_exit();

        let set = gantry_codegen::generate(&schema).unwrap_or_exit();
        let repo = settings.repo_ref();
        let pipeline = DeliveryPipeline::new(GithubProvider::new(), settings.delivery_config());

        let runtime = tokio::runtime::Runtime::new().wrap_err("Failed to start async runtime")?;
        let outcome = runtime
            .block_on(pipeline.deliver(&set, &repo, &auth))
            .wrap_err_with(|| format!("Delivery to {repo} failed"))?;

        match outcome {
            DeliveryOutcome::Delivered(handle) => {
                println!("Opened pull request #{}: {}", handle.number, handle.url);
            }
            DeliveryOutcome::NoChanges => {
                println!("Nothing to deliver; the repository already matches the schema.");
            }
        }

        Ok(())
    }
}
