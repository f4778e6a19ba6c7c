//! Implementation of the `flowshelf delete` command.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::context::{AppContext, GlobalOptions};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::RecordId;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Saved workflow id, e.g. db-12
    pub id: RecordId,
}

#[derive(Debug, serde::Serialize)]
pub struct DeleteOutput {
    pub success: bool,
    pub id: RecordId,
    pub message: String,
}

impl CommandOutput for DeleteOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

pub async fn execute(args: DeleteArgs, options: &GlobalOptions) -> Result<()> {
    let Some(row) = args.id.remote_row() else {
        anyhow::bail!(
            "Workflow {} is part of the built-in catalog and cannot be deleted",
            args.id
        );
    };

    let config = options.load_config()?;
    let context = AppContext::build(options, config)?;
    context.require_writable_store()?;

    context
        .store()
        .delete(&context.session, row)
        .await
        .with_context(|| format!("Failed to delete workflow {}", args.id))?;

    output(
        &DeleteOutput {
            success: true,
            id: args.id,
            message: format!("Workflow {} deleted.", args.id),
        },
        options.json,
    );
    Ok(())
}
