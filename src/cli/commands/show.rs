//! Implementation of the `flowshelf show` command.

use anyhow::Result;
use clap::Args;
use tracing::warn;

use crate::cli::context::{AppContext, GlobalOptions};
use crate::cli::display::{colorize_level, colorize_tier, DetailView};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{RecordId, WorkflowRecord};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Workflow id: a catalog number or db-<row> for saved workflows
    pub id: RecordId,
}

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub struct ShowOutput {
    pub record: WorkflowRecord,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let r = &self.record;
        let price = if r.is_free() {
            "Free".to_string()
        } else {
            format!("${:.2}", r.effective_price())
        };
        let tools = r.tools.join(", ");
        let tags = r.tags.join(" ");
        let created = r.created_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string());

        let mut view = DetailView::new(&r.name)
            .field("ID", &r.id.to_string())
            .field_opt("Action", Some(r.summary.as_str()).filter(|s| !s.is_empty()))
            .field("Department", &r.department)
            .field("Level", &format!("{} ({})", colorize_level(r.category), r.category.label()))
            .field("Platform", r.platform_label())
            .field("Tier", &colorize_tier(r.tier_label()).to_string())
            .field("Price", &price)
            .field_opt("Trigger", r.trigger.as_deref())
            .field_opt("Tools", Some(tools.as_str()).filter(|s| !s.is_empty()))
            .field_opt("Tags", Some(tags.as_str()).filter(|s| !s.is_empty()))
            .field_opt("Complexity", r.complexity.as_deref())
            .field_opt("Time saved", r.time_saved.as_deref())
            .field_opt("Owner", r.owner.as_deref())
            .field_opt("Created", created.as_deref())
            .field_opt("Tip", r.tip.as_deref())
            .section("Steps");
        for step in &r.steps {
            view = view.item(step);
        }
        view.render()
    }
}

pub async fn execute(args: ShowArgs, options: &GlobalOptions) -> Result<()> {
    let config = options.load_config()?;
    let context = AppContext::build(options, config)?;

    if matches!(args.id, RecordId::Remote(_)) && context.remote_configured {
        if let Err(e) = context.catalog.refresh().await {
            warn!(error = %e, "Could not refresh saved workflows");
        }
    }

    let record = context
        .catalog
        .find(&args.id)
        .await
        .ok_or_else(|| anyhow::anyhow!("Workflow not found: {}", args.id))?;

    output(&ShowOutput { record }, options.json);
    Ok(())
}
