//! Implementation of the `flowshelf draft` command.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tracing::info;

use super::browse::parse_level;
use crate::cli::context::{AppContext, GlobalOptions};
use crate::cli::display::DetailView;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{
    AutomationCategory, DraftRequest, DraftResult, RecordId, WorkflowFormData,
    CANONICAL_WORKSPACE_PLATFORM,
};

/// Department preselected in the studio.
const DEFAULT_DEPARTMENT: &str = "Sales";

#[derive(Args, Debug)]
pub struct DraftArgs {
    /// What the workflow should do, in plain words
    #[arg(required_unless_present = "trigger", conflicts_with_all = ["trigger", "action"])]
    pub intent: Option<String>,

    /// Event that starts the workflow ("when ...")
    #[arg(long, requires = "action")]
    pub trigger: Option<String>,

    /// What happens next ("then ...")
    #[arg(long, requires = "trigger")]
    pub action: Option<String>,

    /// Department the workflow serves
    #[arg(short, long, default_value = DEFAULT_DEPARTMENT)]
    pub dept: String,

    /// Automation level: hitl, triggered, background
    #[arg(short, long, default_value = "hitl", value_parser = parse_level)]
    pub level: AutomationCategory,

    /// Integration tools, in order (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tools: Vec<String>,

    /// Target platform
    #[arg(short, long, default_value = CANONICAL_WORKSPACE_PLATFORM)]
    pub platform: String,

    /// Save the draft to your library
    #[arg(long)]
    pub save: bool,
}

impl DraftArgs {
    pub fn request(&self) -> DraftRequest {
        let request = match (&self.trigger, &self.action) {
            (Some(trigger), Some(action)) => {
                DraftRequest::from_studio(trigger.as_str(), action.as_str(), self.dept.as_str())
            }
            _ => DraftRequest::new(self.intent.clone().unwrap_or_default(), self.dept.as_str()),
        };
        request
            .with_level(self.level)
            .with_tools(self.tools.clone())
            .with_platform(self.platform.as_str())
    }
}

#[derive(Debug, serde::Serialize)]
pub struct DraftOutput {
    pub draft: DraftResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_id: Option<RecordId>,
}

impl CommandOutput for DraftOutput {
    fn to_human(&self) -> String {
        let title = if self.draft.title.is_empty() {
            "Untitled draft"
        } else {
            self.draft.title.as_str()
        };
        let mut view = DetailView::new(title)
            .field_opt(
                "Description",
                Some(self.draft.description.as_str()).filter(|d| !d.is_empty()),
            )
            .field_opt("Platform", self.draft.platform.as_deref())
            .section("Steps");
        for step in &self.draft.steps {
            view = view.item(step);
        }
        if let Some(prompt) = &self.draft.implementation_prompt {
            view = view.section("Implementation prompt").field("Prompt", prompt);
        }

        let mut rendered = view.render();
        if let Some(id) = self.saved_id {
            rendered.push_str(&format!(
                "\n\n{} Saved as {}",
                style("✓").green(),
                style(id).bold()
            ));
        }
        rendered
    }
}

pub async fn execute(args: DraftArgs, options: &GlobalOptions) -> Result<()> {
    let config = options.load_config()?;
    let context = AppContext::build(options, config)?;
    if args.save {
        // Fail before spending a generation call on a draft that cannot be kept.
        context.require_writable_store()?;
    }

    let request = args.request();
    let generator = context.draft_generator()?;
    let draft = generator
        .generate(&request)
        .await
        .context("Failed to generate a workflow draft")?;

    let saved_id = if args.save {
        let form = WorkflowFormData::from_draft(&draft, &request);
        let row = context
            .store()
            .insert(&context.session, &form)
            .await
            .context("Failed to save the draft")?;
        info!(row, "Draft saved");
        Some(RecordId::Remote(row))
    } else {
        None
    };

    output(&DraftOutput { draft, saved_id }, options.json);
    Ok(())
}
