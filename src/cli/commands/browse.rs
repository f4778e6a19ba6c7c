//! Implementation of the `flowshelf browse` command.

use anyhow::Result;
use clap::Args;
use comfy_table::Cell;
use tracing::warn;

use crate::cli::context::{AppContext, GlobalOptions};
use crate::cli::display::{colorize_level, colorize_tier, list_table, render_list};
use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{AutomationCategory, FilterState, PriceRange, WorkflowRecord};
use crate::services::Facets;

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Case-insensitive text matched against name and action summary
    #[arg(short, long)]
    pub search: Option<String>,

    /// Departments to include (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub dept: Vec<String>,

    /// Automation levels to include: hitl, triggered, background
    #[arg(short, long, value_delimiter = ',', value_parser = parse_level)]
    pub level: Vec<AutomationCategory>,

    /// Platforms to include (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub platform: Vec<String>,

    /// Tiers to include, e.g. GEM, Standard
    #[arg(short, long, value_delimiter = ',')]
    pub tier: Vec<String>,

    /// Tags a workflow must carry at least one of
    #[arg(long, value_delimiter = ',')]
    pub tag: Vec<String>,

    /// Price range: any, free, paid
    #[arg(long, default_value = "any", value_parser = parse_price)]
    pub price: PriceRange,

    /// Maximum number of workflows to display
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,

    /// Also list the values available for each filter
    #[arg(long)]
    pub facets: bool,
}

impl BrowseArgs {
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            search: self.search.clone().unwrap_or_default(),
            departments: self.dept.iter().cloned().collect(),
            categories: self.level.iter().copied().collect(),
            platforms: self.platform.iter().cloned().collect(),
            tiers: self.tier.iter().cloned().collect(),
            price: self.price,
            tags: self.tag.iter().cloned().collect(),
        }
    }
}

pub fn parse_level(s: &str) -> Result<AutomationCategory, String> {
    AutomationCategory::from_str(s)
        .ok_or_else(|| format!("unknown level '{s}' (expected hitl, triggered or background)"))
}

fn parse_price(s: &str) -> Result<PriceRange, String> {
    PriceRange::from_str(s)
        .ok_or_else(|| format!("unknown price range '{s}' (expected any, free or paid)"))
}

#[derive(Debug, serde::Serialize)]
pub struct BrowseOutput {
    /// Matches before `--limit` was applied
    pub total: usize,
    pub records: Vec<WorkflowRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Facets>,
}

impl CommandOutput for BrowseOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["ID", "Name", "Dept", "Level", "Platform", "Tier", "Price"]);
        for record in &self.records {
            table.add_row(vec![
                Cell::new(record.id),
                Cell::new(truncate(&record.name, 40)),
                Cell::new(&record.department),
                Cell::new(colorize_level(record.category)),
                Cell::new(record.platform_label()),
                Cell::new(colorize_tier(record.tier_label())),
                Cell::new(price_label(record)),
            ]);
        }

        let mut rendered = render_list("workflow", table, self.records.len());
        if self.total > self.records.len() {
            rendered.push_str(&format!(
                "\n\nShowing {} of {} matches. Use --limit to see more.",
                self.records.len(),
                self.total
            ));
        }
        if let Some(facets) = &self.facets {
            rendered.push_str(&render_facets(facets));
        }
        rendered
    }
}

fn price_label(record: &WorkflowRecord) -> String {
    if record.is_free() {
        "Free".to_string()
    } else {
        format!("${:.2}", record.effective_price())
    }
}

fn render_facets(facets: &Facets) -> String {
    let join = |values: &std::collections::BTreeSet<String>| {
        values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    };
    let levels = AutomationCategory::ALL
        .iter()
        .map(AutomationCategory::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "\n\nDepartments: {}\nLevels:      {levels}\nPlatforms:   {}\nTiers:       {}\n\
         Tags:        {}",
        join(&facets.departments),
        join(&facets.platforms),
        join(&facets.tiers),
        join(&facets.tags),
    )
}

pub async fn execute(args: BrowseArgs, options: &GlobalOptions) -> Result<()> {
    let config = options.load_config()?;
    let context = AppContext::build(options, config)?;

    if context.remote_configured {
        // A failed refresh still leaves the static catalog browsable.
        if let Err(e) = context.catalog.refresh().await {
            warn!(error = %e, "Showing catalog without user-authored workflows");
        }
    }

    let filter = args.filter_state();
    let mut records = context.catalog.query(&filter).await;
    let total = records.len();
    records.truncate(args.limit);

    let facets = if args.facets {
        Some(context.catalog.facets().await)
    } else {
        None
    };

    output(
        &BrowseOutput {
            total,
            records,
            facets,
        },
        options.json,
    );
    Ok(())
}
