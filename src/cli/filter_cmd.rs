//! Filter CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{filter_pool, ActiveFilters, FilterTag};
use crate::storage::Project;

#[derive(Subcommand)]
pub enum FilterCommands {
    /// Show which categories are active
    Show,

    /// Turn a category on or off
    ///
    /// Restaurants tagged dine-in-or-takeout stay in the pool while either
    /// dine-in or takeout is on.
    Toggle {
        /// dine-in, takeout, or fast-food
        tag: FilterTag,
    },

    /// Turn every category back on
    Reset,
}

pub fn run(cmd: FilterCommands, output: &Output) -> Result<()> {
    match cmd {
        FilterCommands::Show => show(output),
        FilterCommands::Toggle { tag } => toggle(output, tag),
        FilterCommands::Reset => reset(output),
    }
}

fn show(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    report(output, &project, None)
}

fn toggle(output: &Output, tag: FilterTag) -> Result<()> {
    let mut project = Project::open_current()?;

    let active = project.config_mut().project.filters.active.toggle(tag);
    project.config().save_project()?;
    output.verbose_ctx("filter", &format!("{} is now {}", tag.as_str(), on_off(active)));

    if output.is_text() {
        output.success(&format!("{} turned {}", tag, on_off(active)));
    }
    report(output, &project, Some(tag))
}

fn reset(output: &Output) -> Result<()> {
    let mut project = Project::open_current()?;

    project.config_mut().project.filters.active = ActiveFilters::all();
    project.config().save_project()?;

    if output.is_text() {
        output.success("All categories turned on");
    }
    report(output, &project, None)
}

fn on_off(active: bool) -> &'static str {
    if active {
        "on"
    } else {
        "off"
    }
}

fn report(output: &Output, project: &Project, toggled: Option<FilterTag>) -> Result<()> {
    let filters = &project.config().project.filters.active;
    let restaurants = project.restaurant_store().read_all()?;
    let eligible = filter_pool(&restaurants, filters).len();

    if output.is_json() {
        let tags: Vec<_> = FilterTag::ALL
            .iter()
            .map(|tag| {
                serde_json::json!({
                    "tag": tag,
                    "label": tag.label(),
                    "active": filters.contains(*tag),
                })
            })
            .collect();
        output.data(&serde_json::json!({
            "filters": tags,
            "toggled": toggled,
            "eligible": eligible,
            "total": restaurants.len(),
        }));
    } else {
        for tag in FilterTag::ALL {
            let mark = if filters.contains(tag) { "[x]" } else { "[ ]" };
            println!("{} {}", mark, tag);
        }
        println!("{} of {} restaurant(s) eligible", eligible, restaurants.len());
    }

    Ok(())
}
