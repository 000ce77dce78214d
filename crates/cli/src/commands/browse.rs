use std::path::PathBuf;

use catalog_core::config::{AppConfig, LoadOptions, OutputFormat};
use catalog_core::{CategoryId, FilterEvent, UserId, ViewSnapshot};
use clap::Args;

use crate::commands::{load_view, CommandResult};

#[derive(Debug, Clone, Default, Args)]
pub struct BrowseArgs {
    #[arg(long, help = "Dataset file (.json or .toml); defaults to the configured or demo dataset")]
    pub dataset: Option<PathBuf>,
    #[arg(long, help = "Select a user by id (selecting it twice clears the selection)")]
    pub user: Option<u32>,
    #[arg(long = "category", help = "Toggle a category by id; repeatable")]
    pub categories: Vec<u32>,
    #[arg(long, help = "Case-insensitive product name search")]
    pub query: Option<String>,
    #[arg(long, help = "Return to the \"all categories\" selection after --category toggles")]
    pub all_categories: bool,
    #[arg(
        long = "event",
        value_parser = parse_event,
        help = "Replay a filter event after the flags above; repeatable \
                (user:ID, all-users, category:ID, all-categories, search:TEXT, clear-search, reset)"
    )]
    pub events: Vec<FilterEvent>,
    #[arg(long, help = "Emit the view snapshot as JSON")]
    pub json: bool,
}

impl BrowseArgs {
    /// Flags first in a fixed order (user, category toggles, all-categories, query), then explicit
    /// events in the order given.
    pub fn filter_events(&self) -> Vec<FilterEvent> {
        let mut events = Vec::new();
        if let Some(user_id) = self.user {
            events.push(FilterEvent::SelectUser(UserId(user_id)));
        }
        for category_id in &self.categories {
            events.push(FilterEvent::ToggleCategory(CategoryId(*category_id)));
        }
        if self.all_categories {
            events.push(FilterEvent::SelectAllCategories);
        }
        if let Some(query) = &self.query {
            events.push(FilterEvent::SetSearchQuery(query.clone()));
        }
        events.extend(self.events.iter().cloned());
        events
    }
}

pub fn parse_event(raw: &str) -> Result<FilterEvent, String> {
    match raw {
        "all-users" => return Ok(FilterEvent::ClearUser),
        "clear-search" => return Ok(FilterEvent::ClearSearch),
        "all-categories" => return Ok(FilterEvent::SelectAllCategories),
        "reset" => return Ok(FilterEvent::ResetAll),
        _ => {}
    }

    let Some((kind, value)) = raw.split_once(':') else {
        return Err(format!("unknown filter event `{raw}`"));
    };
    match kind {
        "user" => parse_id(value).map(|id| FilterEvent::SelectUser(UserId(id))),
        "category" => parse_id(value).map(|id| FilterEvent::ToggleCategory(CategoryId(id))),
        "search" => Ok(FilterEvent::SetSearchQuery(value.to_string())),
        other => Err(format!("unknown filter event kind `{other}`")),
    }
}

fn parse_id(value: &str) -> Result<u32, String> {
    value.parse::<u32>().map_err(|_| format!("`{value}` is not a valid id"))
}

pub fn run(mut options: LoadOptions, args: BrowseArgs) -> CommandResult {
    if let Some(dataset) = &args.dataset {
        options.overrides.dataset_path = Some(dataset.clone());
    }
    if args.json {
        options.overrides.display_format = Some(OutputFormat::Json);
    }

    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_application_error("browse", error.into()),
    };
    let mut view = match load_view(&config) {
        Ok(view) => view,
        Err(error) => return CommandResult::from_application_error("browse", error),
    };

    for event in args.filter_events() {
        view.apply(event);
    }
    let snapshot = view.snapshot();

    let output = match config.display.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&snapshot) {
            Ok(output) => output,
            Err(error) => {
                return CommandResult::failure("browse", "serialization", error.to_string(), 5)
            }
        },
        OutputFormat::Table => render_table(&snapshot, &config.display.empty_message),
    };

    CommandResult { exit_code: 0, output }
}

pub fn render_table(snapshot: &ViewSnapshot, empty_message: &str) -> String {
    let mut lines = vec![render_filters(snapshot)];

    if snapshot.no_matching_products {
        lines.push(empty_message.to_string());
        return lines.join("\n");
    }

    let header = ["ID", "Product", "Category", "User"].map(str::to_string);
    let rows: Vec<[String; 4]> = snapshot
        .rows
        .iter()
        .map(|row| [row.id.to_string(), row.name.clone(), row.category.clone(), row.user.clone()])
        .collect();

    let mut widths = header.clone().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    lines.push(render_row(&header, &widths));
    for row in &rows {
        lines.push(render_row(row, &widths));
    }
    lines.join("\n")
}

fn render_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(padding))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn render_filters(snapshot: &ViewSnapshot) -> String {
    let user = snapshot
        .users
        .iter()
        .find(|tab| tab.active)
        .map(|tab| tab.name.clone())
        .unwrap_or_else(|| "All".to_string());

    let categories = if snapshot.all_categories_active {
        "All".to_string()
    } else {
        let titles: Vec<&str> = snapshot
            .categories
            .iter()
            .filter(|chip| chip.active)
            .map(|chip| chip.title.as_str())
            .collect();
        if titles.is_empty() {
            "none".to_string()
        } else {
            titles.join(", ")
        }
    };

    format!(
        "Filters: user={user} | categories={categories} | search={:?}",
        snapshot.filters.search_query
    )
}

#[cfg(test)]
mod tests {
    use catalog_core::fixtures::demo_dataset;
    use catalog_core::{CatalogView, CategoryId, FilterEvent, UserId};

    use super::{parse_event, render_table, BrowseArgs};

    #[test]
    fn parses_every_event_form() {
        assert_eq!(parse_event("user:3"), Ok(FilterEvent::SelectUser(UserId(3))));
        assert_eq!(parse_event("all-users"), Ok(FilterEvent::ClearUser));
        assert_eq!(parse_event("category:2"), Ok(FilterEvent::ToggleCategory(CategoryId(2))));
        assert_eq!(parse_event("all-categories"), Ok(FilterEvent::SelectAllCategories));
        assert_eq!(
            parse_event("search: a:b "),
            Ok(FilterEvent::SetSearchQuery(" a:b ".to_string()))
        );
        assert_eq!(parse_event("clear-search"), Ok(FilterEvent::ClearSearch));
        assert_eq!(parse_event("reset"), Ok(FilterEvent::ResetAll));
    }

    #[test]
    fn rejects_malformed_events() {
        assert!(parse_event("user:abc").is_err());
        assert!(parse_event("colour:red").is_err());
        assert!(parse_event("everything").is_err());
    }

    #[test]
    fn flags_expand_before_explicit_events() {
        let args = BrowseArgs {
            user: Some(1),
            categories: vec![2, 3],
            all_categories: true,
            query: Some("mi".to_string()),
            events: vec![FilterEvent::ResetAll],
            ..BrowseArgs::default()
        };

        assert_eq!(
            args.filter_events(),
            vec![
                FilterEvent::SelectUser(UserId(1)),
                FilterEvent::ToggleCategory(CategoryId(2)),
                FilterEvent::ToggleCategory(CategoryId(3)),
                FilterEvent::SelectAllCategories,
                FilterEvent::SetSearchQuery("mi".to_string()),
                FilterEvent::ResetAll,
            ]
        );
    }

    #[test]
    fn table_lists_visible_rows_with_aligned_columns() {
        let mut view = CatalogView::load(demo_dataset()).expect("demo dataset is consistent");
        view.set_search_query("milk");

        let output = render_table(&view.snapshot(), "nothing");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Filters: user=All | categories=All | search=\"milk\"");
        assert_eq!(lines[1], "ID  Product  Category    User");
        assert_eq!(lines[2], "1   Milk     🍺 - Drinks  Max");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn table_prints_empty_message_when_nothing_matches() {
        let mut view = CatalogView::load(demo_dataset()).expect("demo dataset is consistent");
        view.select_user(UserId(4));
        view.toggle_category(CategoryId(2));

        let output = render_table(&view.snapshot(), "No products matching selected criteria");

        assert_eq!(
            output,
            "Filters: user=John | categories=Drinks | search=\"\"\nNo products matching selected criteria"
        );
    }
}
