use crate::cli::commands::{print_json, print_records};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tasks::TaskFilter;
use crate::errors::AppResult;
use crate::models::checkbox;
use crate::store::EntryStore;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config, store: &EntryStore) -> AppResult<()> {
    if let Commands::List {
        limit,
        all,
        tasks,
        completed,
        checkboxes,
        json,
    } = cmd
    {
        let limit = if *all {
            None
        } else {
            Some(limit.unwrap_or(cfg.list_limit))
        };

        let task_filter = match (*tasks, *completed) {
            (_, true) => Some(TaskFilter::Completed),
            (true, false) => Some(TaskFilter::Pending),
            _ => None,
        };

        let records = store.read_filtered(limit, |e| {
            task_filter.is_none_or(|f| f.matches(e))
                && (!*checkboxes || checkbox::is_checkbox(&e.text))
        });

        if *json {
            return print_json(&records);
        }

        if records.is_empty() {
            info("No entries.");
            return Ok(());
        }

        print_records(&records);

        if *checkboxes {
            let all_boxes = store.read_filtered(None, |e| checkbox::is_checkbox(&e.text));
            let summary = checkbox::summarize(all_boxes.iter().map(|r| r.entry.text.as_str()));
            println!(
                "\nCheckboxes: {} total, {} checked, {} open ({}%)",
                summary.total,
                summary.checked,
                summary.unchecked(),
                summary.percentage()
            );
        }
    }

    Ok(())
}
