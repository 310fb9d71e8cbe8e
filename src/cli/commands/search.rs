use crate::cli::commands::{join_words, print_json, print_records};
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::store::EntryStore;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, store: &EntryStore) -> AppResult<()> {
    if let Commands::Search { query, json } = cmd {
        let query = join_words(query);
        let matches = store.search(&query);

        if *json {
            return print_json(&matches);
        }

        if matches.is_empty() {
            info(format!("No entries matching '{}'.", query));
        } else {
            print_records(&matches);
            info(format!("{} matching entries.", matches.len()));
        }
    }

    Ok(())
}
