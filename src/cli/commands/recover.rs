use crate::errors::{AppError, AppResult};
use crate::store::EntryStore;
use crate::ui::messages::{info, warning};

pub fn handle(store: &EntryStore) -> AppResult<()> {
    let report = store.recover_pending();

    if let Some(reason) = report.blocked {
        warning(format!(
            "{} files still waiting in {}",
            store.recovery().pending().len(),
            store.recovery().dir().display()
        ));
        return Err(AppError::WriteFailed(reason));
    }

    if report.is_noop() {
        info("Nothing to recover.");
    }

    Ok(())
}
