//! zlog main entrypoint.

use zlog::errors::AppError;
use zlog::run;

fn main() {
    match run() {
        Ok(()) => {}
        // the console reporter has already printed the loss
        Err(AppError::EntryLost(_)) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
