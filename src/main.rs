//! paperlab main entrypoint.

use paperlab::errors::AppError;
use paperlab::run;
use paperlab::ui::messages::validation_errors;

fn main() {
    match run() {
        Ok(()) => {}
        Err(AppError::Validation(errors)) => {
            validation_errors(&errors);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
