//! Dinner Decider - let the dice pick tonight's restaurant

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = dinner_decider::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
