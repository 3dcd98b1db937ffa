//! tasklogger main entrypoint.

use tasklogger::run;
use tasklogger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
