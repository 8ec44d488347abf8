use api_examples::signals;
use api_examples::status::ExitStatus;

/// Entry point - installs the Ctrl+C handler and calls core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    signals::install_handler();

    let args: Vec<String> = std::env::args().collect();
    let status = api_examples::core::run(args);

    if signals::was_interrupted() {
        return ExitStatus::Interrupted;
    }

    status
}
