use std::process::ExitCode;

fn main() -> ExitCode {
    match guihost::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("guihost failed: {e}");
            ExitCode::FAILURE
        }
    }
}
