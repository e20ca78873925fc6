use std::process::ExitCode;

use runtime::{run_session, NullInput};
use tracing::error;

use super::bootstrap::AppWiring;

pub(crate) fn run(mut app: AppWiring) -> ExitCode {
    // No input device is wired in the headless build; the session
    // still runs its full lifecycle against the null feed.
    if let Err(err) = run_session(app.config, &mut app.session, &mut NullInput) {
        error!(error = %err, "session_loop_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
