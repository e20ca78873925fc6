use std::process::ExitCode;

mod app;

fn main() -> ExitCode {
    let app = match app::bootstrap::build_app() {
        Ok(app) => app,
        Err(error) => {
            // Tracing is initialized before config resolution, so this
            // reaches the subscriber.
            tracing::error!(error = %error, "startup_failed");
            return ExitCode::FAILURE;
        }
    };
    app::loop_runner::run(app)
}
