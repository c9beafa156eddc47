use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match phillips_curves::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("run aborted: {err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
