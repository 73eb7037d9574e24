mod bootstrap;
mod prompt;
mod session;

use anyhow::Result;
use bikeshare_core::settings::Settings;

use crate::prompt::Prompter;
use crate::session::Session;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data directory: {}, page size: {}",
        settings.data_dir.display(),
        settings.page_size()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let prompter = Prompter::new(stdin.lock(), stdout.lock());

    let mut session = Session::new(prompter, settings.data_dir.clone(), settings.page_size());
    session.run()?;

    Ok(())
}
