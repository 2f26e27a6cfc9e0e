use anyhow::Result;

use crate::api::run_server;
use crate::config::NotesConfig;
use crate::logging;

pub fn handle_serve(config: NotesConfig) -> Result<()> {
    logging::init(&config.logging);

    tokio::runtime::Runtime::new()?.block_on(run_server(config.server))?;
    Ok(())
}
