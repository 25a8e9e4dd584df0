//! Module for the "run" command: one complete harvest.

use super::*;

/// Function for the [`Commands::Run`] in the CLI.
///
/// A rejected metadata query or rejected downloads still count as a completed run;
/// they have already been reported on the console.
pub async fn run(config: Config) -> Result<()> {
  let pipeline = Pipeline::new(config)?;
  let summary = pipeline.run(&mut ConsoleReporter::run()).await?;
  debug!("Run summary: {summary:?}");
  Ok(())
}
