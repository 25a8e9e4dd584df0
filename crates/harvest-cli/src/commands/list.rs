//! Module for the "list" command: a metadata query without downloads.

use super::*;

/// Function for the [`Commands::List`] in the CLI.
pub async fn list(config: Config) -> Result<()> {
  let pipeline = Pipeline::new(config)?;
  match pipeline.discover(&mut ConsoleReporter::listing()).await? {
    Outcome::Completed(papers) => {
      let total = papers.len();
      for (index, paper) in (1..).zip(&papers) {
        print_record(index, total, paper);
      }
      Ok(())
    },
    Outcome::Rejected(rejection) => Err(CliError::MetadataRejected(rejection)),
  }
}
