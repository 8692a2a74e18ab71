//! Implementation of the `quire list` command.

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
    session::Session,
};

pub fn execute(args: ListArgs, session: &Session, output: &OutputManager) -> CliResult<()> {
    let articles = session
        .buses()
        .list()
        .map_err(|e| session.dispatch_failed(e))?;

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            if articles.is_empty() {
                output.info("No articles")?;
                return Ok(());
            }
            output.header(&format!("Articles ({}):", articles.len()))?;
            for article in &articles {
                output.article_row(article)?;
            }
        }

        ListFormat::Ids => {
            for article in &articles {
                output.print(&article.id.to_string())?;
            }
        }

        ListFormat::Json => output.json(&articles)?,
    }

    Ok(())
}
