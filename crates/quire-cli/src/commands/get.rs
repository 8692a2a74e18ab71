//! `quire get`: show one article.

use quire_core::application::messages::GetArticle;

use crate::{cli::IdArgs, error::CliResult, output::OutputManager, session::Session};

pub fn execute(args: IdArgs, session: &Session, output: &OutputManager) -> CliResult<()> {
    let query = GetArticle::new(args.id.as_deref());
    let article = session.execute(query, |buses, q| buses.get(q))?;
    output.article(&article)?;
    Ok(())
}
