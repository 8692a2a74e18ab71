//! `quire update`: replace an article's title and content.

use quire_core::application::messages::UpdateArticle;

use crate::{cli::UpdateArgs, error::CliResult, output::OutputManager, session::Session};

pub fn execute(args: UpdateArgs, session: &Session, output: &OutputManager) -> CliResult<()> {
    let command = UpdateArticle::new(
        args.id.as_deref(),
        args.title.as_deref(),
        args.content.as_deref(),
    );
    let article = session.execute(command, |buses, c| buses.update(c))?;

    if !output.is_json() {
        output.success(&format!("Updated article {}", article.id))?;
    }
    output.article(&article)?;
    Ok(())
}
