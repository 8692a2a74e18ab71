//! `quire create`: publish an article.

use tracing::info;

use quire_core::application::messages::CreateArticle;

use crate::{
    cli::CreateArgs, config::AppConfig, error::CliResult, output::OutputManager,
    session::Session,
};

pub fn execute(
    args: CreateArgs,
    config: &AppConfig,
    session: &Session,
    output: &OutputManager,
) -> CliResult<()> {
    let author = args.author.unwrap_or_else(|| config.author.id.clone());
    let command = CreateArticle::new(
        args.title.as_deref(),
        args.content.as_deref(),
        Some(author.as_str()),
    );

    let article = session.execute(command, |buses, c| buses.create(c))?;
    info!(article_id = %article.id, "Article published");

    if !output.is_json() {
        output.success(&format!("Created article {}", article.id))?;
    }
    output.article(&article)?;
    Ok(())
}
