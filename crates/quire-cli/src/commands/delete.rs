//! `quire delete`: remove an article.

use serde_json::json;

use quire_core::application::messages::DeleteArticle;

use crate::{cli::IdArgs, error::CliResult, output::OutputManager, session::Session};

pub fn execute(args: IdArgs, session: &Session, output: &OutputManager) -> CliResult<()> {
    let command = DeleteArticle::new(args.id.as_deref());
    let id = session.execute(command, |buses, c| buses.delete(c))?;

    if output.is_json() {
        output.json(&json!({ "deleted": id }))?;
    } else {
        output.success(&format!("Deleted article {id}"))?;
    }
    Ok(())
}
