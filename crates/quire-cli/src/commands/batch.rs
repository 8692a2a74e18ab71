//! `quire batch`: run many requests against one store.
//!
//! The whole file is parsed before anything runs, so a malformed line
//! aborts the batch untouched. Requests then run in file order; each
//! failure is kept and the batch reports them all together at the end,
//! which is where a [`QuireError::Multiple`] aggregate comes from.

use std::{
    fs,
    io::{self, Read as _},
    path::Path,
};

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use quire_core::prelude::*;

use crate::{
    cli::BatchArgs,
    error::{CliError, CliResult, IoContext},
    output::OutputManager,
    session::Session,
};

/// One line of a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchRequest {
    Create {
        title: Option<String>,
        content: Option<String>,
        #[serde(alias = "authorId")]
        author_id: Option<String>,
    },
    Update {
        id: Option<String>,
        title: Option<String>,
        content: Option<String>,
    },
    Delete {
        id: Option<String>,
    },
    Get {
        id: Option<String>,
    },
    List,
}

/// What a successful request produced.
#[derive(Debug)]
enum Outcome {
    Article(Article),
    Deleted(ArticleId),
    Articles(Vec<Article>),
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: BatchArgs, session: &Session, output: &OutputManager) -> CliResult<()> {
    let raw = read_requests(&args.file)?;
    let requests = parse_requests(&raw)?;
    info!(requests = requests.len(), "Batch parsed");

    let mut failures = Vec::new();
    for (line, request) in requests {
        match run(session, request) {
            Ok(outcome) => report_outcome(output, line, &outcome)?,
            Err(DispatchError::Handler(error)) => {
                debug!(line, category = %error.category(), "Batch request failed");
                if !output.is_json() {
                    output.error(&format!("line {line}: {error}"))?;
                }
                failures.push(error);
            }
            Err(wiring) => return Err(CliError::Dispatch(wiring)),
        }
    }

    match failures.len() {
        0 => Ok(()),
        1 => Err(session.fail(failures.remove(0))),
        _ => Err(session.fail(QuireError::multiple(failures))),
    }
}

fn read_requests(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .while_doing(|| "reading requests from stdin".into())?;
        return Ok(raw);
    }
    fs::read_to_string(path).while_doing(|| format!("reading {}", path.display()))
}

/// Parse every non-blank line, numbering lines from 1.
pub fn parse_requests(raw: &str) -> CliResult<Vec<(usize, BatchRequest)>> {
    raw.lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| {
            let line = index + 1;
            serde_json::from_str(text)
                .map(|request| (line, request))
                .map_err(|source| CliError::InvalidBatchLine { line, source })
        })
        .collect()
}

fn run(session: &Session, request: BatchRequest) -> Result<Outcome, DispatchError> {
    let buses = session.buses();
    match request {
        BatchRequest::Create {
            title,
            content,
            author_id,
        } => {
            let command =
                CreateArticle::new(title.as_deref(), content.as_deref(), author_id.as_deref())
                    .map_err(QuireError::from)?;
            buses.create(command).map(Outcome::Article)
        }
        BatchRequest::Update { id, title, content } => {
            let command = UpdateArticle::new(id.as_deref(), title.as_deref(), content.as_deref())
                .map_err(QuireError::from)?;
            buses.update(command).map(Outcome::Article)
        }
        BatchRequest::Delete { id } => {
            let command = DeleteArticle::new(id.as_deref()).map_err(QuireError::from)?;
            buses.delete(command).map(Outcome::Deleted)
        }
        BatchRequest::Get { id } => {
            let query = GetArticle::new(id.as_deref()).map_err(QuireError::from)?;
            buses.get(query).map(Outcome::Article)
        }
        BatchRequest::List => buses.list().map(Outcome::Articles),
    }
}

fn report_outcome(output: &OutputManager, line: usize, outcome: &Outcome) -> io::Result<()> {
    if output.is_json() {
        let value = match outcome {
            Outcome::Article(article) => json!({ "line": line, "article": article }),
            Outcome::Deleted(id) => json!({ "line": line, "deleted": id }),
            Outcome::Articles(articles) => json!({ "line": line, "articles": articles }),
        };
        return output.json(&value);
    }

    match outcome {
        Outcome::Article(article) => {
            output.success(&format!("line {line}: {} ({})", article.title, article.id))
        }
        Outcome::Deleted(id) => output.success(&format!("line {line}: deleted {id}")),
        Outcome::Articles(articles) => {
            output.success(&format!("line {line}: {} article(s)", articles.len()))?;
            articles
                .iter()
                .try_for_each(|article| output.article_row(article))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped_and_numbering_is_kept() {
        let raw = "{\"op\":\"list\"}\n\n   \n{\"op\":\"get\",\"id\":\"x\"}\n";
        let requests = parse_requests(raw).unwrap();

        assert_eq!(
            requests,
            vec![
                (1, BatchRequest::List),
                (
                    4,
                    BatchRequest::Get {
                        id: Some("x".into())
                    }
                ),
            ]
        );
    }

    #[test]
    fn missing_fields_parse_as_none() {
        let requests = parse_requests("{\"op\":\"create\",\"title\":\"T\"}").unwrap();
        assert_eq!(
            requests[0].1,
            BatchRequest::Create {
                title: Some("T".into()),
                content: None,
                author_id: None
            }
        );
    }

    #[test]
    fn author_id_accepts_camel_case() {
        let requests =
            parse_requests("{\"op\":\"create\",\"authorId\":\"a-1\"}").unwrap();
        assert!(matches!(
            &requests[0].1,
            BatchRequest::Create { author_id: Some(a), .. } if a == "a-1"
        ));
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let err = parse_requests("{\"op\":\"list\"}\n{\"op\":\"publish\"}").unwrap_err();
        assert!(matches!(err, CliError::InvalidBatchLine { line: 2, .. }));
    }
}
