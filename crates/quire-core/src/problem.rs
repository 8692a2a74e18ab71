//! Error-to-transport mapping.
//!
//! Turns a [`QuireError`] into the problem list a boundary renders. Each leaf
//! of the flattened error (see [`QuireError::leaves`]) becomes one
//! [`Problem`] with its own status. The envelope carries a single status:
//! the problem's own status when there is exactly one, otherwise the
//! [`ProblemStatus::MultipleProblems`] sentinel.
//!
//! Stamping an `instance` reference is the boundary's job; the mapper only
//! decides statuses and details.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::application::TechnicalError;
use crate::domain::BusinessError;
use crate::error::QuireError;

/// Transport-level status of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ProblemStatus {
    BadRequest,
    NotFound,
    /// Sentinel: several distinct problems in one response.
    MultipleProblems,
    InternalServerError,
}

impl ProblemStatus {
    pub const fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::MultipleProblems => 418,
            Self::InternalServerError => 500,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::MultipleProblems => "Multiple Problems",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.title())
    }
}

impl From<ProblemStatus> for u16 {
    fn from(status: ProblemStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u16> for ProblemStatus {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            400 => Ok(Self::BadRequest),
            404 => Ok(Self::NotFound),
            418 => Ok(Self::MultipleProblems),
            500 => Ok(Self::InternalServerError),
            other => Err(format!("unsupported problem status {other}")),
        }
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub status: ProblemStatus,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    pub fn new(status: ProblemStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            instance: None,
        }
    }
}

/// Map every leaf of `error` to a problem, preserving order.
pub fn map_to_problems(error: &QuireError) -> Vec<Problem> {
    error.leaves().into_iter().filter_map(leaf_problem).collect()
}

fn leaf_problem(leaf: &QuireError) -> Option<Problem> {
    let problem = match leaf {
        QuireError::Validation(errors) => {
            Problem::new(ProblemStatus::BadRequest, errors.joined_messages())
        }
        QuireError::Business(e @ BusinessError::InvalidId { .. }) => {
            Problem::new(ProblemStatus::BadRequest, e.to_string())
        }
        QuireError::Business(e @ BusinessError::UnknownArticle { .. }) => {
            Problem::new(ProblemStatus::NotFound, e.to_string())
        }
        QuireError::Technical(e @ TechnicalError::SomethingWentWrong { .. }) => {
            Problem::new(ProblemStatus::InternalServerError, e.to_string())
        }
        // `leaves` never yields aggregates.
        QuireError::Multiple(_) => return None,
    };
    Some(problem)
}

/// Single-status envelope around every problem produced by one error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReport {
    pub status: ProblemStatus,
    pub problems: Vec<Problem>,
}

impl ProblemReport {
    pub fn from_error(error: &QuireError) -> Self {
        Self::from_problems(map_to_problems(error))
    }

    /// Resolve the envelope status from the problems themselves.
    ///
    /// One problem keeps its status, two or more get the sentinel, and an
    /// empty list (an empty aggregate) is reported as an internal error.
    pub fn from_problems(problems: Vec<Problem>) -> Self {
        let status = match problems.as_slice() {
            [] => ProblemStatus::InternalServerError,
            [only] => only.status,
            _ => ProblemStatus::MultipleProblems,
        };
        Self { status, problems }
    }

    /// Stamp every problem with the originating request's reference.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        let instance = instance.into();
        for problem in &mut self.problems {
            problem.instance = Some(instance.clone());
        }
        self
    }

    pub fn is_multiple(&self) -> bool {
        self.status == ProblemStatus::MultipleProblems
    }
}

impl From<&QuireError> for ProblemReport {
    fn from(error: &QuireError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ValidationError, ValidationErrors};

    fn validation() -> QuireError {
        ValidationErrors::from_vec(vec![
            ValidationError::cannot_be_null("title"),
            ValidationError::must_have_content("content"),
        ])
        .unwrap()
        .into()
    }

    #[test]
    fn unknown_article_is_a_single_404() {
        let report = ProblemReport::from_error(&BusinessError::unknown_article("x").into());

        assert_eq!(report.status, ProblemStatus::NotFound);
        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].status.code(), 404);
        assert!(report.problems[0].detail.contains("x"));
    }

    #[test]
    fn heterogeneous_aggregate_uses_the_sentinel() {
        let err = QuireError::multiple([
            BusinessError::invalid_id("a").into(),
            TechnicalError::something_went_wrong("boom").into(),
        ]);

        let report = ProblemReport::from_error(&err);

        let statuses: Vec<u16> = report.problems.iter().map(|p| p.status.code()).collect();
        assert_eq!(statuses, vec![400, 500]);
        assert_eq!(report.status, ProblemStatus::MultipleProblems);
        assert_eq!(report.status.code(), 418);
        assert!(report.is_multiple());
    }

    #[test]
    fn two_problems_with_the_same_status_still_use_the_sentinel() {
        let err = QuireError::multiple([
            BusinessError::unknown_article("a").into(),
            BusinessError::unknown_article("b").into(),
        ]);
        assert_eq!(
            ProblemReport::from_error(&err).status,
            ProblemStatus::MultipleProblems
        );
    }

    #[test]
    fn validation_errors_batch_into_one_problem() {
        let problems = map_to_problems(&validation());

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].status, ProblemStatus::BadRequest);
        assert_eq!(
            problems[0].detail,
            "title cannot be null, content must have content"
        );
    }

    #[test]
    fn nested_aggregates_map_in_flattened_order() {
        let err = QuireError::multiple([
            QuireError::multiple([validation(), BusinessError::unknown_article("b").into()]),
            TechnicalError::something_went_wrong("c").into(),
        ]);

        let statuses: Vec<_> = map_to_problems(&err).into_iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                ProblemStatus::BadRequest,
                ProblemStatus::NotFound,
                ProblemStatus::InternalServerError
            ]
        );
    }

    #[test]
    fn technical_error_is_a_500() {
        let report =
            ProblemReport::from_error(&TechnicalError::something_went_wrong("boom").into());
        assert_eq!(report.status, ProblemStatus::InternalServerError);
        assert!(report.problems[0].detail.contains("boom"));
    }

    #[test]
    fn empty_aggregate_reports_an_internal_error() {
        let report = ProblemReport::from_error(&QuireError::multiple([]));
        assert!(report.problems.is_empty());
        assert_eq!(report.status, ProblemStatus::InternalServerError);
    }

    #[test]
    fn mapper_leaves_instance_unset_until_stamped() {
        let err = QuireError::multiple([
            BusinessError::invalid_id("a").into(),
            BusinessError::unknown_article("b").into(),
        ]);
        let report = ProblemReport::from_error(&err);
        assert!(report.problems.iter().all(|p| p.instance.is_none()));

        let stamped = report.with_instance("urn:quire:request:1");
        assert!(
            stamped
                .problems
                .iter()
                .all(|p| p.instance.as_deref() == Some("urn:quire:request:1"))
        );
    }

    #[test]
    fn statuses_serialize_as_numbers() {
        let report = ProblemReport::from_error(&BusinessError::unknown_article("x").into());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["problems"][0]["status"], 404);
        assert!(json["problems"][0].get("instance").is_none());
    }
}
