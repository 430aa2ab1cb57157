//! Known GitHub event types and log descriptions.
//!
//! [`EventKind`] enumerates the event catalog for documentation and
//! registration ergonomics only. The dispatch path treats event types as an
//! open string space: GitHub introduces new categories without notice, and
//! an unknown type simply matches zero handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Known GitHub webhook event types.
///
/// Converts to its wire name via [`as_str`](Self::as_str) / `Display`, and
/// into a registry key via `From<EventKind> for String`, so registering
/// under `EventKind::Deployment` and under `"deployment"` reaches the same
/// handler slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CommitComment,
    Create,
    Delete,
    Deployment,
    DeploymentStatus,
    Fork,
    Gollum,
    IssueComment,
    Issues,
    Member,
    Membership,
    PageBuild,
    Ping,
    Public,
    PullRequest,
    PullRequestReview,
    PullRequestReviewComment,
    Push,
    Release,
    Repository,
    Status,
    TeamAdd,
    Watch,
}

impl EventKind {
    /// The event type string as carried in the `X-Github-Event` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommitComment => "commit_comment",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Deployment => "deployment",
            Self::DeploymentStatus => "deployment_status",
            Self::Fork => "fork",
            Self::Gollum => "gollum",
            Self::IssueComment => "issue_comment",
            Self::Issues => "issues",
            Self::Member => "member",
            Self::Membership => "membership",
            Self::PageBuild => "page_build",
            Self::Ping => "ping",
            Self::Public => "public",
            Self::PullRequest => "pull_request",
            Self::PullRequestReview => "pull_request_review",
            Self::PullRequestReviewComment => "pull_request_review_comment",
            Self::Push => "push",
            Self::Release => "release",
            Self::Repository => "repository",
            Self::Status => "status",
            Self::TeamAdd => "team_add",
            Self::Watch => "watch",
        }
    }
}

/// The historical default registration type.
impl Default for EventKind {
    fn default() -> Self {
        Self::Push
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Error for event type strings outside the known catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "commit_comment" => Self::CommitComment,
            "create" => Self::Create,
            "delete" => Self::Delete,
            "deployment" => Self::Deployment,
            "deployment_status" => Self::DeploymentStatus,
            "fork" => Self::Fork,
            "gollum" => Self::Gollum,
            "issue_comment" => Self::IssueComment,
            "issues" => Self::Issues,
            "member" => Self::Member,
            "membership" => Self::Membership,
            "page_build" => Self::PageBuild,
            "ping" => Self::Ping,
            "public" => Self::Public,
            "pull_request" => Self::PullRequest,
            "pull_request_review" => Self::PullRequestReview,
            "pull_request_review_comment" => Self::PullRequestReviewComment,
            "push" => Self::Push,
            "release" => Self::Release,
            "repository" => Self::Repository,
            "status" => Self::Status,
            "team_add" => Self::TeamAdd,
            "watch" => Self::Watch,
            other => return Err(UnknownEventType(other.to_string())),
        };
        Ok(kind)
    }
}

/// Produce a one-line human-readable description of an event for logging.
///
/// Falls back to the bare event type string for unknown types or payloads
/// missing the expected fields; description is best-effort and never fails
/// a dispatch.
pub fn describe(event_type: &str, payload: &Value) -> String {
    describe_known(event_type, payload).unwrap_or_else(|| event_type.to_string())
}

fn describe_known(event_type: &str, p: &Value) -> Option<String> {
    let s = match event_type {
        "commit_comment" => format!(
            "{} commented on {} in {}",
            field(p, &["comment", "user", "login"])?,
            field(p, &["comment", "commit_id"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "create" => format!(
            "{} created {} ({}) in {}",
            field(p, &["sender", "login"])?,
            field(p, &["ref_type"])?,
            field(p, &["ref"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "delete" => format!(
            "{} deleted {} ({}) in {}",
            field(p, &["sender", "login"])?,
            field(p, &["ref_type"])?,
            field(p, &["ref"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "deployment" => format!(
            "{} deployed {} to {} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["deployment", "ref"])?,
            field(p, &["deployment", "environment"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "deployment_status" => format!(
            "deployment of {} to {} {} in {}",
            field(p, &["deployment", "ref"])?,
            field(p, &["deployment", "environment"])?,
            field(p, &["deployment_status", "state"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "fork" => format!(
            "{} forked {}",
            field(p, &["forkee", "owner", "login"])?,
            field(p, &["forkee", "name"])?,
        ),
        "gollum" => format!(
            "{} edited wiki pages in {}",
            field(p, &["sender", "login"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "issue_comment" => format!(
            "{} commented on issue #{} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["issue", "number"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "issues" => format!(
            "{} {} issue #{} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["action"])?,
            field(p, &["issue", "number"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "member" => format!(
            "{} {} member {} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["action"])?,
            field(p, &["member", "login"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "membership" => format!(
            "{} {} member {} to team {} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["action"])?,
            field(p, &["member", "login"])?,
            field(p, &["team", "name"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "page_build" => format!(
            "{} built pages in {}",
            field(p, &["sender", "login"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "ping" => format!("ping from {}", field(p, &["sender", "login"])?),
        "public" => format!(
            "{} publicized {}",
            field(p, &["sender", "login"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "pull_request" => format!(
            "{} {} pull #{} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["action"])?,
            field(p, &["pull_request", "number"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "pull_request_review" => format!(
            "{} {} {} review on pull #{} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["action"])?,
            field(p, &["review", "state"])?,
            field(p, &["pull_request", "number"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "pull_request_review_comment" => format!(
            "{} {} comment on pull #{} in {}",
            field(p, &["comment", "user", "login"])?,
            field(p, &["action"])?,
            field(p, &["pull_request", "number"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "push" => format!(
            "{} pushed {} in {}",
            field(p, &["pusher", "name"])?,
            field(p, &["ref"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "release" => format!(
            "{} {} {} in {}",
            field(p, &["release", "author", "login"])?,
            field(p, &["action"])?,
            field(p, &["release", "tag_name"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "repository" => format!(
            "{} {} repository {}",
            field(p, &["sender", "login"])?,
            field(p, &["action"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "status" => format!(
            "{} set {} status to {} in {}",
            field(p, &["sender", "login"])?,
            field(p, &["sha"])?,
            field(p, &["state"])?,
            field(p, &["repository", "full_name"])?,
        ),
        "team_add" => format!(
            "{} added repository {} to team {}",
            field(p, &["sender", "login"])?,
            field(p, &["repository", "full_name"])?,
            field(p, &["team", "name"])?,
        ),
        "watch" => format!(
            "{} {} watch in repository {}",
            field(p, &["sender", "login"])?,
            field(p, &["action"])?,
            field(p, &["repository", "full_name"])?,
        ),
        _ => return None,
    };
    Some(s)
}

/// Look up a nested payload field, rendering strings and numbers.
fn field(payload: &Value, path: &[&str]) -> Option<String> {
    let mut current = payload;
    for key in path {
        current = current.get(key)?;
    }
    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
