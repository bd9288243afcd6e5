use std::borrow::Cow;

use crate::model::{Query, QueryType, Revision};

const PATH_PREFIX: &str = "/api/v1";

mod params {
    pub const REVISION: &str = "revision";
    pub const JSONPATH: &str = "jsonpath";
    pub const PATH: &str = "path";
    pub const PATH_PATTERN: &str = "pathPattern";
    pub const MAX_COMMITS: &str = "maxCommits";
    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const STATUS: &str = "status";
}

const STATUS_REMOVED: &str = "removed";

fn normalize_path_pattern(path_pattern: &str) -> Cow<str> {
    if path_pattern.is_empty() {
        return Cow::Borrowed("/**");
    }
    if path_pattern.starts_with("**") {
        return Cow::Owned(format!("/{}", path_pattern));
    }
    if !path_pattern.starts_with('/') {
        return Cow::Owned(format!("/**/{}", path_pattern));
    }

    Cow::Borrowed(path_pattern)
}

/// A request path with its form-urlencoded query string.
/// Empty values and unspecified revisions are left out.
struct PathBuilder {
    path: String,
    query: form_urlencoded::Serializer<'static, String>,
    empty_query: bool,
}

impl PathBuilder {
    fn new(path: String) -> Self {
        PathBuilder {
            path,
            query: form_urlencoded::Serializer::new(String::new()),
            empty_query: true,
        }
    }

    fn param(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.query.append_pair(key, value);
            self.empty_query = false;
        }
        self
    }

    fn revision(self, key: &str, revision: Revision) -> Self {
        match revision.as_i64() {
            Some(v) => self.param(key, &v.to_string()),
            None => self,
        }
    }

    fn json_paths(self, query: &Query) -> Self {
        match &query.r#type {
            QueryType::JsonPath(expressions) => expressions
                .iter()
                .fold(self, |b, expression| b.param(params::JSONPATH, expression)),
            QueryType::Identity => self,
        }
    }

    fn finish(mut self) -> String {
        if self.empty_query {
            return self.path;
        }
        format!("{}?{}", self.path, self.query.finish())
    }
}

pub(crate) fn projects_path() -> String {
    format!("{}/projects", PATH_PREFIX)
}

pub(crate) fn removed_projects_path() -> String {
    PathBuilder::new(projects_path())
        .param(params::STATUS, STATUS_REMOVED)
        .finish()
}

pub(crate) fn project_path(project_name: &str) -> String {
    format!("{}/projects/{}", PATH_PREFIX, project_name)
}

pub(crate) fn removed_project_path(project_name: &str) -> String {
    format!("{}/removed", project_path(project_name))
}

pub(crate) fn repos_path(project_name: &str) -> String {
    format!("{}/repos", project_path(project_name))
}

pub(crate) fn removed_repos_path(project_name: &str) -> String {
    PathBuilder::new(repos_path(project_name))
        .param(params::STATUS, STATUS_REMOVED)
        .finish()
}

pub(crate) fn repo_path(project_name: &str, repo_name: &str) -> String {
    format!("{}/{}", repos_path(project_name), repo_name)
}

pub(crate) fn removed_repo_path(project_name: &str, repo_name: &str) -> String {
    format!("{}/removed", repo_path(project_name, repo_name))
}

pub(crate) fn list_contents_path(
    project_name: &str,
    repo_name: &str,
    revision: Revision,
    path_pattern: &str,
) -> String {
    let path_pattern = normalize_path_pattern(path_pattern);
    let path = format!("{}/list{}", repo_path(project_name, repo_name), path_pattern);

    PathBuilder::new(path)
        .revision(params::REVISION, revision)
        .finish()
}

pub(crate) fn contents_path(
    project_name: &str,
    repo_name: &str,
    revision: Revision,
    path_pattern: &str,
) -> String {
    let path_pattern = normalize_path_pattern(path_pattern);
    let path = format!(
        "{}/contents{}",
        repo_path(project_name, repo_name),
        path_pattern
    );

    PathBuilder::new(path)
        .revision(params::REVISION, revision)
        .finish()
}

pub(crate) fn content_path(
    project_name: &str,
    repo_name: &str,
    revision: Revision,
    query: &Query,
) -> String {
    let path = format!(
        "{}/contents{}",
        repo_path(project_name, repo_name),
        query.path
    );

    PathBuilder::new(path)
        .revision(params::REVISION, revision)
        .json_paths(query)
        .finish()
}

/// The `from` revision goes into the path and is dropped when unspecified.
pub(crate) fn content_commits_path(
    project_name: &str,
    repo_name: &str,
    from_rev: Revision,
    to_rev: Revision,
    path: &str,
    max_commits: Option<u32>,
) -> String {
    let mut commits = format!("{}/commits", repo_path(project_name, repo_name));
    if let Some(from) = from_rev.as_i64() {
        commits = format!("{}/{}", commits, from);
    }

    let max_commits = max_commits.map(|c| c.to_string()).unwrap_or_default();
    PathBuilder::new(commits)
        .param(params::PATH, path)
        .revision(params::TO, to_rev)
        .param(params::MAX_COMMITS, &max_commits)
        .finish()
}

pub(crate) fn content_compare_path(
    project_name: &str,
    repo_name: &str,
    from_rev: Revision,
    to_rev: Revision,
    query: &Query,
) -> String {
    let path = format!("{}/compare", repo_path(project_name, repo_name));

    PathBuilder::new(path)
        .param(params::PATH, &query.path)
        .json_paths(query)
        .revision(params::FROM, from_rev)
        .revision(params::TO, to_rev)
        .finish()
}

pub(crate) fn contents_compare_path(
    project_name: &str,
    repo_name: &str,
    from_rev: Revision,
    to_rev: Revision,
    path_pattern: &str,
) -> String {
    let path = format!("{}/compare", repo_path(project_name, repo_name));
    let path_pattern = normalize_path_pattern(path_pattern);

    PathBuilder::new(path)
        .param(params::PATH_PATTERN, &path_pattern)
        .revision(params::FROM, from_rev)
        .revision(params::TO, to_rev)
        .finish()
}

pub(crate) fn contents_push_path(
    project_name: &str,
    repo_name: &str,
    base_revision: Revision,
) -> String {
    let path = format!("{}/contents", repo_path(project_name, repo_name));

    PathBuilder::new(path)
        .revision(params::REVISION, base_revision)
        .finish()
}

/// An unspecified revision is resolved as HEAD.
pub(crate) fn normalize_revision_path(
    project_name: &str,
    repo_name: &str,
    revision: Revision,
) -> String {
    let revision = revision.as_i64().unwrap_or(-1);

    format!(
        "{}/revision/{}",
        repo_path(project_name, repo_name),
        revision
    )
}

pub(crate) fn content_watch_path(project_name: &str, repo_name: &str, query: &Query) -> String {
    let path = format!(
        "{}/contents{}",
        repo_path(project_name, repo_name),
        query.path
    );

    PathBuilder::new(path).json_paths(query).finish()
}

pub(crate) fn repo_watch_path(project_name: &str, repo_name: &str, path_pattern: &str) -> String {
    let path_pattern = normalize_path_pattern(path_pattern);

    format!(
        "{}/contents{}",
        repo_path(project_name, repo_name),
        path_pattern
    )
}
