//! Content-related APIs
use crate::{
    model::{Change, Commit, CommitMessage, Entry, ListEntry, PushResult, Query, Revision},
    path,
    services::{json_body, json_response, list_response},
    Error, RepoClient,
};

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Push<'a> {
    commit_message: &'a CommitMessage,
    changes: &'a [Change],
}

/// Content-related APIs
///
/// A path pattern, as taken by several of these methods, is a variant of glob:
///   * `"/**"` - find all files recursively
///   * `"*.json"` - find all JSON files recursively
///   * `"/foo/*.json"` - find all JSON files under the directory /foo
///   * `"/*/foo.txt"` - find all files named foo.txt at the second depth level
///   * `"*.json,/bar/*.txt"` - use comma to specify more than one pattern.
///   A file will be matched if any pattern matches.
///
/// A pattern not starting with `/` matches at any depth, and an empty pattern matches everything.
#[async_trait]
pub trait ContentService {
    /// Retrieves the list of the files at the specified [`Revision`] matched by the path pattern.
    async fn list_files(
        &self,
        revision: Revision,
        path_pattern: &str,
    ) -> Result<Vec<ListEntry>, Error>;

    /// Queries a file at the specified [`Revision`] and path with the specified [`Query`].
    async fn get_file(&self, revision: Revision, query: &Query) -> Result<Entry, Error>;

    /// Retrieves the files at the specified [`Revision`] matched by the path pattern.
    async fn get_files(&self, revision: Revision, path_pattern: &str) -> Result<Vec<Entry>, Error>;

    /// Retrieves the history of the repository of the files matched by the given
    /// path pattern between two [`Revision`]s.
    /// At most `max_commits` commits are returned when it is set.
    /// Note that this method does not retrieve the diffs but only metadata about the changes.
    /// Use [get_diff](#tymethod.get_diff) or
    /// [get_diffs](#tymethod.get_diffs) to retrieve the diffs
    async fn get_history(
        &self,
        from_rev: Revision,
        to_rev: Revision,
        path: &str,
        max_commits: Option<u32>,
    ) -> Result<Vec<Commit>, Error>;

    /// Returns the diff of a file between two [`Revision`]s.
    async fn get_diff(
        &self,
        from_rev: Revision,
        to_rev: Revision,
        query: &Query,
    ) -> Result<Change, Error>;

    /// Retrieves the diffs of the files matched by the given
    /// path pattern between two [`Revision`]s.
    async fn get_diffs(
        &self,
        from_rev: Revision,
        to_rev: Revision,
        path_pattern: &str,
    ) -> Result<Vec<Change>, Error>;

    /// Pushes the specified [`Change`]s to the repository.
    ///
    /// Fails with [`Error::InvalidParams`] without contacting the server
    /// when the summary of `cm` or `changes` is empty.
    async fn push(
        &self,
        base_revision: Revision,
        cm: CommitMessage,
        changes: Vec<Change>,
    ) -> Result<PushResult, Error>;

    /// Converts a relative revision such as [`Revision::HEAD`] into the
    /// absolute revision it currently points to.
    async fn normalize_revision(&self, revision: Revision) -> Result<Revision, Error>;
}

#[async_trait]
impl<'a> ContentService for RepoClient<'a> {
    async fn list_files(
        &self,
        revision: Revision,
        path_pattern: &str,
    ) -> Result<Vec<ListEntry>, Error> {
        let p = path::list_contents_path(self.project, self.repo, revision, path_pattern);
        let req = self.client.new_request(Method::GET, p, None)?;

        let resp = self.client.request(req).await?;
        list_response(resp).await
    }

    async fn get_file(&self, revision: Revision, query: &Query) -> Result<Entry, Error> {
        let p = path::content_path(self.project, self.repo, revision, query);
        let req = self.client.new_request(Method::GET, p, None)?;

        let resp = self.client.request(req).await?;
        json_response(resp).await
    }

    async fn get_files(&self, revision: Revision, path_pattern: &str) -> Result<Vec<Entry>, Error> {
        let p = path::contents_path(self.project, self.repo, revision, path_pattern);
        let req = self.client.new_request(Method::GET, p, None)?;

        let resp = self.client.request(req).await?;
        list_response(resp).await
    }

    async fn get_history(
        &self,
        from_rev: Revision,
        to_rev: Revision,
        path: &str,
        max_commits: Option<u32>,
    ) -> Result<Vec<Commit>, Error> {
        let p = path::content_commits_path(
            self.project,
            self.repo,
            from_rev,
            to_rev,
            path,
            max_commits,
        );
        let req = self.client.new_request(Method::GET, p, None)?;

        let resp = self.client.request(req).await?;
        list_response(resp).await
    }

    async fn get_diff(
        &self,
        from_rev: Revision,
        to_rev: Revision,
        query: &Query,
    ) -> Result<Change, Error> {
        let p = path::content_compare_path(self.project, self.repo, from_rev, to_rev, query);
        let req = self.client.new_request(Method::GET, p, None)?;

        let resp = self.client.request(req).await?;
        json_response(resp).await
    }

    async fn get_diffs(
        &self,
        from_rev: Revision,
        to_rev: Revision,
        path_pattern: &str,
    ) -> Result<Vec<Change>, Error> {
        let p =
            path::contents_compare_path(self.project, self.repo, from_rev, to_rev, path_pattern);
        let req = self.client.new_request(Method::GET, p, None)?;

        let resp = self.client.request(req).await?;
        list_response(resp).await
    }

    async fn push(
        &self,
        base_revision: Revision,
        cm: CommitMessage,
        changes: Vec<Change>,
    ) -> Result<PushResult, Error> {
        if cm.summary.is_empty() {
            return Err(Error::InvalidParams(
                "summary of commit_message cannot be empty",
            ));
        }
        if changes.is_empty() {
            return Err(Error::InvalidParams("no changes to commit"));
        }

        let body = json_body(&Push {
            commit_message: &cm,
            changes: &changes,
        })?;

        let p = path::contents_push_path(self.project, self.repo, base_revision);
        let req = self.client.new_request(Method::POST, p, Some(body))?;

        let resp = self.client.request(req).await?;
        json_response(resp).await
    }

    async fn normalize_revision(&self, revision: Revision) -> Result<Revision, Error> {
        #[derive(Deserialize)]
        struct Normalized {
            revision: Revision,
        }

        let p = path::normalize_revision_path(self.project, self.repo, revision);
        let req = self.client.new_request(Method::GET, p, None)?;

        let resp = self.client.request(req).await?;
        let normalized: Normalized = json_response(resp).await?;

        Ok(normalized.revision)
    }
}
