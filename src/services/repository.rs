//! Repository-related APIs
use crate::{
    client::{Error, ProjectClient},
    model::Repository,
    path,
    services::{json_body, json_response, list_response, name_list_response, status_unwrap},
};

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;

/// Repository-related APIs
#[async_trait]
pub trait RepoService {
    /// Creates a repository in this project.
    async fn create_repo(&self, repo_name: &str) -> Result<Repository, Error>;

    /// Removes a repository, removed repository can be
    /// [unremoved](#tymethod.unremove_repo).
    async fn remove_repo(&self, repo_name: &str) -> Result<(), Error>;

    /// Purges a repository that was removed before.
    async fn purge_repo(&self, repo_name: &str) -> Result<(), Error>;

    /// Unremoves a repository.
    async fn unremove_repo(&self, repo_name: &str) -> Result<Repository, Error>;

    /// Retrieves the list of the repositories of this project.
    async fn list_repos(&self) -> Result<Vec<Repository>, Error>;

    /// Retrieves the names of the removed repositories of this project,
    /// which can be [unremoved](#tymethod.unremove_repo).
    async fn list_removed_repos(&self) -> Result<Vec<String>, Error>;
}

#[async_trait]
impl<'a> RepoService for ProjectClient<'a> {
    async fn create_repo(&self, repo_name: &str) -> Result<Repository, Error> {
        #[derive(Serialize)]
        struct CreateRepo<'a> {
            name: &'a str,
        }

        let body = json_body(&CreateRepo { name: repo_name })?;
        let req = self
            .client
            .new_request(Method::POST, path::repos_path(self.project), Some(body))?;

        let resp = self.client.request(req).await?;
        json_response(resp).await
    }

    async fn remove_repo(&self, repo_name: &str) -> Result<(), Error> {
        let req = self.client.new_request(
            Method::DELETE,
            path::repo_path(self.project, repo_name),
            None,
        )?;

        let resp = self.client.request(req).await?;
        let _ = status_unwrap(resp).await?;

        Ok(())
    }

    async fn purge_repo(&self, repo_name: &str) -> Result<(), Error> {
        let req = self.client.new_request(
            Method::DELETE,
            path::removed_repo_path(self.project, repo_name),
            None,
        )?;

        let resp = self.client.request(req).await?;
        let _ = status_unwrap(resp).await?;

        Ok(())
    }

    async fn unremove_repo(&self, repo_name: &str) -> Result<Repository, Error> {
        let body = json_body(&json!([
            {"op":"replace", "path":"/status", "value":"active"}
        ]))?;
        let req = self.client.new_request(
            Method::PATCH,
            path::repo_path(self.project, repo_name),
            Some(body),
        )?;

        let resp = self.client.request(req).await?;
        json_response(resp).await
    }

    async fn list_repos(&self) -> Result<Vec<Repository>, Error> {
        let req = self
            .client
            .new_request(Method::GET, path::repos_path(self.project), None)?;

        let resp = self.client.request(req).await?;
        list_response(resp).await
    }

    async fn list_removed_repos(&self) -> Result<Vec<String>, Error> {
        let req = self.client.new_request(
            Method::GET,
            path::removed_repos_path(self.project),
            None,
        )?;

        let resp = self.client.request(req).await?;
        name_list_response(resp).await
    }
}
