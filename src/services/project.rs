//! Project-related APIs
use crate::{
    client::{Client, Error},
    model::Project,
    path,
    services::{json_body, json_response, list_response, name_list_response, status_unwrap},
};

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;

/// Project-related APIs
#[async_trait]
pub trait ProjectService {
    /// Creates a project.
    async fn create_project(&self, name: &str) -> Result<Project, Error>;

    /// Removes a project. A removed project can be [unremoved](#tymethod.unremove_project).
    async fn remove_project(&self, name: &str) -> Result<(), Error>;

    /// Purges a project that was removed before.
    async fn purge_project(&self, name: &str) -> Result<(), Error>;

    /// Unremoves a project.
    async fn unremove_project(&self, name: &str) -> Result<Project, Error>;

    /// Retrieves the list of the projects.
    async fn list_projects(&self) -> Result<Vec<Project>, Error>;

    /// Retrieves the list of the removed projects,
    /// which can be [unremoved](#tymethod.unremove_project)
    /// or [purged](#tymethod.purge_project).
    async fn list_removed_projects(&self) -> Result<Vec<String>, Error>;
}

#[async_trait]
impl ProjectService for Client {
    async fn create_project(&self, name: &str) -> Result<Project, Error> {
        #[derive(Serialize)]
        struct CreateProject<'a> {
            name: &'a str,
        }

        let body = json_body(&CreateProject { name })?;
        let req = self.new_request(Method::POST, path::projects_path(), Some(body))?;

        let resp = self.request(req).await?;
        json_response(resp).await
    }

    async fn remove_project(&self, name: &str) -> Result<(), Error> {
        let req = self.new_request(Method::DELETE, path::project_path(name), None)?;

        let resp = self.request(req).await?;
        let _ = status_unwrap(resp).await?;

        Ok(())
    }

    async fn purge_project(&self, name: &str) -> Result<(), Error> {
        let req = self.new_request(Method::DELETE, path::removed_project_path(name), None)?;

        let resp = self.request(req).await?;
        let _ = status_unwrap(resp).await?;

        Ok(())
    }

    async fn unremove_project(&self, name: &str) -> Result<Project, Error> {
        let body = json_body(&json!([
            {"op":"replace", "path":"/status", "value":"active"}
        ]))?;
        let req = self.new_request(Method::PATCH, path::project_path(name), Some(body))?;

        let resp = self.request(req).await?;
        json_response(resp).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let req = self.new_request(Method::GET, path::projects_path(), None)?;

        let resp = self.request(req).await?;
        list_response(resp).await
    }

    async fn list_removed_projects(&self) -> Result<Vec<String>, Error> {
        let req = self.new_request(Method::GET, path::removed_projects_path(), None)?;

        let resp = self.request(req).await?;
        name_list_response(resp).await
    }
}
