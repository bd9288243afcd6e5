//! An async client for [Central Dogma](https://line.github.io/centraldogma/),
//! a highly-available version-controlled service configuration repository.
//!
//! ```no_run
//! use centraldogma::{Client, ContentService, Query, Revision};
//!
//! # async fn run() -> Result<(), centraldogma::Error> {
//! let client = Client::new("http://localhost:36462", None).await?;
//! let entry = client
//!     .repo("foo", "bar")
//!     .get_file(Revision::HEAD, &Query::identity("/a.json").unwrap())
//!     .await?;
//! println!("{:?}", entry.content);
//! # Ok(())
//! # }
//! ```
mod client;
pub mod model;
pub(crate) mod path;
pub mod services;

pub use client::{Client, ClientBuilder, Error, ProjectClient, RepoClient};
pub use model::{
    Author, Change, ChangeContent, Commit, CommitDetail, CommitMessage, Entry, EntryContent,
    EntryType, ListEntry, Project, PushResult, Query, QueryType, Repository, Revision,
    WatchFileResult, WatchRepoResult,
};
pub use services::{
    content::ContentService, project::ProjectService, repository::RepoService,
    watch::WatchService,
};
