//! Data models of CentralDogma
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A revision number of a [`Commit`].
///
/// A revision number is an integer which refers to a specific point of repository history.
/// When a repository is created, it starts with an initial commit whose revision is 1.
/// As new commits are added, each commit gets its own revision number,
/// monotonically increasing from the previous commit's revision. i.e. 1, 2, 3, ...
///
/// A revision number can also be represented as a negative integer.
/// When a revision number is negative, we start from -1 which refers to the latest commit in repository history,
/// which is often called 'HEAD' of the repository.
/// A smaller revision number refers to the older commit.
/// e.g. -2 refers to the commit before the latest commit, and so on.
///
/// A revision with a negative integer is called 'relative revision'.
/// By contrast, a revision with a positive integer is called 'absolute revision'.
///
/// [`Revision::DEFAULT`] leaves the revision unspecified, so the server picks its default.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Revision(Option<i64>);

impl Revision {
    /// Revision `-1`, also known as `HEAD`.
    pub const HEAD: Revision = Revision(Some(-1));
    /// Revision `1`, also known as `INIT`.
    pub const INIT: Revision = Revision(Some(1));
    /// No revision; omitted from requests.
    pub const DEFAULT: Revision = Revision(None);

    pub fn as_i64(&self) -> Option<i64> {
        self.0
    }

    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }
}

impl From<i64> for Revision {
    fn from(i: i64) -> Self {
        Revision(Some(i))
    }
}

/// Creator of a project or repository or commit
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Name of this author.
    pub name: String,
    /// Email of this author.
    pub email: String,
}

/// A top-level element in Central Dogma storage model.
/// A project has "dogma" and "meta" repositories by default which contain project configuration
/// files accessible by administrators and project owners respectively.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Name of this project.
    pub name: String,
    /// The author who initially created this project.
    pub creator: Author,
    /// Url of this project
    pub url: Option<String>,
    /// When the project was created
    pub created_at: Option<String>,
}

/// Repository information
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Name of this repository.
    pub name: String,
    /// The author who initially created this repository.
    pub creator: Author,
    /// Head [`Revision`] of the repository.
    #[serde(default)]
    pub head_revision: Revision,
    /// Url of this repository.
    pub url: Option<String>,
    /// When the repository was created.
    pub created_at: Option<String>,
}

/// The content of an [`Entry`], tagged by its `type`.
///
/// JSON entries keep the raw JSON value, which may itself be a JSON string
/// when a JSON path query selects one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(tag = "type", content = "content")]
pub enum EntryContent {
    /// Content as a JSON Value.
    Json(serde_json::Value),
    /// Content as a String.
    Text(String),
    /// This Entry is a directory.
    Directory,
}

/// A file or a directory in a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Path of this entry.
    pub path: String,
    /// Content of this entry.
    #[serde(flatten)]
    pub content: EntryContent,
    /// Revision of this entry.
    #[serde(default, skip_serializing_if = "Revision::is_default")]
    pub revision: Revision,
    /// Url of this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When this entry was last modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

impl Entry {
    pub fn entry_type(&self) -> EntryType {
        match self.content {
            EntryContent::Json(_) => EntryType::Json,
            EntryContent::Text(_) => EntryType::Text,
            EntryContent::Directory => EntryType::Directory,
        }
    }
}

/// The type of an [`Entry`] or a [`ListEntry`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// A UTF-8 encoded JSON file.
    Json,
    /// A UTF-8 encoded text file.
    Text,
    /// A directory.
    Directory,
}

/// A metadata of a file or a directory in a repository.
/// ListEntry has no content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub path: String,
    pub r#type: EntryType,
}

/// Type of a [`Query`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryType {
    /// Retrieves the content as it is.
    Identity,
    /// Applies a series of JSON path expressions to the content, in order.
    JsonPath(Vec<String>),
}

/// A Query on a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub(crate) path: String,
    pub(crate) r#type: QueryType,
}

impl Query {
    fn normalize_path(path: &str) -> String {
        if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{}", path)
        }
    }

    /// Returns a newly-created [`Query`] that retrieves the content as it is.
    /// Returns `None` if path is empty
    pub fn identity(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        Some(Query {
            path: Self::normalize_path(path),
            r#type: QueryType::Identity,
        })
    }

    /// Returns a newly-created [`Query`] that applies a series of
    /// [JSON path expressions](https://github.com/json-path/JsonPath/blob/master/README.md)
    /// to the content.
    /// Returns `None` if path does not end with `.json` or `exprs` is empty.
    pub fn of_json_path(path: &str, exprs: Vec<String>) -> Option<Self> {
        if !path.to_lowercase().ends_with(".json") || exprs.is_empty() {
            return None;
        }
        Some(Query {
            path: Self::normalize_path(path),
            r#type: QueryType::JsonPath(exprs),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_type(&self) -> &QueryType {
        &self.r#type
    }
}

/// Typed content of a [`CommitMessage`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(tag = "markup", content = "detail")]
pub enum CommitDetail {
    /// Commit details as markdown
    Markdown(String),
    /// Commit details as plaintext
    Plaintext(String),
}

/// Description of a [`Commit`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitMessage {
    /// Summary of this commit message
    pub summary: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    /// Detailed description of this commit message
    pub detail: Option<CommitDetail>,
}

impl CommitMessage {
    /// A commit message with only a summary.
    pub fn only_summary(summary: &str) -> Self {
        CommitMessage {
            summary: summary.to_owned(),
            detail: None,
        }
    }
}

/// Result of a [push](crate::ContentService::push) operation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResult {
    /// Revision of this commit.
    pub revision: Revision,
    /// When this commit was pushed.
    pub pushed_at: Option<String>,
}

/// A set of Changes and its metadata.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Revision of this commit.
    pub revision: Revision,
    /// Author of this commit.
    pub author: Author,
    /// Description of this commit.
    pub commit_message: CommitMessage,
    /// When this commit was pushed.
    pub pushed_at: Option<String>,
}

/// Typed content of a [`Change`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(tag = "type", content = "content")]
pub enum ChangeContent {
    /// Adds a new JSON file or replaces an existing file with the provided json.
    UpsertJson(serde_json::Value),

    /// Adds a new text file or replaces an existing file with the provided content.
    UpsertText(String),

    /// Removes an existing file.
    Remove,

    /// Renames an existsing file to this provided path.
    Rename(String),

    /// Applies a JSON patch to a JSON file with the provided JSON patch object,
    /// as defined in [RFC 6902](https://tools.ietf.org/html/rfc6902).
    ApplyJsonPatch(serde_json::Value),

    /// Applies a textual patch to a text file with the provided
    /// [unified format](https://en.wikipedia.org/wiki/Diff_utility#Unified_format) string.
    ApplyTextPatch(String),
}

/// A modification of an individual [`Entry`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// Path of the file change.
    pub path: String,
    /// Content of the file change.
    #[serde(flatten)]
    pub content: ChangeContent,
}

/// A change result from a
/// [watch_file_stream](crate::WatchService::watch_file_stream) operation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchFileResult {
    /// Revision of the change.
    pub revision: Revision,
    /// Content of the change.
    pub entry: Entry,
}

/// A change result from a
/// [watch_repo_stream](crate::WatchService::watch_repo_stream) operation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchRepoResult {
    /// Revision of the change.
    pub revision: Revision,
}

pub(crate) trait Watchable: DeserializeOwned + Send {
    fn revision(&self) -> Revision;
}

impl Watchable for WatchFileResult {
    fn revision(&self) -> Revision {
        self.revision
    }
}

impl Watchable for WatchRepoResult {
    fn revision(&self) -> Revision {
        self.revision
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_revision_serde() {
        assert_eq!(serde_json::to_value(Revision::HEAD).unwrap(), json!(-1));
        assert_eq!(serde_json::to_value(Revision::DEFAULT).unwrap(), json!(null));
        assert_eq!(
            serde_json::from_value::<Revision>(json!(3)).unwrap(),
            Revision::from(3)
        );
    }

    #[test]
    fn test_entry_text() {
        let entry: Entry = serde_json::from_value(json!({
            "path": "/b.txt",
            "type": "TEXT",
            "content": "hello\n",
            "revision": 2,
            "url": "/api/v1/projects/foo/repos/bar/contents/b.txt"
        }))
        .unwrap();

        assert_eq!(entry.entry_type(), EntryType::Text);
        assert_eq!(entry.content, EntryContent::Text("hello\n".to_string()));
        assert_eq!(entry.revision, Revision::from(2));
        assert_eq!(entry.modified_at, None);
    }

    #[test]
    fn test_entry_json_content_kinds() {
        let object: Entry = serde_json::from_value(json!({
            "path": "/a.json",
            "type": "JSON",
            "content": {"a": [1, 2]}
        }))
        .unwrap();
        assert_eq!(object.content, EntryContent::Json(json!({"a": [1, 2]})));
        assert_eq!(object.revision, Revision::DEFAULT);

        // a JSON path query may narrow the content down to a bare string
        let string: Entry = serde_json::from_value(json!({
            "path": "/a.json",
            "type": "JSON",
            "content": "b"
        }))
        .unwrap();
        assert_eq!(string.content, EntryContent::Json(json!("b")));
    }

    #[test]
    fn test_entry_directory() {
        let entry: Entry = serde_json::from_value(json!({
            "path": "/dir",
            "type": "DIRECTORY",
            "revision": 4
        }))
        .unwrap();

        assert_eq!(entry.entry_type(), EntryType::Directory);
        assert_eq!(entry.content, EntryContent::Directory);
    }

    #[test]
    fn test_entry_unknown_type() {
        let entry = serde_json::from_value::<Entry>(json!({
            "path": "/a.bin",
            "type": "BINARY",
            "content": "AAAA"
        }));

        assert!(entry.is_err());
    }

    #[test]
    fn test_entry_serialize() {
        let entry = Entry {
            path: "/a.json".to_string(),
            content: EntryContent::Json(json!({"a": "b"})),
            revision: Revision::from(2),
            url: None,
            modified_at: None,
        };

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"path": "/a.json", "type": "JSON", "content": {"a": "b"}, "revision": 2})
        );
    }

    #[test]
    fn test_change_serialize() {
        let changes = vec![
            Change {
                path: "/a.json".to_string(),
                content: ChangeContent::UpsertJson(json!({"a": 1})),
            },
            Change {
                path: "/b.txt".to_string(),
                content: ChangeContent::Remove,
            },
            Change {
                path: "/c.txt".to_string(),
                content: ChangeContent::Rename("/d.txt".to_string()),
            },
            Change {
                path: "/a.json".to_string(),
                content: ChangeContent::ApplyJsonPatch(
                    json!([{"op": "remove", "path": "/a"}]),
                ),
            },
        ];

        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!([
                {"path": "/a.json", "type": "UPSERT_JSON", "content": {"a": 1}},
                {"path": "/b.txt", "type": "REMOVE"},
                {"path": "/c.txt", "type": "RENAME", "content": "/d.txt"},
                {"path": "/a.json", "type": "APPLY_JSON_PATCH", "content": [{"op": "remove", "path": "/a"}]}
            ])
        );
    }

    #[test]
    fn test_change_deserialize() {
        let change: Change = serde_json::from_value(json!({
            "path": "/b.txt",
            "type": "APPLY_TEXT_PATCH",
            "content": "--- /b.txt\n+++ /b.txt\n@@ -1 +1 @@\n-a\n+b\n"
        }))
        .unwrap();

        assert_eq!(change.path, "/b.txt");
        assert!(matches!(change.content, ChangeContent::ApplyTextPatch(p) if p.starts_with("--- /b.txt")));

        let removed: Change =
            serde_json::from_value(json!({"path": "/c.txt", "type": "REMOVE"})).unwrap();
        assert_eq!(removed.content, ChangeContent::Remove);
    }

    #[test]
    fn test_commit_message() {
        let summary_only = CommitMessage::only_summary("Add a.json");
        assert_eq!(
            serde_json::to_value(&summary_only).unwrap(),
            json!({"summary": "Add a.json"})
        );

        let detailed = CommitMessage {
            summary: "Add a.json".to_string(),
            detail: Some(CommitDetail::Markdown("# why".to_string())),
        };
        let value = serde_json::to_value(&detailed).unwrap();
        assert_eq!(
            value,
            json!({"summary": "Add a.json", "markup": "MARKDOWN", "detail": "# why"})
        );
        assert_eq!(
            serde_json::from_value::<CommitMessage>(value).unwrap(),
            detailed
        );
    }

    #[test]
    fn test_query() {
        let q = Query::identity("a.json").unwrap();
        assert_eq!(q.path(), "/a.json");
        assert_eq!(q.query_type(), &QueryType::Identity);

        assert!(Query::identity("").is_none());
        assert!(Query::of_json_path("/a.txt", vec!["$.a".to_string()]).is_none());
        assert!(Query::of_json_path("/a.json", vec![]).is_none());

        let q = Query::of_json_path("conf/A.JSON", vec!["$.a".to_string()]).unwrap();
        assert_eq!(q.path(), "/conf/A.JSON");
        assert_eq!(q.query_type(), &QueryType::JsonPath(vec!["$.a".to_string()]));
    }
}
