#[macro_use]
mod utils;

use centraldogma as cd;
use cd::{
    Change, ChangeContent, CommitDetail, CommitMessage, ContentService, EntryContent,
    EntryType, ProjectService, Query, RepoService, Revision,
};

use std::pin::Pin;

use anyhow::{bail, ensure, Context, Result};
use futures::future::{Future, FutureExt};
use serde_json::json;

struct TestContext {
    client: cd::Client,
    project: cd::Project,
    repo: cd::Repository,
}

async fn run_test<T>(test: T)
where
    for<'a> T: FnOnce(&'a mut TestContext) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>>,
{
    let mut ctx = setup().await.expect("Failed to setup for test");

    let result = test(&mut ctx).await;

    teardown(ctx).await.expect("Failed to teardown test setup");

    result.unwrap();
}

async fn setup() -> Result<TestContext> {
    let client = cd::Client::new(utils::SERVER, None)
        .await
        .context("Failed to create client")?;

    let project = client
        .create_project("TestContentProject")
        .await
        .context("Failed to create new project")?;

    let repo = client
        .project(&project.name)
        .create_repo("TestRepo")
        .await
        .context("Failed to create new repository")?;

    Ok(TestContext {
        client,
        project,
        repo,
    })
}

async fn teardown(ctx: TestContext) -> Result<()> {
    let p = ctx.client.project(&ctx.project.name);
    p.remove_repo(&ctx.repo.name)
        .await
        .context("Failed to remove the repo")?;
    p.purge_repo(&ctx.repo.name)
        .await
        .context("Failed to purge the repo")?;

    ctx.client
        .remove_project(&ctx.project.name)
        .await
        .context("Failed to remove the project")?;
    ctx.client
        .purge_project(&ctx.project.name)
        .await
        .context("Failed to purge the project")?;

    Ok(())
}

fn content_round_trip<'a>(
    ctx: &'a mut TestContext,
) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>> {
    async move {
        let r = ctx.client.repo(&ctx.project.name, &ctx.repo.name);

        let push_result = {
            let commit_msg = CommitMessage {
                summary: "New file".to_string(),
                detail: Some(CommitDetail::Plaintext("detail".to_string())),
            };
            let changes = vec![
                Change {
                    path: "/a.json".to_string(),
                    content: ChangeContent::UpsertJson(json!({"test_key": "test_value"})),
                },
                Change {
                    path: "/b.txt".to_string(),
                    content: ChangeContent::UpsertText("text value".to_string()),
                },
            ];

            r.push(Revision::HEAD, commit_msg, changes)
                .await
                .context(here!("Failed to push file"))?
        };

        // List files
        {
            let entries = r
                .list_files(push_result.revision, "")
                .await
                .context(here!("Failed to list files"))?;
            ensure!(entries.len() == 2, here!("Expect 2 listed files"));
            ensure!(
                entries
                    .iter()
                    .any(|e| e.path == "/a.json" && e.r#type == EntryType::Json),
                here!("a.json not listed")
            );
        }

        // Get single file
        {
            let file = r
                .get_file(push_result.revision, &Query::identity("/a.json").unwrap())
                .await
                .context(here!("Failed to fetch file content"))?;
            match file.content {
                EntryContent::Json(js) if js == json!({"test_key": "test_value"}) => {}
                _ => bail!(here!("Expect same json content")),
            }
        }

        // Get single file with json path
        {
            let query = Query::of_json_path("/a.json", vec!["test_key".to_string()]).unwrap();
            let file = r
                .get_file(push_result.revision, &query)
                .await
                .context(here!("Failed to fetch file content"))?;
            match file.content {
                EntryContent::Json(js) if js == json!("test_value") => {}
                _ => bail!(here!("Expect json path result")),
            }
        }

        // Get multiple files
        {
            let entries = r
                .get_files(push_result.revision, "a*")
                .await
                .context(here!("Failed to fetch multiple files"))?;
            ensure!(entries.len() == 1, here!("wrong number of entries returned"));

            let entries = r
                .get_files(push_result.revision, "*")
                .await
                .context(here!("Failed to fetch multiple files"))?;
            ensure!(entries.len() == 2, here!("wrong number of entries returned"));
            ensure!(
                entries.iter().any(|e| e.path == "/b.txt"
                    && matches!(&e.content, EntryContent::Text(s) if s == "text value\n")),
                here!("Expected value not found")
            );
        }

        // Get file diff
        {
            let changes = vec![Change {
                path: "/a.json".to_string(),
                content: ChangeContent::ApplyJsonPatch(json!([
                    {"op": "replace", "path": "/test_key", "value": "updated_value"},
                    {"op": "add", "path": "/new_key", "value": ["item1", "item2"]}
                ])),
            }];
            r.push(
                Revision::HEAD,
                CommitMessage::only_summary("Update a.json"),
                changes,
            )
            .await
            .context(here!("Failed to push file"))?;

            let diff = r
                .get_diff(
                    Revision::INIT,
                    Revision::HEAD,
                    &Query::identity("/a.json").unwrap(),
                )
                .await
                .context(here!("Failed to get diff"))?;
            ensure!(diff.path == "/a.json", here!("Diff path incorrect"));

            let expected_json = json!({
                "new_key": ["item1", "item2"],
                "test_key": "updated_value"
            });
            match diff.content {
                ChangeContent::UpsertJson(js) if js == expected_json => {}
                _ => bail!(here!("Diff content incorrect")),
            }
        }

        // Get multiple file diffs
        {
            let diffs = r
                .get_diffs(Revision::INIT, Revision::HEAD, "*")
                .await
                .context(here!("Failed to get diffs"))?;
            ensure!(diffs.len() == 2, here!("Expect 2 diffs"));
        }

        // History
        {
            let commits = r
                .get_history(Revision::HEAD, Revision::INIT, "/**", Some(10))
                .await
                .context(here!("Failed to get history"))?;
            ensure!(commits.len() == 3, here!("Expect 3 commits"));
            ensure!(
                commits.iter().any(|c| c.commit_message.summary == "Update a.json"),
                here!("Latest commit missing from history")
            );
        }

        Ok(())
    }
    .boxed()
}

#[tokio::test]
#[ignore = "requires a Central Dogma server on localhost:36462"]
async fn test_content() {
    run_test(content_round_trip).await;
}
