use anyhow::Result;
use centraldogma::{
    Change, ChangeContent, Client, CommitMessage, ContentService, ProjectService, Query,
    RepoService, Revision,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::new("http://localhost:36462", None).await?;

    let project = client.create_project("Demo").await?;
    let repo = client.project(&project.name).create_repo("config").await?;
    let r = client.repo(&project.name, &repo.name);

    let pushed = r
        .push(
            Revision::HEAD,
            CommitMessage::only_summary("Add settings"),
            vec![Change {
                path: "/settings.json".to_string(),
                content: ChangeContent::UpsertJson(json!({"feature": {"enabled": true}})),
            }],
        )
        .await?;
    println!("Pushed revision: {:?}", pushed.revision);

    let files = r.list_files(Revision::HEAD, "*.json").await?;
    println!("Files: {:?}", files);

    let query = Query::of_json_path("/settings.json", vec!["$.feature.enabled".to_string()])
        .expect("valid json path query");
    let enabled = r.get_file(Revision::HEAD, &query).await?;
    println!("feature.enabled = {:?}", enabled.content);

    let history = r
        .get_history(Revision::HEAD, Revision::INIT, "/**", Some(5))
        .await?;
    println!("History: {:?}", history);

    client.project(&project.name).remove_repo(&repo.name).await?;
    client.remove_project(&project.name).await?;
    client.purge_project(&project.name).await?;

    Ok(())
}
