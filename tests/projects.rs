#[macro_use]
mod utils;

use centraldogma as cd;
use cd::ProjectService;

use anyhow::{ensure, Context, Result};

#[tokio::test]
#[ignore = "requires a Central Dogma server on localhost:36462"]
async fn test_projects() -> Result<()> {
    let client = cd::Client::new(utils::SERVER, None)
        .await
        .context("Failed to create client")?;

    let invalid_new_project = client.create_project("Test Project").await;
    ensure!(
        invalid_new_project.is_err(),
        here!("Project names with spaces must be rejected")
    );

    let prj_name = "TestProjectLifecycle";
    let new_project = client
        .create_project(prj_name)
        .await
        .context(here!("Failed to create new project"))?;
    ensure!(new_project.name == prj_name, here!("Wrong project name"));

    let projects = client
        .list_projects()
        .await
        .context(here!("Failed to list projects"))?;
    ensure!(
        projects.iter().any(|p| p.name == prj_name),
        here!("New project not listed")
    );

    client
        .remove_project(prj_name)
        .await
        .context(here!("Failed to remove the project"))?;

    let removed_projects = client
        .list_removed_projects()
        .await
        .context(here!("Failed to list removed projects"))?;
    ensure!(
        removed_projects.iter().any(|p| p == prj_name),
        here!("Removed project not listed")
    );

    let unremoved = client
        .unremove_project(prj_name)
        .await
        .context(here!("Failed to unremove project"))?;
    ensure!(unremoved.name == prj_name, here!("Invalid unremove"));

    client
        .remove_project(prj_name)
        .await
        .context(here!("Failed to remove the project again"))?;
    client
        .purge_project(prj_name)
        .await
        .context(here!("Failed to purge the project"))?;

    Ok(())
}
