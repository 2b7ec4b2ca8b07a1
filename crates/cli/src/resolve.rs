use loadpath_core::{Loadpath, Resource};

pub async fn run(
    loadpath: &Loadpath,
    name: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(resource) = loadpath.resource(name).await else {
        return Err(format!("{name}: not found on any root").into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&resource)?);
        return Ok(());
    }

    match resource {
        Resource::Bundled { name } => println!("bundled: {name}"),
        Resource::File { path } => println!("file: {}", path.display()),
        Resource::Archive {
            archive,
            entry,
            modified_ms,
        } => println!(
            "archive: {} !/{entry} (modified {modified_ms})",
            archive.display()
        ),
    }
    Ok(())
}
