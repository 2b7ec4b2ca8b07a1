use loadpath_core::Loadpath;

pub async fn run(loadpath: &Loadpath, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let roots = loadpath.source_paths().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&roots)?);
    } else {
        for root in roots {
            println!("{}", root.display());
        }
    }
    Ok(())
}
