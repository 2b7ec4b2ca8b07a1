use loadpath_core::Loadpath;
use tracing::info;

pub async fn run(loadpath: &Loadpath, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let readers = loadpath.upstream_data_readers().await;
    info!("collected {} data-reader registration(s)", readers.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&readers)?);
    } else {
        for reader in readers {
            println!("{}:", reader.url.display());
            println!("{}", reader.source);
        }
    }
    Ok(())
}
