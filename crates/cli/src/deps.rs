use loadpath_core::Loadpath;
use tracing::info;

pub async fn run(loadpath: &Loadpath, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let manifests = loadpath.upstream_js_libs().await;
    info!("collected {} dependency manifest(s)", manifests.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&manifests)?);
    } else {
        for manifest in manifests {
            println!("{manifest}");
        }
    }
    Ok(())
}
