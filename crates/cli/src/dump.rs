use loadpath_core::Loadpath;
use std::path::Path;
use tracing::info;

pub async fn run(loadpath: &Loadpath, outdir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("dumping bundled resources to {}...", outdir.display());
    loadpath.bundle().dump(outdir).await?;
    info!("done");
    Ok(())
}
