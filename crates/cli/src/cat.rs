use loadpath_core::Loadpath;

pub async fn run(loadpath: &Loadpath, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Bundle fast path first, then the root scan
    if let Some(content) = loadpath.load(name).await {
        print!("{content}");
        return Ok(());
    }

    match loadpath.read_source(name).await {
        Some(source) => {
            print!("{}", source.content);
            Ok(())
        }
        None => Err(format!("{name}: not found on any root").into()),
    }
}
