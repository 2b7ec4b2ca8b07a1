fn main() {
    if let Err(e) = loadpath_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
