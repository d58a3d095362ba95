fn main() {
    if let Err(e) = venvkit::run_cli() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
