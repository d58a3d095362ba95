//! venvkit-rm binary: `venvkit-rm <ENV_ID>` deletes one environment.

fn main() {
    if let Err(e) = venvkit::run_remove() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
