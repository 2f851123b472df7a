fn main() {
    if let Err(e) = scopebind_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
