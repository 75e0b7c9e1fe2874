fn main() {
    if let Err(e) = omnilisp_cli::run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
