use std::process;

fn main() {
    bundul_core::init();
    if let Err(err) = bundul_core::cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
