use std::process;

fn main() {
    if let Err(e) = taskr::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
