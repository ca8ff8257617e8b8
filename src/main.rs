fn main() {
    if let Err(err) = csv_forge::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
