fn main() {
    if let Err(err) = equipstats::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
