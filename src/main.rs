fn main() {
    if let Err(err) = lifeline::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
