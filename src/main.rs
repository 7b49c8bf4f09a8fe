fn main() {
    // Developer-friendly default logging (info+) unless RUST_LOG overrides.
    let default = "info,walkabout=info";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();
    if let Err(e) = walkabout::demo::run(10.0) {
        eprintln!("error: {e}");
    }
}
