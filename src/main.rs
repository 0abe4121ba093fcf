fn main() {
    if let Err(err) = band_site_lib::run() {
        eprintln!("band-site failed: {err:#}");
        std::process::exit(1);
    }
}
