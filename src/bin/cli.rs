// src/bin/cli.rs
fn main() -> color_eyre::Result<()> {
    isl_scrape::cli::run()
}
