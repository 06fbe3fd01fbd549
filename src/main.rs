//! Triangle probe binary executable.
//!
//! Generates side triples for testing a remote triangle service, measures
//! triples locally, and cleans up the service's stored triangles.

use triangle_probe::{ProbeConfig, run};

fn main() {
    // Initialize logging
    env_logger::init();

    let config = ProbeConfig::build();
    match run(&config) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(e) => {
            log::error!("tprobe failed: {e}");
            std::process::exit(1);
        }
    }
}
