//! # envflags demo application
//!
//! A pretend service that reads its settings with envflags. It exists to
//! demonstrate and manually verify layering, not to do anything useful.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example envflags_demo
//! DEMO_PORT=9000 cargo run --example envflags_demo -- -verbose
//! DEMO_PORT=9000 cargo run --example envflags_demo -- -DEMO_PORT=9100 -explain
//! DEMO_SHUTDOWN_GRACE=1m30s cargo run --example envflags_demo -- -explain
//! DEMO_PORT=nope cargo run --example envflags_demo       # fatal, exit 2
//! cargo run --example envflags_demo -- -help
//! RUST_LOG=envflags=trace cargo run --example envflags_demo
//! ```

mod config;

use envflags::{Binder, EnvFlagsError};
use tracing_subscriber::EnvFilter;

use config::DemoConfig;

fn fail(err: EnvFlagsError) -> ! {
    match &err {
        // -help lands here; clap has already rendered it.
        EnvFlagsError::Args(help) if !err.is_fatal() => print!("{help}"),
        _ => eprintln!("Failed to load config:\n{err}"),
    }
    std::process::exit(err.exit_code());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = DemoConfig::new();
    let resolution = Binder::new()
        .program_name("envflags-demo")
        .process_args()
        .load(&mut config)
        .unwrap_or_else(|e| fail(e));

    if config.explain {
        println!("{resolution}");
        return;
    }

    if config.verbose {
        println!("{config:#?}");
        println!();
    }

    println!(
        "listening on {}:{} with {} workers (grace {}s, sampling {:.0}%)",
        config.host,
        config.port,
        config.workers,
        config.shutdown_grace.num_seconds(),
        config.sample_rate * 100.0
    );
    if !resolution.remaining_args().is_empty() {
        println!("extra arguments: {:?}", resolution.remaining_args());
    }
}
