//! Configuration record for the envflags demo.
//!
//! | Env var / flag        | Kind     | Default        |
//! |-----------------------|----------|----------------|
//! | `DEMO_HOST`           | string   | `127.0.0.1`    |
//! | `DEMO_PORT`           | uint64   | `8080`         |
//! | `DEMO_WORKERS`        | int      | `4`            |
//! | `DEMO_SHUTDOWN_GRACE` | duration | `30s`          |
//! | `DEMO_SAMPLE_RATE`    | float64  | `0.25`         |
//! | `DEMO_MAX_BODY`       | uint     | `0x100000`     |
//! | `DEMO_SEED`           | int64    | (zero)         |
//! | `verbose`             | bool     | (zero)         |
//! | `explain`             | bool     | (zero)         |

use chrono::TimeDelta;
use envflags::EnvFlags;

#[derive(EnvFlags, Debug)]
pub struct DemoConfig {
    /// Hostname to bind to.
    #[flag(name = "DEMO_HOST", default = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[flag(name = "DEMO_PORT", default = "8080")]
    pub port: u64,

    /// Number of worker threads.
    #[flag(name = "DEMO_WORKERS", default = "4")]
    pub workers: isize,

    /// How long in-flight requests get on shutdown.
    #[flag(name = "DEMO_SHUTDOWN_GRACE", default = "30s")]
    pub shutdown_grace: TimeDelta,

    /// Fraction of requests traced.
    #[flag(name = "DEMO_SAMPLE_RATE", default = "0.25")]
    pub sample_rate: f64,

    /// Largest accepted request body, in bytes.
    #[flag(name = "DEMO_MAX_BODY", default = "0x100000")]
    pub max_body: usize,

    #[flag(name = "DEMO_SEED")]
    pub seed: i64,

    /// Print the resolved configuration on startup.
    pub verbose: bool,

    /// Print where each value came from and exit.
    pub explain: bool,

    /// Never bound: not public.
    #[allow(dead_code)]
    session_key: String,
}

impl DemoConfig {
    pub fn new() -> Self {
        Self {
            host: String::new(),
            port: 0,
            workers: 0,
            shutdown_grace: TimeDelta::zero(),
            sample_rate: 0.0,
            max_body: 0,
            seed: 0,
            verbose: false,
            explain: false,
            session_key: "generated-at-startup".into(),
        }
    }
}
