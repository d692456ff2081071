#![cfg(feature = "derive")]

use chrono::TimeDelta;
use envflags::{Binder, EnvFlags, EnvFlagsError, FlagKind, FlagSet, ValueSource};

#[derive(EnvFlags, Debug)]
struct Service {
    /// Greeting sent to clients.
    #[flag(name = "X")]
    pub greeting: String,

    #[flag(name = "Y", default = "42")]
    pub workers: isize,

    #[flag(name = "Z", default = "1h2m3s")]
    pub drain: TimeDelta,

    #[flag(name = "W", default = "10")]
    pub retries: isize,

    pub verbose: bool,

    #[flag(name = "RATIO", default = "not a float")]
    pub(crate) ratio: f64,

    #[flag(name = "HIDDEN", default = "still private")]
    hidden: String,

    pub tags: Vec<String>,

    #[flag(skip)]
    pub skipped: u64,
}

impl Service {
    fn new() -> Self {
        Self {
            greeting: String::new(),
            workers: 0,
            drain: TimeDelta::zero(),
            retries: 0,
            verbose: false,
            ratio: 1.0,
            hidden: "initial".into(),
            tags: vec!["keep".into()],
            skipped: 99,
        }
    }
}

#[test]
fn binds_public_supported_fields_in_order() {
    let mut svc = Service::new();
    let mut set = FlagSet::new();
    svc.bind_fields(&mut set);

    let names: Vec<&str> = set.flags().iter().map(|f| f.name()).collect();
    assert_eq!(names, ["X", "Y", "Z", "W", "verbose", "RATIO"]);
    assert_eq!(set.lookup("Z").unwrap().kind(), FlagKind::Duration);
    assert_eq!(set.lookup("X").unwrap().help(), "Greeting sent to clients.");
    assert!(set.lookup("HIDDEN").is_none());
}

#[test]
fn string_from_env() {
    let mut svc = Service::new();
    Binder::new()
        .env_vars([("X", "hello")])
        .load(&mut svc)
        .unwrap();
    assert_eq!(svc.greeting, "hello");
}

#[test]
fn int_default_without_env() {
    let mut svc = Service::new();
    Binder::new().env_vars(Vec::<(String, String)>::new()).load(&mut svc).unwrap();
    assert_eq!(svc.workers, 42);
}

#[test]
fn duration_env_beats_default() {
    let mut svc = Service::new();
    Binder::new()
        .env_vars([("Z", "7h2m3s")])
        .load(&mut svc)
        .unwrap();
    assert_eq!(
        svc.drain,
        TimeDelta::hours(7) + TimeDelta::minutes(2) + TimeDelta::seconds(3)
    );
}

#[test]
fn argument_beats_env() {
    let mut svc = Service::new();
    Binder::new()
        .env_vars([("W", "-5")])
        .args(["-W=55"])
        .load(&mut svc)
        .unwrap();
    assert_eq!(svc.retries, 55);
}

#[test]
fn unparseable_default_becomes_zero() {
    let mut svc = Service::new();
    let resolution = Binder::new()
        .env_vars(Vec::<(String, String)>::new())
        .load(&mut svc)
        .unwrap();
    assert_eq!(svc.ratio, 0.0);
    assert_eq!(resolution.get("RATIO").unwrap().source, ValueSource::Zero);
}

#[test]
fn ineligible_fields_are_never_touched() {
    let mut svc = Service::new();
    Binder::new()
        .env_vars([("HIDDEN", "leak"), ("hidden", "leak"), ("tags", "a"), ("skipped", "1")])
        .load(&mut svc)
        .unwrap();
    assert_eq!(svc.hidden, "initial");
    assert_eq!(svc.tags, ["keep"]);
    assert_eq!(svc.skipped, 99);
}

#[test]
fn private_name_on_command_line_is_unknown() {
    let mut svc = Service::new();
    let err = Binder::new()
        .no_env()
        .args(["-HIDDEN=leak"])
        .load(&mut svc)
        .unwrap_err();
    assert!(matches!(err, EnvFlagsError::Args(_)));
    assert_eq!(svc.hidden, "initial");
}

#[test]
fn bare_bool_flag() {
    let mut svc = Service::new();
    Binder::new().no_env().args(["-verbose"]).load(&mut svc).unwrap();
    assert!(svc.verbose);
}

#[derive(EnvFlags)]
struct Runner {
    #[flag(name = "test.run")]
    pub run: String,

    pub r#type: String,

    pub grace: chrono::Duration,
}

#[test]
fn reserved_tokens_never_reach_a_colliding_field() {
    let mut runner = Runner {
        run: String::new(),
        r#type: String::new(),
        grace: TimeDelta::zero(),
    };
    Binder::new()
        .no_env()
        .args(["-test.run=oops", "--test.run", "-type=worker", "-grace=90s"])
        .load(&mut runner)
        .unwrap();
    assert_eq!(runner.run, "");
    assert_eq!(runner.r#type, "worker");
    assert_eq!(runner.grace, TimeDelta::seconds(90));
}

#[derive(EnvFlags)]
struct Wrapper<T> {
    #[flag(name = "PORT", default = "0x1f90")]
    pub port: u64,
    pub extra: T,
}

#[test]
fn generic_struct_binds_concrete_fields() {
    let mut w = Wrapper {
        port: 0,
        extra: vec![1u8],
    };
    Binder::new().no_env().load(&mut w).unwrap();
    assert_eq!(w.port, 8080);
    assert_eq!(w.extra, [1]);
}

#[test]
fn bad_value_is_fatal_and_leaves_record_alone() {
    let mut svc = Service::new();
    svc.greeting = "before".into();
    let err = Binder::new()
        .env_vars([("X", "after"), ("Y", "lots")])
        .load(&mut svc)
        .unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.exit_code(), 2);
    assert_eq!(svc.greeting, "before");
}

#[test]
fn resolution_report_display() {
    let mut svc = Service::new();
    let resolution = Binder::new()
        .env_vars([("X", "hi")])
        .args(["-W", "3"])
        .load(&mut svc)
        .unwrap();
    let listing = resolution.to_string();
    assert!(listing.contains("X = hi (env)"));
    assert!(listing.contains("Z = 1h2m3s (default)"));
    assert!(listing.contains("W = 3 (arg)"));
}
