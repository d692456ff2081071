#[cfg(test)]
pub mod test {
    use chrono::TimeDelta;

    use crate::flagset::{EnvFlags, FlagSet};

    /// One field per supported kind plus a private one that must never be
    /// bound.
    #[derive(Debug, PartialEq)]
    pub struct TestRecord {
        pub s: String,
        pub b: bool,
        pub i: isize,
        pub i64: i64,
        pub f64: f64,
        pub d: TimeDelta,
        pub ui: usize,
        pub ui64: u64,
        unexported: String,
    }

    impl TestRecord {
        pub fn new() -> Self {
            Self {
                s: String::new(),
                b: false,
                i: 0,
                i64: 0,
                f64: 0.0,
                d: TimeDelta::zero(),
                ui: 0,
                ui64: 0,
                unexported: String::new(),
            }
        }

        pub fn unexported(&self) -> &str {
            &self.unexported
        }
    }

    impl EnvFlags for TestRecord {
        fn bind_fields<'a>(&'a mut self, set: &mut FlagSet<'a>) {
            set.field("TEST_STRING", "", &mut self.s)
                .field("TEST_BOOL", "", &mut self.b)
                .field("TEST_INT", "", &mut self.i)
                .field("TEST_INT64", "", &mut self.i64)
                .field("TEST_FLOAT64", "", &mut self.f64)
                .field("TEST_DURATION", "", &mut self.d)
                .field("TEST_UINT", "", &mut self.ui)
                .field("TEST_UINT64", "", &mut self.ui64);
        }
    }

    /// Same shape as [`TestRecord`], with a default literal on every field.
    #[derive(Debug, PartialEq)]
    pub struct DefaultsRecord {
        pub s: String,
        pub i: isize,
        pub i64: i64,
        pub f64: f64,
        pub d: TimeDelta,
        pub ui: usize,
        pub ui64: u64,
        unexported: String,
    }

    impl DefaultsRecord {
        pub fn new() -> Self {
            Self {
                s: String::new(),
                i: 0,
                i64: 0,
                f64: 0.0,
                d: TimeDelta::zero(),
                ui: 0,
                ui64: 0,
                unexported: String::new(),
            }
        }

        pub fn unexported(&self) -> &str {
            &self.unexported
        }
    }

    impl EnvFlags for DefaultsRecord {
        fn bind_fields<'a>(&'a mut self, set: &mut FlagSet<'a>) {
            set.field("DTEST_STRING", "teststring", &mut self.s)
                .field("DTEST_INT", "42", &mut self.i)
                .field("DTEST_INT64", "4242", &mut self.i64)
                .field("DTEST_FLOAT64", "3.1416", &mut self.f64)
                .field("DTEST_DURATION", "1h2m3s", &mut self.d)
                .field("DTEST_UINT", "0xff", &mut self.ui)
                .field("DTEST_UINT64", "0xffff", &mut self.ui64);
        }
    }

    #[test]
    fn test_record_binds_every_public_field() {
        let mut r = TestRecord::new();
        let mut set = FlagSet::new();
        r.bind_fields(&mut set);
        assert_eq!(set.len(), 8);
        assert!(set.lookup("CANNOT_BE_SET").is_none());
    }
}
