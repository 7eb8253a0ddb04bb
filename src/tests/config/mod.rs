//! Configuration tests.

mod walk_config_tests;
