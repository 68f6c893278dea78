//! Functional tests: the full router against a mocked provider


mod library_test;
