//! Unit tests for the token service

mod revocation_tests;
