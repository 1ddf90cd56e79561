//! Tests for the PNM parsing module

mod parser_tests;
