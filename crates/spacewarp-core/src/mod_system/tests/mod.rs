mod support;

pub mod dependency_tests;
pub mod scanner_tests;
pub mod traits_tests;
