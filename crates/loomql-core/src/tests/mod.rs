mod execute_tests;
mod support;
mod validate_tests;
