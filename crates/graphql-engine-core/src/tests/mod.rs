mod fixtures;

mod coercion_tests;
mod execution_tests;
