//! Step definitions binding Gherkin text to the apibdd step handlers
//!
//! `apibdd steps` reads the doc comments in these files to build the step
//! catalog, so every step carries a description and an `# Examples` block.

mod action_steps;
mod assertion_steps;
mod context_steps;

use std::fmt::Display;

use cucumber::gherkin::Step;

/// Fail the step with the error's message
fn check<T, E: Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("{e}"))
}

fn docstring(step: &Step) -> &str {
    step.docstring
        .as_deref()
        .unwrap_or_else(|| panic!("step '{}' needs a doc string", step.value))
}

fn table_rows(step: &Step) -> &[Vec<String>] {
    &step
        .table
        .as_ref()
        .unwrap_or_else(|| panic!("step '{}' needs a data table", step.value))
        .rows
}
