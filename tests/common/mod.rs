//! Common utilities for integration tests
#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantGrowth, ExponentialDecay, LogisticGrowth};
pub use test_helpers::{
    assert_states_close,
    create_simple_scenario,
    final_mass,
    max_error_against_closed_form,
    relative_error,
    tank_scenario,
};
