//! Scenario-based tests for conveyor

mod mock_runtime;
