//! Integration tests for action dispatch, handlers, and the local engine

mod action_scenarios;
mod dispatch_lifecycle;
