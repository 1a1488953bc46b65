//! Shared `rstest` fixtures for the whitebox suite.

use std::sync::Arc;

use crate::access::{OperatorDescriptor, StackSnapshot, StringOperator, StringStack};
use crate::analyzer::Context;
use rstest::fixture;

#[fixture]
pub fn context() -> Context {
    Context::default()
}

#[fixture]
pub fn operator() -> Arc<dyn OperatorDescriptor> {
    Arc::new(StringOperator("op".into()))
}

#[fixture]
pub fn stack() -> Arc<dyn StackSnapshot> {
    Arc::new(StringStack("<fixture stack>".into()))
}
