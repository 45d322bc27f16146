mod test_collections;
mod test_control_flow;
mod test_errors;
mod test_expressions;
