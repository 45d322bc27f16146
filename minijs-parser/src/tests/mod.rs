mod test_declarations;
mod test_expressions;
mod test_lexer;
