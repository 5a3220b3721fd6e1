// Services module - Business logic

pub mod token_validator;
