// Background jobs

pub mod token_expiry;
