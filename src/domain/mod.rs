// Tradable contracts and contract types
pub mod contract;

// Report recipient validation
pub mod email;

// Domain-specific error types
pub mod errors;

// Advisor-mode account restrictions
pub mod restriction;
