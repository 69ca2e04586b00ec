pub mod payment;
pub mod success;
