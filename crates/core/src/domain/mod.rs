pub mod legacy;
pub mod restaurant;
