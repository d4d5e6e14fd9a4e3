pub mod seed;
pub mod shutdown;
pub mod startup;
