pub mod deploy;
pub mod serve;
