pub mod simulate;

#[cfg(feature = "server")]
pub mod serve;
