pub mod backup;
pub mod config;
pub mod iteration;
pub mod policy;
pub mod report;

#[cfg(test)]
mod tests;
