pub mod errors;
pub mod db;
pub mod dates;
pub mod lenient;
pub mod student;
pub mod location;
pub mod report;
pub mod transaction;
pub mod recycle_bin;

#[cfg(test)]
mod tests;
