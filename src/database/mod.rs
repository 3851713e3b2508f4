pub mod db;
pub mod starter;
