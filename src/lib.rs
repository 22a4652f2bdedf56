pub mod config;
pub mod draft;
pub mod output;
pub mod run;
pub mod scoring;
