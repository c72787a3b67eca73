pub mod run;
pub mod sample;
