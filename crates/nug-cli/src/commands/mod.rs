pub mod coverage;
pub mod grade;
pub mod options;
pub mod scoreboard;
