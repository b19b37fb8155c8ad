pub mod clock;
pub mod jobs;
pub mod state;
