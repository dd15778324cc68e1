//! Save and submit workflow handlers.

mod save_all;
mod submit_all;

pub use save_all::{SaveAllCommand, SaveAllError, SaveAllHandler, SaveSummary};
pub use submit_all::{
    SubmitAllCommand, SubmitAllError, SubmitAllHandler, SubmitFailure, SubmitSummary,
};
