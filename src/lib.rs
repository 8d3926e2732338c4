//! Small tools for seeing what is going on in Chrome from a terminal: which tabs are open right
//! now and which pages were visited last, with a nudge when some of them are known time sinks.
//!

pub mod cli;
pub mod distraction;
pub mod history;
pub mod tabs;
pub mod utils;
