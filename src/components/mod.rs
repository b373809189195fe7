pub mod picker;
pub mod preview;
