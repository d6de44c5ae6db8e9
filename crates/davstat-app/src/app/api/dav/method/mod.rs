pub mod not_implemented;
pub mod options;
pub mod propfind;
