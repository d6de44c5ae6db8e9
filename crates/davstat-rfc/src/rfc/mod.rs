pub mod dav;
