pub mod clipboard;
pub mod debouncer;
