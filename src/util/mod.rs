pub mod duration;
pub mod file_size;
pub mod locale;
pub mod relative_date;
pub mod url;
pub mod youtube;
