pub mod boundary;
pub mod collision;
pub mod particles;
pub mod trails;
