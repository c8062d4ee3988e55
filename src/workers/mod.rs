pub mod separator;
