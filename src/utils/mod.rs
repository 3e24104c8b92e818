pub mod letters;
pub mod words;
