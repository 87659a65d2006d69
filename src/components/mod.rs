pub mod background;
pub mod help;
pub mod sprite;
