pub mod intake;
pub mod selection;
