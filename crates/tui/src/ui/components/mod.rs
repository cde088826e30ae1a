pub mod hints;
pub mod money;
pub mod toast;
