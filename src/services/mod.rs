pub mod providers;
pub mod recommendation;
pub mod validation;
