pub mod catalog;
pub mod expand;
pub mod redirect;
