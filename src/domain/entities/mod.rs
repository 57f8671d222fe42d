//! Core business data structures.

pub mod redirect;

pub use redirect::{Redirect, RedirectLinks, RedirectPage, RedirectSelf};
