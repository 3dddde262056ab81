//! Cart domain module.

mod cart_item;

pub use cart_item::{CartItem, CartStatus};
