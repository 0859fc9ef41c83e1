pub mod cart;
pub mod menu;
pub mod order;
pub mod profile;
pub mod seed;

pub use cart::*;
pub use menu::*;
pub use order::*;
pub use profile::*;
