//! Data access layer.

pub mod store {
    pub use crate::store::*;
}
