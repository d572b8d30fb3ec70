// Domain-layer modules and shared errors/models
pub mod leads {
    pub use crate::leads::*;
}

pub mod auth {
    pub use crate::auth::*;
}

pub mod scoring {
    pub use crate::scoring::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
