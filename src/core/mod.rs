// Domain-layer modules and shared errors/models
pub mod fines {
    pub use crate::fines::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
