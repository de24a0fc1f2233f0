// Thin namespace wrapper for HTTP-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod echo_handler {
    pub use crate::echo_handler::*;
}

pub mod view_handler {
    pub use crate::view_handler::*;
}

pub mod routes {
    pub use crate::routes::*;
}
