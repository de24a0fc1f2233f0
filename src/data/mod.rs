//! Store access and rendering collaborators.

pub mod db {
    pub use crate::db::*;
}

pub mod db_storage {
    pub use crate::db_storage::*;
}

pub mod views {
    pub use crate::views::*;
}
