pub mod ids;
mod models;

pub use ids::change_id_for;
pub use models::*;
