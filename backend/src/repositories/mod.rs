pub mod search;

pub use search::{PgArticleSearch, PgTicketSearch};
