pub mod book;
pub mod favorite;
pub mod transaction;
pub mod user;

pub use book::PostgresBookRepository;
pub use favorite::PostgresFavoriteRepository;
pub use transaction::PostgresTransactionRepository;
pub use user::PostgresUserRepository;
