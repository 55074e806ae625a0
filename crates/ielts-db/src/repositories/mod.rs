// Repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they take a `&PgPool` or a `&mut *tx` inside a transaction.

pub mod user;
pub mod vocabulary;
