/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL generation for table creation and indexing.
/// All methods return `&'static str` so implementations can build their
/// statements with `const_format::concatcp!` from the table constants.
///
/// # Design
///
/// This trait contains no I/O operations; it purely describes table structure.
/// [`create`](crate::create) applies it to a live connection.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}
