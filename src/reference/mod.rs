/*!
 * Scripture reference handling.
 *
 * - `books`: static registry of the 66 canonical books
 * - `parser`: free-text reference to [`ParsedReference`]
 */

pub mod books;
pub mod parser;

pub use books::{BookInfo, lookup, normalize_book_key};
pub use parser::{ParsedReference, parse};
