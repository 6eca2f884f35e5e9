//! Text transformation operations.
//!
//! Each function here is one normalization step and can be used on its own:
//! - **whitespace**: collapses whitespace runs
//! - **tokenizer**: splits on literal spaces for stop-word filtering
//! - **filter**: removes stop words
//! - **marks**: accent and symbol removal by Unicode category
//! - **replace**: characters, punctuation, hyphens and pattern matches

pub mod filter;
pub mod marks;
pub mod replace;
pub mod tokenizer;
pub mod whitespace;
