//! Book detail state for the book page.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use bridge::{Book, GetBookArgs, commands};

use crate::net::gateway::{Gateway, RemoteResult};

/// What the book page shows: the last loaded book and the last failure.
///
/// Every load is tagged with a generation; only the newest one may land.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookState {
    pub book: Option<Book>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl BookState {
    /// Start a load and return its generation, superseding any load in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.generation
    }

    /// Show `message` without loading anything; loads in flight are dropped.
    pub fn reject(&mut self, message: String) {
        self.generation = self.generation.wrapping_add(1);
        self.loading = false;
        self.book = None;
        self.error = Some(message);
    }

    /// Fold a load result in. A failure keeps the previously shown book.
    ///
    /// Returns `false`, leaving the state alone, when `generation` is no
    /// longer the newest load.
    pub fn finish_load(&mut self, generation: u64, outcome: RemoteResult<Book>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(book) => {
                self.book = Some(book);
                self.error = None;
            }
            Err(e) => self.error = Some(e.message()),
        }
        true
    }
}

/// Fetch one book from the active database.
///
/// # Errors
///
/// The host's failure; code 41 when no book has this id, 22 when no
/// database is active.
pub async fn load_book(gateway: &Gateway, id: i64) -> RemoteResult<Book> {
    gateway.call_with_args(commands::GET_BOOK, &GetBookArgs { id }).await
}
