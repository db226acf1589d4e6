//! In-memory authority for book records.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::models::{Book, BookId, BookStatus, NewBook};

#[derive(Debug)]
struct Shelf {
    books: Vec<Book>,
    next_id: BookId,
}

/// Ordered collection of books with sequential id assignment.
///
/// Every critical section is a single push or field assignment, so a poisoned
/// lock still guards consistent data and is recovered rather than propagated.
#[derive(Debug)]
pub struct BookStore {
    shelf: RwLock<Shelf>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            shelf: RwLock::new(Shelf {
                books: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Shelf> {
        self.shelf.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Shelf> {
        self.shelf.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every book in insertion order.
    pub fn get_all(&self) -> Vec<Book> {
        self.read().books.clone()
    }

    pub fn get_by_id(&self, id: BookId) -> Option<Book> {
        self.read().books.iter().find(|book| book.id == id).cloned()
    }

    /// Books with the given status, in insertion order.
    pub fn get_by_status(&self, status: BookStatus) -> Vec<Book> {
        self.read()
            .books
            .iter()
            .filter(|book| book.status == status)
            .cloned()
            .collect()
    }

    /// Store a new book and return it with its assigned id.
    ///
    /// Ids are handed out under the write lock, so concurrent calls never
    /// share an id. Without deletion the id always equals the prior count + 1.
    pub fn add(&self, new_book: NewBook) -> Book {
        let mut shelf = self.write();

        let book = Book {
            id: shelf.next_id,
            title: new_book.title,
            author: new_book.author,
            status: new_book.status,
        };
        shelf.next_id += 1;
        shelf.books.push(book.clone());

        book
    }

    /// Overwrite the status of `id`. Returns `false` when no such book exists.
    pub fn update_status(&self, id: BookId, status: BookStatus) -> bool {
        let mut shelf = self.write();

        match shelf.books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                book.status = status;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.read().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().books.is_empty()
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn seeded() -> BookStore {
        let store = BookStore::new();
        store.add(NewBook::new("Book 1", "Author 1", BookStatus::ToRead));
        store.add(NewBook::new("Book 2", "Author 2", BookStatus::Reading));
        store.add(NewBook::new("Book 3", "Author 3", BookStatus::ToRead));
        store
    }

    #[test]
    fn new_store_is_empty() {
        let store = BookStore::new();
        assert!(store.is_empty());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn ids_follow_call_order() {
        let store = BookStore::new();
        let ids: Vec<BookId> = (0..5)
            .map(|i| store.add(NewBook::new(format!("t{i}"), "a", BookStatus::Read)).id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn add_keeps_fields_and_accepts_empty_strings() {
        let store = BookStore::new();
        let book = store.add(NewBook::new("", "", BookStatus::Reading));

        assert_eq!(book.id, 1);
        assert_eq!(book.title, "");
        assert_eq!(book.author, "");
        assert_eq!(store.get_by_id(1), Some(book));
    }

    #[test]
    fn get_all_preserves_insertion_order_and_is_stable() {
        let store = seeded();
        let first = store.get_all();
        let second = store.get_all();

        let titles: Vec<_> = first.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Book 1", "Book 2", "Book 3"]);
        assert_eq!(first, second);
    }

    #[test]
    fn get_by_id_misses_return_none() {
        let store = BookStore::new();
        assert_eq!(store.get_by_id(999), None);

        let store = seeded();
        assert_eq!(store.get_by_id(0), None);
        assert_eq!(store.get_by_id(4), None);
    }

    #[test]
    fn get_by_status_is_an_ordered_subset_of_get_all() {
        let store = seeded();
        store.update_status(2, BookStatus::Read);

        for status in BookStatus::ALL {
            let expected: Vec<Book> = store
                .get_all()
                .into_iter()
                .filter(|b| b.status == status)
                .collect();
            assert_eq!(store.get_by_status(status), expected);
        }

        let ids: Vec<_> = store
            .get_by_status(BookStatus::ToRead)
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(store.get_by_status(BookStatus::Reading).is_empty());
    }

    #[test]
    fn update_status_keeps_latest_value() {
        let store = seeded();
        for status in [
            BookStatus::Reading,
            BookStatus::Read,
            BookStatus::Read,
            BookStatus::ToRead,
        ] {
            assert!(store.update_status(1, status));
            assert_eq!(store.get_by_id(1).map(|b| b.status), Some(status));
        }
    }

    #[test]
    fn update_status_on_absent_id_changes_nothing() {
        let store = seeded();
        let before = store.get_all();

        assert!(!store.update_status(42, BookStatus::Read));
        assert_eq!(store.get_all(), before);
    }

    #[test]
    fn scenario_orwell_and_herbert() {
        let store = BookStore::new();
        let orwell = store.add(NewBook::new("1984", "Orwell", BookStatus::ToRead));
        let herbert = store.add(NewBook::new("Dune", "Herbert", BookStatus::Reading));
        assert_eq!((orwell.id, herbert.id), (1, 2));

        assert_eq!(store.get_by_status(BookStatus::ToRead), vec![orwell]);

        store.update_status(1, BookStatus::Read);
        assert_eq!(store.get_by_id(1).unwrap().status, BookStatus::Read);
        assert!(store.get_by_status(BookStatus::ToRead).is_empty());
    }

    #[test]
    fn concurrent_adds_hand_out_distinct_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 50;

        let store = Arc::new(BookStore::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| {
                            store
                                .add(NewBook::new(format!("{t}-{i}"), "a", BookStatus::ToRead))
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<BookId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let total = (THREADS * PER_THREAD) as BookId;
        assert_eq!(ids, (1..=total).collect::<HashSet<_>>());
        assert_eq!(store.len(), THREADS * PER_THREAD);
    }
}
