// Persistent list editing - the one pattern bookmarks and todos share
//
// Every mutation follows the same cycle: load the whole list, change it
// in memory, write the whole list back. No partial updates, no
// transaction log. All operations are synchronous on the caller's
// thread, which is the only thing standing between distinct mutations
// and a lost update - any async rework here needs a per-key queue.

use crate::models::{Bookmark, TodoItem};
use crate::{keys, Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use startpage_store::Store;
use std::marker::PhantomData;

/// An ordered list of records persisted wholesale under one storage key
pub struct ListStore<'a, T> {
    store: &'a Store,
    key: &'a str,
    _marker: PhantomData<T>,
}

impl<'a, T> ListStore<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'a Store, key: &'a str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// Read the whole list; an absent or unreadable key is an empty list
    pub fn all(&self) -> Vec<T> {
        self.store.load(self.key, Vec::new())
    }

    /// Append a record and persist; returns the new list for re-rendering
    pub fn append(&self, item: T) -> Result<Vec<T>> {
        let mut items = self.all();
        items.push(item);
        self.store.save(self.key, &items)?;
        Ok(items)
    }

    /// Remove the record at `index`, preserving the order of the rest
    pub fn remove_at(&self, index: usize) -> Result<Vec<T>> {
        let mut items = self.all();
        if index >= items.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        items.remove(index);
        self.store.save(self.key, &items)?;
        Ok(items)
    }

    /// Update the record at `index` in place via `f`
    pub fn update_at<F>(&self, index: usize, f: F) -> Result<Vec<T>>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.all();
        match items.get_mut(index) {
            Some(item) => f(item),
            None => {
                return Err(Error::IndexOutOfBounds {
                    index,
                    len: items.len(),
                })
            }
        }
        self.store.save(self.key, &items)?;
        Ok(items)
    }

    /// Keep only the records matching `f` and persist the survivors
    pub fn retain<F>(&self, f: F) -> Result<Vec<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut items = self.all();
        items.retain(f);
        self.store.save(self.key, &items)?;
        Ok(items)
    }

    /// Drop the key entirely; the next `all` reads back empty
    pub fn clear(&self) -> Result<()> {
        self.store.delete(self.key)?;
        Ok(())
    }
}

/// Typed front over the bookmarks list
pub struct Bookmarks<'a> {
    list: ListStore<'a, Bookmark>,
}

impl<'a> Bookmarks<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            list: ListStore::new(store, keys::BOOKMARKS),
        }
    }

    pub fn all(&self) -> Vec<Bookmark> {
        self.list.all()
    }

    pub fn add(&self, title: &str, url: &str) -> Result<Vec<Bookmark>> {
        tracing::debug!("Adding bookmark '{}' -> {}", title, url);
        self.list.append(Bookmark::new(title, url))
    }

    pub fn remove(&self, index: usize) -> Result<Vec<Bookmark>> {
        self.list.remove_at(index)
    }

    pub fn rename(&self, index: usize, title: &str) -> Result<Vec<Bookmark>> {
        self.list.update_at(index, |b| b.title = title.to_string())
    }

    pub fn set_url(&self, index: usize, url: &str) -> Result<Vec<Bookmark>> {
        self.list.update_at(index, |b| b.url = url.to_string())
    }

    /// Destructive: wipe the whole bar (caller confirms first)
    pub fn reset(&self) -> Result<()> {
        tracing::info!("Resetting bookmarks bar");
        self.list.clear()
    }
}

/// Typed front over the todo list
pub struct Todos<'a> {
    list: ListStore<'a, TodoItem>,
}

impl<'a> Todos<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            list: ListStore::new(store, keys::TODOS),
        }
    }

    pub fn all(&self) -> Vec<TodoItem> {
        self.list.all()
    }

    pub fn add(&self, text: &str) -> Result<Vec<TodoItem>> {
        self.list.append(TodoItem::new(text))
    }

    pub fn toggle(&self, index: usize) -> Result<Vec<TodoItem>> {
        self.list.update_at(index, |t| t.done = !t.done)
    }

    pub fn edit_text(&self, index: usize, text: &str) -> Result<Vec<TodoItem>> {
        self.list.update_at(index, |t| t.text = text.to_string())
    }

    pub fn remove(&self, index: usize) -> Result<Vec<TodoItem>> {
        self.list.remove_at(index)
    }

    /// Drop every item already marked done, keeping the rest in order
    pub fn clear_completed(&self) -> Result<Vec<TodoItem>> {
        self.list.retain(|t| !t.done)
    }
}
