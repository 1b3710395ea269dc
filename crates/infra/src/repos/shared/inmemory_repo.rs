use recur_scheduler_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) -> anyhow::Result<()> {
    let mut collection = lock(collection)?;
    collection.push(val.clone());
    Ok(())
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) -> anyhow::Result<()> {
    save_by(val, collection, |item| item.id() == val.id())
}

/// Replaces the first item matching `compare` with `val`
pub fn save_by<T: Clone, F: Fn(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> anyhow::Result<()> {
    let mut collection = lock(collection)?;
    match collection.iter().position(|item| compare(item)) {
        Some(index) => {
            collection[index] = val.clone();
            Ok(())
        }
        None => Err(anyhow::anyhow!("Unable to save item which does not exist")),
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().ok()?;
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = match collection.lock() {
        Ok(collection) => collection,
        Err(_) => return Vec::new(),
    };
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    delete_by(collection, |item| item.id() == val_id)
}

/// Removes the first item matching `compare`
pub fn delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Option<T> {
    let mut collection = collection.lock().ok()?;
    let index = collection.iter().position(|item| compare(item))?;
    Some(collection.remove(index))
}

fn lock<T>(collection: &Mutex<Vec<T>>) -> anyhow::Result<std::sync::MutexGuard<'_, Vec<T>>> {
    collection
        .lock()
        .map_err(|_| anyhow::anyhow!("Inmemory collection lock was poisoned"))
}
