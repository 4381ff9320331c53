use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the id mapping: a dataset movie id and the external database id
/// for the same movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieLink {
    /// Identifier used by the local dataset (e.g., MovieLens "1").
    pub movie_id: String,
    /// Identifier used by the external database, without its "tt" prefix (e.g., "0114709").
    pub external_id: String,
}

/// Ordered mapping from local movie id to external id.
///
/// Iteration follows first-insertion order. Inserting a movie id that is
/// already present replaces its external id in place, so the last write wins
/// while the row keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct IdMapping {
    links: Vec<MovieLink>,
    index: HashMap<String, usize>,
    duplicates: usize,
}

impl IdMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link. Returns the external id it replaced, if the movie id was
    /// already mapped.
    pub fn insert(
        &mut self,
        movie_id: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Option<String> {
        let movie_id = movie_id.into();
        let external_id = external_id.into();

        if let Some(&pos) = self.index.get(&movie_id) {
            self.duplicates += 1;
            let previous = std::mem::replace(&mut self.links[pos].external_id, external_id);
            return Some(previous);
        }

        self.index.insert(movie_id.clone(), self.links.len());
        self.links.push(MovieLink {
            movie_id,
            external_id,
        });
        None
    }

    /// Look up the external id for a movie id.
    pub fn get(&self, movie_id: &str) -> Option<&str> {
        self.index
            .get(movie_id)
            .map(|&pos| self.links[pos].external_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of inserts that overwrote an existing movie id.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieLink> {
        self.links.iter()
    }

    /// Keep only the first `limit` links.
    pub fn truncate(&mut self, limit: usize) {
        if limit >= self.links.len() {
            return;
        }
        for link in self.links.drain(limit..) {
            self.index.remove(&link.movie_id);
        }
    }
}

impl<'a> IntoIterator for &'a IdMapping {
    type Item = &'a MovieLink;
    type IntoIter = std::slice::Iter<'a, MovieLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
