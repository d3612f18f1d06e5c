//! Doclet collection — an arena of doclets with a string-keyed multi-index.
//!
//! Doclets live in insertion order in one arena and are addressed by
//! [`DocletId`]. Any number of keys (a longname, `memberof:<owner>`, …) can
//! point at the same doclet without duplicating it.

use crate::model::Doclet;
use std::collections::HashMap;

/// Position of a doclet inside a [`DocletCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocletId(usize);

#[derive(Debug, Default, Clone)]
pub struct DocletCollection {
    doclets: Vec<Doclet>,
    index: HashMap<String, Vec<DocletId>>,
}

/// Index key grouping doclets by their owner.
pub fn memberof_key(owner: &str) -> String {
    format!("memberof:{owner}")
}

impl DocletCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a doclet without indexing it.
    pub fn insert(&mut self, doclet: Doclet) -> DocletId {
        let id = DocletId(self.doclets.len());
        self.doclets.push(doclet);
        id
    }

    /// Store a doclet and index it under `key`.
    pub fn add(&mut self, key: impl Into<String>, doclet: Doclet) -> DocletId {
        let id = self.insert(doclet);
        self.index(key, id);
        id
    }

    /// Index an already stored doclet under an additional key.
    pub fn index(&mut self, key: impl Into<String>, id: DocletId) {
        self.index.entry(key.into()).or_default().push(id);
    }

    /// Ids indexed under `key`, in insertion order. Unknown keys yield nothing.
    pub fn ids(&self, key: &str) -> &[DocletId] {
        self.index.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Doclets indexed under `key`, in insertion order.
    pub fn get<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Doclet> + 'a {
        self.ids(key).iter().map(move |&id| &self.doclets[id.0])
    }

    pub fn doclet(&self, id: DocletId) -> &Doclet {
        &self.doclets[id.0]
    }

    pub fn doclet_mut(&mut self, id: DocletId) -> &mut Doclet {
        &mut self.doclets[id.0]
    }

    /// Every stored doclet, once each, in insertion order.
    pub fn get_all(&self) -> &[Doclet] {
        &self.doclets
    }

    /// Ids of every stored doclet, in insertion order.
    pub fn all_ids(&self) -> impl Iterator<Item = DocletId> {
        (0..self.doclets.len()).map(DocletId)
    }

    pub fn len(&self) -> usize {
        self.doclets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doclets.is_empty()
    }

    pub fn into_doclets(self) -> Vec<Doclet> {
        self.doclets
    }
}
