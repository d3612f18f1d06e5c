//! Member filters for the synthesizer.
//!
//! A [`MemberFilter`] names the attributes a candidate member must match
//! exactly. It compiles into a list of predicates that are all required to
//! hold.

use crate::model::{Doclet, Kind, Scope};

pub type Predicate = Box<dyn Fn(&Doclet) -> bool>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub scope: Option<Scope>,
    pub kind: Option<Kind>,
}

impl MemberFilter {
    /// Matches every doclet.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn scope(scope: Scope) -> Self {
        MemberFilter {
            scope: Some(scope),
            ..Self::default()
        }
    }

    pub fn kind(kind: Kind) -> Self {
        MemberFilter {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates: Vec<Predicate> = Vec::new();
        if let Some(scope) = self.scope.clone() {
            predicates.push(Box::new(move |d: &Doclet| d.scope.as_ref() == Some(&scope)));
        }
        if let Some(kind) = self.kind.clone() {
            predicates.push(Box::new(move |d: &Doclet| d.kind.as_ref() == Some(&kind)));
        }
        predicates
    }
}
