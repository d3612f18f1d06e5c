//! Lookups over plain doclet lists.

use crate::model::Doclet;
use std::collections::HashSet;

/// Whether `Class#member` is declared by the class or by any class it
/// extends, following the first `augments` entry at each step.
///
/// Unknown classes and revisited classes end the walk with `false`.
pub fn field_exists_in_class(doclets: &[Doclet], member_longname: &str) -> bool {
    let mut parts = member_longname.split('#');
    let (Some(class_name), Some(member_name)) = (parts.next(), parts.next()) else {
        return false;
    };

    let find = |longname: &str| doclets.iter().find(|d| d.longname == longname);
    let mut visited = HashSet::new();
    let mut current = find(class_name);

    while let Some(class) = current {
        if !visited.insert(class.longname.as_str()) {
            return false;
        }

        let candidate = format!("{}#{}", class.longname, member_name);
        if find(candidate.as_str()).is_some() {
            return true;
        }

        current = class
            .augments
            .as_deref()
            .and_then(|parents| parents.first())
            .and_then(|parent| find(parent.as_str()));
    }

    false
}
