//! Typedef property extension.
//!
//! A typedef that `@extends` another typedef gets copies of the parent's
//! properties it does not declare itself, flagged `inherited: true`.

use crate::model::{Doclet, Kind, Property};
use std::collections::HashMap;
use tracing::debug;

/// Copy parent typedef properties into extending typedefs.
///
/// Requires `augmentsNested` from [`crate::relations::build_relations`].
/// Parent properties are read from the input, before any typedef is
/// extended; unknown parents contribute nothing. A typedef without a
/// `properties` list is left as it is.
pub fn extend_typedefs(doclets: &[Doclet]) -> Vec<Doclet> {
    let mut parents: HashMap<&str, &[Property]> = HashMap::new();
    for doclet in doclets.iter().filter(|d| d.is_kind(&Kind::Typedef)) {
        parents
            .entry(doclet.longname.as_str())
            .or_insert_with(|| doclet.properties.as_deref().unwrap_or_default());
    }

    let mut out = doclets.to_vec();
    for child in out.iter_mut().filter(|d| d.is_kind(&Kind::Typedef)) {
        let Some(own) = child.properties.as_mut() else {
            continue;
        };
        let ancestors = child.augments_nested.as_deref().unwrap_or_default();
        for parent in ancestors {
            let Some(&properties) = parents.get(parent.as_str()) else {
                debug!(typedef = %child.longname, %parent, "parent typedef not found");
                continue;
            };

            for property in properties {
                if own.iter().any(|p| p.name == property.name) {
                    continue;
                }
                let mut inherited = property.clone();
                inherited.inherited = Some(true);
                own.push(inherited);
            }
        }
    }

    out
}
