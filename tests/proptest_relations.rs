//! Property-based tests for relation building and member synthesis.
//!
//! These tests verify the behavioral contracts over generated acyclic
//! hierarchies:
//! - Closures are fixed points of the builder
//! - Nested arrays and descendants hold no duplicates
//! - Descendants mirror the nested relations
//! - Synthesized longnames are unique and owned by the child
//! - A synthesized longname never sits next to another live doclet

use proptest::prelude::*;
use relation_fixer::relations::build_relations;
use relation_fixer::{fix_relations, Doclet, Relation, Scope};
use std::collections::HashSet;

// =============================================================================
// Strategies for generating test data
// =============================================================================

fn kind_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("class"),
        Just("interface"),
        Just("mixin"),
        Just("typedef"),
    ]
}

/// Edges to earlier entities only, which keeps every hierarchy acyclic.
fn hierarchy_strategy(max_entities: usize) -> impl Strategy<Value = Vec<Doclet>> {
    (1..=max_entities).prop_flat_map(|count| {
        let entities = (0..count)
            .map(|i| {
                let targets = if i == 0 {
                    Just(Vec::new()).boxed()
                } else {
                    proptest::collection::vec((0..i, 0..3_usize), 0..=i.min(3)).boxed()
                };
                (kind_strategy(), targets)
            })
            .collect::<Vec<_>>();

        entities.prop_map(|entities| {
            entities
                .into_iter()
                .enumerate()
                .map(|(i, (kind, targets))| {
                    let mut doclet = Doclet::new(format!("E{i}"), kind);
                    for (target, relation) in targets {
                        let list = match relation {
                            0 => &mut doclet.augments,
                            1 => &mut doclet.implements,
                            _ => &mut doclet.mixes,
                        };
                        list.get_or_insert_with(Vec::new).push(format!("E{target}"));
                    }
                    doclet
                })
                .collect()
        })
    })
}

/// A hierarchy plus one static and one instance member per entity.
fn documented_strategy() -> impl Strategy<Value = Vec<Doclet>> {
    hierarchy_strategy(8).prop_map(|entities| {
        let mut doclets = entities.clone();
        for owner in &entities {
            for scope in [Scope::Static, Scope::Instance] {
                let name = if scope == Scope::Static { "create" } else { "render" };
                doclets.push(Doclet {
                    name: Some(name.to_string()),
                    memberof: Some(owner.longname.clone()),
                    scope: Some(scope.clone()),
                    ..Doclet::new(
                        format!("{}{}{}", owner.longname, scope.separator(), name),
                        "function",
                    )
                });
            }
        }
        doclets
    })
}

fn all_unique(items: &[String]) -> bool {
    items.iter().collect::<HashSet<_>>().len() == items.len()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn closure_is_a_fixed_point(doclets in hierarchy_strategy(10)) {
        let once = build_relations(&doclets).unwrap();
        let twice = build_relations(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn nested_arrays_have_no_duplicates(doclets in hierarchy_strategy(10)) {
        let out = build_relations(&doclets).unwrap();
        for doclet in &out {
            for relation in Relation::ALL {
                prop_assert!(all_unique(relation.nested(doclet)), "{} {}", doclet.longname, relation);
            }
            prop_assert!(all_unique(doclet.descendants.as_deref().unwrap_or_default()));
        }
    }

    #[test]
    fn descendants_mirror_ancestors(doclets in hierarchy_strategy(10)) {
        let out = build_relations(&doclets).unwrap();
        for x in &out {
            for relation in Relation::ALL {
                for ancestor in relation.nested(x) {
                    let d = out.iter().find(|d| &d.longname == ancestor).unwrap();
                    prop_assert!(d.has_descendant(&x.longname), "{} missing {}", ancestor, x.longname);
                }
            }
        }
        for d in &out {
            for descendant in d.descendants.as_deref().unwrap_or_default() {
                let x = out.iter().find(|x| &x.longname == descendant).unwrap();
                let reaches = Relation::ALL
                    .iter()
                    .any(|r| r.nested(x).contains(&d.longname));
                prop_assert!(reaches);
            }
        }
    }

    #[test]
    fn direct_relations_are_included(doclets in hierarchy_strategy(10)) {
        let out = build_relations(&doclets).unwrap();
        for doclet in &out {
            for relation in Relation::ALL {
                for target in relation.direct(doclet) {
                    prop_assert!(relation.nested(doclet).contains(target));
                }
            }
        }
    }

    #[test]
    fn input_is_left_untouched(doclets in documented_strategy()) {
        let before = doclets.clone();
        let _ = fix_relations(&doclets).unwrap();
        prop_assert_eq!(doclets, before);
    }

    #[test]
    fn synthesized_doclets_are_unique_and_owned(doclets in documented_strategy()) {
        let out = fix_relations(&doclets).unwrap();
        let added = &out[doclets.len()..];

        let mut seen = HashSet::new();
        for doclet in added {
            prop_assert!(seen.insert(doclet.longname.clone()), "duplicate {}", doclet.longname);
            let owner = doclet.memberof.as_deref().unwrap();
            prop_assert!(doclet.longname.starts_with(owner));
            let suffix = &doclet.longname[owner.len()..];
            let separator = if doclet.scope == Some(Scope::Static) { "." } else { "#" };
            prop_assert!(suffix.starts_with(separator));
        }
    }

    #[test]
    fn synthesized_longnames_have_one_live_doclet(doclets in documented_strategy()) {
        let out = fix_relations(&doclets).unwrap();
        for added in &out[doclets.len()..] {
            let live = out
                .iter()
                .filter(|d| d.longname == added.longname && !d.is_ignored())
                .count();
            prop_assert_eq!(live, 1, "{}", added.longname);
        }
    }

    #[test]
    fn fixing_is_deterministic(doclets in documented_strategy()) {
        prop_assert_eq!(fix_relations(&doclets).unwrap(), fix_relations(&doclets).unwrap());
    }
}
