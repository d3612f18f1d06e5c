//! relation-fixer — complete JSDoc doclet dumps with inherited members.
//!
//! JSDoc leaves out static members and events of parent classes as well as
//! members of implemented interfaces and mixins. This crate post-processes
//! the doclets JSDoc emits in three passes:
//!
//! 1. [`relations::build_relations`] computes `augmentsNested`,
//!    `implementsNested`, `mixesNested` and `descendants`.
//! 2. [`missing::add_missing_doclets`] synthesizes the absent members and
//!    marks superseded ones `ignore: true`.
//! 3. [`typedefs::extend_typedefs`] copies parent typedef properties.
//!
//! Every pass takes a slice and returns new doclets; inputs are never
//! mutated.

pub mod collection;
pub mod error;
pub mod filter;
pub mod missing;
pub mod model;
pub mod output;
pub mod relations;
pub mod typedefs;
pub mod utils;

pub use collection::{DocletCollection, DocletId};
pub use error::{Error, Result};
pub use model::{Doclet, Kind, Property, Relation, Scope};

use tracing::info;

/// How far [`run`] takes the doclets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Stop after computing relation arrays.
    Relations,
    /// Relations, missing members and typedef properties.
    #[default]
    All,
}

impl Stage {
    pub fn parse(name: &str) -> Option<Stage> {
        match name {
            "relations" => Some(Stage::Relations),
            "all" => Some(Stage::All),
            _ => None,
        }
    }
}

/// Run every pass over `doclets`.
pub fn fix_relations(doclets: &[Doclet]) -> Result<Vec<Doclet>> {
    run(doclets, Stage::All)
}

/// Run the passes up to and including `stage`.
pub fn run(doclets: &[Doclet], stage: Stage) -> Result<Vec<Doclet>> {
    let related = relations::build_relations(doclets)?;
    if stage == Stage::Relations {
        return Ok(related);
    }

    let completed = missing::add_missing_doclets(&related);
    let extended = typedefs::extend_typedefs(&completed);

    info!(
        input = doclets.len(),
        output = extended.len(),
        "fixed doclet relations"
    );

    Ok(extended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Vec<Doclet> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn animal_scenario() {
        let input = parse(json!([
            { "longname": "Animal", "name": "Animal", "kind": "class" },
            { "longname": "Animal#speak", "name": "speak", "memberof": "Animal",
              "kind": "function", "scope": "instance" },
            { "longname": "Animal.create", "name": "create", "memberof": "Animal",
              "kind": "function", "scope": "static" },
            { "longname": "Dog", "name": "Dog", "kind": "class", "augments": ["Animal"] }
        ]));

        let out = fix_relations(&input).unwrap();
        let get = |l: &str| out.iter().find(|d| d.longname == l).unwrap();

        assert_eq!(get("Dog").augments_nested.as_deref().unwrap(), ["Animal"]);
        assert_eq!(get("Animal").descendants.as_deref().unwrap(), ["Dog"]);

        let create = get("Dog.create");
        assert_eq!(create.memberof.as_deref(), Some("Dog"));
        assert_eq!(create.inherited, Some(true));
        assert_eq!(create.name.as_deref(), Some("create"));
        assert!(out.iter().all(|d| d.longname != "Dog#speak"));
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn relations_stage_adds_nothing() {
        let input = parse(json!([
            { "longname": "A", "kind": "class" },
            { "longname": "A.x", "memberof": "A", "kind": "member", "scope": "static" },
            { "longname": "B", "kind": "class", "augments": ["A"] }
        ]));

        let out = run(&input, Stage::Relations).unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out[2].augments_nested.as_deref().unwrap(), ["A"]);
    }

    #[test]
    fn typedefs_are_extended_after_synthesis() {
        let input = parse(json!([
            { "longname": "Options", "kind": "typedef",
              "properties": [{ "name": "debug", "type": { "names": ["Boolean"] } }] },
            { "longname": "EditorOptions", "kind": "typedef", "augments": ["Options"],
              "properties": [{ "name": "language" }] }
        ]));

        let out = fix_relations(&input).unwrap();
        let props = serde_json::to_value(&out[1].properties).unwrap();

        assert_eq!(
            props,
            json!([
                { "name": "language" },
                { "name": "debug", "inherited": true, "type": { "names": ["Boolean"] } }
            ])
        );
    }

    #[test]
    fn cycle_fails_the_run() {
        let input = parse(json!([
            { "longname": "A", "kind": "interface", "augments": ["B"] },
            { "longname": "B", "kind": "interface", "augments": ["A"] }
        ]));

        assert!(matches!(
            fix_relations(&input),
            Err(Error::RelationCycle { .. })
        ));
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::parse("relations"), Some(Stage::Relations));
        assert_eq!(Stage::parse("all"), Some(Stage::All));
        assert_eq!(Stage::parse("render"), None);
    }
}
