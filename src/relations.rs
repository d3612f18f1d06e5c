//! Relation builder: transitive `augments`/`implements`/`mixes` closures.
//!
//! For every class, interface, mixin and typedef this computes
//! `augmentsNested`, `implementsNested` and `mixesNested` (every ancestor
//! reachable through the relation, nearest first) and the inverse
//! `descendants` list.
//!
//! If `ClassB` extends `ClassA` and `ClassA` implements `InterfaceC`, both
//! classes end up with `implementsNested: ["InterfaceC"]` and `InterfaceC`
//! gets `descendants: ["ClassA", "ClassB"]`.

use crate::collection::{DocletCollection, DocletId};
use crate::error::{Error, Result};
use crate::model::{Doclet, Relation};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info};

/// Ancestor longnames of one entity, grouped by relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors {
    pub augments: Vec<String>,
    pub implements: Vec<String>,
    pub mixes: Vec<String>,
}

impl Ancestors {
    pub fn get(&self, relation: Relation) -> &[String] {
        match relation {
            Relation::Augments => &self.augments,
            Relation::Implements => &self.implements,
            Relation::Mixes => &self.mixes,
        }
    }

    fn get_mut(&mut self, relation: Relation) -> &mut Vec<String> {
        match relation {
            Relation::Augments => &mut self.augments,
            Relation::Implements => &mut self.implements,
            Relation::Mixes => &mut self.mixes,
        }
    }

    fn dedup(&mut self) {
        for relation in Relation::ALL {
            dedup_in_order(self.get_mut(relation));
        }
    }
}

/// Remove repeated entries, keeping the first occurrence of each.
fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

/// Annotate every relation subject with its nested relations and descendants.
///
/// The input is left untouched; the returned doclets are annotated copies in
/// the same order. Fails with [`Error::RelationCycle`] if an entity can reach
/// itself through its relations.
pub fn build_relations(doclets: &[Doclet]) -> Result<Vec<Doclet>> {
    let mut collection = DocletCollection::new();
    for doclet in doclets {
        collection.add(doclet.longname.clone(), doclet.clone());
    }
    if collection.is_empty() {
        return Ok(Vec::new());
    }

    let subjects: Vec<DocletId> = collection
        .all_ids()
        .filter(|&id| collection.doclet(id).is_relation_subject())
        .collect();

    let mut closures = RelationGraph::build(&collection).closures()?;
    for &id in &subjects {
        let ancestors = closures.remove(&id).unwrap_or_default();
        let doclet = collection.doclet_mut(id);
        doclet.augments_nested = Some(ancestors.augments);
        doclet.implements_nested = Some(ancestors.implements);
        doclet.mixes_nested = Some(ancestors.mixes);
    }

    let descendants = collect_descendants(&collection, &subjects);
    for &id in &subjects {
        let doclet = collection.doclet_mut(id);
        let found = descendants.get(&doclet.longname).cloned().unwrap_or_default();
        doclet.descendants = Some(found);
    }

    info!(
        doclets = collection.len(),
        subjects = subjects.len(),
        "built relation arrays"
    );

    Ok(collection.into_doclets())
}

/// Map each ancestor longname to the subjects reaching it through any nested
/// relation. Subjects appear in input order, once each.
fn collect_descendants(
    collection: &DocletCollection,
    subjects: &[DocletId],
) -> HashMap<String, Vec<String>> {
    // Subjects sharing a longname count as one descendant.
    let mut groups: Vec<(&str, Vec<DocletId>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for &id in subjects {
        let longname = collection.doclet(id).longname.as_str();
        let position = *positions.entry(longname).or_insert_with(|| {
            groups.push((longname, Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(id);
    }

    let mut descendants: HashMap<String, Vec<String>> = HashMap::new();
    for (longname, ids) in groups {
        let mut targets = HashSet::new();
        for id in ids {
            for relation in Relation::ALL {
                for ancestor in relation.nested(collection.doclet(id)) {
                    if targets.insert(ancestor.as_str()) {
                        descendants
                            .entry(ancestor.clone())
                            .or_default()
                            .push(longname.to_string());
                    }
                }
            }
        }
    }

    descendants
}

/// Every doclet as a node, with an edge from each resolved relation target
/// to the doclet naming it. Topological order therefore visits ancestors
/// before their descendants.
pub struct RelationGraph<'a> {
    collection: &'a DocletCollection,
    graph: DiGraph<DocletId, Relation>,
}

impl<'a> RelationGraph<'a> {
    /// `collection` must index doclets by longname.
    pub fn build(collection: &'a DocletCollection) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for id in collection.all_ids() {
            nodes.insert(id, graph.add_node(id));
        }

        for id in collection.all_ids() {
            let current = collection.doclet(id);
            for relation in Relation::ALL {
                for longname in relation.direct(current) {
                    let ancestor_ids = collection.ids(longname);
                    if ancestor_ids.is_empty() {
                        debug!(
                            entity = %current.longname,
                            %relation,
                            target = %longname,
                            "relation target not found"
                        );
                    }
                    for ancestor_id in ancestor_ids {
                        graph.add_edge(nodes[ancestor_id], nodes[&id], relation);
                    }
                }
            }
        }

        Self { collection, graph }
    }

    /// Deduplicated ancestors of every doclet, keyed by id.
    pub fn closures(&self) -> Result<HashMap<DocletId, Ancestors>> {
        let order = toposort(&self.graph, None)
            .map_err(|cycle| self.cycle_error(cycle.node_id()))?;

        let collection = self.collection;
        let mut closures: HashMap<DocletId, Ancestors> = HashMap::with_capacity(order.len());

        for node in order {
            let id = self.graph[node];
            let current = collection.doclet(id);
            let mut result = Ancestors::default();

            for relation in Relation::ALL {
                let targets = relation.direct(current);
                result.get_mut(relation).extend(targets.iter().cloned());

                for longname in targets {
                    for ancestor_id in collection.ids(longname) {
                        let ancestor = collection.doclet(*ancestor_id);
                        let Some(nested) = closures.get(ancestor_id) else {
                            continue;
                        };

                        for merged in Relation::ALL {
                            // Only entities of the same kind share an inheritance chain.
                            if merged == Relation::Augments && ancestor.kind != current.kind {
                                continue;
                            }
                            result
                                .get_mut(merged)
                                .extend(nested.get(merged).iter().cloned());
                        }
                    }
                }
            }

            result.dedup();
            closures.insert(id, result);
        }

        Ok(closures)
    }

    /// Describe the cycle through `node` as the longnames along the relation
    /// references, starting and ending at its doclet that comes first in the
    /// input.
    fn cycle_error(&self, node: NodeIndex) -> Error {
        let around = self.path_back_to(node);
        let start = around
            .iter()
            .copied()
            .min_by_key(|n| self.graph[*n])
            .unwrap_or(node);

        let chain = self
            .path_back_to(start)
            .into_iter()
            .map(|n| self.collection.doclet(self.graph[n]).longname.clone())
            .collect();
        Error::RelationCycle { chain }
    }

    /// Breadth-first walk from `start` along relation references (the
    /// incoming edges) until `start` is reached again.
    fn path_back_to(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            let mut targets: Vec<NodeIndex> = self
                .graph
                .neighbors_directed(current, Direction::Incoming)
                .collect();
            targets.sort_by_key(|n| self.graph[*n]);

            for target in targets {
                if target == start {
                    let mut path = vec![current];
                    let mut step = current;
                    while step != start {
                        step = parent[&step];
                        path.push(step);
                    }
                    path.reverse();
                    path.push(start);
                    return path;
                }
                if let Entry::Vacant(entry) = parent.entry(target) {
                    entry.insert(current);
                    queue.push_back(target);
                }
            }
        }

        vec![start, start]
    }
}
