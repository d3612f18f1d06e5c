//! Missing-doclet synthesizer.
//!
//! JSDoc does not inherit static members, events declared on parent classes,
//! or members of implemented interfaces and mixins. This module copies those
//! members onto every class, interface and mixin that lacks them, and
//! suppresses existing member doclets that a copy replaces because they were
//! marked `@inheritdoc` or `@override`.
//!
//! Requires doclets already processed by [`crate::relations::build_relations`].

use crate::collection::{memberof_key, DocletCollection, DocletId};
use crate::filter::MemberFilter;
use crate::model::{Doclet, Kind, Relation, Scope};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

static RE_MEMBER_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.#][^.#]*$").unwrap());

/// Which existing-member situations a configuration may act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InheritanceMode {
    /// Add missing members and replace explicitly inherited ones.
    #[default]
    All,
    /// Only add members the child does not document at all.
    OnlyImplicit,
    /// Only replace members the child marks `@inheritdoc`/`@override`.
    OnlyExplicit,
}

/// One synthesis pass over a child entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Nested relation whose ancestors contribute members.
    pub relation: Relation,
    pub filter: MemberFilter,
    pub mode: InheritanceMode,
}

impl SynthesisConfig {
    pub fn new(relation: Relation) -> Self {
        SynthesisConfig {
            relation,
            filter: MemberFilter::any(),
            mode: InheritanceMode::All,
        }
    }

    pub fn with_filter(mut self, filter: MemberFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mode(mut self, mode: InheritanceMode) -> Self {
        self.mode = mode;
        self
    }
}

/// The passes applied to every class, interface and mixin, in order.
pub fn default_configs() -> [SynthesisConfig; 4] {
    [
        // Statics inherited from parent classes.
        SynthesisConfig::new(Relation::Augments).with_filter(MemberFilter::scope(Scope::Static)),
        // Events inherited from parent classes.
        SynthesisConfig::new(Relation::Augments).with_filter(MemberFilter::kind(Kind::Event)),
        // Everything mixed in, except members the child already has.
        SynthesisConfig::new(Relation::Mixes).with_mode(InheritanceMode::OnlyImplicit),
        // Everything from implemented interfaces.
        SynthesisConfig::new(Relation::Implements),
    ]
}

/// Why a synthesized doclet was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationMarker {
    Inherited,
    Mixed,
}

impl RelationMarker {
    fn apply(self, doclet: &mut Doclet) {
        match self {
            RelationMarker::Inherited => doclet.inherited = Some(true),
            RelationMarker::Mixed => doclet.mixed = Some(true),
        }
    }
}

/// Output of one synthesis pass.
#[derive(Debug, Default)]
pub struct MissingDoclets {
    pub new_doclets: Vec<Doclet>,
    /// Existing doclets superseded by a new one.
    pub ignored: Vec<DocletId>,
}

/// Compute the members `child` is missing for one configuration.
///
/// `collection` must index every doclet by its longname and by
/// [`memberof_key`] of its owner.
pub fn missing_doclets(
    collection: &DocletCollection,
    child: &Doclet,
    config: &SynthesisConfig,
) -> MissingDoclets {
    let mut found = MissingDoclets::default();

    for candidate in candidate_members(collection, child, config) {
        let mut synthesized = candidate.clone();
        synthesized.longname = format!("{}{}", child.longname, member_suffix(candidate));
        synthesized.memberof = Some(child.longname.clone());

        if let Some(marker) = relation_marker(collection, child, candidate, config.relation) {
            marker.apply(&mut synthesized);
        }

        // A live doclet at the synthesized longname is the child's own
        // member, whatever its kind.
        let mut same_member: Vec<DocletId> = collection
            .ids(&memberof_key(&child.longname))
            .iter()
            .copied()
            .filter(|&id| {
                let existing = collection.doclet(id);
                existing.name == synthesized.name && existing.kind == synthesized.kind
            })
            .chain(
                collection
                    .ids(&synthesized.longname)
                    .iter()
                    .copied()
                    .filter(|&id| !collection.doclet(id).is_ignored()),
            )
            .collect();
        same_member.sort_unstable();
        same_member.dedup();

        let explicit = same_member
            .iter()
            .any(|&id| collection.doclet(id).explicitly_inherits());

        if same_member.is_empty() && config.mode != InheritanceMode::OnlyExplicit {
            found.new_doclets.push(synthesized);
        } else if explicit && config.mode != InheritanceMode::OnlyImplicit {
            found.ignored.extend(same_member);
            found.new_doclets.push(synthesized);
        } else {
            debug!(
                child = %child.longname,
                member = %synthesized.longname,
                "child documents member itself"
            );
        }
    }

    found
}

/// Members of `child`'s ancestors under `config.relation` that pass the filter.
fn candidate_members<'a>(
    collection: &'a DocletCollection,
    child: &Doclet,
    config: &SynthesisConfig,
) -> Vec<&'a Doclet> {
    let ancestors = config.relation.nested(child);
    if ancestors.is_empty() {
        return Vec::new();
    }

    let predicates = config.filter.predicates();
    ancestors
        .iter()
        .flat_map(|owner| collection.get(&memberof_key(owner)))
        .filter(|d| !d.is_ignored() && !d.is_undocumented() && d.inheritdoc.is_none())
        .filter(|d| predicates.iter().all(|p| p(*d)))
        .collect()
}

/// Trailing `.name` or `#name` of a member longname.
fn member_suffix(member: &Doclet) -> String {
    if let Some(m) = RE_MEMBER_SUFFIX.find(&member.longname) {
        return m.as_str().to_string();
    }

    let separator = match member.scope {
        Some(Scope::Static) => '.',
        _ => '#',
    };
    let name = member.name.as_deref().unwrap_or(&member.longname);
    format!("{separator}{name}")
}

fn relation_marker(
    collection: &DocletCollection,
    child: &Doclet,
    member: &Doclet,
    relation: Relation,
) -> Option<RelationMarker> {
    match relation {
        Relation::Augments => return Some(RelationMarker::Inherited),
        Relation::Mixes => return Some(RelationMarker::Mixed),
        Relation::Implements => {}
    }

    // An interface member reaches the child through a mixin or a class that
    // sits between the interface and the child.
    let owner = collection.get(member.memberof.as_deref()?).next()?;
    let mut mixed = false;
    let mut inherited = false;

    for longname in owner.descendants.as_deref().unwrap_or_default() {
        let Some(via) = collection.get(longname).next() else {
            continue;
        };
        if !via.has_descendant(&child.longname) {
            continue;
        }
        match via.kind {
            Some(Kind::Mixin) => mixed = true,
            Some(Kind::Class) => inherited = true,
            _ => {}
        }
    }

    if mixed {
        Some(RelationMarker::Mixed)
    } else if inherited {
        Some(RelationMarker::Inherited)
    } else {
        None
    }
}

/// Add missing members to every class, interface and mixin.
///
/// Returns copies of the input with suppressed doclets marked
/// `ignore: true`, followed by the synthesized doclets.
pub fn add_missing_doclets(doclets: &[Doclet]) -> Vec<Doclet> {
    let mut collection = DocletCollection::new();
    for doclet in doclets {
        let id = collection.add(doclet.longname.clone(), doclet.clone());
        if let Some(owner) = &doclet.memberof {
            collection.index(memberof_key(owner), id);
        }
    }

    let receivers: Vec<DocletId> = collection
        .all_ids()
        .filter(|&id| collection.doclet(id).receives_members())
        .collect();

    let configs = default_configs();
    let mut new_doclets = Vec::new();
    let mut ignored = Vec::new();
    let mut produced = HashSet::new();

    for &id in &receivers {
        let child = collection.doclet(id);
        for config in &configs {
            let found = missing_doclets(&collection, child, config);
            ignored.extend(found.ignored);
            for doclet in found.new_doclets {
                if produced.insert(doclet.longname.clone()) {
                    new_doclets.push(doclet);
                } else {
                    debug!(longname = %doclet.longname, "dropping duplicate synthesized doclet");
                }
            }
        }
    }

    info!(
        added = new_doclets.len(),
        ignored = ignored.len(),
        "synthesized missing doclets"
    );

    for id in ignored {
        collection.doclet_mut(id).ignore = Some(true);
    }

    let mut out = collection.into_doclets();
    out.extend(new_doclets);
    out
}
