//! Scope elimination.
//!
//! The globaliser gives every scoped declaration a unique global name and
//! rewrites every reference to it.
//!
//! # Algorithm
//!
//! 1. Collect declarations depth-first: chart-level first, then each state's
//!    list in pre-order. The mangled name is the declaration's dotted path
//!    with separators replaced (`Run.Fast.speed` becomes `Run_Fast_speed`);
//!    collisions get the configured suffix until unique.
//! 2. Build an immutable association from each original [`DeclId`] to its
//!    global declaration (numbered afresh in collection order).
//! 3. Rebuild the tree with empty local lists and every reference pointing
//!    at its global declaration.

use chartflat_ast::visitor::{AstTransform, transform_hook};
use chartflat_ast::{Declaration, NameRef, State, Statechart};
use chartflat_foundation::{DeclId, DeclIdAllocator, Error, NameAllocator, Result, StatePath};
use tracing::{debug, trace};

use crate::config::FlattenConfig;
use crate::pipeline::Translator;
use crate::trace::{Stage, TraceEvent, Tracer};

/// Original declaration id to its global replacement.
pub type Association = im::OrdMap<DeclId, Declaration>;

/// Renames scoped declarations into one global list.
#[derive(Clone, Debug)]
pub struct Globaliser {
    separator: char,
    collision_suffix: String,
}

impl Default for Globaliser {
    fn default() -> Self {
        Self::new(&FlattenConfig::default())
    }
}

struct Scoped<'a> {
    scope: StatePath,
    declaration: &'a Declaration,
}

impl Globaliser {
    /// Creates a globaliser using the config's naming rules.
    #[must_use]
    pub fn new(config: &FlattenConfig) -> Self {
        Self {
            separator: config.separator,
            collision_suffix: config.collision_suffix.clone(),
        }
    }

    /// Computes the global declaration list and the association from
    /// original ids, without rebuilding the tree.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDeclaration` if a scope declares a name twice or two
    /// declarations share an id.
    pub fn associate(
        &self,
        chart: &Statechart,
        tracer: &mut Tracer,
    ) -> Result<(Vec<Declaration>, Association)> {
        let scoped = collect(chart)?;

        let mut names = NameAllocator::with_suffix(self.collision_suffix.clone());
        let mut ids = DeclIdAllocator::new();
        let mut globals = Vec::with_capacity(scoped.len());
        let mut association = Association::new();

        for Scoped { scope, declaration } in scoped {
            let base = scope.mangle_member(&declaration.name, self.separator);
            let global = Declaration {
                id: ids.next_id(),
                name: names.allocate(&base),
                type_name: declaration.type_name.clone(),
                input: declaration.input,
            };

            let from = scope.child(declaration.name.clone()).to_string();
            trace!(from = %from, to = %global.name, "declaration globalised");
            tracer.record(TraceEvent::DeclarationRenamed {
                from,
                to: global.name.clone(),
            });

            association.insert(declaration.id, global.clone());
            globals.push(global);
        }

        Ok((globals, association))
    }

    fn globalise_state(renamer: &mut Renamer<'_>, state: &State) -> Result<State> {
        Ok(State {
            name: state.name.clone(),
            declarations: Vec::new(),
            entry: transform_hook(renamer, state.entry.clone())?,
            exit: transform_hook(renamer, state.exit.clone())?,
            initial: state.initial.clone(),
            states: state
                .states
                .iter()
                .map(|child| Self::globalise_state(renamer, child))
                .collect::<Result<_>>()?,
            transitions: state
                .transitions
                .iter()
                .map(|t| {
                    renamer
                        .transform_transition(t.clone())
                        .map_err(|e| e.in_transition(&t.name))
                })
                .collect::<Result<_>>()?,
        })
    }
}

impl Translator for Globaliser {
    fn stage(&self) -> Stage {
        Stage::Globalise
    }

    fn translate(&self, chart: &Statechart, tracer: &mut Tracer) -> Result<Statechart> {
        let (declarations, association) = self.associate(chart, tracer)?;
        debug!(count = declarations.len(), "declarations globalised");

        let mut renamer = Renamer {
            association: &association,
        };
        Ok(Statechart {
            name: chart.name.clone(),
            types: chart.types.clone(),
            events: chart.events.clone(),
            declarations,
            entry: transform_hook(&mut renamer, chart.entry.clone())?,
            exit: transform_hook(&mut renamer, chart.exit.clone())?,
            functions: chart.functions.clone(),
            initial: chart.initial.clone(),
            states: chart
                .states
                .iter()
                .map(|state| Self::globalise_state(&mut renamer, state))
                .collect::<Result<_>>()?,
            transitions: chart
                .transitions
                .iter()
                .map(|t| {
                    renamer
                        .transform_transition(t.clone())
                        .map_err(|e| e.in_transition(&t.name))
                })
                .collect::<Result<_>>()?,
        })
    }
}

/// Rewrites references through the association.
struct Renamer<'a> {
    association: &'a Association,
}

impl AstTransform for Renamer<'_> {
    fn transform_name(&mut self, name: NameRef) -> Result<NameRef> {
        name.decl
            .and_then(|id| self.association.get(&id))
            .map(|global| NameRef::new(global.name.clone(), global.id))
            .ok_or_else(|| Error::unresolved_reference(name.name))
    }
}

fn collect(chart: &Statechart) -> Result<Vec<Scoped<'_>>> {
    fn visit<'a>(
        scope: &StatePath,
        declarations: &'a [Declaration],
        seen: &mut im::HashSet<DeclId>,
        out: &mut Vec<Scoped<'a>>,
    ) -> Result<()> {
        let mut local = im::HashSet::new();
        for declaration in declarations {
            if local.insert(declaration.name.as_str()).is_some()
                || seen.insert(declaration.id).is_some()
            {
                let label = if scope.is_root() {
                    "<root>".to_string()
                } else {
                    scope.to_string()
                };
                return Err(Error::duplicate_declaration(label, &declaration.name));
            }
            out.push(Scoped {
                scope: scope.clone(),
                declaration,
            });
        }
        Ok(())
    }

    fn visit_states<'a>(
        scope: &StatePath,
        states: &'a [State],
        seen: &mut im::HashSet<DeclId>,
        out: &mut Vec<Scoped<'a>>,
    ) -> Result<()> {
        for state in states {
            let path = scope.child(state.name.clone());
            visit(&path, &state.declarations, seen, out)?;
            visit_states(&path, &state.states, seen, out)?;
        }
        Ok(())
    }

    let mut seen = im::HashSet::new();
    let mut out = Vec::new();
    let root = StatePath::root();
    visit(&root, &chart.declarations, &mut seen, &mut out)?;
    visit_states(&root, &chart.states, &mut seen, &mut out)?;
    Ok(out)
}
