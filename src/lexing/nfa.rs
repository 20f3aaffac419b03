//! Shared nondeterministic automaton
//!
//! All rules of a lexer are compiled into one [`Nfa`]. States live in an arena and refer to each
//! other by index; state 0 is the shared root. Every character edge leads to a *set* of states
//! and a state may accept several rules at once, which is resolved later by the DFA compiler.

use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

use super::error::PatternError;
use super::pattern::{parse_pattern, PatternNode};

pub type StateId = usize;

#[derive(Debug, Clone)]
pub struct NfaState<A> {
    pub transitions: BTreeMap<char, BTreeSet<StateId>>,
    pub accept: Vec<A>,
}

impl<A> Default for NfaState<A> {
    fn default() -> Self {
        Self {
            transitions: BTreeMap::new(),
            accept: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Nfa<A> {
    states: Vec<NfaState<A>>,
}

impl<A> Default for Nfa<A> {
    fn default() -> Self {
        Self {
            states: vec![NfaState::default()],
        }
    }
}

impl<A: Copy + PartialEq> Nfa<A> {
    pub const ROOT: StateId = 0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: StateId) -> &NfaState<A> {
        &self.states[id]
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Compile `pattern` into the automaton, accepting `accept` at its final state.
    ///
    /// The pattern is built from a fresh start state whose edges are then copied onto the shared
    /// root, so loops formed by a leading group stay local to this rule.
    pub fn compile(&mut self, pattern: &str, accept: A) -> Result<(), PatternError> {
        let nodes = parse_pattern(pattern)?;

        let start = self.add_state();
        let end = self.build_sequence(start, &nodes);
        self.states[end].accept.push(accept);

        let edges = self.states[start].transitions.clone();
        for (ch, targets) in edges {
            for target in targets {
                self.add_transition(Self::ROOT, ch, target);
            }
        }

        trace!(
            pattern,
            states = self.states.len(),
            "compiled pattern into shared nfa"
        );
        Ok(())
    }

    fn add_state(&mut self) -> StateId {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    fn add_transition(&mut self, from: StateId, ch: char, to: StateId) {
        self.states[from]
            .transitions
            .entry(ch)
            .or_default()
            .insert(to);
    }

    fn build_sequence(&mut self, start: StateId, nodes: &[PatternNode]) -> StateId {
        nodes
            .iter()
            .fold(start, |current, node| self.build_unit(current, node))
    }

    fn build_unit(&mut self, from: StateId, node: &PatternNode) -> StateId {
        match node {
            PatternNode::Literal(ch) => {
                let next = self.add_state();
                self.add_transition(from, *ch, next);
                next
            }
            PatternNode::Class(items) => {
                let next = self.add_state();
                for ch in items.iter().flat_map(|item| item.chars()) {
                    self.add_transition(from, ch, next);
                }
                next
            }
            PatternNode::Repeat(inner) => {
                let end = self.build_sequence(from, inner);
                self.merge_state(end, from);
                from
            }
        }
    }

    /// Fold state `from` into state `into`: every edge targeting `from` is redirected to `into`
    /// and `from`'s own edges and accepts are carried over.
    fn merge_state(&mut self, from: StateId, into: StateId) {
        if from == into {
            return;
        }

        for state in &mut self.states {
            for targets in state.transitions.values_mut() {
                if targets.remove(&from) {
                    targets.insert(into);
                }
            }
        }

        let merged = std::mem::take(&mut self.states[from]);
        for (ch, targets) in merged.transitions {
            for target in targets {
                self.add_transition(into, ch, target);
            }
        }
        for accept in merged.accept {
            if !self.states[into].accept.contains(&accept) {
                self.states[into].accept.push(accept);
            }
        }
    }
}
