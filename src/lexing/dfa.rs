//! Subset construction
//!
//! Every DFA state stands for a distinct set of NFA states reachable from the root. Sets are
//! memoized so each one becomes exactly one DFA state; since a finite NFA only has finitely many
//! subsets, the construction terminates.
//!
//! Accept resolution
//!
//! A DFA state may stand for NFA states accepting several rules. The winner is found by walking
//! the rule order from the last registered rule to the first, overwriting the candidate whenever
//! the rule is accepted, so the earliest registered rule among the matching ones wins.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use tracing::debug;

use super::nfa::{Nfa, StateId};

/// What a rule does with the text it matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accept<K> {
    Emit(K),
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState<K> {
    transitions: BTreeMap<char, StateId>,
    accept: Option<Accept<K>>,
}

/// Deterministic automaton: at most one edge per character and at most one accept per state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<K> {
    states: Vec<DfaState<K>>,
}

impl<K: Copy + Eq + Hash> Dfa<K> {
    /// Determinize `nfa`, resolving ambiguous accepts with `rule_order` (registration order)
    pub fn determinize(nfa: &Nfa<Accept<K>>, rule_order: &[Accept<K>]) -> Self {
        let root_set: BTreeSet<StateId> = BTreeSet::from([Nfa::<Accept<K>>::ROOT]);

        let mut states = vec![DfaState {
            transitions: BTreeMap::new(),
            accept: resolve_accept(nfa, &root_set, rule_order),
        }];
        let mut known: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();
        known.insert(root_set.clone(), 0);

        let mut pending = VecDeque::from([(0, root_set)]);
        while let Some((id, set)) = pending.pop_front() {
            let mut moves: BTreeMap<char, BTreeSet<StateId>> = BTreeMap::new();
            for &nfa_state in &set {
                for (&ch, targets) in &nfa.state(nfa_state).transitions {
                    moves.entry(ch).or_default().extend(targets.iter().copied());
                }
            }

            for (ch, target_set) in moves {
                if target_set.is_empty() {
                    continue;
                }
                let target = match known.get(&target_set) {
                    Some(&existing) => existing,
                    None => {
                        let created = states.len();
                        states.push(DfaState {
                            transitions: BTreeMap::new(),
                            accept: resolve_accept(nfa, &target_set, rule_order),
                        });
                        known.insert(target_set.clone(), created);
                        pending.push_back((created, target_set));
                        created
                    }
                };
                states[id].transitions.insert(ch, target);
            }
        }

        debug!(
            nfa_states = nfa.state_count(),
            dfa_states = states.len(),
            "determinized lexer automaton"
        );
        Self { states }
    }

    pub fn root(&self) -> StateId {
        0
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Follow the edge for `ch`, if any
    pub fn step(&self, state: StateId, ch: char) -> Option<StateId> {
        self.states[state].transitions.get(&ch).copied()
    }

    pub fn accept(&self, state: StateId) -> Option<Accept<K>> {
        self.states[state].accept
    }

    pub fn edges(&self, state: StateId) -> impl Iterator<Item = (char, StateId)> + '_ {
        self.states[state]
            .transitions
            .iter()
            .map(|(&ch, &target)| (ch, target))
    }

    /// Run the automaton over the whole of `text` from the root
    pub fn run(&self, text: &str) -> Option<StateId> {
        text.chars()
            .try_fold(self.root(), |state, ch| self.step(state, ch))
    }
}

fn resolve_accept<K: Copy + Eq + Hash>(
    nfa: &Nfa<Accept<K>>,
    set: &BTreeSet<StateId>,
    rule_order: &[Accept<K>],
) -> Option<Accept<K>> {
    let accepted: HashSet<Accept<K>> = set
        .iter()
        .flat_map(|&state| nfa.state(state).accept.iter().copied())
        .collect();

    let mut resolved = None;
    for rule in rule_order.iter().rev() {
        if accepted.contains(rule) {
            resolved = Some(*rule);
        }
    }
    resolved
}
