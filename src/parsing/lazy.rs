//! Forward-declared rules
//!
//! Recursive grammars need to mention a rule before it is defined. A [`GrammarBuilder`] owns one
//! slot per forward-declared rule; the [`Lazy`] handles returned to the grammar author only hold
//! weak references to their slot, so a rule that mentions itself never keeps itself alive.
//! Slots are filled exactly once and are read-only afterwards.

use once_cell::sync::OnceCell;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

use super::combinators::{Parser, Sequence};
use super::error::GrammarError;
use super::grammar::Grammar;
use super::stream::Cursor;
use crate::lexing::TokenKind;

type Definition<K, T> = Box<dyn Parser<K, Output = T> + Send + Sync>;

pub(crate) struct LazySlot<K, T> {
    name: String,
    definition: OnceCell<Definition<K, T>>,
}

/// Type-erased view of a slot, enough to check that a grammar is complete
pub(crate) trait Slot: Send + Sync {
    fn name(&self) -> &str;

    fn is_defined(&self) -> bool;
}

impl<K, T> Slot for LazySlot<K, T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_defined(&self) -> bool {
        self.definition.get().is_some()
    }
}

/// Handle to a forward-declared rule.
///
/// Handles are cheap to clone and can be used anywhere a parser is expected. Parsing through a
/// handle whose rule was never defined, or whose builder or grammar has been dropped, panics.
pub struct Lazy<K, T> {
    slot: Weak<LazySlot<K, T>>,
}

impl<K, T> Clone for Lazy<K, T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<K, T> Lazy<K, T> {
    /// Name given at declaration, if the slot still exists
    pub fn name(&self) -> Option<String> {
        self.slot.upgrade().map(|slot| slot.name.clone())
    }

    pub fn is_defined(&self) -> bool {
        self.slot
            .upgrade()
            .is_some_and(|slot| slot.definition.get().is_some())
    }
}

impl<K: TokenKind, T> Parser<K> for Lazy<K, T> {
    type Output = T;

    fn parse(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Output> {
        let Some(slot) = self.slot.upgrade() else {
            panic!("lazy rule used after its grammar was dropped");
        };
        match slot.definition.get() {
            Some(definition) => definition.parse(cursor),
            None => panic!("lazy rule `{}` used before it was defined", slot.name),
        }
    }
}

impl<K: TokenKind, T> Sequence<K> for Lazy<K, T> {
    type Items = (T,);

    fn parse_items(&self, cursor: &mut Cursor<'_, K>) -> Option<Self::Items> {
        self.parse(cursor).map(|value| (value,))
    }
}

/// Arena of forward-declared rules
pub struct GrammarBuilder<K> {
    slots: Vec<Arc<dyn Slot>>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Default for GrammarBuilder<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            kind: PhantomData,
        }
    }
}

impl<K: TokenKind + 'static> GrammarBuilder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule to be defined later
    pub fn lazy<T: 'static>(&mut self, name: impl Into<String>) -> Lazy<K, T> {
        let slot = Arc::new(LazySlot {
            name: name.into(),
            definition: OnceCell::new(),
        });
        let handle = Lazy {
            slot: Arc::downgrade(&slot),
        };
        self.slots.push(slot);
        handle
    }

    /// Give `lazy` its definition. Each rule can be defined once.
    pub fn define<T, P>(&self, lazy: &Lazy<K, T>, parser: P) -> Result<(), GrammarError>
    where
        P: Parser<K, Output = T> + Send + Sync + 'static,
    {
        let slot = lazy.slot.upgrade().ok_or(GrammarError::Detached)?;
        slot.definition
            .set(Box::new(parser))
            .map_err(|_| GrammarError::AlreadyDefined(slot.name.clone()))
    }

    pub fn rule_count(&self) -> usize {
        self.slots.len()
    }

    /// Finish the grammar with `top` as its entry rule.
    ///
    /// Fails if any declared rule is still undefined.
    pub fn build<P: Parser<K>>(self, top: P) -> Result<Grammar<K, P>, GrammarError> {
        if let Some(slot) = self.slots.iter().find(|slot| !slot.is_defined()) {
            return Err(GrammarError::Undefined(slot.name().to_string()));
        }
        Ok(Grammar::new(self.slots, top))
    }
}
