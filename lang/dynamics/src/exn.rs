//! Nominal exceptions.
//!
//! A tag is issued once per declaration and can only be obtained from
//! [`ExnRegistry::declare`]; two declarations never share a tag, whatever their
//! names or argument types.

use crate::syntax::*;
use indexmap::IndexMap;
use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

static TAGS: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExnTag(usize);

/// Declaration data of an exception.
#[derive(Clone, Debug)]
pub struct ExnDecl {
    pub name: VarName,
    /// type of the argument, for parametrized exceptions
    pub arg: Option<RcTerm>,
}

/// The constructor handed out for a declared exception.
#[derive(Clone, Debug)]
pub struct ExnCtor {
    tag: ExnTag,
    decl: ExnDecl,
}

impl ExnCtor {
    pub fn tag(&self) -> ExnTag {
        self.tag
    }
    pub fn name(&self) -> &VarName {
        &self.decl.name
    }
    pub fn is_parametrized(&self) -> bool {
        self.decl.arg.is_some()
    }
    /// The exception value of an unparametrized exception.
    pub fn value(&self) -> Exception {
        Exception { tag: self.tag, name: self.decl.name.clone(), arg: None }
    }
    /// The exception value carrying `arg`.
    pub fn apply(&self, arg: RcTerm) -> Exception {
        Exception { tag: self.tag, name: self.decl.name.clone(), arg: Some(arg) }
    }
    /// A handler pattern for this exception; `arg` may mention the pattern
    /// variables of the handler.
    pub fn pattern(&self, arg: Option<RcTerm>) -> ExnPattern {
        ExnPattern::Tag { tag: self.tag, arg }
    }
}

/// A raised value.
#[derive(Clone, Debug)]
pub struct Exception {
    pub tag: ExnTag,
    pub name: VarName,
    pub arg: Option<RcTerm>,
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            | None => write!(f, "{}", self.name),
            | Some(arg) => write!(f, "{}({})", self.name, arg),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ExnPattern {
    /// an exception with the given tag whose argument unifies with `arg`
    Tag { tag: ExnTag, arg: Option<RcTerm> },
    /// any exception
    Any,
}

/// The exceptions known to a session.
#[derive(Clone, Debug, Default)]
pub struct ExnRegistry {
    decls: IndexMap<ExnTag, ExnDecl>,
}

impl ExnRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn declare(&mut self, name: impl Into<VarName>, arg: Option<RcTerm>) -> ExnCtor {
        let tag = ExnTag(TAGS.fetch_add(1, Ordering::Relaxed));
        let decl = ExnDecl { name: name.into(), arg };
        log::debug!("declare exception `{}` as {:?}", decl.name, tag);
        self.decls.insert(tag, decl.clone());
        ExnCtor { tag, decl }
    }
    pub fn get(&self, tag: ExnTag) -> Option<&ExnDecl> {
        self.decls.get(&tag)
    }
    pub fn contains(&self, tag: ExnTag) -> bool {
        self.decls.contains_key(&tag)
    }
    pub fn len(&self) -> usize {
        self.decls.len()
    }
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
