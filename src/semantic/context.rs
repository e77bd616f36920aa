//! The analysis context.
//!
//! A context gives semantic analysis access to the name bindings of the
//! enclosing scope. Pattern lowering mutates surrounding state only
//! through its declaration and temporary accumulators; everything that
//! resolves names receives the context explicitly.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::definitions::Definition;
use crate::ast::expressions::NamedEntityExpression;

use super::bindings::{Binding, NameBindings};

#[derive(Debug)]
pub struct Context {
    name_bindings: Rc<RefCell<NameBindings>>,
}

impl Context {
    pub fn new(name_bindings: Rc<RefCell<NameBindings>>) -> Self {
        Context { name_bindings }
    }

    pub fn get_name_bindings(&self) -> &Rc<RefCell<NameBindings>> {
        &self.name_bindings
    }

    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.name_bindings.borrow().lookup(name)
    }

    pub fn lookup_type(&self, name: &str) -> Option<Definition> {
        self.name_bindings.borrow().lookup_type(name)
    }

    /// A throw-away context for speculative type checking. The temporary
    /// context resolves names through a child scope, so anything inserted
    /// during speculation is discarded with it.
    pub fn make_temporary_context(&self) -> Context {
        let child = NameBindings::with_enclosing(self.name_bindings.clone());
        Context {
            name_bindings: Rc::new(RefCell::new(child)),
        }
    }

    /// Whether a named entity refers to a static data member in scope.
    /// Names that do not are fresh locals when they appear in pattern
    /// position.
    pub fn is_referencing_static_data_member(
        &self,
        named_entity: &NamedEntityExpression,
    ) -> bool {
        match self.lookup(named_entity.get_identifier()) {
            Some(Binding::DataMember(data_member)) => data_member.borrow().is_static(),
            _ => false,
        }
    }
}
