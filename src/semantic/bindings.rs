//! Name binding scopes.
//!
//! A `NameBindings` maps identifiers to the entities they refer to within
//! one lexical scope. Scopes form a tree following lexical nesting; a
//! lookup walks from the current scope toward the root. Insertions return
//! false instead of overwriting when a binding with the same identifier
//! already exists in the scope.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::definitions::{
    ClassDefinition, DataMemberDefinition, Definition, GenericTypeParameterDefinition,
    MethodDefinition, VariableDeclaration,
};

/// A named entry in a scope, tagged by the kind of referenced entity.
///
/// Method bindings hold the overload set in insertion order; overload
/// resolution happens at the consumer, not here.
#[derive(Debug, Clone)]
pub enum Binding {
    Class(Rc<RefCell<ClassDefinition>>),
    GenericTypeParameter(Rc<RefCell<GenericTypeParameterDefinition>>),
    DataMember(Rc<RefCell<DataMemberDefinition>>),
    Method(Vec<Rc<MethodDefinition>>),
    LocalObject(Rc<RefCell<VariableDeclaration>>),
    Label,
}

impl Binding {
    /// Whether this binding refers to an entity usable as a type.
    pub fn is_referencing_type(&self) -> bool {
        matches!(self, Binding::Class(_) | Binding::GenericTypeParameter(_))
    }
}

/// One lexical scope: bindings keyed by identifier plus an optional
/// enclosing scope.
#[derive(Debug, Default)]
pub struct NameBindings {
    bindings: HashMap<String, Binding>,
    enclosing: Option<Rc<RefCell<NameBindings>>>,
}

impl NameBindings {
    pub fn new() -> Self {
        NameBindings {
            bindings: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<NameBindings>>) -> Self {
        NameBindings {
            bindings: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    pub fn get_enclosing(&self) -> Option<&Rc<RefCell<NameBindings>>> {
        self.enclosing.as_ref()
    }

    /// Copies every binding from the other scope into this one. Existing
    /// bindings are left untouched.
    pub fn copy_from(&mut self, from: &NameBindings) {
        for (name, binding) in &from.bindings {
            self.bindings
                .entry(name.clone())
                .or_insert_with(|| binding.clone());
        }
    }

    /// Imports the class, method and data member bindings of a used
    /// namespace into this scope.
    pub fn use_namespace(&mut self, used_namespace: &NameBindings) {
        for (name, binding) in &used_namespace.bindings {
            match binding {
                Binding::Class(_) | Binding::Method(_) | Binding::DataMember(_) => {
                    self.bindings
                        .entry(name.clone())
                        .or_insert_with(|| binding.clone());
                }
                _ => {}
            }
        }
    }

    /// Looks up a name in this scope and then in each enclosing scope.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        match self.bindings.get(name) {
            Some(binding) => Some(binding.clone()),
            None => match &self.enclosing {
                Some(enclosing) => enclosing.borrow().lookup(name),
                None => None,
            },
        }
    }

    /// Looks up a name that must refer to a type. A binding of another
    /// kind does not shadow a type of the same name in an enclosing
    /// scope.
    pub fn lookup_type(&self, name: &str) -> Option<Definition> {
        let local_type = match self.bindings.get(name) {
            Some(Binding::Class(class_def)) => Some(Definition::from_class(class_def)),
            Some(Binding::GenericTypeParameter(parameter)) => {
                Some(Definition::from_generic_type_parameter(parameter))
            }
            _ => None,
        };
        match local_type {
            Some(definition) => Some(definition),
            None => match &self.enclosing {
                Some(enclosing) => enclosing.borrow().lookup_type(name),
                None => None,
            },
        }
    }

    /// Looks up a name in this scope only.
    pub fn lookup_local(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).cloned()
    }

    pub fn insert_local_object(&mut self, local_object: Rc<RefCell<VariableDeclaration>>) -> bool {
        let name = String::from(local_object.borrow().get_identifier());
        self.insert(name, Binding::LocalObject(local_object))
    }

    /// Sweeps this scope, dropping local object bindings whose key no
    /// longer matches the identifier stored on the referenced
    /// declaration. Declarations may be renamed to become unique; bindings
    /// keyed by the old name are garbage.
    pub fn remove_obsolete_local_bindings(&mut self) {
        self.bindings.retain(|name, binding| match binding {
            Binding::LocalObject(local_object) => local_object.borrow().get_identifier() == name,
            _ => true,
        });
    }

    pub fn insert_class(&mut self, name: &str, class_def: Rc<RefCell<ClassDefinition>>) -> bool {
        self.insert(String::from(name), Binding::Class(class_def))
    }

    pub fn insert_data_member(
        &mut self,
        name: &str,
        data_member_def: Rc<RefCell<DataMemberDefinition>>,
    ) -> bool {
        self.insert(String::from(name), Binding::DataMember(data_member_def))
    }

    /// Removes a data member binding. Fails if the name is bound to
    /// anything other than a data member.
    pub fn remove_data_member(&mut self, name: &str) -> bool {
        match self.bindings.get(name) {
            Some(Binding::DataMember(_)) => {
                self.bindings.remove(name);
                true
            }
            _ => false,
        }
    }

    pub fn insert_method(&mut self, name: &str, method_def: Rc<MethodDefinition>) -> bool {
        self.insert(String::from(name), Binding::Method(vec![method_def]))
    }

    /// Adds an overload to an existing method binding, or inserts a fresh
    /// one. Fails when the name is bound to something other than a
    /// method.
    pub fn overload_method(&mut self, name: &str, method_def: Rc<MethodDefinition>) -> bool {
        if !self.bindings.contains_key(name) {
            return self.insert_method(name, method_def);
        }
        match self.bindings.get_mut(name) {
            Some(Binding::Method(method_list)) => {
                method_list.push(method_def);
                true
            }
            _ => false,
        }
    }

    /// Moves a method binding from one name to another within this scope.
    pub fn update_method_name(&mut self, old_name: &str, new_name: &str) -> bool {
        match self.bindings.get(old_name) {
            Some(Binding::Method(_)) => {}
            _ => return false,
        }
        if self.bindings.contains_key(new_name) {
            return false;
        }
        let binding = self.bindings.remove(old_name).unwrap();
        self.bindings.insert(String::from(new_name), binding);
        true
    }

    /// Pops the most recently added overload. The binding stays in place
    /// even when its overload list becomes empty.
    pub fn remove_last_overloaded_method(&mut self, name: &str) -> bool {
        match self.bindings.get_mut(name) {
            Some(Binding::Method(method_list)) => {
                method_list.pop();
                true
            }
            _ => false,
        }
    }

    pub fn insert_generic_type_parameter(
        &mut self,
        name: &str,
        generic_type_parameter_def: Rc<RefCell<GenericTypeParameterDefinition>>,
    ) -> bool {
        self.insert(
            String::from(name),
            Binding::GenericTypeParameter(generic_type_parameter_def),
        )
    }

    /// Inserts a label binding. Labels are visible across the whole
    /// enclosing scope tree, so the insertion fails if any enclosing
    /// scope already binds the name.
    pub fn insert_label(&mut self, label: &str) -> bool {
        if self.lookup(label).is_some() {
            return false;
        }
        self.bindings.insert(String::from(label), Binding::Label);
        true
    }

    fn insert(&mut self, name: String, binding: Binding) -> bool {
        if self.bindings.contains_key(&name) {
            return false;
        }
        self.bindings.insert(name, binding);
        true
    }
}
