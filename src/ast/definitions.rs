//! Definitions of classes, data members, methods and generic parameters.
//!
//! Definitions are owned by the analysis graph: a class owns its members,
//! and members refer back to types. Types and bindings refer to
//! definitions by non-owning (`Weak`) reference, so the graph can be torn
//! down in one phase without reference cycles keeping it alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::types::Type;

/// A named local variable or argument: an identifier and its type.
///
/// The identifier may be renamed after creation to make it unique within a
/// scope; bindings keyed by the old name become obsolete.
#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    type_: Type,
    identifier: String,
}

impl VariableDeclaration {
    pub fn new(type_: Type, identifier: String) -> Self {
        VariableDeclaration { type_, identifier }
    }

    pub fn get_type(&self) -> &Type {
        &self.type_
    }

    pub fn get_identifier(&self) -> &str {
        &self.identifier
    }

    pub fn set_identifier(&mut self, identifier: String) {
        self.identifier = identifier;
    }
}

/// A data member of a class.
#[derive(Debug, Clone)]
pub struct DataMemberDefinition {
    name: String,
    type_: Type,
    is_static: bool,
}

impl DataMemberDefinition {
    pub fn new(name: String, type_: Type) -> Self {
        DataMemberDefinition {
            name,
            type_,
            is_static: false,
        }
    }

    pub fn new_static(name: String, type_: Type) -> Self {
        DataMemberDefinition {
            name,
            type_,
            is_static: true,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_type(&self) -> &Type {
        &self.type_
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

/// A method of a class. Enum variant constructors are methods flagged as
/// such on their enumeration class.
#[derive(Debug)]
pub struct MethodDefinition {
    name: String,
    argument_list: Vec<VariableDeclaration>,
    enum_constructor: bool,
    class: RefCell<Weak<RefCell<ClassDefinition>>>,
}

impl MethodDefinition {
    pub fn new(name: String, argument_list: Vec<VariableDeclaration>) -> Self {
        MethodDefinition {
            name,
            argument_list,
            enum_constructor: false,
            class: RefCell::new(Weak::new()),
        }
    }

    pub fn new_enum_constructor(name: String, argument_list: Vec<VariableDeclaration>) -> Self {
        MethodDefinition {
            name,
            argument_list,
            enum_constructor: true,
            class: RefCell::new(Weak::new()),
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_argument_list(&self) -> &[VariableDeclaration] {
        &self.argument_list
    }

    pub fn is_enum_constructor(&self) -> bool {
        self.enum_constructor
    }

    pub fn get_class(&self) -> Option<Rc<RefCell<ClassDefinition>>> {
        self.class.borrow().upgrade()
    }

    pub fn set_class(&self, class: &Rc<RefCell<ClassDefinition>>) {
        *self.class.borrow_mut() = Rc::downgrade(class);
    }
}

/// A member of a class definition.
#[derive(Debug, Clone)]
pub enum ClassMember {
    DataMember(Rc<RefCell<DataMemberDefinition>>),
    Method(Rc<MethodDefinition>),
    NestedClass(Rc<RefCell<ClassDefinition>>),
}

/// A class, interface, enumeration or enumeration variant definition.
#[derive(Debug)]
pub struct ClassDefinition {
    name: String,
    base_class: Option<Rc<RefCell<ClassDefinition>>>,
    interface: bool,
    message: bool,
    enumeration: bool,
    enumeration_variant: bool,
    members: Vec<ClassMember>,
    primary_ctor_arg_data_members: Vec<Rc<RefCell<DataMemberDefinition>>>,
}

impl ClassDefinition {
    pub fn new(name: String) -> Self {
        ClassDefinition {
            name,
            base_class: None,
            interface: false,
            message: false,
            enumeration: false,
            enumeration_variant: false,
            members: Vec::new(),
            primary_ctor_arg_data_members: Vec::new(),
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_base_class(&self) -> Option<&Rc<RefCell<ClassDefinition>>> {
        self.base_class.as_ref()
    }

    pub fn set_base_class(&mut self, base_class: Rc<RefCell<ClassDefinition>>) {
        self.base_class = Some(base_class);
    }

    pub fn is_interface(&self) -> bool {
        self.interface
    }

    pub fn set_interface(&mut self, interface: bool) {
        self.interface = interface;
    }

    pub fn is_message(&self) -> bool {
        self.message
    }

    pub fn set_message(&mut self, message: bool) {
        self.message = message;
    }

    pub fn is_enumeration(&self) -> bool {
        self.enumeration
    }

    pub fn set_enumeration(&mut self, enumeration: bool) {
        self.enumeration = enumeration;
    }

    pub fn is_enumeration_variant(&self) -> bool {
        self.enumeration_variant
    }

    pub fn set_enumeration_variant(&mut self, enumeration_variant: bool) {
        self.enumeration_variant = enumeration_variant;
    }

    pub fn get_members(&self) -> &[ClassMember] {
        &self.members
    }

    pub fn add_member(&mut self, member: ClassMember) {
        self.members.push(member);
    }

    /// The data members initialized by the primary constructor, in
    /// argument order.
    pub fn get_primary_ctor_arg_data_members(&self) -> &[Rc<RefCell<DataMemberDefinition>>] {
        &self.primary_ctor_arg_data_members
    }

    pub fn add_primary_ctor_arg_data_member(
        &mut self,
        data_member: Rc<RefCell<DataMemberDefinition>>,
    ) {
        self.primary_ctor_arg_data_members.push(data_member.clone());
        self.members.push(ClassMember::DataMember(data_member));
    }

    /// Finds a data member by name, searching base classes as well.
    pub fn get_data_member(&self, name: &str) -> Option<Rc<RefCell<DataMemberDefinition>>> {
        for member in &self.members {
            if let ClassMember::DataMember(data_member) = member {
                if data_member.borrow().get_name() == name {
                    return Some(data_member.clone());
                }
            }
        }
        match &self.base_class {
            Some(base_class) => base_class.borrow().get_data_member(name),
            None => None,
        }
    }

    /// Finds a nested class definition by name.
    pub fn get_nested_class(&self, name: &str) -> Option<Rc<RefCell<ClassDefinition>>> {
        for member in &self.members {
            if let ClassMember::NestedClass(nested_class) = member {
                if nested_class.borrow().get_name() == name {
                    return Some(nested_class.clone());
                }
            }
        }
        None
    }

    /// Whether this class is a (transitive) subclass of the other class.
    /// Class names are unique within a compilation, so the walk compares
    /// names.
    pub fn is_subclass_of(&self, other: &ClassDefinition) -> bool {
        let mut base_class = self.base_class.clone();
        while let Some(current) = base_class {
            let next = {
                let current = current.borrow();
                if current.get_name() == other.get_name() {
                    return true;
                }
                current.base_class.clone()
            };
            base_class = next;
        }
        false
    }
}

/// A generic type parameter definition. During instantiation a concrete
/// type is assigned to the parameter.
#[derive(Debug)]
pub struct GenericTypeParameterDefinition {
    name: String,
    concrete_type: Option<Type>,
}

impl GenericTypeParameterDefinition {
    pub fn new(name: String) -> Self {
        GenericTypeParameterDefinition {
            name,
            concrete_type: None,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_concrete_type(&self) -> Option<&Type> {
        self.concrete_type.as_ref()
    }

    pub fn set_concrete_type(&mut self, concrete_type: Type) {
        self.concrete_type = Some(concrete_type);
    }
}

/// A non-owning reference to the definition a type is bound to.
#[derive(Debug, Clone)]
pub enum Definition {
    Class(Weak<RefCell<ClassDefinition>>),
    GenericTypeParameter(Weak<RefCell<GenericTypeParameterDefinition>>),
}

impl Definition {
    pub fn from_class(class: &Rc<RefCell<ClassDefinition>>) -> Self {
        Definition::Class(Rc::downgrade(class))
    }

    pub fn from_generic_type_parameter(
        parameter: &Rc<RefCell<GenericTypeParameterDefinition>>,
    ) -> Self {
        Definition::GenericTypeParameter(Rc::downgrade(parameter))
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Definition::Class(_))
    }

    pub fn is_generic_type_parameter(&self) -> bool {
        matches!(self, Definition::GenericTypeParameter(_))
    }

    pub fn get_class(&self) -> Option<Rc<RefCell<ClassDefinition>>> {
        match self {
            Definition::Class(class) => class.upgrade(),
            Definition::GenericTypeParameter(_) => None,
        }
    }

    pub fn get_generic_type_parameter(
        &self,
    ) -> Option<Rc<RefCell<GenericTypeParameterDefinition>>> {
        match self {
            Definition::GenericTypeParameter(parameter) => parameter.upgrade(),
            Definition::Class(_) => None,
        }
    }
}
