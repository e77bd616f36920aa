//! Type system definitions for the AST.
//!
//! This module defines the type system used in the language, including:
//!
//! - Built-in types (numbers, strings, booleans, object, closures)
//! - User-defined class, enumeration and generic parameter types
//! - Equality, convertibility and assignability rules
//! - Common-type calculation for heterogeneous expressions
//!
//! Types are values: cloning is deep over generic parameters and function
//! signatures, while the link to the defining class or generic parameter
//! is shared by non-owning reference.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use super::definitions::{ClassDefinition, Definition};
use super::expressions::Expression;
use std::cell::RefCell;
use std::rc::Rc;

/// The built-in type kinds of the language.
///
/// `NotBuiltIn` marks user-defined class types. `Enumeration` is not
/// produced by the type factory; it is derived when a type is bound to an
/// enumeration definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInType {
    Void,
    Null,
    Placeholder,
    Implicit,
    Byte,
    Char,
    Integer,
    Long,
    Float,
    Boolean,
    String,
    Lambda,
    Function,
    Object,
    Enumeration,
    NotBuiltIn,
}

lazy_static! {
    static ref KEYWORD_TYPES: HashMap<&'static str, BuiltInType> = {
        let mut keywords = HashMap::new();
        keywords.insert("void", BuiltInType::Void);
        keywords.insert("var", BuiltInType::Implicit);
        keywords.insert("byte", BuiltInType::Byte);
        keywords.insert("char", BuiltInType::Char);
        keywords.insert("int", BuiltInType::Integer);
        keywords.insert("long", BuiltInType::Long);
        keywords.insert("float", BuiltInType::Float);
        keywords.insert("bool", BuiltInType::Boolean);
        keywords.insert("string", BuiltInType::String);
        keywords.insert("object", BuiltInType::Object);
        keywords
    };
}

/// The signature of a function or lambda type: the return type and the
/// ordered argument types.
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub return_type: Option<Box<Type>>,
    pub arguments: Vec<Type>,
}

impl FunctionSignature {
    pub fn new(return_type: Option<Type>, arguments: Vec<Type>) -> Self {
        FunctionSignature {
            return_type: return_type.map(Box::new),
            arguments,
        }
    }

    pub fn equals(&self, other: &FunctionSignature) -> bool {
        let return_types_equal = match (&self.return_type, &other.return_type) {
            (None, None) => true,
            (Some(left), Some(right)) => **left == **right,
            _ => false,
        };
        return_types_equal
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(other.arguments.iter())
                .all(|(left, right)| left == right)
    }
}

/// A type value.
///
/// Carries the built-in kind, the type name, the ordered generic type
/// parameters, an optional non-owning reference to the definition the type
/// is bound to, an optional function signature, and the `constant`,
/// `reference` and `array` flags.
#[derive(Debug, Clone)]
pub struct Type {
    built_in_type: BuiltInType,
    name: String,
    generic_type_parameters: Vec<Type>,
    definition: Option<Definition>,
    function_signature: Option<Box<FunctionSignature>>,
    constant: bool,
    reference: bool,
    array: bool,
}

impl Type {
    /// Creates a type of the given built-in kind.
    pub fn create(built_in_type: BuiltInType) -> Self {
        let name = match built_in_type {
            BuiltInType::Void => "void",
            BuiltInType::Null => "",
            BuiltInType::Placeholder => "_",
            BuiltInType::Implicit => "implicit",
            BuiltInType::Byte => "byte",
            BuiltInType::Char => "char",
            BuiltInType::Integer => "int",
            BuiltInType::Long => "long",
            BuiltInType::Float => "float",
            BuiltInType::Boolean => "bool",
            BuiltInType::String => "string",
            BuiltInType::Lambda => "lambda",
            BuiltInType::Function => "fun",
            BuiltInType::Object => "object",
            BuiltInType::Enumeration | BuiltInType::NotBuiltIn => "",
        };
        let reference = matches!(
            built_in_type,
            BuiltInType::String | BuiltInType::Lambda | BuiltInType::Function | BuiltInType::Object
        );
        Type {
            built_in_type,
            name: String::from(name),
            generic_type_parameters: Vec::new(),
            definition: None,
            function_signature: None,
            constant: true,
            reference,
            array: false,
        }
    }

    /// Creates a type from a name. Reserved keywords produce the
    /// corresponding built-in type, any other name a user-defined type.
    pub fn create_named(name: &str) -> Self {
        if let Some(built_in_type) = KEYWORD_TYPES.get(name) {
            Type::create(*built_in_type)
        } else {
            Type {
                built_in_type: BuiltInType::NotBuiltIn,
                name: String::from(name),
                generic_type_parameters: Vec::new(),
                definition: None,
                function_signature: None,
                constant: true,
                reference: true,
                array: false,
            }
        }
    }

    pub fn void_type() -> Self {
        Type::create(BuiltInType::Void)
    }

    pub fn null_type() -> Self {
        Type::create(BuiltInType::Null)
    }

    /// Creates the element type of an array type, or None when the given
    /// type is not an array.
    pub fn create_array_element_type(array_type: &Type) -> Option<Type> {
        if !array_type.is_array() {
            return None;
        }
        let mut element_type = array_type.clone();
        element_type.array = false;
        if !Type::is_reference_type(element_type.built_in_type) {
            element_type.reference = false;
        }
        Some(element_type)
    }

    /// Whether values of the given built-in kind live behind a reference.
    pub fn is_reference_type(built_in_type: BuiltInType) -> bool {
        !matches!(
            built_in_type,
            BuiltInType::Byte
                | BuiltInType::Char
                | BuiltInType::Integer
                | BuiltInType::Long
                | BuiltInType::Float
                | BuiltInType::Boolean
                | BuiltInType::Enumeration
        )
    }

    pub fn get_built_in_type(&self) -> BuiltInType {
        self.built_in_type
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn is_built_in(&self) -> bool {
        self.built_in_type != BuiltInType::NotBuiltIn
    }

    pub fn is_void(&self) -> bool {
        self.built_in_type == BuiltInType::Void
    }

    pub fn is_null(&self) -> bool {
        self.built_in_type == BuiltInType::Null
    }

    pub fn is_placeholder(&self) -> bool {
        self.built_in_type == BuiltInType::Placeholder
    }

    pub fn is_implicit(&self) -> bool {
        self.built_in_type == BuiltInType::Implicit
    }

    pub fn is_boolean(&self) -> bool {
        self.built_in_type == BuiltInType::Boolean
    }

    pub fn is_object(&self) -> bool {
        self.built_in_type == BuiltInType::Object
    }

    pub fn is_enumeration(&self) -> bool {
        self.built_in_type == BuiltInType::Enumeration
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self.built_in_type,
            BuiltInType::Function | BuiltInType::Lambda
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self.built_in_type,
            BuiltInType::Byte | BuiltInType::Integer | BuiltInType::Long | BuiltInType::Float
        )
    }

    pub fn is_integer_number(&self) -> bool {
        matches!(
            self.built_in_type,
            BuiltInType::Byte | BuiltInType::Integer | BuiltInType::Long
        )
    }

    pub fn is_primitive(&self) -> bool {
        if self.is_array() {
            return false;
        }
        matches!(
            self.built_in_type,
            BuiltInType::Byte
                | BuiltInType::Char
                | BuiltInType::Integer
                | BuiltInType::Long
                | BuiltInType::Float
                | BuiltInType::Boolean
        )
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn is_reference(&self) -> bool {
        self.reference
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    pub fn is_interface(&self) -> bool {
        match self.get_class() {
            Some(class_def) => class_def.borrow().is_interface(),
            None => false,
        }
    }

    /// The class definition this type is bound to, if any.
    pub fn get_class(&self) -> Option<Rc<RefCell<ClassDefinition>>> {
        match &self.definition {
            Some(definition) => definition.get_class(),
            None => None,
        }
    }

    pub fn get_definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    /// Binds this type to its definition. Binding to an enumeration turns
    /// the type into an `Enumeration` value type; enumeration variants are
    /// value types as well.
    pub fn set_definition(&mut self, definition: Definition) {
        if let Some(class_def) = definition.get_class() {
            let class_def = class_def.borrow();
            if class_def.is_enumeration() {
                self.built_in_type = BuiltInType::Enumeration;
                if !self.array {
                    self.reference = false;
                }
            }
            if class_def.is_enumeration_variant() {
                self.reference = false;
            }
        }
        self.definition = Some(definition);
    }

    pub fn set_constant(&mut self, constant: bool) {
        self.constant = constant;
    }

    pub fn set_reference(&mut self, reference: bool) {
        self.reference = reference;
    }

    pub fn set_array(&mut self, array: bool) {
        self.array = array;
        if array {
            self.reference = true;
        }
    }

    pub fn add_generic_type_parameter(&mut self, type_parameter: Type) {
        self.generic_type_parameters.push(type_parameter);
    }

    pub fn has_generic_type_parameters(&self) -> bool {
        !self.generic_type_parameters.is_empty()
    }

    pub fn get_generic_type_parameters(&self) -> &[Type] {
        &self.generic_type_parameters
    }

    pub fn get_function_signature(&self) -> Option<&FunctionSignature> {
        self.function_signature.as_deref()
    }

    pub fn set_function_signature(&mut self, signature: FunctionSignature) {
        self.function_signature = Some(Box::new(signature));
    }

    /// The concrete type bound to this generic type parameter reference,
    /// inheriting the `array` and `constant` flags of the reference.
    pub fn get_concrete_type_assigned_to_generic_type_parameter(&self) -> Option<Type> {
        let definition = self.definition.as_ref()?;
        let generic_type_parameter = definition.get_generic_type_parameter()?;
        let generic_type_parameter = generic_type_parameter.borrow();
        let concrete_type = generic_type_parameter.get_concrete_type()?;
        let mut copied_concrete_type = concrete_type.clone();
        copied_concrete_type.set_array(self.array);
        copied_concrete_type.set_constant(self.constant);
        Some(copied_concrete_type)
    }

    /// The constructed name including generic parameters, `N<T1,T2,...>`.
    pub fn get_full_constructed_name(&self) -> String {
        if self.generic_type_parameters.is_empty() {
            return self.name.clone();
        }

        let mut full_name = self.name.clone();
        full_name.push('<');
        let mut insert_comma = false;
        for type_parameter in &self.generic_type_parameters {
            if insert_comma {
                full_name.push(',');
            }
            full_name.push_str(&type_parameter.get_full_constructed_name());
            insert_comma = true;
        }
        full_name.push('>');
        full_name
    }

    /// The closure interface name of a function type, `fun R(A1,A2,...)`.
    pub fn get_closure_interface_name(&self) -> String {
        let mut interface_name = String::from("fun ");
        if let Some(signature) = &self.function_signature {
            if let Some(return_type) = &signature.return_type {
                interface_name.push_str(&return_type.to_string());
            }
            interface_name.push('(');
            let mut insert_comma = false;
            for argument_type in &signature.arguments {
                if insert_comma {
                    interface_name.push(',');
                }
                interface_name.push_str(&argument_type.to_string());
                insert_comma = true;
            }
            interface_name.push(')');
        }
        interface_name
    }

    pub fn are_type_parameters_matching(&self, other: &Type) -> bool {
        if self.generic_type_parameters.len() != other.generic_type_parameters.len() {
            return false;
        }
        self.generic_type_parameters
            .iter()
            .zip(other.generic_type_parameters.iter())
            .all(|(type_parameter, other_type_parameter)| {
                type_parameter == other_type_parameter
            })
    }

    /// Whether this type is a primitive or a message class, including every
    /// generic type parameter.
    pub fn is_message_or_primitive(&self) -> bool {
        match self.get_class() {
            Some(class_def) => {
                if !self.is_primitive() && !class_def.borrow().is_message() {
                    return false;
                }
                self.generic_type_parameters
                    .iter()
                    .all(|type_parameter| type_parameter.is_message_or_primitive())
            }
            None => false,
        }
    }

    /// Equality with the `constant` flag deliberately ignored.
    ///
    /// A `Placeholder` on either side matches anything with the same
    /// `array` flag.
    pub fn are_equal_no_const_check(
        left: &Type,
        right: &Type,
        check_type_parameters: bool,
    ) -> bool {
        if left.is_placeholder() || right.is_placeholder() {
            return left.is_array() == right.is_array();
        }

        if left.built_in_type == right.built_in_type
            && left.name == right.name
            && left.reference == right.reference
            && left.array == right.array
        {
            if left.is_function() {
                let signatures_equal =
                    match (&left.function_signature, &right.function_signature) {
                        (None, None) => true,
                        (Some(left_sig), Some(right_sig)) => left_sig.equals(right_sig),
                        _ => false,
                    };
                if !signatures_equal {
                    return false;
                }
            }
            if check_type_parameters {
                return left.are_type_parameters_matching(right);
            }
            return true;
        }
        false
    }

    /// Whether a value of type `right` may initialize a slot of type
    /// `left`.
    pub fn are_initializable(left: &Type, right: &Type) -> bool {
        if left.is_placeholder() || right.is_placeholder() {
            return left.is_array() == right.is_array();
        }

        if left.is_reference() && right.is_null() {
            return true;
        }

        if left.is_enumeration() && right.is_enumeration() {
            if left.name != right.name || !left.are_type_parameters_matching(right) {
                return false;
            }
        } else if left.is_function() && right.is_function() {
            let signatures_equal = match (&left.function_signature, &right.function_signature) {
                (None, None) => true,
                (Some(left_sig), Some(right_sig)) => left_sig.equals(right_sig),
                _ => false,
            };
            if !signatures_equal {
                return false;
            }
        } else if left.is_built_in() && right.is_built_in() {
            if left.built_in_type != right.built_in_type
                && !Type::are_built_ins_implicitly_convertable(
                    right.built_in_type,
                    left.built_in_type,
                )
            {
                return false;
            }
        } else {
            // At least one type is not built-in. Check the class hierarchy.
            if !Type::are_convertable(left, right) {
                return false;
            }
        }

        left.array == right.array
    }

    pub fn are_assignable(left: &Type, right: &Type) -> bool {
        if left.is_constant() {
            return false;
        }
        Type::are_initializable(left, right)
    }

    pub fn is_assignable_by_expression(left: &Type, expression: &Expression) -> bool {
        if left.is_constant() {
            return false;
        }
        Type::is_initializable_by_expression(left, expression)
    }

    /// Initialization check against the type of an expression. Small
    /// integer literals tighten to `byte`.
    pub fn is_initializable_by_expression(left: &Type, expression: &Expression) -> bool {
        let right = match expression.get_type() {
            Some(right) => right,
            None => return false,
        };
        if let Expression::IntegerLiteral(integer_literal) = expression {
            if integer_literal.value < 256 {
                // Implicitly convert to byte.
                return Type::are_initializable(left, &Type::create(BuiltInType::Byte));
            }
        }
        Type::are_initializable(left, &right)
    }

    pub fn is_upcast(&self, target_type: &Type) -> bool {
        if self.is_interface() && target_type.is_object() {
            return true;
        }

        if let (Some(from_class), Some(target_class)) =
            (self.get_class(), target_type.get_class())
        {
            if from_class.borrow().is_subclass_of(&target_class.borrow()) {
                return true;
            }
        }
        false
    }

    pub fn is_downcast(&self, target_type: &Type) -> bool {
        if self.is_object() && target_type.is_interface() {
            return true;
        }

        if let (Some(from_class), Some(target_class)) =
            (self.get_class(), target_type.get_class())
        {
            if target_class.borrow().is_subclass_of(&from_class.borrow()) {
                return true;
            }
        }
        false
    }

    /// Class hierarchy convertibility: identical constructed names, object
    /// taking an interface, or a subclass on the right.
    pub fn are_convertable(left: &Type, right: &Type) -> bool {
        if left.name == right.name && left.are_type_parameters_matching(right) {
            return true;
        }

        if left.is_object() && right.is_interface() {
            return true;
        }

        if let (Some(left_class), Some(right_class)) = (left.get_class(), right.get_class()) {
            if right_class.borrow().is_subclass_of(&left_class.borrow()) {
                return true;
            }
        }
        false
    }

    /// The implicit built-in conversion table. Not symmetric: `int` does
    /// not narrow to `byte` implicitly.
    pub fn are_built_ins_implicitly_convertable(from: BuiltInType, to: BuiltInType) -> bool {
        match from {
            BuiltInType::String => matches!(to, BuiltInType::Object),
            BuiltInType::Byte => matches!(
                to,
                BuiltInType::Char | BuiltInType::Integer | BuiltInType::Long | BuiltInType::Float
            ),
            BuiltInType::Char => matches!(
                to,
                BuiltInType::Byte | BuiltInType::Integer | BuiltInType::Long | BuiltInType::Float
            ),
            BuiltInType::Integer => matches!(to, BuiltInType::Long),
            _ => false,
        }
    }

    /// The explicit built-in conversion table: reflexive, every numeric
    /// pair both ways, and string to object.
    pub fn are_built_ins_convertable(from: BuiltInType, to: BuiltInType) -> bool {
        if from == to {
            return true;
        }

        match from {
            BuiltInType::String => matches!(to, BuiltInType::Object),
            BuiltInType::Byte
            | BuiltInType::Char
            | BuiltInType::Integer
            | BuiltInType::Long
            | BuiltInType::Float => matches!(
                to,
                BuiltInType::Byte
                    | BuiltInType::Char
                    | BuiltInType::Integer
                    | BuiltInType::Long
                    | BuiltInType::Float
            ),
            _ => false,
        }
    }

    /// The common type of two consecutive expressions, for example the
    /// elements of an array literal. Returns None when no common type
    /// exists.
    pub fn calculate_common_type(previous_type: Option<&Type>, current_type: &Type) -> Option<Type> {
        let previous_type = match previous_type {
            Some(previous_type) => previous_type,
            None => return Some(current_type.clone()),
        };

        if current_type.is_null() && previous_type.is_reference() {
            return Some(previous_type.clone());
        }
        if previous_type.is_null() && current_type.is_reference() {
            return Some(current_type.clone());
        }

        if !Type::are_initializable(previous_type, current_type) {
            return None;
        }

        if previous_type.is_enumeration() && current_type.is_enumeration() {
            // A placeholder type parameter in the previous type widens to
            // the concrete parameter of the current type.
            for (previous, current) in previous_type
                .generic_type_parameters
                .iter()
                .zip(current_type.generic_type_parameters.iter())
            {
                if previous.is_placeholder() && !current.is_placeholder() {
                    return Some(current_type.clone());
                }
            }
        }
        Some(previous_type.clone())
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Type::are_equal_no_const_check(self, other, true) && self.constant == other.constant
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.built_in_type == BuiltInType::Null {
            return write!(f, "null");
        }
        if !self.constant {
            write!(f, "var ")?;
        }
        if self.has_generic_type_parameters() {
            write!(f, "{}", self.get_full_constructed_name())?;
        } else if self.is_function() {
            write!(f, "{}", self.get_closure_interface_name())?;
        } else {
            write!(f, "{}", self.name)?;
        }
        if self.array {
            write!(f, "[]")?;
        }
        Ok(())
    }
}
