//! Expression tree definitions.
//!
//! This module defines the expression nodes consumed and produced by
//! semantic analysis. The tree is a closed sum type: every consumer
//! matches on `Expression`, so adding a new node kind forces each
//! consumer to acknowledge it.
//!
//! Pattern lowering consumes literal, named entity, array, typed, class
//! decomposition, member selector and method call nodes, and produces
//! binary comparisons, array subscripts, type casts, local variable
//! references and null literals.

use std::rc::Rc;

use crate::Span;

use super::definitions::MethodDefinition;
use super::types::{BuiltInType, Type};

/// The kind tag of an expression node.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExpressionKind {
    NamedEntity,
    IntegerLiteral,
    BooleanLiteral,
    ArrayLiteral,
    Typed,
    ClassDecomposition,
    MemberSelector,
    MethodCall,
    ArraySubscript,
    Binary,
    TypeCast,
    LocalVariable,
    Null,
    Placeholder,
    Wildcard,
}

/// Binary operators produced by pattern lowering.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Operator {
    Equal,
    NotEqual,
    LogicalAnd,
    GreaterOrEqual,
    Subtraction,
    Assignment,
}

/// Named Entity Expression
/// Represents an identifier in the AST. Resolution happens during type
/// checking; until then the referenced entity is unknown.
#[derive(Debug, Clone)]
pub struct NamedEntityExpression {
    pub identifier: String,
    pub resolved_type: Option<Type>,
    pub span: Span,
}

impl NamedEntityExpression {
    pub fn new(identifier: &str, span: Span) -> Self {
        NamedEntityExpression {
            identifier: String::from(identifier),
            resolved_type: None,
            span,
        }
    }

    pub fn get_identifier(&self) -> &str {
        &self.identifier
    }
}

/// Integer Literal Expression
#[derive(Debug, Clone)]
pub struct IntegerLiteralExpression {
    pub value: i64,
    pub span: Span,
}

/// Boolean Literal Expression
#[derive(Debug, Clone)]
pub struct BooleanLiteralExpression {
    pub value: bool,
    pub span: Span,
}

/// Array Literal Expression
/// Represents `[e1, e2, ...]`. In pattern position the elements may
/// include the wildcard token `..`.
#[derive(Debug, Clone)]
pub struct ArrayLiteralExpression {
    pub elements: Vec<Expression>,
    pub resolved_type: Option<Type>,
    pub span: Span,
}

/// Typed Expression
/// Represents `name: T`, used in pattern position to test and downcast
/// the match subject.
#[derive(Debug, Clone)]
pub struct TypedExpression {
    pub target_type: Type,
    pub result_name: Option<Box<Expression>>,
    pub span: Span,
}

impl TypedExpression {
    pub fn get_result_name(&self) -> Option<&Expression> {
        self.result_name.as_deref()
    }
}

/// A member of a class decomposition: the member name and an optional
/// sub-pattern. A missing sub-pattern binds the member name itself.
#[derive(Debug, Clone)]
pub struct ClassDecompositionMember {
    pub name_expr: Expression,
    pub pattern_expr: Option<Expression>,
}

/// Class Decomposition Expression
/// Represents `T(member1: p1, member2: p2, ...)` in pattern position.
/// When the decomposition matches an enum variant, the variant name is
/// set and member names select into the variant data record.
#[derive(Debug, Clone)]
pub struct ClassDecompositionExpression {
    pub type_: Type,
    pub enum_variant_name: Option<String>,
    pub members: Vec<ClassDecompositionMember>,
    pub span: Span,
}

impl ClassDecompositionExpression {
    pub fn new(type_: Type, span: Span) -> Self {
        ClassDecompositionExpression {
            type_,
            enum_variant_name: None,
            members: Vec::new(),
            span,
        }
    }

    pub fn get_type(&self) -> &Type {
        &self.type_
    }

    pub fn get_enum_variant_name(&self) -> Option<&str> {
        self.enum_variant_name.as_deref()
    }

    pub fn set_enum_variant_name(&mut self, name: String) {
        self.enum_variant_name = Some(name);
    }

    pub fn add_member(&mut self, name_expr: Expression, pattern_expr: Option<Expression>) {
        self.members.push(ClassDecompositionMember {
            name_expr,
            pattern_expr,
        });
    }

    pub fn get_members(&self) -> &[ClassDecompositionMember] {
        &self.members
    }
}

/// Member Selector Expression
/// Represents `left.right`.
#[derive(Debug, Clone)]
pub struct MemberSelectorExpression {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub resolved_type: Option<Type>,
    pub span: Span,
}

impl MemberSelectorExpression {
    pub fn new(left: Expression, right: Expression, span: Span) -> Self {
        MemberSelectorExpression {
            left: Box::new(left),
            right: Box::new(right),
            resolved_type: None,
            span,
        }
    }
}

/// Method Call Expression
/// Represents `name(arguments...)`. In pattern position a call shaped
/// like a constructor is rewritten into a class decomposition; calls to
/// enum variant constructors carry the resolved constructor definition.
#[derive(Debug, Clone)]
pub struct MethodCallExpression {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub enum_ctor: Option<Rc<MethodDefinition>>,
    pub span: Span,
}

impl MethodCallExpression {
    pub fn new(name: &str, arguments: Vec<Expression>, span: Span) -> Self {
        MethodCallExpression {
            name: String::from(name),
            arguments,
            enum_ctor: None,
            span,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn get_enum_ctor_method_definition(&self) -> Option<&Rc<MethodDefinition>> {
        self.enum_ctor.as_ref()
    }
}

/// Array Subscript Expression
/// Represents `array[index]`.
#[derive(Debug, Clone)]
pub struct ArraySubscriptExpression {
    pub array: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone)]
pub struct BinaryExpression {
    pub operator: Operator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

impl BinaryExpression {
    pub fn new(operator: Operator, left: Expression, right: Expression, span: Span) -> Self {
        BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }
}

/// Type Cast Expression
/// Represents `(T)(operand)`.
#[derive(Debug, Clone)]
pub struct TypeCastExpression {
    pub target_type: Type,
    pub operand: Box<Expression>,
    pub span: Span,
}

/// Local Variable Expression
/// A reference to a local variable with a known type. Pattern lowering
/// uses these to refer to the cast temporaries it introduces.
#[derive(Debug, Clone)]
pub struct LocalVariableExpression {
    pub type_: Type,
    pub identifier: String,
    pub span: Span,
}

impl LocalVariableExpression {
    pub fn new(type_: Type, identifier: &str, span: Span) -> Self {
        LocalVariableExpression {
            type_,
            identifier: String::from(identifier),
            span,
        }
    }
}

/// Null Expression
#[derive(Debug, Clone)]
pub struct NullExpression {
    pub span: Span,
}

/// Placeholder Expression
/// The `_` token: any value, discarded.
#[derive(Debug, Clone)]
pub struct PlaceholderExpression {
    pub span: Span,
}

/// Wildcard Expression
/// The `..` token in an array pattern: any number of consecutive
/// elements.
#[derive(Debug, Clone)]
pub struct WildcardExpression {
    pub span: Span,
}

/// An expression node.
#[derive(Debug, Clone)]
pub enum Expression {
    NamedEntity(NamedEntityExpression),
    IntegerLiteral(IntegerLiteralExpression),
    BooleanLiteral(BooleanLiteralExpression),
    ArrayLiteral(ArrayLiteralExpression),
    Typed(TypedExpression),
    ClassDecomposition(ClassDecompositionExpression),
    MemberSelector(MemberSelectorExpression),
    MethodCall(MethodCallExpression),
    ArraySubscript(ArraySubscriptExpression),
    Binary(BinaryExpression),
    TypeCast(TypeCastExpression),
    LocalVariable(LocalVariableExpression),
    Null(NullExpression),
    Placeholder(PlaceholderExpression),
    Wildcard(WildcardExpression),
}

impl Expression {
    pub fn get_kind(&self) -> ExpressionKind {
        match self {
            Expression::NamedEntity(_) => ExpressionKind::NamedEntity,
            Expression::IntegerLiteral(_) => ExpressionKind::IntegerLiteral,
            Expression::BooleanLiteral(_) => ExpressionKind::BooleanLiteral,
            Expression::ArrayLiteral(_) => ExpressionKind::ArrayLiteral,
            Expression::Typed(_) => ExpressionKind::Typed,
            Expression::ClassDecomposition(_) => ExpressionKind::ClassDecomposition,
            Expression::MemberSelector(_) => ExpressionKind::MemberSelector,
            Expression::MethodCall(_) => ExpressionKind::MethodCall,
            Expression::ArraySubscript(_) => ExpressionKind::ArraySubscript,
            Expression::Binary(_) => ExpressionKind::Binary,
            Expression::TypeCast(_) => ExpressionKind::TypeCast,
            Expression::LocalVariable(_) => ExpressionKind::LocalVariable,
            Expression::Null(_) => ExpressionKind::Null,
            Expression::Placeholder(_) => ExpressionKind::Placeholder,
            Expression::Wildcard(_) => ExpressionKind::Wildcard,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expression::NamedEntity(e) => &e.span,
            Expression::IntegerLiteral(e) => &e.span,
            Expression::BooleanLiteral(e) => &e.span,
            Expression::ArrayLiteral(e) => &e.span,
            Expression::Typed(e) => &e.span,
            Expression::ClassDecomposition(e) => &e.span,
            Expression::MemberSelector(e) => &e.span,
            Expression::MethodCall(e) => &e.span,
            Expression::ArraySubscript(e) => &e.span,
            Expression::Binary(e) => &e.span,
            Expression::TypeCast(e) => &e.span,
            Expression::LocalVariable(e) => &e.span,
            Expression::Null(e) => &e.span,
            Expression::Placeholder(e) => &e.span,
            Expression::Wildcard(e) => &e.span,
        }
    }

    /// The static type of this expression, when known. Resolved nodes
    /// store the type assigned during type checking; literals know their
    /// type up front.
    pub fn get_type(&self) -> Option<Type> {
        match self {
            Expression::NamedEntity(e) => e.resolved_type.clone(),
            Expression::IntegerLiteral(_) => Some(Type::create(BuiltInType::Integer)),
            Expression::BooleanLiteral(_) => Some(Type::create(BuiltInType::Boolean)),
            Expression::ArrayLiteral(e) => e.resolved_type.clone(),
            Expression::Typed(e) => Some(e.target_type.clone()),
            Expression::ClassDecomposition(e) => Some(e.type_.clone()),
            Expression::MemberSelector(e) => e.resolved_type.clone(),
            Expression::MethodCall(_) => None,
            Expression::ArraySubscript(e) => e
                .array
                .get_type()
                .and_then(|array_type| Type::create_array_element_type(&array_type)),
            Expression::Binary(e) => match e.operator {
                Operator::Equal
                | Operator::NotEqual
                | Operator::LogicalAnd
                | Operator::GreaterOrEqual => Some(Type::create(BuiltInType::Boolean)),
                Operator::Subtraction | Operator::Assignment => e.left.get_type(),
            },
            Expression::TypeCast(e) => Some(e.target_type.clone()),
            Expression::LocalVariable(e) => Some(e.type_.clone()),
            Expression::Null(_) => Some(Type::null_type()),
            Expression::Placeholder(_) => Some(Type::create(BuiltInType::Placeholder)),
            Expression::Wildcard(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Expression::Placeholder(_))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Expression::Wildcard(_))
    }

    pub fn is_named_entity(&self) -> bool {
        matches!(self, Expression::NamedEntity(_))
    }

    /// Whether this expression is a named entity referring to the same
    /// name as the given expression.
    pub fn is_referencing_name(&self, other: &Expression) -> bool {
        let identifier = match self {
            Expression::NamedEntity(e) => &e.identifier,
            _ => return false,
        };
        match other {
            Expression::NamedEntity(e) => e.identifier == *identifier,
            Expression::LocalVariable(e) => e.identifier == *identifier,
            _ => false,
        }
    }

    /// A deterministic identifier fragment derived from this expression,
    /// used to mangle the names of generated temporaries.
    pub fn generate_variable_name(&self) -> String {
        match self {
            Expression::NamedEntity(e) => e.identifier.clone(),
            Expression::LocalVariable(e) => e.identifier.clone(),
            Expression::MemberSelector(e) => format!(
                "{}_{}",
                e.left.generate_variable_name(),
                e.right.generate_variable_name()
            ),
            _ => format!("tmp{}", self.get_span().start.0),
        }
    }
}
