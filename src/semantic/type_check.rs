//! Expression type checking used by pattern lowering.
//!
//! Pattern analysis needs the static types of subjects, member selectors
//! and decomposition patterns before it can lower them. The checks here
//! resolve names through the context, store the resolved type on the
//! node, and return it.

use crate::ast::definitions::ClassMember;
use crate::ast::expressions::{
    ClassDecompositionExpression, Expression, MemberSelectorExpression, MethodCallExpression,
    NamedEntityExpression, Operator, TypedExpression,
};
use crate::ast::types::{BuiltInType, Type};
use crate::errors::errors::{Error, ErrorImpl};

use super::bindings::Binding;
use super::context::Context;

/// Type checks an expression, storing the resolved type on nodes that
/// carry one.
pub fn type_check_expression(expression: &mut Expression, context: &Context) -> Result<Type, Error> {
    match expression {
        Expression::NamedEntity(named_entity) => {
            let type_ = resolve_named_entity_type(named_entity, context)?;
            named_entity.resolved_type = Some(type_.clone());
            Ok(type_)
        }
        Expression::IntegerLiteral(_) => Ok(Type::create(BuiltInType::Integer)),
        Expression::BooleanLiteral(_) => Ok(Type::create(BuiltInType::Boolean)),
        Expression::Null(_) => Ok(Type::null_type()),
        Expression::Placeholder(_) => Ok(Type::create(BuiltInType::Placeholder)),
        Expression::LocalVariable(local_variable) => Ok(local_variable.type_.clone()),
        Expression::ArrayLiteral(array_literal) => {
            let mut common_type: Option<Type> = None;
            for element in &mut array_literal.elements {
                let element_type = type_check_expression(element, context)?;
                common_type =
                    match Type::calculate_common_type(common_type.as_ref(), &element_type) {
                        Some(common_type) => Some(common_type),
                        None => {
                            return Err(Error::new(
                                ErrorImpl::IncompatibleTypes {
                                    expected: common_type
                                        .map(|t| t.to_string())
                                        .unwrap_or_default(),
                                    received: element_type.to_string(),
                                },
                                element.get_span().start.clone(),
                            ))
                        }
                    };
            }
            let mut array_type =
                common_type.unwrap_or_else(|| Type::create(BuiltInType::Implicit));
            array_type.set_array(true);
            array_literal.resolved_type = Some(array_type.clone());
            Ok(array_type)
        }
        Expression::Typed(typed_expression) => {
            resolve_typed_expression(typed_expression, context)
        }
        Expression::ClassDecomposition(class_decomposition) => {
            type_check_class_decomposition(class_decomposition, context)
        }
        Expression::MemberSelector(member_selector) => {
            let left_type = type_check_expression(&mut member_selector.left, context)?;
            let type_ = resolve_selector_member(&left_type, &mut member_selector.right, context)?;
            member_selector.resolved_type = Some(type_.clone());
            Ok(type_)
        }
        Expression::ArraySubscript(array_subscript) => {
            let array_type = type_check_expression(&mut array_subscript.array, context)?;
            type_check_expression(&mut array_subscript.index, context)?;
            Type::create_array_element_type(&array_type).ok_or_else(|| {
                Error::new(
                    ErrorImpl::IncompatibleTypes {
                        expected: String::from("array type"),
                        received: array_type.to_string(),
                    },
                    array_subscript.span.start.clone(),
                )
            })
        }
        Expression::Binary(binary) => {
            let left_type = type_check_expression(&mut binary.left, context)?;
            type_check_expression(&mut binary.right, context)?;
            match binary.operator {
                Operator::Equal
                | Operator::NotEqual
                | Operator::LogicalAnd
                | Operator::GreaterOrEqual => Ok(Type::create(BuiltInType::Boolean)),
                Operator::Subtraction | Operator::Assignment => Ok(left_type),
            }
        }
        Expression::TypeCast(type_cast) => {
            type_check_expression(&mut type_cast.operand, context)?;
            resolve_type_name(&mut type_cast.target_type, context, &type_cast.span.start)?;
            Ok(type_cast.target_type.clone())
        }
        Expression::MethodCall(method_call) => Err(Error::new(
            ErrorImpl::NotImplementedError,
            method_call.span.start.clone(),
        )),
        Expression::Wildcard(wildcard) => Err(Error::new(
            ErrorImpl::NotImplementedError,
            wildcard.span.start.clone(),
        )),
    }
}

/// Resolves the type of a class decomposition pattern and binds it to its
/// class or enumeration definition.
pub fn type_check_class_decomposition(
    class_decomposition: &mut ClassDecompositionExpression,
    context: &Context,
) -> Result<Type, Error> {
    let span_start = class_decomposition.span.start.clone();
    resolve_type_name(&mut class_decomposition.type_, context, &span_start)?;
    Ok(class_decomposition.type_.clone())
}

/// Resolves the target type of a typed expression.
pub fn resolve_typed_expression(
    typed_expression: &mut TypedExpression,
    context: &Context,
) -> Result<Type, Error> {
    let span_start = typed_expression.span.start.clone();
    resolve_type_name(&mut typed_expression.target_type, context, &span_start)?;
    Ok(typed_expression.target_type.clone())
}

fn resolve_type_name(
    type_: &mut Type,
    context: &Context,
    position: &crate::Position,
) -> Result<(), Error> {
    if type_.is_built_in() || type_.get_definition().is_some() {
        return Ok(());
    }
    match context.lookup_type(type_.get_name()) {
        Some(definition) => {
            type_.set_definition(definition);
            Ok(())
        }
        None => Err(Error::new(
            ErrorImpl::UnknownType {
                type_: String::from(type_.get_name()),
            },
            position.clone(),
        )),
    }
}

fn resolve_named_entity_type(
    named_entity: &NamedEntityExpression,
    context: &Context,
) -> Result<Type, Error> {
    match context.lookup(named_entity.get_identifier()) {
        Some(Binding::LocalObject(declaration)) => Ok(declaration.borrow().get_type().clone()),
        Some(Binding::DataMember(data_member)) => Ok(data_member.borrow().get_type().clone()),
        Some(Binding::Class(class_def)) => {
            let mut type_ = Type::create_named(named_entity.get_identifier());
            type_.set_definition(crate::ast::definitions::Definition::from_class(&class_def));
            Ok(type_)
        }
        Some(Binding::GenericTypeParameter(parameter)) => {
            let mut type_ = Type::create_named(named_entity.get_identifier());
            type_.set_definition(
                crate::ast::definitions::Definition::from_generic_type_parameter(&parameter),
            );
            Ok(type_)
        }
        _ => Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: String::from(named_entity.get_identifier()),
            },
            named_entity.span.start.clone(),
        )),
    }
}

/// Resolves the right-hand side of a member selector against the type of
/// the left-hand side. Chained selectors resolve member by member.
fn resolve_selector_member(
    left_type: &Type,
    member: &mut Expression,
    context: &Context,
) -> Result<Type, Error> {
    match member {
        Expression::NamedEntity(named_entity) => {
            let class_def = left_type.get_class().ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnknownType {
                        type_: left_type.to_string(),
                    },
                    named_entity.span.start.clone(),
                )
            })?;
            let data_member = class_def
                .borrow()
                .get_data_member(named_entity.get_identifier())
                .ok_or_else(|| {
                    Error::new(
                        ErrorImpl::UnknownMember {
                            member: String::from(named_entity.get_identifier()),
                            type_: left_type.to_string(),
                        },
                        named_entity.span.start.clone(),
                    )
                })?;
            let type_ = data_member.borrow().get_type().clone();
            named_entity.resolved_type = Some(type_.clone());
            Ok(type_)
        }
        Expression::MemberSelector(member_selector) => {
            let middle_type =
                resolve_selector_member(left_type, &mut member_selector.left, context)?;
            let type_ =
                resolve_selector_member(&middle_type, &mut member_selector.right, context)?;
            member_selector.resolved_type = Some(type_.clone());
            Ok(type_)
        }
        _ => Err(Error::new(
            ErrorImpl::NotImplementedError,
            member.get_span().start.clone(),
        )),
    }
}

impl NamedEntityExpression {
    /// Interprets this name as a constructor call when it resolves to a
    /// class or an enum variant constructor. In strict mode a name bound
    /// to an ordinary method is not treated as a call.
    pub fn get_call(&self, context: &Context, strict: bool) -> Option<MethodCallExpression> {
        match context.lookup(&self.identifier) {
            Some(Binding::Class(_)) => Some(MethodCallExpression::new(
                &self.identifier,
                Vec::new(),
                self.span.clone(),
            )),
            Some(Binding::Method(method_list)) => {
                let enum_ctor = method_list
                    .iter()
                    .find(|method| method.is_enum_constructor());
                match enum_ctor {
                    Some(enum_ctor) => {
                        let mut call = MethodCallExpression::new(
                            &self.identifier,
                            Vec::new(),
                            self.span.clone(),
                        );
                        call.enum_ctor = Some(enum_ctor.clone());
                        Some(call)
                    }
                    None if strict => None,
                    None => Some(MethodCallExpression::new(
                        &self.identifier,
                        Vec::new(),
                        self.span.clone(),
                    )),
                }
            }
            _ => None,
        }
    }
}

impl MethodCallExpression {
    /// Resolves this call's name to an enum variant constructor when the
    /// name is bound to one in the current scope.
    pub fn try_resolve_enum_constructor(&mut self, context: &Context) {
        if self.enum_ctor.is_some() {
            return;
        }
        if let Some(Binding::Method(method_list)) = context.lookup(&self.name) {
            self.enum_ctor = method_list
                .iter()
                .find(|method| method.is_enum_constructor())
                .cloned();
        }
    }
}

impl MemberSelectorExpression {
    /// Interprets `Enum.Variant(args)` as an enum constructor call:
    /// resolves the left-hand side to a class and the right-hand call to
    /// one of its variant constructors.
    pub fn get_rhs_call(&self, context: &Context) -> Option<MethodCallExpression> {
        let class_name = match self.left.as_ref() {
            Expression::NamedEntity(named_entity) => named_entity.get_identifier(),
            _ => return None,
        };
        let call = match self.right.as_ref() {
            Expression::MethodCall(call) => call,
            _ => return None,
        };
        let class_def = match context.lookup(class_name) {
            Some(Binding::Class(class_def)) => class_def,
            _ => return None,
        };
        let class_def = class_def.borrow();
        for member in class_def.get_members() {
            if let ClassMember::Method(method) = member {
                if method.is_enum_constructor() && method.get_name() == call.get_name() {
                    let mut resolved_call = call.clone();
                    resolved_call.enum_ctor = Some(method.clone());
                    return Some(resolved_call);
                }
            }
        }
        None
    }
}
