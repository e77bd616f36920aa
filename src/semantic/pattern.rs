//! Pattern analysis and lowering.
//!
//! A match case pattern is an ordinary expression until semantic analysis
//! classifies it. Each pattern kind can decide whether it makes the match
//! exhaustive, and lowers itself into a boolean comparison expression
//! over the match subject. Lowering also accumulates the variable
//! declarations the pattern introduces into the case body, and the
//! uninitialized temporaries needed for safe downcasts.
//!
//! Constructor-shaped calls in pattern position, `C(a, b)` or
//! `Enum.Variant(x)`, are first rewritten into class decomposition
//! expressions so that one lowering path handles both spellings.

use tracing::debug;

use crate::ast::expressions::{
    ArrayLiteralExpression, ArraySubscriptExpression, BinaryExpression,
    ClassDecompositionExpression, ClassDecompositionMember, Expression, IntegerLiteralExpression,
    LocalVariableExpression, MemberSelectorExpression, MethodCallExpression,
    NamedEntityExpression, NullExpression, Operator, TypeCastExpression, TypedExpression,
};
use crate::ast::statements::VariableDeclarationStatement;
use crate::ast::types::{BuiltInType, Type};
use crate::errors::errors::{Error, ErrorImpl};

use super::context::Context;
use super::coverage::MatchCoverage;
use super::symbols;
use super::type_check::{
    resolve_typed_expression, type_check_class_decomposition, type_check_expression,
};

fn pattern_expression_creates_variable(
    pattern_expression: &NamedEntityExpression,
    context: &Context,
) -> bool {
    !context.is_referencing_static_data_member(pattern_expression)
}

fn member_pattern_is_irrefutable(member_pattern: Option<&Expression>, context: &Context) -> bool {
    let member_pattern = match member_pattern {
        None => return true,
        Some(member_pattern) => member_pattern,
    };
    if member_pattern.is_placeholder() {
        return true;
    }
    if let Expression::NamedEntity(named_entity) = member_pattern {
        if pattern_expression_creates_variable(named_entity, context) {
            // The member pattern introduces a new variable. This is an
            // irrefutable pattern.
            return true;
        }
    }
    false
}

fn generate_match_subject_member_selector(
    subject: &Expression,
    member_name: &Expression,
) -> Expression {
    Expression::MemberSelector(MemberSelectorExpression::new(
        subject.clone(),
        member_name.clone(),
        member_name.get_span().clone(),
    ))
}

fn get_constructor_call(expression: &Expression, context: &Context) -> Option<MethodCallExpression> {
    match expression {
        Expression::MethodCall(constructor_call) => {
            let mut constructor_call = constructor_call.clone();
            constructor_call.try_resolve_enum_constructor(context);
            Some(constructor_call)
        }
        Expression::NamedEntity(name_expr) => name_expr.get_call(context, true),
        Expression::MemberSelector(member_selector) => member_selector.get_rhs_call(context),
        _ => None,
    }
}

fn create_class_decomposition_from_constructor_call(
    constructor_call: &MethodCallExpression,
    context: &Context,
) -> Result<ClassDecompositionExpression, Error> {
    let mut class_decomposition = ClassDecompositionExpression::new(
        Type::create_named(constructor_call.get_name()),
        constructor_call.span.clone(),
    );

    let type_ = type_check_class_decomposition(&mut class_decomposition, context)?;
    let class_def = type_.get_class().ok_or_else(|| {
        Error::new(
            ErrorImpl::UnknownType {
                type_: String::from(constructor_call.get_name()),
            },
            constructor_call.span.start.clone(),
        )
    })?;

    let primary_ctor_arg_data_members =
        class_def.borrow().get_primary_ctor_arg_data_members().to_vec();
    let constructor_pattern_args = constructor_call.get_arguments();
    if primary_ctor_arg_data_members.len() != constructor_pattern_args.len() {
        return Err(Error::new(
            ErrorImpl::ConstructorPatternArity {
                expected: primary_ctor_arg_data_members.len(),
                received: constructor_pattern_args.len(),
            },
            constructor_call.span.start.clone(),
        ));
    }

    for (data_member, pattern_expr) in primary_ctor_arg_data_members
        .iter()
        .zip(constructor_pattern_args.iter())
    {
        let member_name = Expression::NamedEntity(NamedEntityExpression::new(
            data_member.borrow().get_name(),
            pattern_expr.get_span().clone(),
        ));
        let pattern_expr = match get_constructor_call(pattern_expr, context) {
            Some(constructor_call) => Expression::ClassDecomposition(
                create_class_decomposition_expr(&constructor_call, context)?,
            ),
            None => pattern_expr.clone(),
        };
        class_decomposition.add_member(member_name, Some(pattern_expr));
    }

    Ok(class_decomposition)
}

fn create_class_decomposition_from_enum_ctor_call(
    enum_constructor_call: &MethodCallExpression,
    enum_constructor: &std::rc::Rc<crate::ast::definitions::MethodDefinition>,
    context: &Context,
) -> Result<ClassDecompositionExpression, Error> {
    let enum_def = enum_constructor.get_class().ok_or_else(|| {
        Error::new(
            ErrorImpl::UnknownType {
                type_: String::from(enum_constructor_call.get_name()),
            },
            enum_constructor_call.span.start.clone(),
        )
    })?;
    let enum_name = String::from(enum_def.borrow().get_name());

    let mut class_decomposition = ClassDecompositionExpression::new(
        Type::create_named(&enum_name),
        enum_constructor_call.span.clone(),
    );

    let enum_variant_name = String::from(enum_constructor.get_name());
    class_decomposition.set_enum_variant_name(enum_variant_name.clone());
    type_check_class_decomposition(&mut class_decomposition, context)?;

    let constructor_pattern_args = enum_constructor_call.get_arguments();
    if enum_constructor.get_argument_list().len() != constructor_pattern_args.len() {
        return Err(Error::new(
            ErrorImpl::EnumConstructorPatternArity {
                expected: enum_constructor.get_argument_list().len(),
                received: constructor_pattern_args.len(),
            },
            enum_constructor_call.span.start.clone(),
        ));
    }
    if constructor_pattern_args.is_empty() {
        return Ok(class_decomposition);
    }

    let enum_variant_class_name = symbols::make_enum_variant_class_name(&enum_variant_name);
    let enum_variant_def = enum_def
        .borrow()
        .get_nested_class(&enum_variant_class_name)
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    type_: enum_variant_class_name,
                },
                enum_constructor_call.span.start.clone(),
            )
        })?;
    let variant_data_members =
        enum_variant_def.borrow().get_primary_ctor_arg_data_members().to_vec();
    debug_assert_eq!(variant_data_members.len(), constructor_pattern_args.len());

    for (data_member, pattern_expr) in variant_data_members
        .iter()
        .zip(constructor_pattern_args.iter())
    {
        let span = pattern_expr.get_span().clone();
        let member_selector = Expression::MemberSelector(MemberSelectorExpression::new(
            Expression::NamedEntity(NamedEntityExpression::new(
                &symbols::make_enum_variant_data_name(&enum_variant_name),
                span.clone(),
            )),
            Expression::NamedEntity(NamedEntityExpression::new(
                data_member.borrow().get_name(),
                span,
            )),
            pattern_expr.get_span().clone(),
        ));
        let pattern_expr = match get_constructor_call(pattern_expr, context) {
            Some(constructor_call) => Expression::ClassDecomposition(
                create_class_decomposition_expr(&constructor_call, context)?,
            ),
            None => pattern_expr.clone(),
        };
        class_decomposition.add_member(member_selector, Some(pattern_expr));
    }

    Ok(class_decomposition)
}

fn create_class_decomposition_expr(
    constructor_call: &MethodCallExpression,
    context: &Context,
) -> Result<ClassDecompositionExpression, Error> {
    match constructor_call.get_enum_ctor_method_definition() {
        Some(enum_constructor) => {
            let enum_constructor = enum_constructor.clone();
            create_class_decomposition_from_enum_ctor_call(
                constructor_call,
                &enum_constructor,
                context,
            )
        }
        None => create_class_decomposition_from_constructor_call(constructor_call, context),
    }
}

/// The subject type of a pattern operation. Subjects are type checked by
/// the surrounding match analysis before patterns see them.
fn get_subject_type(subject: &Expression) -> Result<Type, Error> {
    subject.get_type().ok_or_else(|| {
        Error::new(
            ErrorImpl::UntypedExpression,
            subject.get_span().start.clone(),
        )
    })
}

/// Generates the declaration of the match subject length variable,
/// emitted once per array pattern case before the comparison runs.
pub fn generate_match_subject_length_declaration(
    subject: &Expression,
) -> VariableDeclarationStatement {
    let span = subject.get_span().clone();
    let array_length_selector = Expression::MemberSelector(MemberSelectorExpression::new(
        subject.clone(),
        Expression::NamedEntity(NamedEntityExpression::new(
            symbols::ARRAY_LENGTH_METHOD_NAME,
            span.clone(),
        )),
        span.clone(),
    ));
    VariableDeclarationStatement::new(
        Type::create(BuiltInType::Integer),
        symbols::MATCH_SUBJECT_LENGTH_NAME,
        Some(array_length_selector),
        span,
    )
}

/// A match case pattern together with the declarations and temporaries
/// its lowering produces.
#[derive(Debug)]
pub struct Pattern {
    kind: PatternKind,
    declarations: Vec<VariableDeclarationStatement>,
    temporaries: Vec<VariableDeclarationStatement>,
}

/// The four pattern kinds.
#[derive(Debug)]
pub enum PatternKind {
    Simple(SimplePattern),
    Array(ArrayPattern),
    ClassDecomposition(ClassDecompositionPattern),
    Typed(TypedPattern),
}

/// A pattern consisting of a single expression: a literal, a reference
/// back to the subject, or a name introducing a new binding.
#[derive(Debug)]
pub struct SimplePattern {
    expression: Expression,
}

/// An array pattern `[e1, .., en]`.
#[derive(Debug)]
pub struct ArrayPattern {
    array: ArrayLiteralExpression,
}

/// A class decomposition pattern `T(member1: p1, ...)`, possibly tagged
/// with an enum variant name.
#[derive(Debug)]
pub struct ClassDecompositionPattern {
    class_decomposition: ClassDecompositionExpression,
}

/// A typed pattern `name: T` testing the dynamic type of the subject.
#[derive(Debug)]
pub struct TypedPattern {
    typed_expression: TypedExpression,
}

impl Pattern {
    /// Classifies an expression in pattern position. Constructor-shaped
    /// calls are rewritten into class decompositions.
    pub fn create(expression: Expression, context: &Context) -> Result<Pattern, Error> {
        let kind = match expression {
            Expression::ArrayLiteral(array) => PatternKind::Array(ArrayPattern { array }),
            Expression::Typed(typed_expression) => {
                PatternKind::Typed(TypedPattern { typed_expression })
            }
            Expression::ClassDecomposition(class_decomposition) => {
                PatternKind::ClassDecomposition(ClassDecompositionPattern {
                    class_decomposition,
                })
            }
            expression => match get_constructor_call(&expression, context) {
                Some(constructor_call) => {
                    PatternKind::ClassDecomposition(ClassDecompositionPattern {
                        class_decomposition: create_class_decomposition_expr(
                            &constructor_call,
                            context,
                        )?,
                    })
                }
                None => PatternKind::Simple(SimplePattern { expression }),
            },
        };
        debug!(kind = kind.name(), "classified match case pattern");
        Ok(Pattern {
            kind,
            declarations: Vec::new(),
            temporaries: Vec::new(),
        })
    }

    pub fn get_kind(&self) -> &PatternKind {
        &self.kind
    }

    /// The variable declarations to inject at the head of the case body.
    pub fn get_declarations(&self) -> &[VariableDeclarationStatement] {
        &self.declarations
    }

    /// The uninitialized temporaries to declare before the comparison.
    pub fn get_temporaries(&self) -> &[VariableDeclarationStatement] {
        &self.temporaries
    }

    pub fn take_declarations(&mut self) -> Vec<VariableDeclarationStatement> {
        std::mem::take(&mut self.declarations)
    }

    pub fn take_temporaries(&mut self) -> Vec<VariableDeclarationStatement> {
        std::mem::take(&mut self.temporaries)
    }

    /// Whether this case makes the whole match exhaustive. A guarded case
    /// may still fail at runtime, so a guard suppresses coverage marking.
    pub fn is_match_exhaustive(
        &mut self,
        subject: &Expression,
        coverage: &mut MatchCoverage,
        is_match_guard_present: bool,
        context: &Context,
    ) -> Result<bool, Error> {
        match &mut self.kind {
            PatternKind::Simple(pattern) => {
                pattern.is_match_exhaustive(subject, coverage, is_match_guard_present, context)
            }
            PatternKind::Array(pattern) => {
                Ok(pattern.is_match_exhaustive(is_match_guard_present))
            }
            PatternKind::ClassDecomposition(pattern) => {
                pattern.is_match_exhaustive(subject, coverage, is_match_guard_present, context)
            }
            PatternKind::Typed(pattern) => {
                pattern.is_match_exhaustive(subject, is_match_guard_present, context)
            }
        }
    }

    /// Generates the boolean comparison expression that is true exactly
    /// when the subject matches this pattern. Returns None when the
    /// pattern matches unconditionally.
    pub fn generate_comparison_expression(
        &mut self,
        subject: &Expression,
        context: &Context,
    ) -> Result<Option<Expression>, Error> {
        let Pattern {
            kind,
            declarations,
            temporaries,
        } = self;
        match kind {
            PatternKind::Simple(pattern) => pattern
                .generate_comparison_expression(subject, context, declarations)
                .map(Some),
            PatternKind::Array(pattern) => pattern
                .generate_comparison_expression(subject, context, declarations)
                .map(Some),
            PatternKind::ClassDecomposition(pattern) => pattern
                .generate_comparison_expression(subject, context, declarations, temporaries),
            PatternKind::Typed(pattern) => pattern
                .generate_comparison_expression(subject, context, declarations, temporaries)
                .map(Some),
        }
    }
}

impl PatternKind {
    fn name(&self) -> &'static str {
        match self {
            PatternKind::Simple(_) => "simple",
            PatternKind::Array(_) => "array",
            PatternKind::ClassDecomposition(_) => "class decomposition",
            PatternKind::Typed(_) => "typed",
        }
    }
}

impl SimplePattern {
    fn is_match_exhaustive(
        &self,
        subject: &Expression,
        coverage: &mut MatchCoverage,
        is_match_guard_present: bool,
        context: &Context,
    ) -> Result<bool, Error> {
        if self.expression.is_placeholder() {
            return Ok(!is_match_guard_present);
        }

        if let Expression::BooleanLiteral(bool_literal) = &self.expression {
            let subject_is_boolean = subject
                .get_type()
                .map(|subject_type| subject_type.is_boolean())
                .unwrap_or(false);
            if subject_is_boolean {
                let bool_case_name = if bool_literal.value {
                    symbols::BOOL_TRUE_CASE_NAME
                } else {
                    symbols::BOOL_FALSE_CASE_NAME
                };

                if coverage.is_case_covered(bool_case_name) {
                    return Err(Error::new(
                        ErrorImpl::UnreachablePattern,
                        self.expression.get_span().start.clone(),
                    ));
                }
                if !is_match_guard_present {
                    coverage.mark_case_as_covered(bool_case_name);
                    if coverage.are_all_cases_covered() {
                        return Ok(true);
                    }
                }
                return Ok(false);
            }
        }

        let named_entity = match &self.expression {
            Expression::NamedEntity(named_entity) => named_entity,
            _ => return Ok(false),
        };
        if !is_match_guard_present {
            if self.expression.is_referencing_name(subject) {
                // The pattern refers back to the subject. This is an
                // irrefutable pattern.
                return Ok(true);
            }
            if pattern_expression_creates_variable(named_entity, context) {
                // The pattern introduces a new variable. This is an
                // irrefutable pattern.
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn generate_comparison_expression(
        &self,
        subject: &Expression,
        context: &Context,
        declarations: &mut Vec<VariableDeclarationStatement>,
    ) -> Result<Expression, Error> {
        if let Expression::NamedEntity(named_entity) = &self.expression {
            if pattern_expression_creates_variable(named_entity, context) {
                // The pattern introduces a new variable. The variable will
                // bind to the value of the match subject.
                declarations.push(VariableDeclarationStatement::new(
                    Type::create(BuiltInType::Implicit),
                    named_entity.get_identifier(),
                    Some(subject.clone()),
                    named_entity.span.clone(),
                ));
            }
        }

        Ok(Expression::Binary(BinaryExpression::new(
            Operator::Equal,
            subject.clone(),
            self.expression.clone(),
            self.expression.get_span().clone(),
        )))
    }
}

impl ArrayPattern {
    fn is_match_exhaustive(&self, is_match_guard_present: bool) -> bool {
        if self.array.elements.len() == 1 && self.array.elements[0].is_wildcard() {
            return !is_match_guard_present;
        }
        false
    }

    fn generate_comparison_expression(
        &self,
        subject: &Expression,
        context: &Context,
        declarations: &mut Vec<VariableDeclarationStatement>,
    ) -> Result<Expression, Error> {
        let mut comparison = self.generate_length_comparison_expression()?;
        let mut to_the_right_of_wildcard = false;

        for index in 0..self.array.elements.len() {
            let element = &self.array.elements[index];
            let element_comparison = self.generate_element_comparison_expression(
                subject,
                index,
                context,
                to_the_right_of_wildcard,
                declarations,
            );
            if let Some(element_comparison) = element_comparison {
                comparison = Expression::Binary(BinaryExpression::new(
                    Operator::LogicalAnd,
                    comparison,
                    element_comparison,
                    element.get_span().clone(),
                ));
            }

            if element.is_wildcard() {
                to_the_right_of_wildcard = true;
            }
        }
        Ok(comparison)
    }

    fn generate_element_comparison_expression(
        &self,
        subject: &Expression,
        index: usize,
        context: &Context,
        to_the_right_of_wildcard: bool,
        declarations: &mut Vec<VariableDeclarationStatement>,
    ) -> Option<Expression> {
        let element = &self.array.elements[index];
        match element {
            Expression::NamedEntity(named_entity) => {
                if pattern_expression_creates_variable(named_entity, context) {
                    // The pattern introduces a new variable. The variable
                    // will bind to the value of the corresponding array
                    // element in the match subject.
                    let subscript = self.generate_array_subscript_expression(
                        subject,
                        index,
                        to_the_right_of_wildcard,
                    );
                    declarations.push(VariableDeclarationStatement::new(
                        Type::create(BuiltInType::Implicit),
                        named_entity.get_identifier(),
                        Some(subscript),
                        named_entity.span.clone(),
                    ));
                    return None;
                }
                Some(Expression::Binary(BinaryExpression::new(
                    Operator::Equal,
                    self.generate_array_subscript_expression(
                        subject,
                        index,
                        to_the_right_of_wildcard,
                    ),
                    element.clone(),
                    element.get_span().clone(),
                )))
            }
            Expression::Placeholder(_) | Expression::Wildcard(_) => None,
            _ => Some(Expression::Binary(BinaryExpression::new(
                Operator::Equal,
                self.generate_array_subscript_expression(
                    subject,
                    index,
                    to_the_right_of_wildcard,
                ),
                element.clone(),
                element.get_span().clone(),
            ))),
        }
    }

    fn generate_array_subscript_expression(
        &self,
        subject: &Expression,
        index: usize,
        to_the_right_of_wildcard: bool,
    ) -> Expression {
        let element = &self.array.elements[index];
        let span = element.get_span().clone();
        let index_expression = if to_the_right_of_wildcard {
            let reverse_index = (self.array.elements.len() - index) as i64;
            Expression::Binary(BinaryExpression::new(
                Operator::Subtraction,
                Expression::NamedEntity(NamedEntityExpression::new(
                    symbols::MATCH_SUBJECT_LENGTH_NAME,
                    span.clone(),
                )),
                Expression::IntegerLiteral(IntegerLiteralExpression {
                    value: reverse_index,
                    span: span.clone(),
                }),
                span.clone(),
            ))
        } else {
            Expression::IntegerLiteral(IntegerLiteralExpression {
                value: index as i64,
                span: span.clone(),
            })
        };
        Expression::ArraySubscript(ArraySubscriptExpression {
            array: Box::new(subject.clone()),
            index: Box::new(index_expression),
            span,
        })
    }

    fn generate_length_comparison_expression(&self) -> Result<Expression, Error> {
        let mut number_of_elements: i64 = 0;
        let mut wildcard_present = false;

        for element in &self.array.elements {
            if element.is_wildcard() {
                if wildcard_present {
                    return Err(Error::new(
                        ErrorImpl::DuplicateWildcard,
                        element.get_span().start.clone(),
                    ));
                }
                wildcard_present = true;
            } else {
                number_of_elements += 1;
            }
        }

        let operator = if wildcard_present {
            Operator::GreaterOrEqual
        } else {
            Operator::Equal
        };

        let span = self.array.span.clone();
        Ok(Expression::Binary(BinaryExpression::new(
            operator,
            Expression::NamedEntity(NamedEntityExpression::new(
                symbols::MATCH_SUBJECT_LENGTH_NAME,
                span.clone(),
            )),
            Expression::IntegerLiteral(IntegerLiteralExpression {
                value: number_of_elements,
                span: span.clone(),
            }),
            span,
        )))
    }
}

impl ClassDecompositionPattern {
    fn is_match_exhaustive(
        &mut self,
        subject: &Expression,
        coverage: &mut MatchCoverage,
        is_match_guard_present: bool,
        context: &Context,
    ) -> Result<bool, Error> {
        let class_pattern_type =
            type_check_class_decomposition(&mut self.class_decomposition, context)?;

        if let Some(enum_variant_name) = self.class_decomposition.get_enum_variant_name() {
            let enum_variant_name = String::from(enum_variant_name);
            return self.is_enum_match_exhaustive(
                &enum_variant_name,
                subject,
                coverage,
                is_match_guard_present,
                &class_pattern_type,
                context,
            );
        }

        let subject_type = get_subject_type(subject)?;
        if !Type::are_equal_no_const_check(&subject_type, &class_pattern_type, false) {
            return Ok(false);
        }

        Ok(!is_match_guard_present && self.are_all_member_patterns_irrefutable(context))
    }

    fn is_enum_match_exhaustive(
        &self,
        enum_variant_name: &str,
        subject: &Expression,
        coverage: &mut MatchCoverage,
        is_match_guard_present: bool,
        pattern_type: &Type,
        context: &Context,
    ) -> Result<bool, Error> {
        let subject_type = get_subject_type(subject)?;
        if !Type::are_equal_no_const_check(&subject_type, pattern_type, false) {
            return Err(Error::new(
                ErrorImpl::EnumPatternTypeMismatch {
                    pattern_type: pattern_type.to_string(),
                    subject_type: subject_type.to_string(),
                },
                self.class_decomposition.span.start.clone(),
            ));
        }

        if coverage.is_case_covered(enum_variant_name) {
            return Err(Error::new(
                ErrorImpl::UnreachablePattern,
                self.class_decomposition.span.start.clone(),
            ));
        }
        if !is_match_guard_present && self.are_all_member_patterns_irrefutable(context) {
            coverage.mark_case_as_covered(enum_variant_name);
            if coverage.are_all_cases_covered() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn are_all_member_patterns_irrefutable(&self, context: &Context) -> bool {
        self.class_decomposition
            .get_members()
            .iter()
            .all(|member| member_pattern_is_irrefutable(member.pattern_expr.as_ref(), context))
    }

    fn generate_comparison_expression(
        &mut self,
        subject: &Expression,
        context: &Context,
        declarations: &mut Vec<VariableDeclarationStatement>,
        temporaries: &mut Vec<VariableDeclarationStatement>,
    ) -> Result<Option<Expression>, Error> {
        if self.class_decomposition.get_type().get_definition().is_none() {
            type_check_class_decomposition(&mut self.class_decomposition, context)?;
        }

        let (mut comparison, effective_subject) =
            self.generate_type_comparison_expression(subject, temporaries)?;

        let members = self.class_decomposition.get_members().to_vec();
        for member in &members {
            if member_pattern_is_irrefutable(member.pattern_expr.as_ref(), context) {
                generate_variable_created_by_member_pattern(
                    member,
                    &effective_subject,
                    context,
                    declarations,
                );
            } else if let Some(member_comparison) = generate_member_comparison_expression(
                &effective_subject,
                member,
                context,
                declarations,
                temporaries,
            )? {
                let span = match &member.pattern_expr {
                    Some(pattern_expr) => pattern_expr.get_span().clone(),
                    None => member.name_expr.get_span().clone(),
                };
                comparison = Some(match comparison {
                    None => member_comparison,
                    Some(existing) => Expression::Binary(BinaryExpression::new(
                        Operator::LogicalAnd,
                        existing,
                        member_comparison,
                        span,
                    )),
                });
            }
        }
        Ok(comparison)
    }

    /// The type discrimination test, and the subject the member
    /// comparisons should run against. Casting introduces a temporary
    /// that replaces the subject for the rest of the pattern.
    fn generate_type_comparison_expression(
        &self,
        subject: &Expression,
        temporaries: &mut Vec<VariableDeclarationStatement>,
    ) -> Result<(Option<Expression>, Expression), Error> {
        if let Some(enum_variant_name) = self.class_decomposition.get_enum_variant_name() {
            let comparison =
                self.generate_enum_variant_tag_comparison_expression(subject, enum_variant_name)?;
            return Ok((Some(comparison), subject.clone()));
        }

        let class_decomposition_type = self.class_decomposition.get_type().clone();
        let subject_type = get_subject_type(subject)?;
        if Type::are_equal_no_const_check(&subject_type, &class_decomposition_type, false) {
            // No need to generate a type comparison. The pattern type and
            // subject type are equal.
            return Ok((None, subject.clone()));
        }

        let span = self.class_decomposition.span.clone();
        let casted_subject_name = format!(
            "__{}_{}",
            class_decomposition_type.get_name(),
            subject.generate_variable_name()
        );
        let mut casted_subject_type = class_decomposition_type;
        casted_subject_type.set_constant(false);
        debug!(name = %casted_subject_name, "introducing cast temporary for pattern subject");
        temporaries.push(VariableDeclarationStatement::new(
            casted_subject_type.clone(),
            &casted_subject_name,
            None,
            span.clone(),
        ));

        let type_cast = Expression::TypeCast(TypeCastExpression {
            target_type: casted_subject_type.clone(),
            operand: Box::new(subject.clone()),
            span: span.clone(),
        });
        let casted_subject = Expression::LocalVariable(LocalVariableExpression::new(
            casted_subject_type,
            &casted_subject_name,
            span.clone(),
        ));
        let comparison = Expression::Binary(BinaryExpression::new(
            Operator::NotEqual,
            Expression::Binary(BinaryExpression::new(
                Operator::Assignment,
                casted_subject.clone(),
                type_cast,
                span.clone(),
            )),
            Expression::Null(NullExpression { span: span.clone() }),
            span,
        ));
        Ok((Some(comparison), casted_subject))
    }

    fn generate_enum_variant_tag_comparison_expression(
        &self,
        subject: &Expression,
        enum_variant_name: &str,
    ) -> Result<Expression, Error> {
        let span = self.class_decomposition.span.clone();
        let enum_name = get_subject_type(subject)?.get_full_constructed_name();

        let tag_member = Expression::MemberSelector(MemberSelectorExpression::new(
            subject.clone(),
            Expression::NamedEntity(NamedEntityExpression::new(
                symbols::ENUM_TAG_VARIABLE_NAME,
                span.clone(),
            )),
            span.clone(),
        ));
        let tag_constant = Expression::MemberSelector(MemberSelectorExpression::new(
            Expression::NamedEntity(NamedEntityExpression::new(&enum_name, span.clone())),
            Expression::NamedEntity(NamedEntityExpression::new(
                &symbols::make_enum_variant_tag_name(enum_variant_name),
                span.clone(),
            )),
            span.clone(),
        ));
        Ok(Expression::Binary(BinaryExpression::new(
            Operator::Equal,
            tag_member,
            tag_constant,
            span,
        )))
    }
}

fn generate_variable_created_by_member_pattern(
    member: &ClassDecompositionMember,
    subject: &Expression,
    context: &Context,
    declarations: &mut Vec<VariableDeclarationStatement>,
) {
    let pattern_var = match &member.pattern_expr {
        None => match &member.name_expr {
            Expression::NamedEntity(named_entity) => Some(named_entity),
            _ => None,
        },
        Some(Expression::NamedEntity(named_entity)) => {
            if pattern_expression_creates_variable(named_entity, context) {
                Some(named_entity)
            } else {
                None
            }
        }
        Some(_) => None,
    };

    if let Some(pattern_var) = pattern_var {
        let match_subject_member_expression =
            generate_match_subject_member_selector(subject, &member.name_expr);
        declarations.push(VariableDeclarationStatement::new(
            Type::create(BuiltInType::Implicit),
            pattern_var.get_identifier(),
            Some(match_subject_member_expression),
            pattern_var.span.clone(),
        ));
    }
}

fn generate_member_comparison_expression(
    subject: &Expression,
    member: &ClassDecompositionMember,
    context: &Context,
    declarations: &mut Vec<VariableDeclarationStatement>,
    temporaries: &mut Vec<VariableDeclarationStatement>,
) -> Result<Option<Expression>, Error> {
    let pattern_expr = match &member.pattern_expr {
        Some(pattern_expr) => pattern_expr,
        None => return Ok(None),
    };
    let mut subject_member_selector =
        generate_match_subject_member_selector(subject, &member.name_expr);

    if let Expression::ClassDecomposition(class_decomposition_expr) = pattern_expr {
        let mut class_decomposition_pattern = ClassDecompositionPattern {
            class_decomposition: class_decomposition_expr.clone(),
        };

        // The type of the subject member expression needs to be known
        // before the nested comparison can be generated.
        let tmp_context = context.make_temporary_context();
        type_check_expression(&mut subject_member_selector, &tmp_context)?;

        class_decomposition_pattern.generate_comparison_expression(
            &subject_member_selector,
            context,
            declarations,
            temporaries,
        )
    } else {
        Ok(Some(Expression::Binary(BinaryExpression::new(
            Operator::Equal,
            subject_member_selector,
            pattern_expr.clone(),
            pattern_expr.get_span().clone(),
        ))))
    }
}

impl TypedPattern {
    fn is_match_exhaustive(
        &mut self,
        subject: &Expression,
        is_match_guard_present: bool,
        context: &Context,
    ) -> Result<bool, Error> {
        let target_type = resolve_typed_expression(&mut self.typed_expression, context)?;
        let subject_type = get_subject_type(subject)?;
        Ok(Type::are_equal_no_const_check(&subject_type, &target_type, false)
            && !is_match_guard_present)
    }

    fn generate_comparison_expression(
        &mut self,
        subject: &Expression,
        context: &Context,
        declarations: &mut Vec<VariableDeclarationStatement>,
        temporaries: &mut Vec<VariableDeclarationStatement>,
    ) -> Result<Expression, Error> {
        let target_type = resolve_typed_expression(&mut self.typed_expression, context)?;
        let span = self.typed_expression.span.clone();

        let casted_subject_name = format!(
            "__{}_{}",
            target_type.get_name(),
            subject.generate_variable_name()
        );
        let mut casted_subject_type = target_type;
        casted_subject_type.set_constant(false);
        debug!(name = %casted_subject_name, "introducing cast temporary for typed pattern");
        temporaries.push(VariableDeclarationStatement::new(
            casted_subject_type.clone(),
            &casted_subject_name,
            None,
            span.clone(),
        ));

        let type_cast = Expression::TypeCast(TypeCastExpression {
            target_type: casted_subject_type.clone(),
            operand: Box::new(subject.clone()),
            span: span.clone(),
        });
        let casted_subject = Expression::LocalVariable(LocalVariableExpression::new(
            casted_subject_type,
            &casted_subject_name,
            span.clone(),
        ));

        if let Some(Expression::NamedEntity(result_name)) =
            self.typed_expression.get_result_name()
        {
            declarations.push(VariableDeclarationStatement::new(
                Type::create(BuiltInType::Implicit),
                result_name.get_identifier(),
                Some(casted_subject.clone()),
                result_name.span.clone(),
            ));
        }

        Ok(Expression::Binary(BinaryExpression::new(
            Operator::NotEqual,
            Expression::Binary(BinaryExpression::new(
                Operator::Assignment,
                casted_subject,
                type_cast,
                span.clone(),
            )),
            Expression::Null(NullExpression { span: span.clone() }),
            span,
        )))
    }
}
