//! Unit tests for semantic analysis.
//!
//! This module contains tests for name binding scopes, match coverage
//! and pattern classification and lowering.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::definitions::{
    ClassDefinition, ClassMember, DataMemberDefinition, Definition, MethodDefinition,
    VariableDeclaration,
};
use crate::ast::expressions::{
    Expression, IntegerLiteralExpression, LocalVariableExpression, NamedEntityExpression,
    Operator, PlaceholderExpression, WildcardExpression,
};
use crate::ast::statements::{BlockStatement, Statement, VariableDeclarationStatement};
use crate::ast::types::{BuiltInType, Type};
use crate::semantic::bindings::{Binding, NameBindings};
use crate::semantic::context::Context;
use crate::semantic::coverage::MatchCoverage;
use crate::semantic::pattern::Pattern;
use crate::semantic::symbols;
use crate::Span;

fn span() -> Span {
    Span::null()
}

fn root_context() -> Context {
    Context::new(Rc::new(RefCell::new(NameBindings::new())))
}

fn named(name: &str) -> Expression {
    Expression::NamedEntity(NamedEntityExpression::new(name, span()))
}

fn int_literal(value: i64) -> Expression {
    Expression::IntegerLiteral(IntegerLiteralExpression {
        value,
        span: span(),
    })
}

fn local_var(name: &str, type_: Type) -> Expression {
    Expression::LocalVariable(LocalVariableExpression::new(type_, name, span()))
}

fn var_decl(name: &str, type_: Type) -> Rc<RefCell<VariableDeclaration>> {
    Rc::new(RefCell::new(VariableDeclaration::new(
        type_,
        String::from(name),
    )))
}

fn class_def(name: &str) -> Rc<RefCell<ClassDefinition>> {
    Rc::new(RefCell::new(ClassDefinition::new(String::from(name))))
}

fn class_type(class: &Rc<RefCell<ClassDefinition>>) -> Type {
    let mut type_ = Type::create_named(class.borrow().get_name());
    type_.set_definition(Definition::from_class(class));
    type_
}

fn method(name: &str) -> Rc<MethodDefinition> {
    Rc::new(MethodDefinition::new(String::from(name), Vec::new()))
}

/// Builds `enum <name> { <variant>(payload...) }` the way class analysis
/// registers enumerations: a constructor method on the enumeration class
/// and a nested payload class per variant.
fn enum_with_variant(
    enum_name: &str,
    variant_name: &str,
    payload: &[(&str, Type)],
) -> (Rc<RefCell<ClassDefinition>>, Rc<MethodDefinition>) {
    let enum_def = class_def(enum_name);
    enum_def.borrow_mut().set_enumeration(true);

    let constructor_args = payload
        .iter()
        .map(|(name, type_)| VariableDeclaration::new(type_.clone(), String::from(*name)))
        .collect();
    let constructor = Rc::new(MethodDefinition::new_enum_constructor(
        String::from(variant_name),
        constructor_args,
    ));
    constructor.set_class(&enum_def);
    enum_def
        .borrow_mut()
        .add_member(ClassMember::Method(constructor.clone()));

    let variant_class = class_def(&symbols::make_enum_variant_class_name(variant_name));
    variant_class.borrow_mut().set_enumeration_variant(true);
    for (name, type_) in payload {
        variant_class
            .borrow_mut()
            .add_primary_ctor_arg_data_member(Rc::new(RefCell::new(DataMemberDefinition::new(
                String::from(*name),
                type_.clone(),
            ))));
    }
    enum_def
        .borrow_mut()
        .add_member(ClassMember::NestedClass(variant_class));

    (enum_def, constructor)
}

// Name binding tests

#[test]
fn test_insert_local_object_twice_fails() {
    let mut bindings = NameBindings::new();
    let first = var_decl("x", Type::create(BuiltInType::Integer));
    let second = var_decl("x", Type::create(BuiltInType::String));

    assert!(bindings.insert_local_object(first));
    assert!(!bindings.insert_local_object(second));
}

#[test]
fn test_lookup_walks_enclosing_scopes() {
    let outer = Rc::new(RefCell::new(NameBindings::new()));
    outer
        .borrow_mut()
        .insert_local_object(var_decl("x", Type::create(BuiltInType::Integer)));
    let inner = NameBindings::with_enclosing(outer);

    assert!(matches!(inner.lookup("x"), Some(Binding::LocalObject(_))));
    assert!(inner.lookup_local("x").is_none());
    assert!(inner.lookup("y").is_none());
}

#[test]
fn test_lookup_type_skips_non_type_bindings() {
    let outer = Rc::new(RefCell::new(NameBindings::new()));
    outer.borrow_mut().insert_class("Shape", class_def("Shape"));

    let mut inner = NameBindings::with_enclosing(outer);
    // A local named like the class does not shadow the type.
    inner.insert_local_object(var_decl("Shape", Type::create(BuiltInType::Integer)));

    let definition = inner.lookup_type("Shape").unwrap();
    assert!(definition.is_class());
    assert!(inner.lookup_type("Color").is_none());
}

#[test]
fn test_insert_class_collision_fails() {
    let mut bindings = NameBindings::new();
    assert!(bindings.insert_class("Shape", class_def("Shape")));
    assert!(!bindings.insert_class("Shape", class_def("Shape")));
}

#[test]
fn test_overload_method_appends_in_order() {
    let mut bindings = NameBindings::new();
    assert!(bindings.insert_method("draw", method("draw")));
    assert!(bindings.overload_method("draw", method("draw")));

    match bindings.lookup_local("draw") {
        Some(Binding::Method(method_list)) => assert_eq!(method_list.len(), 2),
        _ => panic!("Expected method binding"),
    }
}

#[test]
fn test_overload_method_on_non_method_fails() {
    let mut bindings = NameBindings::new();
    bindings.insert_class("draw", class_def("draw"));

    assert!(!bindings.overload_method("draw", method("draw")));
    // The scope is unchanged.
    assert!(matches!(
        bindings.lookup_local("draw"),
        Some(Binding::Class(_))
    ));
}

#[test]
fn test_overload_method_without_existing_binding_inserts() {
    let mut bindings = NameBindings::new();
    assert!(bindings.overload_method("draw", method("draw")));
    assert!(matches!(
        bindings.lookup_local("draw"),
        Some(Binding::Method(_))
    ));
}

#[test]
fn test_update_method_name() {
    let mut bindings = NameBindings::new();
    bindings.insert_method("draw", method("draw"));

    assert!(bindings.update_method_name("draw", "render"));
    assert!(bindings.lookup_local("draw").is_none());
    assert!(matches!(
        bindings.lookup_local("render"),
        Some(Binding::Method(_))
    ));

    assert!(!bindings.update_method_name("missing", "other"));

    bindings.insert_class("Shape", class_def("Shape"));
    assert!(!bindings.update_method_name("Shape", "Circle"));
    assert!(!bindings.update_method_name("render", "Shape"));
}

#[test]
fn test_remove_last_overloaded_method_keeps_binding() {
    let mut bindings = NameBindings::new();
    bindings.insert_method("draw", method("draw"));

    assert!(bindings.remove_last_overloaded_method("draw"));
    // The binding stays in place even with an empty overload list.
    match bindings.lookup_local("draw") {
        Some(Binding::Method(method_list)) => assert!(method_list.is_empty()),
        _ => panic!("Expected method binding"),
    }

    assert!(!bindings.remove_last_overloaded_method("missing"));
}

#[test]
fn test_remove_data_member_requires_data_member_binding() {
    let mut bindings = NameBindings::new();
    bindings.insert_data_member(
        "radius",
        Rc::new(RefCell::new(DataMemberDefinition::new(
            String::from("radius"),
            Type::create(BuiltInType::Integer),
        ))),
    );
    bindings.insert_class("Shape", class_def("Shape"));

    assert!(bindings.remove_data_member("radius"));
    assert!(bindings.lookup_local("radius").is_none());
    assert!(!bindings.remove_data_member("Shape"));
    assert!(!bindings.remove_data_member("radius"));
}

#[test]
fn test_insert_label_fails_when_any_enclosing_scope_binds_name() {
    let outer = Rc::new(RefCell::new(NameBindings::new()));
    outer.borrow_mut().insert_class("exit", class_def("exit"));
    outer.borrow_mut().insert_label("retry");

    let mut inner = NameBindings::with_enclosing(outer);
    assert!(!inner.insert_label("exit"));
    assert!(!inner.insert_label("retry"));
    assert!(inner.insert_label("out"));
}

#[test]
fn test_remove_obsolete_local_bindings() {
    let mut bindings = NameBindings::new();
    let renamed = var_decl("x", Type::create(BuiltInType::Integer));
    let kept = var_decl("y", Type::create(BuiltInType::Integer));
    bindings.insert_local_object(renamed.clone());
    bindings.insert_local_object(kept);
    bindings.insert_class("Shape", class_def("Shape"));

    // The declaration was renamed to become unique; the binding keyed by
    // the old name is garbage.
    renamed.borrow_mut().set_identifier(String::from("x_1"));
    bindings.remove_obsolete_local_bindings();

    assert!(bindings.lookup_local("x").is_none());
    assert!(matches!(
        bindings.lookup_local("y"),
        Some(Binding::LocalObject(_))
    ));
    assert!(matches!(
        bindings.lookup_local("Shape"),
        Some(Binding::Class(_))
    ));
}

#[test]
fn test_copy_from_copies_every_binding() {
    let mut source = NameBindings::new();
    source.insert_class("Shape", class_def("Shape"));
    source.insert_local_object(var_decl("x", Type::create(BuiltInType::Integer)));
    source.insert_label("out");

    let mut target = NameBindings::new();
    target.copy_from(&source);

    assert!(matches!(target.lookup_local("Shape"), Some(Binding::Class(_))));
    assert!(matches!(
        target.lookup_local("x"),
        Some(Binding::LocalObject(_))
    ));
    assert!(matches!(target.lookup_local("out"), Some(Binding::Label)));
}

#[test]
fn test_use_namespace_imports_only_classes_methods_and_data_members() {
    let mut used = NameBindings::new();
    used.insert_class("Shape", class_def("Shape"));
    used.insert_method("draw", method("draw"));
    used.insert_data_member(
        "radius",
        Rc::new(RefCell::new(DataMemberDefinition::new(
            String::from("radius"),
            Type::create(BuiltInType::Integer),
        ))),
    );
    used.insert_local_object(var_decl("x", Type::create(BuiltInType::Integer)));
    used.insert_label("out");

    let mut target = NameBindings::new();
    target.use_namespace(&used);

    assert!(matches!(target.lookup_local("Shape"), Some(Binding::Class(_))));
    assert!(matches!(target.lookup_local("draw"), Some(Binding::Method(_))));
    assert!(matches!(
        target.lookup_local("radius"),
        Some(Binding::DataMember(_))
    ));
    assert!(target.lookup_local("x").is_none());
    assert!(target.lookup_local("out").is_none());
}

#[test]
fn test_block_statement_scopes_nest() {
    let mut outer = BlockStatement::new(None, span());
    assert!(outer.add_local_binding(var_decl("x", Type::create(BuiltInType::Integer))));

    let inner = BlockStatement::new(Some(&outer), span());
    assert!(matches!(
        inner.get_name_bindings().borrow().lookup("x"),
        Some(Binding::LocalObject(_))
    ));

    outer.add_statement(Statement::VariableDeclaration(
        VariableDeclarationStatement::new(Type::create(BuiltInType::Integer), "x", None, span()),
    ));
    outer.insert_statement_at_front(Statement::VariableDeclaration(
        VariableDeclarationStatement::new(
            Type::create(BuiltInType::Integer),
            symbols::MATCH_SUBJECT_LENGTH_NAME,
            None,
            span(),
        ),
    ));
    match &outer.get_statements()[0] {
        Statement::VariableDeclaration(declaration) => {
            assert_eq!(
                declaration.get_identifier(),
                symbols::MATCH_SUBJECT_LENGTH_NAME
            );
        }
        _ => panic!("Expected variable declaration"),
    }
}

#[test]
fn test_labels_bind_through_block_scopes() {
    let outer = BlockStatement::new(None, span());
    assert!(outer.get_name_bindings().borrow_mut().insert_label("retry"));

    let mut inner = BlockStatement::new(Some(&outer), span());
    inner.add_statement(Statement::Label(crate::ast::statements::LabelStatement {
        name: String::from("retry"),
        span: span(),
    }));
    // The label is visible across the whole enclosing tree, so the inner
    // scope rejects a redefinition.
    assert!(!inner.get_name_bindings().borrow_mut().insert_label("retry"));
}

#[test]
fn test_generated_temporaries_have_derived_names() {
    let temporary = VariableDeclarationStatement::generate_temporary(
        Type::create(BuiltInType::Integer),
        "retval",
        None,
        span(),
    );
    assert_eq!(
        temporary.get_identifier(),
        VariableDeclarationStatement::generate_temporary_name("retval")
    );
    assert!(temporary.get_init_expression().is_none());
}

// Match coverage tests

#[test]
fn test_boolean_coverage() {
    let mut coverage = MatchCoverage::new(&Type::create(BuiltInType::Boolean));
    assert!(!coverage.is_case_covered("true"));
    assert!(!coverage.is_case_covered("false"));
    assert!(!coverage.are_all_cases_covered());

    coverage.mark_case_as_covered("true");
    assert!(coverage.is_case_covered("true"));
    assert!(!coverage.are_all_cases_covered());

    coverage.mark_case_as_covered("false");
    assert!(coverage.are_all_cases_covered());
}

#[test]
fn test_enumeration_coverage_contains_variant_constructors() {
    let enum_def = class_def("Color");
    enum_def.borrow_mut().set_enumeration(true);
    for variant in ["Red", "Green"] {
        let constructor = Rc::new(MethodDefinition::new_enum_constructor(
            String::from(variant),
            Vec::new(),
        ));
        constructor.set_class(&enum_def);
        enum_def
            .borrow_mut()
            .add_member(ClassMember::Method(constructor));
    }

    let mut coverage = MatchCoverage::new(&class_type(&enum_def));
    assert!(!coverage.is_case_covered("Red"));
    assert!(!coverage.is_case_covered("Green"));

    coverage.mark_case_as_covered("Red");
    coverage.mark_case_as_covered("Green");
    assert!(coverage.are_all_cases_covered());
}

#[test]
fn test_other_subjects_get_the_all_sentinel() {
    let coverage = MatchCoverage::new(&Type::create(BuiltInType::Integer));
    assert!(!coverage.is_case_covered("all"));
    assert!(!coverage.are_all_cases_covered());
}

// Pattern tests

#[test]
fn test_placeholder_pattern_is_exhaustive_without_guard() {
    let context = root_context();
    let subject = local_var("n", Type::create(BuiltInType::Integer));
    let mut coverage = MatchCoverage::new(&Type::create(BuiltInType::Integer));

    let mut pattern = Pattern::create(
        Expression::Placeholder(PlaceholderExpression { span: span() }),
        &context,
    )
    .unwrap();
    assert!(pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());

    let mut guarded = Pattern::create(
        Expression::Placeholder(PlaceholderExpression { span: span() }),
        &context,
    )
    .unwrap();
    assert!(!guarded
        .is_match_exhaustive(&subject, &mut coverage, true, &context)
        .unwrap());
}

#[test]
fn test_simple_pattern_binding_name() {
    let context = root_context();
    let subject = local_var("n", Type::create(BuiltInType::Integer));
    let mut coverage = MatchCoverage::new(&Type::create(BuiltInType::Integer));

    let mut pattern = Pattern::create(named("x"), &context).unwrap();
    assert!(pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());

    let comparison = pattern
        .generate_comparison_expression(&subject, &context)
        .unwrap()
        .unwrap();
    match comparison {
        Expression::Binary(binary) => assert_eq!(binary.operator, Operator::Equal),
        _ => panic!("Expected a comparison"),
    }

    let declarations = pattern.get_declarations();
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].get_identifier(), "x");
    assert!(declarations[0].get_type().is_implicit());
    assert!(declarations[0].get_init_expression().is_some());
}

#[test]
fn test_simple_pattern_referencing_subject_is_irrefutable() {
    let context = root_context();
    let subject = local_var("n", Type::create(BuiltInType::Integer));
    let mut coverage = MatchCoverage::new(&Type::create(BuiltInType::Integer));

    let mut pattern = Pattern::create(named("n"), &context).unwrap();
    assert!(pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());
}

#[test]
fn test_simple_pattern_static_data_member_is_refutable() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    bindings.borrow_mut().insert_data_member(
        "ORIGIN",
        Rc::new(RefCell::new(DataMemberDefinition::new_static(
            String::from("ORIGIN"),
            Type::create(BuiltInType::Integer),
        ))),
    );
    let context = Context::new(bindings);
    let subject = local_var("n", Type::create(BuiltInType::Integer));
    let mut coverage = MatchCoverage::new(&Type::create(BuiltInType::Integer));

    let mut pattern = Pattern::create(named("ORIGIN"), &context).unwrap();
    assert!(!pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());

    pattern
        .generate_comparison_expression(&subject, &context)
        .unwrap();
    assert!(pattern.get_declarations().is_empty());
}

#[test]
fn test_array_pattern_exhaustive_only_for_single_wildcard() {
    let context = root_context();
    let mut int_array_type = Type::create(BuiltInType::Integer);
    int_array_type.set_array(true);
    let subject = local_var("xs", int_array_type.clone());
    let mut coverage = MatchCoverage::new(&int_array_type);

    let wildcard_only = Expression::ArrayLiteral(crate::ast::expressions::ArrayLiteralExpression {
        elements: vec![Expression::Wildcard(WildcardExpression { span: span() })],
        resolved_type: None,
        span: span(),
    });
    let mut pattern = Pattern::create(wildcard_only, &context).unwrap();
    assert!(pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());

    let with_element = Expression::ArrayLiteral(crate::ast::expressions::ArrayLiteralExpression {
        elements: vec![
            int_literal(1),
            Expression::Wildcard(WildcardExpression { span: span() }),
        ],
        resolved_type: None,
        span: span(),
    });
    let mut pattern = Pattern::create(with_element, &context).unwrap();
    assert!(!pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());
}

#[test]
fn test_array_pattern_length_comparison_without_wildcard() {
    let context = root_context();
    let mut int_array_type = Type::create(BuiltInType::Integer);
    int_array_type.set_array(true);
    let subject = local_var("xs", int_array_type);

    let array = Expression::ArrayLiteral(crate::ast::expressions::ArrayLiteralExpression {
        elements: vec![int_literal(1), int_literal(2)],
        resolved_type: None,
        span: span(),
    });
    let mut pattern = Pattern::create(array, &context).unwrap();
    let comparison = pattern
        .generate_comparison_expression(&subject, &context)
        .unwrap()
        .unwrap();

    // ((__match_subject_length == 2 && xs[0] == 1) && xs[1] == 2)
    let outer = match comparison {
        Expression::Binary(binary) => binary,
        _ => panic!("Expected a comparison"),
    };
    assert_eq!(outer.operator, Operator::LogicalAnd);
    let inner = match *outer.left {
        Expression::Binary(binary) => binary,
        _ => panic!("Expected a comparison"),
    };
    assert_eq!(inner.operator, Operator::LogicalAnd);
    let length_comparison = match *inner.left {
        Expression::Binary(binary) => binary,
        _ => panic!("Expected a comparison"),
    };
    assert_eq!(length_comparison.operator, Operator::Equal);
    match *length_comparison.left {
        Expression::NamedEntity(named_entity) => {
            assert_eq!(
                named_entity.get_identifier(),
                symbols::MATCH_SUBJECT_LENGTH_NAME
            );
        }
        _ => panic!("Expected the subject length variable"),
    }
    match *length_comparison.right {
        Expression::IntegerLiteral(literal) => assert_eq!(literal.value, 2),
        _ => panic!("Expected the element count"),
    }
}

#[test]
fn test_array_pattern_rejects_duplicate_wildcard() {
    let context = root_context();
    let mut int_array_type = Type::create(BuiltInType::Integer);
    int_array_type.set_array(true);
    let subject = local_var("xs", int_array_type);

    let array = Expression::ArrayLiteral(crate::ast::expressions::ArrayLiteralExpression {
        elements: vec![
            Expression::Wildcard(WildcardExpression { span: span() }),
            Expression::Wildcard(WildcardExpression { span: span() }),
        ],
        resolved_type: None,
        span: span(),
    });
    let mut pattern = Pattern::create(array, &context).unwrap();
    let error = pattern
        .generate_comparison_expression(&subject, &context)
        .unwrap_err();
    assert_eq!(error.get_error_name(), "DuplicateWildcard");
}

#[test]
fn test_typed_pattern_exhaustive_when_types_equal() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    let cat = class_def("Cat");
    bindings.borrow_mut().insert_class("Cat", cat.clone());
    let context = Context::new(bindings);

    let subject = local_var("c", class_type(&cat));
    let mut coverage = MatchCoverage::new(&class_type(&cat));

    let typed = Expression::Typed(crate::ast::expressions::TypedExpression {
        target_type: Type::create_named("Cat"),
        result_name: Some(Box::new(named("p"))),
        span: span(),
    });
    let mut pattern = Pattern::create(typed, &context).unwrap();
    assert!(pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());

    let typed = Expression::Typed(crate::ast::expressions::TypedExpression {
        target_type: Type::create_named("Cat"),
        result_name: None,
        span: span(),
    });
    let mut guarded = Pattern::create(typed, &context).unwrap();
    assert!(!guarded
        .is_match_exhaustive(&subject, &mut coverage, true, &context)
        .unwrap());
}

#[test]
fn test_constructor_call_pattern_equals_literal_decomposition() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    let point = class_def("Point");
    for field in ["x", "y"] {
        point
            .borrow_mut()
            .add_primary_ctor_arg_data_member(Rc::new(RefCell::new(DataMemberDefinition::new(
                String::from(field),
                Type::create(BuiltInType::Integer),
            ))));
    }
    bindings.borrow_mut().insert_class("Point", point.clone());
    let context = Context::new(bindings);

    let subject = local_var("p", class_type(&point));

    let constructor_call = Expression::MethodCall(
        crate::ast::expressions::MethodCallExpression::new(
            "Point",
            vec![int_literal(0), named("y")],
            span(),
        ),
    );
    let mut from_call = Pattern::create(constructor_call, &context).unwrap();

    let mut literal = crate::ast::expressions::ClassDecompositionExpression::new(
        Type::create_named("Point"),
        span(),
    );
    literal.add_member(named("x"), Some(int_literal(0)));
    literal.add_member(named("y"), Some(named("y")));
    let mut from_literal =
        Pattern::create(Expression::ClassDecomposition(literal), &context).unwrap();

    let call_comparison = from_call
        .generate_comparison_expression(&subject, &context)
        .unwrap();
    let literal_comparison = from_literal
        .generate_comparison_expression(&subject, &context)
        .unwrap();

    assert_eq!(
        format!("{:?}", call_comparison),
        format!("{:?}", literal_comparison)
    );
    assert_eq!(
        format!("{:?}", from_call.get_declarations()),
        format!("{:?}", from_literal.get_declarations())
    );
}

#[test]
fn test_constructor_pattern_arity_is_checked() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    let point = class_def("Point");
    for field in ["x", "y"] {
        point
            .borrow_mut()
            .add_primary_ctor_arg_data_member(Rc::new(RefCell::new(DataMemberDefinition::new(
                String::from(field),
                Type::create(BuiltInType::Integer),
            ))));
    }
    bindings.borrow_mut().insert_class("Point", point);
    let context = Context::new(bindings);

    let constructor_call = Expression::MethodCall(
        crate::ast::expressions::MethodCallExpression::new("Point", vec![int_literal(0)], span()),
    );
    let error = Pattern::create(constructor_call, &context).unwrap_err();
    assert_eq!(error.get_error_name(), "ConstructorPatternArity");
}

#[test]
fn test_enum_constructor_pattern_arity_is_checked() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    let (enum_def, constructor) =
        enum_with_variant("E", "V", &[("x", Type::create(BuiltInType::Integer))]);
    bindings.borrow_mut().insert_class("E", enum_def);
    bindings.borrow_mut().insert_method("V", constructor);
    let context = Context::new(bindings);

    let constructor_call = Expression::MethodCall(
        crate::ast::expressions::MethodCallExpression::new("V", Vec::new(), span()),
    );
    let error = Pattern::create(constructor_call, &context).unwrap_err();
    assert_eq!(error.get_error_name(), "EnumConstructorPatternArity");
}

#[test]
fn test_enum_pattern_type_must_match_subject() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    let (enum_e, constructor) = enum_with_variant("E", "V", &[]);
    let (enum_f, _) = enum_with_variant("F", "W", &[]);
    bindings.borrow_mut().insert_class("E", enum_e);
    bindings.borrow_mut().insert_class("F", enum_f.clone());
    bindings.borrow_mut().insert_method("V", constructor);
    let context = Context::new(bindings);

    let subject = local_var("f", class_type(&enum_f));
    let mut coverage = MatchCoverage::new(&class_type(&enum_f));

    let mut pattern = Pattern::create(
        Expression::MethodCall(crate::ast::expressions::MethodCallExpression::new(
            "V",
            Vec::new(),
            span(),
        )),
        &context,
    )
    .unwrap();
    let error = pattern
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap_err();
    assert_eq!(error.get_error_name(), "EnumPatternTypeMismatch");
    let message = error.get_error().to_string();
    assert!(message.contains("Pattern type: E"));
    assert!(message.contains("Match subject type: F"));
}

#[test]
fn test_covered_enum_variant_is_unreachable() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    let (enum_def, constructor) = enum_with_variant("E", "V", &[]);
    bindings.borrow_mut().insert_class("E", enum_def.clone());
    bindings.borrow_mut().insert_method("V", constructor);
    let context = Context::new(bindings);

    let subject = local_var("e", class_type(&enum_def));
    let mut coverage = MatchCoverage::new(&class_type(&enum_def));

    let mut first = Pattern::create(
        Expression::MethodCall(crate::ast::expressions::MethodCallExpression::new(
            "V",
            Vec::new(),
            span(),
        )),
        &context,
    )
    .unwrap();
    // The only variant is covered, so the match is exhaustive.
    assert!(first
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap());

    let mut second = Pattern::create(
        Expression::MethodCall(crate::ast::expressions::MethodCallExpression::new(
            "V",
            Vec::new(),
            span(),
        )),
        &context,
    )
    .unwrap();
    let error = second
        .is_match_exhaustive(&subject, &mut coverage, false, &context)
        .unwrap_err();
    assert_eq!(error.get_error_name(), "UnreachablePattern");
}

#[test]
fn test_guard_suppresses_coverage_marking() {
    let bindings = Rc::new(RefCell::new(NameBindings::new()));
    let (enum_def, constructor) = enum_with_variant("E", "V", &[]);
    bindings.borrow_mut().insert_class("E", enum_def.clone());
    bindings.borrow_mut().insert_method("V", constructor);
    let context = Context::new(bindings);

    let subject = local_var("e", class_type(&enum_def));
    let mut coverage = MatchCoverage::new(&class_type(&enum_def));

    let mut guarded = Pattern::create(
        Expression::MethodCall(crate::ast::expressions::MethodCallExpression::new(
            "V",
            Vec::new(),
            span(),
        )),
        &context,
    )
    .unwrap();
    assert!(!guarded
        .is_match_exhaustive(&subject, &mut coverage, true, &context)
        .unwrap());
    assert!(!coverage.is_case_covered("V"));
}
