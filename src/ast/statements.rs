//! Statement tree definitions.
//!
//! Pattern lowering produces variable declaration statements: bindings
//! injected at the head of a case body and uninitialized temporaries
//! pre-declared before the comparison runs. Blocks own the name bindings
//! of their scope and offer the insertion points the lowering splices
//! declarations into.

use std::cell::RefCell;
use std::rc::Rc;

use crate::semantic::bindings::NameBindings;
use crate::Span;

use super::definitions::VariableDeclaration;
use super::expressions::Expression;
use super::types::Type;

/// A statement node.
#[derive(Debug)]
pub enum Statement {
    VariableDeclaration(VariableDeclarationStatement),
    Block(BlockStatement),
    Expression(ExpressionStatement),
    Label(LabelStatement),
}

/// Variable Declaration Statement
/// Declares a variable with an implicit or explicit type and an optional
/// initializer. Temporaries generated for downcasts are declared without
/// an initializer.
#[derive(Debug, Clone)]
pub struct VariableDeclarationStatement {
    declaration: Rc<RefCell<VariableDeclaration>>,
    init_expression: Option<Expression>,
    span: Span,
}

impl VariableDeclarationStatement {
    pub fn new(
        type_: Type,
        identifier: &str,
        init_expression: Option<Expression>,
        span: Span,
    ) -> Self {
        VariableDeclarationStatement {
            declaration: Rc::new(RefCell::new(VariableDeclaration::new(
                type_,
                String::from(identifier),
            ))),
            init_expression,
            span,
        }
    }

    pub fn get_type(&self) -> Type {
        self.declaration.borrow().get_type().clone()
    }

    pub fn get_identifier(&self) -> String {
        String::from(self.declaration.borrow().get_identifier())
    }

    pub fn get_declaration(&self) -> &Rc<RefCell<VariableDeclaration>> {
        &self.declaration
    }

    pub fn get_init_expression(&self) -> Option<&Expression> {
        self.init_expression.as_ref()
    }

    pub fn set_init_expression(&mut self, init_expression: Expression) {
        self.init_expression = Some(init_expression);
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// The deterministic name of a generated temporary derived from an
    /// existing identifier.
    pub fn generate_temporary_name(name: &str) -> String {
        format!("__{}_tmp", name)
    }

    /// Creates a temporary declaration with a name derived from the given
    /// identifier.
    pub fn generate_temporary(
        type_: Type,
        name: &str,
        init_expression: Option<Expression>,
        span: Span,
    ) -> Self {
        VariableDeclarationStatement::new(
            type_,
            &VariableDeclarationStatement::generate_temporary_name(name),
            init_expression,
            span,
        )
    }
}

/// Block Statement
/// A sequence of statements with its own binding scope. Lowered match
/// cases receive pattern declarations at the front of their body.
#[derive(Debug)]
pub struct BlockStatement {
    name_bindings: Rc<RefCell<NameBindings>>,
    statements: Vec<Statement>,
    span: Span,
}

impl BlockStatement {
    pub fn new(enclosing: Option<&BlockStatement>, span: Span) -> Self {
        let name_bindings = match enclosing {
            Some(enclosing_block) => {
                NameBindings::with_enclosing(enclosing_block.name_bindings.clone())
            }
            None => NameBindings::new(),
        };
        BlockStatement {
            name_bindings: Rc::new(RefCell::new(name_bindings)),
            statements: Vec::new(),
            span,
        }
    }

    pub fn get_name_bindings(&self) -> &Rc<RefCell<NameBindings>> {
        &self.name_bindings
    }

    pub fn get_statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn insert_statement_at_front(&mut self, statement: Statement) {
        self.statements.insert(0, statement);
    }

    /// Registers a local variable declaration in this block's scope.
    /// Returns false when the identifier is already bound locally.
    pub fn add_local_binding(&mut self, local_object: Rc<RefCell<VariableDeclaration>>) -> bool {
        self.name_bindings
            .borrow_mut()
            .insert_local_object(local_object)
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Expression Statement
#[derive(Debug)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

/// Label Statement
/// A named jump target. Label names are visible across the whole
/// enclosing scope tree.
#[derive(Debug)]
pub struct LabelStatement {
    pub name: String,
    pub span: Span,
}
