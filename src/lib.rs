use std::rc::Rc;

pub mod ast;
pub mod errors;
pub mod semantic;

#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null()
        }
    }
}
