#[derive(Debug)]
pub enum Value {
    Symbol(String),
    /// The interior of a string literal, escapes left as written.
    String(String),
    Char(String),
    Radix(Radix, String),
    Literal(proc_macro2::Literal),
    Negated(proc_macro2::Literal),
    Unquoted(proc_macro2::TokenTree),
    List(Vec<Value>),
    Vector(Vec<Value>),
    Complex(Vec<Value>),
}

#[derive(Debug, Clone, Copy)]
pub enum Radix {
    Binary,
    Octal,
    Hex,
}
