use fxhash::FxHashMap;
use once_cell::sync::Lazy;

/// Lexical atom of a Mython source text. Two tokens are equal iff
/// their variants match and, for the value-bearing variants, their
/// payloads match.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(i64),
    Id(String),
    String(String),
    Char(u8),
    // Reserved words.
    Class,
    Return,
    If,
    Else,
    Def,
    Print,
    And,
    Or,
    Not,
    None,
    True,
    False,
    // Structural tokens synthesized by the lexer.
    Newline,
    Indent,
    Dedent,
    Eof,
    // Two-character comparison operators.
    Eq,
    NotEq,
    LessOrEq,
    GreaterOrEq,
}

static RESERVED: Lazy<FxHashMap<&'static str, Token>> = Lazy::new(|| {
    let mut reserved = FxHashMap::default();
    macro_rules! reg_reserved {
        ( $($id:expr => $variant:expr),+ ) => {
            $(
                reserved.insert($id, $variant);
            )+
        };
    }
    reg_reserved! {
        "and" => Token::And,
        "class" => Token::Class,
        "def" => Token::Def,
        "else" => Token::Else,
        "if" => Token::If,
        "not" => Token::Not,
        "or" => Token::Or,
        "print" => Token::Print,
        "return" => Token::Return,
        "False" => Token::False,
        "None" => Token::None,
        "True" => Token::True
    };
    reserved
});

/// Look `word` up in the reserved-word table.
pub fn check_reserved(word: &str) -> Option<Token> {
    RESERVED.get(word).cloned()
}

impl Token {
    /// Examine the token, and return true if it is EOF.
    pub fn is_eof(&self) -> bool {
        *self == Token::Eof
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(num) => write!(f, "Number{{{}}}", num),
            Token::Id(id) => write!(f, "Id{{{}}}", id),
            Token::String(s) => write!(f, "String{{{}}}", s),
            Token::Char(c) => write!(f, "Char{{{}}}", *c as char),
            Token::Class => write!(f, "Class"),
            Token::Return => write!(f, "Return"),
            Token::If => write!(f, "If"),
            Token::Else => write!(f, "Else"),
            Token::Def => write!(f, "Def"),
            Token::Print => write!(f, "Print"),
            Token::And => write!(f, "And"),
            Token::Or => write!(f, "Or"),
            Token::Not => write!(f, "Not"),
            Token::None => write!(f, "None"),
            Token::True => write!(f, "True"),
            Token::False => write!(f, "False"),
            Token::Newline => write!(f, "Newline"),
            Token::Indent => write!(f, "Indent"),
            Token::Dedent => write!(f, "Dedent"),
            Token::Eof => write!(f, "Eof"),
            Token::Eq => write!(f, "Eq"),
            Token::NotEq => write!(f, "NotEq"),
            Token::LessOrEq => write!(f, "LessOrEq"),
            Token::GreaterOrEq => write!(f, "GreaterOrEq"),
        }
    }
}
