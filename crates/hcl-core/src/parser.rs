//! Parser: token stream to a [`Value`] tree.
//!
//! HCL's block syntax makes statements ambiguous until late: a statement is
//! one or more keys (idents or strings) followed either by `= value` —
//! where exactly one key is allowed — or by a `{ … }` block, where any
//! number of keys nests. Parsed statements are installed into the
//! accumulating object through [`Value::merge_objects`], which is what
//! folds repeated statements at the same key into lists.
//!
//! The parser holds one token of lookahead and a first-wins error slot:
//! once an error is recorded, later reports are discarded so a single
//! failure does not cascade into noise. The public result is
//! `Result<Value, Error>` — `Ok` is always an object.

use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::token::Token;
use crate::value::{Object, Value};

/// Recursive-descent parser over a [`Lexer`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    error: Option<(usize, String)>,
}

impl<'a> Parser<'a> {
    /// Create a parser and prime the one-token lookahead.
    pub fn new(input: &'a str) -> Parser<'a> {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token();
        Parser {
            lexer,
            token,
            error: None,
        }
    }

    /// Parse the whole input into an object value.
    pub fn parse(&mut self) -> Result<Value> {
        let value = self.parse_object_list(false);
        match self.error.take() {
            Some((line, message)) => Err(Error::Syntax { line, message }),
            None => Ok(value),
        }
    }

    fn next_token(&mut self) {
        self.token = self.lexer.next_token();
    }

    /// Record an error. The first one wins; later reports are dropped.
    fn add_error(&mut self, reason: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some((self.lexer.line(), reason.into()));
        }
    }

    fn parse_object_list(&mut self, nested: bool) -> Value {
        let mut node = Value::Object(Object::new());

        loop {
            if matches!(self.token, Token::Eof) {
                break;
            }
            if nested && matches!(self.token, Token::RBrace) {
                break;
            }

            let mut keys = Vec::new();
            if !self.parse_keys(&mut keys) {
                node = Value::Null;
                break;
            }

            let mut value = Value::Null;
            if !self.parse_object_item(&mut value) {
                node = Value::Null;
                break;
            }

            self.next_token();

            // Object lists may be comma-delimited, e.g. when a list of maps
            // is being expressed, so a comma here is simply consumed.
            if matches!(self.token, Token::Comma) {
                self.next_token();
            }

            node.merge_objects(&keys, value);
        }

        node
    }

    /// Collect the key sequence that opens a statement.
    fn parse_keys(&mut self, keys: &mut Vec<String>) -> bool {
        keys.clear();

        loop {
            let token = self.token.clone();
            match token {
                Token::Eof => {
                    self.add_error("end of file reached");
                    return false;
                }
                Token::Assign => {
                    if keys.len() > 1 {
                        let msg = format!("nested object expected: LBRACE got: {}", token.text());
                        self.add_error(msg);
                        return false;
                    }
                    if keys.is_empty() {
                        self.add_error("expected to find at least one object key");
                        return false;
                    }
                    return true;
                }
                Token::LBrace => {
                    if keys.is_empty() {
                        self.add_error("expected IDENT | STRING got: LBRACE");
                        return false;
                    }
                    return true;
                }
                Token::Ident(key) | Token::Str(key) => {
                    keys.push(key);
                    self.next_token();
                }
                Token::Illegal(reason) => {
                    self.add_error(reason);
                    return false;
                }
                other => {
                    let msg = format!(
                        "expected IDENT | STRING | ASSIGN | LBRACE got: {}",
                        other.text()
                    );
                    self.add_error(msg);
                    return false;
                }
            }
        }
    }

    fn parse_object_item(&mut self, value: &mut Value) -> bool {
        if matches!(self.token, Token::Assign) {
            return self.parse_object(value);
        }
        if matches!(self.token, Token::LBrace) {
            return self.parse_object_type(value);
        }
        self.add_error("Expected start of object ('{') or assignment ('=')");
        false
    }

    /// Right-hand side of an assignment.
    fn parse_object(&mut self, value: &mut Value) -> bool {
        self.next_token();

        if matches!(
            self.token,
            Token::Number(_)
                | Token::Float(_)
                | Token::Bool(_)
                | Token::Str(_)
                | Token::Heredoc(_)
                | Token::Ident(_)
                | Token::Illegal(_)
        ) {
            return self.parse_literal_type(value);
        }
        if matches!(self.token, Token::LBrace) {
            return self.parse_object_type(value);
        }
        if matches!(self.token, Token::LBrack) {
            return self.parse_list_type(value);
        }
        if matches!(self.token, Token::Eof) {
            self.add_error("Reached end of file");
            return false;
        }

        let msg = format!("Unknown token: {}", self.token.text());
        self.add_error(msg);
        false
    }

    /// A `{ … }` block: a nested object list up to the matching brace.
    fn parse_object_type(&mut self, value: &mut Value) -> bool {
        if !matches!(self.token, Token::LBrace) {
            self.add_error("object list did not start with LBRACE");
            return false;
        }
        self.next_token();

        let result = self.parse_object_list(true);

        if self.error.is_some() && !matches!(self.token, Token::RBrace) {
            // The nested list already recorded the failure.
            return false;
        }

        if !matches!(self.token, Token::RBrace) {
            let msg = format!("object expected closing RBRACE got: {}", self.token.text());
            self.add_error(msg);
            return false;
        }

        *value = result;
        true
    }

    /// A `[ … ]` list of comma-separated values. Trailing and repeated
    /// commas are tolerated; two adjacent values are not.
    fn parse_list_type(&mut self, value: &mut Value) -> bool {
        let mut items = Vec::new();
        let mut need_comma = false;

        loop {
            self.next_token();

            if need_comma && !matches!(self.token, Token::Comma | Token::RBrack) {
                let msg = format!(
                    "error parsing list, expected comma or list end, got: {}",
                    self.token.text()
                );
                self.add_error(msg);
                return false;
            }

            if matches!(
                self.token,
                Token::Bool(_)
                    | Token::Number(_)
                    | Token::Float(_)
                    | Token::Str(_)
                    | Token::Heredoc(_)
                    | Token::Ident(_)
                    | Token::Illegal(_)
            ) {
                let mut literal = Value::Null;
                if !self.parse_literal_type(&mut literal) {
                    self.add_error("error parsing literal type");
                    return false;
                }
                items.push(literal);
                need_comma = true;
            } else if matches!(self.token, Token::Comma) {
                need_comma = false;
            } else if matches!(self.token, Token::LBrace) {
                let mut object = Value::Null;
                if !self.parse_object_type(&mut object) {
                    self.add_error("error parsing object within list");
                    return false;
                }
                items.push(object);
                need_comma = true;
            } else if matches!(self.token, Token::LBrack) {
                let mut list = Value::Null;
                if !self.parse_list_type(&mut list) {
                    self.add_error("error parsing list within list");
                    return false;
                }
                items.push(list);
                need_comma = true;
            } else if matches!(self.token, Token::RBrack) {
                *value = Value::List(items);
                return true;
            } else {
                let msg = format!(
                    "unexpected token while parsing list: {}",
                    self.token.text()
                );
                self.add_error(msg);
                return false;
            }
        }
    }

    fn parse_literal_type(&mut self, value: &mut Value) -> bool {
        let token = self.token.clone();
        match token {
            Token::Str(s) | Token::Heredoc(s) | Token::Ident(s) => {
                *value = Value::String(s);
                true
            }
            Token::Bool(b) => {
                *value = Value::Bool(b);
                true
            }
            Token::Number(n) => {
                *value = Value::Int(n);
                true
            }
            Token::Float(f) => {
                *value = Value::Double(f);
                true
            }
            Token::Illegal(reason) => {
                self.add_error(reason);
                false
            }
            _ => {
                self.add_error("unexpected token");
                false
            }
        }
    }
}
