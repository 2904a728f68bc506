//! Running an initialized grammar over a token stream

use tracing::{trace, trace_span};

use super::first::FirstSet;
use super::node::{ActionFailure, Node, RuleDef, Value};
use super::stream::{TokenKind, TokenStream};
use super::{Grammar, RuleDispatch};
use crate::error::{ParseError, SyntaxError};
use crate::stack::ensure_sufficient_stack;

/// One parse of one token stream.
///
/// Keeps the stack of rules being parsed so that failures name the
/// innermost one.
pub(super) struct Execution<'g, 's, K: TokenKind> {
    nodes: &'g [Node<K>],
    rules: &'g [RuleDef],
    first: &'g [Option<FirstSet>],
    dispatch: RuleDispatch,
    stream: &'s mut dyn TokenStream<K>,
    rule_stack: Vec<usize>,
}

impl<'g, 's, K: TokenKind> Execution<'g, 's, K> {
    pub(super) fn new<T>(grammar: &'g Grammar<K, T>, stream: &'s mut dyn TokenStream<K>) -> Self {
        Self {
            nodes: &grammar.nodes,
            rules: &grammar.rules,
            first: &grammar.first,
            dispatch: grammar.config.dispatch,
            stream,
            rule_stack: Vec::new(),
        }
    }

    /// Parse from `root` and require the stream to be exhausted.
    pub(super) fn run(mut self, root: usize) -> Result<Value, ParseError> {
        let value = self.node(root)?;
        if let Some(token) = self.stream.peek() {
            let rule = match self.nodes.get(root) {
                Some(Node::Rule(rule)) => self.rule_name(*rule),
                _ => "<root>",
            };
            return Err(SyntaxError::new(
                format!("expected end of input, got `{}`", token.text),
                Some(token.offset),
                rule,
            )
            .into());
        }
        Ok(value)
    }

    fn node(&mut self, id: usize) -> Result<Value, ParseError> {
        let nodes = self.nodes;
        let node = nodes.get(id).ok_or_else(|| internal(format!("unknown node {}", id)))?;
        match node {
            Node::Rule(rule) => self.rule(*rule),

            Node::TokenMatch { kind, action } => {
                let matched = self.stream.peek().is_some_and(|token| token.kind == *kind);
                if !matched {
                    let got = self.lookahead_text();
                    return Err(self.syntax_error(format!("expecting {:?}, got {}", kind, got)));
                }
                let token = self
                    .stream
                    .advance()
                    .ok_or_else(|| internal("token vanished after peek"))?;
                trace!(kind = ?token.kind, offset = token.offset, "matched token");
                let offset = token.offset;
                action(token).map_err(|failure| self.action_failure(failure, Some(offset)))
            }

            Node::Sequence { children, action } => {
                let mut values = Vec::with_capacity(children.len());
                for &child in children {
                    values.push(self.node(child)?);
                }
                action(values).map_err(|failure| self.action_failure(failure, None))
            }

            Node::Alternative { options } => {
                for &option in options {
                    if self.lookahead_starts(option)? {
                        return self.node(option);
                    }
                }
                let got = self.lookahead_text();
                Err(self.syntax_error(format!("no alternative matches {}", got)))
            }

            Node::Repetition {
                body,
                seed,
                accumulate,
                finish,
            } => {
                let mut acc = seed();
                while self.lookahead_starts(*body)? {
                    let item = self.node(*body)?;
                    acc = accumulate(acc, item).map_err(|failure| self.action_failure(failure, None))?;
                }
                finish(acc).map_err(|failure| self.action_failure(failure, None))
            }

            Node::Optional {
                body,
                present,
                absent,
            } => {
                if self.lookahead_starts(*body)? {
                    let value = self.node(*body)?;
                    present(value).map_err(|failure| self.action_failure(failure, None))
                } else {
                    Ok(absent())
                }
            }
        }
    }

    fn rule(&mut self, rule: usize) -> Result<Value, ParseError> {
        match self.dispatch {
            RuleDispatch::Inline => ensure_sufficient_stack(|| self.enter_rule(rule)),
            RuleDispatch::Indirect => {
                let span = trace_span!("rule", name = %self.rule_name(rule));
                let _guard = span.enter();
                ensure_sufficient_stack(|| self.enter_rule(rule))
            }
        }
    }

    fn enter_rule(&mut self, rule: usize) -> Result<Value, ParseError> {
        let body = self
            .rules
            .get(rule)
            .and_then(|def| def.body)
            .ok_or_else(|| internal(format!("rule {} has no body", rule)))?;
        self.rule_stack.push(rule);
        // Left on the stack when the body fails, so the error names this rule.
        let value = self.node(body)?;
        self.rule_stack.pop();
        Ok(value)
    }

    fn lookahead_starts(&self, id: usize) -> Result<bool, ParseError> {
        let set = self
            .first
            .get(id)
            .copied()
            .flatten()
            .ok_or_else(|| internal(format!("node {} has no FIRST set", id)))?;
        Ok(self
            .stream
            .peek()
            .is_some_and(|token| set.contains(token.kind.ordinal())))
    }

    fn lookahead_text(&self) -> String {
        match self.stream.peek() {
            Some(token) => format!("`{}`", token.text),
            None => "end of input".to_string(),
        }
    }

    fn rule_name(&self, rule: usize) -> &'g str {
        self.rules.get(rule).map_or("<root>", |def| def.name.as_str())
    }

    fn current_rule(&self) -> &'g str {
        match self.rule_stack.last() {
            Some(&rule) => self.rule_name(rule),
            None => "<root>",
        }
    }

    fn syntax_error(&self, message: String) -> ParseError {
        let offset = self.stream.peek().map(|token| token.offset);
        SyntaxError::new(message, offset, self.current_rule()).into()
    }

    fn action_failure(&self, failure: ActionFailure, offset: Option<usize>) -> ParseError {
        match failure {
            ActionFailure::Rejected(message) => {
                let offset = offset.or_else(|| self.stream.peek().map(|token| token.offset));
                SyntaxError::new(message, offset, self.current_rule()).into()
            }
            ActionFailure::WrongType(expected) => {
                internal(format!("semantic value is not a {}", expected))
            }
        }
    }
}

fn internal(message: impl Into<String>) -> ParseError {
    ParseError::Internal {
        message: message.into(),
    }
}
