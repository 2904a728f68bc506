//! Predictive grammar-combinator engine
//!
//! A grammar is composed from [`Element`]s inside a [`GrammarBuilder`] and
//! then frozen into a [`Grammar`] by a single initialization pass that
//! computes every FIRST set. Parsing uses exactly one token of lookahead and
//! never backtracks over consumed tokens:
//!
//! - a **sequence** consumes its children in order and transduces their values;
//! - an **alternative** picks the first option (in declaration order) whose
//!   FIRST set holds the lookahead;
//! - a **repetition** folds its body while the lookahead can start it;
//! - an **optional** consumes its body only if the lookahead can start it;
//! - a **token match** consumes exactly one token of a given kind.
//!
//! Recursive grammars are written with two-phase construction: declare a
//! [`Rule`] first, use it freely, and supply its body later with
//! [`GrammarBuilder::define`].
//!
//! # Example
//!
//! ```
//! use protoself::grammar::{GrammarBuilder, Token, TokenCursor, TokenKind};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Kind { Num, Plus }
//!
//! impl TokenKind for Kind {
//!     fn ordinal(self) -> u8 { self as u8 }
//! }
//!
//! let mut g = GrammarBuilder::new();
//! let sum = g.rule::<i64>("sum");
//! let num = g.token_map(Kind::Num, |t| t.text.parse::<i64>().unwrap_or(0));
//! let plus = g.token(Kind::Plus);
//! let tail = g.seq2(plus, num, |_, n| n);
//! let more = g.rep(tail, || 0i64, |acc, n| acc + n, |acc| acc);
//! let body = g.seq2(num, more, |head, rest| head + rest);
//! g.define(sum, body);
//! let grammar = g.build(sum).unwrap();
//!
//! let mut tokens = TokenCursor::new(vec![
//!     Token::new(Kind::Num, "1", 0),
//!     Token::new(Kind::Plus, "+", 1),
//!     Token::new(Kind::Num, "2", 2),
//! ]);
//! assert_eq!(grammar.parse(&mut tokens).unwrap(), 3);
//! ```

mod exec;
mod first;
mod node;
mod stream;

pub use first::FirstSet;
pub use stream::{Token, TokenCursor, TokenKind, TokenStream};

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

use crate::error::{GrammarError, ParseError};
use node::{take, take_next, ActionFailure, Node, RuleDef, Value};

// ═══════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════

/// How a rule reference reaches the rule's body during parsing.
///
/// Both modes parse identically and report the same rule in errors; they
/// differ only in the tracing span opened per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleDispatch {
    /// Enter the rule body without opening a span
    Inline,

    /// Enter the rule body inside a `rule` trace span named after the rule
    #[default]
    Indirect,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Rule dispatch strategy
    pub dispatch: RuleDispatch,
}

impl ParserConfig {
    /// Create a configuration with the given dispatch strategy.
    pub fn with_dispatch(dispatch: RuleDispatch) -> Self {
        Self { dispatch }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Handles
// ═══════════════════════════════════════════════════════════════════════

/// Typed handle to a grammar node producing values of type `T`.
///
/// A handle is only valid in the builder that created it.
pub struct Element<T> {
    builder: usize,
    id: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Element<T> {
    fn new(builder: usize, id: usize) -> Self {
        Self {
            builder,
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Element<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Element<T> {}

impl<T> std::fmt::Debug for Element<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element#{}", self.id)
    }
}

/// Typed handle to a named, forward-declared rule.
pub struct Rule<T> {
    builder: usize,
    rule: usize,
    reference: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Rule<T> {
    /// An element that invokes this rule.
    pub fn element(&self) -> Element<T> {
        Element::new(self.builder, self.reference)
    }
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Rule<T> {}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule#{}", self.rule)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════

/// Source of builder identities stamped into element handles.
static NEXT_BUILDER: AtomicUsize = AtomicUsize::new(0);

/// Composes elements into a grammar over token kinds `K`.
///
/// Contract violations found while composing (an all-optional sequence, a
/// token kind that does not fit the FIRST-set mask, a rule defined twice, a
/// handle from another builder) are recorded and reported by
/// [`GrammarBuilder::build`].
///
/// Left recursion is not rewritten: a rule that can re-enter itself before
/// consuming a token builds, is logged at `warn` and listed by
/// [`Grammar::left_recursive_rules`], but parsing through it never
/// terminates.
pub struct GrammarBuilder<K> {
    id: usize,
    nodes: Vec<Node<K>>,
    rules: Vec<RuleDef>,
    errors: Vec<GrammarError>,
    config: ParserConfig,
}

impl<K: TokenKind> Default for GrammarBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKind> GrammarBuilder<K> {
    /// Create an empty builder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create an empty builder with the given configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            id: NEXT_BUILDER.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
            rules: Vec::new(),
            errors: Vec::new(),
            config,
        }
    }

    fn push<T>(&mut self, node: Node<K>) -> Element<T> {
        self.nodes.push(node);
        Element::new(self.id, self.nodes.len() - 1)
    }

    /// The node behind `element`, recording an error if it belongs to
    /// another builder.
    fn node_id<T>(&mut self, element: Element<T>) -> usize {
        if element.builder != self.id {
            self.errors.push(GrammarError::UnknownElement);
        }
        element.id
    }

    // ═══════════════════════════════════════════════════════════════════
    // Rules
    // ═══════════════════════════════════════════════════════════════════

    /// Declare a rule whose body is supplied later with [`Self::define`].
    pub fn rule<T: 'static>(&mut self, name: impl Into<String>) -> Rule<T> {
        self.rules.push(RuleDef {
            name: name.into(),
            body: None,
        });
        let rule = self.rules.len() - 1;
        let reference = self.push::<T>(Node::Rule(rule)).id;
        Rule {
            builder: self.id,
            rule,
            reference,
            _marker: PhantomData,
        }
    }

    /// Supply the body of a declared rule.
    pub fn define<T: 'static>(&mut self, rule: Rule<T>, body: Element<T>) {
        let body = self.node_id(body);
        if rule.builder != self.id {
            self.errors.push(GrammarError::UnknownElement);
            return;
        }
        match self.rules.get_mut(rule.rule) {
            Some(def) if def.body.is_some() => self.errors.push(GrammarError::RedefinedRule {
                name: def.name.clone(),
            }),
            Some(def) => def.body = Some(body),
            None => self.errors.push(GrammarError::UnknownElement),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Tokens
    // ═══════════════════════════════════════════════════════════════════

    /// Match one token of `kind`, producing the token itself.
    pub fn token(&mut self, kind: K) -> Element<Token<K>> {
        self.token_map(kind, |token| token)
    }

    /// Match one token of `kind` and transduce it.
    pub fn token_map<R: 'static>(
        &mut self,
        kind: K,
        f: impl Fn(Token<K>) -> R + Send + Sync + 'static,
    ) -> Element<R> {
        self.try_token_map(kind, move |token| Ok(f(token)))
    }

    /// Match one token of `kind` and transduce it, rejecting it with a
    /// message on `Err`.
    pub fn try_token_map<R: 'static>(
        &mut self,
        kind: K,
        f: impl Fn(Token<K>) -> Result<R, String> + Send + Sync + 'static,
    ) -> Element<R> {
        if kind.ordinal() >= 128 {
            self.errors.push(GrammarError::KindOutOfRange {
                kind: format!("{:?}", kind),
                ordinal: kind.ordinal(),
            });
        }
        self.push(Node::TokenMatch {
            kind,
            action: Box::new(move |token: Token<K>| -> node::ActionResult {
                f(token)
                    .map(|value| Box::new(value) as Value)
                    .map_err(ActionFailure::Rejected)
            }),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Sequences
    // ═══════════════════════════════════════════════════════════════════

    fn sequence<R: 'static>(
        &mut self,
        children: Vec<usize>,
        action: node::SequenceFn,
    ) -> Element<R> {
        let has_mandatory = children
            .iter()
            .any(|&child| !matches!(self.nodes.get(child), Some(n) if n.is_nullable()));
        if !has_mandatory {
            self.errors.push(GrammarError::NoMandatoryElement);
        }
        self.push(Node::Sequence { children, action })
    }

    /// One element followed by a transduction.
    pub fn seq1<A: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        f: impl Fn(A) -> R + Send + Sync + 'static,
    ) -> Element<R> {
        self.try_seq1(a, move |a| Ok(f(a)))
    }

    /// Two elements in order.
    pub fn seq2<A: 'static, B: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        b: Element<B>,
        f: impl Fn(A, B) -> R + Send + Sync + 'static,
    ) -> Element<R> {
        self.try_seq2(a, b, move |a, b| Ok(f(a, b)))
    }

    /// Three elements in order.
    pub fn seq3<A: 'static, B: 'static, C: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        b: Element<B>,
        c: Element<C>,
        f: impl Fn(A, B, C) -> R + Send + Sync + 'static,
    ) -> Element<R> {
        self.try_seq3(a, b, c, move |a, b, c| Ok(f(a, b, c)))
    }

    /// Four elements in order.
    pub fn seq4<A: 'static, B: 'static, C: 'static, D: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        b: Element<B>,
        c: Element<C>,
        d: Element<D>,
        f: impl Fn(A, B, C, D) -> R + Send + Sync + 'static,
    ) -> Element<R> {
        self.try_seq4(a, b, c, d, move |a, b, c, d| Ok(f(a, b, c, d)))
    }

    /// Like [`Self::seq1`], but the transduction may reject its input.
    pub fn try_seq1<A: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        f: impl Fn(A) -> Result<R, String> + Send + Sync + 'static,
    ) -> Element<R> {
        let children = vec![self.node_id(a)];
        self.sequence(
            children,
            Box::new(move |values: Vec<Value>| -> node::ActionResult {
                let mut values = values.into_iter();
                let a = take_next::<A>(&mut values)?;
                finish_action(f(a))
            }),
        )
    }

    /// Like [`Self::seq2`], but the transduction may reject its input.
    pub fn try_seq2<A: 'static, B: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        b: Element<B>,
        f: impl Fn(A, B) -> Result<R, String> + Send + Sync + 'static,
    ) -> Element<R> {
        let children = vec![self.node_id(a), self.node_id(b)];
        self.sequence(
            children,
            Box::new(move |values: Vec<Value>| -> node::ActionResult {
                let mut values = values.into_iter();
                let a = take_next::<A>(&mut values)?;
                let b = take_next::<B>(&mut values)?;
                finish_action(f(a, b))
            }),
        )
    }

    /// Like [`Self::seq3`], but the transduction may reject its input.
    pub fn try_seq3<A: 'static, B: 'static, C: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        b: Element<B>,
        c: Element<C>,
        f: impl Fn(A, B, C) -> Result<R, String> + Send + Sync + 'static,
    ) -> Element<R> {
        let children = vec![self.node_id(a), self.node_id(b), self.node_id(c)];
        self.sequence(
            children,
            Box::new(move |values: Vec<Value>| -> node::ActionResult {
                let mut values = values.into_iter();
                let a = take_next::<A>(&mut values)?;
                let b = take_next::<B>(&mut values)?;
                let c = take_next::<C>(&mut values)?;
                finish_action(f(a, b, c))
            }),
        )
    }

    /// Like [`Self::seq4`], but the transduction may reject its input.
    pub fn try_seq4<A: 'static, B: 'static, C: 'static, D: 'static, R: 'static>(
        &mut self,
        a: Element<A>,
        b: Element<B>,
        c: Element<C>,
        d: Element<D>,
        f: impl Fn(A, B, C, D) -> Result<R, String> + Send + Sync + 'static,
    ) -> Element<R> {
        let children = vec![
            self.node_id(a),
            self.node_id(b),
            self.node_id(c),
            self.node_id(d),
        ];
        self.sequence(
            children,
            Box::new(move |values: Vec<Value>| -> node::ActionResult {
                let mut values = values.into_iter();
                let a = take_next::<A>(&mut values)?;
                let b = take_next::<B>(&mut values)?;
                let c = take_next::<C>(&mut values)?;
                let d = take_next::<D>(&mut values)?;
                finish_action(f(a, b, c, d))
            }),
        )
    }

    // ═══════════════════════════════════════════════════════════════════
    // Alternatives, repetition, optional
    // ═══════════════════════════════════════════════════════════════════

    /// Choose the first option whose FIRST set holds the lookahead.
    ///
    /// Overlapping FIRST sets are allowed; the earlier option wins.
    pub fn alt<T: 'static>(&mut self, options: impl IntoIterator<Item = Element<T>>) -> Element<T> {
        let options: Vec<usize> = options
            .into_iter()
            .map(|option| self.node_id(option))
            .collect();
        self.push(Node::Alternative { options })
    }

    /// Zero or more `body`, folded with `accumulate` starting from `seed`.
    pub fn rep<T: 'static, L: 'static, R: 'static>(
        &mut self,
        body: Element<T>,
        seed: impl Fn() -> L + Send + Sync + 'static,
        accumulate: impl Fn(L, T) -> L + Send + Sync + 'static,
        finish: impl Fn(L) -> R + Send + Sync + 'static,
    ) -> Element<R> {
        let body = self.node_id(body);
        self.push(Node::Repetition {
            body,
            seed: Box::new(move || -> Value { Box::new(seed()) }),
            accumulate: Box::new(move |acc: Value, item: Value| -> node::ActionResult {
                let acc = take::<L>(acc)?;
                let item = take::<T>(item)?;
                Ok(Box::new(accumulate(acc, item)) as Value)
            }),
            finish: Box::new(move |acc: Value| -> node::ActionResult {
                Ok(Box::new(finish(take::<L>(acc)?)) as Value)
            }),
        })
    }

    /// Zero or more `body`, collected in order.
    pub fn many<T: 'static>(&mut self, body: Element<T>) -> Element<Vec<T>> {
        self.rep(
            body,
            Vec::new,
            |mut items, item| {
                items.push(item);
                items
            },
            |items| items,
        )
    }

    /// `body` if the lookahead can start it, otherwise `None`.
    pub fn opt<T: 'static>(&mut self, body: Element<T>) -> Element<Option<T>> {
        let body = self.node_id(body);
        self.push(Node::Optional {
            body,
            present: Box::new(|value: Value| -> node::ActionResult {
                Ok(Box::new(Some(take::<T>(value)?)) as Value)
            }),
            absent: Box::new(|| -> Value { Box::new(None::<T>) }),
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Initialization
    // ═══════════════════════════════════════════════════════════════════

    /// Validate the grammar, compute every FIRST set and freeze it with
    /// `root` as the start rule.
    pub fn build<T: 'static>(self, root: Rule<T>) -> Result<Grammar<K, T>, GrammarError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        if root.builder != self.id {
            return Err(GrammarError::UnknownElement);
        }
        if let Some(undefined) = self.rules.iter().find(|rule| rule.body.is_none()) {
            return Err(GrammarError::UndefinedRule {
                name: undefined.name.clone(),
            });
        }

        let mut rule_first: Vec<Option<FirstSet>> = vec![None; self.rules.len()];
        let mut left_recursive = Vec::new();
        for rule in 0..self.rules.len() {
            let mut set = FirstSet::new();
            let mut walk = FirstWalk::entering(rule);
            if let Some(body) = self.rules[rule].body {
                collect_first(&self.nodes, &self.rules, &rule_first, body, &mut set, &mut walk)?;
            }
            if walk.reentered.contains(&rule) {
                warn!(rule = %self.rules[rule].name, "left-recursive rule: parsing it will not terminate");
                left_recursive.push(rule);
            }
            set.seal();
            debug!(rule = %self.rules[rule].name, first = ?set, "computed rule FIRST set");
            if set.is_empty() {
                warn!(rule = %self.rules[rule].name, "rule can never be selected: empty FIRST set");
            }
            rule_first[rule] = Some(set);
        }

        let mut first = Vec::with_capacity(self.nodes.len());
        for (id, node) in self.nodes.iter().enumerate() {
            if node.is_nullable() {
                first.push(None);
                continue;
            }
            let mut set = FirstSet::new();
            collect_first(&self.nodes, &self.rules, &rule_first, id, &mut set, &mut FirstWalk::default())?;
            set.seal();
            first.push(Some(set));
        }

        for node in &self.nodes {
            let queried: Vec<(usize, &str)> = match node {
                Node::Alternative { options } => {
                    options.iter().map(|&o| (o, "option of alternative")).collect()
                }
                Node::Repetition { body, .. } => vec![(*body, "body of repetition")],
                Node::Optional { body, .. } => vec![(*body, "body of optional")],
                _ => Vec::new(),
            };
            for (id, context) in queried {
                match first.get(id) {
                    Some(Some(_)) => {}
                    Some(None) => {
                        return Err(GrammarError::NullableFirst {
                            context: context.to_string(),
                        })
                    }
                    None => return Err(GrammarError::UnknownElement),
                }
            }
        }

        debug!(
            rules = self.rules.len(),
            nodes = self.nodes.len(),
            "grammar initialized"
        );

        Ok(Grammar {
            builder: self.id,
            nodes: self.nodes,
            rules: self.rules,
            first,
            rule_first: rule_first.into_iter().map(Option::unwrap_or_default).collect(),
            left_recursive,
            root: root.reference,
            config: self.config,
            _marker: PhantomData,
        })
    }
}

fn finish_action<R: 'static>(result: Result<R, String>) -> node::ActionResult {
    result
        .map(|value| Box::new(value) as Value)
        .map_err(ActionFailure::Rejected)
}

/// Rules seen by one FIRST-set computation.
#[derive(Default)]
struct FirstWalk {
    /// Rules already entered; entering one again contributes nothing
    visited: HashSet<usize>,
    /// Rules reached again in first position
    reentered: HashSet<usize>,
}

impl FirstWalk {
    fn entering(rule: usize) -> Self {
        Self {
            visited: HashSet::from([rule]),
            reentered: HashSet::new(),
        }
    }
}

/// Add the FIRST set of node `id` to `into`.
fn collect_first<K: TokenKind>(
    nodes: &[Node<K>],
    rules: &[RuleDef],
    memo: &[Option<FirstSet>],
    id: usize,
    into: &mut FirstSet,
    walk: &mut FirstWalk,
) -> Result<(), GrammarError> {
    let node = nodes.get(id).ok_or(GrammarError::UnknownElement)?;
    match node {
        Node::TokenMatch { kind, .. } => {
            into.insert(kind.ordinal());
            Ok(())
        }
        Node::Sequence { children, .. } => {
            for &child in children {
                match nodes.get(child) {
                    Some(Node::Optional { body, .. }) | Some(Node::Repetition { body, .. }) => {
                        collect_first(nodes, rules, memo, *body, into, walk)?;
                    }
                    Some(_) => return collect_first(nodes, rules, memo, child, into, walk),
                    None => return Err(GrammarError::UnknownElement),
                }
            }
            Err(GrammarError::NoMandatoryElement)
        }
        Node::Alternative { options } => {
            for &option in options {
                collect_first(nodes, rules, memo, option, into, walk)?;
            }
            Ok(())
        }
        Node::Rule(rule) => {
            if !walk.visited.insert(*rule) {
                walk.reentered.insert(*rule);
                return Ok(());
            }
            if let Some(Some(known)) = memo.get(*rule) {
                into.union_with(known);
                return Ok(());
            }
            match rules.get(*rule).and_then(|def| def.body) {
                Some(body) => collect_first(nodes, rules, memo, body, into, walk),
                None => Ok(()),
            }
        }
        Node::Repetition { .. } | Node::Optional { .. } => Err(GrammarError::NullableFirst {
            context: format!("bare {}", node.describe()),
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Grammar
// ═══════════════════════════════════════════════════════════════════════

/// An initialized grammar producing values of type `T`.
///
/// Immutable after [`GrammarBuilder::build`]; one grammar may parse any
/// number of token streams, from any thread.
pub struct Grammar<K, T> {
    builder: usize,
    nodes: Vec<Node<K>>,
    rules: Vec<RuleDef>,
    first: Vec<Option<FirstSet>>,
    rule_first: Vec<FirstSet>,
    left_recursive: Vec<usize>,
    root: usize,
    config: ParserConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<K: TokenKind, T: 'static> Grammar<K, T> {
    /// Parse the whole token stream from the root rule.
    pub fn parse(&self, stream: &mut dyn TokenStream<K>) -> Result<T, ParseError> {
        let value = exec::Execution::new(self, stream).run(self.root)?;
        take::<T>(value).map_err(|_| ParseError::Internal {
            message: format!("root produced a value that is not {}", std::any::type_name::<T>()),
        })
    }

    /// The FIRST set of an element.
    ///
    /// Fails with [`GrammarError::NullableFirst`] for a bare repetition or
    /// optional element.
    pub fn first_set<E>(&self, element: Element<E>) -> Result<FirstSet, GrammarError> {
        if element.builder != self.builder {
            return Err(GrammarError::UnknownElement);
        }
        match self.first.get(element.id) {
            Some(Some(set)) => Ok(*set),
            Some(None) => Err(GrammarError::NullableFirst {
                context: format!("bare {}", self.nodes[element.id].describe()),
            }),
            None => Err(GrammarError::UnknownElement),
        }
    }

    /// Whether some derivation of `element` can begin with `kind`.
    pub fn can_start_with<E>(&self, element: Element<E>, kind: K) -> Result<bool, GrammarError> {
        Ok(self.first_set(element)?.contains(kind.ordinal()))
    }

    /// The FIRST set of a rule.
    pub fn rule_first_set<E>(&self, rule: Rule<E>) -> Result<FirstSet, GrammarError> {
        if rule.builder != self.builder {
            return Err(GrammarError::UnknownElement);
        }
        self.rule_first
            .get(rule.rule)
            .copied()
            .ok_or(GrammarError::UnknownElement)
    }

    /// Rules found re-entering themselves before consuming a token.
    ///
    /// Every left-recursive cycle lists at least one of its rules.
    pub fn left_recursive_rules(&self) -> impl Iterator<Item = &str> {
        self.left_recursive
            .iter()
            .filter_map(|&rule| self.rules.get(rule))
            .map(|def| def.name.as_str())
    }

    /// Names of all rules, in declaration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    /// The parser configuration.
    pub fn config(&self) -> ParserConfig {
        self.config
    }
}

impl<K, T> std::fmt::Debug for Grammar<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.rules.iter().map(|r| &r.name).collect::<Vec<_>>())
            .field("nodes", &self.nodes.len())
            .field("config", &self.config)
            .finish()
    }
}
