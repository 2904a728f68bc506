//! The Self grammar
//!
//! Semantic actions build [`Code`] trees and literal objects directly while
//! parsing; there is no separate syntax tree.
//!
//! ```text
//! exprlist     := expression ( '.' expression? )*
//! expression   := keywordLevel | binaryLevel keywordSeq?
//! keywordLevel := keywordSeq
//! keywordSeq   := KW_LC expression ( KW expression )*
//! binaryLevel  := unaryLevel ( OPERATOR unaryLevel )*
//! unaryLevel   := ( constant | IDENT | 'self' ) IDENT*
//! constant     := BOOLEAN | TEXT | NUMBER | object
//! object       := '(' contents(')') | '[' contents(']')
//! contents(c)  := slotsDef exprlist? c | exprlist c | c
//! slotsDef     := '|' ( '|' | slot ( '.' slot? )* '|' )
//! slot         := slotId ( '=' | '<-' ) constant | ARGUMENT
//! slotId       := IDENT | KW_LC ( IDENT ( KW IDENT )* | KW+ )? | OPERATOR IDENT?
//! ```

use std::sync::Arc;

use indexmap::IndexSet;

use super::lexer::{tokenize, unescape_text};
use super::token::SelfToken;
use crate::code::Code;
use crate::error::{GrammarError, ParseError, Result};
use crate::grammar::{Element, Grammar, GrammarBuilder, ParserConfig, Rule, TokenStream};
use crate::object::{ObjectBuilder, ObjectRef, Primitives, Selector};

type CodeRef = Arc<Code>;

/// A declared slot, before its object is built.
enum SlotDecl {
    Data { id: SlotId, value: ObjectRef },
    Argument(String),
}

/// The selector a slot is reachable by, with the argument names it declares.
struct SlotId {
    selector: Selector,
    arguments: Vec<String>,
}

/// What follows the first keyword part of a slot id.
enum KeywordTail {
    /// `Kw: name` pairs, after the first argument name
    Named(String, Vec<(String, String)>),
    /// Further keyword parts without names
    Bare(Vec<String>),
}

/// Parser for Self source text.
///
/// Built once, with one initialization pass over the whole grammar; parses
/// any number of programs afterwards.
pub struct SelfParser {
    grammar: Grammar<SelfToken, CodeRef>,
}

impl SelfParser {
    /// Build the parser with the default configuration.
    pub fn new(primitives: Arc<Primitives>) -> std::result::Result<Self, GrammarError> {
        Self::with_config(primitives, ParserConfig::default())
    }

    /// Build the parser.
    pub fn with_config(
        primitives: Arc<Primitives>,
        config: ParserConfig,
    ) -> std::result::Result<Self, GrammarError> {
        let grammar = build_grammar(GrammarBuilder::with_config(config), primitives)?;
        Ok(Self { grammar })
    }

    /// Lex and parse a program.
    pub fn parse(&self, source: &str) -> Result<CodeRef> {
        let mut tokens = tokenize(source)?;
        Ok(self.parse_tokens(&mut tokens)?)
    }

    /// Parse a program from an existing token stream.
    pub fn parse_tokens(
        &self,
        tokens: &mut dyn TokenStream<SelfToken>,
    ) -> std::result::Result<CodeRef, ParseError> {
        self.grammar.parse(tokens)
    }

    /// The underlying grammar.
    pub fn grammar(&self) -> &Grammar<SelfToken, CodeRef> {
        &self.grammar
    }
}

impl std::fmt::Debug for SelfParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelfParser").field("grammar", &self.grammar).finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Rules
// ═══════════════════════════════════════════════════════════════════════

fn build_grammar(
    mut g: GrammarBuilder<SelfToken>,
    primitives: Arc<Primitives>,
) -> std::result::Result<Grammar<SelfToken, CodeRef>, GrammarError> {
    let exprlist = g.rule::<CodeRef>("exprlist");
    let expression = g.rule::<CodeRef>("expression");
    let keyword_level = g.rule::<CodeRef>("keywordLevel");
    let binary_level = g.rule::<CodeRef>("binaryLevel");
    let unary_level = g.rule::<CodeRef>("unaryLevel");
    let constant = g.rule::<ObjectRef>("constant");
    let object = g.rule::<ObjectRef>("object");
    let slot = g.rule::<SlotDecl>("slot");

    let ident = g.token_map(SelfToken::Identifier, |t| t.text.to_string());
    let kw_lc = g.token_map(SelfToken::KeywordLowercase, |t| t.text.to_string());
    let kw = g.token_map(SelfToken::Keyword, |t| t.text.to_string());
    let operator = g.token_map(SelfToken::Operator, |t| t.text.to_string());
    let dot = g.token(SelfToken::Dot);
    let bar = g.token(SelfToken::Bar);

    // ─── slots ───

    let kw_named = g.seq2(kw, ident, |part, name| (part, name));
    let kw_named_rest = g.many(kw_named);
    let named = g.seq2(ident, kw_named_rest, KeywordTail::Named);
    let kw_rest = g.many(kw);
    let bare = g.seq2(kw, kw_rest, |first, mut rest| {
        rest.insert(0, first);
        KeywordTail::Bare(rest)
    });
    let keyword_tail = g.alt([named, bare]);
    let keyword_tail = g.opt(keyword_tail);
    let keyword_id = g.seq2(kw_lc, keyword_tail, keyword_slot_id);
    let unary_slot_id = g.seq1(ident, |name| SlotId {
        selector: Selector::from(name),
        arguments: Vec::new(),
    });
    let operator_arg = g.opt(ident);
    let binary_slot_id = g.seq2(operator, operator_arg, |op, arg| SlotId {
        selector: Selector::from(op),
        arguments: arg.into_iter().collect(),
    });
    let slot_id = g.alt([unary_slot_id, keyword_id, binary_slot_id]);

    let equal = g.token(SelfToken::Equal);
    let arrow = g.token(SelfToken::Arrow);
    let assign = g.alt([equal, arrow]);
    let data_slot = g.seq3(slot_id, assign, constant.element(), |id, _, value| {
        SlotDecl::Data { id, value }
    });
    let argument_slot = g.token_map(SelfToken::Argument, |t| {
        SlotDecl::Argument(t.text.trim_start_matches(':').to_string())
    });
    let slot_body = g.alt([data_slot, argument_slot]);
    g.define(slot, slot_body);

    let maybe_slot = g.opt(slot.element());
    let next_slot = g.seq2(dot, maybe_slot, |_, slot| slot);
    let more_slots = g.many(next_slot);
    let slot_list = g.seq3(slot.element(), more_slots, bar, |first, rest, _| {
        let mut slots = vec![first];
        slots.extend(rest.into_iter().flatten());
        slots
    });
    let no_slots = g.seq1(bar, |_| Vec::new());
    let slots_tail = g.alt([no_slots, slot_list]);
    let slots_def = g.seq2(bar, slots_tail, |_, slots| slots);

    // ─── object and block literals ───

    let paren = literal(&mut g, SelfToken::LParen, SelfToken::RParen, false, slots_def, exprlist);
    let bracket = literal(&mut g, SelfToken::LBracket, SelfToken::RBracket, true, slots_def, exprlist);
    let object_body = g.alt([paren, bracket]);
    g.define(object, object_body);

    // ─── constants ───

    let prims = Arc::clone(&primitives);
    let boolean = g.token_map(SelfToken::Boolean, move |t| prims.boolean(&*t.text == "true"));
    let prims = Arc::clone(&primitives);
    let text = g.try_token_map(SelfToken::Text, move |t| {
        let body = t
            .text
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
            .ok_or_else(|| format!("malformed text literal {}", t.text))?;
        Ok(prims.text(unescape_text(body)?))
    });
    let prims = Arc::clone(&primitives);
    let number = g.try_token_map(SelfToken::Number, move |t| {
        parse_number(&t.text).map(|n| prims.number(n))
    });
    let constant_body = g.alt([boolean, text, number, object.element()]);
    g.define(constant, constant_body);

    // ─── message sends ───

    let constant_code = g.seq1(constant.element(), Code::constant);
    let implicit_send = g.seq1(ident, |name| Code::implicit(name, Vec::new()));
    let self_ref = g.token_map(SelfToken::SelfKw, |_| Arc::new(Code::SelfRef));
    let primary = g.alt([constant_code, implicit_send, self_ref]);
    let unary_sends = g.many(ident);
    let unary_body = g.seq2(primary, unary_sends, |receiver, selectors| {
        selectors
            .into_iter()
            .fold(receiver, |receiver, selector| Code::message(receiver, selector, Vec::new()))
    });
    g.define(unary_level, unary_body);

    let binary_send = g.seq2(operator, unary_level.element(), |op, arg| (op, arg));
    let binary_sends = g.many(binary_send);
    let binary_body = g.try_seq2(unary_level.element(), binary_sends, chain_binary);
    g.define(binary_level, binary_body);

    let keyword_part = g.seq2(kw, expression.element(), |part, arg| (part, arg));
    let keyword_parts = g.many(keyword_part);
    let keyword_seq = g.seq3(kw_lc, expression.element(), keyword_parts, |first, arg, rest| {
        let mut selector = first;
        let mut args = vec![arg];
        for (part, arg) in rest {
            selector.push_str(&part);
            args.push(arg);
        }
        (Selector::from(selector), args)
    });
    let keyword_body = g.seq1(keyword_seq, |(selector, args)| Code::implicit(selector, args));
    g.define(keyword_level, keyword_body);

    let keyword_send = g.opt(keyword_seq);
    let binary_then_keyword = g.seq2(binary_level.element(), keyword_send, |receiver, send| {
        match send {
            Some((selector, args)) => Code::message(receiver, selector, args),
            None => receiver,
        }
    });
    let expression_body = g.alt([keyword_level.element(), binary_then_keyword]);
    g.define(expression, expression_body);

    // ─── statements ───

    let maybe_expression = g.opt(expression.element());
    let next_expression = g.seq2(dot, maybe_expression, |_, expr| expr);
    let more_expressions = g.many(next_expression);
    let exprlist_body = g.seq2(expression.element(), more_expressions, |first, rest| {
        let mut statements = vec![first];
        statements.extend(rest.into_iter().flatten());
        Arc::new(Code::Block(statements))
    });
    g.define(exprlist, exprlist_body);

    g.build(exprlist)
}

/// `open contents close`, producing an object or block literal.
fn literal(
    g: &mut GrammarBuilder<SelfToken>,
    open: SelfToken,
    close: SelfToken,
    block: bool,
    slots_def: Element<Vec<SlotDecl>>,
    exprlist: Rule<CodeRef>,
) -> Element<ObjectRef> {
    let open = g.token(open);
    let close = g.token(close);
    let body = g.opt(exprlist.element());
    let with_slots = g.try_seq3(slots_def, body, close, move |slots, body, _| {
        build_literal(slots, body, block)
    });
    let body_only = g.try_seq2(exprlist.element(), close, move |body, _| {
        build_literal(Vec::new(), Some(body), block)
    });
    let empty = g.seq1(close, move |_| ObjectBuilder::new().block(block).build());
    let contents = g.alt([with_slots, body_only, empty]);
    g.seq2(open, contents, |_, object| object)
}

// ═══════════════════════════════════════════════════════════════════════
// Semantic actions
// ═══════════════════════════════════════════════════════════════════════

fn keyword_slot_id(first: String, tail: Option<KeywordTail>) -> SlotId {
    match tail {
        None => SlotId {
            selector: Selector::from(first),
            arguments: Vec::new(),
        },
        Some(KeywordTail::Named(name, rest)) => {
            let mut parts = vec![first];
            let mut arguments = vec![name];
            for (part, name) in rest {
                parts.push(part);
                arguments.push(name);
            }
            SlotId {
                selector: Selector::keyword(parts),
                arguments,
            }
        }
        Some(KeywordTail::Bare(rest)) => SlotId {
            selector: Selector::keyword(std::iter::once(first).chain(rest)),
            arguments: Vec::new(),
        },
    }
}

fn build_literal(
    slots: Vec<SlotDecl>,
    body: Option<CodeRef>,
    block: bool,
) -> std::result::Result<ObjectRef, String> {
    let mut seen = IndexSet::new();
    let mut builder = ObjectBuilder::new().block(block);
    for slot in slots {
        let name = match &slot {
            SlotDecl::Data { id, .. } => id.selector.to_string(),
            SlotDecl::Argument(name) => name.clone(),
        };
        if !seen.insert(name.clone()) {
            return Err(format!("duplicate slot `{}`", name));
        }
        builder = match slot {
            SlotDecl::Data { id, value } => builder.slot(id.selector, with_arguments(value, id.arguments)),
            SlotDecl::Argument(name) => builder.argument(name),
        };
    }
    if let Some(body) = body {
        builder = builder.body(body);
    }
    Ok(builder.build())
}

/// Inject argument names declared in a slot id into the method literal.
///
/// Values without a body take no arguments and are stored unchanged.
fn with_arguments(value: ObjectRef, arguments: Vec<String>) -> ObjectRef {
    if arguments.is_empty() || value.body().is_none() {
        return value;
    }
    ObjectBuilder::from_object(&value)
        .leading_arguments(arguments)
        .build()
}

fn chain_binary(
    first: CodeRef,
    sends: Vec<(String, CodeRef)>,
) -> std::result::Result<CodeRef, String> {
    let mut sends = sends.into_iter();
    let Some((operator, arg)) = sends.next() else {
        return Ok(first);
    };
    let mut result = Code::message(first, operator.as_str(), vec![arg]);
    for (next, arg) in sends {
        if next != operator {
            return Err(format!(
                "no precedence for binary operator - please use parentheses for {} and {}",
                operator, next
            ));
        }
        result = Code::message(result, operator.as_str(), vec![arg]);
    }
    Ok(result)
}

/// Parse an integer literal: decimal or `radix r digits`, optionally signed.
fn parse_number(text: &str) -> std::result::Result<i64, String> {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    if let Some(pos) = digits.find(|c| c == 'r' || c == 'R') {
        let radix: u32 = digits[..pos]
            .parse()
            .map_err(|_| format!("invalid radix in {}", text))?;
        if !(2..=36).contains(&radix) {
            return Err(format!("radix {} out of range in {}", radix, text));
        }
        return i64::from_str_radix(&format!("{}{}", sign, &digits[pos + 1..]), radix)
            .map_err(|err| format!("invalid number {}: {}", text, err));
    }
    if digits.contains(|c| c == '.' || c == 'e' || c == 'E') {
        return Err(format!("floating-point literal {} is not supported", text));
    }
    text.parse::<i64>()
        .map_err(|err| format!("invalid number {}: {}", text, err))
}
