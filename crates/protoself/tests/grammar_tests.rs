use pretty_assertions::assert_eq;
use protoself::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum K {
    Num,
    Plus,
    LParen,
    RParen,
    Comma,
    Word,
    Comment,
}

impl TokenKind for K {
    fn ordinal(self) -> u8 {
        self as u8
    }

    fn is_trivia(self) -> bool {
        self == K::Comment
    }
}

// Helper to turn space-separated words into a token stream
fn stream(src: &str) -> TokenCursor<K> {
    let mut offset = 0;
    let mut tokens = Vec::new();
    for word in src.split(' ') {
        if !word.is_empty() {
            let kind = match word {
                "+" => K::Plus,
                "(" => K::LParen,
                ")" => K::RParen,
                "," => K::Comma,
                w if w.starts_with('#') => K::Comment,
                w if w.chars().all(|c| c.is_ascii_digit()) => K::Num,
                _ => K::Word,
            };
            tokens.push(Token::new(kind, word, offset));
        }
        offset += word.len() + 1;
    }
    TokenCursor::new(tokens)
}

fn syntax(err: ParseError) -> SyntaxError {
    match err {
        ParseError::Syntax(err) => err,
        other => panic!("expected syntax error, got {:?}", other),
    }
}

// sum := term ( '+' term )*
// term := NUM | '(' sum ')'
fn sum_grammar(config: ParserConfig) -> Grammar<K, i64> {
    let mut g = GrammarBuilder::with_config(config);
    let sum = g.rule::<i64>("sum");
    let term = g.rule::<i64>("term");
    let num = g.try_token_map(K::Num, |t| t.text.parse::<i64>().map_err(|e| e.to_string()));
    let lparen = g.token(K::LParen);
    let rparen = g.token(K::RParen);
    let group = g.seq3(lparen, sum.element(), rparen, |_, n, _| n);
    let term_body = g.alt([num, group]);
    g.define(term, term_body);
    let plus = g.token(K::Plus);
    let tail = g.seq2(plus, term.element(), |_, n| n);
    let tails = g.rep(tail, || 0i64, |acc, n| acc + n, |acc| acc);
    let sum_body = g.seq2(term.element(), tails, |first, rest| first + rest);
    g.define(sum, sum_body);
    g.build(sum).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_parse_recursive_grammar() {
    let grammar = sum_grammar(ParserConfig::default());
    assert_eq!(grammar.parse(&mut stream("1 + ( 2 + 3 ) + 4")).unwrap(), 10);
    assert_eq!(grammar.parse(&mut stream("7")).unwrap(), 7);
}

#[test]
fn test_trivia_is_skipped() {
    let grammar = sum_grammar(ParserConfig::default());
    assert_eq!(grammar.parse(&mut stream("#c 1 #c + #c 2 #c")).unwrap(), 3);
}

#[test]
fn test_dispatch_modes_agree() {
    let inline = sum_grammar(ParserConfig::with_dispatch(RuleDispatch::Inline));
    let indirect = sum_grammar(ParserConfig::with_dispatch(RuleDispatch::Indirect));
    for src in ["1", "1 + 2", "( ( 3 ) ) + ( 4 + 5 )"] {
        assert_eq!(
            inline.parse(&mut stream(src)).unwrap(),
            indirect.parse(&mut stream(src)).unwrap()
        );
    }
    let a = syntax(inline.parse(&mut stream("1 + )")).unwrap_err());
    let b = syntax(indirect.parse(&mut stream("1 + )")).unwrap_err());
    assert_eq!(a, b);
}

#[test]
fn test_deep_nesting() {
    let grammar = sum_grammar(ParserConfig::with_dispatch(RuleDispatch::Inline));
    let depth = 5_000;
    let src = format!("{}1{}", "( ".repeat(depth), " )".repeat(depth));
    assert_eq!(grammar.parse(&mut stream(&src)).unwrap(), 1);
}

#[test]
fn test_repetition_and_optional() {
    let mut g = GrammarBuilder::new();
    let list = g.rule::<(Vec<String>, Option<String>)>("list");
    let word = g.token_map(K::Word, |t| t.text.to_string());
    let words = g.many(word);
    let comma = g.token(K::Comma);
    let trailer = g.seq2(comma, word, |_, w| w);
    let trailer = g.opt(trailer);
    let lparen = g.token(K::LParen);
    let rparen = g.token(K::RParen);
    let body = g.seq4(lparen, words, trailer, rparen, |_, ws, t, _| (ws, t));
    g.define(list, body);
    let grammar = g.build(list).unwrap();

    assert_eq!(grammar.parse(&mut stream("( )")).unwrap(), (vec![], None));
    assert_eq!(
        grammar.parse(&mut stream("( a b , c )")).unwrap(),
        (vec!["a".to_string(), "b".to_string()], Some("c".to_string()))
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Ambiguity and failures
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_first_declared_alternative_wins() {
    let mut g = GrammarBuilder::new();
    let root = g.rule::<&'static str>("root");
    let word = g.token(K::Word);
    let num = g.token(K::Num);
    let plus = g.token(K::Plus);
    let first = g.seq2(word, num, |_, _| "first");
    let second = g.seq2(word, plus, |_, _| "second");
    let body = g.alt([first, second]);
    g.define(root, body);
    let grammar = g.build(root).unwrap();

    assert_eq!(grammar.parse(&mut stream("x 1")).unwrap(), "first");

    // The second option is never tried once the first one has consumed input.
    let err = syntax(grammar.parse(&mut stream("x +")).unwrap_err());
    assert_eq!(err.message, "expecting Num, got `+`");
    assert_eq!(err.offset, Some(2));
    assert_eq!(err.rule, "root");
}

#[test]
fn test_no_alternative_names_rule_and_position() {
    let grammar = sum_grammar(ParserConfig::default());
    let err = syntax(grammar.parse(&mut stream("1 + ,")).unwrap_err());
    assert_eq!(err.message, "no alternative matches `,`");
    assert_eq!(err.offset, Some(4));
    assert_eq!(err.rule, "term");
    assert_eq!(
        err.to_string(),
        "Syntax error: no alternative matches `,` at offset 4 in rule `term`"
    );
}

#[test]
fn test_failure_at_end_of_input() {
    let grammar = sum_grammar(ParserConfig::default());
    let err = syntax(grammar.parse(&mut stream("( 1")).unwrap_err());
    assert_eq!(err.message, "expecting RParen, got end of input");
    assert_eq!(err.offset, None);
    assert_eq!(err.rule, "term");
}

#[test]
fn test_trailing_input_is_rejected() {
    let grammar = sum_grammar(ParserConfig::default());
    let err = syntax(grammar.parse(&mut stream("1 2")).unwrap_err());
    assert_eq!(err.message, "expected end of input, got `2`");
    assert_eq!(err.offset, Some(2));
    assert_eq!(err.rule, "sum");
}

#[test]
fn test_rejected_token_reports_its_offset() {
    let grammar = sum_grammar(ParserConfig::default());
    let err = syntax(grammar.parse(&mut stream("1 + 99999999999999999999")).unwrap_err());
    assert_eq!(err.offset, Some(4));
    assert!(err.message.contains("too large"), "{}", err.message);
}

// ═══════════════════════════════════════════════════════════════════════
// Construction contracts
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_all_optional_sequence_is_rejected() {
    let mut g = GrammarBuilder::new();
    let root = g.rule::<()>("root");
    let word = g.token(K::Word);
    let words = g.many(word);
    let body = g.seq1(words, |_| ());
    g.define(root, body);
    assert_eq!(g.build(root).unwrap_err(), GrammarError::NoMandatoryElement);
}

#[test]
fn test_nullable_alternative_option_is_rejected() {
    let mut g = GrammarBuilder::new();
    let root = g.rule::<Option<Token<K>>>("root");
    let word = g.token(K::Word);
    let maybe = g.opt(word);
    let body = g.alt([maybe]);
    g.define(root, body);
    assert!(matches!(
        g.build(root).unwrap_err(),
        GrammarError::NullableFirst { .. }
    ));
}

#[test]
fn test_undefined_and_redefined_rules() {
    let mut g = GrammarBuilder::new();
    let root = g.rule::<Token<K>>("root");
    let _ = g.rule::<Token<K>>("orphan");
    let word = g.token(K::Word);
    g.define(root, word);
    assert_eq!(
        g.build(root).unwrap_err(),
        GrammarError::UndefinedRule {
            name: "orphan".to_string()
        }
    );

    let mut g = GrammarBuilder::new();
    let root = g.rule::<Token<K>>("root");
    let word = g.token(K::Word);
    let num = g.token(K::Num);
    g.define(root, word);
    g.define(root, num);
    assert_eq!(
        g.build(root).unwrap_err(),
        GrammarError::RedefinedRule {
            name: "root".to_string()
        }
    );
}

#[test]
fn test_element_from_another_builder_is_rejected() {
    let mut a = GrammarBuilder::new();
    let word = a.token(K::Word);
    for _ in 0..10 {
        a.token(K::Comma);
    }
    let far = a.token(K::Num);

    // `word` has the same index as a node of `b`
    let mut b = GrammarBuilder::new();
    let root = b.rule::<Token<K>>("root");
    let _num = b.token(K::Num);
    let body = b.seq1(word, |t| t);
    b.define(root, body);
    assert_eq!(b.build(root).unwrap_err(), GrammarError::UnknownElement);

    // ... or indexes past the end of `c`
    let mut c = GrammarBuilder::<K>::new();
    let root = c.rule::<Token<K>>("root");
    let body = c.seq1(far, |t| t);
    c.define(root, body);
    assert_eq!(c.build(root).unwrap_err(), GrammarError::UnknownElement);

    let mut d = GrammarBuilder::<K>::new();
    let root = d.rule::<Token<K>>("root");
    let body = d.alt([word]);
    d.define(root, body);
    assert_eq!(d.build(root).unwrap_err(), GrammarError::UnknownElement);

    let mut e = GrammarBuilder::new();
    let root = e.rule::<Token<K>>("root");
    let repeated = e.many(word);
    let maybe = e.opt(far);
    let own = e.token(K::Word);
    let body = e.seq3(repeated, maybe, own, |_, _, t| t);
    e.define(root, body);
    assert_eq!(e.build(root).unwrap_err(), GrammarError::UnknownElement);
}

#[test]
fn test_rule_from_another_builder_is_rejected() {
    let mut a = GrammarBuilder::new();
    let a_root = a.rule::<Token<K>>("root");
    let a_word = a.token(K::Word);
    a.define(a_root, a_word);
    let grammar = a.build(a_root).unwrap();

    let mut b = GrammarBuilder::new();
    let b_root = b.rule::<Token<K>>("root");
    let b_word = b.token(K::Word);
    b.define(a_root, b_word);
    b.define(b_root, b_word);
    assert_eq!(b.build(b_root).unwrap_err(), GrammarError::UnknownElement);

    let mut c = GrammarBuilder::new();
    let c_root = c.rule::<Token<K>>("root");
    let c_word = c.token(K::Word);
    c.define(c_root, c_word);
    assert_eq!(c.build(a_root).unwrap_err(), GrammarError::UnknownElement);

    assert_eq!(grammar.first_set(c_word).unwrap_err(), GrammarError::UnknownElement);
    assert_eq!(grammar.rule_first_set(c_root).unwrap_err(), GrammarError::UnknownElement);
    assert!(grammar.can_start_with(a_word, K::Word).unwrap());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wide(u8);

impl TokenKind for Wide {
    fn ordinal(self) -> u8 {
        self.0
    }
}

#[test]
fn test_kind_out_of_range() {
    let mut g = GrammarBuilder::new();
    let root = g.rule::<Token<Wide>>("root");
    let body = g.token(Wide(130));
    g.define(root, body);
    assert_eq!(
        g.build(root).unwrap_err(),
        GrammarError::KindOutOfRange {
            kind: "Wide(130)".to_string(),
            ordinal: 130
        }
    );
}

// ═══════════════════════════════════════════════════════════════════════
// FIRST sets
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_first_sets() {
    let mut g = GrammarBuilder::new();
    let root = g.rule::<()>("root");
    let word = g.token(K::Word);
    let num = g.token(K::Num);
    let comma = g.token(K::Comma);
    let lead = g.many(comma);
    let maybe_word = g.opt(word);
    let seq = g.seq3(lead, maybe_word, num, |_, _, _| ());
    g.define(root, seq);
    let grammar = g.build(root).unwrap();

    let first = grammar.first_set(seq).unwrap();
    assert_eq!(
        first.ordinals().collect::<Vec<_>>(),
        vec![K::Num as u8, K::Comma as u8, K::Word as u8]
    );
    assert!(grammar.can_start_with(root.element(), K::Comma).unwrap());
    assert!(!grammar.can_start_with(root.element(), K::Plus).unwrap());
    assert_eq!(grammar.rule_first_set(root).unwrap(), first);
    assert!(matches!(
        grammar.first_set(maybe_word),
        Err(GrammarError::NullableFirst { .. })
    ));
}

#[test]
fn test_left_recursive_rule_has_finite_first_set() {
    // list := list ',' WORD | WORD
    let mut g = GrammarBuilder::new();
    let list = g.rule::<usize>("list");
    let word = g.token(K::Word);
    let comma = g.token(K::Comma);
    let more = g.seq3(list.element(), comma, word, |n, _, _| n + 1);
    let one = g.seq1(word, |_| 1usize);
    let body = g.alt([more, one]);
    g.define(list, body);
    let grammar = g.build(list).unwrap();
    assert_eq!(
        grammar.rule_first_set(list).unwrap().ordinals().collect::<Vec<_>>(),
        vec![K::Word as u8]
    );
    assert_eq!(grammar.left_recursive_rules().collect::<Vec<_>>(), vec!["list"]);
}

#[test]
fn test_mutual_left_recursion_is_reported() {
    // a := b ',' | WORD
    // b := a '+'
    let mut g = GrammarBuilder::new();
    let a = g.rule::<()>("a");
    let b = g.rule::<()>("b");
    let word = g.token(K::Word);
    let comma = g.token(K::Comma);
    let plus = g.token(K::Plus);
    let via_b = g.seq2(b.element(), comma, |_, _| ());
    let leaf = g.seq1(word, |_| ());
    let a_body = g.alt([via_b, leaf]);
    g.define(a, a_body);
    let b_body = g.seq2(a.element(), plus, |_, _| ());
    g.define(b, b_body);
    let grammar = g.build(a).unwrap();
    assert_eq!(grammar.left_recursive_rules().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_right_recursive_grammar_is_not_left_recursive() {
    let grammar = sum_grammar(ParserConfig::default());
    assert_eq!(grammar.left_recursive_rules().count(), 0);
}

#[test]
fn test_grammar_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Grammar<K, i64>>();

    let grammar = std::sync::Arc::new(sum_grammar(ParserConfig::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let grammar = std::sync::Arc::clone(&grammar);
            std::thread::spawn(move || grammar.parse(&mut stream(&format!("{} + 1", i))).unwrap())
        })
        .collect();
    let sums: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(sums, vec![1, 2, 3, 4]);
}

// ═══════════════════════════════════════════════════════════════════════
// FIRST-set oracle
// ═══════════════════════════════════════════════════════════════════════

mod oracle {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const KINDS: u8 = 6;
    const RULES: usize = 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tok(u8);

    impl TokenKind for Tok {
        fn ordinal(self) -> u8 {
            self.0
        }
    }

    #[derive(Debug, Clone)]
    enum Shape {
        Tok(u8),
        Rule(usize),
        Seq {
            leading: Vec<Shape>,
            mandatory: Box<Shape>,
            trailing: Vec<Shape>,
        },
        Alt(Vec<Shape>),
    }

    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            (0..KINDS).prop_map(Shape::Tok),
            (0..RULES).prop_map(Shape::Rule),
        ];
        leaf.prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                (
                    prop::collection::vec(inner.clone(), 0..=2),
                    inner.clone(),
                    prop::collection::vec(inner.clone(), 0..=1),
                )
                    .prop_map(|(leading, mandatory, trailing)| Shape::Seq {
                        leading,
                        mandatory: Box::new(mandatory),
                        trailing,
                    }),
                prop::collection::vec(inner, 1..=3).prop_map(Shape::Alt),
            ]
        })
    }

    fn build(g: &mut GrammarBuilder<Tok>, rules: &[Rule<()>], shape: &Shape) -> Element<()> {
        match shape {
            Shape::Tok(kind) => g.token_map(Tok(*kind), |_| ()),
            Shape::Rule(index) => rules[*index].element(),
            Shape::Alt(options) => {
                let options: Vec<_> = options.iter().map(|o| build(g, rules, o)).collect();
                g.alt(options)
            }
            Shape::Seq {
                leading,
                mandatory,
                trailing,
            } => {
                let mut children = Vec::new();
                for shape in leading {
                    let body = build(g, rules, shape);
                    children.push(g.rep(body, || (), |_, _| (), |_| ()));
                }
                children.push(build(g, rules, mandatory));
                for shape in trailing {
                    children.push(build(g, rules, shape));
                }
                match children.as_slice() {
                    [a] => g.seq1(*a, |_| ()),
                    [a, b] => g.seq2(*a, *b, |_, _| ()),
                    [a, b, c] => g.seq3(*a, *b, *c, |_, _, _| ()),
                    [a, b, c, d] => g.seq4(*a, *b, *c, *d, |_, _, _, _| ()),
                    _ => unreachable!("at most four children"),
                }
            }
        }
    }

    fn first(shape: &Shape, rules: &[BTreeSet<u8>]) -> BTreeSet<u8> {
        match shape {
            Shape::Tok(kind) => BTreeSet::from([*kind]),
            Shape::Rule(index) => rules[*index].clone(),
            Shape::Alt(options) => options.iter().flat_map(|o| first(o, rules)).collect(),
            Shape::Seq {
                leading, mandatory, ..
            } => leading
                .iter()
                .chain(std::iter::once(mandatory.as_ref()))
                .flat_map(|s| first(s, rules))
                .collect(),
        }
    }

    /// Least fixed point of the FIRST equations, by plain iteration.
    fn oracle(bodies: &[Shape]) -> Vec<BTreeSet<u8>> {
        let mut sets = vec![BTreeSet::new(); bodies.len()];
        loop {
            let next: Vec<_> = bodies.iter().map(|b| first(b, &sets)).collect();
            if next == sets {
                return sets;
            }
            sets = next;
        }
    }

    proptest! {
        #[test]
        fn can_start_with_matches_oracle(bodies in prop::collection::vec(shape(), RULES)) {
            let mut g = GrammarBuilder::new();
            let rules: Vec<Rule<()>> = (0..RULES).map(|i| g.rule(format!("r{}", i))).collect();
            let elements: Vec<Element<()>> = bodies.iter().map(|b| build(&mut g, &rules, b)).collect();
            for (rule, element) in rules.iter().zip(&elements) {
                g.define(*rule, *element);
            }
            let grammar = g.build(rules[0]).unwrap();
            let expected = oracle(&bodies);

            for (i, rule) in rules.iter().enumerate() {
                for kind in 0..KINDS {
                    let want = expected[i].contains(&kind);
                    prop_assert_eq!(grammar.can_start_with(rule.element(), Tok(kind)).unwrap(), want);
                    prop_assert_eq!(grammar.can_start_with(elements[i], Tok(kind)).unwrap(), want);
                }
            }
        }
    }
}
