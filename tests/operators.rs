use std::cell::Cell;

use minimal_match::{
    is_group, is_match_op, is_proxy, Alternation, Capability, Coerce, CountRange, MatchError,
    MatchProxy, MinimalObject, Node, NoOp, Operand, ProxyCoercion, RepeatKind, Repetition,
    TypeTag, Value,
};
use proptest::prelude::*;

#[test]
fn memoized_repetitions_are_per_instance() {
    let p = MatchProxy::new(3_i64);
    let q = MatchProxy::new(3_i64);

    let p_plus = p.one_or_more().unwrap();
    assert!(p_plus.ptr_eq(&p.one_or_more().unwrap()));
    assert!(!p_plus.ptr_eq(&q.one_or_more().unwrap()));

    let p_opt = p.zero_or_one().unwrap();
    assert!(p_opt.ptr_eq(&p.zero_or_one().unwrap()));
    assert!(!p_opt.ptr_eq(&q.zero_or_one().unwrap()));
}

#[test]
fn non_greedy_operator_and_mode_agree() {
    let x = MatchProxy::new("x");
    let via_operator = (-&x.one_or_more().unwrap()).unwrap();

    let y = MatchProxy::new("x");
    y.set_non_greedy_mode().unwrap();
    let via_mode = y.one_or_more().unwrap();

    assert_eq!(via_operator.to_text(), via_mode.to_text());
    assert_eq!(via_operator.to_text(), "+(\"x\").non_greedy");
    assert_eq!(
        x.one_or_more().unwrap().to_text(),
        via_operator.to_text().trim_end_matches(".non_greedy")
    );
}

#[test]
fn counted_ranges() {
    let x = MatchProxy::new(1_i64);
    let five = x.range(5_i64).unwrap();
    assert_eq!(
        five.as_repetition().unwrap().count_range(),
        Some(CountRange::exactly(5))
    );

    let two_eight = x.range(2..=8_i64).unwrap();
    assert_eq!(
        two_eight.as_repetition().unwrap().count_range(),
        Some(CountRange::new(2, 8).unwrap())
    );
    assert_eq!(two_eight.to_text(), format!("{}[2..8]", x.to_text()));
}

#[test]
fn zero_count_policy() {
    let x = MatchProxy::new(1_i64);
    // A scalar zero is not a positive count.
    assert!(matches!(
        x.range(0_i64),
        Err(MatchError::TypeConversion { .. })
    ));
    assert!(matches!(
        x.range(Value::from("0")),
        Err(MatchError::TypeConversion { .. })
    ));
    // An explicit empty interval is.
    let zero = x.range(0..=0_i64).unwrap();
    assert_eq!(
        zero.as_repetition().unwrap().count_range(),
        Some(CountRange::exactly(0))
    );
    assert_eq!((&x * 0_i64).unwrap().to_text(), "1[0..0]");
}

#[test]
fn invalid_ranges() {
    let x = MatchProxy::new(1_i64);
    for arg in [
        x.range(5..=2_i64),
        x.range(-1..=2_i64),
        x.range(Value::Bool(true)),
        x.range(Value::from("x")),
    ] {
        assert!(matches!(arg, Err(MatchError::TypeConversion { .. })));
    }
}

#[test]
fn repetition_requires_a_proxy() {
    let x = MatchProxy::new(1_i64);
    let alt = x.alternate_with(2_i64).unwrap();
    for kind in [
        RepeatKind::ZeroOrMore,
        RepeatKind::OneOrMore,
        RepeatKind::ZeroOrOne,
    ] {
        assert!(matches!(
            Repetition::new(kind, true, alt.clone()),
            Err(MatchError::InvalidOperand { .. })
        ));
    }
    assert!(matches!(
        Repetition::new(RepeatKind::OneOrMore, true, Node::no_op()),
        Err(MatchError::InvalidOperand { .. })
    ));
}

#[test]
fn alternation_rendering() {
    let x = MatchProxy::new(1_i64);
    let y = MatchProxy::new(2_i64);
    let alt = (&x | &y).unwrap();
    assert_eq!(alt.to_text(), format!("{}|{}", x.to_text(), y.to_text()));
}

#[test]
fn introspection_over_ancestry() {
    let x = MatchProxy::new(1_i64);
    let lazy = (-&x.zero_or_one().unwrap()).unwrap();

    for tag in lazy.header().ancestry() {
        assert!(lazy.kind_of(*tag));
    }
    assert!(!lazy.kind_of(TypeTag::Alternation));
    assert!(!lazy.kind_of(Capability::ExpressionOperators));
    assert!(lazy.is_a(TypeTag::ZeroOrOneNonGreedy));
    assert!(!lazy.is_a(TypeTag::ZeroOrOne));
    assert!(lazy.responds_to("comp_obj"));
    assert!(!lazy.responds_to("alt_obj"));
}

#[test]
fn no_op_is_a_singleton() {
    let a = Node::no_op();
    let b = Node::no_op();
    assert!(a.ptr_eq(&b));
    assert!(std::ptr::eq(NoOp::instance(), NoOp::instance()));
}

#[test]
fn alternation_coerces_raw_values_once() {
    struct Counting(Cell<usize>);

    impl Coerce for Counting {
        fn coerce(&self, receiver: &Node, operand: Operand) -> (Node, Node) {
            self.0.set(self.0.get() + 1);
            ProxyCoercion.coerce(receiver, operand)
        }
    }

    let hook = Counting(Cell::new(0));
    let x = MatchProxy::new(1_i64);
    let alt = Alternation::build(x, "raw", &hook);
    assert_eq!(hook.0.get(), 1);

    let alt = alt.as_alternation().unwrap();
    assert!(is_proxy(alt.comp_obj()));
    assert!(is_proxy(alt.alt_obj()));
}

#[test]
fn classification_tags() {
    let x = MatchProxy::new(1_i64);
    let plus = x.one_or_more().unwrap();
    let alt = x.alternate_with(2_i64).unwrap();

    assert_eq!(
        (is_proxy(&x), is_match_op(&x), is_group(&x)),
        (true, false, false)
    );
    assert_eq!(
        (is_proxy(&plus), is_match_op(&plus), is_group(&plus)),
        (false, true, false)
    );
    assert_eq!(
        (is_proxy(&alt), is_match_op(&alt), is_group(&alt)),
        (false, true, true)
    );
}

#[test]
fn repetitions_forward_proxy_operators() {
    let x = MatchProxy::new(1_i64);
    let plus = x.one_or_more().unwrap();

    // Forwarded to `x`, so this is `x`'s own memoized node.
    assert!(plus.one_or_more().unwrap().ptr_eq(&plus));
    assert_eq!(plus.zero_or_one().unwrap().to_text(), "~(1)");
    assert_eq!(plus.range(2..=3_i64).unwrap().to_text(), "1[2..3]");

    let proxy = plus.set_non_greedy_mode().unwrap();
    assert!(proxy.ptr_eq(&x));
    assert_eq!(
        x.as_proxy().unwrap().mode(),
        minimal_match::Mode::NonGreedy
    );
    // The repetition built before the switch stays greedy.
    assert!(plus.as_repetition().unwrap().is_greedy());
}

#[test]
fn repetitions_alternate_directly() {
    let x = MatchProxy::new(1_i64);
    let plus = x.one_or_more().unwrap();
    let alt = (&plus | 2_i64).unwrap();
    let inner = alt.as_alternation().unwrap();
    assert!(inner.comp_obj().ptr_eq(&plus));
    assert_eq!(alt.to_text(), "+(1)|2");
    assert_eq!(alt.inspect(), "<OneOrMore of MatchProxy(1) or MatchProxy(2)>");
}

#[test]
fn nested_patterns_take_repetition() {
    let alt = MatchProxy::new("a").alternate_with("b").unwrap();
    let grouped = MatchProxy::pattern(alt);
    let star = grouped.zero_or_more_as_sequence().unwrap();
    assert_eq!(star[0].to_text(), "*((\"a\"|\"b\"))");
}

#[test]
fn unresolved_names_do_not_abort() {
    let x = MatchProxy::new(1_i64);
    assert!(!x.kind_of_named("NotAType"));
    assert!(x.kind_of_named("AbstractMatchProxy"));
    assert!(x.kind_of_named("Alternate"));
    let plus = x.one_or_more().unwrap();
    assert_eq!(plus.to_text(), "+(1)");
}

proptest! {
    #[test]
    fn counted_text_embeds_bounds(lo in 0i64..500, width in 0i64..500, n in -50i64..50) {
        let x = MatchProxy::new(n);
        let node = x.range(lo..=lo + width).unwrap();
        prop_assert_eq!(node.to_text(), format!("{}[{}..{}]", n, lo, lo + width));
        let lazy = (-&node).unwrap();
        prop_assert_eq!(lazy.to_text(), format!("{}[{}..{}].non_greedy", n, lo, lo + width));
    }

    #[test]
    fn memo_identity_holds_across_mode_toggles(toggles in proptest::collection::vec(any::<bool>(), 1..20)) {
        let x = MatchProxy::new(1_i64);
        let greedy = x.one_or_more().unwrap();
        x.set_non_greedy_mode().unwrap();
        let lazy = x.one_or_more().unwrap();
        for non_greedy in toggles {
            let expected = if non_greedy {
                x.set_non_greedy_mode().unwrap();
                &lazy
            } else {
                x.set_greedy_mode().unwrap();
                &greedy
            };
            prop_assert!(x.one_or_more().unwrap().ptr_eq(expected));
        }
    }
}
